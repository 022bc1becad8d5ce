use thiserror::Error;

/// Rejection reasons for a caller-supplied mine layout.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("mine layout has no rows")]
    Empty,
    #[error("mine layout rows are empty")]
    EmptyRow,
    #[error("mine layout rows have inconsistent lengths")]
    Jagged,
    #[error("mine layout values must be 0 or 1")]
    InvalidValue,
}

pub type Result<T> = core::result::Result<T, LayoutError>;
