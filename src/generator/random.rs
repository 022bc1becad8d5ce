use alloc::vec::Vec;

use super::*;

/// Uniformly random generation: a flat run of mines is shuffled with an
/// unbiased Fisher-Yates pass and reshaped into rows.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomMineArrayGenerator {
    seed: u64,
}

impl RandomMineArrayGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineArrayGenerator for RandomMineArrayGenerator {
    fn generate(self, config: MineArrayConfig) -> Vec<Vec<u8>> {
        use rand::prelude::*;

        let normalized = MineArrayConfig::new(config.rows, config.cols, config.mines);
        if normalized.mines < config.mines {
            log::warn!(
                "mine array already full, requested {} but only fits {}",
                config.mines,
                normalized.mines
            );
        }

        let mut flat: Vec<u8> = (0..normalized.total_cells())
            .map(|i| u8::from(i < normalized.mines))
            .collect();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        for i in (1..flat.len()).rev() {
            let j = rng.random_range(0..=i);
            flat.swap(i, j);
        }

        flat.chunks(normalized.cols).map(|chunk| chunk.to_vec()).collect()
    }
}

/// One-shot wrapper over [`RandomMineArrayGenerator`].
pub fn generate_mine_array(config: MineArrayConfig, seed: u64) -> Vec<Vec<u8>> {
    RandomMineArrayGenerator::new(seed).generate(config)
}
