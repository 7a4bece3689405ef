use rand::SeedableRng;
use rand::rngs::StdRng;

use super::cell::Cell;
use super::distribution::OreThresholds;

/// Source of freshly generated mine rows.
///
/// Rows are append-only: a generator is only ever asked for rows that do not
/// exist yet, and each cell is keyed on its own absolute row index.
pub trait MineGenerator: Send {
    /// Produces one cell for a row at `depth`.
    fn cell_for_depth(&mut self, depth: u32) -> Cell;

    /// Produces rows `start..end`, `cols` cells each, flattened row-major.
    fn generate_rows(&mut self, start: u32, end: u32, cols: u32) -> Vec<Cell> {
        let len = end.saturating_sub(start) as usize * cols as usize;
        let mut cells = Vec::with_capacity(len);
        for depth in start..end {
            for _ in 0..cols {
                cells.push(self.cell_for_depth(depth));
            }
        }
        cells
    }
}

/// Draws every cell independently from the depth-weighted distribution.
///
/// Generation is non-deterministic per play unless explicitly seeded.
#[derive(Clone, Debug)]
pub struct RandomGenerator<R = StdRng> {
    rng: R,
}

impl RandomGenerator<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible generator, used by tests and `MINE_SEED`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R> RandomGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl Default for RandomGenerator<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R> MineGenerator for RandomGenerator<R>
where
    R: rand::Rng + Send,
{
    fn cell_for_depth(&mut self, depth: u32) -> Cell {
        OreThresholds::for_depth(depth).sample(&mut self.rng)
    }
}

/// Fills every generated cell with the same kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UniformGenerator(pub Cell);

impl MineGenerator for UniformGenerator {
    fn cell_for_depth(&mut self, _depth: u32) -> Cell {
        self.0
    }
}
