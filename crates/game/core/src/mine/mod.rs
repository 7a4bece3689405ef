//! Mine layout: cell kinds, the depth-weighted ore distribution, row
//! generation, and the growable grid that stores generated rows.
mod cell;
mod distribution;
mod generator;
mod grid;

pub use cell::{Cell, OreKind};
pub use distribution::{OreThresholds, ROLL_RANGE};
pub use generator::{MineGenerator, RandomGenerator, UniformGenerator};
pub use grid::Grid;
