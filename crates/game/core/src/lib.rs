//! Mine generation and player progression rules shared across clients.
//!
//! `mine-core` defines the canonical rules (ore distribution, mine layout,
//! movement, economy) and exposes pure APIs that the runtime drives. All
//! state mutation flows through [`engine::MineEngine`]; persistence is never
//! performed here; the engine only reports which checkpoints a transition
//! asks for.
pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod mine;
pub mod state;

pub use action::{Direction, MoveError, ShopError};
pub use config::{ConfigError, GameConfig};
pub use engine::{MineEngine, MoveOutcome, PersistRequest, PersistRequests, Transition};
pub use error::{ErrorSeverity, GameError};
pub use mine::{
    Cell, Grid, MineGenerator, OreKind, OreThresholds, RandomGenerator, UniformGenerator,
};
pub use state::{
    Economy, GameSnapshot, GameState, Inventory, Position, ProgressStats, SessionFlags,
    SnapshotError,
};
