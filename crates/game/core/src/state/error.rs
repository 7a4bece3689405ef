//! Snapshot validation errors.

use crate::error::{ErrorSeverity, GameError};

/// Reasons a snapshot cannot be applied to the live state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot mine has no rows")]
    EmptyGrid,

    #[error("snapshot mine has zero columns")]
    ZeroColumns,

    #[error("snapshot declares {declared} rows but carries {actual}")]
    RowCountMismatch { declared: u32, actual: usize },

    #[error("row {row} has {len} cells, expected {cols}")]
    RaggedRow { row: u32, len: usize, cols: u32 },

    #[error("snapshot has {rows} rows, above the cap of {max_rows}")]
    TooManyRows { rows: u32, max_rows: u32 },

    #[error("player position ({x}, {y}) lies outside the mine")]
    PlayerOutOfBounds { x: i32, y: i32 },

    #[error("energy {energy} exceeds capacity {max_energy}")]
    EnergyExceedsMax { energy: u32, max_energy: u32 },

    #[error("pickaxe level {0} is below the starting level")]
    InvalidPickaxeLevel(u32),
}

impl GameError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use SnapshotError::*;
        match self {
            EmptyGrid => "SNAPSHOT_EMPTY_GRID",
            ZeroColumns => "SNAPSHOT_ZERO_COLUMNS",
            RowCountMismatch { .. } => "SNAPSHOT_ROW_COUNT_MISMATCH",
            RaggedRow { .. } => "SNAPSHOT_RAGGED_ROW",
            TooManyRows { .. } => "SNAPSHOT_TOO_MANY_ROWS",
            PlayerOutOfBounds { .. } => "SNAPSHOT_PLAYER_OUT_OF_BOUNDS",
            EnergyExceedsMax { .. } => "SNAPSHOT_ENERGY_EXCEEDS_MAX",
            InvalidPickaxeLevel(_) => "SNAPSHOT_INVALID_PICKAXE_LEVEL",
        }
    }
}
