/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Width of every mine row. Constant for the lifetime of a game.
    pub cols: u32,
    /// Number of rows generated by a new game.
    pub initial_rows: u32,
    /// Hard cap on mine height; expansion stops here.
    pub max_rows: u32,
    /// Rows appended per auto-expansion.
    pub expand_step: u32,
    /// Expansion triggers once the player is this close to the bottom edge.
    pub expand_margin: u32,
    /// Player spawn column.
    pub start_x: u32,
    /// Player spawn row.
    pub start_y: u32,
    /// Starting energy and starting energy capacity.
    pub initial_energy: u32,
    /// A move checkpoints when the energy it spends from is a multiple of this.
    pub autosave_interval: u32,
}

impl GameConfig {
    // ===== economy constants =====
    pub const PICKAXE_BASE_COST: u32 = 50;
    pub const PICKAXE_COST_PER_LEVEL: u32 = 30;
    pub const ENERGY_UPGRADE_COST: u32 = 60;
    pub const ENERGY_UPGRADE_AMOUNT: u32 = 20;
    pub const STARTING_PICKAXE_LEVEL: u32 = 1;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_COLS: u32 = 10;
    pub const DEFAULT_INITIAL_ROWS: u32 = 15;
    pub const DEFAULT_MAX_ROWS: u32 = 200;
    pub const DEFAULT_EXPAND_STEP: u32 = 10;
    pub const DEFAULT_EXPAND_MARGIN: u32 = 5;
    pub const DEFAULT_START_X: u32 = 4;
    pub const DEFAULT_INITIAL_ENERGY: u32 = 100;
    pub const DEFAULT_AUTOSAVE_INTERVAL: u32 = 10;

    pub fn new() -> Self {
        Self {
            cols: Self::DEFAULT_COLS,
            initial_rows: Self::DEFAULT_INITIAL_ROWS,
            max_rows: Self::DEFAULT_MAX_ROWS,
            expand_step: Self::DEFAULT_EXPAND_STEP,
            expand_margin: Self::DEFAULT_EXPAND_MARGIN,
            start_x: Self::DEFAULT_START_X,
            start_y: 0,
            initial_energy: Self::DEFAULT_INITIAL_ENERGY,
            autosave_interval: Self::DEFAULT_AUTOSAVE_INTERVAL,
        }
    }

    /// Default configuration with a different mine width.
    ///
    /// The spawn column is pulled inside the grid when the width shrinks.
    pub fn with_cols(cols: u32) -> Self {
        let defaults = Self::new();
        Self {
            cols,
            start_x: defaults.start_x.min(cols.saturating_sub(1)),
            ..defaults
        }
    }

    /// Cost of the next pickaxe upgrade from `level`.
    pub const fn pickaxe_upgrade_cost(level: u32) -> u32 {
        Self::PICKAXE_BASE_COST
            + Self::PICKAXE_COST_PER_LEVEL * level.saturating_sub(Self::STARTING_PICKAXE_LEVEL)
    }

    /// Checks the invariants every other module relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cols == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        if self.initial_rows == 0 {
            return Err(ConfigError::ZeroRows);
        }
        if self.initial_rows > self.max_rows {
            return Err(ConfigError::InitialRowsExceedCap {
                initial_rows: self.initial_rows,
                max_rows: self.max_rows,
            });
        }
        if self.start_x >= self.cols || self.start_y >= self.initial_rows {
            return Err(ConfigError::SpawnOutOfBounds {
                x: self.start_x,
                y: self.start_y,
            });
        }
        if self.autosave_interval == 0 {
            return Err(ConfigError::ZeroAutosaveInterval);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Rejected configuration values.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("mine must have at least one column")]
    ZeroColumns,

    #[error("mine must start with at least one row")]
    ZeroRows,

    #[error("initial rows {initial_rows} exceed the row cap {max_rows}")]
    InitialRowsExceedCap { initial_rows: u32, max_rows: u32 },

    #[error("spawn ({x}, {y}) lies outside the initial mine")]
    SpawnOutOfBounds { x: u32, y: u32 },

    #[error("autosave interval must be positive")]
    ZeroAutosaveInterval,
}
