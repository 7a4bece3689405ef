//! Authoritative game state representation.
//!
//! This module owns the mine grid, player position, inventory, economy and
//! progress counters. Runtime layers read this state freely but mutate it
//! through [`crate::engine::MineEngine`].
mod economy;
mod error;
mod flags;
mod inventory;
mod snapshot;

pub use economy::{Economy, ProgressStats};
pub use error::SnapshotError;
pub use flags::SessionFlags;
pub use inventory::Inventory;
pub use snapshot::GameSnapshot;

use crate::config::GameConfig;
use crate::mine::{Cell, Grid, MineGenerator};

/// Discrete grid position: `x` is the column, `y` the row (depth).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Canonical state of one game session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub grid: Grid,
    pub player: Position,
    pub inventory: Inventory,
    pub economy: Economy,
    pub progress: ProgressStats,
    /// Screen control; reconstructed on load rather than persisted.
    pub flags: SessionFlags,
}

impl GameState {
    /// Creates a freshly generated state that has not started yet (menu shown).
    pub fn new(config: &GameConfig, generator: &mut dyn MineGenerator) -> Self {
        let grid = Grid::generate(
            config.cols,
            config.initial_rows,
            config.max_rows,
            generator,
        );
        Self {
            grid,
            player: Position::new(config.start_x as i32, config.start_y as i32),
            inventory: Inventory::default(),
            economy: Economy::new(config.initial_energy),
            progress: ProgressStats::default(),
            flags: SessionFlags::MENU,
        }
    }

    /// Creates a freshly generated state that is already in play.
    pub fn new_game(config: &GameConfig, generator: &mut dyn MineGenerator) -> Self {
        let mut state = Self::new(config, generator);
        state.flags = SessionFlags::PLAYING;
        state
    }

    /// Rebuilds a playing state from a snapshot.
    ///
    /// Progress counters missing from older saves arrive here already
    /// defaulted; everything else must satisfy the grid-shape invariants.
    pub fn from_snapshot(snapshot: GameSnapshot, max_rows: u32) -> Result<Self, SnapshotError> {
        if snapshot.mine.len() != snapshot.rows as usize {
            return Err(SnapshotError::RowCountMismatch {
                declared: snapshot.rows,
                actual: snapshot.mine.len(),
            });
        }
        let grid = Grid::from_rows(snapshot.cols, snapshot.mine, max_rows)?;
        let player = Position::new(snapshot.player_x, snapshot.player_y);
        if !grid.contains(player.x, player.y) {
            return Err(SnapshotError::PlayerOutOfBounds {
                x: player.x,
                y: player.y,
            });
        }
        if snapshot.economy.pickaxe_level < GameConfig::STARTING_PICKAXE_LEVEL {
            return Err(SnapshotError::InvalidPickaxeLevel(
                snapshot.economy.pickaxe_level,
            ));
        }
        if snapshot.economy.energy > snapshot.economy.max_energy {
            return Err(SnapshotError::EnergyExceedsMax {
                energy: snapshot.economy.energy,
                max_energy: snapshot.economy.max_energy,
            });
        }

        Ok(Self {
            grid,
            player,
            inventory: snapshot.inventory,
            economy: snapshot.economy,
            progress: snapshot.progress,
            flags: SessionFlags::PLAYING,
        })
    }

    /// Captures every persisted field, stamped with `saved_at` (epoch ms).
    pub fn snapshot(&self, saved_at: i64) -> GameSnapshot {
        GameSnapshot {
            cols: self.grid.cols(),
            rows: self.grid.rows(),
            player_x: self.player.x,
            player_y: self.player.y,
            mine: self.grid.to_rows(),
            inventory: self.inventory,
            economy: self.economy,
            progress: self.progress,
            saved_at,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.flags.contains(SessionFlags::PLAYING)
    }

    pub fn is_paused(&self) -> bool {
        self.flags.contains(SessionFlags::PAUSED)
    }

    pub fn menu_open(&self) -> bool {
        self.flags.contains(SessionFlags::MENU)
    }

    /// Out of energy: movement is disabled until a new game or an upgrade.
    pub fn is_game_over(&self) -> bool {
        self.economy.energy == 0
    }

    /// Cell under the player.
    pub fn current_cell(&self) -> Cell {
        self.grid.cell_at(self.player.y as u32, self.player.x as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mine::{RandomGenerator, UniformGenerator};

    #[test]
    fn new_state_waits_in_menu() {
        let state = GameState::new(&GameConfig::default(), &mut UniformGenerator(Cell::Wall));
        assert!(!state.is_playing());
        assert!(state.menu_open());
        assert_eq!(state.player, Position::new(4, 0));
        assert_eq!(state.grid.rows(), 15);
        assert_eq!(state.grid.cols(), 10);
        assert_eq!(state.economy, Economy::new(100));
    }

    #[test]
    fn snapshot_round_trips() {
        let config = GameConfig::default();
        let mut state = GameState::new_game(&config, &mut RandomGenerator::seeded(5));
        state.player = Position::new(7, 9);
        state.inventory.add(crate::mine::OreKind::Gold);
        state.economy.coins = 33;
        state.progress.max_depth_reached = 9;

        let restored = GameState::from_snapshot(state.snapshot(1_700_000_000_000), 200).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn restore_refuses_inconsistent_shapes() {
        let config = GameConfig::default();
        let state = GameState::new_game(&config, &mut UniformGenerator(Cell::COAL));

        let mut snapshot = state.snapshot(0);
        snapshot.rows = 16;
        assert_eq!(
            GameState::from_snapshot(snapshot, 200),
            Err(SnapshotError::RowCountMismatch {
                declared: 16,
                actual: 15
            })
        );

        let mut snapshot = state.snapshot(0);
        snapshot.player_x = 10;
        assert!(matches!(
            GameState::from_snapshot(snapshot, 200),
            Err(SnapshotError::PlayerOutOfBounds { .. })
        ));

        let mut snapshot = state.snapshot(0);
        snapshot.economy.energy = 500;
        assert!(matches!(
            GameState::from_snapshot(snapshot, 200),
            Err(SnapshotError::EnergyExceedsMax { .. })
        ));
    }
}
