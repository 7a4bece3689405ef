//! Operation pipeline for a single game session.
//!
//! The [`MineEngine`] is the authoritative reducer for [`GameState`]. Every
//! operation either applies completely or returns an error with the state
//! untouched. Persistence is never performed here: a successful transition
//! lists the checkpoints it asks for, in order, and the runtime issues them.

use arrayvec::ArrayVec;

use crate::action::{Direction, MoveError, ShopError};
use crate::config::GameConfig;
use crate::mine::{Cell, MineGenerator};
use crate::state::{GameSnapshot, GameState, Position, SessionFlags};

/// Side effect a transition asks the persistence layer to perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PersistRequest {
    /// Write the full snapshot to the save slot.
    SaveGame,
    /// Publish the current standings to the leaderboard.
    UpdateLeaderboard,
}

/// Ordered persistence requests of one transition.
pub type PersistRequests = ArrayVec<PersistRequest, 2>;

/// Result of a successful operation plus the checkpoints it triggered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition<T> {
    pub value: T,
    pub requests: PersistRequests,
    /// State to write for `SaveGame` when it was captured partway through
    /// the operation. `saved_at` is left at zero for the caller to stamp.
    /// `None` means the state after the operation is the one to save.
    pub checkpoint: Option<Box<GameSnapshot>>,
}

impl<T> Transition<T> {
    fn quiet(value: T) -> Self {
        Self {
            value,
            requests: PersistRequests::new(),
            checkpoint: None,
        }
    }

    fn with(value: T, requests: &[PersistRequest]) -> Self {
        let mut transition = Self::quiet(value);
        transition.requests.extend(requests.iter().copied());
        transition
    }

    pub fn requests_save(&self) -> bool {
        self.requests.contains(&PersistRequest::SaveGame)
    }
}

/// What a successful step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub from: Position,
    pub to: Position,
    /// Cell that occupied the destination before the step cleared it.
    pub mined: Cell,
    /// Rows appended by auto-expansion (zero when not triggered or capped).
    pub rows_added: u32,
}

/// Applies game operations to a borrowed state.
pub struct MineEngine<'a> {
    state: &'a mut GameState,
    config: &'a GameConfig,
    generator: &'a mut dyn MineGenerator,
}

impl<'a> MineEngine<'a> {
    pub fn new(
        state: &'a mut GameState,
        config: &'a GameConfig,
        generator: &'a mut dyn MineGenerator,
    ) -> Self {
        Self {
            state,
            config,
            generator,
        }
    }

    /// Replaces the whole state with a freshly generated game in play.
    pub fn new_game(&mut self) {
        *self.state = GameState::new_game(self.config, self.generator);
    }

    pub fn reset_game(&mut self) {
        self.new_game();
    }

    /// Applies a raw `(dx, dy)` step; anything but one orthogonal cell is rejected.
    pub fn step(&mut self, dx: i32, dy: i32) -> Result<Transition<MoveOutcome>, MoveError> {
        let direction = Direction::try_from((dx, dy))?;
        self.move_player(direction)
    }

    /// Moves the player one cell, mining whatever occupies the destination.
    ///
    /// Checkpoints when the energy spent from is a multiple of the autosave
    /// interval, then expands the mine when the new row is within
    /// `expand_margin` rows of the bottom. The checkpoint snapshot is taken
    /// before the expansion.
    pub fn move_player(
        &mut self,
        direction: Direction,
    ) -> Result<Transition<MoveOutcome>, MoveError> {
        let state = &mut *self.state;
        if !state.is_playing() {
            return Err(MoveError::NotPlaying);
        }
        if state.is_paused() {
            return Err(MoveError::Paused);
        }
        if state.economy.energy == 0 {
            return Err(MoveError::OutOfEnergy);
        }

        let (dx, dy) = direction.delta();
        let from = state.player;
        let to = from.offset(dx, dy);
        if !state.grid.contains(to.x, to.y) {
            return Err(MoveError::OutOfBounds { destination: to });
        }

        let (row, col) = (to.y as u32, to.x as u32);
        let mined = state.grid.cell_at(row, col);
        match mined {
            Cell::Ore(kind) => {
                state.inventory.add(kind);
                if kind.is_rare() {
                    state.progress.total_rare_ores_collected += 1;
                }
                state.grid.set_cell(row, col, Cell::Empty);
            }
            Cell::Wall => state.grid.set_cell(row, col, Cell::Empty),
            Cell::Empty => {}
        }

        state.player = to;
        let energy_before = state.economy.energy;
        state.economy.energy -= 1;
        state.progress.max_depth_reached = state.progress.max_depth_reached.max(row);

        let checkpoint = (energy_before % self.config.autosave_interval == 0)
            .then(|| Box::new(state.snapshot(0)));

        let near_bottom = row >= state.grid.rows().saturating_sub(self.config.expand_margin);
        let rows_added = if near_bottom && !state.grid.is_capped() {
            state.grid.expand(self.config.expand_step, self.generator)
        } else {
            0
        };

        let mut transition = Transition::quiet(MoveOutcome {
            from,
            to,
            mined,
            rows_added,
        });
        if checkpoint.is_some() {
            transition.requests.push(PersistRequest::SaveGame);
            transition.checkpoint = checkpoint;
        }
        Ok(transition)
    }

    /// Sells the whole inventory at fixed prices and returns the coins earned.
    ///
    /// Always publishes standings and then saves, even when nothing was sold.
    pub fn sell_all_ores(&mut self) -> Transition<u32> {
        let value = self.state.inventory.value();
        self.state.economy.coins = self.state.economy.coins.saturating_add(value);
        self.state.inventory.clear();
        Transition::with(
            value,
            &[PersistRequest::UpdateLeaderboard, PersistRequest::SaveGame],
        )
    }

    /// Buys the next pickaxe level. Returns the price paid.
    pub fn upgrade_pickaxe(&mut self) -> Result<Transition<u32>, ShopError> {
        let cost = self.state.economy.pickaxe_upgrade_cost();
        self.charge(cost)?;
        self.state.economy.pickaxe_level += 1;
        Ok(Transition::with(cost, &[PersistRequest::SaveGame]))
    }

    /// Raises energy capacity and refills the same amount immediately.
    pub fn increase_max_energy(&mut self) -> Result<Transition<u32>, ShopError> {
        let cost = GameConfig::ENERGY_UPGRADE_COST;
        self.charge(cost)?;
        let economy = &mut self.state.economy;
        economy.max_energy += GameConfig::ENERGY_UPGRADE_AMOUNT;
        economy.energy += GameConfig::ENERGY_UPGRADE_AMOUNT;
        Ok(Transition::with(cost, &[PersistRequest::SaveGame]))
    }

    /// Flips pause and menu together. Opening the menu saves first.
    ///
    /// Returns whether the menu is now open.
    pub fn toggle_menu(&mut self) -> Transition<bool> {
        let opening = !self.state.menu_open();
        self.state
            .flags
            .toggle(SessionFlags::PAUSED | SessionFlags::MENU);
        if opening {
            Transition::with(true, &[PersistRequest::SaveGame])
        } else {
            Transition::quiet(false)
        }
    }

    /// Leaves the menu without touching anything else.
    pub fn resume_game(&mut self) {
        self.state
            .flags
            .remove(SessionFlags::PAUSED | SessionFlags::MENU);
    }

    fn charge(&mut self, cost: u32) -> Result<(), ShopError> {
        let coins = self.state.economy.coins;
        if coins < cost {
            return Err(ShopError::InsufficientFunds { cost, coins });
        }
        self.state.economy.coins = coins - cost;
        Ok(())
    }
}
