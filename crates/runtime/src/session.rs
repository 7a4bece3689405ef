//! One player's game session.
//!
//! [`GameSession`] owns the state, the configuration, and the mine generator
//! of a single game, and is the only mutator of that state. Gameplay
//! operations are synchronous and return immediately; any checkpoint a
//! transition asks for is queued to the session's checkpoint worker, which
//! runs checkpoints in submission order and reports back through [`flush`].
//!
//! [`flush`]: GameSession::flush

use mine_core::{
    ConfigError, Direction, GameConfig, GameError, GameSnapshot, GameState, MineEngine,
    MineGenerator, MoveError, MoveOutcome, PersistRequest, PersistRequests, ShopError, Transition,
};
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use crate::documents::{GAME_STATE, LeaderboardEntry};
use crate::persistence::{
    CheckpointQueue, CheckpointReport, Job, LoadOutcome, PersistOutcome, PersistenceError,
    PersistenceGateway, SkipReason, Standings,
};
use crate::types::now_ms;

type PersistResult<T> = std::result::Result<T, PersistenceError>;

pub struct GameSession {
    config: GameConfig,
    state: GameState,
    generator: Box<dyn MineGenerator>,
    gateway: Option<PersistenceGateway>,
    checkpoints: Option<CheckpointQueue>,
}

impl GameSession {
    /// Creates a session sitting at the menu with a freshly generated mine.
    pub fn new(
        config: GameConfig,
        mut generator: Box<dyn MineGenerator>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = GameState::new(&config, generator.as_mut());
        Ok(Self {
            config,
            state,
            generator,
            gateway: None,
            checkpoints: None,
        })
    }

    pub fn with_gateway(mut self, gateway: PersistenceGateway) -> Self {
        self.gateway = Some(gateway);
        self
    }

    pub fn gateway(&self) -> Option<&PersistenceGateway> {
        self.gateway.as_ref()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access that bypasses the engine and triggers no checkpoints.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    // ------------------------------------------------------------------
    // Gameplay
    // ------------------------------------------------------------------

    pub fn new_game(&mut self) {
        self.engine().new_game();
        info!(
            cols = self.state.grid.cols(),
            rows = self.state.grid.rows(),
            "Started new game"
        );
    }

    pub fn reset_game(&mut self) {
        self.new_game();
    }

    /// Steps by `(dx, dy)`. Returns `false`, with nothing changed, when the
    /// step is rejected.
    pub fn move_player(&mut self, dx: i32, dy: i32) -> bool {
        let result = self.engine().step(dx, dy);
        self.settle_move(result)
    }

    pub fn move_direction(&mut self, direction: Direction) -> bool {
        let result = self.engine().move_player(direction);
        self.settle_move(result)
    }

    /// Sells everything carried and returns the coins earned.
    pub fn sell_all_ores(&mut self) -> u32 {
        let transition = self.engine().sell_all_ores();
        info!(
            earned = transition.value,
            coins = self.state.economy.coins,
            "Sold ores"
        );
        self.dispatch(transition.requests, transition.checkpoint);
        transition.value
    }

    pub fn upgrade_pickaxe(&mut self) -> bool {
        let result = self.engine().upgrade_pickaxe();
        self.settle_purchase("pickaxe", result)
    }

    pub fn increase_max_energy(&mut self) -> bool {
        let result = self.engine().increase_max_energy();
        self.settle_purchase("energy", result)
    }

    /// Opens or closes the menu. Returns whether it is now open.
    pub fn toggle_menu(&mut self) -> bool {
        let transition = self.engine().toggle_menu();
        self.dispatch(transition.requests, transition.checkpoint);
        transition.value
    }

    pub fn resume_game(&mut self) {
        self.engine().resume_game();
    }

    pub fn pickaxe_upgrade_cost(&self) -> u32 {
        self.state.economy.pickaxe_upgrade_cost()
    }

    pub fn energy_upgrade_cost(&self) -> u32 {
        GameConfig::ENERGY_UPGRADE_COST
    }

    pub fn inventory_value(&self) -> u32 {
        self.state.inventory.value()
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Saves the current state and waits for the write.
    pub async fn save(&self) -> PersistResult<PersistOutcome> {
        let Some(gateway) = &self.gateway else {
            return Ok(PersistOutcome::Skipped(SkipReason::Detached));
        };
        gateway.save(&self.state.snapshot(now_ms())).await
    }

    /// Replaces the state with the saved game, if there is one.
    ///
    /// Returns `Ok(false)` and leaves the state untouched when there is no
    /// save or nobody is signed in. A save that cannot be rebuilt into a
    /// consistent mine is refused as malformed.
    pub async fn load(&mut self) -> PersistResult<bool> {
        let Some(gateway) = self.gateway.clone() else {
            return Ok(false);
        };
        let snapshot = match gateway.load().await? {
            LoadOutcome::Loaded(snapshot) => snapshot,
            LoadOutcome::NotFound | LoadOutcome::Skipped(_) => return Ok(false),
        };
        let state = GameState::from_snapshot(snapshot, self.config.max_rows)
            .map_err(|err| PersistenceError::malformed(GAME_STATE, err))?;
        self.state = state;
        info!(
            depth = self.state.player.y,
            energy = self.state.economy.energy,
            "Resumed saved game"
        );
        Ok(true)
    }

    /// Publishes the current standings.
    pub async fn update_leaderboard(&self) -> PersistResult<PersistOutcome> {
        let Some(gateway) = &self.gateway else {
            return Ok(PersistOutcome::Skipped(SkipReason::Detached));
        };
        gateway.update_leaderboard(Standings::from(&self.state)).await
    }

    /// Loads the saved game and resumes it, or starts a new game when there
    /// is nothing to resume. Returns whether a save was restored.
    pub async fn continue_game(&mut self) -> bool {
        let loaded = match self.load().await {
            Ok(loaded) => loaded,
            Err(err) => {
                warn!(code = err.error_code(), "Failed to load saved game: {}", err);
                false
            }
        };
        if loaded || self.state.is_playing() {
            self.resume_game();
        } else {
            self.new_game();
        }
        loaded
    }

    pub async fn top_leaderboard(&self, n: usize) -> PersistResult<Vec<LeaderboardEntry>> {
        match &self.gateway {
            Some(gateway) => gateway.top_leaderboard(n).await,
            None => Ok(Vec::new()),
        }
    }

    /// Number of queued checkpoints the worker has not finished.
    pub fn pending_checkpoints(&self) -> usize {
        self.checkpoints.as_ref().map_or(0, CheckpointQueue::pending)
    }

    /// Waits for every checkpoint queued so far and returns the reports
    /// collected since the previous flush.
    ///
    /// Queued checkpoints outlive the session only as long as the runtime
    /// does, so callers flush before shutting down.
    pub async fn flush(&self) -> Vec<CheckpointReport> {
        match &self.checkpoints {
            Some(queue) => queue.flush().await,
            None => Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn engine(&mut self) -> MineEngine<'_> {
        MineEngine::new(&mut self.state, &self.config, self.generator.as_mut())
    }

    fn settle_move(&mut self, result: Result<Transition<MoveOutcome>, MoveError>) -> bool {
        match result {
            Ok(Transition {
                value: outcome,
                requests,
                checkpoint,
            }) => {
                debug!(
                    x = outcome.to.x,
                    y = outcome.to.y,
                    mined = %outcome.mined,
                    energy = self.state.economy.energy,
                    "Moved"
                );
                if outcome.rows_added > 0 {
                    debug!(
                        added = outcome.rows_added,
                        rows = self.state.grid.rows(),
                        "Expanded mine"
                    );
                }
                self.dispatch(requests, checkpoint);
                true
            }
            Err(err) => {
                debug!(code = err.error_code(), "Move rejected: {}", err);
                false
            }
        }
    }

    fn settle_purchase(
        &mut self,
        item: &'static str,
        result: Result<Transition<u32>, ShopError>,
    ) -> bool {
        match result {
            Ok(transition) => {
                info!(
                    item,
                    cost = transition.value,
                    coins = self.state.economy.coins,
                    "Purchased upgrade"
                );
                self.dispatch(transition.requests, transition.checkpoint);
                true
            }
            Err(err) => {
                debug!(item, code = err.error_code(), "Purchase rejected: {}", err);
                false
            }
        }
    }

    /// Queues the requested checkpoints to the worker, starting it on first
    /// use.
    ///
    /// Snapshots are captured here, or taken from `captured` when the
    /// engine recorded one mid-transition; the worker never sees later
    /// mutations.
    fn dispatch(&mut self, requests: PersistRequests, mut captured: Option<Box<GameSnapshot>>) {
        if requests.is_empty() {
            return;
        }
        if self.gateway.is_none() {
            debug!("Checkpoint skipped: {}", SkipReason::Detached);
            return;
        }

        let saved_at = now_ms();
        let jobs: Vec<Job> = requests
            .iter()
            .map(|request| match request {
                PersistRequest::SaveGame => {
                    let mut snapshot = captured
                        .take()
                        .unwrap_or_else(|| Box::new(self.state.snapshot(saved_at)));
                    snapshot.saved_at = saved_at;
                    Job::Save(snapshot)
                }
                PersistRequest::UpdateLeaderboard => Job::Publish(Standings::from(&self.state)),
            })
            .collect();

        let Some(queue) = self.checkpoint_queue() else {
            warn!(
                count = requests.len(),
                "No async runtime available; dropping checkpoint"
            );
            return;
        };
        if !queue.submit(jobs) {
            warn!(
                count = requests.len(),
                "Checkpoint worker stopped; dropping checkpoint"
            );
        }
    }

    /// The running checkpoint worker, spawned on the current runtime when
    /// there is none or the previous one has stopped.
    fn checkpoint_queue(&mut self) -> Option<&CheckpointQueue> {
        let gateway = self.gateway.as_ref()?;
        if self.checkpoints.as_ref().is_none_or(CheckpointQueue::is_closed) {
            let handle = Handle::try_current().ok()?;
            self.checkpoints = Some(CheckpointQueue::spawn(gateway.clone(), &handle));
        }
        self.checkpoints.as_ref()
    }
}
