//! Event loop tying the game session to the terminal UI.
use anyhow::Result;
use crossterm::event::{self as term_event, Event as TermEvent, KeyEventKind};
use mine_runtime::{GameSession, PersistOutcome};
use tokio::time::{self, Duration};

use crate::input::{Command, InputHandler};
use crate::presentation::terminal::{self, Tui};
use crate::presentation::ui::{self, RenderContext};
use crate::state::AppState;

const FRAME_INTERVAL_MS: u64 = 16;

pub struct MineApp {
    session: GameSession,
    state: AppState,
}

impl MineApp {
    pub fn new(session: GameSession, leaderboard_size: usize) -> Self {
        Self {
            session,
            state: AppState::new(leaderboard_size),
        }
    }

    pub async fn run(mut self) -> Result<()> {
        tracing::info!("Terminal client starting...");
        self.refresh_leaderboard().await;
        self.state
            .messages
            .push("Welcome to the mine. [n] new game, [c] continue.");

        let mut terminal = terminal::init()?;
        let _guard = terminal::TerminalGuard;

        let result = self.event_loop(&mut terminal).await;
        terminal::restore()?;

        self.shutdown().await;
        result
    }

    async fn event_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        self.render(terminal)?;

        loop {
            if !term_event::poll(Duration::from_millis(0))? {
                time::sleep(Duration::from_millis(FRAME_INTERVAL_MS)).await;
                continue;
            }

            match term_event::read()? {
                TermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    let command = InputHandler::handle_key(key, self.session.state().menu_open());
                    if self.handle_command(command).await {
                        return Ok(());
                    }
                    self.render(terminal)?;
                }
                TermEvent::Resize(_, _) => self.render(terminal)?,
                _ => {}
            }
        }
    }

    /// Applies one command. Returns `true` when the player quits.
    async fn handle_command(&mut self, command: Command) -> bool {
        match command {
            Command::Quit => return true,
            Command::None => {}
            Command::Move(direction) => {
                if self.session.move_direction(direction) && self.session.state().is_game_over()
                {
                    self.state
                        .messages
                        .push("Out of energy! Open the menu to buy more or start over.");
                }
            }
            Command::ToggleMenu => {
                if self.session.state().is_playing() && self.session.toggle_menu() {
                    self.refresh_leaderboard().await;
                }
            }
            Command::NewGame => {
                self.session.new_game();
                self.state.messages.push("New mine generated. Dig down!");
            }
            Command::Continue => {
                let was_playing = self.session.state().is_playing();
                let restored = self.session.continue_game().await;
                self.state
                    .messages
                    .push(continue_message(restored, was_playing));
            }
            Command::Sell => self.shop(|app| {
                let earned = app.session.sell_all_ores();
                format!("Sold ores for {earned} coins.")
            }),
            Command::UpgradePickaxe => self.shop(|app| {
                let cost = app.session.pickaxe_upgrade_cost();
                if app.session.upgrade_pickaxe() {
                    format!(
                        "Pickaxe upgraded to level {}.",
                        app.session.state().economy.pickaxe_level
                    )
                } else {
                    format!("Need {cost} coins for the next pickaxe.")
                }
            }),
            Command::UpgradeEnergy => self.shop(|app| {
                let cost = app.session.energy_upgrade_cost();
                if app.session.increase_max_energy() {
                    let economy = app.session.state().economy;
                    format!("Energy now {}/{}.", economy.energy, economy.max_energy)
                } else {
                    format!("Need {cost} coins for more energy.")
                }
            }),
            Command::RefreshLeaderboard => self.refresh_leaderboard().await,
        }
        false
    }

    fn shop(&mut self, purchase: impl FnOnce(&mut Self) -> String) {
        let message = if self.session.state().is_playing() {
            purchase(self)
        } else {
            "Start or continue a game first.".to_string()
        };
        self.state.messages.push(message);
    }

    async fn refresh_leaderboard(&mut self) {
        match self
            .session
            .top_leaderboard(self.state.leaderboard_size)
            .await
        {
            Ok(entries) => self.state.leaderboard = entries,
            Err(err) => {
                tracing::warn!("Failed to fetch leaderboard: {}", err);
                self.state.messages.push("Leaderboard unavailable.");
            }
        }
    }

    /// Waits for outstanding checkpoints and writes a final save.
    async fn shutdown(&mut self) {
        let reports = self.session.flush().await;
        tracing::info!(count = reports.len(), "Flushed pending checkpoints");

        if self.session.state().is_playing() {
            match self.session.save().await {
                Ok(PersistOutcome::Written) => tracing::info!("Final save written"),
                Ok(PersistOutcome::Skipped(reason)) => {
                    tracing::info!("Final save skipped: {}", reason)
                }
                Err(err) => tracing::warn!("Final save failed: {}", err),
            }
        }
        tracing::info!("Terminal client exiting");
    }

    fn render(&self, terminal: &mut Tui) -> Result<()> {
        let ctx = RenderContext {
            game: self.session.state(),
            app: &self.state,
            pickaxe_cost: self.session.pickaxe_upgrade_cost(),
            energy_cost: self.session.energy_upgrade_cost(),
        };
        ui::render(terminal, &ctx)
    }
}

fn continue_message(restored: bool, was_playing: bool) -> &'static str {
    match (restored, was_playing) {
        (true, _) => "Saved game restored.",
        (false, true) => "Back to the mine.",
        (false, false) => "No saved game found; starting fresh.",
    }
}
