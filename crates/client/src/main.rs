//! Deep mine terminal client.
//!
//! Composition root: loads configuration from the environment (and `.env`),
//! installs file logging, opens the document store, and hands a session to
//! the terminal UI.
//!
//! # Examples
//!
//! ```bash
//! # Anonymous, nothing persisted
//! cargo run -p mine-client
//!
//! # Signed in with a local leaderboard profile
//! MINE_USER_ID=me MINE_DISPLAY_NAME="Dig Dug" cargo run -p mine-client
//! ```
mod app;
mod input;
mod logging;
mod presentation;
mod state;

use anyhow::Result;
use mine_runtime::RuntimeConfig;

use crate::app::MineApp;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    dotenvy::dotenv().ok();

    let config = RuntimeConfig::from_env();
    let _guard = logging::setup_logging(config.user_id.as_deref())?;

    tracing::info!("Starting deepmine");
    tracing::info!("User: {:?}", config.user_id);
    tracing::info!("Store: {:?}", config.store);

    let session = config.build_session().await?;
    tracing::info!("Session ready");

    MineApp::new(session, config.leaderboard_size).run().await?;

    tracing::info!("Client shutdown complete");
    Ok(())
}
