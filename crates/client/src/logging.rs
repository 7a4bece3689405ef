//! File-only logging so the terminal stays free for the game view.
use std::path::PathBuf;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global subscriber writing to `{log_dir}/{session}/client.log`.
///
/// The returned guard flushes the writer on drop; keep it alive for the
/// lifetime of the process.
pub fn setup_logging(user_id: Option<&str>) -> Result<WorkerGuard> {
    let session_id = format!(
        "{}_{}",
        user_id.unwrap_or("anonymous"),
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    );

    let session_log_dir = log_dir().join(&session_id);
    std::fs::create_dir_all(&session_log_dir)?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("Logging initialized: session={}", session_id);
    tracing::info!("Log file: {}/client.log", session_log_dir.display());

    Ok(guard)
}

/// Platform cache directory, e.g. `~/.cache/deepmine/logs` on Linux.
fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "deepmine")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/deepmine"))
        .join("logs")
}
