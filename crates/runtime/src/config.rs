//! Runtime configuration loaded from the environment.
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use mine_core::{GameConfig, MineGenerator, RandomGenerator};
use tracing::info;

use crate::documents::PlayerProfile;
use crate::error::Result;
use crate::identity::SessionIdentity;
use crate::persistence::PersistenceGateway;
use crate::repository::{DocumentStore, FileDocumentStore, InMemoryDocumentStore};
use crate::session::GameSession;
use crate::types::UserId;

/// Backend the document store runs on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StoreKind {
    Memory,
    #[default]
    File,
}

impl FromStr for StoreKind {
    type Err = ();

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(StoreKind::Memory),
            "file" | "disk" => Ok(StoreKind::File),
            _ => Err(()),
        }
    }
}

/// Everything needed to assemble a playable session.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    pub user_id: Option<UserId>,
    pub display_name: Option<String>,
    pub avatar: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub store: StoreKind,
    pub leaderboard_size: usize,
    /// Fixed mine seed; fresh entropy per game when absent.
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            user_id: None,
            display_name: None,
            avatar: None,
            data_dir: None,
            store: StoreKind::default(),
            leaderboard_size: Self::DEFAULT_LEADERBOARD_SIZE,
            seed: None,
        }
    }
}

impl RuntimeConfig {
    pub const DEFAULT_LEADERBOARD_SIZE: usize = 10;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `MINE_USER_ID` - Signed-in user (default: anonymous, nothing persisted)
    /// - `MINE_DISPLAY_NAME` - Leaderboard name seeded into the local profile
    /// - `MINE_AVATAR` - Leaderboard avatar seeded into the local profile
    /// - `MINE_DATA_DIR` - Root of the file store (default: platform-specific)
    /// - `MINE_STORE` - `memory` or `file` (default: file)
    /// - `MINE_LEADERBOARD_SIZE` - Entries shown by the leaderboard (default: 10)
    /// - `MINE_SEED` - Deterministic mine seed (default: random)
    /// - `MINE_COLS` - Mine width (default: 10)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads through `lookup`.
    ///
    /// Unparsable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(cols) = read_parsed::<u32>(read("MINE_COLS")) {
            config.game = GameConfig::with_cols(cols);
        }
        config.user_id = read("MINE_USER_ID");
        config.display_name = read("MINE_DISPLAY_NAME");
        config.avatar = read("MINE_AVATAR");
        config.data_dir = read("MINE_DATA_DIR").map(PathBuf::from);
        if let Some(store) = read_parsed::<StoreKind>(read("MINE_STORE")) {
            config.store = store;
        }
        if let Some(size) = read_parsed::<usize>(read("MINE_LEADERBOARD_SIZE")) {
            config.leaderboard_size = size.max(1);
        }
        config.seed = read_parsed::<u64>(read("MINE_SEED"));

        config
    }

    /// Directory the file store writes under.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            directories::ProjectDirs::from("", "", "deepmine")
                .map(|dirs| dirs.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from("./save_data"))
        })
    }

    pub fn generator(&self) -> Box<dyn MineGenerator> {
        match self.seed {
            Some(seed) => Box::new(RandomGenerator::seeded(seed)),
            None => Box::new(RandomGenerator::from_entropy()),
        }
    }

    /// Profile to seed for the signed-in user, if a display name was given.
    pub fn profile(&self) -> Option<PlayerProfile> {
        let name = self.display_name.as_ref()?;
        Some(PlayerProfile::new(
            name.clone(),
            self.avatar.clone().unwrap_or_default(),
        ))
    }

    pub fn identity(&self) -> SessionIdentity {
        match &self.user_id {
            Some(uid) => SessionIdentity::signed_in(uid.clone()),
            None => SessionIdentity::anonymous(),
        }
    }

    pub async fn open_store(&self) -> Result<Arc<dyn DocumentStore>> {
        let store: Arc<dyn DocumentStore> = match self.store {
            StoreKind::Memory => Arc::new(InMemoryDocumentStore::new()),
            StoreKind::File => {
                let dir = self.data_dir();
                info!("Opening document store at {}", dir.display());
                Arc::new(FileDocumentStore::open(dir).await?)
            }
        };
        Ok(store)
    }

    /// Opens the store, seeds the profile, and returns a session at the menu.
    pub async fn build_session(&self) -> Result<GameSession> {
        let store = self.open_store().await?;
        let gateway = PersistenceGateway::new(store, Arc::new(self.identity()));
        if let Some(profile) = self.profile() {
            gateway.seed_profile(&profile).await?;
        }
        Ok(GameSession::new(self.game.clone(), self.generator())?.with_gateway(gateway))
    }
}

fn read_parsed<T: FromStr>(value: Option<String>) -> Option<T> {
    value?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = RuntimeConfig::from_lookup(|_| None);
        assert_eq!(config.store, StoreKind::File);
        assert_eq!(config.leaderboard_size, 10);
        assert_eq!(config.user_id, None);
        assert_eq!(config.game, GameConfig::default());
        assert!(config.profile().is_none());
    }

    #[test]
    fn reads_every_variable() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("MINE_USER_ID", "miner-7"),
            ("MINE_DISPLAY_NAME", "Dig Dug"),
            ("MINE_AVATAR", "pick"),
            ("MINE_DATA_DIR", "/tmp/mine"),
            ("MINE_STORE", "Memory"),
            ("MINE_LEADERBOARD_SIZE", "5"),
            ("MINE_SEED", "99"),
            ("MINE_COLS", "12"),
        ]));
        assert_eq!(config.user_id.as_deref(), Some("miner-7"));
        assert_eq!(config.store, StoreKind::Memory);
        assert_eq!(config.leaderboard_size, 5);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.game.cols, 12);
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/mine"));
        assert_eq!(config.profile(), Some(PlayerProfile::new("Dig Dug", "pick")));
    }

    #[test]
    fn ignores_unparsable_values() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("MINE_STORE", "cloud"),
            ("MINE_LEADERBOARD_SIZE", "lots"),
            ("MINE_SEED", ""),
            ("MINE_USER_ID", "  "),
        ]));
        assert_eq!(config.store, StoreKind::File);
        assert_eq!(config.leaderboard_size, 10);
        assert_eq!(config.seed, None);
        assert_eq!(config.user_id, None);
    }
}
