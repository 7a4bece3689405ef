use std::fmt;
use std::sync::Arc;

use mine_core::{GameSnapshot, GameState};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::error::{MalformedDocument, PersistenceError, Result};
use crate::documents::{
    GAME_STATE, GameStateDocument, LEADERBOARD, LeaderboardEntry, PLAYERS, PlayerProfile,
};
use crate::identity::IdentityProvider;
use crate::repository::DocumentStore;
use crate::types::{UserId, now_ms};

/// Reason an operation had nothing to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Nobody is signed in.
    Unauthenticated,
    /// The signed-in user has no `players` profile yet.
    NoProfile,
    /// The session runs without a gateway attached.
    Detached,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SkipReason::Unauthenticated => "no authenticated user",
            SkipReason::NoProfile => "no player profile",
            SkipReason::Detached => "no persistence attached",
        };
        write!(f, "{}", label)
    }
}

/// Result of a write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PersistOutcome {
    Written,
    Skipped(SkipReason),
}

impl PersistOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, PersistOutcome::Written)
    }
}

/// Result of reading the save slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(GameSnapshot),
    NotFound,
    Skipped(SkipReason),
}

/// Values published to the leaderboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Standings {
    pub coins: u32,
    pub max_depth: u32,
    pub rare_ores: u32,
    pub pickaxe_level: u32,
}

impl From<&GameState> for Standings {
    fn from(state: &GameState) -> Self {
        Self {
            coins: state.economy.coins,
            max_depth: state.progress.max_depth_reached,
            rare_ores: state.progress.total_rare_ores_collected,
            pickaxe_level: state.economy.pickaxe_level,
        }
    }
}

/// Reads and writes a user's documents in the external store.
///
/// Cheap to clone; checkpoint tasks each carry their own copy.
#[derive(Clone)]
pub struct PersistenceGateway {
    store: Arc<dyn DocumentStore>,
    identity: Arc<dyn IdentityProvider>,
}

impl PersistenceGateway {
    pub fn new(store: Arc<dyn DocumentStore>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { store, identity }
    }

    pub fn current_user(&self) -> Option<UserId> {
        self.identity.current_user()
    }

    /// Writes the full snapshot to `gameState/{uid}`.
    pub async fn save(&self, snapshot: &GameSnapshot) -> Result<PersistOutcome> {
        let Some(uid) = self.current_user() else {
            debug!("save skipped: {}", SkipReason::Unauthenticated);
            return Ok(PersistOutcome::Skipped(SkipReason::Unauthenticated));
        };

        let document = encode(GAME_STATE, &GameStateDocument::from(snapshot))?;
        self.store.put(GAME_STATE, &uid, document).await?;
        info!(
            uid = %uid,
            rows = snapshot.rows,
            energy = snapshot.economy.energy,
            "Saved game state"
        );
        Ok(PersistOutcome::Written)
    }

    /// Reads `gameState/{uid}` and decodes it into a snapshot.
    ///
    /// Shape validation against the live configuration is left to
    /// [`GameState::from_snapshot`].
    pub async fn load(&self) -> Result<LoadOutcome> {
        let Some(uid) = self.current_user() else {
            debug!("load skipped: {}", SkipReason::Unauthenticated);
            return Ok(LoadOutcome::Skipped(SkipReason::Unauthenticated));
        };

        let Some(value) = self.store.get(GAME_STATE, &uid).await? else {
            info!(uid = %uid, "No saved game found");
            return Ok(LoadOutcome::NotFound);
        };

        let document: GameStateDocument = decode(GAME_STATE, value)?;
        if !document.is_supported() {
            return Err(PersistenceError::malformed(
                GAME_STATE,
                MalformedDocument::UnsupportedSchema(document.schema_version),
            ));
        }
        info!(uid = %uid, rows = document.rows, "Loaded game state");
        Ok(LoadOutcome::Loaded(document.into()))
    }

    /// Publishes `standings` to `leaderboard/{uid}` under the player's
    /// current display profile.
    pub async fn update_leaderboard(&self, standings: Standings) -> Result<PersistOutcome> {
        let Some(uid) = self.current_user() else {
            debug!("leaderboard update skipped: {}", SkipReason::Unauthenticated);
            return Ok(PersistOutcome::Skipped(SkipReason::Unauthenticated));
        };

        let Some(profile) = self.read_profile(&uid).await? else {
            debug!(uid = %uid, "leaderboard update skipped: {}", SkipReason::NoProfile);
            return Ok(PersistOutcome::Skipped(SkipReason::NoProfile));
        };

        let entry = LeaderboardEntry {
            uid: uid.clone(),
            display_name: profile.display_name,
            avatar: profile.avatar,
            coins: standings.coins,
            max_depth: standings.max_depth,
            rare_ores: standings.rare_ores,
            pickaxe_level: standings.pickaxe_level,
            updated_at: now_ms(),
        };
        self.store
            .put(LEADERBOARD, &uid, encode(LEADERBOARD, &entry)?)
            .await?;
        info!(uid = %uid, coins = entry.coins, "Updated leaderboard");
        Ok(PersistOutcome::Written)
    }

    /// Top `n` leaderboard entries by coins, highest first.
    ///
    /// Entries that no longer decode are skipped rather than failing the
    /// whole listing.
    pub async fn top_leaderboard(&self, n: usize) -> Result<Vec<LeaderboardEntry>> {
        let documents = self
            .store
            .top_n(LEADERBOARD, LeaderboardEntry::RANK_FIELD, n)
            .await?;
        Ok(documents
            .into_iter()
            .filter_map(|value| match serde_json::from_value(value) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!("Skipping unreadable leaderboard entry: {}", err);
                    None
                }
            })
            .collect())
    }

    async fn read_profile(&self, uid: &str) -> Result<Option<PlayerProfile>> {
        match self.store.get(PLAYERS, uid).await? {
            Some(value) => Ok(Some(decode(PLAYERS, value)?)),
            None => Ok(None),
        }
    }

    /// Creates the current user's profile if none exists yet and returns
    /// whether it did.
    ///
    /// Used by local stores standing in for the profile editor; an existing
    /// profile is never overwritten.
    pub async fn seed_profile(&self, profile: &PlayerProfile) -> Result<bool> {
        let Some(uid) = self.current_user() else {
            return Ok(false);
        };
        if self.store.get(PLAYERS, &uid).await?.is_some() {
            debug!(uid = %uid, "Profile already present");
            return Ok(false);
        }
        self.store.put(PLAYERS, &uid, encode(PLAYERS, profile)?).await?;
        info!(uid = %uid, name = %profile.display_name, "Seeded player profile");
        Ok(true)
    }
}

fn encode<T: Serialize>(collection: &'static str, document: &T) -> Result<Value> {
    serde_json::to_value(document).map_err(|source| PersistenceError::Encode { collection, source })
}

fn decode<T: DeserializeOwned>(collection: &'static str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|err| PersistenceError::malformed(collection, err))
}
