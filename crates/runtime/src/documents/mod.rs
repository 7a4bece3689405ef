//! Versioned document schemas exchanged with the document store.
//!
//! Every document is a camelCase JSON object. The field names are part of
//! the persisted format shared with other clients of the same store.
mod game_state;
mod leaderboard;
mod profile;

pub use game_state::{CURRENT_SCHEMA_VERSION, GameStateDocument};
pub use leaderboard::LeaderboardEntry;
pub use profile::PlayerProfile;

use crate::types::Collection;

/// Full game snapshot per user.
pub const GAME_STATE: Collection = "gameState";
/// Public standings per user.
pub const LEADERBOARD: Collection = "leaderboard";
/// Display profile per user, owned by the profile editor.
pub const PLAYERS: Collection = "players";
