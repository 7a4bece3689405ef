use serde::{Deserialize, Serialize};

use crate::types::{TimestampMs, UserId};

/// `leaderboard/{userId}` document. One per player; resubmission overwrites.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub uid: UserId,
    pub display_name: String,
    #[serde(default)]
    pub avatar: String,
    pub coins: u32,
    pub max_depth: u32,
    /// Lifetime Diamond + Crystal count, never the carried inventory.
    pub rare_ores: u32,
    pub pickaxe_level: u32,
    pub updated_at: TimestampMs,
}

impl LeaderboardEntry {
    /// Field the leaderboard is ranked by.
    pub const RANK_FIELD: &'static str = "coins";
}
