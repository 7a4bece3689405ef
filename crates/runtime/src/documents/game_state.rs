use mine_core::{Cell, Economy, GameSnapshot, Inventory, ProgressStats};
use serde::{Deserialize, Serialize};

/// Schema version written by this build.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

const fn legacy_schema_version() -> u32 {
    1
}

/// `gameState/{userId}` document.
///
/// Documents written before versioning carry no `schemaVersion` and are read
/// as version 1. The progress counters were added later and default to zero
/// when absent; every other field is required.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateDocument {
    #[serde(default = "legacy_schema_version")]
    pub schema_version: u32,
    pub cols: u32,
    pub rows: u32,
    pub player_x: i32,
    pub player_y: i32,
    pub mine: Vec<Vec<Cell>>,
    pub coal: u32,
    pub iron: u32,
    pub gold: u32,
    pub diamond: u32,
    pub crystal: u32,
    pub coins: u32,
    pub pickaxe_level: u32,
    pub max_energy: u32,
    pub energy: u32,
    #[serde(default)]
    pub max_depth_reached: u32,
    #[serde(default)]
    pub total_rare_ores_collected: u32,
    #[serde(default)]
    pub last_saved: i64,
}

impl GameStateDocument {
    pub fn is_supported(&self) -> bool {
        (1..=CURRENT_SCHEMA_VERSION).contains(&self.schema_version)
    }
}

impl From<&GameSnapshot> for GameStateDocument {
    fn from(snapshot: &GameSnapshot) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            cols: snapshot.cols,
            rows: snapshot.rows,
            player_x: snapshot.player_x,
            player_y: snapshot.player_y,
            mine: snapshot.mine.clone(),
            coal: snapshot.inventory.coal,
            iron: snapshot.inventory.iron,
            gold: snapshot.inventory.gold,
            diamond: snapshot.inventory.diamond,
            crystal: snapshot.inventory.crystal,
            coins: snapshot.economy.coins,
            pickaxe_level: snapshot.economy.pickaxe_level,
            max_energy: snapshot.economy.max_energy,
            energy: snapshot.economy.energy,
            max_depth_reached: snapshot.progress.max_depth_reached,
            total_rare_ores_collected: snapshot.progress.total_rare_ores_collected,
            last_saved: snapshot.saved_at,
        }
    }
}

impl From<GameStateDocument> for GameSnapshot {
    fn from(document: GameStateDocument) -> Self {
        Self {
            cols: document.cols,
            rows: document.rows,
            player_x: document.player_x,
            player_y: document.player_y,
            mine: document.mine,
            inventory: Inventory {
                coal: document.coal,
                iron: document.iron,
                gold: document.gold,
                diamond: document.diamond,
                crystal: document.crystal,
            },
            economy: Economy {
                coins: document.coins,
                pickaxe_level: document.pickaxe_level,
                max_energy: document.max_energy,
                energy: document.energy,
            },
            progress: ProgressStats {
                max_depth_reached: document.max_depth_reached,
                total_rare_ores_collected: document.total_rare_ores_collected,
            },
            saved_at: document.last_saved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn legacy_json() -> serde_json::Value {
        json!({
            "cols": 2,
            "rows": 1,
            "playerX": 1,
            "playerY": 0,
            "mine": [["#", "D"]],
            "coal": 4, "iron": 0, "gold": 1, "diamond": 0, "crystal": 0,
            "coins": 12,
            "pickaxeLevel": 2,
            "maxEnergy": 120,
            "energy": 80,
            "lastSaved": 1_700_000_000_000_i64
        })
    }

    #[test]
    fn legacy_documents_default_progress_and_version() {
        let document: GameStateDocument = serde_json::from_value(legacy_json()).unwrap();
        assert_eq!(document.schema_version, 1);
        assert_eq!(document.max_depth_reached, 0);
        assert_eq!(document.total_rare_ores_collected, 0);
        assert_eq!(document.mine, vec![vec![Cell::Wall, Cell::DIAMOND]]);

        let snapshot = GameSnapshot::from(document);
        assert_eq!(snapshot.inventory.coal, 4);
        assert_eq!(snapshot.economy.max_energy, 120);
        assert_eq!(snapshot.saved_at, 1_700_000_000_000);
    }

    #[test]
    fn missing_required_fields_fail_to_decode() {
        let mut value = legacy_json();
        value.as_object_mut().unwrap().remove("mine");
        assert!(serde_json::from_value::<GameStateDocument>(value).is_err());

        let mut value = legacy_json();
        value.as_object_mut().unwrap().remove("coins");
        assert!(serde_json::from_value::<GameStateDocument>(value).is_err());
    }

    #[test]
    fn writes_camel_case_field_names() {
        let document: GameStateDocument = serde_json::from_value(legacy_json()).unwrap();
        let value = serde_json::to_value(&document).unwrap();
        for field in [
            "schemaVersion",
            "playerX",
            "pickaxeLevel",
            "maxDepthReached",
            "totalRareOresCollected",
            "lastSaved",
        ] {
            assert!(value.get(field).is_some(), "missing {field}");
        }
        assert_eq!(value["mine"], json!([["#", "D"]]));
    }

    #[test]
    fn future_versions_are_unsupported() {
        let mut value = legacy_json();
        value["schemaVersion"] = json!(CURRENT_SCHEMA_VERSION + 1);
        let document: GameStateDocument = serde_json::from_value(value).unwrap();
        assert!(!document.is_supported());
    }
}
