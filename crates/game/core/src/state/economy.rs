use crate::config::GameConfig;

/// Coins, upgrades and the energy meter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Economy {
    pub coins: u32,
    /// Purchasable, but not yet wired to any gameplay modifier.
    pub pickaxe_level: u32,
    /// Only ever increases.
    pub max_energy: u32,
    /// `0 <= energy <= max_energy`.
    pub energy: u32,
}

impl Economy {
    pub fn new(initial_energy: u32) -> Self {
        Self {
            coins: 0,
            pickaxe_level: GameConfig::STARTING_PICKAXE_LEVEL,
            max_energy: initial_energy,
            energy: initial_energy,
        }
    }

    /// Energy as a percentage of capacity, for gauges.
    pub fn energy_percent(&self) -> f32 {
        if self.max_energy == 0 {
            return 0.0;
        }
        self.energy as f32 / self.max_energy as f32 * 100.0
    }

    pub fn pickaxe_upgrade_cost(&self) -> u32 {
        GameConfig::pickaxe_upgrade_cost(self.pickaxe_level)
    }
}

impl Default for Economy {
    fn default() -> Self {
        Self::new(GameConfig::DEFAULT_INITIAL_ENERGY)
    }
}

/// Lifetime counters. Both are monotonic non-decreasing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ProgressStats {
    /// Deepest row index ever occupied.
    pub max_depth_reached: u32,
    /// Diamond + Crystal ever collected, regardless of later sales.
    pub total_rare_ores_collected: u32,
}
