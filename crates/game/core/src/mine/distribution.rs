//! Depth-weighted ore distribution.
//!
//! A roll is a uniform integer in `[0, ROLL_RANGE)` classified against five
//! cumulative thresholds (Wall, Coal, Iron, Gold, Diamond); anything at or
//! above the Diamond threshold is Crystal. Every five rows of depth lower each
//! threshold by a fixed rate, and each threshold is floor-clamped a fixed
//! margin above the previous one, so the thresholds stay strictly increasing
//! at any depth while rare ores grow more frequent.

use rand::Rng;

use super::cell::{Cell, OreKind};

/// Exclusive upper bound of a distribution roll.
pub const ROLL_RANGE: u32 = 1000;

/// Rows per depth factor step.
const DEPTH_BAND: u32 = 5;

const BASE: [u32; 5] = [600, 850, 940, 985, 998];
const RATE: [u32; 5] = [10, 6, 4, 2, 1];
/// Wall floor, then the minimum gap above the previous threshold.
const FLOOR: [u32; 5] = [350, 50, 20, 10, 2];

/// Cumulative thresholds of the distribution at one depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OreThresholds {
    pub wall: u32,
    pub coal: u32,
    pub iron: u32,
    pub gold: u32,
    pub diamond: u32,
}

impl OreThresholds {
    /// Derives the thresholds for `depth`. Stateless; valid for any depth.
    pub fn for_depth(depth: u32) -> Self {
        let factor = depth / DEPTH_BAND;
        let mut thresholds = [0u32; 5];
        let mut previous = 0;
        for (i, slot) in thresholds.iter_mut().enumerate() {
            let lowered = BASE[i].saturating_sub(factor.saturating_mul(RATE[i]));
            let floor = if i == 0 { FLOOR[0] } else { previous + FLOOR[i] };
            *slot = lowered.max(floor);
            previous = *slot;
        }
        let [wall, coal, iron, gold, diamond] = thresholds;
        Self {
            wall,
            coal,
            iron,
            gold,
            diamond,
        }
    }

    pub const fn as_array(&self) -> [u32; 5] {
        [self.wall, self.coal, self.iron, self.gold, self.diamond]
    }

    /// Maps a roll in `[0, ROLL_RANGE)` to the first threshold it falls under.
    pub fn classify(&self, roll: u32) -> Cell {
        if roll < self.wall {
            Cell::Wall
        } else if roll < self.coal {
            Cell::COAL
        } else if roll < self.iron {
            Cell::IRON
        } else if roll < self.gold {
            Cell::GOLD
        } else if roll < self.diamond {
            Cell::DIAMOND
        } else {
            Cell::CRYSTAL
        }
    }

    /// Number of rolls out of [`ROLL_RANGE`] that produce `cell`.
    pub fn weight(&self, cell: Cell) -> u32 {
        match cell {
            Cell::Empty => 0,
            Cell::Wall => self.wall,
            Cell::Ore(OreKind::Coal) => self.coal - self.wall,
            Cell::Ore(OreKind::Iron) => self.iron - self.coal,
            Cell::Ore(OreKind::Gold) => self.gold - self.iron,
            Cell::Ore(OreKind::Diamond) => self.diamond - self.gold,
            Cell::Ore(OreKind::Crystal) => ROLL_RANGE - self.diamond,
        }
    }

    /// Draws one cell from this distribution.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        self.classify(rng.gen_range(0..ROLL_RANGE))
    }
}
