use crate::mine::Cell;

use super::{Economy, Inventory, ProgressStats};

/// Serializable union of everything a save carries.
///
/// Session flags are deliberately absent; they are reconstructed on load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSnapshot {
    pub cols: u32,
    pub rows: u32,
    pub player_x: i32,
    pub player_y: i32,
    pub mine: Vec<Vec<Cell>>,
    pub inventory: Inventory,
    pub economy: Economy,
    pub progress: ProgressStats,
    /// Epoch milliseconds at capture time.
    pub saved_at: i64,
}
