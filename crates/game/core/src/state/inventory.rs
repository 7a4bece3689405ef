use strum::IntoEnumIterator;

use crate::mine::OreKind;

/// Ore counts carried by the player. Cleared on sale or new game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Inventory {
    pub coal: u32,
    pub iron: u32,
    pub gold: u32,
    pub diamond: u32,
    pub crystal: u32,
}

impl Inventory {
    pub fn count(&self, kind: OreKind) -> u32 {
        match kind {
            OreKind::Coal => self.coal,
            OreKind::Iron => self.iron,
            OreKind::Gold => self.gold,
            OreKind::Diamond => self.diamond,
            OreKind::Crystal => self.crystal,
        }
    }

    fn slot_mut(&mut self, kind: OreKind) -> &mut u32 {
        match kind {
            OreKind::Coal => &mut self.coal,
            OreKind::Iron => &mut self.iron,
            OreKind::Gold => &mut self.gold,
            OreKind::Diamond => &mut self.diamond,
            OreKind::Crystal => &mut self.crystal,
        }
    }

    pub fn add(&mut self, kind: OreKind) {
        let slot = self.slot_mut(kind);
        *slot = slot.saturating_add(1);
    }

    /// Sale value of everything carried, at fixed unit prices.
    pub fn value(&self) -> u32 {
        OreKind::iter().fold(0u32, |total, kind| {
            total.saturating_add(self.count(kind).saturating_mul(kind.unit_price()))
        })
    }

    pub fn is_empty(&self) -> bool {
        OreKind::iter().all(|kind| self.count(kind) == 0)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_uses_unit_prices() {
        let inventory = Inventory {
            coal: 1,
            iron: 1,
            gold: 1,
            diamond: 1,
            crystal: 1,
        };
        assert_eq!(inventory.value(), 2 + 5 + 12 + 40 + 80);
    }

    #[test]
    fn add_and_clear() {
        let mut inventory = Inventory::default();
        assert!(inventory.is_empty());
        inventory.add(OreKind::Coal);
        inventory.add(OreKind::Coal);
        inventory.add(OreKind::Crystal);
        assert_eq!(inventory.count(OreKind::Coal), 2);
        assert_eq!(inventory.value(), 84);
        inventory.clear();
        assert!(inventory.is_empty());
    }
}
