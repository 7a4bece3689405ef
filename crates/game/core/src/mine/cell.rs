use core::fmt;

/// Collectible ore kinds, ordered from most common to rarest.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter, strum::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum OreKind {
    Coal,
    Iron,
    Gold,
    Diamond,
    Crystal,
}

impl OreKind {
    /// Fixed sale price of one unit.
    pub const fn unit_price(self) -> u32 {
        match self {
            OreKind::Coal => 2,
            OreKind::Iron => 5,
            OreKind::Gold => 12,
            OreKind::Diamond => 40,
            OreKind::Crystal => 80,
        }
    }

    /// Diamond and Crystal count toward the lifetime rare-ore total.
    pub const fn is_rare(self) -> bool {
        matches!(self, OreKind::Diamond | OreKind::Crystal)
    }

    pub const fn code(self) -> char {
        match self {
            OreKind::Coal => 'C',
            OreKind::Iron => 'I',
            OreKind::Gold => 'G',
            OreKind::Diamond => 'D',
            OreKind::Crystal => 'X',
        }
    }
}

/// Classification of a single mine position.
///
/// Generated cells never change except for the transition to [`Cell::Empty`]
/// once the player mines or walks through them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// Plain stone. Breaks on contact without yielding anything.
    Wall,
    Ore(OreKind),
}

impl Cell {
    pub const COAL: Self = Self::Ore(OreKind::Coal);
    pub const IRON: Self = Self::Ore(OreKind::Iron);
    pub const GOLD: Self = Self::Ore(OreKind::Gold);
    pub const DIAMOND: Self = Self::Ore(OreKind::Diamond);
    pub const CRYSTAL: Self = Self::Ore(OreKind::Crystal);

    /// Single-character code used by the persisted mine format.
    pub const fn code(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Wall => '#',
            Cell::Ore(kind) => kind.code(),
        }
    }

    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            ' ' => Some(Cell::Empty),
            '#' => Some(Cell::Wall),
            'C' => Some(Cell::COAL),
            'I' => Some(Cell::IRON),
            'G' => Some(Cell::GOLD),
            'D' => Some(Cell::DIAMOND),
            'X' => Some(Cell::CRYSTAL),
            _ => None,
        }
    }

    pub const fn ore(self) -> Option<OreKind> {
        match self {
            Cell::Ore(kind) => Some(kind),
            _ => None,
        }
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Cell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_char(self.code())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Cell {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let code = char::deserialize(deserializer)?;
        Cell::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format_args!("unknown cell code {code:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    const ALL_CELLS: [Cell; 7] = [
        Cell::Empty,
        Cell::Wall,
        Cell::COAL,
        Cell::IRON,
        Cell::GOLD,
        Cell::DIAMOND,
        Cell::CRYSTAL,
    ];

    #[test]
    fn codes_match_persisted_format() {
        let codes: String = ALL_CELLS.iter().map(|cell| cell.code()).collect();
        assert_eq!(codes, " #CIGDX");
        for cell in ALL_CELLS {
            assert_eq!(Cell::from_code(cell.code()), Some(cell));
        }
        assert_eq!(Cell::from_code('?'), None);
    }

    #[test]
    fn only_diamond_and_crystal_are_rare() {
        let rare: Vec<OreKind> = OreKind::iter().filter(|kind| kind.is_rare()).collect();
        assert_eq!(rare, vec![OreKind::Diamond, OreKind::Crystal]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_as_single_character_strings() {
        let row = vec![Cell::Empty, Cell::Wall, Cell::CRYSTAL];
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r##"[" ","#","X"]"##);
        let parsed: Vec<Cell> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, row);
        assert!(serde_json::from_str::<Cell>(r#""Q""#).is_err());
    }
}
