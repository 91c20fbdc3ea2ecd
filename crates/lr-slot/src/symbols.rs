//! Symbol vocabulary and the reel window

use serde::{Deserialize, Serialize};

use lr_stage::{FeatureKind, WinRow};

/// Symbol type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum SymbolType {
    /// Low paying, always on the reels
    Fruit = 0,
    /// High paying, unlocked by level
    Premium = 1,
    /// Opens a feature when enough land anywhere on the grid
    Feature = 2,
}

/// A reel symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Symbol {
    Cherry = 1,
    Lemon = 2,
    Orange = 3,
    Diamond = 4,
    Seven = 5,
    SlotMachine = 6,
    Snake = 7,
    Star = 8,
    Dice = 9,
    Card = 10,
    Ticket = 11,
}

impl Symbol {
    /// Every symbol, in ID order
    pub const ALL: [Symbol; 11] = [
        Self::Cherry,
        Self::Lemon,
        Self::Orange,
        Self::Diamond,
        Self::Seven,
        Self::SlotMachine,
        Self::Snake,
        Self::Star,
        Self::Dice,
        Self::Card,
        Self::Ticket,
    ];

    /// Stable numeric ID (used in stage payloads)
    pub fn id(self) -> u32 {
        self as u32
    }

    /// Look up a symbol by ID
    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.id() == id)
    }

    pub fn symbol_type(self) -> SymbolType {
        match self {
            Self::Cherry | Self::Lemon | Self::Orange => SymbolType::Fruit,
            Self::Diamond | Self::Seven | Self::SlotMachine => SymbolType::Premium,
            Self::Snake | Self::Star | Self::Dice | Self::Card | Self::Ticket => {
                SymbolType::Feature
            }
        }
    }

    pub fn is_feature(self) -> bool {
        self.symbol_type() == SymbolType::Feature
    }

    /// Feature this symbol triggers
    pub fn feature(self) -> Option<FeatureKind> {
        match self {
            Self::Star => Some(FeatureKind::BonusBoard),
            Self::Snake => Some(FeatureKind::SnakeBoard),
            Self::Ticket => Some(FeatureKind::ScratchCard),
            Self::Card => Some(FeatureKind::HigherLower),
            Self::Dice => Some(FeatureKind::FreeSpins),
            _ => None,
        }
    }

    /// Symbol name (snake_case, matches serde)
    pub fn name(self) -> &'static str {
        match self {
            Self::Cherry => "cherry",
            Self::Lemon => "lemon",
            Self::Orange => "orange",
            Self::Diamond => "diamond",
            Self::Seven => "seven",
            Self::SlotMachine => "slot_machine",
            Self::Snake => "snake",
            Self::Star => "star",
            Self::Dice => "dice",
            Self::Card => "card",
            Self::Ticket => "ticket",
        }
    }

    /// Reel face
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Cherry => "🍒",
            Self::Lemon => "🍋",
            Self::Orange => "🍊",
            Self::Diamond => "💎",
            Self::Seven => "7️⃣",
            Self::SlotMachine => "🎰",
            Self::Snake => "🐍",
            Self::Star => "⭐",
            Self::Dice => "🎲",
            Self::Card => "🃏",
            Self::Ticket => "🎫",
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Rows per reel
pub const ROWS: usize = 3;

/// Visible symbol window: one top-to-bottom triple per reel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReelGrid {
    reels: Vec<[Symbol; ROWS]>,
}

impl ReelGrid {
    pub fn new(reels: Vec<[Symbol; ROWS]>) -> Self {
        Self { reels }
    }

    /// Build from three rows; the grid is as wide as the shortest row
    pub fn from_rows(top: &[Symbol], middle: &[Symbol], bottom: &[Symbol]) -> Self {
        let reels = top
            .iter()
            .zip(middle)
            .zip(bottom)
            .map(|((&t, &m), &b)| [t, m, b])
            .collect();
        Self { reels }
    }

    /// Every cell set to the same symbol
    pub fn filled(symbol: Symbol, reel_count: usize) -> Self {
        Self {
            reels: vec![[symbol; ROWS]; reel_count],
        }
    }

    pub fn reel_count(&self) -> usize {
        self.reels.len()
    }

    pub fn reels(&self) -> &[[Symbol; ROWS]] {
        &self.reels
    }

    /// Symbols of one row, left to right
    pub fn row(&self, row: WinRow) -> Vec<Symbol> {
        self.reels.iter().map(|reel| reel[row.index()]).collect()
    }

    /// All cells, reel by reel
    pub fn cells(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.reels.iter().flat_map(|reel| reel.iter().copied())
    }

    /// Occurrences of a symbol anywhere on the grid
    pub fn count(&self, symbol: Symbol) -> usize {
        self.cells().filter(|&s| s == symbol).count()
    }

    /// Symbol IDs, reels × rows
    pub fn to_ids(&self) -> Vec<Vec<u32>> {
        self.reels
            .iter()
            .map(|reel| reel.iter().map(|s| s.id()).collect())
            .collect()
    }
}

impl std::fmt::Display for ReelGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in [WinRow::Top, WinRow::Middle, WinRow::Bottom] {
            let faces: Vec<&str> = self.row(row).iter().map(|s| s.glyph()).collect();
            writeln!(f, "{}", faces.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        for symbol in Symbol::ALL {
            assert_eq!(Symbol::from_id(symbol.id()), Some(symbol));
        }
        assert_eq!(Symbol::from_id(0), None);
        assert_eq!(Symbol::from_id(12), None);
    }

    #[test]
    fn test_classification() {
        assert_eq!(Symbol::Lemon.symbol_type(), SymbolType::Fruit);
        assert_eq!(Symbol::SlotMachine.symbol_type(), SymbolType::Premium);
        assert!(Symbol::Ticket.is_feature());
        assert_eq!(Symbol::Star.feature(), Some(FeatureKind::BonusBoard));
        assert_eq!(Symbol::Dice.feature(), Some(FeatureKind::FreeSpins));
        assert_eq!(Symbol::Seven.feature(), None);
    }

    #[test]
    fn test_grid_rows_and_counts() {
        use Symbol::*;
        let grid = ReelGrid::from_rows(
            &[Star, Lemon, Orange],
            &[Cherry, Cherry, Cherry],
            &[Star, Dice, Star],
        );
        assert_eq!(grid.reel_count(), 3);
        assert_eq!(grid.row(WinRow::Middle), vec![Cherry, Cherry, Cherry]);
        assert_eq!(grid.row(WinRow::Bottom), vec![Star, Dice, Star]);
        assert_eq!(grid.count(Star), 3);
        assert_eq!(grid.reels()[1], [Lemon, Cherry, Dice]);
        assert_eq!(grid.to_ids()[0], vec![8, 1, 8]);
    }

    #[test]
    fn test_from_rows_uses_shortest_row() {
        use Symbol::*;
        let grid = ReelGrid::from_rows(&[Cherry; 4], &[Lemon; 3], &[Orange; 5]);
        assert_eq!(grid.reel_count(), 3);
    }
}
