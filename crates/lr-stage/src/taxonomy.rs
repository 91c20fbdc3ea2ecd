//! Shared vocabulary for stages: features, rows and win lines

use serde::{Deserialize, Serialize};

/// Kind of feature a spin can hand control to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// Pick-three bonus board (star)
    BonusBoard,
    /// Snakes & ladders board (snake)
    SnakeBoard,
    /// Scratch card (ticket)
    ScratchCard,
    /// Higher/lower card game (card)
    HigherLower,
    /// Red/black double-or-nothing offered after a regular line win
    Gamble,
    /// Consolation pick after a long losing streak
    LosersDoor,
    /// Free spins award (dice)
    FreeSpins,
}

impl FeatureKind {
    /// All feature kinds
    pub const ALL: [FeatureKind; 7] = [
        Self::BonusBoard,
        Self::SnakeBoard,
        Self::ScratchCard,
        Self::HigherLower,
        Self::Gamble,
        Self::LosersDoor,
        Self::FreeSpins,
    ];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::BonusBoard => "Bonus Board",
            Self::SnakeBoard => "Snakes & Ladders",
            Self::ScratchCard => "Scratch Card",
            Self::HigherLower => "Higher or Lower",
            Self::Gamble => "Gamble",
            Self::LosersDoor => "Loser's Door",
            Self::FreeSpins => "Free Spins",
        }
    }

    /// Interactive features run as a mini-game and block spinning until resolved
    pub fn is_mini_game(&self) -> bool {
        !matches!(self, Self::FreeSpins)
    }
}

impl std::fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Row of the reel window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinRow {
    Top,
    Middle,
    Bottom,
}

impl WinRow {
    /// Row index inside a reel (top = 0)
    pub fn index(&self) -> usize {
        match self {
            Self::Top => 0,
            Self::Middle => 1,
            Self::Bottom => 2,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Top => "Top",
            Self::Middle => "Middle",
            Self::Bottom => "Bottom",
        }
    }
}

/// A paying line as presented to the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinLine {
    /// Row that paid
    pub row: WinRow,
    /// Paying symbol ID
    pub symbol_id: u32,
    /// Number of matching symbols on the row
    pub match_count: u8,
    /// Credits paid by this line
    pub amount: u64,
}

impl WinLine {
    pub fn new(row: WinRow, symbol_id: u32, match_count: u8, amount: u64) -> Self {
        Self {
            row,
            symbol_id,
            match_count,
            amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_kind_serde() {
        let json = serde_json::to_string(&FeatureKind::LosersDoor).unwrap();
        assert_eq!(json, "\"losers_door\"");
        let back: FeatureKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, FeatureKind::LosersDoor);
    }

    #[test]
    fn test_only_free_spins_is_not_a_mini_game() {
        let mini_games: Vec<_> = FeatureKind::ALL
            .iter()
            .filter(|k| k.is_mini_game())
            .collect();
        assert_eq!(mini_games.len(), 6);
        assert!(!FeatureKind::FreeSpins.is_mini_game());
    }

    #[test]
    fn test_row_indices() {
        assert_eq!(WinRow::Top.index(), 0);
        assert_eq!(WinRow::Middle.index(), 1);
        assert_eq!(WinRow::Bottom.index(), 2);
    }
}
