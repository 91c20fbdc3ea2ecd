//! Win evaluator — one pass over the grid, one tagged result
//!
//! Feature symbols are counted over the whole grid. A mini-game trigger
//! wins over line pays; the dice award is orthogonal and rides along with
//! whatever else the spin produced.

use serde::{Deserialize, Serialize};

use lr_stage::{FeatureKind, WinRow};

use crate::symbols::{ReelGrid, Symbol};

/// Symbols needed anywhere on the grid to trigger a feature
pub const TRIGGER_COUNT: usize = 3;

/// Symbols needed on one row to pay
pub const MIN_LINE_MATCH: usize = 3;

/// Level from which top and bottom rows pay
pub const MULTI_LINE_LEVEL: u32 = 14;

/// A mini-game trigger: symbol, feature and the level it unlocks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerRule {
    pub symbol: Symbol,
    pub feature: FeatureKind,
    pub min_level: u32,
}

/// Mini-game triggers in dispatch priority order
pub const FEATURE_PRIORITY: [TriggerRule; 4] = [
    TriggerRule {
        symbol: Symbol::Star,
        feature: FeatureKind::BonusBoard,
        min_level: 3,
    },
    TriggerRule {
        symbol: Symbol::Snake,
        feature: FeatureKind::SnakeBoard,
        min_level: 2,
    },
    TriggerRule {
        symbol: Symbol::Ticket,
        feature: FeatureKind::ScratchCard,
        min_level: 12,
    },
    TriggerRule {
        symbol: Symbol::Card,
        feature: FeatureKind::HigherLower,
        min_level: 8,
    },
];

/// A row holding 3+ of one symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineMatch {
    pub row: WinRow,
    pub symbol: Symbol,
    pub count: u8,
}

/// What the spin produced, excluding the free-spin award
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpinOutcome {
    NoWin,
    LineWins { matches: Vec<LineMatch> },
    Feature { feature: FeatureKind },
}

/// Full evaluation of one grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub outcome: SpinOutcome,

    /// Dice on the grid when they reached the trigger count
    pub free_spin_dice: Option<u32>,

    /// Every mini-game whose trigger was met, highest priority first
    pub triggered: Vec<FeatureKind>,
}

impl Evaluation {
    /// Line win or any trigger; scoring spins are never debited
    pub fn is_scoring(&self) -> bool {
        !matches!(self.outcome, SpinOutcome::NoWin) || self.free_spin_dice.is_some()
    }

    /// Mini-game to open, if any
    pub fn feature(&self) -> Option<FeatureKind> {
        match self.outcome {
            SpinOutcome::Feature { feature } => Some(feature),
            _ => None,
        }
    }

    pub fn line_matches(&self) -> &[LineMatch] {
        match &self.outcome {
            SpinOutcome::LineWins { matches } => matches,
            _ => &[],
        }
    }

    pub fn awards_free_spins(&self) -> bool {
        self.free_spin_dice.is_some()
    }
}

/// Stateless grid evaluator
pub struct WinEvaluator;

impl WinEvaluator {
    /// Evaluate `grid` at `level`
    pub fn evaluate(grid: &ReelGrid, level: u32) -> Evaluation {
        let dice = grid.count(Symbol::Dice);
        let free_spin_dice = (dice >= TRIGGER_COUNT).then_some(dice as u32);

        let triggered = Self::feature_triggers(grid, level);
        let outcome = match triggered.first() {
            Some(&feature) => SpinOutcome::Feature { feature },
            None => {
                let matches = Self::scan_rows(grid, level);
                if matches.is_empty() {
                    SpinOutcome::NoWin
                } else {
                    SpinOutcome::LineWins { matches }
                }
            }
        };

        Evaluation {
            outcome,
            free_spin_dice,
            triggered,
        }
    }

    /// Mini-game triggers met on this grid, in priority order
    pub fn feature_triggers(grid: &ReelGrid, level: u32) -> Vec<FeatureKind> {
        FEATURE_PRIORITY
            .iter()
            .filter(|rule| level >= rule.min_level && grid.count(rule.symbol) >= TRIGGER_COUNT)
            .map(|rule| rule.feature)
            .collect()
    }

    /// Rows scanned for line wins at `level`
    pub fn evaluated_rows(level: u32) -> &'static [WinRow] {
        if level >= MULTI_LINE_LEVEL {
            &[WinRow::Middle, WinRow::Top, WinRow::Bottom]
        } else {
            &[WinRow::Middle]
        }
    }

    /// Every symbol with 3+ occurrences on an evaluated row.
    ///
    /// Symbols are reported in order of first appearance within the row.
    pub fn scan_rows(grid: &ReelGrid, level: u32) -> Vec<LineMatch> {
        let mut matches = Vec::new();
        for &row in Self::evaluated_rows(level) {
            let mut counts: Vec<(Symbol, usize)> = Vec::new();
            for symbol in grid.row(row) {
                match counts.iter_mut().find(|(s, _)| *s == symbol) {
                    Some((_, count)) => *count += 1,
                    None => counts.push((symbol, 1)),
                }
            }
            matches.extend(
                counts
                    .into_iter()
                    .filter(|&(_, count)| count >= MIN_LINE_MATCH)
                    .map(|(symbol, count)| LineMatch {
                        row,
                        symbol,
                        count: count as u8,
                    }),
            );
        }
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Symbol::*;

    #[test]
    fn test_three_cherries_middle_row() {
        let grid = ReelGrid::from_rows(&[Lemon, Orange, Lemon], &[Cherry; 3], &[Orange, Lemon, Orange]);
        let eval = WinEvaluator::evaluate(&grid, 1);
        assert_eq!(
            eval.line_matches(),
            &[LineMatch {
                row: WinRow::Middle,
                symbol: Cherry,
                count: 3
            }]
        );
        assert!(eval.is_scoring());
        assert_eq!(eval.feature(), None);
    }

    #[test]
    fn test_non_contiguous_matches_pay() {
        let grid = ReelGrid::from_rows(
            &[Lemon; 4],
            &[Cherry, Lemon, Cherry, Cherry],
            &[Orange; 4],
        );
        let eval = WinEvaluator::evaluate(&grid, 10);
        // Top and bottom rows are not evaluated below level 14
        assert_eq!(eval.line_matches().len(), 1);
        assert_eq!(eval.line_matches()[0].count, 3);
    }

    #[test]
    fn test_multi_line_from_level_14() {
        let grid = ReelGrid::from_rows(&[Lemon; 4], &[Cherry; 4], &[Orange, Orange, Orange, Lemon]);
        let eval = WinEvaluator::evaluate(&grid, 14);
        let rows: Vec<_> = eval.line_matches().iter().map(|m| m.row).collect();
        assert_eq!(rows, vec![WinRow::Middle, WinRow::Top, WinRow::Bottom]);
        assert_eq!(eval.line_matches()[0].count, 4);
    }

    #[test]
    fn test_row_can_pay_two_symbols() {
        let grid = ReelGrid::from_rows(
            &[Cherry; 6],
            &[Lemon, Orange, Lemon, Orange, Lemon, Orange],
            &[Cherry; 6],
        );
        let eval = WinEvaluator::evaluate(&grid, 1);
        let symbols: Vec<_> = eval.line_matches().iter().map(|m| m.symbol).collect();
        assert_eq!(symbols, vec![Lemon, Orange]);
    }

    #[test]
    fn test_stars_preempt_line_wins() {
        let grid = ReelGrid::from_rows(&[Star, Lemon, Star], &[Cherry; 3], &[Orange, Star, Orange]);
        let eval = WinEvaluator::evaluate(&grid, 3);
        assert_eq!(eval.feature(), Some(FeatureKind::BonusBoard));
        assert!(eval.line_matches().is_empty());
    }

    #[test]
    fn test_stars_below_unlock_level_are_ordinary() {
        let grid = ReelGrid::from_rows(&[Lemon; 3], &[Star; 3], &[Orange; 3]);
        let eval = WinEvaluator::evaluate(&grid, 2);
        assert_eq!(eval.feature(), None);
        assert_eq!(eval.line_matches()[0].symbol, Star);
    }

    #[test]
    fn test_priority_order() {
        let grid = ReelGrid::from_rows(
            &[Star, Snake, Ticket, Card],
            &[Star, Snake, Ticket, Card],
            &[Star, Snake, Ticket, Card],
        );
        let eval = WinEvaluator::evaluate(&grid, 12);
        assert_eq!(eval.feature(), Some(FeatureKind::BonusBoard));
        assert_eq!(
            eval.triggered,
            vec![
                FeatureKind::BonusBoard,
                FeatureKind::SnakeBoard,
                FeatureKind::ScratchCard,
                FeatureKind::HigherLower
            ]
        );

        let eval = WinEvaluator::evaluate(&grid, 2);
        assert_eq!(eval.triggered, vec![FeatureKind::SnakeBoard]);
    }

    #[test]
    fn test_dice_award_does_not_block_line_scan() {
        let grid = ReelGrid::from_rows(&[Dice, Lemon, Dice], &[Cherry; 3], &[Orange, Dice, Orange]);
        let eval = WinEvaluator::evaluate(&grid, 1);
        assert_eq!(eval.free_spin_dice, Some(3));
        assert_eq!(eval.line_matches().len(), 1);
    }

    #[test]
    fn test_dice_alone_is_scoring() {
        let grid = ReelGrid::from_rows(&[Dice, Cherry, Lemon], &[Lemon, Dice, Orange], &[Orange, Lemon, Dice]);
        let eval = WinEvaluator::evaluate(&grid, 1);
        assert_eq!(eval.outcome, SpinOutcome::NoWin);
        assert!(eval.awards_free_spins());
        assert!(eval.is_scoring());
    }

    #[test]
    fn test_scoreless_grid() {
        let grid = ReelGrid::from_rows(&[Cherry, Lemon, Orange], &[Lemon, Orange, Cherry], &[Orange, Cherry, Lemon]);
        let eval = WinEvaluator::evaluate(&grid, 20);
        assert_eq!(eval.outcome, SpinOutcome::NoWin);
        assert!(!eval.is_scoring());
    }
}
