//! Spin result record

use serde::{Deserialize, Serialize};

use lr_stage::{FeatureKind, WinLine};

use crate::evaluator::{Evaluation, SpinOutcome};
use crate::paytable::Payout;
use crate::symbols::ReelGrid;

/// Everything one resolved spin did to the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinResult {
    /// Sequence number within the session (1-based, survives resets)
    pub spin_index: u64,
    /// Final grid
    pub grid: ReelGrid,
    /// Bet at spin time
    pub bet: u64,
    /// Level at spin time
    pub level: u32,
    /// Paid by a banked free spin
    pub is_free_spin: bool,
    /// What the grid produced
    pub evaluation: Evaluation,
    /// Priced line wins
    pub payout: Payout,
    /// Amount debited (bet or zero)
    pub debited: u64,
    /// Free spins added by dice
    pub free_spins_awarded: u32,
    /// Mini-game opened by this spin
    pub feature: Option<FeatureKind>,
}

impl SpinResult {
    /// Total paid by line wins
    pub fn total_win(&self) -> u64 {
        self.payout.total
    }

    pub fn is_win(&self) -> bool {
        self.payout.is_win()
    }

    pub fn win_lines(&self) -> Vec<WinLine> {
        self.payout.win_lines()
    }

    /// Scoreless: no line, no trigger, no free spins
    pub fn is_loss(&self) -> bool {
        !self.evaluation.is_scoring()
    }

    /// Win-to-bet ratio
    pub fn win_ratio(&self) -> f64 {
        if self.bet == 0 {
            return 0.0;
        }
        self.payout.total as f64 / self.bet as f64
    }

    pub fn outcome(&self) -> &SpinOutcome {
        &self.evaluation.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::WinEvaluator;
    use crate::symbols::Symbol;

    #[test]
    fn test_result_accessors() {
        let grid = ReelGrid::from_rows(
            &[Symbol::Lemon, Symbol::Orange, Symbol::Lemon],
            &[Symbol::Cherry, Symbol::Cherry, Symbol::Cherry],
            &[Symbol::Orange, Symbol::Lemon, Symbol::Orange],
        );
        let evaluation = WinEvaluator::evaluate(&grid, 1);
        let payout = Payout::price(evaluation.line_matches(), 1, 2);
        let result = SpinResult {
            spin_index: 1,
            grid,
            bet: 2,
            level: 1,
            is_free_spin: false,
            evaluation,
            payout,
            debited: 0,
            free_spins_awarded: 0,
            feature: None,
        };
        assert!(result.is_win());
        assert!(!result.is_loss());
        assert_eq!(result.total_win(), 20);
        assert!((result.win_ratio() - 10.0).abs() < 1e-9);
        assert_eq!(result.win_lines().len(), 1);
    }
}
