//! Stage — every observable phase of a LuckyReels session
//!
//! A Stage is not an animation. It is the meaning of a moment in the game
//! flow; how long it is shown is up to whoever renders it.

use serde::{Deserialize, Serialize};

use crate::taxonomy::{FeatureKind, WinRow};

/// Canonical session stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Stage {
    // ═══════════════════════════════════════════════════════════════════════
    // SPIN LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════
    /// Spin accepted, reels start moving
    SpinStart {
        /// Spin is paid by a banked free spin
        #[serde(default)]
        free_spin: bool,
    },

    /// Reel has stopped, showing final symbols
    ReelStop {
        /// Which reel stopped (0-indexed)
        reel_index: u8,
        /// Symbol IDs on this reel (top to bottom)
        #[serde(default)]
        symbols: Vec<u32>,
    },

    /// All reels stopped, grid being evaluated
    EvaluateWins,

    /// Stake taken from the balance (scoreless regular spin)
    BetDebit {
        amount: u64,
    },

    /// Spin fully resolved
    SpinEnd,

    // ═══════════════════════════════════════════════════════════════════════
    // WIN LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════
    /// Line wins are about to be presented
    WinPresent {
        /// Total of all paying lines
        win_amount: u64,
        /// Number of paying lines
        line_count: u8,
    },

    /// A single paying line
    WinLineShow {
        row: WinRow,
        symbol_id: u32,
        match_count: u8,
        amount: u64,
    },

    /// Credits added to the balance
    WinCredit {
        amount: u64,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // FEATURES
    // ═══════════════════════════════════════════════════════════════════════
    /// Mini-game opened
    FeatureEnter {
        feature: FeatureKind,
    },

    /// Mini-game reported its result, waiting to close
    FeatureResolved {
        feature: FeatureKind,
        payout: u64,
    },

    /// Mini-game closed, control back to the reels
    FeatureExit {
        feature: FeatureKind,
        payout: u64,
    },

    /// Gamble offered for a regular line win
    GambleOffer {
        amount: u64,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // FREE SPINS / AUTO-SPIN
    // ═══════════════════════════════════════════════════════════════════════
    /// Free spins added to the bank
    FreeSpinsAwarded {
        /// Spins awarded by this trigger
        count: u32,
        /// Spins banked after the award
        total: u32,
    },

    /// Free spin bank emptied
    FreeSpinsComplete,

    /// Automated spinning engaged
    AutoSpinStart {
        remaining: u32,
    },

    /// Automated spinning halted
    AutoSpinStop,

    // ═══════════════════════════════════════════════════════════════════════
    // PROGRESSION
    // ═══════════════════════════════════════════════════════════════════════
    /// Experience granted from a win
    XpGain {
        gained: u64,
        xp: u64,
        needed: u64,
    },

    /// Level increased by one
    LevelUp {
        level: u32,
    },

    /// Level-up banner dismissed
    LevelUpDismissed {
        level: u32,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // SESSION
    // ═══════════════════════════════════════════════════════════════════════
    /// Balance exhausted with nothing pending
    GameOver,

    /// Session restored to starting values
    SessionReset {
        balance: i64,
    },
}

impl Stage {
    /// Get stage category
    pub fn category(&self) -> StageCategory {
        match self {
            Stage::SpinStart { .. }
            | Stage::ReelStop { .. }
            | Stage::EvaluateWins
            | Stage::BetDebit { .. }
            | Stage::SpinEnd => StageCategory::SpinLifecycle,

            Stage::WinPresent { .. } | Stage::WinLineShow { .. } | Stage::WinCredit { .. } => {
                StageCategory::WinLifecycle
            }

            Stage::FeatureEnter { .. }
            | Stage::FeatureResolved { .. }
            | Stage::FeatureExit { .. }
            | Stage::GambleOffer { .. } => StageCategory::Feature,

            Stage::FreeSpinsAwarded { .. }
            | Stage::FreeSpinsComplete
            | Stage::AutoSpinStart { .. }
            | Stage::AutoSpinStop => StageCategory::FreeSpins,

            Stage::XpGain { .. } | Stage::LevelUp { .. } | Stage::LevelUpDismissed { .. } => {
                StageCategory::Progression
            }

            Stage::GameOver | Stage::SessionReset { .. } => StageCategory::Session,
        }
    }

    /// Get stage type name (snake_case)
    pub fn type_name(&self) -> &'static str {
        match self {
            Stage::SpinStart { .. } => "spin_start",
            Stage::ReelStop { .. } => "reel_stop",
            Stage::EvaluateWins => "evaluate_wins",
            Stage::BetDebit { .. } => "bet_debit",
            Stage::SpinEnd => "spin_end",
            Stage::WinPresent { .. } => "win_present",
            Stage::WinLineShow { .. } => "win_line_show",
            Stage::WinCredit { .. } => "win_credit",
            Stage::FeatureEnter { .. } => "feature_enter",
            Stage::FeatureResolved { .. } => "feature_resolved",
            Stage::FeatureExit { .. } => "feature_exit",
            Stage::GambleOffer { .. } => "gamble_offer",
            Stage::FreeSpinsAwarded { .. } => "free_spins_awarded",
            Stage::FreeSpinsComplete => "free_spins_complete",
            Stage::AutoSpinStart { .. } => "auto_spin_start",
            Stage::AutoSpinStop => "auto_spin_stop",
            Stage::XpGain { .. } => "xp_gain",
            Stage::LevelUp { .. } => "level_up",
            Stage::LevelUpDismissed { .. } => "level_up_dismissed",
            Stage::GameOver => "game_over",
            Stage::SessionReset { .. } => "session_reset",
        }
    }

    /// Feature this stage refers to, if any
    pub fn feature(&self) -> Option<FeatureKind> {
        match self {
            Stage::FeatureEnter { feature }
            | Stage::FeatureResolved { feature, .. }
            | Stage::FeatureExit { feature, .. } => Some(*feature),
            Stage::GambleOffer { .. } => Some(FeatureKind::Gamble),
            Stage::FreeSpinsAwarded { .. } | Stage::FreeSpinsComplete => {
                Some(FeatureKind::FreeSpins)
            }
            _ => None,
        }
    }

    /// Stages that stop the player from spinning until something else happens
    pub fn is_blocking(&self) -> bool {
        matches!(
            self,
            Stage::FeatureEnter { .. } | Stage::GambleOffer { .. } | Stage::LevelUp { .. } | Stage::GameOver
        )
    }
}

/// Stage category for grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageCategory {
    SpinLifecycle,
    WinLifecycle,
    Feature,
    FreeSpins,
    Progression,
    Session,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_serialization() {
        let stage = Stage::ReelStop {
            reel_index: 2,
            symbols: vec![1, 2, 3],
        };
        let json = serde_json::to_string(&stage).unwrap();
        assert!(json.contains("\"type\":\"reel_stop\""));
        let back: Stage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stage);
    }

    #[test]
    fn test_spin_start_defaults_to_paid_spin() {
        let stage: Stage = serde_json::from_str(r#"{"type":"spin_start"}"#).unwrap();
        assert_eq!(stage, Stage::SpinStart { free_spin: false });
    }

    #[test]
    fn test_categories() {
        assert_eq!(Stage::EvaluateWins.category(), StageCategory::SpinLifecycle);
        assert_eq!(
            Stage::WinCredit { amount: 5 }.category(),
            StageCategory::WinLifecycle
        );
        assert_eq!(
            Stage::FeatureExit {
                feature: FeatureKind::ScratchCard,
                payout: 0
            }
            .category(),
            StageCategory::Feature
        );
        assert_eq!(Stage::AutoSpinStop.category(), StageCategory::FreeSpins);
        assert_eq!(Stage::LevelUp { level: 2 }.category(), StageCategory::Progression);
        assert_eq!(Stage::GameOver.category(), StageCategory::Session);
    }

    #[test]
    fn test_type_name_matches_serde_tag() {
        let stages = [
            Stage::SpinStart { free_spin: true },
            Stage::BetDebit { amount: 1 },
            Stage::GambleOffer { amount: 10 },
            Stage::FreeSpinsAwarded { count: 9, total: 9 },
            Stage::LevelUpDismissed { level: 3 },
            Stage::SessionReset { balance: 100 },
        ];
        for stage in stages {
            let value = serde_json::to_value(&stage).unwrap();
            assert_eq!(value["type"], stage.type_name());
        }
    }

    #[test]
    fn test_feature_lookup() {
        assert_eq!(
            Stage::GambleOffer { amount: 3 }.feature(),
            Some(FeatureKind::Gamble)
        );
        assert_eq!(Stage::SpinEnd.feature(), None);
        assert!(Stage::GameOver.is_blocking());
        assert!(!Stage::SpinEnd.is_blocking());
    }
}
