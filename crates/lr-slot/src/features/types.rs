//! Feature actions, steps and snapshots

use serde::{Deserialize, Serialize};

use lr_stage::FeatureKind;

/// Card colour for the gamble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardColor {
    Red,
    Black,
}

/// Guess direction for higher/lower
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Higher,
    Lower,
}

/// A player action inside a mini-game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FeatureAction {
    /// Reveal a tile (bonus board) or open a door (loser's door)
    Pick { index: usize },
    /// Gamble on the colour of the next card
    GuessColor { color: CardColor },
    /// Guess whether the next card ranks higher or lower
    Guess { direction: Direction },
    /// Scratch one cell of the scratch card
    Scratch { index: usize },
    /// Roll the die on the snakes & ladders board
    Roll,
    /// Take the current amount and leave
    Collect,
}

impl FeatureAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pick { .. } => "pick",
            Self::GuessColor { .. } => "guess_color",
            Self::Guess { .. } => "guess",
            Self::Scratch { .. } => "scratch",
            Self::Roll => "roll",
            Self::Collect => "collect",
        }
    }
}

/// Result of one action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum FeatureStep {
    /// More actions expected
    Continue,
    /// Mini-game finished with this payout
    Complete { payout: u64 },
}

impl FeatureStep {
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete { .. })
    }

    pub fn payout(&self) -> Option<u64> {
        match self {
            Self::Complete { payout } => Some(*payout),
            Self::Continue => None,
        }
    }
}

/// Mini-game lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FeatureState {
    /// Waiting for player actions
    Active,
    /// Finished; the payout is final
    Resolved { payout: u64 },
}

impl FeatureState {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn payout(&self) -> Option<u64> {
        match self {
            Self::Resolved { payout } => Some(*payout),
            Self::Active => None,
        }
    }
}

/// What a mini-game is started with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationContext {
    /// Bet of the triggering spin
    pub bet: u64,
    /// Level at trigger time
    pub level: u32,
    /// Amount at stake (gamble only: the pending line win)
    pub stake: u64,
}

impl ActivationContext {
    pub fn new(bet: u64, level: u32) -> Self {
        Self {
            bet,
            level,
            stake: 0,
        }
    }

    pub fn with_stake(mut self, stake: u64) -> Self {
        self.stake = stake;
        self
    }
}

/// Serializable view of a mini-game for presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSnapshot {
    pub feature: FeatureKind,
    pub state: FeatureState,
    /// Game-specific visible state
    #[serde(default)]
    pub data: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_serde() {
        let action = FeatureAction::Pick { index: 4 };
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, r#"{"action":"pick","index":4}"#);
        let back: FeatureAction = serde_json::from_str(r#"{"action":"roll"}"#).unwrap();
        assert_eq!(back, FeatureAction::Roll);
    }

    #[test]
    fn test_step_and_state_payouts() {
        assert_eq!(FeatureStep::Complete { payout: 12 }.payout(), Some(12));
        assert_eq!(FeatureStep::Continue.payout(), None);
        assert!(FeatureState::Active.is_active());
        assert_eq!(FeatureState::Resolved { payout: 0 }.payout(), Some(0));
    }
}
