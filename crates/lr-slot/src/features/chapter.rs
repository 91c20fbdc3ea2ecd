//! Feature Chapter trait — the interface every mini-game implements

use lr_stage::FeatureKind;

use crate::generator::SlotRng;

use super::{FeatureAction, FeatureSnapshot, FeatureState, FeatureStep};

/// A self-contained mini-game.
///
/// ## Lifecycle
///
/// 1. Constructed from an [`super::ActivationContext`] (prizes, cards and
///    boards are dealt up front)
/// 2. `play()` once per player action, returning `Continue` until done
/// 3. Exactly one `Complete { payout }`; afterwards every action is rejected
pub trait FeatureChapter: Send {
    /// Which feature this is
    fn kind(&self) -> FeatureKind;

    /// Human-readable feature name
    fn name(&self) -> &str {
        self.kind().display_name()
    }

    /// Get current state
    fn state(&self) -> FeatureState;

    /// Snapshot of the visible state
    fn snapshot(&self) -> FeatureSnapshot;

    /// Handle one action on an active game
    fn apply_action(
        &mut self,
        action: FeatureAction,
        rng: &mut SlotRng,
    ) -> Result<FeatureStep, FeatureError>;

    /// Play one action; a resolved game rejects everything
    fn play(&mut self, action: FeatureAction, rng: &mut SlotRng) -> Result<FeatureStep, FeatureError> {
        if !self.state().is_active() {
            return Err(FeatureError::AlreadyResolved(self.kind()));
        }
        self.apply_action(action, rng)
    }

    fn is_resolved(&self) -> bool {
        !self.state().is_active()
    }

    /// Final payout, once resolved
    fn payout(&self) -> Option<u64> {
        self.state().payout()
    }
}

/// Invalid mini-game requests
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeatureError {
    #[error("No feature is active")]
    NoActiveFeature,

    #[error("{feature} does not accept '{action}'")]
    UnsupportedAction {
        feature: FeatureKind,
        action: &'static str,
    },

    #[error("Index {index} is out of range (0..{len})")]
    OutOfRange { index: usize, len: usize },

    #[error("Position {0} is already revealed")]
    AlreadyRevealed(usize),

    #[error("{0} has already resolved")]
    AlreadyResolved(FeatureKind),
}

impl FeatureError {
    pub(crate) fn unsupported(feature: FeatureKind, action: &FeatureAction) -> Self {
        Self::UnsupportedAction {
            feature,
            action: action.name(),
        }
    }
}

/// Boxed feature chapter for dynamic dispatch
pub type BoxedFeatureChapter = Box<dyn FeatureChapter + 'static>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::slot_rng;

    struct CoinToss {
        state: FeatureState,
    }

    impl FeatureChapter for CoinToss {
        fn kind(&self) -> FeatureKind {
            FeatureKind::Gamble
        }

        fn state(&self) -> FeatureState {
            self.state
        }

        fn snapshot(&self) -> FeatureSnapshot {
            FeatureSnapshot {
                feature: self.kind(),
                state: self.state,
                data: serde_json::Value::Null,
            }
        }

        fn apply_action(
            &mut self,
            action: FeatureAction,
            _rng: &mut SlotRng,
        ) -> Result<FeatureStep, FeatureError> {
            match action {
                FeatureAction::Collect => {
                    self.state = FeatureState::Resolved { payout: 7 };
                    Ok(FeatureStep::Complete { payout: 7 })
                }
                other => Err(FeatureError::unsupported(self.kind(), &other)),
            }
        }
    }

    #[test]
    fn test_play_guards_resolved_games() {
        let mut rng = slot_rng(Some(1));
        let mut game = CoinToss {
            state: FeatureState::Active,
        };
        assert_eq!(
            game.play(FeatureAction::Roll, &mut rng),
            Err(FeatureError::UnsupportedAction {
                feature: FeatureKind::Gamble,
                action: "roll"
            })
        );
        assert_eq!(
            game.play(FeatureAction::Collect, &mut rng),
            Ok(FeatureStep::Complete { payout: 7 })
        );
        assert!(game.is_resolved());
        assert_eq!(game.payout(), Some(7));
        assert_eq!(
            game.play(FeatureAction::Collect, &mut rng),
            Err(FeatureError::AlreadyResolved(FeatureKind::Gamble))
        );
    }

    #[test]
    fn test_error_messages() {
        let err = FeatureError::OutOfRange { index: 12, len: 12 };
        assert_eq!(err.to_string(), "Index 12 is out of range (0..12)");
        assert_eq!(
            FeatureError::AlreadyResolved(FeatureKind::ScratchCard).to_string(),
            "Scratch Card has already resolved"
        );
    }
}
