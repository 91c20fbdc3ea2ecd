//! Loser's door: consolation pick after a long losing streak

use rand::Rng;

use lr_stage::FeatureKind;

use crate::generator::SlotRng;

use super::{
    ActivationContext, FeatureAction, FeatureChapter, FeatureError, FeatureSnapshot,
    FeatureState, FeatureStep,
};

pub const DOOR_COUNT: usize = 3;

/// Bet multiplier behind the winning door
pub const DOOR_MULTIPLIER: u64 = 10;

/// Loser's Door Chapter
pub struct LosersDoorChapter {
    bet: u64,
    winning_door: usize,
    opened: Option<usize>,
    state: FeatureState,
}

impl LosersDoorChapter {
    pub fn start(context: &ActivationContext, rng: &mut SlotRng) -> Self {
        Self::with_winning_door(context.bet, rng.random_range(0..DOOR_COUNT))
    }

    pub fn with_winning_door(bet: u64, winning_door: usize) -> Self {
        Self {
            bet,
            winning_door: winning_door.min(DOOR_COUNT - 1),
            opened: None,
            state: FeatureState::Active,
        }
    }

    pub fn opened(&self) -> Option<usize> {
        self.opened
    }

    fn open(&mut self, index: usize) -> Result<FeatureStep, FeatureError> {
        if index >= DOOR_COUNT {
            return Err(FeatureError::OutOfRange {
                index,
                len: DOOR_COUNT,
            });
        }
        self.opened = Some(index);
        let payout = if index == self.winning_door {
            self.bet.saturating_mul(DOOR_MULTIPLIER)
        } else {
            0
        };
        self.state = FeatureState::Resolved { payout };
        Ok(FeatureStep::Complete { payout })
    }
}

impl FeatureChapter for LosersDoorChapter {
    fn kind(&self) -> FeatureKind {
        FeatureKind::LosersDoor
    }

    fn state(&self) -> FeatureState {
        self.state
    }

    fn snapshot(&self) -> FeatureSnapshot {
        // the winner is only shown once a door is open
        let winning_door = self.opened.map(|_| self.winning_door);
        FeatureSnapshot {
            feature: self.kind(),
            state: self.state,
            data: serde_json::json!({
                "doors": DOOR_COUNT,
                "opened": self.opened,
                "winning_door": winning_door,
            }),
        }
    }

    fn apply_action(
        &mut self,
        action: FeatureAction,
        _rng: &mut SlotRng,
    ) -> Result<FeatureStep, FeatureError> {
        match action {
            FeatureAction::Pick { index } => self.open(index),
            other => Err(FeatureError::unsupported(self.kind(), &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::slot_rng;

    #[test]
    fn test_winning_door_pays_ten_times() {
        let mut rng = slot_rng(Some(0));
        let mut game = LosersDoorChapter::with_winning_door(4, 1);
        assert_eq!(
            game.play(FeatureAction::Pick { index: 1 }, &mut rng),
            Ok(FeatureStep::Complete { payout: 40 })
        );
    }

    #[test]
    fn test_losing_door_pays_nothing() {
        let mut rng = slot_rng(Some(0));
        let mut game = LosersDoorChapter::with_winning_door(4, 1);
        assert_eq!(
            game.play(FeatureAction::Pick { index: 2 }, &mut rng),
            Ok(FeatureStep::Complete { payout: 0 })
        );
        assert_eq!(
            game.play(FeatureAction::Pick { index: 1 }, &mut rng),
            Err(FeatureError::AlreadyResolved(FeatureKind::LosersDoor))
        );
    }

    #[test]
    fn test_snapshot_hides_winner_until_opened() {
        let mut rng = slot_rng(Some(8));
        let mut game = LosersDoorChapter::start(&ActivationContext::new(1, 1), &mut rng);
        assert_eq!(game.snapshot().data["winning_door"], serde_json::Value::Null);
        game.play(FeatureAction::Pick { index: 0 }, &mut rng).unwrap();
        assert!(game.snapshot().data["winning_door"].is_u64());
        assert_eq!(game.opened(), Some(0));
    }

    #[test]
    fn test_door_out_of_range() {
        let mut rng = slot_rng(Some(0));
        let mut game = LosersDoorChapter::with_winning_door(1, 0);
        assert_eq!(
            game.play(FeatureAction::Pick { index: 3 }, &mut rng),
            Err(FeatureError::OutOfRange { index: 3, len: 3 })
        );
        assert!(game.state().is_active());
    }
}
