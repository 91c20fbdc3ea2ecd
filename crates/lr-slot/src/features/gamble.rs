//! Red/black gamble on a regular line win

use rand::Rng;

use lr_stage::FeatureKind;

use crate::generator::SlotRng;

use super::{
    ActivationContext, CardColor, FeatureAction, FeatureChapter, FeatureError, FeatureSnapshot,
    FeatureState, FeatureStep,
};

/// Probability of drawing red
pub const RED_CHANCE: f64 = 0.5;

/// Gamble outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GambleOutcome {
    Win,
    Lose,
}

/// Gamble Feature Chapter
pub struct GambleChapter {
    original: u64,
    current: u64,
    rounds_won: u32,
    last_card: Option<CardColor>,
    state: FeatureState,
}

impl GambleChapter {
    pub fn start(context: &ActivationContext) -> Self {
        Self::with_stake(context.stake)
    }

    pub fn with_stake(stake: u64) -> Self {
        Self {
            original: stake,
            current: stake,
            rounds_won: 0,
            last_card: None,
            state: FeatureState::Active,
        }
    }

    /// Amount collected right now
    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn rounds_won(&self) -> u32 {
        self.rounds_won
    }

    /// Colour for a uniform roll
    pub fn draw_color(roll: f64) -> CardColor {
        if roll < RED_CHANCE {
            CardColor::Red
        } else {
            CardColor::Black
        }
    }

    fn determine_outcome(&self, guess: CardColor, drawn: CardColor) -> GambleOutcome {
        if guess == drawn {
            GambleOutcome::Win
        } else {
            GambleOutcome::Lose
        }
    }

    fn guess(&mut self, color: CardColor, roll: f64) -> FeatureStep {
        let drawn = Self::draw_color(roll);
        self.last_card = Some(drawn);
        match self.determine_outcome(color, drawn) {
            GambleOutcome::Win => {
                self.current = self.current.saturating_mul(2);
                self.rounds_won += 1;
                FeatureStep::Continue
            }
            GambleOutcome::Lose => self.finish(0),
        }
    }

    fn finish(&mut self, payout: u64) -> FeatureStep {
        self.current = payout;
        self.state = FeatureState::Resolved { payout };
        FeatureStep::Complete { payout }
    }
}

impl FeatureChapter for GambleChapter {
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
            data: serde_json::json!({
                "original": self.original,
                "current": self.current,
                "rounds_won": self.rounds_won,
                "last_card": self.last_card,
            }),
        }
    }

    fn apply_action(
        &mut self,
        action: FeatureAction,
        rng: &mut SlotRng,
    ) -> Result<FeatureStep, FeatureError> {
        match action {
            FeatureAction::GuessColor { color } => Ok(self.guess(color, rng.random::<f64>())),
            FeatureAction::Collect => Ok(self.finish(self.current)),
            other => Err(FeatureError::unsupported(self.kind(), &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::slot_rng;

    #[test]
    fn test_collect_pays_current_amount() {
        let mut rng = slot_rng(Some(1));
        let mut gamble = GambleChapter::with_stake(10);
        assert_eq!(
            gamble.play(FeatureAction::Collect, &mut rng),
            Ok(FeatureStep::Complete { payout: 10 })
        );
    }

    #[test]
    fn test_correct_guess_doubles() {
        let mut gamble = GambleChapter::with_stake(10);
        assert_eq!(gamble.guess(CardColor::Red, 0.2), FeatureStep::Continue);
        assert_eq!(gamble.current(), 20);
        assert_eq!(gamble.guess(CardColor::Black, 0.7), FeatureStep::Continue);
        assert_eq!(gamble.current(), 40);
        assert_eq!(gamble.rounds_won(), 2);
        assert!(gamble.state().is_active());
    }

    #[test]
    fn test_wrong_guess_loses_everything() {
        let mut gamble = GambleChapter::with_stake(10);
        assert_eq!(
            gamble.guess(CardColor::Red, 0.9),
            FeatureStep::Complete { payout: 0 }
        );
        assert_eq!(gamble.payout(), Some(0));
    }

    #[test]
    fn test_seeded_guess_resolves_or_continues() {
        let mut rng = slot_rng(Some(11));
        let mut gamble = GambleChapter::start(&ActivationContext::new(1, 1).with_stake(8));
        let step = gamble
            .play(FeatureAction::GuessColor { color: CardColor::Black }, &mut rng)
            .unwrap();
        match step {
            FeatureStep::Continue => assert_eq!(gamble.current(), 16),
            FeatureStep::Complete { payout } => assert_eq!(payout, 0),
        }
    }
}
