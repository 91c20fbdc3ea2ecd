//! Snakes & Ladders — roll along a 36-square board (snake trigger)

use rand::Rng;

use lr_stage::FeatureKind;

use crate::generator::SlotRng;

use super::{
    ActivationContext, FeatureAction, FeatureChapter, FeatureError, FeatureSnapshot,
    FeatureState, FeatureStep,
};

pub const BOARD_SIZE: u32 = 36;

/// Bet multiplier for reaching the last square
pub const FINISH_MULTIPLIER: u64 = 50;

/// Squares that end the game with nothing
pub const SNAKE_SQUARES: [u32; 9] = [35, 33, 31, 28, 25, 21, 19, 15, 12];

/// Ladder foot → ladder top
pub const LADDERS: [(u32, u32); 5] = [(2, 18), (7, 13), (11, 24), (16, 29), (22, 32)];

pub fn is_snake(square: u32) -> bool {
    SNAKE_SQUARES.contains(&square)
}

pub fn ladder_top(square: u32) -> Option<u32> {
    LADDERS
        .iter()
        .find(|(foot, _)| *foot == square)
        .map(|(_, top)| *top)
}

/// Cash-out multiplier at a square
pub fn cash_out_multiplier(position: u32) -> u64 {
    (position as f64 / BOARD_SIZE as f64 * 25.0).floor() as u64 + 1
}

/// Snake Board Chapter
pub struct SnakeBoardChapter {
    bet: u64,
    position: u32,
    last_roll: Option<u32>,
    state: FeatureState,
}

impl SnakeBoardChapter {
    pub fn start(context: &ActivationContext) -> Self {
        Self {
            bet: context.bet,
            position: 1,
            last_roll: None,
            state: FeatureState::Active,
        }
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn last_roll(&self) -> Option<u32> {
        self.last_roll
    }

    pub fn cash_out_value(&self) -> u64 {
        self.bet.saturating_mul(cash_out_multiplier(self.position))
    }

    /// Move by a die roll of 1..=6
    pub fn advance_by(&mut self, roll: u32) -> FeatureStep {
        self.last_roll = Some(roll);
        let landed = self.position + roll;

        if landed >= BOARD_SIZE {
            self.position = BOARD_SIZE;
            return self.finish(self.bet.saturating_mul(FINISH_MULTIPLIER));
        }

        self.position = landed;
        if is_snake(landed) {
            return self.finish(0);
        }
        if let Some(top) = ladder_top(landed) {
            self.position = top;
        }
        FeatureStep::Continue
    }

    fn finish(&mut self, payout: u64) -> FeatureStep {
        self.state = FeatureState::Resolved { payout };
        FeatureStep::Complete { payout }
    }
}

impl FeatureChapter for SnakeBoardChapter {
    fn kind(&self) -> FeatureKind {
        FeatureKind::SnakeBoard
    }

    fn state(&self) -> FeatureState {
        self.state
    }

    fn snapshot(&self) -> FeatureSnapshot {
        FeatureSnapshot {
            feature: self.kind(),
            state: self.state,
            data: serde_json::json!({
                "position": self.position,
                "last_roll": self.last_roll,
                "cash_out": self.cash_out_value(),
            }),
        }
    }

    fn apply_action(
        &mut self,
        action: FeatureAction,
        rng: &mut SlotRng,
    ) -> Result<FeatureStep, FeatureError> {
        match action {
            FeatureAction::Roll => {
                let roll = rng.random_range(1..=6);
                Ok(self.advance_by(roll))
            }
            FeatureAction::Collect => Ok(self.finish(self.cash_out_value())),
            other => Err(FeatureError::unsupported(self.kind(), &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::slot_rng;

    fn board(bet: u64) -> SnakeBoardChapter {
        SnakeBoardChapter::start(&ActivationContext::new(bet, 2))
    }

    #[test]
    fn test_ladder_climbs() {
        let mut game = board(1);
        // 1 + 1 = 2, ladder to 18
        assert_eq!(game.advance_by(1), FeatureStep::Continue);
        assert_eq!(game.position(), 18);
    }

    #[test]
    fn test_snake_ends_game() {
        let mut game = board(2);
        game.advance_by(1);
        // 18 + 3 = 21
        assert_eq!(game.advance_by(3), FeatureStep::Complete { payout: 0 });
        assert_eq!(game.position(), 21);
    }

    #[test]
    fn test_reaching_end_pays_jackpot() {
        let mut game = board(2);
        game.advance_by(1);
        game.advance_by(4); // 22 → ladder to 32
        assert_eq!(game.position(), 32);
        assert_eq!(game.advance_by(6), FeatureStep::Complete { payout: 100 });
        assert_eq!(game.position(), BOARD_SIZE);
    }

    #[test]
    fn test_cash_out_scales_with_position() {
        assert_eq!(cash_out_multiplier(1), 1);
        assert_eq!(cash_out_multiplier(18), 13);
        assert_eq!(cash_out_multiplier(36), 26);

        let mut rng = slot_rng(Some(2));
        let mut game = board(3);
        game.advance_by(1);
        assert_eq!(
            game.play(FeatureAction::Collect, &mut rng),
            Ok(FeatureStep::Complete { payout: 39 })
        );
    }

    #[test]
    fn test_seeded_rolls_stay_on_board() {
        let mut rng = slot_rng(Some(17));
        let mut game = board(1);
        while game.state().is_active() {
            game.play(FeatureAction::Roll, &mut rng).unwrap();
            let roll = game.last_roll().unwrap();
            assert!((1..=6).contains(&roll));
            assert!(game.position() <= BOARD_SIZE);
        }
        assert!(game.payout().is_some());
    }
}
