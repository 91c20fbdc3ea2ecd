//! Auto-player: the simplest reasonable moves for every decision a
//! session asks of a player

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use lr_slot::{CardColor, Direction, FeatureAction, FeatureSnapshot, SlotSession};
use lr_stage::FeatureKind;

use crate::config::BetStrategy;

/// Snake board square from which the player cashes out
pub const SNAKE_CASH_OUT_SQUARE: u64 = 18;

/// Higher/lower multiplier the player is happy to collect
pub const HIGHER_LOWER_TARGET: u64 = 4;

/// Ranks up to this one are followed by a "higher" guess
const HIGHER_LOWER_PIVOT: u64 = 6;

/// Auto-player
pub struct AutoPlayer {
    bet: BetStrategy,
    gamble_rounds: u32,
    gambles_taken: u32,
    rng: ChaCha8Rng,
}

impl AutoPlayer {
    pub fn new(bet: BetStrategy, gamble_rounds: u32, seed: u64) -> Self {
        Self {
            bet,
            gamble_rounds,
            gambles_taken: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Bet the strategy asks for, before clamping
    pub fn desired_bet(&self, session: &SlotSession) -> u64 {
        match self.bet {
            BetStrategy::Minimum => 1,
            BetStrategy::Maximum => session.max_bet(),
            BetStrategy::Fixed(amount) => amount,
        }
    }

    /// Apply the bet strategy, never betting more than the balance
    pub fn place_bet(&self, session: &mut SlotSession) -> u64 {
        let affordable = session.balance().max(1) as u64;
        session.set_bet(self.desired_bet(session).min(affordable))
    }

    /// Next move inside the open mini-game
    pub fn next_action(&mut self, snapshot: &FeatureSnapshot) -> FeatureAction {
        let data = &snapshot.data;
        match snapshot.feature {
            FeatureKind::BonusBoard => FeatureAction::Pick {
                index: first_hidden(&data["tiles"]),
            },
            FeatureKind::ScratchCard => FeatureAction::Scratch {
                index: first_hidden(&data["cells"]),
            },
            FeatureKind::LosersDoor => FeatureAction::Pick {
                index: self.rng.random_range(0..3),
            },
            FeatureKind::SnakeBoard => {
                let position = data["position"].as_u64().unwrap_or(0);
                if position >= SNAKE_CASH_OUT_SQUARE {
                    FeatureAction::Collect
                } else {
                    FeatureAction::Roll
                }
            }
            FeatureKind::HigherLower => {
                let multiplier = data["multiplier"].as_u64().unwrap_or(1);
                if multiplier >= HIGHER_LOWER_TARGET {
                    return FeatureAction::Collect;
                }
                let rank = data["current"]["rank"].as_u64().unwrap_or(0);
                let direction = if rank <= HIGHER_LOWER_PIVOT {
                    Direction::Higher
                } else {
                    Direction::Lower
                };
                FeatureAction::Guess { direction }
            }
            FeatureKind::Gamble => {
                let rounds_won = data["rounds_won"].as_u64().unwrap_or(0);
                if rounds_won == 0 {
                    self.gambles_taken = 0;
                }
                if self.gambles_taken >= self.gamble_rounds {
                    return FeatureAction::Collect;
                }
                self.gambles_taken += 1;
                let color = if self.rng.random::<bool>() {
                    CardColor::Red
                } else {
                    CardColor::Black
                };
                FeatureAction::GuessColor { color }
            }
            FeatureKind::FreeSpins => FeatureAction::Collect,
        }
    }
}

/// First `null` entry of a masked list
fn first_hidden(values: &serde_json::Value) -> usize {
    values
        .as_array()
        .and_then(|cells| cells.iter().position(|v| v.is_null()))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lr_slot::FeatureState;

    fn snapshot(feature: FeatureKind, data: serde_json::Value) -> FeatureSnapshot {
        FeatureSnapshot {
            feature,
            state: FeatureState::Active,
            data,
        }
    }

    #[test]
    fn test_picks_first_hidden_tile() {
        let mut player = AutoPlayer::new(BetStrategy::Minimum, 0, 1);
        let snap = snapshot(
            FeatureKind::BonusBoard,
            serde_json::json!({ "tiles": [4, null, null], "picks_left": 2 }),
        );
        assert_eq!(player.next_action(&snap), FeatureAction::Pick { index: 1 });
    }

    #[test]
    fn test_snake_cash_out_threshold() {
        let mut player = AutoPlayer::new(BetStrategy::Minimum, 0, 1);
        let low = snapshot(FeatureKind::SnakeBoard, serde_json::json!({ "position": 13 }));
        let high = snapshot(FeatureKind::SnakeBoard, serde_json::json!({ "position": 24 }));
        assert_eq!(player.next_action(&low), FeatureAction::Roll);
        assert_eq!(player.next_action(&high), FeatureAction::Collect);
    }

    #[test]
    fn test_higher_lower_guesses_toward_middle() {
        let mut player = AutoPlayer::new(BetStrategy::Minimum, 0, 1);
        let low = snapshot(
            FeatureKind::HigherLower,
            serde_json::json!({ "current": { "rank": 2, "suit": "hearts" }, "multiplier": 1 }),
        );
        let high = snapshot(
            FeatureKind::HigherLower,
            serde_json::json!({ "current": { "rank": 11, "suit": "clubs" }, "multiplier": 2 }),
        );
        assert_eq!(
            player.next_action(&low),
            FeatureAction::Guess {
                direction: Direction::Higher
            }
        );
        assert_eq!(
            player.next_action(&high),
            FeatureAction::Guess {
                direction: Direction::Lower
            }
        );
    }

    #[test]
    fn test_gamble_rounds_limit() {
        let mut player = AutoPlayer::new(BetStrategy::Minimum, 1, 1);
        let fresh = snapshot(FeatureKind::Gamble, serde_json::json!({ "rounds_won": 0 }));
        let won = snapshot(FeatureKind::Gamble, serde_json::json!({ "rounds_won": 1 }));
        assert!(matches!(
            player.next_action(&fresh),
            FeatureAction::GuessColor { .. }
        ));
        assert_eq!(player.next_action(&won), FeatureAction::Collect);

        let mut cautious = AutoPlayer::new(BetStrategy::Minimum, 0, 1);
        assert_eq!(cautious.next_action(&fresh), FeatureAction::Collect);
    }

    #[test]
    fn test_bet_strategies() {
        let mut session = SlotSession::instant(1);
        let max = AutoPlayer::new(BetStrategy::Maximum, 0, 1);
        assert_eq!(max.place_bet(&mut session), 10);

        session.set_balance(4);
        assert_eq!(max.place_bet(&mut session), 4);

        let fixed = AutoPlayer::new(BetStrategy::Fixed(3), 0, 1);
        assert_eq!(fixed.place_bet(&mut session), 3);
    }
}
