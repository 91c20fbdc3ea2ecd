//! Bonus Board — pick three of twelve hidden prizes (star trigger)

use rand::Rng;
use serde::{Deserialize, Serialize};

use lr_stage::FeatureKind;

use crate::generator::SlotRng;

use super::{
    ActivationContext, FeatureAction, FeatureChapter, FeatureError, FeatureSnapshot,
    FeatureState, FeatureStep,
};

/// Tiles on the board
pub const TILE_COUNT: usize = 12;

/// Picks per round
pub const PICKS: u8 = 3;

/// Premium tile multiplier
pub const PREMIUM_MULTIPLIER: f64 = 1.3;

/// A hidden prize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusTile {
    pub prize: u64,
    pub revealed: bool,
}

/// Prize scaling with level beyond 3
pub fn level_multiplier(level: u32) -> f64 {
    if level <= 3 {
        1.0
    } else {
        1.0 + (level - 3) as f64 * 0.03
    }
}

/// Chance a tile is premium
pub fn premium_chance(level: u32) -> f64 {
    if level >= 10 {
        0.15
    } else if level >= 5 {
        0.08
    } else {
        0.03
    }
}

/// Bonus on the summed picks
pub fn completion_bonus(total: u64, level: u32) -> u64 {
    let factor = if level >= 15 {
        1.15
    } else if level >= 10 {
        1.1
    } else if level >= 5 {
        1.05
    } else {
        return total;
    };
    (total as f64 * factor).floor() as u64
}

/// Bonus Board Chapter
pub struct BonusBoardChapter {
    tiles: Vec<BonusTile>,
    picks_left: u8,
    level: u32,
    state: FeatureState,
}

impl BonusBoardChapter {
    /// Deal a fresh board
    pub fn start(context: &ActivationContext, rng: &mut SlotRng) -> Self {
        let level_mult = level_multiplier(context.level);
        let premium = premium_chance(context.level);
        let prizes = (0..TILE_COUNT)
            .map(|_| {
                let base = rng.random_range(2..=7) as f64;
                let premium_mult = if rng.random::<f64>() < premium {
                    PREMIUM_MULTIPLIER
                } else {
                    1.0
                };
                (base * context.bet as f64 * level_mult * premium_mult).floor() as u64
            })
            .collect();
        Self::with_prizes(prizes, context.level)
    }

    /// Board with known prizes
    pub fn with_prizes(prizes: Vec<u64>, level: u32) -> Self {
        Self {
            tiles: prizes
                .into_iter()
                .map(|prize| BonusTile {
                    prize,
                    revealed: false,
                })
                .collect(),
            picks_left: PICKS,
            level,
            state: FeatureState::Active,
        }
    }

    pub fn tiles(&self) -> &[BonusTile] {
        &self.tiles
    }

    pub fn picks_left(&self) -> u8 {
        self.picks_left
    }

    /// Sum of revealed prizes before the completion bonus
    pub fn revealed_total(&self) -> u64 {
        self.tiles
            .iter()
            .filter(|t| t.revealed)
            .map(|t| t.prize)
            .sum()
    }

    fn pick(&mut self, index: usize) -> Result<FeatureStep, FeatureError> {
        let len = self.tiles.len();
        let tile = self
            .tiles
            .get_mut(index)
            .ok_or(FeatureError::OutOfRange { index, len })?;
        if tile.revealed {
            return Err(FeatureError::AlreadyRevealed(index));
        }
        tile.revealed = true;
        self.picks_left = self.picks_left.saturating_sub(1);

        if self.picks_left > 0 {
            return Ok(FeatureStep::Continue);
        }

        let payout = completion_bonus(self.revealed_total(), self.level);
        self.state = FeatureState::Resolved { payout };
        Ok(FeatureStep::Complete { payout })
    }
}

impl FeatureChapter for BonusBoardChapter {
    fn kind(&self) -> FeatureKind {
        FeatureKind::BonusBoard
    }

    fn state(&self) -> FeatureState {
        self.state
    }

    fn snapshot(&self) -> FeatureSnapshot {
        let tiles: Vec<Option<u64>> = self
            .tiles
            .iter()
            .map(|t| t.revealed.then_some(t.prize))
            .collect();
        FeatureSnapshot {
            feature: self.kind(),
            state: self.state,
            data: serde_json::json!({
                "tiles": tiles,
                "picks_left": self.picks_left,
            }),
        }
    }

    fn apply_action(
        &mut self,
        action: FeatureAction,
        _rng: &mut SlotRng,
    ) -> Result<FeatureStep, FeatureError> {
        match action {
            FeatureAction::Pick { index } => self.pick(index),
            other => Err(FeatureError::unsupported(self.kind(), &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::slot_rng;

    #[test]
    fn test_dealt_prizes_in_range() {
        let mut rng = slot_rng(Some(3));
        let board = BonusBoardChapter::start(&ActivationContext::new(2, 1), &mut rng);
        assert_eq!(board.tiles().len(), TILE_COUNT);
        for tile in board.tiles() {
            // 2..=7 × bet 2, premium at most ×1.3
            assert!(tile.prize >= 4 && tile.prize <= 18, "prize {}", tile.prize);
        }
    }

    #[test]
    fn test_three_picks_complete() {
        let mut rng = slot_rng(Some(0));
        let mut board = BonusBoardChapter::with_prizes(vec![2, 3, 4, 5, 6, 7, 2, 3, 4, 5, 6, 7], 1);
        assert_eq!(board.play(FeatureAction::Pick { index: 0 }, &mut rng), Ok(FeatureStep::Continue));
        assert_eq!(board.play(FeatureAction::Pick { index: 5 }, &mut rng), Ok(FeatureStep::Continue));
        assert_eq!(
            board.play(FeatureAction::Pick { index: 11 }, &mut rng),
            Ok(FeatureStep::Complete { payout: 16 })
        );
        assert_eq!(board.payout(), Some(16));
    }

    #[test]
    fn test_level_bonus_applied_to_total() {
        let mut rng = slot_rng(Some(0));
        let mut board = BonusBoardChapter::with_prizes(vec![10; TILE_COUNT], 15);
        board.play(FeatureAction::Pick { index: 0 }, &mut rng).unwrap();
        board.play(FeatureAction::Pick { index: 1 }, &mut rng).unwrap();
        let step = board.play(FeatureAction::Pick { index: 2 }, &mut rng).unwrap();
        // floor(30 × 1.15) = 34
        assert_eq!(step, FeatureStep::Complete { payout: 34 });
        assert_eq!(completion_bonus(30, 4), 30);
        assert_eq!(completion_bonus(30, 5), 31);
        assert_eq!(completion_bonus(30, 10), 33);
    }

    #[test]
    fn test_invalid_picks() {
        let mut rng = slot_rng(Some(0));
        let mut board = BonusBoardChapter::with_prizes(vec![1; TILE_COUNT], 1);
        board.play(FeatureAction::Pick { index: 4 }, &mut rng).unwrap();
        assert_eq!(
            board.play(FeatureAction::Pick { index: 4 }, &mut rng),
            Err(FeatureError::AlreadyRevealed(4))
        );
        assert_eq!(
            board.play(FeatureAction::Pick { index: 12 }, &mut rng),
            Err(FeatureError::OutOfRange { index: 12, len: 12 })
        );
        assert!(matches!(
            board.play(FeatureAction::Roll, &mut rng),
            Err(FeatureError::UnsupportedAction { .. })
        ));
        assert_eq!(board.picks_left(), 2);
    }

    #[test]
    fn test_snapshot_hides_unrevealed_prizes() {
        let mut rng = slot_rng(Some(0));
        let mut board = BonusBoardChapter::with_prizes(vec![9; TILE_COUNT], 1);
        board.play(FeatureAction::Pick { index: 1 }, &mut rng).unwrap();
        let snapshot = board.snapshot();
        assert_eq!(snapshot.data["tiles"][0], serde_json::Value::Null);
        assert_eq!(snapshot.data["tiles"][1], 9);
        assert_eq!(snapshot.data["picks_left"], 2);
    }

    #[test]
    fn test_level_multiplier() {
        assert!((level_multiplier(3) - 1.0).abs() < 0.001);
        assert!((level_multiplier(13) - 1.3).abs() < 0.001);
        assert!((premium_chance(10) - 0.15).abs() < 0.001);
    }
}
