//! Higher or Lower — guess the next card, double the multiplier (card trigger)

use rand::Rng;
use serde::{Deserialize, Serialize};

use lr_stage::FeatureKind;

use crate::generator::SlotRng;

use super::{
    ActivationContext, Direction, FeatureAction, FeatureChapter, FeatureError, FeatureSnapshot,
    FeatureState, FeatureStep,
};

pub const RANK_NAMES: [&str; 13] = [
    "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K", "A",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Self::Spades, Self::Hearts, Self::Diamonds, Self::Clubs];

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Spades => "♠",
            Self::Hearts => "♥",
            Self::Diamonds => "♦",
            Self::Clubs => "♣",
        }
    }
}

/// A playing card; rank 0 is a two, rank 12 an ace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub rank: u8,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: u8, suit: Suit) -> Self {
        Self {
            rank: rank.min(12),
            suit,
        }
    }

    pub fn deal(rng: &mut SlotRng) -> Self {
        Self {
            rank: rng.random_range(0..RANK_NAMES.len()) as u8,
            suit: Suit::ALL[rng.random_range(0..Suit::ALL.len())],
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", RANK_NAMES[self.rank as usize], self.suit.glyph())
    }
}

/// Higher/Lower Chapter
pub struct HigherLowerChapter {
    bet: u64,
    current: Card,
    last_drawn: Option<Card>,
    multiplier: u64,
    state: FeatureState,
}

impl HigherLowerChapter {
    pub fn start(context: &ActivationContext, rng: &mut SlotRng) -> Self {
        Self::with_card(context.bet, Card::deal(rng))
    }

    pub fn with_card(bet: u64, card: Card) -> Self {
        Self {
            bet,
            current: card,
            last_drawn: None,
            multiplier: 1,
            state: FeatureState::Active,
        }
    }

    pub fn current_card(&self) -> Card {
        self.current
    }

    pub fn multiplier(&self) -> u64 {
        self.multiplier
    }

    /// Amount a cash-out pays right now
    pub fn cash_out_value(&self) -> u64 {
        self.bet.saturating_mul(self.multiplier)
    }

    /// Resolve a guess against a drawn card; equal ranks lose
    pub fn guess_against(&mut self, direction: Direction, next: Card) -> FeatureStep {
        self.last_drawn = Some(next);
        let correct = match direction {
            Direction::Higher => next.rank > self.current.rank,
            Direction::Lower => next.rank < self.current.rank,
        };

        if correct {
            self.multiplier = self.multiplier.saturating_mul(2);
            self.current = next;
            FeatureStep::Continue
        } else {
            self.finish(0)
        }
    }

    fn finish(&mut self, payout: u64) -> FeatureStep {
        self.state = FeatureState::Resolved { payout };
        FeatureStep::Complete { payout }
    }
}

impl FeatureChapter for HigherLowerChapter {
    fn kind(&self) -> FeatureKind {
        FeatureKind::HigherLower
    }

    fn state(&self) -> FeatureState {
        self.state
    }

    fn snapshot(&self) -> FeatureSnapshot {
        FeatureSnapshot {
            feature: self.kind(),
            state: self.state,
            data: serde_json::json!({
                "current": self.current,
                "last_drawn": self.last_drawn,
                "multiplier": self.multiplier,
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
            FeatureAction::Guess { direction } => {
                let next = Card::deal(rng);
                Ok(self.guess_against(direction, next))
            }
            FeatureAction::Collect => Ok(self.finish(self.cash_out_value())),
            other => Err(FeatureError::unsupported(self.kind(), &other)),
        }
    }
}
