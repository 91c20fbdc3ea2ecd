//! Scratch Card — uncover three matching symbols within six scratches (ticket trigger)

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use lr_stage::FeatureKind;

use crate::generator::SlotRng;
use crate::symbols::Symbol;

use super::{
    ActivationContext, FeatureAction, FeatureChapter, FeatureError, FeatureSnapshot,
    FeatureState, FeatureStep,
};

pub const CELL_COUNT: usize = 9;

pub const SCRATCHES: u8 = 6;

/// Revealed matches needed to win
pub const MATCH_TARGET: usize = 3;

/// Chance the card is dealt as a winner
pub const WINNING_CARD_CHANCE: f64 = 0.4;

/// Symbols printed on scratch cards
pub const CARD_SYMBOLS: [Symbol; 5] = [
    Symbol::Diamond,
    Symbol::Seven,
    Symbol::SlotMachine,
    Symbol::Star,
    Symbol::Cherry,
];

/// Bet multiplier for three matching symbols
pub fn match_multiplier(symbol: Symbol) -> u64 {
    match symbol {
        Symbol::Diamond => 50,
        Symbol::Seven => 25,
        Symbol::SlotMachine => 15,
        Symbol::Star => 10,
        Symbol::Cherry => 5,
        _ => 3,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScratchCell {
    pub symbol: Symbol,
    pub scratched: bool,
}

/// Scratch Card Chapter
pub struct ScratchCardChapter {
    bet: u64,
    cells: Vec<ScratchCell>,
    scratches_left: u8,
    state: FeatureState,
}

impl ScratchCardChapter {
    pub fn start(context: &ActivationContext, rng: &mut SlotRng) -> Self {
        Self::with_cells(context.bet, deal_card(rng))
    }

    pub fn with_cells(bet: u64, symbols: Vec<Symbol>) -> Self {
        Self {
            bet,
            cells: symbols
                .into_iter()
                .map(|symbol| ScratchCell {
                    symbol,
                    scratched: false,
                })
                .collect(),
            scratches_left: SCRATCHES,
            state: FeatureState::Active,
        }
    }

    pub fn cells(&self) -> &[ScratchCell] {
        &self.cells
    }

    pub fn scratches_left(&self) -> u8 {
        self.scratches_left
    }

    /// Scratched cells showing `symbol`
    pub fn revealed_count(&self, symbol: Symbol) -> usize {
        self.cells
            .iter()
            .filter(|c| c.scratched && c.symbol == symbol)
            .count()
    }

    fn scratch(&mut self, index: usize) -> Result<FeatureStep, FeatureError> {
        let len = self.cells.len();
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(FeatureError::OutOfRange { index, len })?;
        if cell.scratched {
            return Err(FeatureError::AlreadyRevealed(index));
        }
        cell.scratched = true;
        let symbol = cell.symbol;
        self.scratches_left = self.scratches_left.saturating_sub(1);

        if self.revealed_count(symbol) >= MATCH_TARGET {
            let payout = self.bet.saturating_mul(match_multiplier(symbol));
            return Ok(self.finish(payout));
        }
        if self.scratches_left == 0 {
            return Ok(self.finish(0));
        }
        Ok(FeatureStep::Continue)
    }

    fn finish(&mut self, payout: u64) -> FeatureStep {
        self.state = FeatureState::Resolved { payout };
        FeatureStep::Complete { payout }
    }
}

/// Deal nine cells; a winning card plants copies of one symbol
pub fn deal_card(rng: &mut SlotRng) -> Vec<Symbol> {
    if rng.random::<f64>() >= WINNING_CARD_CHANCE {
        return (0..CELL_COUNT)
            .map(|_| CARD_SYMBOLS[rng.random_range(0..CARD_SYMBOLS.len())])
            .collect();
    }

    let winner = CARD_SYMBOLS[rng.random_range(0..CARD_SYMBOLS.len())];
    let planted = if rng.random::<f64>() < 0.2 {
        3
    } else if rng.random::<f64>() < 0.5 {
        2
    } else {
        1
    };

    let mut positions: Vec<usize> = (0..CELL_COUNT).collect();
    positions.shuffle(rng);
    let others: Vec<Symbol> = CARD_SYMBOLS
        .iter()
        .copied()
        .filter(|s| *s != winner)
        .collect();

    let mut cells = vec![winner; CELL_COUNT];
    for &pos in &positions[planted..] {
        cells[pos] = others[rng.random_range(0..others.len())];
    }
    cells
}

impl FeatureChapter for ScratchCardChapter {
    fn kind(&self) -> FeatureKind {
        FeatureKind::ScratchCard
    }

    fn state(&self) -> FeatureState {
        self.state
    }

    fn snapshot(&self) -> FeatureSnapshot {
        let cells: Vec<Option<Symbol>> = self
            .cells
            .iter()
            .map(|c| c.scratched.then_some(c.symbol))
            .collect();
        FeatureSnapshot {
            feature: self.kind(),
            state: self.state,
            data: serde_json::json!({
                "cells": cells,
                "scratches_left": self.scratches_left,
            }),
        }
    }

    fn apply_action(
        &mut self,
        action: FeatureAction,
        _rng: &mut SlotRng,
    ) -> Result<FeatureStep, FeatureError> {
        match action {
            FeatureAction::Scratch { index } => self.scratch(index),
            other => Err(FeatureError::unsupported(self.kind(), &other)),
        }
    }
}
