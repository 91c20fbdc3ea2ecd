//! Level-gated symbol weights
//!
//! Fruits are always on the reels and thin out as the level rises. Feature
//! symbols join at their unlock level and are scaled down on wider grids so
//! that more cells do not mean proportionally more triggers. Premium symbols
//! are flat.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::generator::reel_count;
use crate::symbols::Symbol;

/// Weighted symbol distribution for one level and spin mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolWeightTable {
    /// Draw order matters: the cumulative walk goes front to back
    entries: Vec<(Symbol, u32)>,
    total: u32,
}

impl SymbolWeightTable {
    /// Build the table for `level`; free spins never carry dice
    pub fn for_level(level: u32, is_free_spin: bool) -> Self {
        let reel_multiplier = reel_multiplier(reel_count(level));
        let scaled = |base: u32| (base as f64 * reel_multiplier).floor() as u32;

        let mut entries = vec![
            (Symbol::Cherry, fruit_weight(level, [100, 80, 60, 40])),
            (Symbol::Lemon, fruit_weight(level, [85, 65, 45, 35])),
            (Symbol::Orange, fruit_weight(level, [65, 50, 35, 25])),
        ];

        if level >= 2 {
            let base = if level >= 10 {
                20
            } else if level >= 6 {
                25
            } else {
                20
            };
            entries.push((Symbol::Snake, scaled(base)));
        }

        if level >= 3 {
            let base = if level >= 10 {
                18
            } else if level >= 7 {
                20
            } else {
                15
            };
            entries.push((Symbol::Star, scaled(base)));
        }

        if level >= 5 && !is_free_spin {
            let base = if level >= 10 {
                22
            } else if level >= 6 {
                20
            } else {
                15
            };
            entries.push((Symbol::Dice, scaled(base)));
        }

        if level >= 8 {
            entries.push((Symbol::Card, scaled(if level >= 10 { 18 } else { 15 })));
        }

        if level >= 12 {
            entries.push((Symbol::Ticket, scaled(if level >= 15 { 18 } else { 15 })));
        }

        if level >= 4 {
            let top_premium = if level >= 16 {
                25
            } else if level >= 12 {
                20
            } else {
                15
            };
            entries.push((Symbol::Diamond, top_premium));
            entries.push((Symbol::Seven, top_premium));
        }

        if level >= 5 {
            entries.push((Symbol::SlotMachine, if level >= 13 { 20 } else { 15 }));
        }

        let total = entries.iter().map(|(_, w)| w).sum();
        Self { entries, total }
    }

    /// Symbols with their weights, in draw order
    pub fn entries(&self) -> &[(Symbol, u32)] {
        &self.entries
    }

    pub fn weight(&self, symbol: Symbol) -> Option<u32> {
        self.entries
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|(_, w)| *w)
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.weight(symbol).is_some()
    }

    pub fn total_weight(&self) -> u32 {
        self.total
    }

    /// Probability of drawing `symbol`
    pub fn probability(&self, symbol: Symbol) -> f64 {
        match self.weight(symbol) {
            Some(w) if self.total > 0 => w as f64 / self.total as f64,
            _ => 0.0,
        }
    }

    /// Draw one symbol
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Symbol {
        self.pick(rng.random::<f64>())
    }

    /// Map a uniform roll in `[0, 1)` onto the cumulative weights
    pub fn pick(&self, roll: f64) -> Symbol {
        let mut remaining = roll * self.total as f64;
        for &(symbol, weight) in &self.entries {
            remaining -= weight as f64;
            if remaining <= 0.0 {
                return symbol;
            }
        }
        Symbol::Cherry
    }
}

/// Feature weights shrink on wider grids
pub fn reel_multiplier(reels: usize) -> f64 {
    if reels >= 5 {
        0.7
    } else if reels >= 4 {
        0.8
    } else {
        1.0
    }
}

/// Fruit tiers step at levels 3 / 6 / 10
fn fruit_weight(level: u32, tiers: [u32; 4]) -> u32 {
    if level <= 3 {
        tiers[0]
    } else if level <= 6 {
        tiers[1]
    } else if level <= 10 {
        tiers[2]
    } else {
        tiers[3]
    }
}
