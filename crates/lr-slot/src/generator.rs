//! Spin generator — draws a reel grid for every spin
//!
//! Regular spins draw every cell independently from the level's weight
//! table. Free spins bias the grid toward a single winning symbol and,
//! after enough scoreless free spins in a row, force a premium middle-row
//! win.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::symbols::{ROWS, ReelGrid, Symbol};
use crate::weights::SymbolWeightTable;

/// RNG used across the engine (seedable, portable)
pub type SlotRng = ChaCha8Rng;

/// Build the engine RNG, seeded when reproducibility is wanted
pub fn slot_rng(seed: Option<u64>) -> SlotRng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_os_rng(),
    }
}

/// Chance that a spin takes the "win draw" path
pub const BASE_WIN_CHANCE: f64 = 0.95;

/// Boost applied to free spins before the cap
pub const FREE_SPIN_WIN_BOOST: f64 = 0.20;

/// Probability that a non-middle row repeats the free-spin winning symbol
pub const FREE_SPIN_ROW_BIAS: f64 = 0.8;

/// Candidates for a forced free-spin win
pub const FORCED_WIN_SYMBOLS: [Symbol; 4] = [
    Symbol::Diamond,
    Symbol::Seven,
    Symbol::SlotMachine,
    Symbol::Star,
];

/// Default number of scoreless free spins before a forced win
pub const DEFAULT_FORCED_WIN_AFTER: u32 = 2;

/// Reels on screen at `level`
pub fn reel_count(level: u32) -> usize {
    if level >= 18 {
        5
    } else if level >= 10 {
        4
    } else {
        3
    }
}

/// Draws reel grids
#[derive(Debug, Clone)]
pub struct SpinGenerator {
    /// Scoreless free spins that force the next one to win
    forced_win_after: u32,
}

impl SpinGenerator {
    pub fn new(forced_win_after: u32) -> Self {
        Self { forced_win_after }
    }

    pub fn forced_win_after(&self) -> u32 {
        self.forced_win_after
    }

    /// Whether the next free spin must win
    pub fn is_forced_win(&self, free_spin: bool, free_loss_streak: u32) -> bool {
        free_spin && free_loss_streak >= self.forced_win_after
    }

    /// Probability of taking the win-draw path.
    ///
    /// The free-spin boost is capped back to the base chance, so outside a
    /// forced win free spins use the same 0.95 as regular spins.
    pub fn win_chance(&self, free_spin: bool, free_loss_streak: u32) -> f64 {
        if !free_spin {
            BASE_WIN_CHANCE
        } else if self.is_forced_win(free_spin, free_loss_streak) {
            1.0
        } else {
            (BASE_WIN_CHANCE + FREE_SPIN_WIN_BOOST).min(BASE_WIN_CHANCE)
        }
    }

    /// Draw the grid for one spin
    pub fn spin<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        level: u32,
        free_spin: bool,
        free_loss_streak: u32,
    ) -> ReelGrid {
        let width = reel_count(level);
        let table = SymbolWeightTable::for_level(level, free_spin);
        let forced = self.is_forced_win(free_spin, free_loss_streak);

        let reels: Vec<[Symbol; ROWS]> =
            if rng.random::<f64>() < self.win_chance(free_spin, free_loss_streak) {
                if free_spin {
                    let winning = if forced {
                        FORCED_WIN_SYMBOLS[rng.random_range(0..FORCED_WIN_SYMBOLS.len())]
                    } else {
                        table.draw(rng)
                    };
                    (0..width)
                        .map(|_| biased_reel(rng, &table, winning))
                        .collect()
                } else {
                    (0..width).map(|_| random_reel(rng, &table)).collect()
                }
            } else {
                (0..width).map(|_| random_reel(rng, &table)).collect()
            };
        ReelGrid::new(reels)
    }
}

impl Default for SpinGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_FORCED_WIN_AFTER)
    }
}

fn random_reel<R: Rng + ?Sized>(rng: &mut R, table: &SymbolWeightTable) -> [Symbol; ROWS] {
    [table.draw(rng), table.draw(rng), table.draw(rng)]
}

/// Free-spin reel: middle row carries the winning symbol, the others
/// usually repeat it
fn biased_reel<R: Rng + ?Sized>(
    rng: &mut R,
    table: &SymbolWeightTable,
    winning: Symbol,
) -> [Symbol; ROWS] {
    let mut reel = [winning; ROWS];
    for (row, cell) in reel.iter_mut().enumerate() {
        if row == 1 {
            continue;
        }
        if rng.random::<f64>() >= FREE_SPIN_ROW_BIAS {
            *cell = table.draw(rng);
        }
    }
    reel
}
