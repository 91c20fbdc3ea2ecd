//! Paytable
//!
//! A line pays `ceil(bet × symbol multiplier × match bonus)`. The symbol
//! multiplier is the base value for the symbol at the current level times
//! the level escalators; the match bonus rewards 4- and 5-symbol rows on
//! the wider grids.

use serde::{Deserialize, Serialize};

use lr_stage::{WinLine, WinRow};

use crate::evaluator::LineMatch;
use crate::symbols::Symbol;

/// Multiplier for symbols without a paytable entry
pub const DEFAULT_MULTIPLIER: f64 = 8.0;

/// Base 3-match multiplier for `symbol` at `level`
pub fn base_multiplier(symbol: Symbol, level: u32) -> f64 {
    let fruit = |tiers: [f64; 3]| {
        if level <= 4 {
            tiers[0]
        } else if level <= 10 {
            tiers[1]
        } else {
            tiers[2]
        }
    };

    match symbol {
        Symbol::Diamond => 15.0,
        Symbol::Seven => 12.0,
        Symbol::SlotMachine => 10.0,
        Symbol::Cherry => fruit([10.0, 8.0, 6.0]),
        Symbol::Lemon => fruit([8.0, 7.0, 5.0]),
        Symbol::Orange => fruit([7.0, 6.0, 4.0]),
        _ => DEFAULT_MULTIPLIER,
    }
}

/// Base multiplier with the level escalators applied
pub fn symbol_multiplier(symbol: Symbol, level: u32) -> f64 {
    let mut multiplier = base_multiplier(symbol, level);
    if level >= 12 {
        multiplier *= 1.3;
    }
    if level >= 16 {
        multiplier *= 1.4;
    }
    if level >= 20 {
        let extra_levels = level - 20;
        multiplier *= 1.0 + (extra_levels / 5) as f64 * 0.15;
    }
    multiplier
}

/// Bonus for long rows on wide grids
pub fn match_bonus(match_count: u8, level: u32) -> f64 {
    if level >= 18 && match_count == 5 {
        4.0
    } else if level >= 10 && match_count == 4 {
        2.5
    } else {
        1.0
    }
}

/// Credits paid by one line
pub fn line_payout(symbol: Symbol, match_count: u8, level: u32, bet: u64) -> u64 {
    let amount = bet as f64 * symbol_multiplier(symbol, level) * match_bonus(match_count, level);
    amount.ceil().max(0.0) as u64
}

/// A priced line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineWin {
    pub row: WinRow,
    pub symbol: Symbol,
    pub match_count: u8,
    pub amount: u64,
}

impl LineWin {
    pub fn to_win_line(&self) -> WinLine {
        WinLine::new(self.row, self.symbol.id(), self.match_count, self.amount)
    }
}

/// All priced lines of a spin
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub lines: Vec<LineWin>,
    pub total: u64,
}

impl Payout {
    /// Price every match; the total is the sum of individually ceiled lines
    pub fn price(matches: &[LineMatch], level: u32, bet: u64) -> Self {
        let lines: Vec<LineWin> = matches
            .iter()
            .map(|m| LineWin {
                row: m.row,
                symbol: m.symbol,
                match_count: m.count,
                amount: line_payout(m.symbol, m.count, level, bet),
            })
            .collect();
        let total = lines.iter().map(|l| l.amount).sum();
        Self { lines, total }
    }

    pub fn is_win(&self) -> bool {
        self.total > 0
    }

    pub fn win_lines(&self) -> Vec<WinLine> {
        self.lines.iter().map(LineWin::to_win_line).collect()
    }
}

/// One row of the player-facing paytable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaytableEntry {
    pub symbol: Symbol,
    /// Effective 3-match multiplier at this level
    pub multiplier: f64,
}

/// Player-facing paytable for a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayTable {
    pub level: u32,
    pub entries: Vec<PaytableEntry>,
}

impl PayTable {
    /// Paying symbols available at `level`, highest paying first
    pub fn for_level(level: u32) -> Self {
        let mut symbols = Vec::new();
        if level >= 4 {
            symbols.extend([Symbol::Diamond, Symbol::Seven]);
        }
        if level >= 5 {
            symbols.push(Symbol::SlotMachine);
        }
        symbols.extend([Symbol::Cherry, Symbol::Lemon, Symbol::Orange]);

        let entries = symbols
            .into_iter()
            .map(|symbol| PaytableEntry {
                symbol,
                multiplier: symbol_multiplier(symbol, level),
            })
            .collect();
        Self { level, entries }
    }

    pub fn multiplier(&self, symbol: Symbol) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.symbol == symbol)
            .map(|e| e.multiplier)
    }
}
