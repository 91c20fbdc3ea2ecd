//! Progression — experience, levels and what each level unlocks

use serde::{Deserialize, Serialize};

/// Level that starts the prestige tiers
pub const PRESTIGE_LEVEL: u32 = 20;

/// Levels that unlock something new
pub const UNLOCK_LEVELS: [u32; 8] = [2, 3, 4, 5, 8, 10, 14, 18];

/// XP needed to leave `level`
pub fn xp_needed(level: u32) -> u64 {
    let (base, growth) = if level <= 5 { (100.0, 1.5) } else { (75.0, 1.3) };
    let exponent = level.saturating_sub(1).min(i32::MAX as u32) as i32;
    (base * f64::powi(growth, exponent)).floor() as u64
}

/// Share of a win converted to XP
pub fn xp_rate(level: u32) -> f64 {
    if level <= 3 {
        0.5
    } else if level <= 10 {
        0.3
    } else {
        0.2
    }
}

/// XP earned by a win of `win_amount` at `level`
pub fn xp_gain(win_amount: u64, level: u32) -> u64 {
    let gain = (win_amount as f64 * xp_rate(level)).floor();
    let bonus = if win_amount >= 100 {
        1.1
    } else if win_amount >= 50 {
        1.05
    } else if win_amount >= 25 {
        1.02
    } else {
        return gain as u64;
    };
    (gain * bonus).round() as u64
}

/// Highest bet allowed at `level`
pub fn max_bet(level: u32) -> u64 {
    match level {
        0..=1 => 10,
        2 => 20,
        3 => 30,
        4..=7 => 40,
        8..=9 => 50,
        10..=12 => 100,
        13..=14 => 150,
        15..=17 => 200,
        18..=19 => 500,
        _ => 1000,
    }
}

/// Prestige tier, shown once past level 20
pub fn prestige(level: u32) -> Option<u32> {
    (level > PRESTIGE_LEVEL).then(|| (level - PRESTIGE_LEVEL) / 10)
}

/// Next level that unlocks something, or `level` itself when none remain
pub fn next_unlock_level(level: u32) -> u32 {
    UNLOCK_LEVELS
        .iter()
        .copied()
        .find(|&l| l > level)
        .unwrap_or(level)
}

/// Something a level unlocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unlock {
    BasicSlots,
    Gamble,
    SnakeBoard,
    FullReelView,
    BonusBoard,
    StarSymbol,
    PremiumSymbols,
    FreeSpins,
    AutoSpin,
    HigherLower,
    FourthReel,
    FourMatchBonus,
    ScratchCard,
    MultiLineWins,
    FifthReel,
    FiveMatchBonus,
}

impl Unlock {
    /// Level at which this becomes available
    pub fn level(&self) -> u32 {
        match self {
            Self::BasicSlots | Self::Gamble => 1,
            Self::SnakeBoard | Self::FullReelView => 2,
            Self::BonusBoard | Self::StarSymbol => 3,
            Self::PremiumSymbols => 4,
            Self::FreeSpins | Self::AutoSpin => 5,
            Self::HigherLower => 8,
            Self::FourthReel | Self::FourMatchBonus => 10,
            Self::ScratchCard => 12,
            Self::MultiLineWins => 14,
            Self::FifthReel | Self::FiveMatchBonus => 18,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::BasicSlots => "Basic Slots",
            Self::Gamble => "Gamble Feature",
            Self::SnakeBoard => "Snake Game",
            Self::FullReelView => "View All Positions",
            Self::BonusBoard => "Bonus Round",
            Self::StarSymbol => "Star Symbol",
            Self::PremiumSymbols => "Diamond & Seven Symbols",
            Self::FreeSpins => "Free Spins",
            Self::AutoSpin => "Auto-Spin",
            Self::HigherLower => "Higher/Lower Game",
            Self::FourthReel => "4th Reel",
            Self::FourMatchBonus => "Four Symbol Win Bonus",
            Self::ScratchCard => "Scratch Card Game",
            Self::MultiLineWins => "Multi-line Wins",
            Self::FifthReel => "5th Reel",
            Self::FiveMatchBonus => "Five Symbol Win Bonus",
        }
    }

    /// Every unlock, in level order
    pub const ALL: [Unlock; 16] = [
        Self::BasicSlots,
        Self::Gamble,
        Self::SnakeBoard,
        Self::FullReelView,
        Self::BonusBoard,
        Self::StarSymbol,
        Self::PremiumSymbols,
        Self::FreeSpins,
        Self::AutoSpin,
        Self::HigherLower,
        Self::FourthReel,
        Self::FourMatchBonus,
        Self::ScratchCard,
        Self::MultiLineWins,
        Self::FifthReel,
        Self::FiveMatchBonus,
    ];
}

/// Everything available at `level`
pub fn unlocked_features(level: u32) -> Vec<Unlock> {
    Unlock::ALL
        .iter()
        .copied()
        .filter(|u| u.level() <= level)
        .collect()
}

/// Outcome of granting XP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpGrant {
    /// XP added by this grant
    pub gained: u64,
    /// XP after the grant (remainder after a level-up)
    pub xp: u64,
    /// Level after the grant
    pub level: u32,
    pub leveled_up: bool,
}

/// Level and XP of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionTracker {
    level: u32,
    xp: u64,
}

impl ProgressionTracker {
    pub fn new() -> Self {
        Self { level: 1, xp: 0 }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn xp(&self) -> u64 {
        self.xp
    }

    /// XP needed to leave the current level
    pub fn xp_needed(&self) -> u64 {
        xp_needed(self.level)
    }

    /// Progress toward the next level, 0.0..1.0
    pub fn progress(&self) -> f64 {
        let needed = self.xp_needed();
        if needed == 0 {
            return 0.0;
        }
        (self.xp as f64 / needed as f64).min(1.0)
    }

    /// Convert a win into XP; at most one level is gained per call and
    /// the surplus carries over
    pub fn add_xp(&mut self, win_amount: u64) -> XpGrant {
        let gained = xp_gain(win_amount, self.level);
        let total = self.xp + gained;
        let needed = self.xp_needed();

        let leveled_up = total >= needed;
        if leveled_up {
            self.level += 1;
            self.xp = total - needed;
        } else {
            self.xp = total;
        }

        XpGrant {
            gained,
            xp: self.xp,
            level: self.level,
            leveled_up,
        }
    }

    pub fn max_bet(&self) -> u64 {
        max_bet(self.level)
    }

    pub fn prestige(&self) -> Option<u32> {
        prestige(self.level)
    }

    pub fn unlocked_features(&self) -> Vec<Unlock> {
        unlocked_features(self.level)
    }

    pub fn next_unlock_level(&self) -> u32 {
        next_unlock_level(self.level)
    }

    /// Jump to a level (scenario setup, tools)
    pub fn set_level(&mut self, level: u32) {
        self.level = level.max(1);
        self.xp = 0;
    }

    pub fn reset(&mut self) {
        self.level = 1;
        self.xp = 0;
    }
}

impl Default for ProgressionTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xp_thresholds() {
        assert_eq!(xp_needed(1), 100);
        assert_eq!(xp_needed(2), 150);
        assert_eq!(xp_needed(3), 225);
        assert_eq!(xp_needed(4), 337);
        assert_eq!(xp_needed(5), 506);
        // Curve switches to 75 × 1.3^(L-1) after level 5
        assert_eq!(xp_needed(6), 278);
        assert_eq!(xp_needed(10), 795);
    }

    #[test]
    fn test_xp_gain_with_bonuses() {
        assert_eq!(xp_gain(10, 1), 5);
        assert_eq!(xp_gain(1, 1), 0);
        // 30 × 0.5 = 15, × 1.02 = 15.3 → 15
        assert_eq!(xp_gain(30, 1), 15);
        // 60 × 0.3 = 18, × 1.05 = 18.9 → 19
        assert_eq!(xp_gain(60, 5), 19);
        // 200 × 0.2 = 40, × 1.1 = 44
        assert_eq!(xp_gain(200, 11), 44);
    }

    #[test]
    fn test_max_bet_table() {
        let expected = [
            (1, 10),
            (2, 20),
            (3, 30),
            (4, 40),
            (7, 40),
            (8, 50),
            (9, 50),
            (10, 100),
            (12, 100),
            (13, 150),
            (14, 150),
            (15, 200),
            (17, 200),
            (18, 500),
            (19, 500),
            (20, 1000),
            (99, 1000),
        ];
        for (level, bet) in expected {
            assert_eq!(max_bet(level), bet, "level {level}");
        }
    }

    #[test]
    fn test_max_bet_non_decreasing() {
        for level in 1..100 {
            assert!(max_bet(level + 1) >= max_bet(level));
        }
    }

    #[test]
    fn test_single_level_per_grant() {
        let mut tracker = ProgressionTracker::new();
        // 1000 × 0.5 × 1.1 = 550 XP, enough for several levels
        let grant = tracker.add_xp(1000);
        assert!(grant.leveled_up);
        assert_eq!(grant.level, 2);
        assert_eq!(grant.xp, 450);
        assert_eq!(tracker.level(), 2);
    }

    #[test]
    fn test_add_xp_never_regresses() {
        let mut tracker = ProgressionTracker::new();
        let mut level = tracker.level();
        for win in [10, 0, 250, 40, 1000, 5, 3000, 7, 12, 800] {
            let grant = tracker.add_xp(win);
            assert!(grant.level == level || grant.level == level + 1);
            level = grant.level;
        }
    }

    #[test]
    fn test_exact_threshold_levels_up_with_zero_remainder() {
        let mut tracker = ProgressionTracker::new();
        tracker.add_xp(180); // 90 × 1.1 = 99
        assert_eq!(tracker.xp(), 99);
        let grant = tracker.add_xp(2); // +1
        assert!(grant.leveled_up);
        assert_eq!(grant.xp, 0);
    }

    #[test]
    fn test_unlocks() {
        assert_eq!(unlocked_features(1), vec![Unlock::BasicSlots, Unlock::Gamble]);
        assert!(unlocked_features(5).contains(&Unlock::AutoSpin));
        assert!(!unlocked_features(13).contains(&Unlock::MultiLineWins));
        assert_eq!(unlocked_features(18).len(), Unlock::ALL.len());
    }

    #[test]
    fn test_next_unlock_level() {
        assert_eq!(next_unlock_level(1), 2);
        assert_eq!(next_unlock_level(5), 8);
        assert_eq!(next_unlock_level(10), 14);
        assert_eq!(next_unlock_level(17), 18);
        assert_eq!(next_unlock_level(18), 18);
        assert_eq!(next_unlock_level(25), 25);
    }

    #[test]
    fn test_prestige() {
        assert_eq!(prestige(20), None);
        assert_eq!(prestige(21), Some(0));
        assert_eq!(prestige(30), Some(1));
        assert_eq!(prestige(45), Some(2));
    }

    #[test]
    fn test_progress_and_reset() {
        let mut tracker = ProgressionTracker::new();
        tracker.add_xp(20); // 10 XP
        assert!((tracker.progress() - 0.1).abs() < 0.001);
        tracker.reset();
        assert_eq!(tracker, ProgressionTracker::new());
    }
}
