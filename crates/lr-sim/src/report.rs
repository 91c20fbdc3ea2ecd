//! Simulation reporting

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use lr_slot::SessionStats;
use lr_stage::FeatureKind;

/// Outcome of one simulated session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Position in the run
    pub index: usize,
    /// Seed the session was built with
    pub seed: u64,
    pub final_balance: i64,
    pub final_level: u32,
    /// Mini-game actions rejected by the session
    pub rejected_actions: u64,
    pub stats: SessionStats,
}

/// Aggregate over every session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSummary {
    pub sessions: usize,
    pub total_spins: u64,
    pub free_spins_played: u64,
    pub total_bet: u64,
    pub total_debited: u64,
    pub total_won: u64,
    pub line_wins: u64,
    pub losses: u64,
    pub free_spins_awarded: u64,
    pub level_ups: u64,
    pub resets: u64,
    pub rejected_actions: u64,
    pub highest_level: u32,
    pub features: BTreeMap<FeatureKind, u64>,
}

impl SimSummary {
    /// Return to player, percent
    pub fn rtp(&self) -> f64 {
        if self.total_bet > 0 {
            (self.total_won as f64 / self.total_bet as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Line-win spins, percent of all spins
    pub fn hit_rate(&self) -> f64 {
        if self.total_spins > 0 {
            (self.line_wins as f64 / self.total_spins as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Spins per entry of `feature` (None if it never triggered)
    pub fn spins_per_feature(&self, feature: FeatureKind) -> Option<f64> {
        match self.features.get(&feature) {
            Some(&count) if count > 0 => Some(self.total_spins as f64 / count as f64),
            _ => None,
        }
    }

    fn absorb(&mut self, session: &SessionSummary) {
        let stats = &session.stats;
        self.sessions += 1;
        self.total_spins += stats.total_spins;
        self.free_spins_played += stats.free_spins_played;
        self.total_bet += stats.total_bet;
        self.total_debited += stats.total_debited;
        self.total_won += stats.total_won;
        self.line_wins += stats.line_wins;
        self.losses += stats.losses;
        self.free_spins_awarded += stats.free_spins_awarded;
        self.level_ups += stats.level_ups;
        self.resets += stats.resets;
        self.rejected_actions += session.rejected_actions;
        self.highest_level = self.highest_level.max(stats.max_level);
        for (feature, count) in &stats.features {
            *self.features.entry(*feature).or_insert(0) += count;
        }
    }
}

/// Simulation report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimReport {
    pub title: String,
    /// RFC 3339 creation time
    pub timestamp: String,
    pub base_seed: u64,
    pub summary: SimSummary,
    pub sessions: Vec<SessionSummary>,
}

impl SimReport {
    pub fn new(title: &str, base_seed: u64) -> Self {
        Self {
            title: title.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            base_seed,
            summary: SimSummary::default(),
            sessions: Vec::new(),
        }
    }

    pub fn add_session(&mut self, session: SessionSummary) {
        self.summary.absorb(&session);
        self.sessions.push(session);
    }

    /// Order sessions by index; workers finish in any order
    pub fn finalize(&mut self) {
        self.sessions.sort_by_key(|s| s.index);
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_text(&self) -> String {
        let s = &self.summary;
        let mut out = String::new();

        let _ = writeln!(out, "═══ {} ═══", self.title);
        let _ = writeln!(out, "Generated: {}", self.timestamp);
        let _ = writeln!(out, "Base seed: {}", self.base_seed);
        let _ = writeln!(out);
        let _ = writeln!(out, "Sessions:        {}", s.sessions);
        let _ = writeln!(out, "Spins:           {}", s.total_spins);
        let _ = writeln!(out, "  free:          {}", s.free_spins_played);
        let _ = writeln!(out, "Wagered:         {}", s.total_bet);
        let _ = writeln!(out, "  debited:       {}", s.total_debited);
        let _ = writeln!(out, "Won:             {}", s.total_won);
        let _ = writeln!(out, "RTP:             {:.2}%", s.rtp());
        let _ = writeln!(out, "Hit rate:        {:.2}%", s.hit_rate());
        let _ = writeln!(out, "Level-ups:       {}", s.level_ups);
        let _ = writeln!(out, "Highest level:   {}", s.highest_level);
        let _ = writeln!(out, "Game-over resets: {}", s.resets);

        if !s.features.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Features:");
            for (feature, count) in &s.features {
                let every = s
                    .spins_per_feature(*feature)
                    .map(|n| format!("1 in {:.1}", n))
                    .unwrap_or_default();
                let _ = writeln!(out, "  {:<14} {:>8}  {}", feature.to_string(), count, every);
            }
        }

        if s.rejected_actions > 0 {
            let _ = writeln!(out);
            let _ = writeln!(out, "Rejected mini-game actions: {}", s.rejected_actions);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(index: usize, won: u64, bet: u64, level: u32) -> SessionSummary {
        let mut stats = SessionStats {
            total_spins: bet,
            total_bet: bet,
            total_won: won,
            max_level: level,
            ..Default::default()
        };
        stats.features.insert(FeatureKind::Gamble, 2);
        SessionSummary {
            index,
            seed: index as u64,
            final_balance: 100,
            final_level: level,
            rejected_actions: 0,
            stats,
        }
    }

    #[test]
    fn test_aggregation() {
        let mut report = SimReport::new("test", 0);
        report.add_session(summary(1, 30, 50, 4));
        report.add_session(summary(0, 60, 50, 7));
        report.finalize();

        assert_eq!(report.sessions[0].index, 0);
        assert_eq!(report.summary.sessions, 2);
        assert_eq!(report.summary.total_bet, 100);
        assert_eq!(report.summary.highest_level, 7);
        assert_eq!(report.summary.features[&FeatureKind::Gamble], 4);
        assert!((report.summary.rtp() - 90.0).abs() < 1e-9);
        assert_eq!(
            report.summary.spins_per_feature(FeatureKind::Gamble),
            Some(25.0)
        );
        assert_eq!(report.summary.spins_per_feature(FeatureKind::SnakeBoard), None);
    }

    #[test]
    fn test_text_output() {
        let mut report = SimReport::new("LuckyReels", 9);
        report.add_session(summary(0, 10, 20, 2));
        let text = report.to_text();
        assert!(text.contains("LuckyReels"));
        assert!(text.contains("RTP:             50.00%"));
        assert!(text.contains("Features:"));
    }

    #[test]
    fn test_json_output() {
        let report = SimReport::new("empty", 3);
        let json = report.to_json().unwrap();
        assert!(json.contains("\"base_seed\": 3"));
    }
}
