//! Batch simulator tests
//!
//! Whole runs through the rayon pool: determinism, aggregation and the
//! auto-player keeping every session moving.

use lr_sim::{BetStrategy, SimConfig, SimError, Simulator};
use lr_stage::FeatureKind;

fn small(seed: u64) -> SimConfig {
    SimConfig::ci()
        .with_sessions(6)
        .with_spins(120)
        .with_seed(seed)
        .with_threads(3)
}

// ═══════════════════════════════════════════════════════════════════════════════
// DETERMINISM
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_same_seed_same_totals() {
    let a = Simulator::new(small(11)).unwrap().run().unwrap();
    let b = Simulator::new(small(11)).unwrap().run().unwrap();

    assert_eq!(a.summary.total_spins, b.summary.total_spins);
    assert_eq!(a.summary.total_bet, b.summary.total_bet);
    assert_eq!(a.summary.total_won, b.summary.total_won);
    assert_eq!(a.summary.features, b.summary.features);
    for (x, y) in a.sessions.iter().zip(&b.sessions) {
        assert_eq!(x.final_balance, y.final_balance);
        assert_eq!(x.final_level, y.final_level);
    }
}

#[test]
fn test_thread_count_does_not_change_results() {
    let single = Simulator::new(small(5).with_threads(1)).unwrap().run().unwrap();
    let many = Simulator::new(small(5).with_threads(4)).unwrap().run().unwrap();
    assert_eq!(single.summary.total_won, many.summary.total_won);
    assert_eq!(single.summary.total_spins, many.summary.total_spins);
}

// ═══════════════════════════════════════════════════════════════════════════════
// AGGREGATION
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_every_session_reported_in_order() {
    let report = Simulator::new(small(3)).unwrap().run().unwrap();
    assert_eq!(report.sessions.len(), 6);
    assert_eq!(report.summary.sessions, 6);
    for (i, session) in report.sessions.iter().enumerate() {
        assert_eq!(session.index, i);
        assert_eq!(session.seed, 3 + i as u64);
        assert!(session.stats.total_spins >= 120);
    }
    let summed: u64 = report.sessions.iter().map(|s| s.stats.total_won).sum();
    assert_eq!(report.summary.total_won, summed);
}

#[test]
fn test_rtp_matches_totals() {
    let report = Simulator::new(small(21)).unwrap().run().unwrap();
    let s = &report.summary;
    assert!(s.total_bet > 0);
    approx::assert_relative_eq!(
        s.rtp(),
        s.total_won as f64 / s.total_bet as f64 * 100.0,
        epsilon = 1e-9
    );
    assert!(s.hit_rate() > 0.0 && s.hit_rate() < 100.0);
}

#[test]
fn test_long_run_visits_features() {
    let config = SimConfig::ci()
        .with_sessions(4)
        .with_spins(600)
        .with_seed(99)
        .with_threads(2);
    let report = Simulator::new(config).unwrap().run().unwrap();
    let s = &report.summary;

    assert!(s.features.get(&FeatureKind::Gamble).copied().unwrap_or(0) > 0);
    assert_eq!(s.rejected_actions, 0);
    assert!(s.total_won > 0);
    assert!(s.highest_level >= 1);
}

#[test]
fn test_max_bet_strategy_wagers_more() {
    let min = Simulator::new(small(8)).unwrap().run().unwrap();
    let max = Simulator::new(small(8).with_bet(BetStrategy::Maximum))
        .unwrap()
        .run()
        .unwrap();
    assert!(max.summary.total_bet > min.summary.total_bet);
}

#[test]
fn test_report_serializes() {
    let report = Simulator::new(small(1).with_sessions(2)).unwrap().run().unwrap();
    let json = report.to_json().unwrap();
    assert!(json.contains("\"summary\""));
    assert!(report.to_text().contains("RTP:"));
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONFIG
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_zero_spins_rejected() {
    assert!(matches!(
        Simulator::new(SimConfig::ci().with_spins(0)),
        Err(SimError::InvalidConfig(_))
    ));
}
