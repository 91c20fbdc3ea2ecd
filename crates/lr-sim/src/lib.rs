//! # lr-sim — LuckyReels Batch Simulator
//!
//! Plays many seeded sessions in parallel with an [`AutoPlayer`] making
//! every decision, and aggregates their statistics into a [`SimReport`].
//!
//! Sessions run with the instant timing profile, so a whole session is
//! driven by `spin` + `settle` without waiting on wall-clock time.
//!
//! ```text
//! SimConfig ──> Simulator ──> rayon pool
//!                                │  (one SlotSession + AutoPlayer per index)
//!                                v
//!                     Mutex<SimReport> ──> finalize ──> JSON / text
//! ```

pub mod config;
pub mod policy;
pub mod report;

pub use config::*;
pub use policy::*;
pub use report::*;

use parking_lot::Mutex;
use rayon::prelude::*;
use thiserror::Error;

use lr_slot::{ConfigError, SessionPhase, SlotSession, SpinRejection};

/// Simulator errors
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Session configuration: {0}")]
    Session(#[from] ConfigError),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type SimResult<T> = Result<T, SimError>;

/// Rejected actions in a row before the player gives up and collects
const MAX_REJECTED_IN_A_ROW: u32 = 8;

/// Loop iterations allowed per requested spin before a session is abandoned
const STEPS_PER_SPIN: u64 = 64;

/// Batch simulator
pub struct Simulator {
    config: SimConfig,
}

impl Simulator {
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Run every session and aggregate the results
    pub fn run(&self) -> SimResult<SimReport> {
        let base_seed = self.config.seed.unwrap_or_else(rand::random::<u64>);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .build()?;

        log::info!(
            "Simulating {} sessions x {} spins on {} threads (seed {})",
            self.config.sessions,
            self.config.spins_per_session,
            self.config.threads,
            base_seed
        );

        let report = Mutex::new(SimReport::new("LuckyReels Simulation", base_seed));
        let failures: Mutex<Vec<SimError>> = Mutex::new(Vec::new());

        pool.install(|| {
            (0..self.config.sessions).into_par_iter().for_each(|index| {
                let seed = base_seed.wrapping_add(index as u64);
                match self.run_session(index, seed) {
                    Ok(summary) => report.lock().add_session(summary),
                    Err(e) => failures.lock().push(e),
                }
            });
        });

        if let Some(error) = failures.into_inner().into_iter().next() {
            return Err(error);
        }

        let mut report = report.into_inner();
        report.finalize();
        log::info!(
            "Simulation complete: {} spins, RTP {:.2}%",
            report.summary.total_spins,
            report.summary.rtp()
        );
        Ok(report)
    }

    /// Play one session until it has spun the configured number of times
    pub fn run_session(&self, index: usize, seed: u64) -> SimResult<SessionSummary> {
        let mut session = SlotSession::new(self.config.session_config(seed))?;
        let mut player = AutoPlayer::new(
            self.config.bet,
            self.config.gamble_rounds,
            seed.rotate_left(32),
        );
        let target = self.config.spins_per_session;
        let step_limit = target.saturating_mul(STEPS_PER_SPIN);
        let mut rejected_total = 0u64;
        let mut rejected_in_a_row = 0u32;
        let mut steps = 0u64;

        while session.stats().total_spins < target {
            steps += 1;
            if steps > step_limit {
                log::warn!(
                    "Session {} stalled after {} spins, abandoning",
                    index,
                    session.stats().total_spins
                );
                break;
            }

            match session.phase() {
                SessionPhase::FeatureActive(_) => {
                    let Some(snapshot) = session.feature_snapshot() else {
                        session.settle();
                        continue;
                    };
                    if !snapshot.state.is_active() {
                        session.settle();
                        continue;
                    }
                    let action = if rejected_in_a_row >= MAX_REJECTED_IN_A_ROW {
                        lr_slot::FeatureAction::Collect
                    } else {
                        player.next_action(&snapshot)
                    };
                    match session.play(action) {
                        Ok(_) => rejected_in_a_row = 0,
                        Err(e) => {
                            log::warn!(
                                "Session {}: {} rejected in {}: {}",
                                index,
                                action.name(),
                                snapshot.feature,
                                e
                            );
                            rejected_total += 1;
                            rejected_in_a_row += 1;
                        }
                    }
                }
                SessionPhase::Idle => {
                    if session.free_spins() == 0 {
                        player.place_bet(&mut session);
                    }
                    match session.spin() {
                        Ok(()) => {}
                        Err(SpinRejection::InsufficientBalance { balance, bet }) => {
                            log::debug!(
                                "Session {}: balance {} below bet {}, resetting",
                                index,
                                balance,
                                bet
                            );
                            session.reset();
                        }
                        Err(rejection) => {
                            log::debug!("Session {}: spin rejected: {}", index, rejection);
                        }
                    }
                }
                SessionPhase::Spinning | SessionPhase::Resolving | SessionPhase::GameOver => {}
            }

            session.settle();
            session.drain_events();
        }

        let stats = session.stats().clone();
        log::debug!(
            "Session {} done: {} spins, balance {}, level {}",
            index,
            stats.total_spins,
            session.balance(),
            session.level()
        );

        Ok(SessionSummary {
            index,
            seed,
            final_balance: session.balance(),
            final_level: session.level(),
            rejected_actions: rejected_total,
            stats,
        })
    }
}
