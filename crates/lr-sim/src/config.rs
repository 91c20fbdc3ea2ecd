//! Simulation configuration

use serde::{Deserialize, Serialize};

use lr_slot::{SessionConfig, TimingProfile};

use crate::SimError;

/// How the auto-player sets its bet before each regular spin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", content = "amount", rename_all = "snake_case")]
pub enum BetStrategy {
    /// Always bet 1
    Minimum,
    /// Always bet the level's maximum
    Maximum,
    /// Fixed amount, clamped by the session
    Fixed(u64),
}

impl Default for BetStrategy {
    fn default() -> Self {
        Self::Minimum
    }
}

/// Configuration for a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Independent sessions to play
    pub sessions: usize,

    /// Spins per session (free spins included)
    pub spins_per_session: u64,

    /// Base seed; session `i` uses `seed + i` (None = random)
    pub seed: Option<u64>,

    /// Worker threads
    pub threads: usize,

    /// Bet choice for regular spins
    pub bet: BetStrategy,

    /// Colour guesses the player risks before collecting a gamble
    pub gamble_rounds: u32,

    /// Rules and starting values of every session
    pub session: SessionConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            sessions: 100,
            spins_per_session: 1_000,
            seed: None,
            threads: num_cpus::get(),
            bet: BetStrategy::Minimum,
            gamble_rounds: 0,
            session: SessionConfig::default(),
        }
    }
}

impl SimConfig {
    /// Create a quick config for CI
    pub fn ci() -> Self {
        Self {
            sessions: 8,
            spins_per_session: 200,
            seed: Some(0),
            threads: 2,
            ..Default::default()
        }
    }

    pub fn with_sessions(mut self, sessions: usize) -> Self {
        self.sessions = sessions;
        self
    }

    pub fn with_spins(mut self, spins: u64) -> Self {
        self.spins_per_session = spins;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_bet(mut self, bet: BetStrategy) -> Self {
        self.bet = bet;
        self
    }

    pub fn with_gamble_rounds(mut self, rounds: u32) -> Self {
        self.gamble_rounds = rounds;
        self
    }

    /// Session config for session `index`: zero delays, derived seed
    pub fn session_config(&self, seed: u64) -> SessionConfig {
        SessionConfig {
            timing: TimingProfile::Instant,
            seed: Some(seed),
            ..self.session.clone()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SimError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, SimError> {
        let config: Self =
            serde_yml::from_str(yaml).map_err(|e| SimError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.sessions == 0 {
            return Err(SimError::InvalidConfig("sessions must be at least 1".into()));
        }
        if self.spins_per_session == 0 {
            return Err(SimError::InvalidConfig(
                "spins_per_session must be at least 1".into(),
            ));
        }
        if self.threads == 0 {
            return Err(SimError::InvalidConfig("threads must be at least 1".into()));
        }
        self.session.validate()?;
        Ok(())
    }
}
