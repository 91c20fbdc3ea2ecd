//! Session configuration
//!
//! Loaded from JSON or YAML; every field has a default so a partial
//! document (or none at all) yields a playable session.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::generator::DEFAULT_FORCED_WIN_AFTER;
use crate::timing::{TimingConfig, TimingProfile};

/// Starting values and rule thresholds of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Balance at start and after every reset
    pub starting_balance: i64,

    /// Bet at start and after every reset
    pub starting_bet: u64,

    /// Scoreless regular spins that open the loser's door
    pub loss_streak_trigger: u32,

    /// Scoreless free spins before a forced win
    pub forced_win_after: u32,

    /// Free spins awarded per dice on the grid
    pub free_spins_per_die: u32,

    /// Delay profile
    pub timing: TimingProfile,

    /// RNG seed; `None` draws from the OS
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            starting_balance: 100,
            starting_bet: 1,
            loss_streak_trigger: 10,
            forced_win_after: DEFAULT_FORCED_WIN_AFTER,
            free_spins_per_die: 3,
            timing: TimingProfile::Normal,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Zero-delay, seeded configuration for simulation and tests
    pub fn instant(seed: u64) -> Self {
        Self {
            timing: TimingProfile::Instant,
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_timing(mut self, timing: TimingProfile) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_starting_balance(mut self, balance: i64) -> Self {
        self.starting_balance = balance;
        self
    }

    /// Delays for the configured profile
    pub fn timing_config(&self) -> TimingConfig {
        TimingConfig::from_profile(self.timing)
    }

    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> ConfigResult<Self> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yml::to_string(self)?)
    }

    /// Reject values that would make the session unplayable
    pub fn validate(&self) -> ConfigResult<()> {
        if self.starting_balance <= 0 {
            return Err(ConfigError::Invalid {
                field: "starting_balance",
                reason: format!("must be positive, got {}", self.starting_balance),
            });
        }
        let positive = [
            ("starting_bet", self.starting_bet),
            ("loss_streak_trigger", self.loss_streak_trigger as u64),
            ("forced_win_after", self.forced_win_after as u64),
            ("free_spins_per_die", self.free_spins_per_die as u64),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be at least 1".into(),
                });
            }
        }
        Ok(())
    }
}
