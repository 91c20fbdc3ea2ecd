//! StageEvent — A stage occurrence with session context
//!
//! Wraps a Stage with its virtual-clock timestamp and a snapshot of the
//! numbers a presentation layer usually needs alongside it.

use serde::{Deserialize, Serialize};

use crate::stage::Stage;
use crate::taxonomy::WinLine;

/// A stage event with full metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageEvent {
    /// The canonical stage
    pub stage: Stage,

    /// Timestamp in milliseconds on the session clock
    pub timestamp_ms: f64,

    /// Session numbers at the time of the event
    #[serde(default)]
    pub payload: StagePayload,

    /// Custom tags for filtering/routing
    #[serde(default)]
    pub tags: Vec<String>,
}

impl StageEvent {
    /// Create a new stage event
    pub fn new(stage: Stage, timestamp_ms: f64) -> Self {
        Self {
            stage,
            timestamp_ms,
            payload: StagePayload::default(),
            tags: Vec::new(),
        }
    }

    /// Create with payload
    pub fn with_payload(stage: Stage, timestamp_ms: f64, payload: StagePayload) -> Self {
        Self {
            stage,
            timestamp_ms,
            payload,
            tags: Vec::new(),
        }
    }

    /// Add a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Get stage type name
    pub fn type_name(&self) -> &'static str {
        self.stage.type_name()
    }
}

/// Session snapshot attached to a stage event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StagePayload {
    /// Balance after the event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<i64>,

    /// Current bet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bet: Option<u64>,

    /// Current level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,

    /// Current experience
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xp: Option<u64>,

    /// Free spins still banked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_spins: Option<u32>,

    /// Individual paying lines
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub win_lines: Vec<WinLine>,

    /// Full reel grid (reels × rows, symbol IDs)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reel_grid: Option<Vec<Vec<u32>>>,
}

impl StagePayload {
    /// Payload carrying the headline session numbers
    pub fn session(balance: i64, bet: u64, level: u32, xp: u64, free_spins: u32) -> Self {
        Self {
            balance: Some(balance),
            bet: Some(bet),
            level: Some(level),
            xp: Some(xp),
            free_spins: Some(free_spins),
            ..Default::default()
        }
    }

    pub fn with_win_lines(mut self, lines: Vec<WinLine>) -> Self {
        self.win_lines = lines;
        self
    }

    pub fn with_grid(mut self, grid: Vec<Vec<u32>>) -> Self {
        self.reel_grid = Some(grid);
        self
    }
}
