//! StageTrace — the ordered stage timeline of a session
//!
//! The controller appends to a trace; a presentation layer drains it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::StageEvent;
use crate::stage::{Stage, StageCategory};
use crate::taxonomy::FeatureKind;

/// A trace of stage events for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTrace {
    /// Session identifier
    pub session_id: String,

    /// All events in chronological order
    pub events: Vec<StageEvent>,

    /// When this trace was started
    pub recorded_at: DateTime<Utc>,
}

impl StageTrace {
    /// Create a new empty trace
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            events: Vec::new(),
            recorded_at: Utc::now(),
        }
    }

    /// Add an event to the trace
    pub fn push(&mut self, event: StageEvent) {
        self.events.push(event);
    }

    /// Take every recorded event, leaving the trace empty
    pub fn drain(&mut self) -> Vec<StageEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get total duration in milliseconds
    pub fn duration_ms(&self) -> f64 {
        match (self.events.first(), self.events.last()) {
            (Some(first), Some(last)) => last.timestamp_ms - first.timestamp_ms,
            _ => 0.0,
        }
    }

    /// Get events by category
    pub fn events_by_category(&self, category: StageCategory) -> Vec<&StageEvent> {
        self.events
            .iter()
            .filter(|e| e.stage.category() == category)
            .collect()
    }

    /// Get events by stage type name
    pub fn events_by_type(&self, type_name: &str) -> Vec<&StageEvent> {
        self.events
            .iter()
            .filter(|e| e.stage.type_name() == type_name)
            .collect()
    }

    /// Count events of a stage type
    pub fn count(&self, type_name: &str) -> usize {
        self.events
            .iter()
            .filter(|e| e.stage.type_name() == type_name)
            .count()
    }

    /// Check if trace contains a specific stage type
    pub fn has_stage(&self, type_name: &str) -> bool {
        self.events.iter().any(|e| e.stage.type_name() == type_name)
    }

    /// Most recent stage of a type
    pub fn last_of_type(&self, type_name: &str) -> Option<&StageEvent> {
        self.events
            .iter()
            .rev()
            .find(|e| e.stage.type_name() == type_name)
    }

    /// Features entered, in order
    pub fn features_entered(&self) -> Vec<FeatureKind> {
        self.events
            .iter()
            .filter_map(|e| match e.stage {
                Stage::FeatureEnter { feature } => Some(feature),
                _ => None,
            })
            .collect()
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trace() -> StageTrace {
        let mut trace = StageTrace::new("session-1");
        trace.push(StageEvent::new(Stage::SpinStart { free_spin: false }, 0.0));
        trace.push(StageEvent::new(Stage::EvaluateWins, 500.0));
        trace.push(StageEvent::new(
            Stage::FeatureEnter {
                feature: FeatureKind::BonusBoard,
            },
            500.0,
        ));
        trace.push(StageEvent::new(Stage::SpinEnd, 500.0));
        trace
    }

    #[test]
    fn test_queries() {
        let trace = sample_trace();
        assert_eq!(trace.len(), 4);
        assert!(trace.has_stage("evaluate_wins"));
        assert!(!trace.has_stage("game_over"));
        assert_eq!(trace.count("spin_end"), 1);
        assert_eq!(trace.events_by_category(StageCategory::SpinLifecycle).len(), 3);
        assert_eq!(trace.features_entered(), vec![FeatureKind::BonusBoard]);
        assert!((trace.duration_ms() - 500.0).abs() < 0.001);
    }

    #[test]
    fn test_drain_empties_trace() {
        let mut trace = sample_trace();
        let events = trace.drain();
        assert_eq!(events.len(), 4);
        assert!(trace.is_empty());
        assert_eq!(trace.duration_ms(), 0.0);
    }

    #[test]
    fn test_json_roundtrip() {
        let trace = sample_trace();
        let json = trace.to_json().unwrap();
        let back = StageTrace::from_json(&json).unwrap();
        assert_eq!(back, trace);
    }
}
