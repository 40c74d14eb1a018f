//! Run progress record
//!
//! Tracks which levels a player has cleared and the best run so far.
//! The embedding layer owns storage; this module only does the JSON.

use serde::{Deserialize, Serialize};

/// Persistent player progress
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Progress {
    /// Level indices cleared at least once, sorted ascending
    completed: Vec<u32>,
    /// Most levels cleared in a single run
    pub best_run: u32,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cleared level. Idempotent.
    pub fn record(&mut self, level_index: u32) {
        if let Err(at) = self.completed.binary_search(&level_index) {
            self.completed.insert(at, level_index);
        }
    }

    pub fn is_completed(&self, level_index: u32) -> bool {
        self.completed.binary_search(&level_index).is_ok()
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Fold a finished run into the record
    pub fn finish_run(&mut self, levels_cleared: u32) {
        if levels_cleared > self.best_run {
            self.best_run = levels_cleared;
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_is_idempotent_and_sorted() {
        let mut progress = Progress::new();
        progress.record(3);
        progress.record(1);
        progress.record(3);
        assert_eq!(progress.completed_count(), 2);
        assert!(progress.is_completed(1));
        assert!(progress.is_completed(3));
        assert!(!progress.is_completed(2));
    }

    #[test]
    fn test_best_run_only_improves() {
        let mut progress = Progress::new();
        progress.finish_run(4);
        progress.finish_run(2);
        assert_eq!(progress.best_run, 4);
    }

    #[test]
    fn test_json_round_trip() {
        let mut progress = Progress::new();
        progress.record(0);
        progress.record(2);
        progress.finish_run(2);
        let json = progress.to_json().expect("to json");
        let back = Progress::from_json(&json).expect("from json");
        assert_eq!(progress, back);
    }

    #[test]
    fn test_empty_json_gives_defaults() {
        let progress = Progress::from_json("{}").expect("from json");
        assert_eq!(progress, Progress::new());
    }
}
