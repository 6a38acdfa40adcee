use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Passing mark, in percent.
pub const PASS_PERCENT: usize = 80;

/// Frozen outcome of a submitted quiz session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub correct: usize,
    pub total: usize,
    pub passed: bool,
    pub finished_at: DateTime<Utc>,
}

impl ScoreResult {
    pub fn new(correct: usize, total: usize) -> Self {
        let correct = correct.min(total);
        // Integer comparison keeps 4/5 exactly on the 80% mark.
        let passed = total > 0 && correct * 100 >= total * PASS_PERCENT;
        Self {
            correct,
            total,
            passed,
            finished_at: Utc::now(),
        }
    }

    pub fn incorrect(&self) -> usize {
        self.total - self.correct
    }

    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64 * 100.0
    }
}
