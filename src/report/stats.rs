use serde::{Deserialize, Serialize};

/// Pass/fail counters for one harness run
///
/// Fields are private so `total == passed + failed` holds at all times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestStats {
    passed: u32,
    failed: u32,
    total: u32,
}

impl TestStats {
    /// Create new stats with zero values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_pass(&mut self) {
        self.passed += 1;
        self.total += 1;
    }

    pub fn add_fail(&mut self) {
        self.failed += 1;
        self.total += 1;
    }

    pub fn passed(&self) -> u32 {
        self.passed
    }

    pub fn failed(&self) -> u32 {
        self.failed
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Percentage of passing assertions, `None` before any assertion ran
    pub fn success_rate(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }

        Some(self.passed as f64 / self.total as f64 * 100.0)
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Process exit code for these counts: 0 when nothing failed, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        if self.is_success() { 0 } else { 1 }
    }

    /// Counts accumulated since `earlier` was taken
    pub fn since(&self, earlier: &TestStats) -> TestStats {
        TestStats {
            passed: self.passed - earlier.passed,
            failed: self.failed - earlier.failed,
            total: self.total - earlier.total,
        }
    }
}
