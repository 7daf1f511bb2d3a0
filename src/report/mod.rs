//! Console report and result accumulation
//!
//! The [`Reporter`] is the single place that counts assertion outcomes. Every
//! pass or fail goes through it, which keeps [`TestStats`] consistent with
//! what was printed.

mod stats;

pub use stats::TestStats;

use std::fmt::Display;
use std::io::{self, Write};

use chrono::{DateTime, Local};
use serde_json::Value;

const RULE_WIDTH: usize = 60;

/// Writes the test report and owns the run's [`TestStats`]
pub struct Reporter {
    out: Box<dyn Write>,
    stats: TestStats,
}

impl Reporter {
    /// Reporter writing to an arbitrary sink
    pub fn new(out: impl Write + 'static) -> Self {
        Self {
            out: Box::new(out),
            stats: TestStats::new(),
        }
    }

    /// Reporter writing to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn stats(&self) -> TestStats {
        self.stats
    }

    pub fn banner(&mut self, suite: &str, base_url: &str, started: DateTime<Local>) -> io::Result<()> {
        writeln!(self.out)?;
        self.rule()?;
        writeln!(self.out, "🧪 {} Test Suite", suite)?;
        self.rule()?;
        writeln!(self.out, "Base URL: {}", base_url)?;
        writeln!(self.out, "Started: {}", started.format("%Y-%m-%d %H:%M:%S"))?;
        self.out.flush()
    }

    /// Heading for a test case
    pub fn test(&mut self, name: &str) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "▶ {}", name)?;
        self.out.flush()
    }

    pub fn pass(&mut self, message: impl Display) -> io::Result<()> {
        self.stats.add_pass();
        writeln!(self.out, "  ✓ {}", message)
    }

    pub fn fail(&mut self, message: impl Display) -> io::Result<()> {
        self.stats.add_fail();
        writeln!(self.out, "  ✗ {}", message)
    }

    /// Informational line; never counted
    pub fn info(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.out, "  ℹ {}", message)
    }

    /// Echo a decoded response body, indented under the current case
    pub fn json(&mut self, value: &Value) -> io::Result<()> {
        let rendered = serde_json::to_string_pretty(value).map_err(io::Error::other)?;

        writeln!(self.out, "  Response:")?;
        for line in rendered.lines() {
            writeln!(self.out, "    {}", line)?;
        }
        Ok(())
    }

    /// Free-standing line outside any case, e.g. the interruption notice
    pub fn notice(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", message)?;
        self.out.flush()
    }

    pub fn summary(&mut self) -> io::Result<()> {
        let stats = self.stats;

        writeln!(self.out)?;
        self.rule()?;
        writeln!(self.out, "Test Summary")?;
        self.rule()?;
        writeln!(self.out, "Total Tests: {}", stats.total())?;
        writeln!(self.out, "Passed: {}", stats.passed())?;
        writeln!(self.out, "Failed: {}", stats.failed())?;
        match stats.success_rate() {
            Some(rate) => writeln!(self.out, "Success Rate: {:.1}%", rate)?,
            None => writeln!(self.out, "Success Rate: N/A")?,
        }
        self.rule()?;
        writeln!(self.out)?;
        self.out.flush()
    }

    fn rule(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "=".repeat(RULE_WIDTH))
    }
}
