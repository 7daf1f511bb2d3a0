use crate::config::HarnessConfig;
use crate::harness::Harness;
use crate::report::Reporter;

use super::CaptureBuffer;

/// Returns a configuration pointed at `base_url` with short timeouts
///
/// Test runs should fail fast when a target misbehaves, so the request
/// timeout is cut from 30 to 5 seconds and the connect timeout to 2.
pub fn config(base_url: &str) -> HarnessConfig {
    let mut config = HarnessConfig::for_target(base_url);
    config.target.timeout = 5;
    config.target.connect_timeout = 2;
    config
}

/// Returns a harness for `base_url` whose report is captured in memory
///
/// # Example
/// ```no_run
/// use auth_smoke::testing::setup;
///
/// # async fn example() {
/// let (mut harness, output) = setup::harness("http://127.0.0.1:8787");
/// let stats = harness.run_all().await.unwrap();
/// println!("{} failed\n{}", stats.failed(), output.contents());
/// # }
/// ```
pub fn harness(base_url: &str) -> (Harness, CaptureBuffer) {
    harness_with(config(base_url))
}

/// Same as [`harness`] for a prepared configuration
pub fn harness_with(config: HarnessConfig) -> (Harness, CaptureBuffer) {
    let output = CaptureBuffer::new();
    let harness = Harness::with_reporter(config, Reporter::new(output.clone()));

    (harness, output)
}
