pub mod assertions;
pub mod cases;
pub mod client;
pub mod config;
pub mod harness;
pub mod observability;
pub mod report;

// Testing utilities (always available for integration tests)
pub mod testing;

// Re-export commonly used types for convenience
pub use assertions::{Assertion, JsonKind};
pub use cases::Case;
pub use client::{ApiClient, ApiResponse, ClientError, RequestOptions};
pub use config::HarnessConfig;
pub use harness::{Harness, Termination};
pub use report::{Reporter, TestStats};
