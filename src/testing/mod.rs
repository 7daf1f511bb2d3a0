//! Test support: a mock target service and report capture helpers

pub mod capture;
pub mod mock;
pub mod setup;

pub use capture::{CaptureBuffer, ClosedSink};
pub use mock::{MockAuthApi, MockServer, refused_base_url};
