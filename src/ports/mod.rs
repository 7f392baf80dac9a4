//! Port traits defining external boundaries.
//!
//! Index construction reaches two external systems: the network hosting
//! reference sites and the local disk holding config files and pages.
//! Implementations live in `src/adapters/`.

pub mod filesystem;
pub mod http;

pub use filesystem::FileSystem;
pub use http::{HttpClient, HttpFuture};

/// Error returned by every port method.
///
/// Adapters report failures as opaque messages; callers attach the URL or
/// path and turn them into [`crate::Error`].
pub type PortError = Box<dyn std::error::Error + Send + Sync>;
