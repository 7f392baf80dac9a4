//! Live adapters for real external interactions.

pub mod filesystem;
pub mod http;

pub use filesystem::LiveFileSystem;
pub use http::LiveHttpClient;
