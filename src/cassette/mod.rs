//! Cassette format for recording and replaying index fetches.

pub mod format;
pub mod recorder;
pub mod replayer;
