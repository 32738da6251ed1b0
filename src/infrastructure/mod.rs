//! Infrastructure layer providing external service integrations.
//!
//! Snapshot storage on disk, runtime settings and log output.

pub mod config;
pub mod logging;
pub mod persistence;

pub use config::*;
pub use logging::*;
pub use persistence::*;
