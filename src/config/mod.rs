//! Configuration module for Tally
//!
//! - Base directory and file path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::TallyPaths;
pub use settings::Settings;
