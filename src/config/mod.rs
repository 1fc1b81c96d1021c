//! Configuration management
//!
//! This module holds the limits and paths for an assembly run. Settings are an
//! immutable value handed to each component, loaded from an optional TOML file.

pub mod settings;

pub use settings::{PolicySettings, Settings, DEFAULT_DIFFICULTY_TARGET};
