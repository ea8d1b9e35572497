//! Configuration management for surface-elo
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and default values for the rating engine.

pub mod app;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings, SourceSettings};
pub use rating::{RatingConfig, DEFAULT_BASELINE, DEFAULT_K_FACTOR};
