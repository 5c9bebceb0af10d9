//! Configuration module for JobDash
//!
//! Provides CLI arguments, environment fallbacks and validated runtime
//! settings for the data service and the dashboard.

mod settings;

pub use settings::*;
