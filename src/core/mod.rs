//! Core module - Launcher data model and pure logic
//!
//! This module provides:
//! - Data model and error taxonomy
//! - Companion path resolution
//! - Environment-driven settings
//! - Logging setup

pub mod config;
pub mod logging;
pub mod model;
pub mod paths;
