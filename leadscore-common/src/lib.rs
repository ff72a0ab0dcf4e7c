//! # Lead Score Common Library
//!
//! Shared code for the lead scoring service and its tooling:
//! - Error types
//! - Configuration resolution (CLI, environment, TOML file, compiled defaults)

pub mod config;
pub mod error;

pub use error::{Error, Result};
