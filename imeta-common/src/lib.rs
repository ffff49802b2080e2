//! # imeta Common Library
//!
//! Shared code for the imeta crates:
//! - Error type and result alias
//! - TOML bootstrap configuration loading
//! - Human-readable duration parsing and formatting

pub mod config;
pub mod error;
pub mod human_time;

pub use error::{Error, Result};
