//! Test helper utilities shared by the imeta integration tests

#![allow(dead_code)]

pub mod log_capture;
pub mod mock_upstream;

pub use log_capture::LogCapture;
pub use mock_upstream::{binlist_payload, ScriptedUpstream};
