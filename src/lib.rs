//! video-dash library
//!
//! Core functionality for the video-dash CLI.

pub mod core;
pub mod error;
pub mod logging;
pub mod storage;
pub mod types;
pub mod ui;
pub mod utils;
