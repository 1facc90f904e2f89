//! Utility modules

pub mod paths;
