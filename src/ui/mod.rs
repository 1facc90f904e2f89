//! Terminal UI: rendering and the interactive prompt

pub mod prompt;
pub mod render;
