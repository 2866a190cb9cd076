//! CLI library components for the study bundle toolkit.

pub mod logging;
