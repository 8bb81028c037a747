//! CLI library components for the salary guide.

pub mod demo;
pub mod logging;
