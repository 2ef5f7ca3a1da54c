//! CLI command implementations

pub mod log;
pub mod scan;
pub mod simulate;
