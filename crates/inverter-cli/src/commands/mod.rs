//! CLI command implementations

pub mod backends;
pub mod invert;
pub mod process;
pub mod scan;
