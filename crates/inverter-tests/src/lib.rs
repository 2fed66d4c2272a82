//! Integration tests for the inverter crates.
//!
//! End-to-end checks across core, ops, the editing session and the CLI's
//! file I/O.
