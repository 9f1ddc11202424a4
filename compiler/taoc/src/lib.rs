//! Tao command-line driver.
//!
//! The `tao` binary is a thin dispatcher over [`commands`]; everything it
//! does is reachable from this library so it can be tested without spawning
//! a process.

pub mod commands;
pub mod logging;
