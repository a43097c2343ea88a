//! enroute CLI library.
//!
//! This crate provides command-line interface utilities for the enroute
//! router: logging setup and report formatting.

pub mod logging;
pub mod output;
