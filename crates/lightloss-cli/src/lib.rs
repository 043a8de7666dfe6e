//! Shared utilities for lightloss-cli
//!
//! Argument parsing helpers and the command implementations, kept in the
//! library so they stay testable outside the binary.

pub mod commands;
pub mod parsers;

pub use parsers::parse_roi;
