//! Command implementations for the lightloss CLI.

mod analyze;

pub use analyze::cmd_analyze;
