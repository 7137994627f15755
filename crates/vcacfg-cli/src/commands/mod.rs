//! Command implementations for vcacfg-cli

pub mod merge;

pub use merge::run_merge;
