//! Shared test utilities for the vca-config-upgrade workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixtures`]: XML document builder and three-document setups on disk
//! - [`doubles`]: recording apply port and scripted operator

pub mod doubles;
pub mod fixtures;
