//! Configuration upgrade engine for VCA systems
//!
//! When new factory defaults ship, a user's edited configuration has to be
//! carried over. This crate reconciles three snapshots of the configuration
//! (the old default, the user configuration and the new default) and applies
//! the merged result through the external configuration tool:
//!
//! - **Classification**: each option's `(old, user, new)` triple becomes a
//!   three-slot [`ChangeState`]
//! - **Strategies**: Manual, SemiAutomatic and FullAutomatic policies map a
//!   change state to an [`Action`]
//! - **Resolution**: an action picks the concrete value to apply
//! - **Driver**: the [`Reconciler`] walks the topology (global scope, then each
//!   card and node, then each block device) and applies every option
//!
//! # Architecture
//!
//! ```text
//!   ConfigSnapshot x3 --> MergePlan --> Reconciler --> ApplyPort
//!                                         |    |
//!                                 Strategy    Operator
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use vcacfg_core::{ConfigSnapshot, MergePlan, Mode, Reconciler, ToolPort, Unattended};
//!
//! fn upgrade() -> vcacfg_core::Result<()> {
//!     let old = ConfigSnapshot::load(Path::new("old.xml"))?;
//!     let user = ConfigSnapshot::load(Path::new("user.xml"))?;
//!     let new = ConfigSnapshot::load(Path::new("new.xml"))?;
//!
//!     let plan = MergePlan::combine(&old, &user, &new);
//!     let mut reconciler = Reconciler::new(Mode::FullAuto);
//!     let report = reconciler.run(&plan, &mut ToolPort::default(), &mut Unattended)?;
//!     println!("applied {} options", report.applied.len());
//!     Ok(())
//! }
//! ```

pub mod action;
pub mod apply;
pub mod classify;
pub mod document;
pub mod driver;
pub mod entry;
pub mod error;
pub mod operator;
pub mod resolve;
pub mod settings;
pub mod strategy;
pub mod topology;

pub use action::{Action, Decision};
pub use apply::{ApplyPort, DebugPort, ToolCommand, ToolPort};
pub use classify::{ChangeState, Slot, classify};
pub use document::{ConfigSnapshot, MergePlan, NodeConfig, OptionSet};
pub use driver::{AppliedOption, Reconciler, RunContext, RunReport, WarningRecord};
pub use entry::{OptionBatch, OptionEntry};
pub use error::{Error, Result};
pub use operator::{Operator, OperatorChoice, PromptRequest, Unattended};
pub use resolve::{ApplyValue, Resolution, resolve};
pub use settings::{Settings, SettingsResolver, ToolSettings};
pub use strategy::{DecisionPolicy, FullAutomatic, Manual, Mode, SemiAutomatic, Strategy};
pub use topology::{CARD_SLOTS, NODE_SLOTS, Scope};
