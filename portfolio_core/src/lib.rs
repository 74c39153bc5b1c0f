//! # Portfolio Core
//!
//! The engines behind the interactive portfolio. This crate owns all mutable
//! state and builds on the data and rules in `portfolio_rules`.
//!
//! ## Core Components
//!
//! - **progression**: XP, levels and achievements, written through to a store
//! - **layout**: skill tree selection and the lines connecting its nodes
//! - **orbit**: navigation markers on an elliptical clock
//! - **session**: the engines wired together behind the intro gate
//! - **effects**: what engine operations ask the host to do
//!
//! ## Design Philosophy
//!
//! - **Effect-Driven**: operations return effects instead of calling the host
//! - **Owned State**: each engine is the only writer of its own state
//! - **Forgiving**: bad input, bad records and failing stores degrade, never abort

pub mod config;
pub mod effects;
pub mod enrichment;
pub mod error;
pub mod layout;
pub mod orbit;
pub mod progression;
pub mod session;
pub mod store;

pub use config::*;
pub use effects::*;
pub use enrichment::*;
pub use error::*;
pub use layout::*;
pub use orbit::*;
pub use progression::*;
pub use session::*;
pub use store::*;
