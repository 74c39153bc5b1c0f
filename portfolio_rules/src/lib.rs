//! # Portfolio Rules
//!
//! The rulebook crate - zones, the achievement catalog, the level table, the
//! persisted progression record, the skill graph and the content document.
//! This crate holds data and pure rules only; the engines that mutate state
//! and talk to the host live in `portfolio_core`.

pub mod content;
pub mod error;
pub mod geometry;
pub mod progression;
pub mod skill_tree;
pub mod zones;

pub use content::*;
pub use error::*;
pub use geometry::*;
pub use progression::*;
pub use skill_tree::*;
pub use zones::*;
