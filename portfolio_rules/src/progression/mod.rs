//! Progression rules - levels, achievements and the persisted record.
//!
//! The record is a cumulative counter with carry-over: XP accumulates and is
//! greedily converted into levels using the [`LevelTable`]. Achievements and
//! visited zones only ever grow.

mod achievements;
mod levels;
mod state;

pub use achievements::*;
pub use levels::*;
pub use state::*;
