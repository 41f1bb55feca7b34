//! Population Setup
//!
//! The starting roster and the agents built from it.

pub mod roster;

pub use roster::{build_population, default_roster};
