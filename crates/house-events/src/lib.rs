//! Shared data types for the house-building market simulation.
//!
//! This crate contains pure data structures with no simulation logic:
//! materials, house parts, simulation events and exported records.

pub mod event;
pub mod material;
pub mod part;
pub mod record;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

pub use event::{generate_event_id, Gene, LoggedEvent, Phase, Shortfall, SimEvent};
pub use material::{Material, MaterialBag, MATERIAL_COUNT};
pub use part::{house_requirements, HousePart, PART_COUNT};
pub use record::{join_build_order, AgentRecord};
