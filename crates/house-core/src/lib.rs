//! House Builder Simulation Engine
//!
//! A population of construction agents buys materials from a finite shared
//! market, builds and sells houses, trades surplus among itself, and evolves
//! its strategy through a genetic algorithm over simulated days.

pub mod components;
pub mod config;
pub mod context;
pub mod events;
pub mod market;
pub mod output;
pub mod scheduler;
pub mod setup;
pub mod systems;

pub use components::{Agent, Genome};
pub use config::{ConfigError, SimConfig};
pub use context::SimulationContext;
pub use events::{DayEvents, EventLogger};
pub use market::Market;
pub use scheduler::{run, run_day, DaySchedule};
