//! Agent State
//!
//! Genome, wallet, house progress and the agent that owns them.

pub mod agent;
pub mod genome;
pub mod house;
pub mod wallet;

pub use agent::{Agent, SlotChange};
pub use genome::{BuildOrder, Genome, GenomeError, PriorityHouses};
pub use house::{HouseProgress, HouseSlots, MAX_HOUSE_SLOTS};
pub use wallet::{Wallet, WalletError};
