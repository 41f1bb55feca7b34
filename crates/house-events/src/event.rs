//! Simulation Events
//!
//! Everything that happens during a simulated day is described by a
//! [`SimEvent`]. Events are pure data; the engine pushes them into a per-day
//! buffer and optionally appends them to a JSONL log.

use serde::{Deserialize, Serialize};

use crate::material::Material;
use crate::part::HousePart;

/// Why a purchase or trade moved fewer units than asked for.
///
/// None of these stop the simulation; they only mean no progress this step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shortfall {
    /// The market has no units of the material left.
    InsufficientInventory,
    /// The buyer cannot pay for a single unit.
    InsufficientFunds,
    /// Settling the trade would drive the seller's excess below zero.
    ExcessUnderflow,
}

/// A heritable strategy field touched by mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gene {
    BuildOrder,
    PriorityHouses,
    BuyPrice,
    SellPrice,
}

/// A phase starting within a day. A restock has no other event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Restock,
    Construction,
    Trading,
    Mutation,
    Genetic,
}

/// One thing that happened during a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    PhaseStarted {
        phase: Phase,
    },
    Purchase {
        agent: String,
        material: Material,
        requested: u32,
        fulfilled: u32,
        cost: u64,
    },
    ForcedBuy {
        agent: String,
        material: Material,
        extra: u32,
    },
    Shortfall {
        agent: String,
        material: Material,
        reason: Shortfall,
    },
    PartCompleted {
        agent: String,
        slot: usize,
        part: HousePart,
    },
    HouseSold {
        agent: String,
        slot: usize,
        houses_built: u32,
        sale_price: u64,
    },
    Trade {
        seller: String,
        buyer: String,
        material: Material,
        quantity: u32,
        price: u64,
    },
    TradeSkipped {
        seller: String,
        buyer: String,
        material: Material,
        reason: Shortfall,
    },
    SelfConsumed {
        agent: String,
        material: Material,
        part: HousePart,
        quantity: u32,
    },
    Mutated {
        agent: String,
        gene: Gene,
        from: String,
        to: String,
    },
    Selected {
        agents: Vec<String>,
    },
    Crossover {
        first: String,
        second: String,
    },
    SlotFlushed {
        agent: String,
        units: u64,
    },
    SlotAdded {
        agent: String,
    },
}

impl SimEvent {
    /// Agents named by this event.
    pub fn agents(&self) -> Vec<&str> {
        match self {
            SimEvent::PhaseStarted { .. } => Vec::new(),
            SimEvent::Purchase { agent, .. }
            | SimEvent::ForcedBuy { agent, .. }
            | SimEvent::Shortfall { agent, .. }
            | SimEvent::PartCompleted { agent, .. }
            | SimEvent::HouseSold { agent, .. }
            | SimEvent::SelfConsumed { agent, .. }
            | SimEvent::Mutated { agent, .. }
            | SimEvent::SlotFlushed { agent, .. }
            | SimEvent::SlotAdded { agent } => vec![agent.as_str()],
            SimEvent::Trade { seller, buyer, .. } | SimEvent::TradeSkipped { seller, buyer, .. } => {
                vec![seller.as_str(), buyer.as_str()]
            }
            SimEvent::Selected { agents } => agents.iter().map(String::as_str).collect(),
            SimEvent::Crossover { first, second } => vec![first.as_str(), second.as_str()],
        }
    }

    /// The serialized `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            SimEvent::PhaseStarted { .. } => "phase_started",
            SimEvent::Purchase { .. } => "purchase",
            SimEvent::ForcedBuy { .. } => "forced_buy",
            SimEvent::Shortfall { .. } => "shortfall",
            SimEvent::PartCompleted { .. } => "part_completed",
            SimEvent::HouseSold { .. } => "house_sold",
            SimEvent::Trade { .. } => "trade",
            SimEvent::TradeSkipped { .. } => "trade_skipped",
            SimEvent::SelfConsumed { .. } => "self_consumed",
            SimEvent::Mutated { .. } => "mutated",
            SimEvent::Selected { .. } => "selected",
            SimEvent::Crossover { .. } => "crossover",
            SimEvent::SlotFlushed { .. } => "slot_flushed",
            SimEvent::SlotAdded { .. } => "slot_added",
        }
    }

    pub fn involves_agent(&self, name: &str) -> bool {
        self.agents().contains(&name)
    }
}

/// An event stamped with its id and the day it happened on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedEvent {
    pub event_id: String,
    pub day: u32,
    pub event: SimEvent,
}

impl LoggedEvent {
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

/// Formats a sequential event id.
pub fn generate_event_id(sequence: u64) -> String {
    format!("evt_{:08}", sequence)
}
