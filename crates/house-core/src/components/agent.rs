//! Builder Agent
//!
//! A builder holds a strategy genome, a wallet, one or two houses under
//! construction and a pool of excess materials it can trade or use later.

use serde::{Deserialize, Serialize};

use house_events::{join_build_order, AgentRecord, HousePart, MaterialBag};

use crate::components::genome::{Genome, GenomeError};
use crate::components::house::{HouseProgress, HouseSlots};
use crate::components::wallet::Wallet;
use crate::config::{AgentSpec, GeneticsConfig};

/// What [`Agent::reconcile_slots`] had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotChange {
    Unchanged,
    /// A slot was dropped and this many units moved to the excess pool
    Flushed(u64),
    Added,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub name: String,
    pub genome: Genome,
    pub wallet: Wallet,
    houses_built: u32,
    pub houses: HouseSlots,
    /// Shortfall of the focus house's current part, as last computed
    pub materials_needed: MaterialBag,
    /// Units held outside any house; tradable
    pub excess: MaterialBag,
}

impl Agent {
    pub fn new(name: impl Into<String>, genome: Genome, money: u64) -> Self {
        Self {
            name: name.into(),
            houses: HouseSlots::new(genome.priority_houses.count()),
            genome,
            wallet: Wallet::new(money),
            houses_built: 0,
            materials_needed: MaterialBag::empty(),
            excess: MaterialBag::empty(),
        }
    }

    pub fn from_spec(spec: &AgentSpec, genetics: &GeneticsConfig) -> Result<Self, GenomeError> {
        Ok(Self::new(spec.name.clone(), spec.genome(genetics)?, spec.money))
    }

    pub fn with_excess(mut self, excess: MaterialBag) -> Self {
        self.excess = excess;
        self
    }

    pub fn money(&self) -> u64 {
        self.wallet.balance()
    }

    pub fn houses_built(&self) -> u32 {
        self.houses_built
    }

    pub fn focused_house(&self) -> &HouseProgress {
        self.houses.focused()
    }

    /// Recomputes `materials_needed` from the focus house and returns the part it covers.
    pub fn refresh_needs(&mut self) -> Option<HousePart> {
        self.materials_needed = MaterialBag::empty();
        let (part, shortfall) = self.houses.focused().deficit(&self.genome.build_order)?;
        for (material, missing) in shortfall {
            self.materials_needed.set(material, missing);
        }
        Some(part)
    }

    /// Records a finished focus house: counts it, clears the slot and credits the sale.
    ///
    /// Returns the new `houses_built` total.
    pub fn complete_focused_house(&mut self, sale_price: u64) -> u32 {
        self.houses_built += 1;
        self.houses.focused_mut().reset();
        self.materials_needed = MaterialBag::empty();
        self.wallet.credit(sale_price);
        self.houses_built
    }

    /// Brings the number of house slots in line with `priority_houses`.
    ///
    /// A dropped slot's materials are summed into the excess pool; a new slot
    /// starts empty.
    pub fn reconcile_slots(&mut self) -> SlotChange {
        let wanted = self.genome.priority_houses.count();
        if wanted < self.houses.len() {
            match self.houses.pop() {
                Some(flushed) => {
                    self.excess.merge(&flushed);
                    SlotChange::Flushed(flushed.total())
                }
                None => SlotChange::Unchanged,
            }
        } else if wanted > self.houses.len() && self.houses.push_empty() {
            SlotChange::Added
        } else {
            SlotChange::Unchanged
        }
    }

    pub fn total_excess(&self) -> u64 {
        self.excess.total()
    }

    /// Export row for this agent.
    pub fn record(&self, fitness: f64) -> AgentRecord {
        AgentRecord {
            name: self.name.clone(),
            priority_houses: self.genome.priority_houses.count() as u8,
            build_order: join_build_order(self.genome.build_order.parts()),
            buyprice: self.genome.buyprice,
            sellprice: self.genome.sellprice,
            fitness,
            houses_built: self.houses_built,
            money: self.money(),
            total_excess: self.total_excess(),
        }
    }
}
