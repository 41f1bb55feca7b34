//! Material Market
//!
//! The single shared warehouse. Sells materials at fixed unit prices out of a
//! finite inventory and is restocked to capacity on schedule.

use serde::{Deserialize, Serialize};

use house_events::{Material, MaterialBag, Shortfall};

use crate::components::Wallet;
use crate::config::MarketConfig;

/// Outcome of one material within a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FulfillmentLine {
    pub material: Material,
    pub requested: u32,
    pub fulfilled: u32,
    pub cost: u64,
    /// Set when nothing at all could be delivered
    pub shortfall: Option<Shortfall>,
}

/// Everything a request delivered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fulfillment {
    pub delivered: MaterialBag,
    pub spent: u64,
    pub lines: Vec<FulfillmentLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    inventory: MaterialBag,
    capacity: MaterialBag,
    prices: MaterialBag,
}

impl Market {
    /// A market stocked to capacity.
    pub fn new(config: &MarketConfig) -> Self {
        Self {
            inventory: config.capacity,
            capacity: config.capacity,
            prices: config.prices,
        }
    }

    pub fn inventory(&self) -> &MaterialBag {
        &self.inventory
    }

    pub fn capacity(&self) -> &MaterialBag {
        &self.capacity
    }

    pub fn available(&self, material: Material) -> u32 {
        self.inventory[material]
    }

    pub fn unit_price(&self, material: Material) -> u64 {
        u64::from(self.prices[material])
    }

    /// Resets every material to capacity.
    pub fn restock(&mut self) {
        self.inventory = self.capacity;
    }

    /// Sells what it can of `wanted`, one material at a time in the given order.
    ///
    /// Each material is settled against the live balance, so an earlier
    /// purchase can leave too little for a later one in the same request.
    pub fn request(&mut self, wanted: &[(Material, u32)], buyer: &mut Wallet) -> Fulfillment {
        let mut result = Fulfillment::default();

        for &(material, requested) in wanted {
            let unit_price = self.unit_price(material);
            let available = self.inventory[material];
            let affordable = buyer.affordable_units(unit_price);
            let fulfilled = requested.min(affordable).min(available);

            let mut line = FulfillmentLine {
                material,
                requested,
                fulfilled: 0,
                cost: 0,
                shortfall: None,
            };

            if fulfilled == 0 {
                if requested > 0 {
                    line.shortfall = Some(if available == 0 {
                        Shortfall::InsufficientInventory
                    } else {
                        Shortfall::InsufficientFunds
                    });
                }
                result.lines.push(line);
                continue;
            }

            let cost = u64::from(fulfilled) * unit_price;
            if buyer.debit(cost).is_err() {
                line.shortfall = Some(Shortfall::InsufficientFunds);
                result.lines.push(line);
                continue;
            }
            self.inventory[material] -= fulfilled;

            line.fulfilled = fulfilled;
            line.cost = cost;
            result.delivered.add(material, fulfilled);
            result.spent += cost;
            result.lines.push(line);
        }

        result
    }
}
