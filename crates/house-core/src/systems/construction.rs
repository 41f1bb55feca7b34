//! Construction System
//!
//! The per-day build step of an agent: work out the shortfall of the focus
//! house's current part, buy it from the market (sometimes with a forced
//! extra unit), credit the delivery and sell the house once every part is
//! supplied.

use rand::Rng;
use tracing::debug;

use house_events::{HousePart, Material, Shortfall, SimEvent};

use crate::components::Agent;
use crate::config::ConstructionConfig;
use crate::events::DayEvents;
use crate::market::Market;

/// What a single construction step achieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing was ordered or nothing could be delivered
    NoProgress,
    /// Materials were delivered but the house is not finished
    Progressed { units: u32 },
    /// The focus house was finished and sold
    HouseCompleted { houses_built: u32 },
}

/// Runs one construction step for every agent in population order, switching
/// the focus of dual-house agents after their purchase.
pub fn run_construction_phase<R: Rng + ?Sized>(
    population: &mut [Agent],
    market: &mut Market,
    rules: &ConstructionConfig,
    rng: &mut R,
    events: &mut DayEvents,
) {
    for agent in population.iter_mut() {
        construct(agent, market, rules, rng, events);
        agent.houses.switch_focus();
    }
}

/// One purchase-and-credit step on the agent's focus house.
pub fn construct<R: Rng + ?Sized>(
    agent: &mut Agent,
    market: &mut Market,
    rules: &ConstructionConfig,
    rng: &mut R,
    events: &mut DayEvents,
) -> StepOutcome {
    let Some(part) = agent.refresh_needs() else {
        // Every part is already supplied (filled from excess on a trading day)
        return sell_house(agent, rules, events);
    };

    let order = plan_order(agent, part, market, rules, rng, events);
    if order.lines.is_empty() {
        return StepOutcome::NoProgress;
    }

    let fulfillment = market.request(&order.lines, &mut agent.wallet);
    for line in &fulfillment.lines {
        if line.fulfilled > 0 {
            events.push(SimEvent::Purchase {
                agent: agent.name.clone(),
                material: line.material,
                requested: line.requested,
                fulfilled: line.fulfilled,
                cost: line.cost,
            });
        } else if let Some(reason) = line.shortfall {
            events.push(SimEvent::Shortfall {
                agent: agent.name.clone(),
                material: line.material,
                reason,
            });
        }
    }

    let mut units = 0;
    for (material, delivered) in fulfillment.delivered.iter() {
        let applied = agent.houses.focused_mut().supply(part, material, delivered);
        let surplus = delivered - applied;
        agent.materials_needed[material] -= applied;
        agent.excess.add(material, surplus);
        units += delivered;

        if surplus > 0 && order.forced.contains(&material) {
            events.push(SimEvent::ForcedBuy {
                agent: agent.name.clone(),
                material,
                extra: surplus,
            });
        }
    }

    debug!(
        agent = %agent.name,
        %part,
        units,
        spent = fulfillment.spent,
        money = agent.money(),
        "construction step"
    );

    if units == 0 {
        return StepOutcome::NoProgress;
    }
    if !agent.focused_house().is_part_complete(part) {
        return StepOutcome::Progressed { units };
    }

    events.push(SimEvent::PartCompleted {
        agent: agent.name.clone(),
        slot: agent.houses.focus(),
        part,
    });

    if agent.focused_house().is_complete() {
        sell_house(agent, rules, events)
    } else {
        StepOutcome::Progressed { units }
    }
}

/// A planned purchase and the materials carrying a forced extra unit.
struct Order {
    lines: Vec<(Material, u32)>,
    forced: Vec<Material>,
}

/// Quantities to request for the current part, in requirement order.
///
/// Each needed material is capped at what the wallet covers on its own, and
/// may carry a forced extra purchase when the larger total is still payable.
/// A needed material that cannot be ordered at all is recorded as a shortfall.
fn plan_order<R: Rng + ?Sized>(
    agent: &Agent,
    part: HousePart,
    market: &Market,
    rules: &ConstructionConfig,
    rng: &mut R,
    events: &mut DayEvents,
) -> Order {
    let mut order = Order {
        lines: Vec::new(),
        forced: Vec::new(),
    };

    for &(material, _) in part.requirements() {
        let needed = agent.materials_needed[material];
        if needed == 0 {
            continue;
        }

        let unit_price = market.unit_price(material);
        let mut quantity = needed.min(agent.wallet.affordable_units(unit_price));

        if rng.gen::<f64>() < rules.forced_buy_chance {
            let with_extra = quantity.saturating_add(rules.forced_buy_amount);
            if with_extra > quantity && agent.wallet.can_afford(u64::from(with_extra) * unit_price) {
                quantity = with_extra;
                order.forced.push(material);
            }
        }

        if quantity > 0 {
            order.lines.push((material, quantity));
        } else {
            let reason = if market.available(material) == 0 {
                Shortfall::InsufficientInventory
            } else {
                Shortfall::InsufficientFunds
            };
            events.push(SimEvent::Shortfall {
                agent: agent.name.clone(),
                material,
                reason,
            });
        }
    }

    order
}

fn sell_house(agent: &mut Agent, rules: &ConstructionConfig, events: &mut DayEvents) -> StepOutcome {
    let slot = agent.houses.focus();
    let houses_built = agent.complete_focused_house(rules.house_sale_price);
    debug!(agent = %agent.name, slot, houses_built, "house completed and sold");
    events.push(SimEvent::HouseSold {
        agent: agent.name.clone(),
        slot,
        houses_built,
        sale_price: rules.house_sale_price,
    });
    StepOutcome::HouseCompleted { houses_built }
}
