//! Trading System
//!
//! Runs on trading days instead of construction. Agents first refresh what
//! they need, then every agent offers its excess to every other agent, and
//! finally each agent uses whatever it holds in excess on its own focus house.

use tracing::{debug, warn};

use house_events::{Material, Shortfall, SimEvent};

use crate::components::Agent;
use crate::config::ConstructionConfig;
use crate::events::DayEvents;
use crate::market::Market;
use crate::systems::pair_mut;

/// Result of offering one material from one seller to one buyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeOutcome {
    /// Buyer needs none of the material
    NoDemand,
    /// Seller holds none of the material
    NoSupply,
    /// `buyer.buyprice < seller.sellprice`
    PriceMismatch,
    Unaffordable { price: u64 },
    /// Seller's excess would go negative; nothing moved
    Underflow,
    Executed { quantity: u32, price: u64 },
}

/// Counts from one trading day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TradingSummary {
    pub trades: u32,
    pub units_traded: u64,
    pub value_traded: u64,
    pub underflows: u32,
    pub units_self_consumed: u64,
    pub houses_completed: u32,
}

/// The full three-phase trading round.
pub fn run_trading_phase(
    population: &mut [Agent],
    market: &Market,
    rules: &ConstructionConfig,
    events: &mut DayEvents,
) -> TradingSummary {
    let mut summary = TradingSummary::default();

    for agent in population.iter_mut() {
        agent.refresh_needs();
    }

    match_trades(population, market, events, &mut summary);

    for agent in population.iter_mut() {
        summary.units_self_consumed += self_consume(agent, events);
        if agent.focused_house().is_complete() {
            let slot = agent.houses.focus();
            let houses_built = agent.complete_focused_house(rules.house_sale_price);
            events.push(SimEvent::HouseSold {
                agent: agent.name.clone(),
                slot,
                houses_built,
                sale_price: rules.house_sale_price,
            });
            summary.houses_completed += 1;
        }
    }

    debug!(
        trades = summary.trades,
        units = summary.units_traded,
        underflows = summary.underflows,
        "trading round finished"
    );
    summary
}

/// Offers every seller's excess to every other agent, sellers and buyers in
/// population order. Earlier buyers can exhaust a seller before later ones
/// are considered.
///
/// Bought units land in the buyer's excess, so a buyer later in the seller
/// order can resell them the same round to anyone who still needs them.
fn match_trades(
    population: &mut [Agent],
    market: &Market,
    events: &mut DayEvents,
    summary: &mut TradingSummary,
) {
    for seller_idx in 0..population.len() {
        for material in Material::ALL {
            if population[seller_idx].excess[material] == 0 {
                continue;
            }
            let unit_price = market.unit_price(material);

            for buyer_idx in 0..population.len() {
                if buyer_idx == seller_idx {
                    continue;
                }
                if population[seller_idx].excess[material] == 0 {
                    break;
                }
                let Some((seller, buyer)) = pair_mut(population, seller_idx, buyer_idx) else {
                    continue;
                };

                match offer(seller, buyer, material, unit_price, events) {
                    TradeOutcome::Executed { quantity, price } => {
                        summary.trades += 1;
                        summary.units_traded += u64::from(quantity);
                        summary.value_traded += price;
                    }
                    TradeOutcome::Underflow => summary.underflows += 1,
                    _ => {}
                }
            }
        }
    }
}

/// Offers `material` from `seller` to `buyer` at the seller's multiplier.
///
/// The quantity is whatever the buyer still needs, capped by what the seller
/// holds right now.
pub fn offer(
    seller: &mut Agent,
    buyer: &mut Agent,
    material: Material,
    unit_price: u64,
    events: &mut DayEvents,
) -> TradeOutcome {
    let need = buyer.materials_needed[material];
    if need == 0 {
        return TradeOutcome::NoDemand;
    }
    let available = seller.excess[material];
    if available == 0 {
        return TradeOutcome::NoSupply;
    }
    if buyer.genome.buyprice < seller.genome.sellprice {
        return TradeOutcome::PriceMismatch;
    }

    settle(seller, buyer, material, need.min(available), unit_price, events)
}

/// Moves `quantity` units and the matching payment, or nothing at all.
///
/// Price is `quantity * unit_price * seller.sellprice`. The trade is skipped
/// when the buyer cannot pay or when the seller holds fewer than `quantity`.
pub fn settle(
    seller: &mut Agent,
    buyer: &mut Agent,
    material: Material,
    quantity: u32,
    unit_price: u64,
    events: &mut DayEvents,
) -> TradeOutcome {
    let price = u64::from(quantity) * unit_price * u64::from(seller.genome.sellprice);

    if !buyer.wallet.can_afford(price) {
        return TradeOutcome::Unaffordable { price };
    }

    if seller.excess[material] < quantity {
        warn!(
            seller = %seller.name,
            buyer = %buyer.name,
            %material,
            held = seller.excess[material],
            quantity,
            "trade would drive seller excess below zero; skipped"
        );
        events.push(SimEvent::TradeSkipped {
            seller: seller.name.clone(),
            buyer: buyer.name.clone(),
            material,
            reason: Shortfall::ExcessUnderflow,
        });
        return TradeOutcome::Underflow;
    }

    if buyer.wallet.debit(price).is_err() {
        return TradeOutcome::Unaffordable { price };
    }
    seller.wallet.credit(price);
    seller.excess.take(material, quantity);
    buyer.excess.add(material, quantity);
    let need = &mut buyer.materials_needed[material];
    *need = need.saturating_sub(quantity);

    debug!(
        seller = %seller.name,
        buyer = %buyer.name,
        %material,
        quantity,
        price,
        "trade executed"
    );
    events.push(SimEvent::Trade {
        seller: seller.name.clone(),
        buyer: buyer.name.clone(),
        material,
        quantity,
        price,
    });
    TradeOutcome::Executed { quantity, price }
}

/// Moves units from the agent's excess into the focus house.
///
/// Parts are tried in build order; each takes at most its remaining
/// requirement, and a material stops once its excess or need runs out.
/// Returns the units moved.
pub fn self_consume(agent: &mut Agent, events: &mut DayEvents) -> u64 {
    let mut moved = 0u64;

    for material in Material::ALL {
        let mut budget = agent.excess[material].min(agent.materials_needed[material]);
        if budget == 0 {
            continue;
        }

        let order = agent.genome.build_order;
        for part in order.iter().filter(|part| part.uses(material)) {
            let applied = agent.houses.focused_mut().supply(part, material, budget);
            if applied == 0 {
                continue;
            }
            agent.excess.take(material, applied);
            let need = &mut agent.materials_needed[material];
            *need = need.saturating_sub(applied);
            budget -= applied;
            moved += u64::from(applied);

            events.push(SimEvent::SelfConsumed {
                agent: agent.name.clone(),
                material,
                part,
                quantity: applied,
            });

            if budget == 0 {
                break;
            }
        }
    }

    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Genome;
    use crate::config::MarketConfig;
    use house_events::{HousePart, MaterialBag};

    fn trader(name: &str, buyprice: u8, sellprice: u8, money: u64) -> Agent {
        let genome = Genome::new(
            &[HousePart::Hall, HousePart::Garret, HousePart::Floor],
            1,
            buyprice,
            sellprice,
            1..=8,
        )
        .unwrap();
        Agent::new(name, genome, money)
    }

    #[test]
    fn test_price_eligibility() {
        let mut events = DayEvents::new();

        let mut seller = trader("Seller", 1, 1, 0).with_excess(MaterialBag::from_pairs(&[(Material::Window, 1)]));
        let mut buyer = trader("Buyer", 8, 1, 1_000_000);
        buyer.refresh_needs();
        assert!(matches!(
            offer(&mut seller, &mut buyer, Material::Window, 3_450, &mut events),
            TradeOutcome::Executed { quantity: 1, .. }
        ));

        let mut seller = trader("Seller", 1, 2, 0).with_excess(MaterialBag::from_pairs(&[(Material::Window, 1)]));
        let mut buyer = trader("Buyer", 1, 1, 1_000_000);
        buyer.refresh_needs();
        assert_eq!(
            offer(&mut seller, &mut buyer, Material::Window, 3_450, &mut events),
            TradeOutcome::PriceMismatch
        );
    }

    #[test]
    fn test_trade_price_uses_seller_multiplier() {
        let mut events = DayEvents::new();
        let mut seller = trader("Thrall", 1, 3, 100).with_excess(MaterialBag::from_pairs(&[(Material::WallModule, 5)]));
        let mut buyer = trader("Arthas Menethil", 8, 1, 1_000_000);
        buyer.refresh_needs();

        let outcome = offer(&mut seller, &mut buyer, Material::WallModule, 75_000, &mut events);

        assert_eq!(outcome, TradeOutcome::Executed { quantity: 1, price: 225_000 });
        assert_eq!(buyer.money(), 775_000);
        assert_eq!(seller.money(), 225_100);
        assert_eq!(seller.excess[Material::WallModule], 4);
        assert_eq!(buyer.excess[Material::WallModule], 1);
        assert_eq!(buyer.materials_needed[Material::WallModule], 0);
    }

    #[test]
    fn test_unaffordable_trade_moves_nothing() {
        let mut events = DayEvents::new();
        let mut seller = trader("Seller", 1, 8, 0).with_excess(MaterialBag::from_pairs(&[(Material::OutsideDoor, 1)]));
        let mut buyer = trader("Buyer", 8, 1, 10_000);
        buyer.refresh_needs();

        let outcome = offer(&mut seller, &mut buyer, Material::OutsideDoor, 8_500, &mut events);

        assert_eq!(outcome, TradeOutcome::Unaffordable { price: 68_000 });
        assert_eq!(buyer.money(), 10_000);
        assert_eq!(seller.excess[Material::OutsideDoor], 1);
    }

    #[test]
    fn test_settle_flags_excess_underflow() {
        let mut events = DayEvents::new();
        let mut seller = trader("Seller", 1, 1, 0).with_excess(MaterialBag::from_pairs(&[(Material::Door, 1)]));
        let mut buyer = trader("Buyer", 8, 1, 1_000_000);

        let outcome = settle(&mut seller, &mut buyer, Material::Door, 3, 2_500, &mut events);

        assert_eq!(outcome, TradeOutcome::Underflow);
        assert_eq!(seller.excess[Material::Door], 1);
        assert_eq!(buyer.money(), 1_000_000);
        assert!(events.iter().any(|e| matches!(
            e,
            SimEvent::TradeSkipped { reason: Shortfall::ExcessUnderflow, .. }
        )));
    }

    #[test]
    fn test_first_buyer_exhausts_seller() {
        let market = Market::new(&MarketConfig::default());
        let mut events = DayEvents::new();
        // Early asks more than Late will pay, so it cannot pass the door on
        let mut population = vec![
            trader("Seller", 1, 1, 0).with_excess(MaterialBag::from_pairs(&[(Material::OutsideDoor, 1)])),
            trader("Early", 8, 8, 1_000_000),
            trader("Late", 7, 1, 1_000_000),
        ];
        for agent in population.iter_mut() {
            agent.refresh_needs();
        }
        let mut summary = TradingSummary::default();

        match_trades(&mut population, &market, &mut events, &mut summary);

        assert_eq!(summary.trades, 1);
        assert_eq!(population[1].excess[Material::OutsideDoor], 1);
        assert_eq!(population[2].excess[Material::OutsideDoor], 0);
        assert_eq!(population[0].excess[Material::OutsideDoor], 0);
    }

    #[test]
    fn test_bought_units_resold_within_round() {
        let market = Market::new(&MarketConfig::default());
        let mut events = DayEvents::new();
        let mut population = vec![
            trader("Seller", 1, 1, 0).with_excess(MaterialBag::from_pairs(&[(Material::OutsideDoor, 1)])),
            // Both resellers ask more than Seller will pay back
            trader("Early", 8, 2, 1_000_000),
            trader("Late", 8, 8, 1_000_000),
        ];
        for agent in population.iter_mut() {
            agent.refresh_needs();
        }
        let mut summary = TradingSummary::default();

        match_trades(&mut population, &market, &mut events, &mut summary);

        assert_eq!(summary.trades, 2);
        assert_eq!(population[0].excess[Material::OutsideDoor], 0);
        assert_eq!(population[1].excess[Material::OutsideDoor], 0);
        assert_eq!(population[2].excess[Material::OutsideDoor], 1);
        assert_eq!(population[0].money(), 8_500);
        assert_eq!(population[1].money(), 1_000_000 - 8_500 + 17_000);
        assert_eq!(population[2].money(), 1_000_000 - 17_000);

        let trades: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                SimEvent::Trade { seller, buyer, .. } => Some((seller.as_str(), buyer.as_str())),
                _ => None,
            })
            .collect();
        assert_eq!(trades, vec![("Seller", "Early"), ("Early", "Late")]);
    }

    #[test]
    fn test_self_consume_skips_completed_earlier_part() {
        let mut events = DayEvents::new();
        let mut agent = trader("Builder", 1, 1, 0).with_excess(MaterialBag::from_pairs(&[(Material::Window, 5)]));
        for &(material, required) in HousePart::Hall.requirements() {
            agent.houses.focused_mut().supply(HousePart::Hall, material, required);
        }
        agent.refresh_needs();

        let moved = self_consume(&mut agent, &mut events);

        // Hall already holds its window; the garret takes its three
        assert_eq!(moved, 3);
        assert_eq!(agent.focused_house().acquired(HousePart::Hall, Material::Window), 1);
        assert_eq!(agent.focused_house().acquired(HousePart::Garret, Material::Window), 3);
        assert_eq!(agent.focused_house().acquired(HousePart::Floor, Material::Window), 0);
        assert_eq!(agent.excess[Material::Window], 2);
        assert!(events.iter().any(|e| matches!(
            e,
            SimEvent::SelfConsumed {
                part: HousePart::Garret,
                quantity: 3,
                ..
            }
        )));
    }

    #[test]
    fn test_self_consume_fills_current_part() {
        let mut events = DayEvents::new();
        let mut agent = trader("Builder", 1, 1, 0).with_excess(MaterialBag::from_pairs(&[
            (Material::Window, 5),
            (Material::OutsideDoor, 1),
        ]));
        agent.refresh_needs();

        let moved = self_consume(&mut agent, &mut events);

        // Hall takes one outside door and one window; the rest stays in excess
        assert_eq!(moved, 2);
        assert_eq!(agent.focused_house().acquired(HousePart::Hall, Material::Window), 1);
        assert_eq!(agent.focused_house().acquired(HousePart::Hall, Material::OutsideDoor), 1);
        assert_eq!(agent.excess[Material::Window], 4);
        assert_eq!(agent.excess[Material::OutsideDoor], 0);
    }

    #[test]
    fn test_trading_round_completes_supplied_house() {
        let market = Market::new(&MarketConfig::default());
        let mut events = DayEvents::new();
        let mut agent = trader("Builder", 1, 1, 0).with_excess(MaterialBag::from_pairs(&[
            (Material::OutsideDoor, 1),
            (Material::Window, 1),
            (Material::WallModule, 1),
        ]));
        for part in [HousePart::Garret, HousePart::Floor] {
            for &(material, required) in part.requirements() {
                agent.houses.focused_mut().supply(part, material, required);
            }
        }
        let mut population = vec![agent];

        let summary = run_trading_phase(&mut population, &market, &ConstructionConfig::default(), &mut events);

        assert_eq!(summary.units_self_consumed, 3);
        assert_eq!(summary.houses_completed, 1);
        assert_eq!(population[0].houses_built(), 1);
        assert_eq!(population[0].money(), 900_000);
        assert!(population[0].excess.is_empty());
    }
}
