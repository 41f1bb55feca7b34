//! Mutation
//!
//! Each agent runs four independent gates at `mutation_rate`: shuffle the
//! build order, toggle the number of concurrent houses, and resample each
//! trade price multiplier.

use rand::Rng;
use tracing::debug;

use house_events::{Gene, SimEvent};

use crate::components::Agent;
use crate::config::GeneticsConfig;
use crate::events::DayEvents;
use crate::systems::crossover::reconcile;

/// Mutates every agent in population order. Returns the number of genes changed.
pub fn run_mutation_phase<R: Rng + ?Sized>(
    population: &mut [Agent],
    rules: &GeneticsConfig,
    rng: &mut R,
    events: &mut DayEvents,
) -> u32 {
    population
        .iter_mut()
        .map(|agent| mutate(agent, rules, rng, events))
        .sum()
}

pub fn mutate<R: Rng + ?Sized>(
    agent: &mut Agent,
    rules: &GeneticsConfig,
    rng: &mut R,
    events: &mut DayEvents,
) -> u32 {
    let mut mutated = 0;

    if rng.gen::<f64>() < rules.mutation_rate {
        let from = agent.genome.build_order.to_string();
        agent.genome.build_order.shuffle(rng);
        let to = agent.genome.build_order.to_string();
        record(agent, Gene::BuildOrder, from, to, events);
        mutated += 1;
    }

    if rng.gen::<f64>() < rules.mutation_rate {
        let from = agent.genome.priority_houses;
        agent.genome.priority_houses = from.toggled();
        let to = agent.genome.priority_houses;
        record(agent, Gene::PriorityHouses, from.to_string(), to.to_string(), events);
        mutated += 1;
        reconcile(agent, events);
    }

    if rng.gen::<f64>() < rules.mutation_rate {
        let from = agent.genome.buyprice;
        agent.genome.buyprice = rng.gen_range(rules.min_price..=rules.max_price);
        let to = agent.genome.buyprice;
        record(agent, Gene::BuyPrice, from.to_string(), to.to_string(), events);
        mutated += 1;
    }

    if rng.gen::<f64>() < rules.mutation_rate {
        let from = agent.genome.sellprice;
        agent.genome.sellprice = rng.gen_range(rules.min_price..=rules.max_price);
        let to = agent.genome.sellprice;
        record(agent, Gene::SellPrice, from.to_string(), to.to_string(), events);
        mutated += 1;
    }

    mutated
}

fn record(agent: &Agent, gene: Gene, from: String, to: String, events: &mut DayEvents) {
    debug!(agent = %agent.name, ?gene, %from, %to, "mutation");
    events.push(SimEvent::Mutated {
        agent: agent.name.clone(),
        gene,
        from,
        to,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{BuildOrder, Genome, PriorityHouses};
    use house_events::{HousePart, Material};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn agent(priority: u8) -> Agent {
        Agent::new(
            "Heisenberg",
            Genome::new(&[HousePart::Garret, HousePart::Hall, HousePart::Floor], priority, 6, 7, 1..=8).unwrap(),
            1_900_000,
        )
    }

    fn rate(mutation_rate: f64) -> GeneticsConfig {
        GeneticsConfig {
            mutation_rate,
            ..GeneticsConfig::default()
        }
    }

    #[test]
    fn test_zero_rate_changes_nothing() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut events = DayEvents::new();
        let mut a = agent(2);
        let before = a.clone();

        assert_eq!(mutate(&mut a, &rate(0.0), &mut rng, &mut events), 0);
        assert_eq!(a, before);
        assert!(events.is_empty());
    }

    #[test]
    fn test_full_rate_mutates_every_gene() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut events = DayEvents::new();
        let mut a = agent(1);

        assert_eq!(mutate(&mut a, &rate(1.0), &mut rng, &mut events), 4);
        assert_eq!(a.genome.priority_houses, PriorityHouses::Two);
        assert_eq!(a.houses.len(), 2);
        assert!((1..=8).contains(&a.genome.buyprice));
        assert!((1..=8).contains(&a.genome.sellprice));
        assert!(BuildOrder::new(a.genome.build_order.parts()).is_ok());
    }

    #[test]
    fn test_priority_toggle_down_flushes_slot() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut events = DayEvents::new();
        let mut a = agent(2);
        a.houses.switch_focus();
        a.houses.focused_mut().supply(HousePart::Floor, Material::Door, 7);

        mutate(&mut a, &rate(1.0), &mut rng, &mut events);

        assert_eq!(a.genome.priority_houses, PriorityHouses::One);
        assert_eq!(a.houses.len(), 1);
        assert_eq!(a.excess[Material::Door], 7);
    }

    #[test]
    fn test_prices_stay_in_range() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut events = DayEvents::new();
        let rules = rate(1.0);
        let mut a = agent(1);
        for _ in 0..200 {
            mutate(&mut a, &rules, &mut rng, &mut events);
            assert!((rules.min_price..=rules.max_price).contains(&a.genome.buyprice));
            assert!((rules.min_price..=rules.max_price).contains(&a.genome.sellprice));
            assert_eq!(a.houses.len(), a.genome.priority_houses.count());
        }
    }
}
