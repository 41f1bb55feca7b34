//! Simulation Context
//!
//! Everything a run owns: configuration, the population, the shared market,
//! the seeded RNG, the day's event buffer and the statistics collector. Every
//! phase receives the pieces it needs from here.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use house_events::AgentRecord;

use crate::components::Agent;
use crate::config::{ConfigError, SimConfig};
use crate::events::DayEvents;
use crate::market::Market;
use crate::output::{RunSummary, StatsCollector};
use crate::setup::build_population;
use crate::systems::fitness;

pub struct SimulationContext {
    pub config: SimConfig,
    /// Last completed day; 0 before the first day runs
    pub day: u32,
    pub population: Vec<Agent>,
    pub market: Market,
    pub rng: SmallRng,
    pub events: DayEvents,
    pub stats: StatsCollector,
}

impl SimulationContext {
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let population = build_population(&config)?;
        let market = Market::new(&config.market);
        let rng = SmallRng::seed_from_u64(config.simulation.seed);

        Ok(Self {
            config,
            day: 0,
            population,
            market,
            rng,
            events: DayEvents::new(),
            stats: StatsCollector::new(),
        })
    }

    pub fn is_finished(&self) -> bool {
        self.day >= self.config.simulation.days
    }

    pub fn agent(&self, name: &str) -> Option<&Agent> {
        self.population.iter().find(|agent| agent.name == name)
    }

    /// Export rows in current population order.
    pub fn records(&self) -> Vec<AgentRecord> {
        let scale = self.config.genetics.fitness_money_scale;
        self.population
            .iter()
            .map(|agent| agent.record(fitness(agent, scale)))
            .collect()
    }

    pub fn summarize(&self) -> RunSummary {
        self.stats.summarize(self.config.simulation.seed, &self.records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_is_fresh() {
        let ctx = SimulationContext::new(SimConfig::reference()).unwrap();
        assert_eq!(ctx.day, 0);
        assert_eq!(ctx.population.len(), 12);
        assert_eq!(ctx.market.inventory(), ctx.market.capacity());
        assert!(ctx.events.is_empty());
        assert!(!ctx.is_finished());
    }

    #[test]
    fn test_records_carry_fitness() {
        let ctx = SimulationContext::new(SimConfig::reference()).unwrap();
        let records = ctx.records();
        let hagarin = records.iter().find(|r| r.name == "Hagarin").unwrap();
        assert!((hagarin.fitness - 2.55).abs() < 1e-12);
        assert_eq!(hagarin.build_order, "hall, garret, floor");
        assert!(ctx.agent("Hagarin").is_some());
        assert!(ctx.agent("Nobody").is_none());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = SimConfig::reference();
        config.genetics.max_price = 9;
        assert!(SimulationContext::new(config).is_err());
    }
}
