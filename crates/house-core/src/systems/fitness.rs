//! Fitness Scoring
//!
//! Fitness blends completed houses with normalized remaining wealth:
//! `houses_built + money / scale`.

use crate::components::Agent;

pub fn fitness(agent: &Agent, money_scale: f64) -> f64 {
    f64::from(agent.houses_built()) + agent.money() as f64 / money_scale
}

/// Fitness of every agent, in population order.
pub fn fitness_scores(population: &[Agent], money_scale: f64) -> Vec<f64> {
    population.iter().map(|agent| fitness(agent, money_scale)).collect()
}

/// Sorts the population by fitness, highest first. Ties keep their order.
pub fn rank_population(population: &mut [Agent], money_scale: f64) {
    population.sort_by(|a, b| fitness(b, money_scale).total_cmp(&fitness(a, money_scale)));
}
