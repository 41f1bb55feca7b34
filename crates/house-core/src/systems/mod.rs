//! Simulation Systems
//!
//! The per-day phases: construction, trading, and the genetic operators
//! (fitness, selection, crossover, mutation).

pub mod construction;
pub mod crossover;
pub mod fitness;
pub mod mutation;
pub mod selection;
pub mod trading;

pub use construction::{construct, run_construction_phase, StepOutcome};
pub use crossover::{crossover, run_crossover};
pub use fitness::{fitness, fitness_scores, rank_population};
pub use mutation::{mutate, run_mutation_phase};
pub use selection::roulette_select;
pub use trading::{offer, run_trading_phase, self_consume, settle, TradeOutcome, TradingSummary};

use crate::components::Agent;

/// Mutable references to two distinct agents, in argument order.
pub(crate) fn pair_mut(population: &mut [Agent], i: usize, j: usize) -> Option<(&mut Agent, &mut Agent)> {
    if i == j || i >= population.len() || j >= population.len() {
        return None;
    }
    if i < j {
        let (head, tail) = population.split_at_mut(j);
        Some((&mut head[i], &mut tail[0]))
    } else {
        let (head, tail) = population.split_at_mut(i);
        Some((&mut tail[0], &mut head[j]))
    }
}
