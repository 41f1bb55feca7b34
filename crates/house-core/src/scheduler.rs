//! Day Scheduler
//!
//! Drives the day loop. Days are numbered from 1; a phase with interval `n`
//! runs on every day divisible by `n`. Per day the order is: restock, trading
//! or construction, mutation, genetic algorithm, then re-ranking.

use tracing::{debug, info};

use house_events::{Phase, SimEvent};

use crate::config::SimulationConfig;
use crate::context::SimulationContext;
use crate::events::EventLogger;
use crate::systems::{
    fitness_scores, rank_population, roulette_select, run_construction_phase, run_crossover,
    run_mutation_phase, run_trading_phase,
};

/// Which optional phases run on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DaySchedule {
    pub restock: bool,
    /// Trading replaces construction
    pub trading: bool,
    pub mutation: bool,
    pub genetic: bool,
}

impl DaySchedule {
    pub fn for_day(day: u32, sim: &SimulationConfig) -> Self {
        let every = |interval: u32| interval > 0 && day % interval == 0;
        Self {
            restock: every(sim.restock_interval),
            trading: every(sim.trading_interval),
            mutation: every(sim.mutation_interval),
            genetic: every(sim.genetic_interval),
        }
    }
}

/// Runs the next day and returns its events.
pub fn run_day(ctx: &mut SimulationContext) -> Vec<SimEvent> {
    ctx.day += 1;
    let day = ctx.day;
    let schedule = DaySchedule::for_day(day, &ctx.config.simulation);
    let scale = ctx.config.genetics.fitness_money_scale;

    if schedule.restock {
        info!(day, "restocking market");
        ctx.events.push(SimEvent::PhaseStarted { phase: Phase::Restock });
        ctx.market.restock();
    }

    if schedule.trading {
        ctx.events.push(SimEvent::PhaseStarted { phase: Phase::Trading });
        let summary = run_trading_phase(
            &mut ctx.population,
            &ctx.market,
            &ctx.config.construction,
            &mut ctx.events,
        );
        info!(
            day,
            trades = summary.trades,
            units = summary.units_traded,
            value = summary.value_traded,
            underflows = summary.underflows,
            self_consumed = summary.units_self_consumed,
            houses = summary.houses_completed,
            "trading day"
        );
    } else {
        ctx.events.push(SimEvent::PhaseStarted { phase: Phase::Construction });
        run_construction_phase(
            &mut ctx.population,
            &mut ctx.market,
            &ctx.config.construction,
            &mut ctx.rng,
            &mut ctx.events,
        );
    }

    if schedule.mutation {
        ctx.events.push(SimEvent::PhaseStarted { phase: Phase::Mutation });
        let genes = run_mutation_phase(&mut ctx.population, &ctx.config.genetics, &mut ctx.rng, &mut ctx.events);
        info!(day, genes, "mutation day");
    }

    if schedule.genetic {
        ctx.events.push(SimEvent::PhaseStarted { phase: Phase::Genetic });
        run_genetic_phase(ctx);
    }

    rank_population(&mut ctx.population, scale);

    let events = ctx.events.drain();
    let stats = ctx.stats.record_day(day, &events);
    debug!(day, events = stats.events, purchases = stats.purchases, houses_sold = stats.houses_sold, "day complete");
    events
}

/// Rank, draw parents by roulette wheel and cross them in pairs.
fn run_genetic_phase(ctx: &mut SimulationContext) {
    let scale = ctx.config.genetics.fitness_money_scale;
    rank_population(&mut ctx.population, scale);

    let scores = fitness_scores(&ctx.population, scale);
    let selected = roulette_select(&scores, ctx.config.genetics.selection_size, &mut ctx.rng);
    let names: Vec<String> = selected.iter().map(|&i| ctx.population[i].name.clone()).collect();

    info!(day = ctx.day, selected = ?names, "genetic algorithm day");
    ctx.events.push(SimEvent::Selected { agents: names });
    run_crossover(&mut ctx.population, &selected, &mut ctx.events);
}

/// Runs every remaining day, handing each day's events to `logger`.
pub fn run(ctx: &mut SimulationContext, logger: &mut EventLogger) -> std::io::Result<()> {
    info!(
        days = ctx.config.simulation.days,
        seed = ctx.config.simulation.seed,
        agents = ctx.population.len(),
        "starting simulation"
    );

    while !ctx.is_finished() {
        let events = run_day(ctx);
        logger.log_batch(ctx.day, &events)?;

        if ctx.day % 10 == 0 {
            info!(day = ctx.day, total = ctx.config.simulation.days, "progress");
        }
    }
    logger.flush()?;

    let houses: u32 = ctx.population.iter().map(|a| a.houses_built()).sum();
    info!(
        days = ctx.day,
        houses,
        logged_events = logger.event_count(),
        "simulation complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    #[test]
    fn test_schedule_predicates() {
        let sim = SimulationConfig::default();
        assert_eq!(DaySchedule::for_day(1, &sim), DaySchedule::default());
        assert!(DaySchedule::for_day(5, &sim).trading);
        assert!(DaySchedule::for_day(6, &sim).mutation);
        assert!(DaySchedule::for_day(9, &sim).restock);

        let day_30 = DaySchedule::for_day(30, &sim);
        assert!(day_30.trading && day_30.mutation && day_30.genetic);
        assert!(!day_30.restock);

        let day_45 = DaySchedule::for_day(45, &sim);
        assert!(day_45.restock && day_45.trading && day_45.genetic);
        assert!(!day_45.mutation);
    }

    #[test]
    fn test_first_day_is_construction() {
        let mut ctx = SimulationContext::new(SimConfig::reference()).unwrap();
        let events = run_day(&mut ctx);

        assert_eq!(ctx.day, 1);
        assert!(events.iter().any(|e| matches!(e, SimEvent::Purchase { .. })));
        assert!(!events.iter().any(|e| matches!(e, SimEvent::Trade { .. })));
        assert!(ctx.events.is_empty());
        assert_eq!(ctx.stats.day_history.len(), 1);
    }

    #[test]
    fn test_trading_day_buys_nothing_from_market() {
        let mut ctx = SimulationContext::new(SimConfig::reference()).unwrap();
        for _ in 0..4 {
            run_day(&mut ctx);
        }
        let inventory = *ctx.market.inventory();
        let events = run_day(&mut ctx);

        assert_eq!(ctx.day, 5);
        assert!(events
            .iter()
            .any(|e| matches!(e, SimEvent::PhaseStarted { phase: Phase::Trading })));
        assert!(!events.iter().any(|e| matches!(e, SimEvent::Purchase { .. })));
        assert_eq!(*ctx.market.inventory(), inventory);
    }

    #[test]
    fn test_restock_day_emits_single_event() {
        let mut ctx = SimulationContext::new(SimConfig::reference()).unwrap();
        for _ in 0..8 {
            run_day(&mut ctx);
        }
        let events = run_day(&mut ctx);

        assert_eq!(ctx.day, 9);
        let restocks = events
            .iter()
            .filter(|e| matches!(e, SimEvent::PhaseStarted { phase: Phase::Restock }))
            .count();
        assert_eq!(restocks, 1);
    }

    #[test]
    fn test_population_ranked_after_each_day() {
        let mut ctx = SimulationContext::new(SimConfig::reference()).unwrap();
        for _ in 0..15 {
            run_day(&mut ctx);
            let scores = fitness_scores(&ctx.population, ctx.config.genetics.fitness_money_scale);
            assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        }
        assert!(ctx.stats.day_history[14].crossovers <= 2);
    }

    #[test]
    fn test_run_stops_at_configured_days() {
        let mut config = SimConfig::reference();
        config.simulation.days = 7;
        let mut ctx = SimulationContext::new(config).unwrap();
        let mut logger = EventLogger::null();

        run(&mut ctx, &mut logger).unwrap();

        assert_eq!(ctx.day, 7);
        assert!(ctx.is_finished());
        assert_eq!(ctx.stats.day_history.len(), 7);
        assert!(logger.event_count() > 0);
    }
}
