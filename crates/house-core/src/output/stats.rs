//! Statistics Output
//!
//! Collects per-day counters from the event stream and summarizes the run.

use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use house_events::{AgentRecord, Shortfall, SimEvent};

/// Counters for a single day.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DayStats {
    pub day: u32,
    pub events: usize,
    pub purchases: u32,
    pub units_bought: u64,
    pub money_spent: u64,
    pub forced_buys: u32,
    pub shortfalls: u32,
    pub trades: u32,
    pub units_traded: u64,
    pub trade_value: u64,
    pub underflows: u32,
    pub units_self_consumed: u64,
    pub houses_sold: u32,
    pub mutations: u32,
    pub crossovers: u32,
}

impl DayStats {
    fn absorb(&mut self, other: &DayStats) {
        self.events += other.events;
        self.purchases += other.purchases;
        self.units_bought += other.units_bought;
        self.money_spent += other.money_spent;
        self.forced_buys += other.forced_buys;
        self.shortfalls += other.shortfalls;
        self.trades += other.trades;
        self.units_traded += other.units_traded;
        self.trade_value += other.trade_value;
        self.underflows += other.underflows;
        self.units_self_consumed += other.units_self_consumed;
        self.houses_sold += other.houses_sold;
        self.mutations += other.mutations;
        self.crossovers += other.crossovers;
    }
}

/// Overall run statistics
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub days: u32,
    pub seed: u64,
    pub totals: DayStats,
    pub events_by_type: HashMap<String, usize>,
    pub average_events_per_day: f64,
    pub houses_built: u32,
    /// Top of the final ranking
    pub best_agent: Option<AgentRecord>,
    pub day_history: Vec<DayStats>,
}

#[derive(Debug, Default)]
pub struct StatsCollector {
    pub events_by_type: HashMap<String, usize>,
    pub day_history: Vec<DayStats>,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record events from a day
    pub fn record_day<'a>(&mut self, day: u32, events: impl IntoIterator<Item = &'a SimEvent>) -> &DayStats {
        let mut stats = DayStats {
            day,
            ..DayStats::default()
        };

        for event in events {
            stats.events += 1;
            *self.events_by_type.entry(event.kind().to_string()).or_insert(0) += 1;

            match event {
                SimEvent::Purchase { fulfilled, cost, .. } => {
                    stats.purchases += 1;
                    stats.units_bought += u64::from(*fulfilled);
                    stats.money_spent += cost;
                }
                SimEvent::ForcedBuy { .. } => stats.forced_buys += 1,
                SimEvent::Shortfall { .. } => stats.shortfalls += 1,
                SimEvent::Trade { quantity, price, .. } => {
                    stats.trades += 1;
                    stats.units_traded += u64::from(*quantity);
                    stats.trade_value += price;
                }
                SimEvent::TradeSkipped {
                    reason: Shortfall::ExcessUnderflow,
                    ..
                } => stats.underflows += 1,
                SimEvent::SelfConsumed { quantity, .. } => stats.units_self_consumed += u64::from(*quantity),
                SimEvent::HouseSold { .. } => stats.houses_sold += 1,
                SimEvent::Mutated { .. } => stats.mutations += 1,
                SimEvent::Crossover { .. } => stats.crossovers += 1,
                _ => {}
            }
        }

        self.day_history.push(stats);
        &self.day_history[self.day_history.len() - 1]
    }

    pub fn totals(&self) -> DayStats {
        let mut totals = DayStats::default();
        for day in &self.day_history {
            totals.absorb(day);
        }
        totals.day = self.day_history.last().map_or(0, |d| d.day);
        totals
    }

    /// Generate final statistics
    pub fn summarize(&self, seed: u64, ranking: &[AgentRecord]) -> RunSummary {
        let days = self.day_history.len() as u32;
        let totals = self.totals();
        let average_events_per_day = if days > 0 {
            totals.events as f64 / f64::from(days)
        } else {
            0.0
        };

        RunSummary {
            days,
            seed,
            houses_built: ranking.iter().map(|r| r.houses_built).sum(),
            average_events_per_day,
            totals,
            events_by_type: self.events_by_type.clone(),
            best_agent: ranking.first().cloned(),
            day_history: self.day_history.clone(),
        }
    }
}

/// Write the run summary as pretty JSON
pub fn write_summary(path: impl AsRef<Path>, summary: &RunSummary) -> std::io::Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let json = serde_json::to_string_pretty(summary).map_err(std::io::Error::other)?;
    fs::write(path, json)
}
