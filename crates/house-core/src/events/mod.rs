//! Event Buffering and Logging
//!
//! Phases push [`SimEvent`]s into the day's buffer; the scheduler hands the
//! buffer to the statistics collector and the optional JSONL logger at the
//! end of each day.

pub mod logger;

use house_events::SimEvent;

pub use logger::EventLogger;

/// Events produced during the current day.
#[derive(Debug, Default)]
pub struct DayEvents {
    pub events: Vec<SimEvent>,
}

impl DayEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SimEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
