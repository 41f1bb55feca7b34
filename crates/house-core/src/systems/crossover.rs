//! Crossover
//!
//! Selected agents are paired in draw order and swap their whole genome.
//! House slots follow the swapped `priority_houses`: a partner dropping from
//! two houses to one moves its second house's materials into excess first,
//! and a partner rising to two opens an empty slot.

use tracing::debug;

use house_events::SimEvent;

use crate::components::{Agent, SlotChange};
use crate::events::DayEvents;
use crate::systems::pair_mut;

/// Crosses `selected` population indices in consecutive pairs.
///
/// A trailing unpaired index is ignored, as is a pair drawing the same agent
/// twice. Returns the number of crossovers performed.
pub fn run_crossover(population: &mut [Agent], selected: &[usize], events: &mut DayEvents) -> u32 {
    let mut performed = 0;

    for pair in selected.chunks_exact(2) {
        let Some((first, second)) = pair_mut(population, pair[0], pair[1]) else {
            continue;
        };
        crossover(first, second, events);
        performed += 1;
    }

    performed
}

/// Swaps genomes between two agents and reconciles their house slots.
pub fn crossover(first: &mut Agent, second: &mut Agent, events: &mut DayEvents) {
    let first_slots = first.houses.len();
    let second_slots = second.houses.len();

    // The partner currently tracking more houses is about to drop one
    if first_slots > second_slots {
        flush_extra_slot(first, events);
    } else if second_slots > first_slots {
        flush_extra_slot(second, events);
    }

    first.genome.swap_with(&mut second.genome);

    for agent in [&mut *first, &mut *second] {
        reconcile(agent, events);
    }

    debug!(first = %first.name, second = %second.name, "crossover");
    events.push(SimEvent::Crossover {
        first: first.name.clone(),
        second: second.name.clone(),
    });
}

fn flush_extra_slot(agent: &mut Agent, events: &mut DayEvents) {
    if let Some(flushed) = agent.houses.pop() {
        agent.excess.merge(&flushed);
        events.push(SimEvent::SlotFlushed {
            agent: agent.name.clone(),
            units: flushed.total(),
        });
    }
}

/// Applies [`Agent::reconcile_slots`] and records what changed.
pub(crate) fn reconcile(agent: &mut Agent, events: &mut DayEvents) {
    match agent.reconcile_slots() {
        SlotChange::Unchanged => {}
        SlotChange::Flushed(units) => events.push(SimEvent::SlotFlushed {
            agent: agent.name.clone(),
            units,
        }),
        SlotChange::Added => events.push(SimEvent::SlotAdded {
            agent: agent.name.clone(),
        }),
    }
}
