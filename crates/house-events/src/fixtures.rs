//! Sample data fixtures for testing.
//!
//! Enable the `test-fixtures` feature to access these helpers from other
//! crates' tests.

use crate::{AgentRecord, LoggedEvent, Material, Shortfall, SimEvent};

/// A handful of events covering purchases, trades and a flagged underflow.
pub fn sample_events() -> Vec<LoggedEvent> {
    let events = vec![
        SimEvent::Purchase {
            agent: "Thrall".into(),
            material: Material::OutsideDoor,
            requested: 1,
            fulfilled: 1,
            cost: 8_500,
        },
        SimEvent::Shortfall {
            agent: "Florida Man".into(),
            material: Material::WallModule,
            reason: Shortfall::InsufficientInventory,
        },
        SimEvent::Trade {
            seller: "Robin".into(),
            buyer: "Arthas Menethil".into(),
            material: Material::Window,
            quantity: 1,
            price: 17_250,
        },
        SimEvent::TradeSkipped {
            seller: "Robin".into(),
            buyer: "Kofi Dube".into(),
            material: Material::Window,
            reason: Shortfall::ExcessUnderflow,
        },
    ];

    events
        .into_iter()
        .enumerate()
        .map(|(i, event)| LoggedEvent {
            event_id: crate::generate_event_id(i as u64 + 1),
            day: 5,
            event,
        })
        .collect()
}

/// One exported row with plausible end-of-run values.
pub fn sample_record() -> AgentRecord {
    AgentRecord {
        name: "Heisenberg".into(),
        priority_houses: 2,
        build_order: "garret, hall, floor".into(),
        buyprice: 6,
        sellprice: 7,
        fitness: 3.2,
        houses_built: 2,
        money: 1_200_000,
        total_excess: 4,
    }
}
