//! Export Records
//!
//! Row types written by the statistics sinks at the end of a run.

use serde::{Deserialize, Serialize};

use crate::part::HousePart;

/// Final state of one agent, one row per agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub name: String,
    pub priority_houses: u8,
    /// Build order joined with `", "`, e.g. `"floor, garret, hall"`.
    pub build_order: String,
    pub buyprice: u8,
    pub sellprice: u8,
    pub fitness: f64,
    pub houses_built: u32,
    pub money: u64,
    /// Units held in the excess pool, summed over all materials.
    pub total_excess: u64,
}

impl AgentRecord {
    /// Column names, in field order.
    pub const COLUMNS: [&'static str; 9] = [
        "name",
        "priority_houses",
        "build_order",
        "buyprice",
        "sellprice",
        "fitness",
        "houses_built",
        "money",
        "total_excess",
    ];
}

/// Joins a build order the way it appears in exported rows.
pub fn join_build_order(order: &[HousePart]) -> String {
    order
        .iter()
        .map(|part| part.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_build_order() {
        let order = [HousePart::Hall, HousePart::Floor, HousePart::Garret];
        assert_eq!(join_build_order(&order), "hall, floor, garret");
    }

    #[test]
    fn test_record_field_names_match_columns() {
        let record = AgentRecord {
            name: "Fabian".into(),
            priority_houses: 2,
            build_order: "garret, floor, hall".into(),
            buyprice: 5,
            sellprice: 6,
            fitness: 1.95,
            houses_built: 0,
            money: 1_950_000,
            total_excess: 0,
        };
        let json = serde_json::to_value(&record).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), AgentRecord::COLUMNS.len());
        for column in AgentRecord::COLUMNS {
            assert!(object.contains_key(column), "missing column {column}");
        }
    }
}
