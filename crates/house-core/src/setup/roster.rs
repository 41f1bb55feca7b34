//! Starting Roster
//!
//! Twelve builders covering every build order twice: six single-house agents
//! and six dual-house agents, with increasing starting capital.

use house_events::HousePart::{self, Floor, Garret, Hall};

use crate::components::Agent;
use crate::config::{AgentSpec, ConfigError, SimConfig};

/// (name, priority_houses, build_order, buyprice, sellprice, money)
const ROSTER: [(&str, u8, [HousePart; 3], u8, u8, u64); 12] = [
    ("Krzysztof Wojcik", 1, [Floor, Hall, Garret], 1, 2, 1_500_000),
    ("Ulf Stenhammare", 1, [Floor, Garret, Hall], 2, 1, 1_550_000),
    ("Musa 1 of Mali", 1, [Garret, Hall, Floor], 1, 1, 1_600_000),
    ("Florida Man", 1, [Garret, Floor, Hall], 2, 3, 1_650_000),
    ("Thrall", 1, [Hall, Floor, Garret], 1, 8, 1_700_000),
    ("Arthas Menethil", 1, [Hall, Garret, Floor], 8, 1, 1_750_000),
    ("Kofi Dube", 2, [Floor, Hall, Garret], 4, 3, 1_800_000),
    ("Kwame Juma", 2, [Floor, Garret, Hall], 4, 5, 1_850_000),
    ("Heisenberg", 2, [Garret, Hall, Floor], 6, 7, 1_900_000),
    ("Fabian", 2, [Garret, Floor, Hall], 5, 6, 1_950_000),
    ("Robin", 2, [Hall, Floor, Garret], 6, 5, 2_000_000),
    ("Hagarin", 2, [Hall, Garret, Floor], 3, 4, 2_550_000),
];

pub fn default_roster() -> Vec<AgentSpec> {
    ROSTER
        .iter()
        .map(|&(name, priority_houses, order, buyprice, sellprice, money)| AgentSpec {
            name: name.to_string(),
            priority_houses,
            build_order: order.to_vec(),
            buyprice,
            sellprice,
            money,
        })
        .collect()
}

/// Creates the starting population in roster order.
pub fn build_population(config: &SimConfig) -> Result<Vec<Agent>, ConfigError> {
    config
        .roster
        .iter()
        .map(|spec| {
            Agent::from_spec(spec, &config.genetics).map_err(|source| ConfigError::Genome {
                agent: spec.name.clone(),
                source,
            })
        })
        .collect()
}
