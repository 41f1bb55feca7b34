//! Strategy Genome
//!
//! The heritable strategy of a builder: the order in which house parts are
//! supplied, how many houses are built at once, and the trade price
//! multipliers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use thiserror::Error;

use house_events::{join_build_order, HousePart, PART_COUNT};

/// A permutation of the three house parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<HousePart>", into = "Vec<HousePart>")]
pub struct BuildOrder([HousePart; PART_COUNT]);

impl BuildOrder {
    pub fn new(parts: &[HousePart]) -> Result<Self, GenomeError> {
        let order: [HousePart; PART_COUNT] = parts
            .try_into()
            .map_err(|_| GenomeError::BuildOrder(parts.to_vec()))?;
        for part in HousePart::ALL {
            if !order.contains(&part) {
                return Err(GenomeError::BuildOrder(parts.to_vec()));
            }
        }
        Ok(Self(order))
    }

    pub fn parts(&self) -> &[HousePart; PART_COUNT] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = HousePart> + '_ {
        self.0.iter().copied()
    }

    /// Reorders in place; any shuffle of a permutation is still a permutation.
    pub fn shuffle<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        use rand::seq::SliceRandom;
        self.0.shuffle(rng);
    }
}

impl Default for BuildOrder {
    fn default() -> Self {
        Self(HousePart::ALL)
    }
}

impl fmt::Display for BuildOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_build_order(&self.0))
    }
}

impl TryFrom<Vec<HousePart>> for BuildOrder {
    type Error = GenomeError;

    fn try_from(parts: Vec<HousePart>) -> Result<Self, Self::Error> {
        Self::new(&parts)
    }
}

impl From<BuildOrder> for Vec<HousePart> {
    fn from(order: BuildOrder) -> Self {
        order.0.to_vec()
    }
}

/// Number of houses built concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriorityHouses {
    One,
    Two,
}

impl PriorityHouses {
    pub fn new(count: u8) -> Result<Self, GenomeError> {
        match count {
            1 => Ok(PriorityHouses::One),
            2 => Ok(PriorityHouses::Two),
            other => Err(GenomeError::PriorityHouses(other)),
        }
    }

    pub const fn count(self) -> usize {
        match self {
            PriorityHouses::One => 1,
            PriorityHouses::Two => 2,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            PriorityHouses::One => PriorityHouses::Two,
            PriorityHouses::Two => PriorityHouses::One,
        }
    }
}

impl fmt::Display for PriorityHouses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

/// Heritable strategy tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genome {
    pub build_order: BuildOrder,
    pub priority_houses: PriorityHouses,
    /// Highest seller multiplier this agent accepts when buying
    pub buyprice: u8,
    /// Multiplier applied to the market price when this agent sells
    pub sellprice: u8,
}

impl Genome {
    pub fn new(
        build_order: &[HousePart],
        priority_houses: u8,
        buyprice: u8,
        sellprice: u8,
        price_range: RangeInclusive<u8>,
    ) -> Result<Self, GenomeError> {
        for price in [buyprice, sellprice] {
            if !price_range.contains(&price) {
                return Err(GenomeError::Price {
                    price,
                    min: *price_range.start(),
                    max: *price_range.end(),
                });
            }
        }
        Ok(Self {
            build_order: BuildOrder::new(build_order)?,
            priority_houses: PriorityHouses::new(priority_houses)?,
            buyprice,
            sellprice,
        })
    }

    /// Swaps every gene with `other`.
    pub fn swap_with(&mut self, other: &mut Genome) {
        std::mem::swap(self, other);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenomeError {
    #[error("build order {0:?} is not a permutation of floor, garret and hall")]
    BuildOrder(Vec<HousePart>),
    #[error("priority_houses must be 1 or 2, got {0}")]
    PriorityHouses(u8),
    #[error("price multiplier {price} outside {min}..={max}")]
    Price { price: u8, min: u8, max: u8 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_build_order_must_be_permutation() {
        assert!(BuildOrder::new(&[HousePart::Hall, HousePart::Floor, HousePart::Garret]).is_ok());
        assert!(BuildOrder::new(&[HousePart::Hall, HousePart::Hall, HousePart::Garret]).is_err());
        assert!(BuildOrder::new(&[HousePart::Hall, HousePart::Floor]).is_err());
    }

    #[test]
    fn test_shuffle_keeps_permutation() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut order = BuildOrder::default();
        for _ in 0..20 {
            order.shuffle(&mut rng);
            assert!(BuildOrder::new(order.parts()).is_ok());
        }
    }

    #[test]
    fn test_priority_houses() {
        assert_eq!(PriorityHouses::new(2).unwrap().count(), 2);
        assert_eq!(PriorityHouses::One.toggled(), PriorityHouses::Two);
        assert_eq!(PriorityHouses::new(0), Err(GenomeError::PriorityHouses(0)));
    }

    #[test]
    fn test_genome_price_range() {
        let order = HousePart::ALL;
        assert!(Genome::new(&order, 1, 8, 1, 1..=8).is_ok());
        assert_eq!(
            Genome::new(&order, 1, 9, 1, 1..=8),
            Err(GenomeError::Price { price: 9, min: 1, max: 8 })
        );
        assert!(Genome::new(&order, 1, 1, 0, 1..=8).is_err());
    }

    #[test]
    fn test_build_order_serde() {
        let order: BuildOrder = serde_json::from_str(r#"["garret", "hall", "floor"]"#).unwrap();
        assert_eq!(order.to_string(), "garret, hall, floor");
        assert!(serde_json::from_str::<BuildOrder>(r#"["garret", "garret", "floor"]"#).is_err());
    }
}
