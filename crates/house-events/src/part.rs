//! House Parts
//!
//! A house is built from three parts, each with a fixed bill of materials.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::material::{Material, MaterialBag};

/// Number of parts in a house.
pub const PART_COUNT: usize = 3;

/// One section of a house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HousePart {
    /// Four bedrooms, two bathrooms and a living room.
    Floor,
    Garret,
    Hall,
}

const FLOOR_REQUIREMENTS: &[(Material, u32)] = &[
    (Material::Window, 11),
    (Material::Door, 7),
    (Material::WallModule, 7),
    (Material::ToiletSeat, 2),
    (Material::Tab, 2),
    (Material::ShowerCabin, 2),
];

const GARRET_REQUIREMENTS: &[(Material, u32)] = &[
    (Material::Window, 3),
    (Material::Door, 1),
    (Material::WallModule, 1),
];

const HALL_REQUIREMENTS: &[(Material, u32)] = &[
    (Material::OutsideDoor, 1),
    (Material::Window, 1),
    (Material::WallModule, 1),
];

impl HousePart {
    pub const ALL: [HousePart; PART_COUNT] = [HousePart::Floor, HousePart::Garret, HousePart::Hall];

    pub const fn index(self) -> usize {
        match self {
            HousePart::Floor => 0,
            HousePart::Garret => 1,
            HousePart::Hall => 2,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            HousePart::Floor => "floor",
            HousePart::Garret => "garret",
            HousePart::Hall => "hall",
        }
    }

    /// Bill of materials, in the order purchases for this part are placed.
    pub const fn requirements(self) -> &'static [(Material, u32)] {
        match self {
            HousePart::Floor => FLOOR_REQUIREMENTS,
            HousePart::Garret => GARRET_REQUIREMENTS,
            HousePart::Hall => HALL_REQUIREMENTS,
        }
    }

    /// Required quantity of `material`, zero when the part does not use it.
    pub fn required(self, material: Material) -> u32 {
        self.requirements()
            .iter()
            .find(|(m, _)| *m == material)
            .map_or(0, |&(_, q)| q)
    }

    pub fn uses(self, material: Material) -> bool {
        self.required(material) > 0
    }

    pub fn requirement_bag(self) -> MaterialBag {
        MaterialBag::from_pairs(self.requirements())
    }
}

impl fmt::Display for HousePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Materials needed for one complete house.
pub fn house_requirements() -> MaterialBag {
    let mut total = MaterialBag::empty();
    for part in HousePart::ALL {
        total.merge(&part.requirement_bag());
    }
    total
}
