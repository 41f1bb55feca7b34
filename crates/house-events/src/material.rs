//! Material Types
//!
//! The seven building materials traded on the market, and the fixed-schema
//! bag used everywhere a per-material quantity is tracked.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Number of distinct materials.
pub const MATERIAL_COUNT: usize = 7;

/// A building material sold by the market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    Door,
    OutsideDoor,
    Window,
    WallModule,
    ToiletSeat,
    Tab,
    ShowerCabin,
}

impl Material {
    /// Every material, in catalogue order.
    pub const ALL: [Material; MATERIAL_COUNT] = [
        Material::Door,
        Material::OutsideDoor,
        Material::Window,
        Material::WallModule,
        Material::ToiletSeat,
        Material::Tab,
        Material::ShowerCabin,
    ];

    /// Position of this material in [`Material::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Material::Door => 0,
            Material::OutsideDoor => 1,
            Material::Window => 2,
            Material::WallModule => 3,
            Material::ToiletSeat => 4,
            Material::Tab => 5,
            Material::ShowerCabin => 6,
        }
    }

    /// Snake-case name, matching the serialized form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Material::Door => "door",
            Material::OutsideDoor => "outside_door",
            Material::Window => "window",
            Material::WallModule => "wall_module",
            Material::ToiletSeat => "toilet_seat",
            Material::Tab => "tab",
            Material::ShowerCabin => "shower_cabin",
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A quantity per material.
///
/// Every material always has an entry, so a missing or misspelled key cannot
/// occur. Serializes as a map keyed by material name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MaterialMap", into = "MaterialMap")]
pub struct MaterialBag {
    counts: [u32; MATERIAL_COUNT],
}

impl MaterialBag {
    /// An all-zero bag.
    pub const fn empty() -> Self {
        Self {
            counts: [0; MATERIAL_COUNT],
        }
    }

    /// Builds a bag from `(material, quantity)` pairs; repeated materials add up.
    pub fn from_pairs(pairs: &[(Material, u32)]) -> Self {
        let mut bag = Self::empty();
        for &(material, quantity) in pairs {
            bag.add(material, quantity);
        }
        bag
    }

    pub fn get(&self, material: Material) -> u32 {
        self.counts[material.index()]
    }

    pub fn set(&mut self, material: Material, quantity: u32) {
        self.counts[material.index()] = quantity;
    }

    pub fn add(&mut self, material: Material, quantity: u32) {
        let slot = &mut self.counts[material.index()];
        *slot = slot.saturating_add(quantity);
    }

    /// Removes up to `quantity` units and returns how many were actually removed.
    pub fn take(&mut self, material: Material, quantity: u32) -> u32 {
        let slot = &mut self.counts[material.index()];
        let taken = quantity.min(*slot);
        *slot -= taken;
        taken
    }

    /// Adds every quantity of `other` into this bag.
    pub fn merge(&mut self, other: &MaterialBag) {
        for material in Material::ALL {
            self.add(material, other.get(material));
        }
    }

    /// Total units across all materials.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&q| u64::from(q)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&q| q == 0)
    }

    /// Non-zero entries in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = (Material, u32)> + '_ {
        Material::ALL
            .into_iter()
            .map(|m| (m, self.get(m)))
            .filter(|&(_, q)| q > 0)
    }
}

impl Index<Material> for MaterialBag {
    type Output = u32;

    fn index(&self, material: Material) -> &u32 {
        &self.counts[material.index()]
    }
}

impl IndexMut<Material> for MaterialBag {
    fn index_mut(&mut self, material: Material) -> &mut u32 {
        &mut self.counts[material.index()]
    }
}

/// Serialized shape of a [`MaterialBag`]: one entry per material.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct MaterialMap {
    door: u32,
    outside_door: u32,
    window: u32,
    wall_module: u32,
    toilet_seat: u32,
    tab: u32,
    shower_cabin: u32,
}

impl From<MaterialMap> for MaterialBag {
    fn from(map: MaterialMap) -> Self {
        Self {
            counts: [
                map.door,
                map.outside_door,
                map.window,
                map.wall_module,
                map.toilet_seat,
                map.tab,
                map.shower_cabin,
            ],
        }
    }
}

impl From<MaterialBag> for MaterialMap {
    fn from(bag: MaterialBag) -> Self {
        let [door, outside_door, window, wall_module, toilet_seat, tab, shower_cabin] = bag.counts;
        Self {
            door,
            outside_door,
            window,
            wall_module,
            toilet_seat,
            tab,
            shower_cabin,
        }
    }
}
