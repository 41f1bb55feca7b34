//! House Construction Progress
//!
//! Per-house material tracking, and the bounded set of house slots an agent
//! works on.

use serde::{Deserialize, Serialize};

use house_events::{HousePart, Material, MaterialBag, PART_COUNT};

use crate::components::genome::BuildOrder;

/// Most houses an agent can build concurrently.
pub const MAX_HOUSE_SLOTS: usize = 2;

/// Materials acquired so far for one house, per part.
///
/// Acquired quantities never exceed the part's requirement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseProgress {
    parts: [MaterialBag; PART_COUNT],
}

impl HouseProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquired(&self, part: HousePart, material: Material) -> u32 {
        self.parts[part.index()][material]
    }

    /// Units still missing for `material` in `part`.
    pub fn remaining(&self, part: HousePart, material: Material) -> u32 {
        part.required(material).saturating_sub(self.acquired(part, material))
    }

    /// Adds up to `quantity` units, capped at the requirement. Returns units applied.
    pub fn supply(&mut self, part: HousePart, material: Material, quantity: u32) -> u32 {
        let applied = quantity.min(self.remaining(part, material));
        self.parts[part.index()].add(material, applied);
        applied
    }

    pub fn is_part_complete(&self, part: HousePart) -> bool {
        part.requirements()
            .iter()
            .all(|&(material, required)| self.acquired(part, material) >= required)
    }

    pub fn is_complete(&self) -> bool {
        HousePart::ALL.into_iter().all(|part| self.is_part_complete(part))
    }

    /// First part in `order` that still has a shortfall.
    pub fn current_part(&self, order: &BuildOrder) -> Option<HousePart> {
        order.iter().find(|&part| !self.is_part_complete(part))
    }

    /// Shortfall of the first unfinished part in `order`, in purchase order.
    ///
    /// Later parts are never looked at while an earlier one is short.
    pub fn deficit(&self, order: &BuildOrder) -> Option<(HousePart, Vec<(Material, u32)>)> {
        let part = self.current_part(order)?;
        let shortfall = part
            .requirements()
            .iter()
            .map(|&(material, _)| (material, self.remaining(part, material)))
            .filter(|&(_, missing)| missing > 0)
            .collect();
        Some((part, shortfall))
    }

    /// All acquired materials, summed across parts.
    pub fn totals(&self) -> MaterialBag {
        let mut totals = MaterialBag::empty();
        for bag in &self.parts {
            totals.merge(bag);
        }
        totals
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Up to [`MAX_HOUSE_SLOTS`] houses under construction, with one in focus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseSlots {
    slots: [HouseProgress; MAX_HOUSE_SLOTS],
    active: usize,
    focus: usize,
}

impl HouseSlots {
    /// `count` empty slots, focus on the first. `count` is clamped to 1..=2.
    pub fn new(count: usize) -> Self {
        Self {
            slots: [HouseProgress::default(); MAX_HOUSE_SLOTS],
            active: count.clamp(1, MAX_HOUSE_SLOTS),
            focus: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.active
    }

    pub fn is_empty(&self) -> bool {
        self.active == 0
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused(&self) -> &HouseProgress {
        &self.slots[self.focus]
    }

    pub fn focused_mut(&mut self) -> &mut HouseProgress {
        &mut self.slots[self.focus]
    }

    pub fn get(&self, index: usize) -> Option<&HouseProgress> {
        self.slots[..self.active].get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HouseProgress> {
        self.slots[..self.active].iter()
    }

    /// Moves focus to the other slot; a no-op with a single slot.
    pub fn switch_focus(&mut self) {
        if self.active == MAX_HOUSE_SLOTS {
            self.focus = 1 - self.focus;
        }
    }

    /// Opens a fresh, empty slot. Returns false when already full.
    pub fn push_empty(&mut self) -> bool {
        if self.active == MAX_HOUSE_SLOTS {
            return false;
        }
        self.slots[self.active].reset();
        self.active += 1;
        true
    }

    /// Drops the last slot and returns the materials it held.
    ///
    /// The only slot is never dropped. Focus falls back to the first slot.
    pub fn pop(&mut self) -> Option<MaterialBag> {
        if self.active <= 1 {
            return None;
        }
        self.active -= 1;
        let totals = self.slots[self.active].totals();
        self.slots[self.active].reset();
        if self.focus >= self.active {
            self.focus = 0;
        }
        Some(totals)
    }
}
