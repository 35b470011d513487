//! Named annotation anchor slots.
//!
//! Collision avoidance is a pre-defined partition, not geometric computation:
//! each figure has exactly four corner slots, each consumable once. The
//! caller picks a semantically sensible slot for each label (a point near the
//! lower-left belongs in `LeftBottom`); nothing detects overlap at runtime.

use glam::DVec2;

use crate::errors::LayoutError;
use crate::layout::Layout;

/// The four corner slots of the quadrant scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotName {
    LeftBottom,
    RightMiddle,
    RightSpace,
    LeftTop,
}

impl SlotName {
    /// All slots, in allocation order.
    pub const ALL: [SlotName; 4] = [
        SlotName::LeftBottom,
        SlotName::RightMiddle,
        SlotName::RightSpace,
        SlotName::LeftTop,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SlotName::LeftBottom => "left_bottom",
            SlotName::RightMiddle => "right_middle",
            SlotName::RightSpace => "right_space",
            SlotName::LeftTop => "left_top",
        }
    }

    /// Anchor position as fractions of the x/y axis spans.
    fn fractions(self) -> (f64, f64) {
        match self {
            SlotName::LeftBottom => (0.06, 0.05),
            SlotName::RightMiddle => (0.36, 0.10),
            SlotName::RightSpace => (0.88, 0.14),
            SlotName::LeftTop => (0.68, 0.90),
        }
    }
}

/// A named anchor in data space, scoped to one figure.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionSlot {
    pub name: SlotName,
    /// Anchor point for the label box, in data coordinates.
    pub anchor: DVec2,
}

/// Per-figure slot bookkeeping.
#[derive(Clone, Debug)]
pub struct PositionSlotAllocator {
    slots: [(PositionSlot, bool); SlotName::ALL.len()],
}

impl PositionSlotAllocator {
    /// Derive the slot anchors from a layout's limits.
    pub fn for_layout(layout: &Layout) -> Self {
        let slots = SlotName::ALL.map(|name| {
            let (fx, fy) = name.fractions();
            (
                PositionSlot {
                    name,
                    anchor: layout.at_fraction(fx, fy),
                },
                false,
            )
        });
        PositionSlotAllocator { slots }
    }

    /// Number of slots not yet consumed.
    pub fn available(&self) -> usize {
        self.slots.iter().filter(|(_, taken)| !taken).count()
    }

    /// Consume the first `n_labels` free slots in declaration order.
    pub fn allocate(&mut self, n_labels: usize) -> Result<Vec<PositionSlot>, LayoutError> {
        let available = self.available();
        if n_labels > available {
            return Err(LayoutError::InsufficientSlots {
                requested: n_labels,
                available,
            });
        }
        let mut out = Vec::with_capacity(n_labels);
        for (slot, taken) in self.slots.iter_mut() {
            if out.len() == n_labels {
                break;
            }
            if !*taken {
                *taken = true;
                out.push(*slot);
            }
        }
        Ok(out)
    }

    /// Consume one specific slot by name.
    pub fn take(&mut self, name: SlotName) -> Result<PositionSlot, LayoutError> {
        // Slots are laid out in declaration order, so the name is the index.
        let entry = &mut self.slots[name as usize];
        if entry.1 {
            return Err(LayoutError::SlotTaken { name: name.name() });
        }
        entry.1 = true;
        Ok(entry.0)
    }
}
