//! Cosmetic ("ornament") classification.
//!
//! An item is an ornament when any one of three signals fires: a cosmetic
//! augmentation type, a slot compatibility list made only of cosmetic slot
//! codes, or the word "ornament" in its name. Each signal alone misses some
//! real ornaments, so all three are always consulted.

use serde::Serialize;

pub const COSMETIC_AUG_TYPES: [u32; 3] = [20, 21, 22];
pub const COSMETIC_SLOT_CODES: [u16; 2] = [21, 22];

/// Which signals flagged an item; empty when the item is not an ornament.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OrnamentSignals {
    pub cosmetic_aug_type: bool,
    pub cosmetic_slots_only: bool,
    pub ornament_name: bool,
}

impl OrnamentSignals {
    pub fn evaluate(aug_type: u32, slot_compat: &[u16], name: &str) -> Self {
        Self {
            cosmetic_aug_type: COSMETIC_AUG_TYPES.contains(&aug_type),
            cosmetic_slots_only: !slot_compat.is_empty()
                && slot_compat
                    .iter()
                    .all(|code| COSMETIC_SLOT_CODES.contains(code)),
            ornament_name: name.to_lowercase().contains("ornament"),
        }
    }

    pub fn any(self) -> bool {
        self.cosmetic_aug_type || self.cosmetic_slots_only || self.ornament_name
    }
}
