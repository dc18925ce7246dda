use crate::stats::fold_key;
use serde::Serialize;
use std::fmt;

/// Worn-gear positions. Anything else in an inventory export is a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipSlot {
    Charm,
    Ear,
    Head,
    Face,
    Neck,
    Shoulders,
    Arms,
    Back,
    Wrist,
    Range,
    Hands,
    Primary,
    Secondary,
    Finger,
    Chest,
    Legs,
    Feet,
    Waist,
    PowerSource,
    Ammo,
}

impl EquipSlot {
    pub const fn ordered() -> [Self; 20] {
        [
            Self::Charm,
            Self::Ear,
            Self::Head,
            Self::Face,
            Self::Neck,
            Self::Shoulders,
            Self::Arms,
            Self::Back,
            Self::Wrist,
            Self::Range,
            Self::Hands,
            Self::Primary,
            Self::Secondary,
            Self::Finger,
            Self::Chest,
            Self::Legs,
            Self::Feet,
            Self::Waist,
            Self::PowerSource,
            Self::Ammo,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Charm => "Charm",
            Self::Ear => "Ear",
            Self::Head => "Head",
            Self::Face => "Face",
            Self::Neck => "Neck",
            Self::Shoulders => "Shoulders",
            Self::Arms => "Arms",
            Self::Back => "Back",
            Self::Wrist => "Wrist",
            Self::Range => "Range",
            Self::Hands => "Hands",
            Self::Primary => "Primary",
            Self::Secondary => "Secondary",
            Self::Finger => "Finger",
            Self::Chest => "Chest",
            Self::Legs => "Legs",
            Self::Feet => "Feet",
            Self::Waist => "Waist",
            Self::PowerSource => "Power Source",
            Self::Ammo => "Ammo",
        }
    }

    /// Slots a character wears more than once; the export repeats their label.
    pub const fn is_multi_instance(self) -> bool {
        matches!(self, Self::Ear | Self::Wrist | Self::Finger)
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        let folded = fold_key(raw);
        if folded == "fingers" {
            return Some(Self::Finger);
        }
        Self::ordered()
            .into_iter()
            .find(|slot| fold_key(slot.label()) == folded)
    }
}

impl fmt::Display for EquipSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_export_spellings() {
        assert_eq!(EquipSlot::from_label("Fingers"), Some(EquipSlot::Finger));
        assert_eq!(EquipSlot::from_label("Finger"), Some(EquipSlot::Finger));
        assert_eq!(EquipSlot::from_label("Power Source"), Some(EquipSlot::PowerSource));
        assert_eq!(EquipSlot::from_label("head"), Some(EquipSlot::Head));
        assert_eq!(EquipSlot::from_label("General1"), None);
        assert_eq!(EquipSlot::from_label("Bank3"), None);
        assert_eq!(EquipSlot::from_label("SharedBank1"), None);
    }

    #[test]
    fn only_ears_wrists_and_fingers_repeat() {
        let repeated: Vec<EquipSlot> = EquipSlot::ordered()
            .into_iter()
            .filter(|slot| slot.is_multi_instance())
            .collect();
        assert_eq!(
            repeated,
            vec![EquipSlot::Ear, EquipSlot::Wrist, EquipSlot::Finger]
        );
    }
}
