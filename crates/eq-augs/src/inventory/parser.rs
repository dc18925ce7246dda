use super::slots::EquipSlot;
use super::{InventoryObservation, InventoryParseStats, ParsedInventory, Placement};
use crate::catalog::ItemId;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

const FIELD_COUNT: usize = 5;
const SOCKET_MARKER: &str = "-Slot";

/// Parses an inventory export. Pure: the same text always yields the same
/// observations and instance numbering, in file order.
pub fn parse_inventory(text: &str) -> ParsedInventory {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut stats = InventoryParseStats::default();
    let mut instances = InstanceTracker::default();
    let mut observations = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        stats.lines += 1;
        if raw_line.trim().is_empty() {
            stats.blank += 1;
            continue;
        }

        let fields: Vec<&str> = raw_line.split('\t').map(str::trim).collect();
        if fields.len() != FIELD_COUNT {
            stats.malformed += 1;
            continue;
        }

        let (location, name, raw_id) = (fields[0], fields[1], fields[2]);
        if location.eq_ignore_ascii_case("location") {
            stats.headers += 1;
            continue;
        }

        let base = location.split('-').next().unwrap_or_default().trim();
        let equip_slot = EquipSlot::from_label(base);
        let is_socket = location.contains(SOCKET_MARKER);

        // Instance numbering follows the raw layout, so empty base rows still
        // open a new ear/wrist/finger.
        let slot_instance = equip_slot
            .filter(|slot| slot.is_multi_instance())
            .map(|slot| {
                if is_socket {
                    instances.socket(slot, socket_number(location))
                } else {
                    instances.base(slot)
                }
            });

        let Ok(item_id) = raw_id.parse::<ItemId>() else {
            stats.malformed += 1;
            continue;
        };
        if item_id == 0 || name.eq_ignore_ascii_case("empty") {
            stats.empty += 1;
            continue;
        }

        let placement = match (equip_slot, is_socket) {
            (Some(_), true) => Placement::Socketed,
            (Some(_), false) => Placement::Worn,
            (None, _) => Placement::Stored,
        };
        let base_slot = match equip_slot {
            Some(slot) => slot.label().to_string(),
            None => base.to_string(),
        };

        observations.push(InventoryObservation {
            line: index + 1,
            location: location.to_string(),
            name: name.to_string(),
            item_id,
            count: fields[3].parse().unwrap_or(0),
            slots: fields[4].parse().unwrap_or(0),
            base_slot,
            equip_slot,
            slot_instance,
            placement,
        });
    }

    stats.observations = observations.len();
    debug!(
        lines = stats.lines,
        observations = stats.observations,
        malformed = stats.malformed,
        empty = stats.empty,
        "inventory export parsed"
    );

    ParsedInventory {
        observations,
        stats,
    }
}

fn socket_number(location: &str) -> Option<u32> {
    let (_, tail) = location.split_once(SOCKET_MARKER)?;
    let digits: String = tail.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

#[derive(Debug, Default)]
struct SlotCursor {
    instance: u8,
    sockets: BTreeSet<u32>,
}

/// Assigns ordinals to repeated slots. A base row always opens the next
/// instance; a socket row opens one when none is open yet or when its socket
/// number was already used by the current instance.
#[derive(Debug, Default)]
struct InstanceTracker {
    cursors: HashMap<EquipSlot, SlotCursor>,
}

impl InstanceTracker {
    fn base(&mut self, slot: EquipSlot) -> u8 {
        let cursor = self.cursors.entry(slot).or_default();
        cursor.instance = cursor.instance.saturating_add(1);
        cursor.sockets.clear();
        cursor.instance
    }

    fn socket(&mut self, slot: EquipSlot, socket: Option<u32>) -> u8 {
        let cursor = self.cursors.entry(slot).or_default();
        let reused = socket.is_some_and(|number| cursor.sockets.contains(&number));
        if cursor.instance == 0 || reused {
            cursor.instance = cursor.instance.saturating_add(1);
            cursor.sockets.clear();
        }
        if let Some(number) = socket {
            cursor.sockets.insert(number);
        }
        cursor.instance
    }
}
