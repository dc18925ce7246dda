//! Character inventory exports.
//!
//! The export is tab-separated text with five columns per row: location,
//! name, item id, count and slot capacity. Parsing never fails; rows that do
//! not describe an item are counted and skipped.

mod parser;
pub mod slots;

pub use parser::parse_inventory;
pub use slots::EquipSlot;

use crate::catalog::ItemId;
use crate::error::ParseError;
use serde::Serialize;
use std::path::Path;
use tracing::warn;

/// Where an observed item sits on the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Inserted into an augment socket of worn gear (`Head-Slot1`).
    Socketed,
    /// The worn gear piece itself (`Head`).
    Worn,
    /// Anywhere else: bags, bank, shared bank.
    Stored,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryObservation {
    /// 1-based line in the export.
    pub line: usize,
    pub location: String,
    pub name: String,
    pub item_id: ItemId,
    pub count: u32,
    pub slots: u32,
    /// Canonical slot label when worn, otherwise the container name.
    pub base_slot: String,
    pub equip_slot: Option<EquipSlot>,
    pub slot_instance: Option<u8>,
    pub placement: Placement,
}

impl InventoryObservation {
    pub fn is_equipped(&self) -> bool {
        matches!(self.placement, Placement::Socketed | Placement::Worn)
    }

    /// `Ear-2` for repeated slots, `Head` for single ones, the raw location
    /// for stored items.
    pub fn slot_label(&self) -> String {
        match (self.placement, self.slot_instance) {
            (Placement::Stored, _) => self.location.clone(),
            (_, Some(instance)) => format!("{}-{}", self.base_slot, instance),
            (_, None) => self.base_slot.clone(),
        }
    }
}

/// Row-level counters for the caller's warnings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InventoryParseStats {
    pub lines: usize,
    pub blank: usize,
    pub headers: usize,
    pub malformed: usize,
    pub empty: usize,
    pub observations: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInventory {
    pub observations: Vec<InventoryObservation>,
    pub stats: InventoryParseStats,
}

impl ParsedInventory {
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn stored(&self) -> impl Iterator<Item = &InventoryObservation> {
        self.observations
            .iter()
            .filter(|obs| obs.placement == Placement::Stored)
    }
}

pub fn read_inventory<P: AsRef<Path>>(path: P) -> Result<String, ParseError> {
    let raw = std::fs::read(path)?;
    Ok(decode_inventory(&raw))
}

/// Undecodable bytes are replaced rather than rejected; the affected rows
/// then fail ID parsing and are skipped like any other malformed row.
pub fn decode_inventory(raw: &[u8]) -> String {
    let raw = raw.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(raw);
    match std::str::from_utf8(raw) {
        Ok(text) => text.to_string(),
        Err(_) => {
            warn!("inventory export is not valid UTF-8; replacing undecodable bytes");
            String::from_utf8_lossy(raw).into_owned()
        }
    }
}
