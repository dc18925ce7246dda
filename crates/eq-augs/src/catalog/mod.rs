//! Reference catalog of augmentation items.
//!
//! The catalog is built once from a delimited export whose headers vary
//! between sources, then handed around read-only. Every stat on every item is
//! a finite number after loading.

mod headers;
mod loader;
pub mod ornament;

pub use ornament::OrnamentSignals;

use crate::error::ParseError;
use crate::stats::{Stat, StatLine};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::io::Read;
use std::path::Path;

pub type ItemId = u32;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    /// Augmentation type code, 0 when the source has none.
    pub aug_type: u32,
    /// Sorted, de-duplicated slot-type codes the item fits into.
    pub slot_compat: Vec<u16>,
    pub stats: StatLine,
    pub expansion: Option<String>,
    pub focus_effect_name: Option<String>,
    pub focus_effect_desc: Option<String>,
    pub ornament: OrnamentSignals,
    pub is_augmentation: bool,
}

impl CatalogItem {
    pub fn is_ornament(&self) -> bool {
        self.ornament.any()
    }

    pub fn stat(&self, stat: Stat) -> f64 {
        self.stats.get(stat)
    }
}

/// Counters gathered while normalizing a catalog export.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogLoadStats {
    pub rows: usize,
    pub loaded: usize,
    pub skipped_invalid_id: usize,
    pub duplicate_ids: usize,
    pub ornaments: usize,
    pub non_augmentations: usize,
    pub missing_stat_columns: Vec<Stat>,
}

/// Catalog is missing a structurally required column.
#[derive(Debug, thiserror::Error)]
#[error("item catalog is missing required column(s) {missing:?}; headers found: {found:?}")]
pub struct SchemaError {
    pub missing: Vec<&'static str>,
    pub found: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("failed to read item catalog: {0}")]
    Parse(#[from] ParseError),
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Parse(ParseError::Io(err))
    }
}

impl From<csv::Error> for CatalogError {
    fn from(err: csv::Error) -> Self {
        Self::Parse(ParseError::Csv(err))
    }
}

/// Immutable, ID-indexed item catalog. Items keep their source file order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    index: HashMap<ItemId, usize>,
    load_stats: CatalogLoadStats,
}

impl Catalog {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, CatalogError> {
        let mut raw = Vec::new();
        reader.read_to_end(&mut raw)?;
        loader::load(&raw)
    }

    pub(crate) fn from_parts(items: Vec<CatalogItem>, load_stats: CatalogLoadStats) -> Self {
        let index = items
            .iter()
            .enumerate()
            .map(|(position, item)| (item.id, position))
            .collect();
        Self {
            items,
            index,
            load_stats,
        }
    }

    pub fn get(&self, id: ItemId) -> Option<&CatalogItem> {
        self.index.get(&id).map(|position| &self.items[*position])
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter()
    }

    /// Scoreable items: augmentations that are not ornaments.
    pub fn augmentations(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items
            .iter()
            .filter(|item| item.is_augmentation && !item.is_ornament())
    }

    pub fn expansions(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|item| item.expansion.as_deref())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn load_stats(&self) -> &CatalogLoadStats {
        &self.load_stats
    }
}
