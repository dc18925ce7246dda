mod weights;

pub use weights::{StatWeights, WeightError};

use crate::catalog::CatalogItem;
use crate::inventory::InventoryObservation;
use crate::matcher::MatchedItem;
use crate::stats::StatLine;

/// Weighted sum of an item's stats. Exact `f64` arithmetic; rounding is left
/// to whoever displays the number.
pub fn score(stats: &StatLine, weights: &StatWeights) -> f64 {
    stats
        .iter()
        .fold(0.0, |total, (stat, value)| total + value * weights.get(stat))
}

/// A catalog item with its score under one weight vector. Borrowed views
/// only; rescoring builds new values and never touches the sources.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredItem<'a> {
    pub item: &'a CatalogItem,
    pub observation: Option<&'a InventoryObservation>,
    pub score: f64,
}

impl<'a> ScoredItem<'a> {
    pub fn from_match(matched: MatchedItem<'a>, weights: &StatWeights) -> Self {
        Self {
            item: matched.item,
            observation: Some(matched.observation),
            score: score(&matched.item.stats, weights),
        }
    }

    pub fn from_catalog(item: &'a CatalogItem, weights: &StatWeights) -> Self {
        Self {
            item,
            observation: None,
            score: score(&item.stats, weights),
        }
    }

    pub fn is_equipped(&self) -> bool {
        self.observation.is_some_and(InventoryObservation::is_equipped)
    }

    /// Inventory slot/location, or the expansion for catalog entries.
    pub fn label(&self) -> String {
        match self.observation {
            Some(observation) => observation.slot_label(),
            None => self.item.expansion.clone().unwrap_or_default(),
        }
    }
}

pub fn score_matches<'a, I>(matches: I, weights: &StatWeights) -> Vec<ScoredItem<'a>>
where
    I: IntoIterator<Item = MatchedItem<'a>>,
{
    matches
        .into_iter()
        .map(|matched| ScoredItem::from_match(matched, weights))
        .collect()
}

pub fn score_catalog_items<'a, I>(items: I, weights: &StatWeights) -> Vec<ScoredItem<'a>>
where
    I: IntoIterator<Item = &'a CatalogItem>,
{
    items
        .into_iter()
        .map(|item| ScoredItem::from_catalog(item, weights))
        .collect()
}
