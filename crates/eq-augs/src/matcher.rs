//! Joins inventory observations to catalog entries by item ID.

use crate::catalog::{Catalog, CatalogItem};
use crate::inventory::{InventoryObservation, Placement};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchedItem<'a> {
    pub observation: &'a InventoryObservation,
    pub item: &'a CatalogItem,
}

impl MatchedItem<'_> {
    pub fn is_ornament(&self) -> bool {
        self.item.is_ornament()
    }

    pub fn is_equipped(&self) -> bool {
        self.observation.is_equipped()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchCounts {
    pub matched: usize,
    pub ornaments: usize,
    pub unmatched: usize,
    pub non_augmentations: usize,
    pub ignored: usize,
}

/// Result of a join. `items` holds every matched augmentation, ornaments
/// included, in observation order; the default views filter ornaments out.
#[derive(Debug, Clone, Default)]
pub struct MatchOutcome<'a> {
    pub items: Vec<MatchedItem<'a>>,
    /// Socketed rows whose ID is absent from the catalog.
    pub unmatched: Vec<&'a InventoryObservation>,
    pub counts: MatchCounts,
}

impl<'a> MatchOutcome<'a> {
    pub fn scoreable(&self) -> impl Iterator<Item = MatchedItem<'a>> + '_ {
        self.items.iter().copied().filter(|matched| !matched.is_ornament())
    }

    pub fn ornaments(&self) -> impl Iterator<Item = MatchedItem<'a>> + '_ {
        self.items.iter().copied().filter(MatchedItem::is_ornament)
    }

    pub fn unfiltered(&self) -> impl Iterator<Item = MatchedItem<'a>> + '_ {
        self.items.iter().copied()
    }
}

/// Socketed and stored rows are looked up; worn gear pieces are not
/// augmentations and are only counted. Stored rows missing from the catalog
/// are ordinary bag contents, so only socketed misses land in `unmatched`.
pub fn match_observations<'a, I>(observations: I, catalog: &'a Catalog) -> MatchOutcome<'a>
where
    I: IntoIterator<Item = &'a InventoryObservation>,
{
    let mut outcome = MatchOutcome::default();

    for observation in observations {
        if observation.placement == Placement::Worn {
            outcome.counts.ignored += 1;
            continue;
        }

        match catalog.get(observation.item_id) {
            Some(item) if item.is_augmentation => {
                if item.is_ornament() {
                    outcome.counts.ornaments += 1;
                } else {
                    outcome.counts.matched += 1;
                }
                outcome.items.push(MatchedItem { observation, item });
            }
            Some(_) => outcome.counts.non_augmentations += 1,
            None if observation.placement == Placement::Socketed => {
                debug!(
                    id = observation.item_id,
                    location = %observation.location,
                    "socketed item missing from catalog"
                );
                outcome.counts.unmatched += 1;
                outcome.unmatched.push(observation);
            }
            None => outcome.counts.ignored += 1,
        }
    }

    outcome
}
