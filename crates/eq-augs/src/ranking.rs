//! Ordering of scored items for display.

use crate::catalog::ItemId;
use crate::scoring::ScoredItem;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

/// Read-only view of the caller's pinned items.
pub trait PinLookup {
    fn is_pinned(&self, id: ItemId) -> bool;
}

impl PinLookup for HashSet<ItemId> {
    fn is_pinned(&self, id: ItemId) -> bool {
        self.contains(&id)
    }
}

impl PinLookup for BTreeSet<ItemId> {
    fn is_pinned(&self, id: ItemId) -> bool {
        self.contains(&id)
    }
}

impl PinLookup for [ItemId] {
    fn is_pinned(&self, id: ItemId) -> bool {
        self.contains(&id)
    }
}

/// Nothing is pinned.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPins;

impl PinLookup for NoPins {
    fn is_pinned(&self, _id: ItemId) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Grouping {
    /// Augmentations socketed into worn gear, labelled by slot.
    Equipped,
    /// Augmentations found in bags, bank or other containers.
    Unequipped,
    /// Catalog entries from one expansion (case-insensitive).
    Expansion(String),
    /// Catalog entries of one augmentation type.
    AugType(u32),
}

impl Grouping {
    pub fn admits(&self, scored: &ScoredItem<'_>) -> bool {
        match self {
            Self::Equipped => scored.is_equipped(),
            Self::Unequipped => scored.observation.is_some() && !scored.is_equipped(),
            Self::Expansion(name) => scored
                .item
                .expansion
                .as_deref()
                .is_some_and(|expansion| expansion.eq_ignore_ascii_case(name)),
            Self::AugType(code) => scored.item.aug_type == *code,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedItem<'a> {
    /// 1-based position within the group.
    pub rank: usize,
    pub scored: ScoredItem<'a>,
    pub pinned: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ranking<'a> {
    pub grouping: Grouping,
    pub entries: Vec<RankedItem<'a>>,
    /// Group size before truncation.
    pub total: usize,
    /// Pinned items from the whole input, best first, one per item ID.
    pub pinned: Vec<ScoredItem<'a>>,
}

/// Sorts the group by score, highest first. The sort is stable, so equal
/// scores keep their input order. `top_n` truncates after sorting. Pins are
/// looked up, never used as a sort key.
pub fn rank<'a, P>(
    items: &[ScoredItem<'a>],
    grouping: &Grouping,
    top_n: Option<usize>,
    pins: &P,
) -> Ranking<'a>
where
    P: PinLookup + ?Sized,
{
    let mut group: Vec<ScoredItem<'a>> = items
        .iter()
        .filter(|scored| grouping.admits(scored))
        .copied()
        .collect();
    sort_descending(&mut group);

    let total = group.len();
    if let Some(limit) = top_n {
        group.truncate(limit);
    }

    let entries = group
        .into_iter()
        .enumerate()
        .map(|(index, scored)| RankedItem {
            rank: index + 1,
            pinned: pins.is_pinned(scored.item.id),
            scored,
        })
        .collect();

    Ranking {
        grouping: grouping.clone(),
        entries,
        total,
        pinned: pinned_items(items, pins),
    }
}

pub fn pinned_items<'a, P>(items: &[ScoredItem<'a>], pins: &P) -> Vec<ScoredItem<'a>>
where
    P: PinLookup + ?Sized,
{
    let mut seen = HashSet::new();
    let mut pinned: Vec<ScoredItem<'a>> = items
        .iter()
        .filter(|scored| pins.is_pinned(scored.item.id))
        .copied()
        .collect();
    sort_descending(&mut pinned);
    pinned.retain(|scored| seen.insert(scored.item.id));
    pinned
}

/// NaN scores (inf - inf under extreme weights) sort after every number.
fn sort_descending(items: &mut [ScoredItem<'_>]) {
    items.sort_by(|a, b| match (a.score.is_nan(), b.score.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal),
    });
}
