use crate::catalog::ItemId;
use crate::inventory::InventoryObservation;
use crate::ranking::{Grouping, RankedItem};
use crate::scoring::{ScoredItem, StatWeights};
use crate::stats::StatLine;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FocusEffectView {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One ranked row as handed to renderers. Zero stats stay numeric; blanking
/// them is a display concern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredItemView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,
    pub id: ItemId,
    pub name: String,
    pub slot: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub equipped: bool,
    pub score: f64,
    pub stats: StatLine,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expansion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_effect: Option<FocusEffectView>,
    pub pinned: bool,
}

impl ScoredItemView {
    pub(crate) fn from_scored(scored: &ScoredItem<'_>, rank: Option<usize>, pinned: bool) -> Self {
        let item = scored.item;
        let focus_effect = item
            .focus_effect_name
            .as_ref()
            .map(|name| FocusEffectView {
                name: name.clone(),
                description: item.focus_effect_desc.clone(),
            });

        Self {
            rank,
            id: item.id,
            name: item.name.clone(),
            slot: scored.label(),
            location: scored
                .observation
                .map(|observation| observation.location.clone()),
            equipped: scored.is_equipped(),
            score: scored.score,
            stats: item.stats,
            expansion: item.expansion.clone(),
            focus_effect,
            pinned,
        }
    }

    pub(crate) fn from_ranked(entry: &RankedItem<'_>) -> Self {
        Self::from_scored(&entry.scored, Some(entry.rank), entry.pinned)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmatchedView {
    pub line: usize,
    pub location: String,
    pub name: String,
    pub id: ItemId,
}

impl From<&InventoryObservation> for UnmatchedView {
    fn from(observation: &InventoryObservation) -> Self {
        Self {
            line: observation.line,
            location: observation.location.clone(),
            name: observation.name.clone(),
            id: observation.item_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisDiagnostics {
    pub lines: usize,
    pub malformed_rows: usize,
    pub observations: usize,
    pub socketed: usize,
    pub stored: usize,
    pub matched: usize,
    pub ornaments: usize,
    pub unmatched: usize,
    pub non_augmentations: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub weights: StatWeights,
    pub equipped: Vec<ScoredItemView>,
    pub unequipped: Vec<ScoredItemView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pinned: Vec<ScoredItemView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ornaments: Option<Vec<ScoredItemView>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unmatched: Vec<UnmatchedView>,
    pub diagnostics: AnalysisDiagnostics,
}

impl AnalysisReport {
    pub fn has_augmentations(&self) -> bool {
        !self.equipped.is_empty() || !self.unequipped.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogRankingReport {
    pub grouping: Grouping,
    pub weights: StatWeights,
    pub total: usize,
    pub entries: Vec<ScoredItemView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pinned: Vec<ScoredItemView>,
}
