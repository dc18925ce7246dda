//! End-to-end valuation of one inventory export against a loaded catalog.

pub mod views;

pub use views::{
    AnalysisDiagnostics, AnalysisReport, CatalogRankingReport, FocusEffectView, ScoredItemView,
    UnmatchedView,
};

use crate::catalog::Catalog;
use crate::inventory::{parse_inventory, InventoryObservation, Placement};
use crate::matcher::match_observations;
use crate::ranking::{pinned_items, rank, Grouping, PinLookup};
use crate::scoring::{score_catalog_items, score_matches, StatWeights};
use tracing::info;

pub const NO_AUGMENTATIONS_WARNING: &str = "no augmentations found in the inventory export";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Truncate each ranked group after sorting.
    pub top_n: Option<usize>,
    /// Also report matched ornaments (never scored into the main groups).
    pub include_ornaments: bool,
}

/// Parses, joins, scores and ranks one export. Every call starts from the raw
/// text, so a new weight vector never sees scores from an earlier one.
pub fn analyze<P>(
    catalog: &Catalog,
    inventory: &str,
    weights: &StatWeights,
    pins: &P,
    options: &AnalysisOptions,
) -> AnalysisReport
where
    P: PinLookup + ?Sized,
{
    let parsed = parse_inventory(inventory);
    let outcome = match_observations(&parsed.observations, catalog);
    let scored = score_matches(outcome.scoreable(), weights);

    let equipped = rank(&scored, &Grouping::Equipped, options.top_n, pins);
    let unequipped = rank(&scored, &Grouping::Unequipped, options.top_n, pins);

    let ornaments = options.include_ornaments.then(|| {
        score_matches(outcome.ornaments(), weights)
            .iter()
            .map(|scored| ScoredItemView::from_scored(scored, None, pins.is_pinned(scored.item.id)))
            .collect::<Vec<_>>()
    });

    let mut diagnostics = AnalysisDiagnostics {
        lines: parsed.stats.lines,
        malformed_rows: parsed.stats.malformed,
        observations: parsed.observations.len(),
        socketed: count_placement(&parsed.observations, Placement::Socketed),
        stored: parsed.stored().count(),
        matched: outcome.counts.matched,
        ornaments: outcome.counts.ornaments,
        unmatched: outcome.counts.unmatched,
        non_augmentations: outcome.counts.non_augmentations,
        warnings: Vec::new(),
    };
    if scored.is_empty() {
        diagnostics.warnings.push(NO_AUGMENTATIONS_WARNING.to_string());
    }
    if diagnostics.unmatched > 0 {
        diagnostics.warnings.push(format!(
            "{} socketed item(s) were not found in the catalog",
            diagnostics.unmatched
        ));
    }

    info!(
        observations = diagnostics.observations,
        matched = diagnostics.matched,
        unmatched = diagnostics.unmatched,
        ornaments = diagnostics.ornaments,
        "inventory analysed"
    );

    AnalysisReport {
        weights: *weights,
        equipped: equipped.entries.iter().map(ScoredItemView::from_ranked).collect(),
        unequipped: unequipped
            .entries
            .iter()
            .map(ScoredItemView::from_ranked)
            .collect(),
        pinned: pinned_items(&scored, pins)
            .iter()
            .map(|scored| ScoredItemView::from_scored(scored, None, true))
            .collect(),
        ornaments,
        unmatched: outcome.unmatched.iter().map(|obs| UnmatchedView::from(*obs)).collect(),
        diagnostics,
    }
}

/// Ranks catalog augmentations (ornaments excluded) for upgrade planning.
/// Inventory groupings select nothing here since catalog entries carry no
/// observation.
pub fn top_in_catalog<P>(
    catalog: &Catalog,
    grouping: &Grouping,
    weights: &StatWeights,
    pins: &P,
    top_n: Option<usize>,
) -> CatalogRankingReport
where
    P: PinLookup + ?Sized,
{
    let scored = score_catalog_items(catalog.augmentations(), weights);
    let ranking = rank(&scored, grouping, top_n, pins);

    CatalogRankingReport {
        grouping: grouping.clone(),
        weights: *weights,
        total: ranking.total,
        entries: ranking.entries.iter().map(ScoredItemView::from_ranked).collect(),
        pinned: ranking
            .pinned
            .iter()
            .map(|scored| ScoredItemView::from_scored(scored, None, true))
            .collect(),
    }
}

fn count_placement(observations: &[InventoryObservation], placement: Placement) -> usize {
    observations
        .iter()
        .filter(|observation| observation.placement == placement)
        .count()
}
