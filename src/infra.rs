use eq_augs::analysis::{
    analyze, top_in_catalog, AnalysisOptions, AnalysisReport, CatalogRankingReport,
};
use eq_augs::catalog::{Catalog, ItemId};
use eq_augs::config::AnalysisConfig;
use eq_augs::ranking::Grouping;
use eq_augs::scoring::{StatWeights, WeightError};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnalyzeRequest {
    /// Raw tab-separated inventory export.
    pub(crate) inventory: String,
    /// Overrides applied on top of the configured weight profile.
    #[serde(default)]
    pub(crate) weights: BTreeMap<String, f64>,
    #[serde(default)]
    pub(crate) pins: Vec<ItemId>,
    #[serde(default)]
    pub(crate) top_n: Option<usize>,
    #[serde(default)]
    pub(crate) include_ornaments: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopRequest {
    pub(crate) grouping: Grouping,
    #[serde(default)]
    pub(crate) weights: BTreeMap<String, f64>,
    #[serde(default)]
    pub(crate) pins: Vec<ItemId>,
    #[serde(default)]
    pub(crate) top_n: Option<usize>,
}

/// The loaded catalog plus the configured defaults, shared by every request.
/// The catalog is never mutated after startup.
#[derive(Debug)]
pub(crate) struct AugmentService {
    catalog: Arc<Catalog>,
    defaults: AnalysisConfig,
}

impl AugmentService {
    pub(crate) fn new(catalog: Arc<Catalog>, defaults: AnalysisConfig) -> Self {
        Self { catalog, defaults }
    }

    pub(crate) fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub(crate) fn weights(
        &self,
        overrides: &BTreeMap<String, f64>,
    ) -> Result<StatWeights, WeightError> {
        self.defaults
            .weights
            .overridden_by(overrides.iter().map(|(name, weight)| (name, *weight)))
    }

    pub(crate) fn analyze(&self, request: AnalyzeRequest) -> Result<AnalysisReport, WeightError> {
        let weights = self.weights(&request.weights)?;
        let pins: HashSet<ItemId> = request.pins.into_iter().collect();
        let options = AnalysisOptions {
            top_n: self.defaults.row_limit(request.top_n),
            include_ornaments: request.include_ornaments,
        };

        Ok(analyze(
            &self.catalog,
            &request.inventory,
            &weights,
            &pins,
            &options,
        ))
    }

    pub(crate) fn top(&self, request: TopRequest) -> Result<CatalogRankingReport, WeightError> {
        let weights = self.weights(&request.weights)?;
        let pins: HashSet<ItemId> = request.pins.into_iter().collect();
        Ok(top_in_catalog(
            &self.catalog,
            &request.grouping,
            &weights,
            &pins,
            self.defaults.row_limit(request.top_n),
        ))
    }
}
