//! Augmentation valuation: load an item catalog, read a character inventory
//! export, and rank the augmentations found there under a stat weighting.

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod error;
pub mod inventory;
pub mod matcher;
pub mod ranking;
pub mod scoring;
pub mod stats;
pub mod telemetry;

pub use analysis::{analyze, top_in_catalog, AnalysisOptions, AnalysisReport};
pub use catalog::{Catalog, CatalogItem, ItemId};
pub use scoring::StatWeights;
