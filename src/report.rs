use clap::Args;
use eq_augs::analysis::{
    analyze, top_in_catalog, AnalysisOptions, AnalysisReport, CatalogRankingReport,
    ScoredItemView,
};
use eq_augs::catalog::{Catalog, ItemId};
use eq_augs::config::AppConfig;
use eq_augs::error::AppError;
use eq_augs::inventory::read_inventory;
use eq_augs::ranking::Grouping;
use eq_augs::scoring::{StatWeights, WeightError};
use eq_augs::stats::StatLine;
use eq_augs::telemetry;
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// Item catalog (CSV, or pipe/tab delimited). Defaults to AUG_CATALOG_PATH.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct WeightingArgs {
    /// JSON weight profile such as {"AC": 2, "HP": 1}; replaces the configured profile
    #[arg(long)]
    pub(crate) weights: Option<PathBuf>,
    /// Override one or more weights (STAT=N, comma separated, repeatable)
    #[arg(long, value_name = "STAT=N")]
    pub(crate) weight: Vec<String>,
    /// Mark an item ID as pinned (repeatable)
    #[arg(long, value_name = "ID")]
    pub(crate) pin: Vec<ItemId>,
    /// Rows per group; 0 lists everything. Defaults to AUG_TOP_N.
    #[arg(long)]
    pub(crate) top: Option<usize>,
}

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Tab-separated inventory export
    #[arg(long)]
    pub(crate) inventory: PathBuf,
    #[command(flatten)]
    pub(crate) catalog: CatalogArgs,
    #[command(flatten)]
    pub(crate) weighting: WeightingArgs,
    /// Also list socketed and stored ornaments
    #[arg(long)]
    pub(crate) include_ornaments: bool,
    /// Print the report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub(crate) struct SubsetArgs {
    /// Rank augmentations from this expansion
    #[arg(long)]
    pub(crate) expansion: Option<String>,
    /// Rank augmentations of this augmentation type
    #[arg(long)]
    pub(crate) aug_type: Option<u32>,
}

impl SubsetArgs {
    fn grouping(&self) -> Grouping {
        match (&self.expansion, self.aug_type) {
            (Some(expansion), _) => Grouping::Expansion(expansion.clone()),
            (None, Some(code)) => Grouping::AugType(code),
            (None, None) => Grouping::Unequipped,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct TopArgs {
    #[command(flatten)]
    pub(crate) subset: SubsetArgs,
    #[command(flatten)]
    pub(crate) catalog: CatalogArgs,
    #[command(flatten)]
    pub(crate) weighting: WeightingArgs,
    /// Print the ranking as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

struct Session {
    config: AppConfig,
    catalog: Catalog,
}

fn open_session(args: &CatalogArgs) -> Result<Session, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let path = args
        .catalog
        .clone()
        .unwrap_or_else(|| config.analysis.catalog_path.clone());
    let catalog = Catalog::from_path(path)?;

    Ok(Session { config, catalog })
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let session = open_session(&args.catalog)?;
    let weights = resolve_weights(&args.weighting, &session.config.analysis.weights)?;
    let pins: HashSet<ItemId> = args.weighting.pin.iter().copied().collect();
    let options = AnalysisOptions {
        top_n: session.config.analysis.row_limit(args.weighting.top),
        include_ornaments: args.include_ornaments,
    };

    let inventory = read_inventory(&args.inventory)?;
    let report = analyze(&session.catalog, &inventory, &weights, &pins, &options);

    if args.json {
        print_json(&report)
    } else {
        render_analysis(&report, &session.catalog);
        Ok(())
    }
}

pub(crate) fn run_top(args: TopArgs) -> Result<(), AppError> {
    let session = open_session(&args.catalog)?;
    let weights = resolve_weights(&args.weighting, &session.config.analysis.weights)?;
    let pins: HashSet<ItemId> = args.weighting.pin.iter().copied().collect();
    let top_n = session.config.analysis.row_limit(args.weighting.top);

    let report = top_in_catalog(
        &session.catalog,
        &args.subset.grouping(),
        &weights,
        &pins,
        top_n,
    );

    if args.json {
        print_json(&report)
    } else {
        render_catalog_ranking(&report);
        Ok(())
    }
}

pub(crate) fn run_expansions(args: CatalogArgs) -> Result<(), AppError> {
    let session = open_session(&args)?;
    let expansions = session.catalog.expansions();
    if expansions.is_empty() {
        println!("Catalog has no expansion column or values");
    }
    for expansion in expansions {
        println!("{expansion}");
    }
    Ok(())
}

/// A JSON profile replaces the configured weights; `--weight` entries then
/// override individual stats.
fn resolve_weights(
    args: &WeightingArgs,
    configured: &StatWeights,
) -> Result<StatWeights, WeightError> {
    let base = match &args.weights {
        Some(path) => StatWeights::from_json_path(path)?,
        None => *configured,
    };

    let mut pairs = Vec::new();
    for raw in &args.weight {
        pairs.extend(StatWeights::parse_assignments(raw)?);
    }
    base.overridden_by(pairs)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{json}");
    Ok(())
}

pub(crate) fn render_analysis(report: &AnalysisReport, catalog: &Catalog) {
    println!("Augmentation report ({} catalog items)", catalog.len());
    println!("Weights: {}", format_weights(&report.weights));

    render_group("Equipped augmentations", &report.equipped);
    render_group("Unequipped augmentations", &report.unequipped);

    if !report.pinned.is_empty() {
        println!("\nPinned");
        for item in &report.pinned {
            println!("- {} ({}) at {}: {:.2}", item.name, item.id, item.slot, item.score);
        }
    }

    if let Some(ornaments) = &report.ornaments {
        render_group("Ornaments (not ranked)", ornaments);
    }

    let diagnostics = &report.diagnostics;
    println!(
        "\nRows {} | socketed {} | stored {} | matched {} | ornaments {} | unmatched {} | malformed {}",
        diagnostics.observations,
        diagnostics.socketed,
        diagnostics.stored,
        diagnostics.matched,
        diagnostics.ornaments,
        diagnostics.unmatched,
        diagnostics.malformed_rows
    );

    for row in &report.unmatched {
        println!(
            "- line {}: {} ({}) at {} is not in the catalog",
            row.line, row.name, row.id, row.location
        );
    }
    if !diagnostics.warnings.is_empty() {
        println!("\nWarnings");
        for warning in &diagnostics.warnings {
            println!("- {warning}");
        }
    }
}

pub(crate) fn render_catalog_ranking(report: &CatalogRankingReport) {
    let title = match &report.grouping {
        Grouping::Expansion(name) => format!("Top augmentations from {name}"),
        Grouping::AugType(code) => format!("Top type {code} augmentations"),
        Grouping::Equipped | Grouping::Unequipped => "Top augmentations".to_string(),
    };
    println!("Weights: {}", format_weights(&report.weights));
    render_group(
        &format!("{title} ({} of {})", report.entries.len(), report.total),
        &report.entries,
    );
}

fn render_group(title: &str, items: &[ScoredItemView]) {
    if items.is_empty() {
        println!("\n{title}: none");
        return;
    }

    println!("\n{title}");
    for item in items {
        println!("{}", format_item_line(item));
        println!("      {}", format_stats(&item.stats));
        if let Some(focus) = &item.focus_effect {
            match &focus.description {
                Some(description) => println!("      Focus: {} - {}", focus.name, description),
                None => println!("      Focus: {}", focus.name),
            }
        }
    }
}

fn format_item_line(item: &ScoredItemView) -> String {
    let rank = item
        .rank
        .map(|rank| format!("{rank:>3}."))
        .unwrap_or_else(|| "   -".to_string());
    let pin = if item.pinned { " [pinned]" } else { "" };
    format!(
        "{rank} {:<16} {} ({})  score {:.2}{pin}",
        item.slot, item.name, item.id, item.score
    )
}

/// Zero stats are left out.
fn format_stats(stats: &StatLine) -> String {
    let parts: Vec<String> = stats
        .iter()
        .filter(|(_, value)| *value != 0.0)
        .map(|(stat, value)| format!("{stat} {value}"))
        .collect();
    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(" | ")
    }
}

fn format_weights(weights: &StatWeights) -> String {
    let parts: Vec<String> = weights
        .iter()
        .filter(|(_, weight)| *weight != 0.0)
        .map(|(stat, weight)| format!("{stat}={weight}"))
        .collect();
    if parts.is_empty() {
        "none".to_string()
    } else {
        parts.join(" ")
    }
}
