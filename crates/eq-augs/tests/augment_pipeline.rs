use eq_augs::analysis::{analyze, top_in_catalog, AnalysisOptions, NO_AUGMENTATIONS_WARNING};
use eq_augs::catalog::{Catalog, ItemId};
use eq_augs::inventory::{decode_inventory, parse_inventory, Placement};
use eq_augs::ranking::{Grouping, NoPins};
use eq_augs::scoring::StatWeights;
use std::collections::HashSet;

fn fixture_catalog() -> Catalog {
    let data = include_bytes!("fixtures/augment_catalog.csv");
    Catalog::from_reader(&data[..]).expect("fixture catalog loads")
}

fn fixture_export() -> String {
    decode_inventory(include_bytes!("fixtures/inventory_export.txt"))
}

fn ids(items: &[eq_augs::analysis::ScoredItemView]) -> Vec<ItemId> {
    items.iter().map(|item| item.id).collect()
}

#[test]
fn parser_counts_every_kind_of_line() {
    let parsed = parse_inventory(&fixture_export());

    assert_eq!(parsed.stats.lines, 20);
    assert_eq!(parsed.stats.headers, 1);
    assert_eq!(parsed.stats.blank, 1);
    assert_eq!(parsed.stats.malformed, 1);
    assert_eq!(parsed.stats.empty, 1);
    assert_eq!(parsed.observations.len(), 16);

    let socketed = parsed
        .observations
        .iter()
        .filter(|obs| obs.placement == Placement::Socketed)
        .count();
    assert_eq!(socketed, 5);
    assert_eq!(parsed.stored().count(), 5);
}

#[test]
fn default_profile_ranks_equipped_and_stored_augments() {
    let catalog = fixture_catalog();
    let report = analyze(
        &catalog,
        &fixture_export(),
        &StatWeights::default_profile(),
        &NoPins,
        &AnalysisOptions::default(),
    );

    assert_eq!(ids(&report.equipped), vec![12347, 12345, 12349]);
    let slots: Vec<&str> = report.equipped.iter().map(|item| item.slot.as_str()).collect();
    assert_eq!(slots, vec!["Ear-1", "Head", "Ear-2"]);
    let scores: Vec<f64> = report.equipped.iter().map(|item| item.score).collect();
    assert_eq!(scores, vec![67.0, 15.0, 11.0]);

    assert_eq!(ids(&report.unequipped), vec![12351, 12348, 12345]);
    assert_eq!(report.unequipped[0].slot, "Bank3-Slot2");
    assert!(report.unequipped.iter().all(|item| !item.equipped));

    assert_eq!(report.diagnostics.matched, 6);
    assert_eq!(report.diagnostics.ornaments, 1);
    assert_eq!(report.diagnostics.unmatched, 1);
    assert_eq!(report.unmatched[0].location, "Chest-Slot1");
}

#[test]
fn custom_weights_rescore_from_scratch() {
    let catalog = fixture_catalog();
    let export = fixture_export();
    let weights = StatWeights::from_pairs([("AC", 2.0), ("HP", 1.0)]).expect("weights");

    let first = analyze(&catalog, &export, &weights, &NoPins, &AnalysisOptions::default());
    let head = first
        .equipped
        .iter()
        .find(|item| item.slot == "Head")
        .expect("head augment ranked");
    assert_eq!(head.score, 20.0);

    let caster = StatWeights::from_pairs([("Mana", 1.0), ("HWis", 10.0)]).expect("weights");
    let second = analyze(&catalog, &export, &caster, &NoPins, &AnalysisOptions::default());
    assert_eq!(second.equipped[0].id, 12347);
    assert_eq!(second.equipped[0].score, 100.0);

    let again = analyze(&catalog, &export, &weights, &NoPins, &AnalysisOptions::default());
    assert_eq!(first, again);
}

#[test]
fn top_n_truncates_after_sorting() {
    let catalog = fixture_catalog();
    let options = AnalysisOptions {
        top_n: Some(1),
        include_ornaments: false,
    };
    let report = analyze(
        &catalog,
        &fixture_export(),
        &StatWeights::default_profile(),
        &NoPins,
        &options,
    );
    assert_eq!(ids(&report.equipped), vec![12347]);
    assert_eq!(ids(&report.unequipped), vec![12351]);
}

#[test]
fn pinned_items_do_not_reorder_groups() {
    let catalog = fixture_catalog();
    let pins: HashSet<ItemId> = [12345].into_iter().collect();
    let report = analyze(
        &catalog,
        &fixture_export(),
        &StatWeights::default_profile(),
        &pins,
        &AnalysisOptions::default(),
    );

    assert_eq!(ids(&report.equipped), vec![12347, 12345, 12349]);
    assert_eq!(ids(&report.pinned), vec![12345]);
    let flagged: Vec<ItemId> = report
        .equipped
        .iter()
        .chain(report.unequipped.iter())
        .filter(|item| item.pinned)
        .map(|item| item.id)
        .collect();
    assert_eq!(flagged, vec![12345, 12345]);
}

#[test]
fn report_serializes_for_the_api() {
    let catalog = fixture_catalog();
    let options = AnalysisOptions {
        top_n: None,
        include_ornaments: true,
    };
    let report = analyze(
        &catalog,
        &fixture_export(),
        &StatWeights::default_profile(),
        &NoPins,
        &options,
    );

    let json = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(json["equipped"][0]["slot"], "Ear-1");
    assert_eq!(json["equipped"][0]["stats"]["HWis"], 6.0);
    assert_eq!(json["ornaments"][0]["id"], 12346);
    assert_eq!(json["weights"]["AC"], 1.0);
    assert!(json.get("pinned").is_none());
}

#[test]
fn exports_without_augments_yield_a_warning() {
    let catalog = fixture_catalog();
    let export = "Location\tName\tID\tCount\tSlots\nHead\tIron Helm\t2002\t1\t0\n";
    let report = analyze(
        &catalog,
        export,
        &StatWeights::default_profile(),
        &NoPins,
        &AnalysisOptions::default(),
    );
    assert!(!report.has_augmentations());
    assert!(report
        .diagnostics
        .warnings
        .iter()
        .any(|warning| warning == NO_AUGMENTATIONS_WARNING));
}

#[test]
fn catalog_subsets_rank_for_upgrade_planning() {
    let catalog = fixture_catalog();
    let weights = StatWeights::default_profile();

    let kunark = top_in_catalog(
        &catalog,
        &Grouping::Expansion("kunark".to_string()),
        &weights,
        &NoPins,
        None,
    );
    assert_eq!(ids(&kunark.entries), vec![12348, 12345]);

    let type_seven = top_in_catalog(&catalog, &Grouping::AugType(7), &weights, &NoPins, Some(3));
    assert_eq!(type_seven.total, 4);
    assert_eq!(ids(&type_seven.entries), vec![12351, 12347, 12345]);

    let luclin = top_in_catalog(
        &catalog,
        &Grouping::Expansion("Luclin".to_string()),
        &weights,
        &NoPins,
        None,
    );
    assert_eq!(ids(&luclin.entries), vec![12351]);
}
