use eq_augs::catalog::{Catalog, CatalogError};
use eq_augs::stats::Stat;

fn fixture_catalog() -> Catalog {
    let data = include_bytes!("fixtures/augment_catalog.csv");
    Catalog::from_reader(&data[..]).expect("fixture catalog loads")
}

#[test]
fn load_stats_account_for_every_row() {
    let catalog = fixture_catalog();
    let stats = catalog.load_stats();

    assert_eq!(stats.rows, 10);
    assert_eq!(stats.loaded, 8);
    assert_eq!(stats.skipped_invalid_id, 1);
    assert_eq!(stats.duplicate_ids, 1);
    assert_eq!(stats.ornaments, 2);
    assert_eq!(stats.non_augmentations, 1);
    assert!(stats.missing_stat_columns.is_empty());
    assert_eq!(catalog.len(), 8);
}

#[test]
fn first_occurrence_of_a_duplicate_id_wins() {
    let catalog = fixture_catalog();
    let shard = catalog.get(12345).expect("shard present");
    assert_eq!(shard.name, "Glowing Shard of Valor");
    assert_eq!(shard.stat(Stat::Ac), 5.0);
    assert_eq!(shard.slot_compat, vec![7, 8]);
    assert_eq!(shard.focus_effect_name.as_deref(), Some("Burning Affliction"));
}

#[test]
fn heroic_columns_resolve_through_aliases() {
    let catalog = fixture_catalog();
    let stone = catalog.get(12347).expect("stone present");
    assert_eq!(stone.stat(Stat::HWis), 6.0);
    assert_eq!(stone.stat(Stat::HInt), 4.0);
    assert_eq!(stone.stat(Stat::Mana), 40.0);
}

#[test]
fn ornaments_and_gear_are_kept_but_not_scoreable() {
    let catalog = fixture_catalog();

    let ornament = catalog.get(12346).expect("ornament kept");
    assert!(ornament.is_ornament());
    let mask = catalog.get(12350).expect("slot-only ornament kept");
    assert!(mask.ornament.cosmetic_slots_only);
    assert!(!mask.ornament.cosmetic_aug_type);
    assert!(mask.is_ornament());

    let helm = catalog.get(2002).expect("gear kept");
    assert!(!helm.is_augmentation);

    let scoreable: Vec<u32> = catalog.augmentations().map(|item| item.id).collect();
    assert_eq!(scoreable, vec![12345, 12347, 12348, 12349, 12351]);
}

#[test]
fn expansions_are_sorted_and_distinct() {
    let catalog = fixture_catalog();
    assert_eq!(
        catalog.expansions(),
        vec!["Classic", "Kunark", "Luclin", "Velious"]
    );
}

#[test]
fn pipe_delimited_databases_load_without_quoting() {
    let data = include_bytes!("fixtures/augment_catalog_pipe.txt");
    let catalog = Catalog::from_reader(&data[..]).expect("pipe catalog loads");

    assert_eq!(catalog.len(), 3);
    let shard = catalog.get(501).expect("pipe shard");
    assert_eq!(shard.stat(Stat::Hp), 12.0);
    assert_eq!(shard.stat(Stat::HWis), 2.0);
    assert_eq!(shard.stat(Stat::Ac), 0.0);

    assert!(catalog.get(502).expect("pipe ornament").is_ornament());
    assert_eq!(
        catalog.get(503).expect("quoted gem").name,
        "Quoted \"Name\" Gem"
    );
    assert_eq!(catalog.load_stats().missing_stat_columns.len(), 7);
}

#[test]
fn missing_id_column_is_a_schema_error() {
    let result = Catalog::from_reader("Name,AC,HP\nShard,1,2\n".as_bytes());
    match result {
        Err(CatalogError::Schema(schema)) => {
            assert_eq!(schema.missing, vec!["ID"]);
            assert_eq!(schema.found, vec!["Name", "AC", "HP"]);
        }
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn unreadable_path_reports_io_error() {
    let error = Catalog::from_path("./does-not-exist.csv").expect_err("missing file");
    assert!(matches!(error, CatalogError::Parse(_)));
}
