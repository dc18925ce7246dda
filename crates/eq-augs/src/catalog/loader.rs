use super::headers::{ColumnMap, Field};
use super::{
    Catalog, CatalogError, CatalogItem, CatalogLoadStats, ItemId, OrnamentSignals, SchemaError,
};
use crate::stats::{Stat, StatLine};
use std::collections::HashSet;
use tracing::{debug, info, warn};

pub(crate) fn load(raw: &[u8]) -> Result<Catalog, CatalogError> {
    let text = decode(raw);
    let delimiter = detect_delimiter(&text);

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .quoting(delimiter != b'|')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = csv_reader.headers()?.clone();
    let columns = ColumnMap::resolve(headers.iter());

    let Some(id_column) = columns.field(Field::Id) else {
        return Err(SchemaError {
            missing: vec![Field::Id.label()],
            found: headers.iter().map(str::to_string).collect(),
        }
        .into());
    };

    let mut stats = CatalogLoadStats {
        missing_stat_columns: columns.missing_stats(),
        ..CatalogLoadStats::default()
    };
    if !stats.missing_stat_columns.is_empty() {
        warn!(
            missing = ?stats.missing_stat_columns,
            "catalog lacks stat columns; defaulting them to zero"
        );
    }

    let has_aug_type = columns.field(Field::AugType).is_some();
    let mut items = Vec::new();
    let mut seen: HashSet<ItemId> = HashSet::new();

    for record in csv_reader.records() {
        let record = record?;
        stats.rows += 1;

        let Some(id) = record.get(id_column).and_then(parse_id) else {
            stats.skipped_invalid_id += 1;
            continue;
        };

        if !seen.insert(id) {
            debug!(id, "duplicate catalog id ignored");
            stats.duplicate_ids += 1;
            continue;
        }

        let cell = |field: Field| {
            columns
                .field(field)
                .and_then(|column| record.get(column))
                .filter(|value| !value.is_empty())
        };

        let name = cell(Field::Name).unwrap_or_default().to_string();
        let aug_type = cell(Field::AugType).and_then(first_integer).unwrap_or(0);
        let slot_compat = cell(Field::SlotCompat)
            .map(parse_slot_codes)
            .unwrap_or_default();

        let mut line = StatLine::zero();
        for stat in Stat::ordered() {
            let value = columns
                .stat(stat)
                .and_then(|column| record.get(column))
                .map(coerce_number)
                .unwrap_or(0.0);
            line.set(stat, value);
        }

        let ornament = OrnamentSignals::evaluate(aug_type, &slot_compat, &name);
        let is_augmentation = !has_aug_type || aug_type > 0;
        if ornament.any() {
            stats.ornaments += 1;
        }
        if !is_augmentation {
            stats.non_augmentations += 1;
        }

        items.push(CatalogItem {
            id,
            name,
            aug_type,
            slot_compat,
            stats: line,
            expansion: cell(Field::Expansion).map(str::to_string),
            focus_effect_name: cell(Field::FocusEffectName).map(str::to_string),
            focus_effect_desc: cell(Field::FocusEffectDesc).map(str::to_string),
            ornament,
            is_augmentation,
        });
    }

    stats.loaded = items.len();
    info!(
        rows = stats.rows,
        loaded = stats.loaded,
        skipped = stats.skipped_invalid_id,
        duplicates = stats.duplicate_ids,
        ornaments = stats.ornaments,
        delimiter = %char::from(delimiter),
        "item catalog loaded"
    );

    Ok(Catalog::from_parts(items, stats))
}

fn decode(raw: &[u8]) -> String {
    let raw = raw.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(raw);
    match std::str::from_utf8(raw) {
        Ok(text) => text.to_string(),
        Err(_) => {
            warn!("catalog is not valid UTF-8; replacing undecodable bytes");
            String::from_utf8_lossy(raw).into_owned()
        }
    }
}

/// Comma unless the header line carries pipes or tabs and no commas.
fn detect_delimiter(text: &str) -> u8 {
    let header = text.lines().next().unwrap_or_default();
    let count = |needle: char| header.matches(needle).count();
    let (commas, pipes, tabs) = (count(','), count('|'), count('\t'));

    if pipes > commas && pipes >= tabs {
        b'|'
    } else if tabs > commas {
        b'\t'
    } else {
        b','
    }
}

/// Accepts plain integers and integral floats (`12345.0`); zero and negative
/// values are not valid IDs.
fn parse_id(raw: &str) -> Option<ItemId> {
    let trimmed = raw.trim();
    if let Ok(id) = trimmed.parse::<ItemId>() {
        return (id != 0).then_some(id);
    }

    let value = trimmed.parse::<f64>().ok()?;
    if value.fract() == 0.0 && value >= 1.0 && value <= f64::from(ItemId::MAX) {
        Some(value as ItemId)
    } else {
        None
    }
}

/// Unparsable or missing values become 0. A leading `+` and trailing
/// annotations (`"10 (+2)"`) are tolerated.
pub(crate) fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let parse = |value: &str| {
        value
            .trim_start_matches('+')
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
    };

    parse(trimmed)
        .or_else(|| trimmed.split_whitespace().next().and_then(parse))
        .unwrap_or(0.0)
}

fn first_integer(raw: &str) -> Option<u32> {
    raw.split(|ch: char| !ch.is_ascii_digit())
        .find(|token| !token.is_empty())
        .and_then(|token| token.parse().ok())
}

/// Tokens are separated by whitespace, `/` or `,`. Integral floats (`21.0`)
/// count as codes; anything else is ignored.
fn parse_slot_codes(raw: &str) -> Vec<u16> {
    let mut codes: Vec<u16> = raw
        .split(|ch: char| ch.is_whitespace() || ch == '/' || ch == ',')
        .filter_map(slot_code)
        .collect();
    codes.sort_unstable();
    codes.dedup();
    codes
}

fn slot_code(token: &str) -> Option<u16> {
    if let Ok(code) = token.parse::<u16>() {
        return Some(code);
    }

    let value = token.parse::<f64>().ok()?;
    if value.fract() == 0.0 && value >= 0.0 && value <= f64::from(u16::MAX) {
        Some(value as u16)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_id_column_reports_found_headers() {
        let error = load(b"Name,HP\nShard,10\n").expect_err("schema error");
        match error {
            CatalogError::Schema(schema) => {
                assert_eq!(schema.missing, vec!["ID"]);
                assert_eq!(schema.found, vec!["Name".to_string(), "HP".to_string()]);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn empty_input_is_a_schema_error() {
        assert!(matches!(load(b""), Err(CatalogError::Schema(_))));
    }

    #[test]
    fn coerces_stats_and_defaults_missing_columns() {
        let catalog = load(b"id,name,hp,Ac,Mana\n1,Shard,abc,+7,\n2,Gem,10 (+2),1.5,3\n")
            .expect("catalog loads");
        let shard = catalog.get(1).expect("shard");
        assert_eq!(shard.stat(Stat::Hp), 0.0);
        assert_eq!(shard.stat(Stat::Ac), 7.0);
        assert_eq!(shard.stat(Stat::Mana), 0.0);
        assert_eq!(shard.stat(Stat::HWis), 0.0);

        let gem = catalog.get(2).expect("gem");
        assert_eq!(gem.stat(Stat::Hp), 10.0);
        assert_eq!(gem.stat(Stat::Ac), 1.5);
        assert!(catalog
            .load_stats()
            .missing_stat_columns
            .contains(&Stat::Attack));
    }

    #[test]
    fn nan_cells_never_leak_into_stats() {
        let catalog = load(b"ID,HP,AC\n1,NaN,inf\n").expect("catalog loads");
        let item = catalog.get(1).expect("item");
        assert_eq!(item.stat(Stat::Hp), 0.0);
        assert_eq!(item.stat(Stat::Ac), 0.0);
    }

    #[test]
    fn skips_bad_ids_and_keeps_first_duplicate() {
        let catalog = load(b"ID,Name\nx,Bad\n0,Zero\n5,First\n5,Second\n7.0,Float\n")
            .expect("catalog loads");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(5).map(|item| item.name.as_str()), Some("First"));
        assert!(catalog.contains(7));
        let stats = catalog.load_stats();
        assert_eq!(stats.rows, 5);
        assert_eq!(stats.skipped_invalid_id, 2);
        assert_eq!(stats.duplicate_ids, 1);
    }

    #[test]
    fn pipe_delimited_item_database_is_detected() {
        let catalog = load(b"id|name|augtype|hp|ac\n10|Shard|7|25|3\n11|Sword|0|10|0\n")
            .expect("catalog loads");
        let shard = catalog.get(10).expect("shard");
        assert_eq!(shard.stat(Stat::Hp), 25.0);
        assert!(shard.is_augmentation);
        assert!(!catalog.get(11).expect("sword").is_augmentation);
        assert_eq!(catalog.load_stats().non_augmentations, 1);
    }

    #[test]
    fn missing_aug_type_column_treats_rows_as_augmentations() {
        let catalog = load(b"ID,Name,HP\n1,Shard,5\n").expect("catalog loads");
        let item = catalog.get(1).expect("item");
        assert_eq!(item.aug_type, 0);
        assert!(item.is_augmentation);
    }

    #[test]
    fn slot_compat_accepts_space_slash_and_comma_lists() {
        assert_eq!(parse_slot_codes("7 8/9, 7"), vec![7, 8, 9]);
        assert_eq!(parse_slot_codes("Type 21"), vec![21]);
        assert!(parse_slot_codes("none").is_empty());
        assert_eq!(first_integer("Aug: 20"), Some(20));
    }

    #[test]
    fn float_formatted_slot_codes_keep_their_value() {
        assert_eq!(parse_slot_codes("7.0 8.0"), vec![7, 8]);
        assert!(parse_slot_codes("7.5, 70000").is_empty());

        let catalog =
            load(b"ID,Name,AugType,SlotCompat\n1,Mask,3,21.0\n2,Gem,7,7.0/21.0\n").expect("catalog");
        let mask = catalog.get(1).expect("mask");
        assert_eq!(mask.slot_compat, vec![21]);
        assert!(mask.is_ornament());
        assert!(!catalog.get(2).expect("gem").is_ornament());
    }

    #[test]
    fn ornament_flag_derived_from_loaded_columns() {
        let catalog = load(
            b"ID,Name,AugType,SlotCompat\n1,Shard,21,7\n2,Gem,7,21 22\n3,Fancy Ornament,7,7\n4,Shard,7,7 21\n",
        )
        .expect("catalog loads");
        assert!(catalog.get(1).expect("1").is_ornament());
        assert!(catalog.get(2).expect("2").is_ornament());
        assert!(catalog.get(3).expect("3").is_ornament());
        assert!(!catalog.get(4).expect("4").is_ornament());
        assert_eq!(catalog.load_stats().ornaments, 3);
    }

    #[test]
    fn focus_effect_columns_are_optional_strings() {
        let catalog = load(
            b"ID,Name,FocusEffectName,FocusEffectDesc\n1,Shard,Burning Affliction,Increases damage\n2,Gem,,\n",
        )
        .expect("catalog loads");
        let shard = catalog.get(1).expect("shard");
        assert_eq!(shard.focus_effect_name.as_deref(), Some("Burning Affliction"));
        assert_eq!(shard.focus_effect_desc.as_deref(), Some("Increases damage"));
        assert!(catalog.get(2).expect("gem").focus_effect_name.is_none());
    }
}
