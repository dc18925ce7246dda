use crate::stats::{fold_key, Stat};

/// Non-stat catalog fields resolved from the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Id,
    Name,
    AugType,
    SlotCompat,
    Expansion,
    FocusEffectName,
    FocusEffectDesc,
}

impl Field {
    pub(crate) const fn ordered() -> [Self; 7] {
        [
            Self::Id,
            Self::Name,
            Self::AugType,
            Self::SlotCompat,
            Self::Expansion,
            Self::FocusEffectName,
            Self::FocusEffectDesc,
        ]
    }

    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Name => "Name",
            Self::AugType => "AugType",
            Self::SlotCompat => "SlotCompat",
            Self::Expansion => "Expansion",
            Self::FocusEffectName => "FocusEffectName",
            Self::FocusEffectDesc => "FocusEffectDesc",
        }
    }

    const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Id => &["ID", "ItemID", "item_id", "ItemNumber"],
            Self::Name => &["Name", "ItemName", "item_name"],
            Self::AugType => &["AugType", "aug_type", "AugmentType"],
            Self::SlotCompat => &["SlotCompat", "AugSlotType", "AugSlots", "AugSlotCompat"],
            Self::Expansion => &["Expansion", "Era"],
            Self::FocusEffectName => &["FocusEffectName", "FocusEffect", "Focus"],
            Self::FocusEffectDesc => &["FocusEffectDesc", "FocusDescription"],
        }
    }

    fn matches(self, folded: &str) -> bool {
        self.aliases().iter().any(|alias| fold_key(alias) == folded)
    }
}

/// Column indexes for every canonical field, resolved once per load.
#[derive(Debug, Default)]
pub(crate) struct ColumnMap {
    fields: [Option<usize>; 7],
    stats: [Option<usize>; Stat::COUNT],
}

impl ColumnMap {
    /// First matching header wins; later duplicates are ignored.
    pub(crate) fn resolve<'h, I>(headers: I) -> Self
    where
        I: IntoIterator<Item = &'h str>,
    {
        let mut map = Self::default();

        for (index, header) in headers.into_iter().enumerate() {
            let folded = fold_key(header);
            if folded.is_empty() {
                continue;
            }

            if let Some(field) = Field::ordered()
                .into_iter()
                .find(|field| field.matches(&folded))
            {
                map.fields[field as usize].get_or_insert(index);
                continue;
            }

            if let Some(stat) = Stat::from_alias(header) {
                map.stats[stat as usize].get_or_insert(index);
            }
        }

        map
    }

    pub(crate) fn field(&self, field: Field) -> Option<usize> {
        self.fields[field as usize]
    }

    pub(crate) fn stat(&self, stat: Stat) -> Option<usize> {
        self.stats[stat as usize]
    }

    pub(crate) fn missing_stats(&self) -> Vec<Stat> {
        Stat::ordered()
            .into_iter()
            .filter(|stat| self.stat(*stat).is_none())
            .collect()
    }
}
