use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Index;

/// Canonical stats that participate in valuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Stat {
    #[serde(rename = "AC")]
    Ac,
    #[serde(rename = "HP")]
    Hp,
    Mana,
    Attack,
    HStr,
    HSta,
    HAgi,
    HDex,
    HWis,
    HInt,
}

impl Stat {
    pub const COUNT: usize = 10;

    pub const fn ordered() -> [Self; Self::COUNT] {
        [
            Self::Ac,
            Self::Hp,
            Self::Mana,
            Self::Attack,
            Self::HStr,
            Self::HSta,
            Self::HAgi,
            Self::HDex,
            Self::HWis,
            Self::HInt,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ac => "AC",
            Self::Hp => "HP",
            Self::Mana => "Mana",
            Self::Attack => "Attack",
            Self::HStr => "HStr",
            Self::HSta => "HSta",
            Self::HAgi => "HAgi",
            Self::HDex => "HDex",
            Self::HWis => "HWis",
            Self::HInt => "HInt",
        }
    }

    /// Header spellings accepted for this stat in catalog files and weight
    /// profiles. Compared after [`fold_key`].
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Ac => &["AC", "ACmod", "ArmorClass"],
            Self::Hp => &["HP", "Health", "HitPoints"],
            Self::Mana => &["Mana"],
            Self::Attack => &["Attack", "ATK", "AttackMod"],
            Self::HStr => &["HStr", "HeroicSTR", "heroic_str", "HeroicStrength"],
            Self::HSta => &["HSta", "HeroicSTA", "heroic_sta", "HeroicStamina"],
            Self::HAgi => &["HAgi", "HeroicAGI", "heroic_agi", "HeroicAgility"],
            Self::HDex => &["HDex", "HeroicDEX", "heroic_dex", "HeroicDexterity"],
            Self::HWis => &["HWis", "HeroicWIS", "heroic_wis", "HeroicWisdom"],
            Self::HInt => &["HInt", "HeroicINT", "heroic_int", "HeroicIntelligence"],
        }
    }

    pub fn from_alias(raw: &str) -> Option<Self> {
        let folded = fold_key(raw);
        if folded.is_empty() {
            return None;
        }
        Self::ordered().into_iter().find(|stat| {
            stat.aliases()
                .iter()
                .any(|alias| fold_key(alias) == folded)
        })
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lowercases and drops everything that is not alphanumeric, so `Heroic_STR`,
/// `heroic str` and `HEROICSTR` compare equal.
pub fn fold_key(raw: &str) -> String {
    raw.chars()
        .filter(|ch| ch.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Dense per-stat values. Every slot is a finite number.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatLine([f64; Stat::COUNT]);

impl StatLine {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn get(&self, stat: Stat) -> f64 {
        self.0[stat.index()]
    }

    /// Non-finite input collapses to zero.
    pub fn set(&mut self, stat: Stat, value: f64) {
        self.0[stat.index()] = if value.is_finite() { value } else { 0.0 };
    }

    pub fn with(mut self, stat: Stat, value: f64) -> Self {
        self.set(stat, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stat, f64)> + '_ {
        Stat::ordered()
            .into_iter()
            .map(move |stat| (stat, self.get(stat)))
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|value| *value == 0.0)
    }
}

impl Index<Stat> for StatLine {
    type Output = f64;

    fn index(&self, stat: Stat) -> &f64 {
        &self.0[stat.index()]
    }
}

impl Serialize for StatLine {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Stat::COUNT))?;
        for (stat, value) in self.iter() {
            map.serialize_entry(stat.label(), &value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_case_and_punctuation_insensitively() {
        assert_eq!(Stat::from_alias("hp"), Some(Stat::Hp));
        assert_eq!(Stat::from_alias("Health"), Some(Stat::Hp));
        assert_eq!(Stat::from_alias("Heroic_STR"), Some(Stat::HStr));
        assert_eq!(Stat::from_alias(" h-wis "), Some(Stat::HWis));
        assert_eq!(Stat::from_alias("atk"), Some(Stat::Attack));
        assert_eq!(Stat::from_alias("Endurance"), None);
        assert_eq!(Stat::from_alias("--"), None);
    }

    #[test]
    fn stat_line_rejects_non_finite_values() {
        let mut line = StatLine::zero();
        line.set(Stat::Mana, f64::NAN);
        line.set(Stat::Ac, f64::INFINITY);
        line.set(Stat::Hp, 12.5);
        assert_eq!(line.get(Stat::Mana), 0.0);
        assert_eq!(line[Stat::Ac], 0.0);
        assert_eq!(line[Stat::Hp], 12.5);
        assert!(!line.is_zero());
    }

    #[test]
    fn serializes_with_canonical_labels_in_order() {
        let line = StatLine::zero().with(Stat::Ac, 5.0).with(Stat::HInt, 2.0);
        let json = serde_json::to_string(&line).expect("serializes");
        assert!(json.starts_with("{\"AC\":5.0,\"HP\":0.0"));
        assert!(json.ends_with("\"HInt\":2.0}"));
    }
}
