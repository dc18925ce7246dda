use crate::stats::Stat;
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::io::Read;

#[derive(Debug, thiserror::Error)]
pub enum WeightError {
    #[error("unknown stat '{0}'")]
    UnknownStat(String),
    #[error("stat {0} is weighted more than once")]
    Duplicate(Stat),
    #[error("weight for {stat} must be a finite number (found {value})")]
    NonFinite { stat: Stat, value: f64 },
    #[error("expected STAT=WEIGHT, found '{0}'")]
    Malformed(String),
    #[error("invalid weight profile: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read weight profile: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-stat multipliers. Stats never assigned weigh 0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatWeights([f64; Stat::COUNT]);

impl StatWeights {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn uniform(weight: f64) -> Self {
        Self([weight; Stat::COUNT])
    }

    /// Profile offered to users before they tune anything: every stat at 1.
    pub fn default_profile() -> Self {
        Self::uniform(1.0)
    }

    pub fn get(&self, stat: Stat) -> f64 {
        self.0[stat as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stat, f64)> + '_ {
        Stat::ordered()
            .into_iter()
            .map(move |stat| (stat, self.get(stat)))
    }

    pub fn with(mut self, stat: Stat, weight: f64) -> Result<Self, WeightError> {
        if !weight.is_finite() {
            return Err(WeightError::NonFinite {
                stat,
                value: weight,
            });
        }
        self.0[stat as usize] = weight;
        Ok(self)
    }

    /// Builds weights from named entries, starting at zero.
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self, WeightError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        Self::zero().overridden_by(pairs)
    }

    /// Returns a copy with the named entries replaced. Names resolve through
    /// the stat alias table. Validation covers every entry before any is
    /// applied, so a bad entry leaves no partial result.
    pub fn overridden_by<I, K>(&self, pairs: I) -> Result<Self, WeightError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut seen = [false; Stat::COUNT];
        let mut next = *self;

        for (name, weight) in pairs {
            let name = name.as_ref();
            let stat =
                Stat::from_alias(name).ok_or_else(|| WeightError::UnknownStat(name.to_string()))?;
            if std::mem::replace(&mut seen[stat as usize], true) {
                return Err(WeightError::Duplicate(stat));
            }
            next = next.with(stat, weight)?;
        }

        Ok(next)
    }

    /// Parses `AC=2, HP=1.5` (commas or whitespace between entries).
    pub fn parse_assignments(raw: &str) -> Result<Vec<(String, f64)>, WeightError> {
        raw.split(|ch: char| ch == ',' || ch == ';' || ch.is_whitespace())
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                let (name, value) = entry
                    .split_once('=')
                    .ok_or_else(|| WeightError::Malformed(entry.to_string()))?;
                let weight = value
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| WeightError::Malformed(entry.to_string()))?;
                Ok((name.trim().to_string(), weight))
            })
            .collect()
    }

    /// Reads a JSON object of `stat -> weight`, e.g. `{"AC": 2, "HP": 1}`.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, WeightError> {
        let entries: BTreeMap<String, f64> = serde_json::from_reader(reader)?;
        Self::from_pairs(entries)
    }

    pub fn from_json_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self, WeightError> {
        let file = std::fs::File::open(path)?;
        Self::from_json_reader(std::io::BufReader::new(file))
    }
}

impl Serialize for StatWeights {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Stat::COUNT))?;
        for (stat, weight) in self.iter() {
            map.serialize_entry(stat.label(), &weight)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StatWeights {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = BTreeMap::<String, f64>::deserialize(deserializer)?;
        Self::from_pairs(entries).map_err(D::Error::custom)
    }
}
