use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
    Champion,
}

/// `maxLevel` thresholds checked top-down; anything below the last one is a champion.
const INFERENCE_THRESHOLDS: [(i64, Rarity); 4] = [
    (14, Rarity::Common),
    (12, Rarity::Rare),
    (9, Rarity::Epic),
    (6, Rarity::Legendary),
];

impl Rarity {
    pub fn as_str(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
            Rarity::Champion => "Champion",
        }
    }

    /// Case-insensitive parse; the live API reports lowercase names.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "common" => Some(Rarity::Common),
            "rare" => Some(Rarity::Rare),
            "epic" => Some(Rarity::Epic),
            "legendary" => Some(Rarity::Legendary),
            "champion" => Some(Rarity::Champion),
            _ => None,
        }
    }

    /// Top of the legacy level range for this rarity.
    pub fn legacy_max_level(self) -> i64 {
        match self {
            Rarity::Common => 14,
            Rarity::Rare => 12,
            Rarity::Epic => 9,
            Rarity::Legendary => 6,
            Rarity::Champion => 4,
        }
    }

    pub fn from_max_level(max_level: Option<i64>) -> Self {
        let Some(max_level) = max_level else {
            return Rarity::Common;
        };
        INFERENCE_THRESHOLDS
            .iter()
            .find(|(threshold, _)| max_level >= *threshold)
            .map(|(_, rarity)| *rarity)
            .unwrap_or(Rarity::Champion)
    }
}

/// Keeps a present rarity as-is, otherwise infers one from `maxLevel`.
pub fn resolve_rarity(current: Option<&Value>, max_level: Option<i64>) -> Value {
    match current {
        None | Some(Value::Null) => Value::from(Rarity::from_max_level(max_level).as_str()),
        Some(Value::String(s)) if s.trim().is_empty() => {
            Value::from(Rarity::from_max_level(max_level).as_str())
        }
        Some(other) => other.clone(),
    }
}
