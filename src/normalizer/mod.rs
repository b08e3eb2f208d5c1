//! Level normalization for Clash Royale card and player payloads.
//!
//! The statistics API still reports card levels on the legacy per-rarity
//! scale (commons go up to 14, legendaries up to 6, ...), while the game
//! client shows every card on a shared 1..15 scale. Everything here is a
//! pure transform over `serde_json::Value`: fields the normalizer does not
//! know about pass through untouched, and payloads of an unexpected shape
//! are returned as they came in.

pub mod card;
pub mod level;
pub mod player;
pub mod power;
pub mod rarity;

use serde_json::Value;

pub use card::normalize_card;
pub use level::LEVEL_SCALE_POLICY;
pub use player::normalize_player;

// Upstream card fields
pub(crate) const FIELD_RARITY: &str = "rarity";
pub(crate) const FIELD_LEVEL: &str = "level";
pub(crate) const FIELD_MAX_LEVEL: &str = "maxLevel";

// Derived card fields
pub(crate) const FIELD_LEVEL_API: &str = "levelApi";
pub(crate) const FIELD_MAX_LEVEL_API: &str = "maxLevelApi";
pub(crate) const FIELD_LEVEL_UI: &str = "levelUi";
pub(crate) const FIELD_POWER_LABEL: &str = "powerLabel";

/// Reads an integral JSON number. Floats, strings and booleans do not count.
pub(crate) fn as_integer(value: Option<&Value>) -> Option<i64> {
    match value {
        Some(Value::Number(n)) => n.as_i64(),
        _ => None,
    }
}
