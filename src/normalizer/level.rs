use super::rarity::Rarity;

/// Scale policy behind `levelUi`. Bump the suffix whenever the mapping changes
/// so clients can tell which conversion produced a value.
pub const LEVEL_SCALE_POLICY: &str = "ratio-v1";

pub const UI_MIN_LEVEL: i64 = 1;
pub const UI_MAX_LEVEL: i64 = 15;

/// Projects a legacy level onto the client scale, proportionally to `max_level_api`.
///
/// Rounds half to even and clamps into `UI_MIN_LEVEL..=UI_MAX_LEVEL`.
/// `max_level_api` must be positive.
pub fn ui_level(level_api: i64, max_level_api: i64) -> i64 {
    let ratio = level_api as f64 / max_level_api as f64;
    let scaled = (ratio * UI_MAX_LEVEL as f64).round_ties_even();
    (scaled as i64).clamp(UI_MIN_LEVEL, UI_MAX_LEVEL)
}

/// Denominator for the ratio: the card's own `maxLevel`, or the legacy cap of its rarity.
pub fn scale_denominator(max_level_api: Option<i64>, rarity: Option<Rarity>) -> Option<i64> {
    max_level_api
        .filter(|max| *max > 0)
        .or_else(|| rarity.map(Rarity::legacy_max_level))
}

/// `None` means the level cannot be converted and the caller keeps the raw value.
pub fn convert_level(
    level_api: Option<i64>,
    max_level_api: Option<i64>,
    rarity: Option<Rarity>,
) -> Option<i64> {
    let level = level_api?;
    let denominator = scale_denominator(max_level_api, rarity)?;
    Some(ui_level(level, denominator))
}
