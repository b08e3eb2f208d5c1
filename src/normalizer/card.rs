use super::{
    as_integer,
    level::convert_level,
    power::classify_power,
    rarity::{resolve_rarity, Rarity},
    FIELD_LEVEL, FIELD_LEVEL_API, FIELD_LEVEL_UI, FIELD_MAX_LEVEL, FIELD_MAX_LEVEL_API,
    FIELD_POWER_LABEL, FIELD_RARITY,
};
use serde_json::Value;

/// Adds `rarity`, `levelApi`, `maxLevelApi`, `levelUi` and `powerLabel` to a card.
///
/// Anything that is not a JSON object is returned unchanged. Running the
/// result through again produces the same derived fields.
pub fn normalize_card(card: Value) -> Value {
    let Value::Object(mut fields) = card else {
        return card;
    };

    let level_api = fields.get(FIELD_LEVEL).cloned().unwrap_or(Value::Null);
    let max_level_api = fields.get(FIELD_MAX_LEVEL).cloned().unwrap_or(Value::Null);
    let level = as_integer(Some(&level_api));
    let max_level = as_integer(Some(&max_level_api));

    let rarity = resolve_rarity(fields.get(FIELD_RARITY), max_level);
    let known_rarity = rarity.as_str().and_then(Rarity::parse);

    let level_ui = convert_level(level, max_level, known_rarity)
        .map(Value::from)
        .unwrap_or_else(|| level_api.clone());
    let power_label = classify_power(level, max_level)
        .map(|label| Value::from(label.as_str()))
        .unwrap_or(Value::Null);

    fields.insert(FIELD_RARITY.to_string(), rarity);
    fields.insert(FIELD_LEVEL_API.to_string(), level_api);
    fields.insert(FIELD_MAX_LEVEL_API.to_string(), max_level_api);
    fields.insert(FIELD_LEVEL_UI.to_string(), level_ui);
    fields.insert(FIELD_POWER_LABEL.to_string(), power_label);

    Value::Object(fields)
}
