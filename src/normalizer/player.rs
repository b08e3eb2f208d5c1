use super::normalize_card;
use crate::constants::UNKNOWN_ARENA_NAME;
use serde_json::{json, Map, Value};

const FIELD_EXP_LEVEL: &str = "expLevel";
const FIELD_KING_LEVEL: &str = "kingLevel";
const FIELD_ARENA: &str = "arena";
const CARD_LISTS: [&str; 2] = ["cards", "currentDeck"];

/// Normalizes a raw player payload for the frontend and the assistant.
///
/// Sets `kingLevel` from `expLevel`, reduces `arena` to `{id, name}` and
/// normalizes every entry of `cards` and `currentDeck` in place, keeping
/// their order. Non-object input is returned unchanged.
pub fn normalize_player(raw: Value) -> Value {
    let Value::Object(mut player) = raw else {
        return raw;
    };

    let king_level = player.get(FIELD_EXP_LEVEL).cloned().unwrap_or(Value::Null);
    player.insert(FIELD_KING_LEVEL.to_string(), king_level);

    let arena = normalize_arena(player.get(FIELD_ARENA));
    player.insert(FIELD_ARENA.to_string(), arena);

    for key in CARD_LISTS {
        let cards = match player.remove(key) {
            Some(Value::Array(items)) => items.into_iter().map(normalize_card).collect(),
            _ => Vec::new(),
        };
        player.insert(key.to_string(), Value::Array(cards));
    }

    Value::Object(player)
}

fn normalize_arena(arena: Option<&Value>) -> Value {
    let empty = Map::new();
    let fields = match arena {
        Some(Value::Object(fields)) => fields,
        _ => &empty,
    };

    let id = fields.get("id").cloned().unwrap_or(Value::Null);
    let name = match fields.get("name") {
        Some(Value::String(name)) if !name.is_empty() => name.clone(),
        _ => UNKNOWN_ARENA_NAME.to_string(),
    };

    json!({ "id": id, "name": name })
}
