//! Location decoding - extracts the asset index from nested pool keys
//!
//! Pool keys embed each side of the pair as a location descriptor whose JSON
//! rendering has changed across runtime versions. The decoder below is an
//! ordered chain of pattern matchers over the raw JSON value; each matcher
//! either produces the asset index or passes to the next one. A miss is a
//! skip signal for the caller, never an error.

use crate::domain::pool::AssetIndex;
use crate::shared::utils::parse_balance;
use serde_json::Value;

/// Extract the non-native asset index from a pool key value.
///
/// When the value is a two-location array, exactly one entry must be the
/// native `Here` sentinel; the other entry is decoded. Arrays of any other
/// arity, or with zero or two non-native entries, never match. Non-array
/// values (older gateways hand back the foreign location bare, or even a
/// path string) are decoded directly.
pub fn extract_asset_index(value: &Value) -> Option<AssetIndex> {
    let candidate = match value {
        Value::Array(entries) => {
            if entries.len() != 2 {
                return None;
            }
            let mut foreign = entries.iter().filter(|e| !is_native_location(e));
            let first = foreign.next()?;
            if foreign.next().is_some() {
                return None;
            }
            first
        }
        other => other,
    };
    decode_candidate(candidate)
}

/// The chain's base currency is tagged with a `Here` interior rather than an
/// index. Both the camel-case and lower-case JSON renderings occur.
fn is_native_location(value: &Value) -> bool {
    if let Some(s) = value.as_str() {
        return s.eq_ignore_ascii_case("here");
    }
    let Some(interior) = field(value, "interior") else {
        return false;
    };
    match interior {
        Value::String(s) => s.eq_ignore_ascii_case("here"),
        Value::Object(map) => map.keys().any(|k| k.eq_ignore_ascii_case("here")),
        _ => false,
    }
}

fn decode_candidate(value: &Value) -> Option<AssetIndex> {
    direct_index(value)
        .or_else(|| interior_index(value))
        .or_else(|| assets_path_index(value))
        .or_else(|| embedded_digits(value))
}

/// Matcher 1: the candidate itself carries the indexed field,
/// e.g. `{"WithId": "22,222,052"}`.
fn direct_index(value: &Value) -> Option<AssetIndex> {
    indexed_field(value)
}

/// Matcher 2: the index sits inside a positional `interior.X2` grouping,
/// e.g. `{"parents": 0, "interior": {"X2": [{"PalletInstance": 50},
/// {"GeneralIndex": 22222052}]}}`. The index is normally on the second
/// element, but any element carrying it is accepted.
fn interior_index(value: &Value) -> Option<AssetIndex> {
    let interior = field(value, "interior")?;
    let junctions = field(interior, "X2")?.as_array()?;
    junctions.iter().find_map(indexed_field)
}

/// Matcher 3: a three-segment path string, e.g. `"Here/Assets/123"`; the
/// numeric last segment is the index.
fn assets_path_index(value: &Value) -> Option<AssetIndex> {
    let s = value.as_str()?;
    let segments: Vec<&str> = s.split('/').collect();
    if segments.len() != 3 || !segments[1].eq_ignore_ascii_case("assets") {
        return None;
    }
    parse_index(&Value::String(segments[2].to_string()))
}

/// Matcher 4 (last resort): first run of digits embedded in a string.
fn embedded_digits(value: &Value) -> Option<AssetIndex> {
    let s = value.as_str()?;
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let run: String = s[start..].chars().take_while(|c| c.is_ascii_digit()).collect();
    run.parse().ok()
}

/// Look up an object field tolerating both camel-case and lower-case key
/// renderings.
fn field<'a>(value: &'a Value, name: &str) -> Option<&'a Value> {
    let map = value.as_object()?;
    map.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v)
}

/// The indexed numeric field of a junction, under either of its known tags.
fn indexed_field(value: &Value) -> Option<AssetIndex> {
    for tag in ["GeneralIndex", "WithId"] {
        if let Some(raw) = field(value, tag) {
            if let Some(index) = parse_index(raw) {
                return Some(index);
            }
        }
    }
    None
}

/// Indexes that do not fit the asset-id width are a decode miss, not an
/// error.
fn parse_index(value: &Value) -> Option<AssetIndex> {
    parse_balance(value).and_then(|n| AssetIndex::try_from(n).ok())
}
