//! Stable 32-bit FNV-1a hash over the canonical-sorted-JSON form of a
//! value. Used to derive [`crate::spec::SearchSpec::hash`].
//!
//! The canonicalization is not "sort object keys and stop": array elements
//! are also sorted, by the canonical string of each element rather than by
//! original position, so that two arrays holding the same elements in a
//! different order hash identically.

use serde_json::Value;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// FNV-1a 32-bit over the UTF-8 bytes of `s`.
fn fnv1a_32(s: &str) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in s.as_bytes() {
        hash ^= u32::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Renders `value` into a string that is unique to its contents: object keys
/// sorted lexically, array elements sorted by their own canonical string.
fn sorted_json_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => {
            let mut rendered: Vec<String> = items.iter().map(sorted_json_string).collect();
            rendered.sort();
            format!("[{}]", rendered.join(","))
        }
        Value::Object(map) => {
            let mut rendered: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{k}{}", sorted_json_string(v)))
                .collect();
            rendered.sort();
            format!("{{{}}}", rendered.join(","))
        }
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
    }
}

/// Hashes a JSON object, skipping `ignore_keys` (by top-level key name)
/// before canonicalizing.
pub fn query_hash(value: &Value, ignore_keys: &[&str]) -> u32 {
    let filtered = match value {
        Value::Object(map) => {
            let mut kept = serde_json::Map::new();
            for (k, v) in map {
                if !ignore_keys.contains(&k.as_str()) {
                    kept.insert(k.clone(), v.clone());
                }
            }
            Value::Object(kept)
        }
        other => other.clone(),
    };
    fnv1a_32(&sorted_json_string(&filtered))
}
