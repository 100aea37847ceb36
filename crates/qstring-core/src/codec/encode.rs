//! Pair encoding for serialization.

use super::value::QueryValue;

/// Appends the encoded `key=value` pairs for one mapping entry to `pairs`.
///
/// Sequences expand to bracket-indexed keys (`key[0]`, `key[1]`, ...); the
/// brackets are encoded along with the rest of the key.
pub(super) fn push_pairs(pairs: &mut Vec<String>, key: &str, value: &QueryValue) {
    match value {
        QueryValue::Scalar(v) => pairs.push(encode_pair(key, v)),
        QueryValue::Sequence(items) => {
            for (i, item) in items.iter().enumerate() {
                pairs.push(encode_pair(&format!("{key}[{i}]"), item));
            }
        }
    }
}

fn encode_pair(key: &str, value: &str) -> String {
    format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
}
