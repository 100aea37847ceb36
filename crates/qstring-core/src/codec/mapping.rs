//! Insertion-ordered mapping with last-write-wins keys.

use indexmap::IndexMap;
use serde_json::Value;

use super::error::QueryError;
use super::value::{unsupported, QueryValue};

/// Ordered key/value mapping with unique keys.
///
/// Re-inserting a key replaces its value but keeps the key's original
/// position. Equality ignores order.
#[derive(Debug, Clone)]
pub struct QueryMap<V> {
    entries: IndexMap<String, V>,
}

/// Result of parsing a query string.
pub type ParsedQuery = QueryMap<String>;

/// Input to the serializer.
pub type QueryMapping = QueryMap<QueryValue>;

impl<V> QueryMap<V> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Inserts `value` under `key`, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        self.entries.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    /// Removes `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.entries.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<V> Default for QueryMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: PartialEq> PartialEq for QueryMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k).map_or(false, |ov| ov == v))
    }
}

impl<V: Eq> Eq for QueryMap<V> {}

impl<K, V> FromIterator<(K, V)> for QueryMap<V>
where
    K: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<V> IntoIterator for QueryMap<V> {
    type Item = (String, V);
    type IntoIter = indexmap::map::IntoIter<String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl From<ParsedQuery> for QueryMapping {
    fn from(parsed: ParsedQuery) -> Self {
        parsed
            .into_iter()
            .map(|(k, v)| (k, QueryValue::Scalar(v)))
            .collect()
    }
}

impl QueryMapping {
    /// Builds a mapping from a JSON object, preserving its key order.
    pub fn from_json(value: &Value) -> Result<Self, QueryError> {
        match value {
            Value::Object(obj) => obj
                .iter()
                .map(|(k, v)| QueryValue::from_json(k, v).map(|qv| (k.clone(), qv)))
                .collect(),
            Value::Null => Err(unsupported("", "null")),
            Value::Array(_) => Err(unsupported("", "top-level array")),
            _ => Err(unsupported("", "top-level scalar")),
        }
    }
}

impl ParsedQuery {
    /// Renders the mapping as a JSON object of strings.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(k, v)| (k.to_string(), Value::String(v.clone())))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insert_overwrites_in_place() {
        let mut m = QueryMap::new();
        m.insert("a", 1);
        m.insert("b", 2);
        assert_eq!(m.insert("a", 3), Some(1));
        let order: Vec<_> = m.iter().collect();
        assert_eq!(order, vec![("a", &3), ("b", &2)]);
    }

    #[test]
    fn collect_keeps_first_position_and_last_value() {
        let m: QueryMap<i32> = [("a", 1), ("b", 2), ("a", 3)].into_iter().collect();
        assert_eq!(m.iter().collect::<Vec<_>>(), vec![("a", &3), ("b", &2)]);
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let mut m: QueryMap<i32> = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        m.remove("a");
        assert_eq!(m.keys().collect::<Vec<_>>(), vec!["b", "c"]);
    }

    #[test]
    fn many_keys_stay_ordered() {
        let m: QueryMap<usize> = (0..50_000).map(|i| (format!("k{i}"), i)).collect();
        assert_eq!(m.len(), 50_000);
        assert_eq!(m.get("k49999"), Some(&49_999));
        assert_eq!(m.keys().nth(1), Some("k1"));
    }

    #[test]
    fn equality_ignores_order() {
        let m1: QueryMap<&str> = [("a", "1"), ("b", "2")].into_iter().collect();
        let m2: QueryMap<&str> = [("b", "2"), ("a", "1")].into_iter().collect();
        let m3: QueryMap<&str> = [("a", "1")].into_iter().collect();
        assert_eq!(m1, m2);
        assert_ne!(m1, m3);
    }

    #[test]
    fn remove_and_contains() {
        let mut m: QueryMap<i32> = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(m.remove("a"), Some(1));
        assert!(!m.contains_key("a"));
        assert_eq!(m.remove("a"), None);
        assert_eq!(m.keys().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn mapping_from_json_object() {
        let m = QueryMapping::from_json(&json!({"a": "x", "n": [1, 2]})).unwrap();
        assert_eq!(m.get("a"), Some(&QueryValue::Scalar("x".into())));
        assert_eq!(
            m.get("n"),
            Some(&QueryValue::Sequence(vec!["1".into(), "2".into()]))
        );
    }

    #[test]
    fn mapping_from_json_rejects_non_object() {
        assert!(QueryMapping::from_json(&json!([1, 2])).is_err());
        assert!(QueryMapping::from_json(&json!("a=1")).is_err());
    }

    #[test]
    fn parsed_to_json() {
        let m: ParsedQuery = [("a", "1".to_string())].into_iter().collect();
        assert_eq!(m.to_json(), json!({"a": "1"}));
    }
}
