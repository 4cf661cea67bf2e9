//! Canonical form for multi-valued, order-independent maps.
//!
//! Query parameters and response headers are both "key -> list of values"
//! maps whose meaning does not depend on the order keys were declared in or
//! the order values arrived in. Converting them into a sorted sequence of
//! [`MultiMapEntry`] makes two semantically equal maps structurally equal,
//! which is what mock matching and the JSON output of the admin API rely on.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Native multi-valued map: each key maps to its values in wire order.
pub type MultiMap = HashMap<String, Vec<String>>;

/// A single key with all of its values.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
pub struct MultiMapEntry {
    pub key: String,
    pub values: Vec<String>,
}

impl MultiMapEntry {
    /// Create a new entry from a key and its values.
    ///
    /// # Parameters
    ///
    /// - `key` - Entry key
    /// - `values` - Values in any order
    ///
    /// # Returns
    ///
    /// Returns a new `MultiMapEntry`; values are stored as given.
    pub fn new<K, V, I>(key: K, values: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = V>,
    {
        Self { key: key.into(), values: values.into_iter().map(Into::into).collect() }
    }
}

/// Convert a native multi-map into its canonical sequence.
///
/// Keys are sorted ascending and each key's values are copied and sorted
/// ascending. The caller's map is left untouched. No filtering of empty keys
/// or values takes place here.
///
/// # Parameters
///
/// - `map` - Native multi-map
///
/// # Returns
///
/// Returns the canonical sequence; an empty map yields an empty sequence.
pub fn canonicalize(map: &MultiMap) -> Vec<MultiMapEntry> {
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();

    keys.into_iter()
        .map(|key| {
            let mut values = map[key].clone();
            values.sort();
            MultiMapEntry { key: key.clone(), values }
        })
        .collect()
}

/// Convert a canonical sequence back into a native multi-map.
///
/// If the same key appears more than once the last occurrence wins. An empty
/// sequence yields an empty map, which callers treat the same as "absent".
///
/// # Parameters
///
/// - `entries` - Sequence of entries, canonical or not
///
/// # Returns
///
/// Returns the native multi-map.
pub fn decanonicalize(entries: &[MultiMapEntry]) -> MultiMap {
    entries.iter().map(|e| (e.key.clone(), e.values.clone())).collect()
}

/// Bring an arbitrary client-supplied sequence into canonical form.
///
/// Equivalent to `canonicalize(&decanonicalize(entries))`, so it is
/// idempotent on sequences that are already canonical.
pub fn canonical_entries(entries: &[MultiMapEntry]) -> Vec<MultiMapEntry> {
    canonicalize(&decanonicalize(entries))
}

/// Group raw `(key, value)` pairs (e.g. a parsed query string) by key.
///
/// Values keep the order they were received in.
pub fn from_pairs<I>(pairs: I) -> MultiMap
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut map = MultiMap::new();
    for (key, value) in pairs {
        map.entry(key).or_default().push(value);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &[&str])]) -> MultiMap {
        entries
            .iter()
            .map(|(k, vs)| (k.to_string(), vs.iter().map(|v| v.to_string()).collect()))
            .collect()
    }

    /// Test that keys and values come out sorted.
    #[test]
    fn test_canonicalize_sorts_keys_and_values() {
        let m = map(&[("b", &["2", "1"][..]), ("a", &["z", "y", "x"][..])]);

        let canonical = canonicalize(&m);

        assert_eq!(
            canonical,
            vec![MultiMapEntry::new("a", ["x", "y", "z"]), MultiMapEntry::new("b", ["1", "2"])]
        );
        // The source map keeps its original value order.
        assert_eq!(m["b"], vec!["2".to_string(), "1".to_string()]);
    }

    /// Test that an empty map canonicalizes to an empty sequence and back.
    #[test]
    fn test_empty_map() {
        assert!(canonicalize(&MultiMap::new()).is_empty());
        assert!(decanonicalize(&[]).is_empty());
    }

    /// Test that permuting keys or values gives the same canonical output.
    #[test]
    fn test_canonicalize_is_order_independent() {
        let first = from_pairs(vec![
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "3".to_string()),
            ("a".to_string(), "2".to_string()),
        ]);
        let second = from_pairs(vec![
            ("b".to_string(), "3".to_string()),
            ("a".to_string(), "2".to_string()),
            ("a".to_string(), "1".to_string()),
        ]);

        assert_eq!(canonicalize(&first), canonicalize(&second));
    }

    /// Test that canonicalizing an already canonical sequence is a no-op.
    #[test]
    fn test_canonical_entries_idempotent() {
        let raw = vec![MultiMapEntry::new("q", ["b", "a"]), MultiMapEntry::new("p", ["1"])];

        let once = canonical_entries(&raw);
        let twice = canonical_entries(&once);

        assert_eq!(once, twice);
        assert_eq!(once[0].key, "p");
        assert_eq!(once[1].values, vec!["a".to_string(), "b".to_string()]);
    }

    /// Test that decanonicalize(canonicalize(m)) preserves every key's value set.
    #[test]
    fn test_round_trip_preserves_sets() {
        let m = map(&[("accept", &["text/html", "application/json"][..]), ("x", &["1"][..])]);

        let back = decanonicalize(&canonicalize(&m));

        assert_eq!(back.len(), m.len());
        for (key, values) in &m {
            let mut expected = values.clone();
            expected.sort();
            let mut got = back[key].clone();
            got.sort();
            assert_eq!(expected, got);
        }
    }

    /// Test that a duplicated key in the input sequence resolves to the last one.
    #[test]
    fn test_decanonicalize_last_duplicate_wins() {
        let entries = vec![MultiMapEntry::new("a", ["1"]), MultiMapEntry::new("a", ["2", "3"])];

        let m = decanonicalize(&entries);

        assert_eq!(m.len(), 1);
        assert_eq!(m["a"], vec!["2".to_string(), "3".to_string()]);
    }

    /// Test the JSON shape of an entry.
    #[test]
    fn test_entry_serialization() {
        let json = serde_json::to_value(MultiMapEntry::new("a", ["1"])).expect("serializable");
        assert_eq!(json, serde_json::json!({"key": "a", "values": ["1"]}));
    }
}
