//! Insertion-ordered string-keyed maps.
//!
//! Item attributes and link/url options keep the order they were declared
//! in, which is also the order they are rendered in. Child lists in the
//! serialized form use the same map encoding.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// HTML attributes of an item, rendered on its `<li>` (or `<ul>` for roots).
pub type Attributes = OrderedMap<String>;

/// Options handed to the route resolver and the link renderer.
pub type Options = OrderedMap<Value>;

/// A small map that remembers insertion order.
///
/// Re-inserting an existing key replaces the value in place.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(&mut slot.1, value));
        }
        self.entries.push((key, value));
        None
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> OrderedMap<V> {
    /// Entries of `self` followed by `other`; keys present in both take
    /// `other`'s value but keep their first position.
    pub fn merged(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for (k, v) in other.iter() {
            out.insert(k, v.clone());
        }
        out
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<K: Into<String>, V, const N: usize> From<[(K, V); N]> for OrderedMap<V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<V> IntoIterator for OrderedMap<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_entries(&self.entries, serializer)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = deserialize_entries(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

/// Serialize `(key, value)` pairs as a map, in order.
pub(crate) fn serialize_entries<V, S>(entries: &[(String, V)], serializer: S) -> Result<S::Ok, S::Error>
where
    V: Serialize,
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for (k, v) in entries {
        map.serialize_entry(k, v)?;
    }
    map.end()
}

/// Deserialize a map into `(key, value)` pairs in document order.
///
/// A `null` document yields no entries, so `children: ~` in YAML is
/// accepted as an empty list.
pub(crate) fn deserialize_entries<'de, V, D>(deserializer: D) -> Result<Vec<(String, V)>, D::Error>
where
    V: Deserialize<'de>,
    D: Deserializer<'de>,
{
    struct EntriesVisitor<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
        type Value = Vec<(String, V)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map")
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((key, value)) = access.next_entry::<String, V>()? {
                entries.push((key, value));
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_any(EntriesVisitor(PhantomData))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut attrs = Attributes::from([("class", "a".to_string()), ("title", "t".to_string())]);
        attrs.insert("class", "b".to_string());
        let keys: Vec<_> = attrs.keys().collect();
        assert_eq!(keys, vec!["class", "title"]);
        assert_eq!(attrs.get("class").map(String::as_str), Some("b"));
    }

    #[test]
    fn merged_keeps_first_position() {
        let url = Options::from([("absolute", Value::Bool(false)), ("page", Value::from(2))]);
        let link = Options::from([("title", Value::from("x")), ("absolute", Value::Bool(true))]);
        let merged = url.merged(&link);
        let keys: Vec<_> = merged.keys().collect();
        assert_eq!(keys, vec!["absolute", "page", "title"]);
        assert_eq!(merged.get("absolute"), Some(&Value::Bool(true)));
    }

    #[test]
    fn yaml_order_is_preserved() {
        let attrs: Attributes = serde_yml::from_str("zeta: z\nalpha: a\nmid: m\n").unwrap();
        let keys: Vec<_> = attrs.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn json_round_trip_keeps_order() {
        let attrs = Attributes::from([("b", "1".to_string()), ("a", "2".to_string())]);
        let json = serde_json::to_string(&attrs).unwrap();
        assert_eq!(json, r#"{"b":"1","a":"2"}"#);
        let back: Attributes = serde_json::from_str(&json).unwrap();
        assert_eq!(back, attrs);
    }
}
