//! Insertion-ordered asset map (original path -> busted reference)

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Original relative path -> busted reference, in insertion order.
///
/// Keys are unique. Re-inserting a key replaces its value in place and
/// keeps its original position. Iteration order is the order the engine
/// processed assets in, which the rewriter relies on.
#[derive(Debug, Clone, Default)]
pub struct AssetMap {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl AssetMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; returns the previous value for the key
    pub fn insert(&mut self, original: impl Into<String>, busted: impl Into<String>) -> Option<String> {
        let original = original.into();
        let busted = busted.into();

        match self.index.get(&original) {
            Some(&idx) => Some(std::mem::replace(&mut self.entries[idx].1, busted)),
            None => {
                self.index.insert(original.clone(), self.entries.len());
                self.entries.push((original, busted));
                None
            }
        }
    }

    pub fn get(&self, original: &str) -> Option<&str> {
        self.index
            .get(original)
            .map(|&idx| self.entries[idx].1.as_str())
    }

    /// Whether any entry maps to `busted`
    pub fn contains_value(&self, busted: &str) -> bool {
        self.entries.iter().any(|(_, v)| v == busted)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for AssetMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for AssetMap {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AssetMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for AssetMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AssetMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AssetMapVisitor;

        impl<'de> Visitor<'de> for AssetMapVisitor {
            type Value = AssetMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of original paths to busted references")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = AssetMap::new();
                while let Some((k, v)) = access.next_entry::<String, String>()? {
                    map.insert(k, v);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(AssetMapVisitor)
    }
}
