//! Wire model shared by the photo source adapter and the viewer.
//!
//! The adapter's response body has two shapes: a JSON array of photos, or
//! `{}` when the set is empty. Older deployments also emit a map keyed by
//! decimal indices (`{"0": {...}, "1": {...}}`). All of them decode into the
//! same [`PhotoSet`].

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

/// One displayable photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoItem {
    /// Absolute image URL.
    pub src: String,
    /// Possibly empty.
    #[serde(default)]
    pub title: String,
}

impl PhotoItem {
    pub fn new(src: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            title: title.into(),
        }
    }
}

/// Ordered photos for one viewer, in upstream order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoSet {
    items: Vec<PhotoItem>,
}

impl PhotoSet {
    pub fn new(items: Vec<PhotoItem>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PhotoItem> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PhotoItem> {
        self.items.iter()
    }

    pub fn last_index(&self) -> Option<usize> {
        self.items.len().checked_sub(1)
    }

    pub fn into_items(self) -> Vec<PhotoItem> {
        self.items
    }
}

impl FromIterator<PhotoItem> for PhotoSet {
    fn from_iter<T: IntoIterator<Item = PhotoItem>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PhotoSet {
    type Item = &'a PhotoItem;
    type IntoIter = std::slice::Iter<'a, PhotoItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Serialize for PhotoSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Empty sets go out as `{}`; clients depend on it.
        if self.items.is_empty() {
            return serializer.serialize_map(Some(0))?.end();
        }
        let mut seq = serializer.serialize_seq(Some(self.items.len()))?;
        for item in &self.items {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for PhotoSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(PhotoSetVisitor)
    }
}

struct PhotoSetVisitor;

impl<'de> Visitor<'de> for PhotoSetVisitor {
    type Value = PhotoSet;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array of photos or an object keyed by photo index")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<PhotoItem>()? {
            items.push(item);
        }
        Ok(PhotoSet { items })
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut indexed = BTreeMap::new();
        while let Some(key) = map.next_key::<String>()? {
            let index: usize = key.parse().map_err(|_| {
                de::Error::invalid_value(de::Unexpected::Str(&key), &"a decimal photo index")
            })?;
            let item = map.next_value::<PhotoItem>()?;
            if indexed.insert(index, item).is_some() {
                return Err(de::Error::custom(format!("duplicate photo index {index}")));
            }
        }
        Ok(PhotoSet {
            items: indexed.into_values().collect(),
        })
    }
}
