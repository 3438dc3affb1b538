//! Extracted key/value occurrences and the ordered map that holds them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One key/value occurrence with the byte span of its value.
///
/// `start..end` indexes the LF-normalized file content, so
/// `&content[start..end] == value` holds for every property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Property {
    /// Namespaced key, e.g. `lang|item.foo.name`.
    pub key: String,
    /// Text right of the first `=`.
    pub value: String,
    /// The complete source line.
    pub full: String,
    pub start: usize,
    pub end: usize,
}

impl Property {
    /// Builds a property from a line and the byte offset where the line ends.
    pub(crate) fn from_line(key: String, value: &str, full: &str, line_end: usize) -> Self {
        Property {
            key,
            value: value.to_string(),
            full: full.to_string(),
            start: line_end - value.len(),
            end: line_end,
        }
    }
}

/// Properties keyed by namespaced key, iterated in first-occurrence order.
///
/// Inserting a key that is already present replaces the stored property but
/// keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMap {
    entries: Vec<Property>,
    index: HashMap<String, usize>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, property: Property) {
        match self.index.get(&property.key) {
            Some(&pos) => self.entries[pos] = property,
            None => {
                self.index.insert(property.key.clone(), self.entries.len());
                self.entries.push(property);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Property> {
        self.index.get(key).map(|&pos| &self.entries[pos])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|p| p.key.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a PropertyMap {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<Property> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
        let mut map = PropertyMap::new();
        for property in iter {
            map.insert(property);
        }
        map
    }
}

impl Serialize for PropertyMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}
