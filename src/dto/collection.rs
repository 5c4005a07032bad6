//! Sequence wrapper for typed values
//!
//! Entries live at integer positions which may have gaps after `unset`.
//! Cursor iteration starts at position 0 and stops at the first missing
//! position; `items` visits every entry regardless of gaps.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use super::value::Value;

const UNNAMED: &str = "collection";

/// Indexed, appendable, counted collection of values
#[derive(Debug, Clone)]
pub struct Collection {
    name: Option<String>,
    items: BTreeMap<usize, Value>,
    /// Next append position; `None` once `usize::MAX` has been used
    next_index: Option<usize>,
    position: usize,
}

impl Default for Collection {
    fn default() -> Self {
        Self {
            name: None,
            items: BTreeMap::new(),
            next_index: Some(0),
            position: 0,
        }
    }
}

impl Collection {
    /// Create an empty untagged collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty collection tagged with a type name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Create a collection holding `items` at positions 0..n
    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut collection = Self::new();
        collection.extend(items);
        collection
    }

    /// Tag the collection with a type name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Type name used in messages
    pub fn type_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNNAMED)
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(&index)
    }

    /// Store a value at `index`, replacing any existing entry
    pub fn set(&mut self, index: usize, value: impl Into<Value>) {
        self.items.insert(index, value.into());
        self.next_index = match (self.next_index, index.checked_add(1)) {
            (Some(next), Some(after)) => Some(next.max(after)),
            _ => None,
        };
    }

    /// Append a value one past the highest position ever used.
    ///
    /// Returns the position written, or `None` without storing anything once
    /// position `usize::MAX` is taken.
    pub fn push(&mut self, value: impl Into<Value>) -> Option<usize> {
        let index = self.next_index?;
        self.set(index, value);
        Some(index)
    }

    /// Remove the entry at `index`, leaving a gap
    pub fn unset(&mut self, index: usize) -> Option<Value> {
        self.items.remove(&index)
    }

    pub fn exists(&self, index: usize) -> bool {
        self.items.contains_key(&index)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Every entry in position order
    pub fn items(&self) -> impl Iterator<Item = (usize, &Value)> {
        self.items.iter().map(|(index, value)| (*index, value))
    }

    // Cursor iteration

    pub fn rewind(&mut self) {
        self.position = 0;
    }

    pub fn current(&self) -> Option<&Value> {
        self.items.get(&self.position)
    }

    pub fn key(&self) -> usize {
        self.position
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        self.position += 1;
    }

    pub fn valid(&self) -> bool {
        self.exists(self.position)
    }

    /// Iterates from position 0 while positions exist
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            collection: self,
            position: 0,
        }
    }

    /// Projects records and nested collections to plain data, one level at a
    /// time; other entries pass through. Entries are returned in position
    /// order with gaps closed.
    pub fn flatten(&self) -> Vec<Value> {
        self.items
            .values()
            .map(|item| match item {
                Value::Record(record) => Value::Map(record.flatten()),
                Value::Collection(collection) => Value::List(collection.flatten()),
                other => other.clone(),
            })
            .collect()
    }
}

impl PartialEq for Collection {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.items == other.items
    }
}

impl<V: Into<Value>> Extend<V> for Collection {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<V: Into<Value>> FromIterator<V> for Collection {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::from_items(iter)
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Value;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl Serialize for Collection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Value::List(self.flatten()).serialize(serializer)
    }
}

/// Forward iterator over contiguous positions starting at 0
pub struct Iter<'a> {
    collection: &'a Collection,
    position: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<&'a Value> {
        let item = self.collection.get(self.position)?;
        self.position += 1;
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::definition::Definition;
    use crate::dto::registry::Registry;
    use serde_json::json;

    #[test]
    fn test_push_get_len() {
        let mut c = Collection::new();
        c.push(1);
        c.push("two");
        assert_eq!(c.len(), 2);
        assert_eq!(c.get(0), Some(&Value::Int(1)));
        assert_eq!(c.get(1), Some(&Value::from("two")));
        assert_eq!(c.get(2), None);
    }

    #[test]
    fn test_set_and_exists() {
        let mut c = Collection::new();
        c.set(3, true);
        assert!(c.exists(3));
        assert!(!c.exists(0));
        c.push(false);
        assert_eq!(c.get(4), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_unset_leaves_gap_and_push_continues() {
        let mut c = Collection::from_items([1, 2, 3]);
        assert_eq!(c.unset(2), Some(Value::Int(3)));
        assert_eq!(c.len(), 2);
        c.push(4);
        assert!(!c.exists(2));
        assert!(c.exists(3));
    }

    #[test]
    fn test_cursor_iteration() {
        let mut c = Collection::from_items(["a", "b"]);
        let mut seen = Vec::new();
        c.rewind();
        while c.valid() {
            seen.push((c.key(), c.current().cloned().unwrap()));
            c.next();
        }
        assert_eq!(seen, vec![(0, Value::from("a")), (1, Value::from("b"))]);

        c.rewind();
        assert_eq!(c.key(), 0);
        assert!(c.valid());
    }

    #[test]
    fn test_push_after_last_position_refused() {
        let mut c = Collection::new();
        c.push("first");
        c.set(usize::MAX, "last");

        assert_eq!(c.push("overflow"), None);
        assert_eq!(c.len(), 2);
        assert_eq!(c.get(0), Some(&Value::from("first")));
        assert_eq!(c.get(usize::MAX), Some(&Value::from("last")));
    }

    #[test]
    fn test_push_returns_position() {
        let mut c = Collection::new();
        assert_eq!(c.push(1), Some(0));
        c.set(5, 2);
        assert_eq!(c.push(3), Some(6));
    }

    #[test]
    fn test_iteration_stops_at_gap() {
        let mut c = Collection::from_items([1, 2, 3]);
        c.unset(1);
        assert_eq!(c.iter().count(), 1);
        assert_eq!(c.items().count(), 2);
    }

    #[test]
    fn test_flatten_one_level() {
        let mut registry = Registry::new();
        registry
            .register(Definition::new("Child").field("name", "string"))
            .unwrap();
        let child = registry
            .construct_json("Child", &json!({"name": "c"}))
            .unwrap();

        let inner = Collection::from_items([child.clone()]);
        let outer = Collection::from_items(vec![
            Value::from(child),
            Value::from(inner),
            Value::from(7),
        ]);

        assert_eq!(
            Value::List(outer.flatten()).to_json(),
            json!([{"name": "c"}, [{"name": "c"}], 7])
        );
    }

    #[test]
    fn test_equality_ignores_cursor() {
        let mut a = Collection::from_items([1]);
        let b = Collection::from_items([1]);
        a.next();
        assert_eq!(a, b);
    }
}
