// SPDX-FileCopyrightText: 2026 macaddresslookup contributors
//
// SPDX-License-Identifier: MPL-2.0

//! Locate requested fields anywhere in a lookup response.
//!
//! A requested name matches the first document key, in depth-first pre-order,
//! whose lowercase form contains the lowercase name. The value for that key
//! is then fetched by a second, independent depth-first search, which checks
//! the current level before descending. When the same key text appears at
//! several depths the two searches can disagree, and the value comes from the
//! shallowest occurrence along the first branch that holds it.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{map, Map, Value};
use std::{convert::Infallible, str::FromStr};

pub type Document = Map<String, Value>;

const DEFAULT_QUERY: &str = "name";

/// Requested field names, in request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldQuery(Vec<String>);

impl FieldQuery {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for FieldQuery {
    fn default() -> Self {
        Self::new([DEFAULT_QUERY])
    }
}

/// Comma separated, each name trimmed. Empty names are kept.
impl FromStr for FieldQuery {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.split(',').map(str::trim)))
    }
}

/// Requested name to resolved value. `None` marks a field with no matching
/// key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedFields(IndexMap<String, Option<Value>>);

impl ResolvedFields {
    /// Every requested field marked absent.
    pub fn absent(query: &FieldQuery) -> Self {
        Self(query.iter().map(|name| (name.to_string(), None)).collect())
    }

    pub fn insert(&mut self, name: &str, value: Option<Value>) {
        self.0.insert(name.to_string(), value);
    }

    /// `None` if `name` wasn't requested, `Some(None)` if it was but nothing
    /// matched.
    pub fn get(&self, name: &str) -> Option<Option<&Value>> {
        self.0.get(name).map(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }
}

/// A JSON object in request order, absent fields as `null`.
impl Serialize for ResolvedFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Every key in `doc`, parents before children, siblings in document order.
/// Keys repeated at several depths are yielded each time.
pub fn keys(doc: &Document) -> Keys<'_> {
    Keys {
        stack: vec![doc.iter()],
    }
}

pub struct Keys<'a> {
    stack: Vec<map::Iter<'a>>,
}

impl<'a> Iterator for Keys<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            let level = self.stack.last_mut()?;
            match level.next() {
                Some((key, value)) => {
                    if let Value::Object(nested) = value {
                        self.stack.push(nested.iter());
                    }
                    return Some(key.as_str());
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// First key in traversal order containing `query`, ignoring case.
pub fn match_key<'a>(doc: &'a Document, query: &str) -> Option<&'a str> {
    let query = query.to_lowercase();
    keys(doc).find(|key| key.to_lowercase().contains(&query))
}

/// Value stored under exactly `key`. The current level wins; otherwise the
/// first nested object yielding a non-null value.
pub fn find_value<'a>(doc: &'a Document, key: &str) -> Option<&'a Value> {
    if let Some(value) = doc.get(key) {
        return Some(value);
    }
    doc.values()
        .filter_map(Value::as_object)
        .filter_map(|nested| find_value(nested, key))
        .find(|value| !value.is_null())
}

pub fn resolve(doc: &Document, query: &FieldQuery) -> ResolvedFields {
    let mut fields = ResolvedFields::default();
    for name in query.iter() {
        let value = match_key(doc, name).and_then(|key| {
            tracing::debug!("query '{}' matched key '{}'", name, key);
            find_value(doc, key)
        });
        fields.insert(name, value.cloned());
    }
    fields
}

/// Parse `raw` and resolve `query` against it. A body that isn't a JSON
/// object is logged and every field comes back absent.
pub fn resolve_str(raw: &str, query: &FieldQuery) -> ResolvedFields {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(doc)) => resolve(&doc, query),
        Ok(_) => {
            tracing::error!("JSON output is not an object.");
            ResolvedFields::absent(query)
        }
        Err(err) => {
            tracing::error!("Could not load JSON output to string: {}", err);
            ResolvedFields::absent(query)
        }
    }
}
