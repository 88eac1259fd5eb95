//! Path keys and routes into a context.
//!
//! Overrides and filters are written as trees shaped like the user data:
//!
//! ```yaml
//! overrides:
//!   name: Jane Doe
//!   projects[0]:
//!     title: Renamed project
//! filters:
//!   projects: [2, 0]
//! ```
//!
//! [`resolve`] flattens such a tree into one [`Route`] per leaf.

use crate::error::{YucaError, YucaResult};
use regex::Regex;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::OnceLock;

/// Matches `name` or `name[index]`.
const PATH_KEY_PATTERN: &str = r"^([^\[\]]+)(?:\[(\d+)\])?$";

fn path_key_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(PATH_KEY_PATTERN).expect("path key pattern is valid"))
}

/// A parsed specification key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathKey {
    pub name: String,
    pub index: Option<usize>,
}

impl PathKey {
    /// Parses `name` or `name[index]`.
    ///
    /// # Errors
    /// * `YucaError::MalformedKey` if the key matches neither form
    pub fn parse(key: &str) -> YucaResult<Self> {
        let malformed = || YucaError::MalformedKey { key: key.to_string() };
        let captures = path_key_regex().captures(key).ok_or_else(malformed)?;

        let name = captures.get(1).ok_or_else(malformed)?.as_str().to_string();
        let index = match captures.get(2) {
            Some(digits) => Some(digits.as_str().parse::<usize>().map_err(|_| malformed())?),
            None => None,
        };

        Ok(Self { name, index })
    }
}

/// One step of a [`Route`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Field(String),
    Index(usize),
}

/// A resolved path into a context: field names, each optionally followed by
/// the index of the sequence element it addresses.
///
/// Routes built by [`resolve`] never start with an index and never hold two
/// consecutive indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route(Vec<Segment>);

impl Route {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Returns a new route extended by `key`.
    pub fn join(&self, key: &PathKey) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Field(key.name.clone()));
        if let Some(index) = key.index {
            segments.push(Segment::Index(index));
        }
        Self(segments)
    }

    /// Returns a new route extended by a bare field name.
    pub fn field(&self, name: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Field(name.to_string()));
        Self(segments)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Field(name) if position == 0 => write!(f, "{name}")?,
                Segment::Field(name) => write!(f, ".{name}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Lazy iterator over the leaves of a specification tree.
///
/// Created by [`resolve`]. After yielding an error the iterator is exhausted.
pub struct Directives<'a> {
    stack: Vec<(Route, serde_json::map::Iter<'a>)>,
}

impl<'a> Iterator for Directives<'a> {
    type Item = YucaResult<(Route, &'a Value)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (prefix, entries) = self.stack.last_mut()?;
            let Some((key, value)) = entries.next() else {
                self.stack.pop();
                continue;
            };

            let parsed = match PathKey::parse(key) {
                Ok(parsed) => parsed,
                Err(e) => {
                    self.stack.clear();
                    return Some(Err(e));
                }
            };

            match value {
                Value::Object(children) => {
                    let route = prefix.join(&parsed);
                    self.stack.push((route, children.iter()));
                }
                _ if parsed.index.is_some() => {
                    let route = prefix.to_string();
                    self.stack.clear();
                    return Some(Err(YucaError::IndexedLeaf {
                        key: key.clone(),
                        route,
                    }));
                }
                leaf => return Some(Ok((prefix.field(&parsed.name), leaf))),
            }
        }
    }
}

/// Flattens a specification tree into `(route, leaf)` pairs.
///
/// Nested mappings are always descended into; every other value is a leaf.
/// The iterator is lazy and borrows `tree`, so calling `resolve` again on the
/// same tree replays the same sequence.
pub fn resolve(tree: &Map<String, Value>) -> Directives<'_> {
    Directives {
        stack: vec![(Route::new(), tree.iter())],
    }
}
