//! Lazy, composable JSONPath-style queries over [JsonValue] trees.
//!
//! A [Query] is an immutable chain of [Matcher]s rooted at a value. Building a chain
//! never touches the tree; evaluation happens only once the query is iterated, and then
//! strictly on demand: each matcher stage pulls values from its predecessor one at a
//! time, so a caller-supplied predicate runs exactly once per visited node and only as
//! far as the consumer pulls results.
//!
//! Matchers applied to the wrong kind of node never fail, they simply produce nothing:
//! an index selection against an object, a key selection against an array or any
//! selection against a scalar all yield an empty result for that branch.
//!
//! ```
//! use sift_json::dom::Parser;
//!
//! let json = Parser::default()
//!     .parse_str(r#"{"store": {"book": [{"price": 8.95}, {"price": 12.99}]}}"#)
//!     .unwrap();
//! let prices: Vec<_> = json
//!     .query()
//!     .descendant_or_self()
//!     .key("price")
//!     .iter()
//!     .collect();
//! assert_eq!(prices.len(), 2);
//! ```
use std::fmt::{Debug, Formatter};
use std::iter;
use std::ops::{Bound, RangeBounds};
use std::sync::Arc;

use crate::value::JsonValue;

/// A caller-supplied predicate over a single value. Predicates are shared pointers so
/// that queries stay cheap to branch and safe to hand between threads
pub type Predicate = Arc<dyn Fn(&JsonValue) -> bool + Send + Sync>;

/// A single traversal/selection step within a query chain
#[derive(Clone)]
pub enum Matcher {
    /// Identity; only ever the first matcher in a chain
    Root,
    /// Select the named child of an object, dropping null values
    Key(String),
    /// Project multiple named children into a new synthetic object
    Keys(Vec<String>),
    /// Select array elements at the given positions, negative positions wrapping
    /// around from the end
    Indices(Vec<i64>),
    /// Select a contiguous, half-open slice of an array, clamped to its bounds
    Range(usize, usize),
    /// All immediate children of an object or array
    Child,
    /// The node itself plus every transitive child, in pre-order
    DescendantOrSelf,
    /// Keep array elements, or a whole object, matching a predicate
    Filter(Predicate),
}

impl Debug for Matcher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Matcher::Root => write!(f, "Root"),
            Matcher::Key(name) => write!(f, "Key({name:?})"),
            Matcher::Keys(names) => write!(f, "Keys({names:?})"),
            Matcher::Indices(indices) => write!(f, "Indices({indices:?})"),
            Matcher::Range(lower, upper) => write!(f, "Range({lower}..{upper})"),
            Matcher::Child => write!(f, "Child"),
            Matcher::DescendantOrSelf => write!(f, "DescendantOrSelf"),
            Matcher::Filter(_) => write!(f, "Filter(..)"),
        }
    }
}

/// A matcher category describing movement through the tree
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    /// Any immediate child of an object or array
    Child,
    /// The node itself and any immediate or transitive child
    DescendantOrSelf,
}

/// An immutable chain of matchers rooted at a specific [JsonValue].
///
/// Every chain-extension method is pure: it returns a new query with one matcher
/// appended and leaves the receiver untouched, so a common prefix can be branched into
/// several independent queries. A query holds no iteration state of its own; each call
/// to [Query::iter] starts a fresh, independent traversal.
#[derive(Debug, Clone)]
pub struct Query<'a> {
    root: &'a JsonValue,
    matchers: Vec<Matcher>,
    deterministic: bool,
}

impl JsonValue {
    /// Start a query chain rooted at this value
    pub fn query(&self) -> Query<'_> {
        Query {
            root: self,
            matchers: vec![Matcher::Root],
            deterministic: false,
        }
    }
}

impl<'a> Query<'a> {
    fn appending(&self, matcher: Matcher) -> Self {
        let mut matchers = self.matchers.clone();
        matchers.push(matcher);
        Query {
            root: self.root,
            matchers,
            deterministic: self.deterministic,
        }
    }

    /// Matches a particular key on a JSON object
    pub fn key(&self, name: &str) -> Self {
        self.appending(Matcher::Key(name.to_string()))
    }

    /// Matches multiple keys on a JSON object, projecting those present and non-null
    /// into a new object
    pub fn keys<I, S>(&self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.appending(Matcher::Keys(names.into_iter().map(Into::into).collect()))
    }

    /// Matches a particular index on a JSON array. Negative indices can be used to
    /// index from the end
    pub fn index(&self, index: i64) -> Self {
        self.appending(Matcher::Indices(vec![index]))
    }

    /// Matches multiple indices on a JSON array. Negative indices can be used to index
    /// from the end
    pub fn indices(&self, indices: &[i64]) -> Self {
        self.appending(Matcher::Indices(indices.to_vec()))
    }

    /// Matches a range of indices on a JSON array. Closed ranges are desugared to
    /// half-open ones, and the bounds are clamped to the array during evaluation.
    /// Negative bounds are unrepresentable here by construction
    pub fn slice(&self, range: impl RangeBounds<usize>) -> Self {
        let lower = match range.start_bound() {
            Bound::Included(&n) => n,
            Bound::Excluded(&n) => n + 1,
            Bound::Unbounded => 0,
        };
        let upper = match range.end_bound() {
            Bound::Included(&n) => n + 1,
            Bound::Excluded(&n) => n,
            Bound::Unbounded => usize::MAX,
        };
        self.appending(Matcher::Range(lower, upper))
    }

    /// Matches along the given [Axis]
    pub fn axis(&self, axis: Axis) -> Self {
        match axis {
            Axis::Child => self.appending(Matcher::Child),
            Axis::DescendantOrSelf => self.appending(Matcher::DescendantOrSelf),
        }
    }

    /// Matches any immediate child of a JSON object or array
    pub fn any_child(&self) -> Self {
        self.axis(Axis::Child)
    }

    /// Matches any immediate and transitive child of a JSON object or array, as well as
    /// the node itself
    pub fn descendant_or_self(&self) -> Self {
        self.axis(Axis::DescendantOrSelf)
    }

    /// Matches values on a JSON array or object that the given `predicate` returns
    /// `true` for
    pub fn matches<F>(&self, predicate: F) -> Self
    where
        F: Fn(&JsonValue) -> bool + Send + Sync + 'static,
    {
        self.appending(Matcher::Filter(Arc::new(predicate)))
    }

    /// Matches values whose `name` field resolves to anything but null. This includes
    /// values such as `0`, `false` or `""` that Javascript would consider falsy
    pub fn has(&self, name: &str) -> Self {
        let key = name.to_string();
        self.matches(move |value| !value.child_by_key(&key).is_null())
    }

    /// Turn on determinism mode: object children are visited in sorted key order during
    /// wildcard and descendant expansion, making results reproducible across runs.
    /// Without the flag, object iteration order is unspecified
    pub fn deterministic(&self) -> Self {
        Query {
            root: self.root,
            matchers: self.matchers.clone(),
            deterministic: true,
        }
    }

    /// Begin a fresh, lazy traversal of the query
    pub fn iter(&self) -> QueryIter {
        let mut stream: ValueIter = Box::new(iter::once(self.root.clone()));
        for matcher in &self.matchers {
            stream = apply(matcher.clone(), stream, self.deterministic);
        }
        QueryIter { inner: stream }
    }

    /// The first matching value, if any
    pub fn first(&self) -> Option<JsonValue> {
        self.iter().next()
    }

    /// Eagerly collect every matching value
    pub fn all(&self) -> Vec<JsonValue> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for &Query<'a> {
    type Item = JsonValue;
    type IntoIter = QueryIter;

    fn into_iter(self) -> QueryIter {
        self.iter()
    }
}

impl<'a> IntoIterator for Query<'a> {
    type Item = JsonValue;
    type IntoIter = QueryIter;

    fn into_iter(self) -> QueryIter {
        self.iter()
    }
}

/// The type-erased seam between evaluation stages: a pull-based producer of values
type ValueIter = Box<dyn Iterator<Item = JsonValue>>;

/// A single consumption session over a [Query]. Each session owns its own traversal
/// state; sessions over the same query are fully independent
pub struct QueryIter {
    inner: ValueIter,
}

impl Iterator for QueryIter {
    type Item = JsonValue;

    fn next(&mut self) -> Option<JsonValue> {
        self.inner.next()
    }
}

/// Wrap one matcher stage around the output of the previous stage. Every stage is lazy:
/// it pulls from its input only when its own consumer pulls from it
fn apply(matcher: Matcher, input: ValueIter, deterministic: bool) -> ValueIter {
    match matcher {
        Matcher::Root => input,
        Matcher::Key(name) => Box::new(input.filter_map(move |value| select_key(value, &name))),
        Matcher::Keys(names) => {
            Box::new(input.filter_map(move |value| project_keys(value, &names)))
        }
        Matcher::Indices(indices) => {
            Box::new(input.flat_map(move |value| select_indices(value, &indices)))
        }
        Matcher::Range(lower, upper) => {
            Box::new(input.flat_map(move |value| select_range(value, lower, upper)))
        }
        Matcher::Child => Box::new(input.flat_map(move |value| children(value, deterministic))),
        Matcher::DescendantOrSelf => {
            Box::new(input.flat_map(move |value| DescendantIter::new(value, deterministic)))
        }
        Matcher::Filter(predicate) => {
            Box::new(input.flat_map(move |value| filter_value(value, predicate.clone())))
        }
    }
}

fn select_key(value: JsonValue, name: &str) -> Option<JsonValue> {
    match value {
        JsonValue::Object(pairs) => pairs
            .into_iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
            .filter(|value| !value.is_null()),
        _ => None,
    }
}

fn project_keys(value: JsonValue, names: &[String]) -> Option<JsonValue> {
    let JsonValue::Object(pairs) = value else {
        return None;
    };
    let mut selected: Vec<(String, JsonValue)> = Vec::new();
    for name in names {
        if selected.iter().any(|(key, _)| key == name) {
            continue;
        }
        if let Some((key, value)) = pairs.iter().find(|(key, _)| key == name) {
            if !value.is_null() {
                selected.push((key.clone(), value.clone()));
            }
        }
    }
    if selected.is_empty() {
        None
    } else {
        Some(JsonValue::Object(selected))
    }
}

fn select_indices(value: JsonValue, indices: &[i64]) -> std::vec::IntoIter<JsonValue> {
    match value {
        JsonValue::Array(items) => {
            let len = items.len() as i64;
            let mut picked = Vec::new();
            for &index in indices {
                let resolved = if index < 0 { index + len } else { index };
                if (0..len).contains(&resolved) {
                    picked.push(items[resolved as usize].clone());
                }
            }
            picked.into_iter()
        }
        _ => Vec::new().into_iter(),
    }
}

fn select_range(value: JsonValue, lower: usize, upper: usize) -> std::vec::IntoIter<JsonValue> {
    match value {
        JsonValue::Array(mut items) => {
            let upper = upper.min(items.len());
            let lower = lower.min(upper);
            items.truncate(upper);
            items.drain(..lower);
            items.into_iter()
        }
        _ => Vec::new().into_iter(),
    }
}

fn children(value: JsonValue, deterministic: bool) -> std::vec::IntoIter<JsonValue> {
    match value {
        JsonValue::Object(mut pairs) => {
            if deterministic {
                pairs.sort_by(|(l, _), (r, _)| l.cmp(r));
            }
            pairs
                .into_iter()
                .map(|(_, value)| value)
                .collect::<Vec<_>>()
                .into_iter()
        }
        JsonValue::Array(items) => items.into_iter(),
        _ => Vec::new().into_iter(),
    }
}

fn filter_value(value: JsonValue, predicate: Predicate) -> ValueIter {
    match value {
        JsonValue::Array(items) => {
            // the predicate fires per element, as each is pulled
            Box::new(items.into_iter().filter(move |element| predicate(element)))
        }
        JsonValue::Object(_) => {
            if predicate(&value) {
                Box::new(iter::once(value))
            } else {
                Box::new(iter::empty())
            }
        }
        _ => Box::new(iter::empty()),
    }
}

/// Pre-order walk over a subtree, realized with an explicit work-stack rather than
/// call-stack recursion so that the traversal can suspend between elements and cope
/// with arbitrarily deep trees
struct DescendantIter {
    stack: Vec<JsonValue>,
    deterministic: bool,
}

impl DescendantIter {
    fn new(value: JsonValue, deterministic: bool) -> Self {
        DescendantIter {
            stack: vec![value],
            deterministic,
        }
    }
}

impl Iterator for DescendantIter {
    type Item = JsonValue;

    fn next(&mut self) -> Option<JsonValue> {
        let value = self.stack.pop()?;
        match &value {
            JsonValue::Object(pairs) => {
                // children pushed in reverse so the leftmost is popped first
                let mut members: Vec<(&String, &JsonValue)> =
                    pairs.iter().map(|(key, value)| (key, value)).collect();
                if self.deterministic {
                    members.sort_by(|(l, _), (r, _)| l.cmp(r));
                }
                for (_, child) in members.into_iter().rev() {
                    self.stack.push(child.clone());
                }
            }
            JsonValue::Array(items) => {
                for child in items.iter().rev() {
                    self.stack.push(child.clone());
                }
            }
            _ => (),
        }
        Some(value)
    }
}
