//! Time-stamped edge types.

use crate::label::{NodeId, TimeId};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// A directed edge that exists at one timestamp.
///
/// `attrs` is `()` for plain evolving graphs and [`Attributes`] for
/// attribute evolving graphs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEdge<A = ()> {
    /// Source node id.
    pub src: NodeId,
    /// Target node id.
    pub dst: NodeId,
    /// Timestamp ordinal.
    pub time: TimeId,
    /// Edge payload.
    pub attrs: A,
}

impl<A> TimeEdge<A> {
    /// Create an edge carrying a payload.
    pub fn with_attrs(src: NodeId, dst: NodeId, time: TimeId, attrs: A) -> Self {
        Self {
            src,
            dst,
            time,
            attrs,
        }
    }
}

/// Named numeric edge attributes, e.g. a weight or a closeness score.
///
/// An association list kept in insertion order; edges usually carry one or
/// two attributes, so lookups are linear.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes(SmallVec<[(String, f64); 2]>);

impl Attributes {
    /// Create an empty attribute list.
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    /// Single-attribute list.
    pub fn single(name: impl Into<String>, value: f64) -> Self {
        Self::new().with(name, value)
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    /// Set `name` to `value`, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        let name = name.into();
        if let Some(slot) = self.0.iter_mut().find(|(k, _)| *k == name) {
            return Some(std::mem::replace(&mut slot.1, value));
        }
        self.0.push((name, value));
        None
    }

    /// Value of an attribute.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.iter().find(|(k, _)| k == name).map(|&(_, v)| v)
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (k, v) in iter {
            attrs.insert(k, v);
        }
        attrs
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        write!(f, "}}")
    }
}
