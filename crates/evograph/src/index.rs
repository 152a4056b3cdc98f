//! Label <-> dense id indices for nodes and timestamps.

use crate::label::{NodeId, NodeLabel, TimeId, TimeLabel};
use crate::{Error, Result};
use std::collections::HashMap;

/// Bidirectional mapping between node labels and dense ids.
///
/// Ids are assigned in first-seen order and never reused.
#[derive(Debug, Clone)]
pub struct NodeIndex<V> {
    ids: HashMap<V, NodeId>,
    labels: Vec<V>,
}

impl<V: NodeLabel> Default for NodeIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: NodeLabel> NodeIndex<V> {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
            labels: Vec::new(),
        }
    }

    /// Create with estimated capacity.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            ids: HashMap::with_capacity(nodes),
            labels: Vec::with_capacity(nodes),
        }
    }

    /// Return the id of `label`, allocating the next id if it is new.
    pub fn ensure(&mut self, label: V) -> NodeId {
        if let Some(&id) = self.ids.get(&label) {
            return id;
        }

        let id = self.labels.len() as NodeId;
        self.labels.push(label.clone());
        self.ids.insert(label, id);
        id
    }

    /// Id of a known label.
    pub fn id_of(&self, label: &V) -> Result<NodeId> {
        self.ids
            .get(label)
            .copied()
            .ok_or_else(|| Error::NodeNotFound(format!("{label:?}")))
    }

    /// Label of an allocated id.
    pub fn label_of(&self, id: NodeId) -> Result<&V> {
        self.labels.get(id as usize).ok_or(Error::NodeOutOfRange {
            id: id as usize,
            len: self.labels.len(),
        })
    }

    /// Whether the label has been seen.
    pub fn contains(&self, label: &V) -> bool {
        self.ids.contains_key(label)
    }

    /// Number of labels seen so far.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether no labels were seen yet.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in id order.
    pub fn ordered_labels(&self) -> &[V] {
        &self.labels
    }
}

/// Bidirectional mapping between timestamp values and dense ordinals.
///
/// Ordinals follow the value order: `id(a) < id(b)` iff `a < b`. A new
/// timestamp must therefore be larger than every timestamp seen so far;
/// timestamps already present can be looked up in any order.
#[derive(Debug, Clone)]
pub struct TimestampIndex<T> {
    ids: HashMap<T, TimeId>,
    labels: Vec<T>,
}

impl<T: TimeLabel> Default for TimestampIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeLabel> TimestampIndex<T> {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
            labels: Vec::new(),
        }
    }

    /// Create with room for `timestamps` distinct timestamps.
    pub fn with_capacity(timestamps: usize) -> Self {
        Self {
            ids: HashMap::with_capacity(timestamps),
            labels: Vec::with_capacity(timestamps),
        }
    }

    /// Return the ordinal of `label`, allocating the next one if it is new.
    ///
    /// Fails with [`Error::TimestampOutOfOrder`] when `label` is new but not
    /// larger than the latest timestamp; the index is left unchanged.
    pub fn ensure(&mut self, label: T) -> Result<TimeId> {
        if let Some(&id) = self.ids.get(&label) {
            return Ok(id);
        }

        if let Some(latest) = self.labels.last() {
            if label < *latest {
                return Err(Error::TimestampOutOfOrder {
                    timestamp: format!("{label:?}"),
                    latest: format!("{latest:?}"),
                });
            }
        }

        let id = self.labels.len() as TimeId;
        self.labels.push(label.clone());
        self.ids.insert(label, id);
        Ok(id)
    }

    /// Ordinal of a known timestamp.
    pub fn id_of(&self, label: &T) -> Result<TimeId> {
        self.ids
            .get(label)
            .copied()
            .ok_or_else(|| Error::TimestampNotFound(format!("{label:?}")))
    }

    /// Timestamp value of an allocated ordinal.
    pub fn label_of(&self, id: TimeId) -> Result<&T> {
        self.labels
            .get(id as usize)
            .ok_or(Error::TimestampOutOfRange {
                id: id as usize,
                len: self.labels.len(),
            })
    }

    /// Whether the timestamp has been seen.
    pub fn contains(&self, label: &T) -> bool {
        self.ids.contains_key(label)
    }

    /// Number of timestamps seen so far.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether no timestamps were seen yet.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Timestamps in ascending order.
    pub fn ordered_labels(&self) -> &[T] {
        &self.labels
    }

    /// The ordinal following `id`, if any.
    pub fn next(&self, id: TimeId) -> Option<TimeId> {
        let next = id.checked_add(1)?;
        ((next as usize) < self.labels.len()).then_some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_ids_first_seen() {
        let mut idx = NodeIndex::new();

        assert_eq!(idx.ensure("b"), 0);
        assert_eq!(idx.ensure("a"), 1);
        assert_eq!(idx.ensure("b"), 0);

        assert_eq!(idx.len(), 2);
        assert_eq!(idx.ordered_labels(), &["b", "a"]);
        assert_eq!(idx.id_of(&"a").unwrap(), 1);
        assert_eq!(*idx.label_of(0).unwrap(), "b");
    }

    #[test]
    fn test_node_lookup_errors() {
        let mut idx = NodeIndex::new();
        idx.ensure('x');

        assert!(matches!(idx.id_of(&'y'), Err(Error::NodeNotFound(_))));
        assert!(matches!(
            idx.label_of(5),
            Err(Error::NodeOutOfRange { id: 5, len: 1 })
        ));
    }

    #[test]
    fn test_timestamps_must_increase() {
        let mut idx = TimestampIndex::new();

        assert_eq!(idx.ensure(10).unwrap(), 0);
        assert_eq!(idx.ensure(20).unwrap(), 1);
        // Known timestamps may come back in any order
        assert_eq!(idx.ensure(10).unwrap(), 0);

        let err = idx.ensure(15).unwrap_err();
        assert!(matches!(err, Error::TimestampOutOfOrder { .. }));
        assert_eq!(idx.len(), 2);
        assert!(!idx.contains(&15));
    }

    #[test]
    fn test_timestamp_next() {
        let mut idx = TimestampIndex::new();
        idx.ensure("2020").unwrap();
        idx.ensure("2021").unwrap();

        assert_eq!(idx.next(0), Some(1));
        assert_eq!(idx.next(1), None);
    }

    #[test]
    fn test_timestamp_lookup_errors() {
        let idx: TimestampIndex<u64> = TimestampIndex::new();

        assert!(matches!(idx.id_of(&1), Err(Error::TimestampNotFound(_))));
        assert!(matches!(
            idx.label_of(0),
            Err(Error::TimestampOutOfRange { id: 0, len: 0 })
        ));
    }
}
