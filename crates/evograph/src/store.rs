//! Append-only storage for time-stamped edges.

use crate::edge::TimeEdge;
use crate::label::{NodeId, TimeId};
use smallvec::SmallVec;
use std::collections::HashMap;

type EdgeList = SmallVec<[usize; 4]>;

/// Insertion-ordered edges with adjacency lookups keyed by `(node, timestamp)`.
///
/// Optimized for the time-expanded traversal:
/// - `(src, time)` and `(dst, time)` indexes for O(d) neighbor lookup
/// - per-timestamp edge lists for snapshot queries
/// - per-node sorted list of timestamps with outgoing edges
#[derive(Debug, Clone)]
pub struct EdgeStore<A = ()> {
    /// All edges, in insertion order.
    edges: Vec<TimeEdge<A>>,
    /// (src, time) -> outgoing edge indices.
    out_index: HashMap<(NodeId, TimeId), EdgeList>,
    /// (dst, time) -> incoming edge indices.
    in_index: HashMap<(NodeId, TimeId), EdgeList>,
    /// time -> edge indices.
    by_time: Vec<Vec<usize>>,
    /// src -> sorted distinct timestamps with at least one outgoing edge.
    out_times: Vec<Vec<TimeId>>,
}

impl<A> Default for EdgeStore<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> EdgeStore<A> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            edges: Vec::new(),
            out_index: HashMap::new(),
            in_index: HashMap::new(),
            by_time: Vec::new(),
            out_times: Vec::new(),
        }
    }

    /// Create with estimated capacity.
    pub fn with_capacity(edges: usize, nodes: usize, timestamps: usize) -> Self {
        Self {
            edges: Vec::with_capacity(edges),
            out_index: HashMap::with_capacity(edges),
            in_index: HashMap::with_capacity(edges),
            by_time: Vec::with_capacity(timestamps),
            out_times: Vec::with_capacity(nodes),
        }
    }

    /// Append an edge and update every index. Returns its position.
    pub fn append(&mut self, src: NodeId, dst: NodeId, time: TimeId, attrs: A) -> usize {
        let idx = self.edges.len();

        self.out_index.entry((src, time)).or_default().push(idx);
        self.in_index.entry((dst, time)).or_default().push(idx);

        let t = time as usize;
        if self.by_time.len() <= t {
            self.by_time.resize_with(t + 1, Vec::new);
        }
        self.by_time[t].push(idx);

        let s = src as usize;
        if self.out_times.len() <= s {
            self.out_times.resize_with(s + 1, Vec::new);
        }
        let times = &mut self.out_times[s];
        // Usually appends: new timestamps only ever arrive at the end
        if let Err(pos) = times.binary_search(&time) {
            times.insert(pos, time);
        }

        self.edges.push(TimeEdge::with_attrs(src, dst, time, attrs));
        idx
    }

    /// All edges in insertion order.
    pub fn all(&self) -> &[TimeEdge<A>] {
        &self.edges
    }

    /// Edges at a timestamp, in insertion order.
    pub fn at(&self, time: TimeId) -> impl Iterator<Item = &TimeEdge<A>> {
        self.by_time
            .get(time as usize)
            .into_iter()
            .flatten()
            .map(move |&i| &self.edges[i])
    }

    /// Number of edges at a timestamp.
    pub fn count_at(&self, time: TimeId) -> usize {
        self.by_time.get(time as usize).map_or(0, Vec::len)
    }

    /// Outgoing edges of `src` at `time`, in insertion order.
    pub fn neighbors(&self, src: NodeId, time: TimeId) -> impl Iterator<Item = &TimeEdge<A>> {
        self.out_index
            .get(&(src, time))
            .into_iter()
            .flatten()
            .map(move |&i| &self.edges[i])
    }

    /// Incoming edges of `dst` at `time`, in insertion order.
    pub fn incoming(&self, dst: NodeId, time: TimeId) -> impl Iterator<Item = &TimeEdge<A>> {
        self.in_index
            .get(&(dst, time))
            .into_iter()
            .flatten()
            .map(move |&i| &self.edges[i])
    }

    /// Out-degree of a node at a timestamp (multi-edges counted).
    pub fn out_degree(&self, src: NodeId, time: TimeId) -> usize {
        self.out_index.get(&(src, time)).map_or(0, |v| v.len())
    }

    /// In-degree of a node at a timestamp (multi-edges counted).
    pub fn in_degree(&self, dst: NodeId, time: TimeId) -> usize {
        self.in_index.get(&(dst, time)).map_or(0, |v| v.len())
    }

    /// Sorted timestamps at which `src` has outgoing edges.
    pub fn active_times(&self, src: NodeId) -> &[TimeId] {
        self.out_times.get(src as usize).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First timestamp strictly after `after` at which `src` has outgoing edges.
    pub fn next_active_time(&self, src: NodeId, after: TimeId) -> Option<TimeId> {
        let times = self.active_times(src);
        let pos = times.partition_point(|&t| t <= after);
        times.get(pos).copied()
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EdgeStore {
        let mut store = EdgeStore::new();
        store.append(0, 1, 0, ());
        store.append(1, 2, 0, ());
        store.append(0, 2, 1, ());
        store.append(0, 1, 0, ());
        store
    }

    #[test]
    fn test_insertion_order() {
        let store = sample();
        let pairs: Vec<_> = store.all().iter().map(|e| (e.src, e.dst, e.time)).collect();

        assert_eq!(pairs, vec![(0, 1, 0), (1, 2, 0), (0, 2, 1), (0, 1, 0)]);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_neighbors_keep_multi_edges() {
        let store = sample();
        let targets: Vec<_> = store.neighbors(0, 0).map(|e| e.dst).collect();

        assert_eq!(targets, vec![1, 1]);
        assert_eq!(store.out_degree(0, 0), 2);
        assert_eq!(store.neighbors(2, 0).count(), 0);
        assert_eq!(store.neighbors(0, 7).count(), 0);
    }

    #[test]
    fn test_incoming() {
        let store = sample();
        let sources: Vec<_> = store.incoming(2, 0).map(|e| e.src).collect();

        assert_eq!(sources, vec![1]);
        assert_eq!(store.in_degree(1, 0), 2);
    }

    #[test]
    fn test_at_timestamp() {
        let store = sample();

        assert_eq!(store.at(0).count(), 3);
        assert_eq!(store.count_at(1), 1);
        assert_eq!(store.at(5).count(), 0);
    }

    #[test]
    fn test_active_times() {
        let mut store = sample();
        store.append(0, 3, 4, ());
        store.append(0, 3, 2, ());

        assert_eq!(store.active_times(0), &[0, 1, 2, 4]);
        assert_eq!(store.next_active_time(0, 0), Some(1));
        assert_eq!(store.next_active_time(0, 2), Some(4));
        assert_eq!(store.next_active_time(0, 4), None);
        assert_eq!(store.next_active_time(9, 0), None);
    }
}
