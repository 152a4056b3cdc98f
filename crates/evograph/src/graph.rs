//! Evolving graph storage.

use crate::edge::{Attributes, TimeEdge};
use crate::index::{NodeIndex, TimestampIndex};
use crate::label::{NodeId, NodeLabel, TimeId, TimeLabel};
use crate::store::EdgeStore;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A graph whose edges exist at discrete, totally ordered timestamps.
///
/// Nodes and timestamps are created on first use by [`add_edge`](Self::add_edge).
/// Nothing is ever removed. Undirected graphs store every edge in both
/// directions, so `edge_count` counts each undirected insertion twice.
///
/// # Timestamp order
///
/// A *new* timestamp must be larger than every timestamp already in the
/// graph, so timestamp ids can follow value order without being re-ranked.
/// Known timestamps can be reused at any point.
///
/// # Example
///
/// ```rust
/// use evograph::EvolvingGraph;
///
/// let mut g = EvolvingGraph::new(false);
/// g.add_edge("a", "b", 2020).unwrap();
/// g.add_edge("b", "c", 2021).unwrap();
///
/// assert_eq!(g.node_count(), 3);
/// assert_eq!(g.edge_count(), 4);
/// assert_eq!(g.timestamps(), &[2020, 2021]);
/// ```
#[derive(Debug, Clone)]
pub struct EvolvingGraph<V, T, A = ()> {
    directed: bool,
    nodes: NodeIndex<V>,
    timestamps: TimestampIndex<T>,
    edges: EdgeStore<A>,
}

/// An evolving graph whose edges carry named numeric attributes.
pub type AttributeEvolvingGraph<V, T> = EvolvingGraph<V, T, Attributes>;

impl<V: NodeLabel, T: TimeLabel> EvolvingGraph<V, T> {
    /// Create an empty evolving graph.
    pub fn new(directed: bool) -> Self {
        Self::empty(directed)
    }

    /// Add an edge `u -> v` at time `t` (and `v -> u` when undirected).
    ///
    /// Unknown labels are created. Fails only when `t` is a new timestamp
    /// smaller than the latest one, leaving the graph untouched.
    pub fn add_edge(&mut self, u: V, v: V, t: T) -> Result<()> {
        self.insert(u, v, t, ())
    }
}

impl<V: NodeLabel, T: TimeLabel> EvolvingGraph<V, T, Attributes> {
    /// Create an empty attribute evolving graph.
    pub fn new_attributed(directed: bool) -> Self {
        Self::empty(directed)
    }

    /// Add an edge carrying `attrs`.
    ///
    /// Mirrored undirected edges get independent copies of the attributes.
    pub fn add_edge_with_attributes(&mut self, u: V, v: V, t: T, attrs: Attributes) -> Result<()> {
        if attrs.is_empty() {
            return Err(Error::EmptyAttributes);
        }
        self.insert(u, v, t, attrs)
    }

    /// Names of all attributes used by some edge, in first-seen order.
    pub fn attribute_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for edge in self.edges.all() {
            for (name, _) in edge.attrs.iter() {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}

impl<V: NodeLabel, T: TimeLabel, A: Clone> EvolvingGraph<V, T, A> {
    fn empty(directed: bool) -> Self {
        Self {
            directed,
            nodes: NodeIndex::new(),
            timestamps: TimestampIndex::new(),
            edges: EdgeStore::new(),
        }
    }

    /// Create with estimated capacity (`edges` counts stored, mirrored edges).
    pub fn with_capacity(directed: bool, nodes: usize, edges: usize, timestamps: usize) -> Self {
        Self {
            directed,
            nodes: NodeIndex::with_capacity(nodes),
            timestamps: TimestampIndex::with_capacity(timestamps),
            edges: EdgeStore::with_capacity(edges, nodes, timestamps),
        }
    }

    fn insert(&mut self, u: V, v: V, t: T, attrs: A) -> Result<()> {
        // Timestamp first: a rejected edge must not create nodes
        let time = self.timestamps.ensure(t)?;
        let src = self.nodes.ensure(u);
        let dst = self.nodes.ensure(v);

        tracing::trace!(src, dst, time, directed = self.directed, "add edge");

        if self.directed {
            self.edges.append(src, dst, time, attrs);
        } else {
            self.edges.append(src, dst, time, attrs.clone());
            self.edges.append(dst, src, time, attrs);
        }
        Ok(())
    }

    /// Whether edges are directed.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Node labels in id order.
    pub fn nodes(&self) -> &[V] {
        self.nodes.ordered_labels()
    }

    /// Timestamps in ascending order.
    pub fn timestamps(&self) -> &[T] {
        self.timestamps.ordered_labels()
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[TimeEdge<A>] {
        self.edges.all()
    }

    /// Edges at timestamp `t`, in insertion order.
    pub fn edges_at(&self, t: &T) -> Result<Vec<&TimeEdge<A>>> {
        let time = self.timestamps.id_of(t)?;
        Ok(self.edges.at(time).collect())
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of stored edges (undirected insertions count twice).
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of timestamps.
    pub fn timestamp_count(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether a node label exists.
    pub fn has_node(&self, v: &V) -> bool {
        self.nodes.contains(v)
    }

    /// Whether a timestamp exists.
    pub fn has_timestamp(&self, t: &T) -> bool {
        self.timestamps.contains(t)
    }

    /// Id of a node label.
    pub fn node_id(&self, v: &V) -> Result<NodeId> {
        self.nodes.id_of(v)
    }

    /// Ordinal of a timestamp.
    pub fn timestamp_id(&self, t: &T) -> Result<TimeId> {
        self.timestamps.id_of(t)
    }

    /// Label of a node id.
    pub fn node_label(&self, id: NodeId) -> Result<&V> {
        self.nodes.label_of(id)
    }

    /// Value of a timestamp ordinal.
    pub fn timestamp_label(&self, id: TimeId) -> Result<&T> {
        self.timestamps.label_of(id)
    }

    /// The node index.
    pub fn node_index(&self) -> &NodeIndex<V> {
        &self.nodes
    }

    /// The timestamp index.
    pub fn timestamp_index(&self) -> &TimestampIndex<T> {
        &self.timestamps
    }

    /// The edge store, for id-level queries.
    pub fn edge_store(&self) -> &EdgeStore<A> {
        &self.edges
    }

    /// Targets of `v`'s edges at `t` (one entry per edge).
    pub fn out_neighbors(&self, v: &V, t: &T) -> Result<Vec<&V>> {
        let (src, time) = (self.nodes.id_of(v)?, self.timestamps.id_of(t)?);
        self.edges
            .neighbors(src, time)
            .map(|e| self.nodes.label_of(e.dst))
            .collect()
    }

    /// Sources of edges into `v` at `t` (one entry per edge).
    pub fn in_neighbors(&self, v: &V, t: &T) -> Result<Vec<&V>> {
        let (dst, time) = (self.nodes.id_of(v)?, self.timestamps.id_of(t)?);
        self.edges
            .incoming(dst, time)
            .map(|e| self.nodes.label_of(e.src))
            .collect()
    }

    /// Out-degree of `v` at `t`.
    pub fn out_degree(&self, v: &V, t: &T) -> Result<usize> {
        Ok(self
            .edges
            .out_degree(self.nodes.id_of(v)?, self.timestamps.id_of(t)?))
    }

    /// In-degree of `v` at `t`.
    pub fn in_degree(&self, v: &V, t: &T) -> Result<usize> {
        Ok(self
            .edges
            .in_degree(self.nodes.id_of(v)?, self.timestamps.id_of(t)?))
    }

    /// Nodes incident to at least one edge at `t`, in id order.
    pub fn active_nodes(&self, t: &T) -> Result<Vec<&V>> {
        let time = self.timestamps.id_of(t)?;
        let mut seen = vec![false; self.nodes.len()];
        for edge in self.edges.at(time) {
            seen[edge.src as usize] = true;
            seen[edge.dst as usize] = true;
        }
        Ok(self
            .nodes
            .ordered_labels()
            .iter()
            .zip(seen)
            .filter_map(|(label, active)| active.then_some(label))
            .collect())
    }

    /// Summary counts.
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            directed: self.directed,
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            timestamp_count: self.timestamp_count(),
        }
    }
}

/// Statistics about an evolving graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    /// Whether edges are directed.
    pub directed: bool,
    /// Number of nodes.
    pub node_count: usize,
    /// Number of stored edges.
    pub edge_count: usize,
    /// Number of timestamps.
    pub timestamp_count: usize,
}

impl<V: NodeLabel, T: TimeLabel> fmt::Display for EvolvingGraph<V, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_summary(
            f,
            "EvolvingGraph",
            self.directed,
            self.nodes.len(),
            self.edges.len(),
            self.timestamps.len(),
        )
    }
}

impl<V: NodeLabel, T: TimeLabel> fmt::Display for EvolvingGraph<V, T, Attributes> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_summary(
            f,
            "AttributeEvolvingGraph",
            self.directed,
            self.nodes.len(),
            self.edges.len(),
            self.timestamps.len(),
        )
    }
}

fn write_summary(
    f: &mut fmt::Formatter<'_>,
    kind: &str,
    directed: bool,
    nodes: usize,
    edges: usize,
    timestamps: usize,
) -> fmt::Result {
    let direction = if directed { "Directed" } else { "Undirected" };
    write!(f, "{direction} {kind} ({nodes} nodes, {edges} edges, {timestamps} timestamps)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_capacity_behaves_like_new() {
        let mut g: EvolvingGraph<&str, i32> = EvolvingGraph::with_capacity(true, 4, 8, 3);
        g.add_edge("a", "b", 1).unwrap();
        g.add_edge("b", "c", 2).unwrap();

        let mut plain = EvolvingGraph::new(true);
        plain.add_edge("a", "b", 1).unwrap();
        plain.add_edge("b", "c", 2).unwrap();

        assert_eq!(g.stats(), plain.stats());
        assert_eq!(g.timestamps(), &[1, 2]);
        assert!(g.add_edge("c", "a", 0).is_err());
    }

    #[test]
    fn test_directed_counts() {
        let mut g = EvolvingGraph::new(true);

        g.add_edge(1, 2, 1).unwrap();
        g.add_edge(2, 3, 1).unwrap();
        g.add_edge(2, 3, 2).unwrap();
        g.add_edge(2, 4, 2).unwrap();

        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.timestamp_count(), 2);
        assert_eq!(g.nodes(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_undirected_mirrors_edges() {
        let mut g = EvolvingGraph::new(false);

        g.add_edge('a', 'b', 0).unwrap();
        assert_eq!(g.edge_count(), 2);

        let pairs: Vec<_> = g.edges().iter().map(|e| (e.src, e.dst)).collect();
        assert_eq!(pairs, vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_rejected_timestamp_leaves_graph_unchanged() {
        let mut g = EvolvingGraph::new(true);
        g.add_edge("a", "b", 5).unwrap();

        let err = g.add_edge("c", "d", 3).unwrap_err();
        assert!(matches!(err, Error::TimestampOutOfOrder { .. }));
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);

        // Reusing a known timestamp is fine
        g.add_edge("c", "d", 5).unwrap();
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_edges_at_unknown_timestamp() {
        let mut g = EvolvingGraph::new(true);
        g.add_edge(1, 2, 1).unwrap();

        assert_eq!(g.edges_at(&1).unwrap().len(), 1);
        assert!(matches!(g.edges_at(&9), Err(Error::TimestampNotFound(_))));
    }

    #[test]
    fn test_neighbors_and_degrees() {
        let mut g = EvolvingGraph::new(true);
        g.add_edge("a", "b", 1).unwrap();
        g.add_edge("a", "c", 1).unwrap();
        g.add_edge("c", "b", 1).unwrap();
        g.add_edge("a", "b", 2).unwrap();

        assert_eq!(g.out_neighbors(&"a", &1).unwrap(), vec![&"b", &"c"]);
        assert_eq!(g.in_neighbors(&"b", &1).unwrap(), vec![&"a", &"c"]);
        assert_eq!(g.out_degree(&"a", &2).unwrap(), 1);
        assert_eq!(g.in_degree(&"c", &2).unwrap(), 0);
        assert!(g.out_neighbors(&"z", &1).is_err());
    }

    #[test]
    fn test_active_nodes() {
        let mut g = EvolvingGraph::new(true);
        g.add_edge(1, 2, 1).unwrap();
        g.add_edge(3, 4, 2).unwrap();

        assert_eq!(g.active_nodes(&1).unwrap(), vec![&1, &2]);
        assert_eq!(g.active_nodes(&2).unwrap(), vec![&3, &4]);
    }

    #[test]
    fn test_attribute_edges() {
        let mut g = AttributeEvolvingGraph::new_attributed(false);
        g.add_edge_with_attributes("a", "b", 1, Attributes::single("w", 2.0))
            .unwrap();

        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.edges()[1].attrs.get("w"), Some(2.0));
        assert_eq!(g.attribute_names(), vec!["w"]);

        let err = g
            .add_edge_with_attributes("a", "c", 1, Attributes::new())
            .unwrap_err();
        assert!(matches!(err, Error::EmptyAttributes));
        assert_eq!(g.node_count(), 2);
    }

    #[test]
    fn test_display_summary() {
        let mut g = EvolvingGraph::new(true);
        g.add_edge(1, 2, 1).unwrap();
        assert_eq!(
            g.to_string(),
            "Directed EvolvingGraph (2 nodes, 1 edges, 1 timestamps)"
        );

        let mut g = AttributeEvolvingGraph::new_attributed(false);
        g.add_edge_with_attributes(1, 2, 1, Attributes::single("w", 1.0))
            .unwrap();
        assert_eq!(
            g.to_string(),
            "Undirected AttributeEvolvingGraph (2 nodes, 2 edges, 1 timestamps)"
        );
    }

    #[test]
    fn test_stats() {
        let mut g = EvolvingGraph::new(false);
        g.add_edge("x", "y", 0).unwrap();
        g.add_edge("y", "z", 1).unwrap();

        let stats = g.stats();
        assert!(!stats.directed);
        assert_eq!(stats.node_count, 3);
        assert_eq!(stats.edge_count, 4);
        assert_eq!(stats.timestamp_count, 2);
    }
}
