//! Static aggregation of an evolving graph.
//!
//! Collapsing the time axis gives an ordinary directed graph: useful as an
//! upper bound (anything temporally reachable is statically reachable) and
//! to hand the data to `petgraph`'s static algorithms.

use crate::graph::EvolvingGraph;
use crate::label::{NodeId, NodeLabel, TimeId, TimeLabel};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};

impl<V: NodeLabel, T: TimeLabel, A: Clone> EvolvingGraph<V, T, A> {
    /// Union of all timestamps as a `petgraph` graph.
    ///
    /// Node `i` of the result is node id `i` of this graph. There is one edge
    /// per distinct `(src, dst)` pair, in first-seen order, weighted by the
    /// number of timestamps at which it occurs.
    pub fn aggregate_graph(&self) -> DiGraph<V, usize> {
        let mut counts: HashMap<(NodeId, NodeId), usize> = HashMap::new();
        let mut order: Vec<(NodeId, NodeId)> = Vec::new();
        let mut seen = HashSet::new();

        for time in 0..self.timestamp_count() as TimeId {
            seen.clear();
            for edge in self.edge_store().at(time) {
                let key = (edge.src, edge.dst);
                if !seen.insert(key) {
                    continue;
                }
                let count = counts.entry(key).or_insert_with(|| {
                    order.push(key);
                    0
                });
                *count += 1;
            }
        }

        let mut graph = DiGraph::with_capacity(self.node_count(), order.len());
        for label in self.nodes() {
            graph.add_node(label.clone());
        }
        for key in order {
            graph.add_edge(
                NodeIndex::new(key.0 as usize),
                NodeIndex::new(key.1 as usize),
                counts[&key],
            );
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::algo::has_path_connecting;

    #[test]
    fn test_aggregate_counts_timestamps() {
        let mut g = EvolvingGraph::new(true);
        g.add_edge("a", "b", 1).unwrap();
        g.add_edge("a", "b", 1).unwrap();
        g.add_edge("a", "b", 2).unwrap();
        g.add_edge("b", "c", 2).unwrap();

        let agg = g.aggregate_graph();
        assert_eq!(agg.node_count(), 3);
        assert_eq!(agg.edge_count(), 2);

        let ab = agg.find_edge(NodeIndex::new(0), NodeIndex::new(1)).unwrap();
        assert_eq!(agg[ab], 2);
        assert_eq!(agg[NodeIndex::new(2)], "c");
    }

    #[test]
    fn test_aggregate_ignores_time_order() {
        let mut g = EvolvingGraph::new(true);
        g.add_edge(1, 2, 1).unwrap();
        g.add_edge(0, 1, 2).unwrap();

        let agg = g.aggregate_graph();
        let n0 = NodeIndex::new(g.node_id(&0).unwrap() as usize);
        let n2 = NodeIndex::new(g.node_id(&2).unwrap() as usize);
        assert!(has_path_connecting(&agg, n0, n2, None));

        // 0 -> 1 happens after 1 -> 2
        assert_eq!(g.shortest_temporal_distance((&0, &2), (&2, &2)).unwrap(), None);
    }
}
