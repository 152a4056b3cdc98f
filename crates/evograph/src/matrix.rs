//! Per-timestamp adjacency matrices.
//!
//! Rows and columns follow node id order ([`EvolvingGraph::nodes`]). Matrices
//! are dense `ndarray` arrays so they compose by matrix multiplication:
//!
//! ```text
//! (A[t1] · A[t2])[i][j] = #{ k : i -> k at t1 and k -> j at t2 }
//! ```
//!
//! which counts the time-respecting walks of length two that take their
//! first step at `t1` and their second at `t2`.
//!
//! # Example
//!
//! ```rust
//! use evograph::EvolvingGraph;
//!
//! let mut g = EvolvingGraph::new(true);
//! g.add_edge("a", "b", 1).unwrap();
//! g.add_edge("b", "c", 2).unwrap();
//!
//! let walks = g.matrix(&1).unwrap().dot(&g.matrix(&2).unwrap());
//! assert_eq!(walks[[0, 2]], 1); // a -> b -> c
//! ```

use crate::edge::{Attributes, TimeEdge};
use crate::graph::EvolvingGraph;
use crate::label::{NodeId, NodeLabel, TimeId, TimeLabel};
use crate::{Error, Result};
use ndarray::Array2;
use std::collections::HashSet;

impl<V: NodeLabel, T: TimeLabel, A: Clone> EvolvingGraph<V, T, A> {
    /// 0/1 adjacency matrix at timestamp `t`.
    ///
    /// Parallel edges still produce a single 1.
    pub fn matrix(&self, t: &T) -> Result<Array2<u32>> {
        self.matrix_at(self.timestamp_id(t)?)
    }

    /// 0/1 adjacency matrix at a timestamp ordinal.
    pub fn matrix_at(&self, time: TimeId) -> Result<Array2<u32>> {
        self.check_time(time)?;
        let n = self.node_count();
        let mut m = Array2::zeros((n, n));
        for edge in self.edge_store().at(time) {
            m[[edge.src as usize, edge.dst as usize]] = 1;
        }
        Ok(m)
    }

    /// Boolean adjacency matrix at timestamp `t`.
    pub fn bool_matrix(&self, t: &T) -> Result<Array2<bool>> {
        let time = self.timestamp_id(t)?;
        let n = self.node_count();
        let mut m = Array2::from_elem((n, n), false);
        for edge in self.edge_store().at(time) {
            m[[edge.src as usize, edge.dst as usize]] = true;
        }
        Ok(m)
    }

    /// Product of the adjacency matrices at `ts`, in the given order.
    ///
    /// Entry `(i, j)` counts walks from `i` to `j` taking exactly one edge at
    /// each listed timestamp. An empty list gives the identity. Fails with
    /// [`Error::WalkCountOverflow`] once a count exceeds `u32::MAX`.
    pub fn walk_counts(&self, ts: &[T]) -> Result<Array2<u32>> {
        let n = self.node_count();
        let mut product = Array2::<u32>::eye(n);
        for (step, t) in ts.iter().enumerate() {
            let time = self.timestamp_id(t)?;
            let mut next = Array2::<u32>::zeros((n, n));
            for edge in distinct_edges(self.edge_store().at(time)) {
                let (k, j) = (edge.0 as usize, edge.1 as usize);
                for i in 0..n {
                    let walks = product[[i, k]];
                    if walks == 0 {
                        continue;
                    }
                    next[[i, j]] = next[[i, j]]
                        .checked_add(walks)
                        .ok_or(Error::WalkCountOverflow { steps: step + 1 })?;
                }
            }
            product = next;
        }
        Ok(product)
    }

    /// Number of timestamps at which each edge `i -> j` exists.
    pub fn aggregated_matrix(&self) -> Array2<u32> {
        let n = self.node_count();
        let mut m = Array2::zeros((n, n));
        let mut seen = HashSet::new();
        for time in 0..self.timestamp_count() as TimeId {
            seen.clear();
            for edge in self.edge_store().at(time) {
                if seen.insert((edge.src, edge.dst)) {
                    m[[edge.src as usize, edge.dst as usize]] += 1;
                }
            }
        }
        m
    }

    fn check_time(&self, time: TimeId) -> Result<()> {
        if (time as usize) < self.timestamp_count() {
            Ok(())
        } else {
            Err(Error::TimestampOutOfRange {
                id: time as usize,
                len: self.timestamp_count(),
            })
        }
    }
}

/// `(src, dst)` pairs of `edges` without parallel duplicates, in first-seen order.
fn distinct_edges<'a, A: 'a>(
    edges: impl Iterator<Item = &'a TimeEdge<A>>,
) -> Vec<(NodeId, NodeId)> {
    let mut seen = HashSet::new();
    edges
        .map(|e| (e.src, e.dst))
        .filter(|&pair| seen.insert(pair))
        .collect()
}

impl<V: NodeLabel, T: TimeLabel> EvolvingGraph<V, T, Attributes> {
    /// Matrix of attribute `name` at timestamp `t`.
    ///
    /// Cells without an edge, or whose edge lacks the attribute, are `0.0`;
    /// a zero-valued attribute is indistinguishable from no edge. With
    /// parallel edges the last inserted one wins.
    pub fn attribute_matrix(&self, t: &T, name: &str) -> Result<Array2<f64>> {
        let time = self.timestamp_id(t)?;
        let n = self.node_count();
        let mut m = Array2::zeros((n, n));
        for edge in self.edge_store().at(time) {
            m[[edge.src as usize, edge.dst as usize]] = edge.attrs.get(name).unwrap_or(0.0);
        }
        Ok(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_entries() {
        let mut g = EvolvingGraph::new(true);
        g.add_edge(1, 2, 1).unwrap();
        g.add_edge(2, 3, 1).unwrap();
        g.add_edge(2, 3, 2).unwrap();
        g.add_edge(2, 4, 2).unwrap();

        let m = g.matrix(&1).unwrap();
        assert_eq!(m.dim(), (4, 4));
        assert_eq!(m.sum(), 2);
        assert_eq!(m[[0, 1]], 1);
        assert_eq!(m[[1, 2]], 1);

        let b = g.bool_matrix(&2).unwrap();
        assert!(b[[1, 2]] && b[[1, 3]]);
        assert!(!b[[0, 1]]);
    }

    #[test]
    fn test_parallel_edges_single_entry() {
        let mut g = EvolvingGraph::new(true);
        g.add_edge("a", "b", 0).unwrap();
        g.add_edge("a", "b", 0).unwrap();

        assert_eq!(g.matrix(&0).unwrap()[[0, 1]], 1);
        assert_eq!(g.aggregated_matrix()[[0, 1]], 1);
    }

    #[test]
    fn test_unknown_timestamp() {
        let mut g = EvolvingGraph::new(true);
        g.add_edge(0, 1, 0).unwrap();

        assert!(matches!(g.matrix(&3), Err(Error::TimestampNotFound(_))));
        assert!(matches!(
            g.matrix_at(3),
            Err(Error::TimestampOutOfRange { id: 3, len: 1 })
        ));
    }

    #[test]
    fn test_walk_counts() {
        let mut g = EvolvingGraph::new(true);
        // Two routes a -> {b, c} -> d
        g.add_edge("a", "b", 1).unwrap();
        g.add_edge("a", "c", 1).unwrap();
        g.add_edge("b", "d", 2).unwrap();
        g.add_edge("c", "d", 2).unwrap();

        let w = g.walk_counts(&[1, 2]).unwrap();
        assert_eq!(w[[0, 3]], 2);
        // Wrong order: no walk
        let w = g.walk_counts(&[2, 1]).unwrap();
        assert_eq!(w.sum(), 0);

        assert_eq!(g.walk_counts(&[]).unwrap(), Array2::<u32>::eye(4));
    }

    #[test]
    fn test_walk_counts_overflow_is_an_error() {
        let mut g = EvolvingGraph::new(true);
        for u in 0..4 {
            for v in 0..4 {
                g.add_edge(u, v, 1).unwrap();
            }
        }

        // 4^15 walks per cell still fits, 4^16 does not
        let w = g.walk_counts(&[1; 15]).unwrap();
        assert_eq!(w[[0, 0]], 4u32.pow(14));
        assert!(matches!(
            g.walk_counts(&[1; 20]),
            Err(Error::WalkCountOverflow { steps: 17 })
        ));
    }

    #[test]
    fn test_aggregated_matrix() {
        let mut g = EvolvingGraph::new(false);
        g.add_edge("a", "b", 1).unwrap();
        g.add_edge("a", "b", 2).unwrap();
        g.add_edge("b", "c", 2).unwrap();

        let m = g.aggregated_matrix();
        assert_eq!(m[[0, 1]], 2);
        assert_eq!(m[[1, 0]], 2);
        assert_eq!(m[[1, 2]], 1);
        assert_eq!(m[[0, 2]], 0);
    }

    #[test]
    fn test_attribute_matrix() {
        let mut g = EvolvingGraph::new_attributed(true);
        g.add_edge_with_attributes("a", "b", 1, Attributes::single("w", 0.5))
            .unwrap();
        g.add_edge_with_attributes("b", "a", 1, Attributes::single("other", 9.0))
            .unwrap();

        let m = g.attribute_matrix(&1, "w").unwrap();
        assert!((m[[0, 1]] - 0.5).abs() < 1e-12);
        assert_eq!(m[[1, 0]], 0.0);
    }
}
