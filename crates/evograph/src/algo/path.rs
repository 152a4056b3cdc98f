//! Shortest time-respecting paths.
//!
//! # Definition
//!
//! The temporal distance from `(u0, t0)` to `(u1, t1)` is the minimum number
//! of hops plus waits needed to get from one state to the other. Time never
//! runs backwards, so `t1 < t0` is always unreachable.
//!
//! # Search
//!
//! Expanding every wait one timestamp at a time visits up to
//! `nodes × timestamps` states, which does not fit at 10^5 nodes and 10^4
//! timestamps. Instead, waits are taken in one jump straight to the next
//! timestamp at which the node has an outgoing edge (or to the target
//! timestamp when standing on the target node). The jump costs as many steps
//! as it skips. Distances are exact.
//!
//! # Ties
//!
//! States settle in (distance, discovery) order and a state keeps the first
//! parent that reached it at its final distance. Among equally short paths
//! the reported one is therefore fixed by edge insertion order, but it is not
//! canonical: a jumped wait is discovered when its origin settles, so the
//! choice can differ from the path a unit-step breadth-first search would
//! report. Callers needing a specific shortest path must not rely on it.
//!
//! # Complexity
//!
//! - Time: O(E' log E') where E' is the number of `(node, timestamp)` pairs
//!   with outgoing edges up to the target timestamp
//! - Space: O(E')

use super::State;
use crate::graph::EvolvingGraph;
use crate::label::{NodeLabel, TimeId, TimeLabel};
use crate::Result;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

impl<V: NodeLabel, T: TimeLabel, A: Clone> EvolvingGraph<V, T, A> {
    /// Length of a shortest time-respecting path, `None` if unreachable.
    ///
    /// # Example
    ///
    /// ```
    /// use evograph::EvolvingGraph;
    ///
    /// let mut g = EvolvingGraph::new(false);
    /// g.add_edge("a", "b", 1).unwrap();
    /// g.add_edge("b", "c", 2).unwrap();
    ///
    /// assert_eq!(g.shortest_temporal_distance((&"a", &1), (&"c", &2)).unwrap(), Some(3));
    /// assert_eq!(g.shortest_temporal_distance((&"c", &2), (&"a", &1)).unwrap(), None);
    /// ```
    pub fn shortest_temporal_distance(
        &self,
        from: (&V, &T),
        to: (&V, &T),
    ) -> Result<Option<usize>> {
        let path = self.shortest_path_between_states(
            self.state(from.0, from.1)?,
            self.state(to.0, to.1)?,
        )?;
        Ok(path.map(|p| p.len() - 1))
    }

    /// A shortest time-respecting path as `(node, timestamp)` labels, `None`
    /// if unreachable.
    ///
    /// Consecutive states differ by one hop (same timestamp) or one wait
    /// (same node, next timestamp).
    pub fn shortest_temporal_path(
        &self,
        from: (&V, &T),
        to: (&V, &T),
    ) -> Result<Option<Vec<(&V, &T)>>> {
        let path = self.shortest_path_between_states(
            self.state(from.0, from.1)?,
            self.state(to.0, to.1)?,
        )?;

        path.map(|states| {
            states
                .into_iter()
                .map(|s| self.state_labels(s))
                .collect::<Result<Vec<_>>>()
        })
        .transpose()
    }

    /// Id-level shortest path between two states, `None` if unreachable.
    pub fn shortest_path_between_states(
        &self,
        from: State,
        to: State,
    ) -> Result<Option<Vec<State>>> {
        self.check_state(from)?;
        self.check_state(to)?;

        if to.time < from.time {
            return Ok(None);
        }
        if from == to {
            return Ok(Some(vec![from]));
        }

        let store = self.edge_store();
        let mut dist: HashMap<State, usize> = HashMap::new();
        let mut parent: HashMap<State, State> = HashMap::new();
        let mut heap = BinaryHeap::new();
        let mut seq: u64 = 0;

        dist.insert(from, 0);
        heap.push(Reverse((0usize, seq, from)));

        let mut settled = 0usize;
        while let Some(Reverse((d, _, s))) = heap.pop() {
            if dist.get(&s).is_some_and(|&best| d > best) {
                continue;
            }
            settled += 1;

            if s == to {
                tracing::debug!(settled, distance = d, "temporal path found");
                return Ok(Some(expand(&parent, from, to)));
            }

            let mut relax = |next: State, cost: usize| {
                let nd = d + cost;
                if dist.get(&next).map_or(true, |&best| nd < best) {
                    dist.insert(next, nd);
                    parent.insert(next, s);
                    seq += 1;
                    heap.push(Reverse((nd, seq, next)));
                }
            };

            for edge in store.neighbors(s.node, s.time) {
                relax(State::new(edge.dst, s.time), 1);
            }

            if let Some(t) = next_stop(store.next_active_time(s.node, s.time), s, to) {
                relax(State::new(s.node, t), (t - s.time) as usize);
            }
        }

        tracing::debug!(settled, "temporal path search exhausted");
        Ok(None)
    }
}

/// Timestamp a wait from `s` should jump to, if any is useful.
fn next_stop(next_active: Option<TimeId>, s: State, to: State) -> Option<TimeId> {
    let target_stop = (s.node == to.node && to.time > s.time).then_some(to.time);
    let active_stop = next_active.filter(|&t| t <= to.time);

    match (active_stop, target_stop) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Rebuild the path from parent links, spelling out every wait step.
fn expand(parent: &HashMap<State, State>, from: State, to: State) -> Vec<State> {
    let mut rev = vec![to];
    let mut cur = to;
    while cur != from {
        let prev = parent[&cur];
        if prev.node == cur.node {
            // Jumped wait: emit the skipped intermediate timestamps
            for t in (prev.time + 1..cur.time).rev() {
                rev.push(State::new(cur.node, t));
            }
        }
        rev.push(prev);
        cur = prev;
    }
    rev.reverse();
    rev
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_timestamp_hops() {
        let mut g = EvolvingGraph::new(true);
        g.add_edge(0, 1, 0).unwrap();
        g.add_edge(1, 2, 0).unwrap();

        let path = g.shortest_temporal_path((&0, &0), (&2, &0)).unwrap().unwrap();
        assert_eq!(path, vec![(&0, &0), (&1, &0), (&2, &0)]);
    }

    #[test]
    fn test_long_wait_is_expanded() {
        let mut g = EvolvingGraph::new(true);
        g.add_edge("a", "b", 0).unwrap();
        for t in 1..5 {
            g.add_edge("x", "y", t).unwrap();
        }
        g.add_edge("b", "c", 5).unwrap();

        let path = g.shortest_temporal_path((&"a", &0), (&"c", &5)).unwrap().unwrap();
        // hop, five waits, hop
        assert_eq!(path.len(), 8);
        assert_eq!(path[1], (&"b", &0));
        assert_eq!(path[6], (&"b", &5));
        for w in path.windows(2) {
            assert!(w[1].1 >= w[0].1);
        }
    }

    #[test]
    fn test_source_is_target() {
        let mut g = EvolvingGraph::new(true);
        g.add_edge(1, 2, 1).unwrap();

        assert_eq!(g.shortest_temporal_distance((&1, &1), (&1, &1)).unwrap(), Some(0));
    }

    #[test]
    fn test_backwards_in_time_unreachable() {
        let mut g = EvolvingGraph::new(true);
        g.add_edge(1, 2, 1).unwrap();
        g.add_edge(2, 1, 2).unwrap();

        assert_eq!(g.shortest_temporal_distance((&1, &2), (&2, &1)).unwrap(), None);
    }

    #[test]
    fn test_wait_at_target_node() {
        let mut g = EvolvingGraph::new(true);
        g.add_edge(1, 2, 1).unwrap();
        g.add_edge(3, 4, 2).unwrap();
        g.add_edge(3, 4, 3).unwrap();

        // 1 -> 2 at t=1, then wait twice at 2
        let path = g.shortest_temporal_path((&1, &1), (&2, &3)).unwrap().unwrap();
        assert_eq!(path, vec![(&1, &1), (&2, &1), (&2, &2), (&2, &3)]);
    }

    #[test]
    fn test_unknown_labels() {
        let mut g = EvolvingGraph::new(true);
        g.add_edge(1, 2, 1).unwrap();

        assert!(g.shortest_temporal_distance((&7, &1), (&2, &1)).is_err());
        assert!(g.shortest_temporal_distance((&1, &1), (&2, &9)).is_err());
    }

    #[test]
    fn test_ties_follow_insertion_order() {
        let mut via_b = EvolvingGraph::new(true);
        for (u, v) in [("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")] {
            via_b.add_edge(u, v, 0).unwrap();
        }
        let mut via_c = EvolvingGraph::new(true);
        for (u, v) in [("a", "c"), ("a", "b"), ("c", "d"), ("b", "d")] {
            via_c.add_edge(u, v, 0).unwrap();
        }

        let path = via_b.shortest_temporal_path((&"a", &0), (&"d", &0)).unwrap();
        assert_eq!(path, Some(vec![(&"a", &0), (&"b", &0), (&"d", &0)]));
        let path = via_c.shortest_temporal_path((&"a", &0), (&"d", &0)).unwrap();
        assert_eq!(path, Some(vec![(&"a", &0), (&"c", &0), (&"d", &0)]));
    }

    #[test]
    fn test_jumped_wait_settles_ahead_of_hops() {
        let mut g = EvolvingGraph::new(true);
        g.add_edge("a", "b", 0).unwrap();
        g.add_edge("b", "q", 1).unwrap();
        g.add_edge("a", "b", 2).unwrap();

        // a -> b at t=0 then two waits at b is just as short, but the jump
        // from (a, 0) to (a, 2) settles first
        let path = g.shortest_temporal_path((&"a", &0), (&"b", &2)).unwrap().unwrap();
        assert_eq!(path, vec![(&"a", &0), (&"a", &1), (&"a", &2), (&"b", &2)]);

        let a0 = g.state(&"a", &0).unwrap();
        let b0 = g.state(&"b", &0).unwrap();
        assert_eq!(g.forward_neighbors(a0).unwrap()[0], b0);
    }

    #[test]
    fn test_next_stop() {
        let to = State::new(5, 8);

        assert_eq!(next_stop(Some(3), State::new(1, 2), to), Some(3));
        assert_eq!(next_stop(Some(9), State::new(1, 2), to), None);
        assert_eq!(next_stop(None, State::new(5, 2), to), Some(8));
        assert_eq!(next_stop(Some(4), State::new(5, 2), to), Some(4));
    }
}
