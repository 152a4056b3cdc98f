//! Exhaustive temporal breadth-first search.

use super::State;
use crate::graph::EvolvingGraph;
use crate::label::{NodeLabel, TimeLabel};
use crate::Result;
use std::collections::{HashMap, VecDeque};

/// Configuration for [`EvolvingGraph::temporal_bfs`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TemporalBfsConfig {
    /// Stop expanding states at this distance. `None` explores everything.
    pub max_distance: Option<usize>,
}

impl TemporalBfsConfig {
    /// Bound the search depth.
    pub fn with_max_distance(mut self, max: usize) -> Self {
        self.max_distance = Some(max);
        self
    }
}

impl<V: NodeLabel, T: TimeLabel, A: Clone> EvolvingGraph<V, T, A> {
    /// Every state reachable from `source`, with its temporal distance.
    ///
    /// Unlike [`shortest_path_between_states`](Self::shortest_path_between_states)
    /// this walks the time-expanded graph one wait at a time, so the result
    /// holds every reachable `(node, timestamp)` pair. Bound it with
    /// [`TemporalBfsConfig::max_distance`] on large graphs.
    ///
    /// # Complexity
    ///
    /// - Time: O(S + H) for S reached states and H hops out of them
    /// - Space: O(S)
    pub fn temporal_bfs(
        &self,
        source: State,
        config: TemporalBfsConfig,
    ) -> Result<HashMap<State, usize>> {
        self.check_state(source)?;

        let store = self.edge_store();
        let times = self.timestamp_index();
        let mut dist = HashMap::new();
        dist.insert(source, 0usize);

        let mut queue = VecDeque::new();
        queue.push_back(source);

        while let Some(s) = queue.pop_front() {
            let d = dist[&s];
            if config.max_distance.is_some_and(|max| d >= max) {
                continue;
            }

            let hops = store
                .neighbors(s.node, s.time)
                .map(|e| State::new(e.dst, s.time));
            let wait = times.next(s.time).map(|t| State::new(s.node, t));

            for next in hops.chain(wait) {
                if !dist.contains_key(&next) {
                    dist.insert(next, d + 1);
                    queue.push_back(next);
                }
            }
        }

        tracing::debug!(reached = dist.len(), "temporal bfs finished");
        Ok(dist)
    }

    /// Nodes reachable from `(v, t)` by some time-respecting path, in id order.
    pub fn reachable_nodes(&self, v: &V, t: &T, config: TemporalBfsConfig) -> Result<Vec<&V>> {
        let reached = self.temporal_bfs(self.state(v, t)?, config)?;
        let mut hit = vec![false; self.node_count()];
        for s in reached.keys() {
            hit[s.node as usize] = true;
        }
        Ok(self
            .nodes()
            .iter()
            .zip(hit)
            .filter_map(|(label, reached)| reached.then_some(label))
            .collect())
    }
}
