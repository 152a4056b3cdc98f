//! Forward and backward neighbors of a state.

use super::State;
use crate::graph::EvolvingGraph;
use crate::label::{NodeLabel, TimeLabel};
use crate::Result;
use std::collections::HashSet;

impl<V: NodeLabel, T: TimeLabel, A: Clone> EvolvingGraph<V, T, A> {
    /// States reachable from `state` in one transition.
    ///
    /// Hop targets come first, in edge insertion order and without
    /// duplicates from parallel edges; the wait move to the next timestamp,
    /// if there is one, comes last.
    pub fn forward_neighbors(&self, state: State) -> Result<Vec<State>> {
        self.check_state(state)?;

        let mut seen = HashSet::new();
        let mut out: Vec<State> = self
            .edge_store()
            .neighbors(state.node, state.time)
            .filter(|e| seen.insert(e.dst))
            .map(|e| State::new(e.dst, state.time))
            .collect();

        if let Some(next) = self.timestamp_index().next(state.time) {
            out.push(State::new(state.node, next));
        }
        Ok(out)
    }

    /// States from which `state` is reachable in one transition.
    ///
    /// Hop sources first, then the wait move from the previous timestamp.
    pub fn backward_neighbors(&self, state: State) -> Result<Vec<State>> {
        self.check_state(state)?;

        let mut seen = HashSet::new();
        let mut out: Vec<State> = self
            .edge_store()
            .incoming(state.node, state.time)
            .filter(|e| seen.insert(e.src))
            .map(|e| State::new(e.src, state.time))
            .collect();

        if let Some(prev) = state.time.checked_sub(1) {
            out.push(State::new(state.node, prev));
        }
        Ok(out)
    }
}
