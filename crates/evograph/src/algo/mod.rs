//! Algorithms over the time-expanded graph.
//!
//! The time-expanded graph has one state per `(node, timestamp)` pair and
//! two kinds of unit-cost transitions:
//!
//! | Transition | From | To | Condition |
//! |------------|------|----|-----------|
//! | Hop | `(u, t)` | `(v, t)` | edge `u -> v` at `t` |
//! | Wait | `(u, t)` | `(u, t + 1)` | `t + 1` is a timestamp ordinal |
//!
//! It is never materialized: states are expanded on demand from the edge
//! store.
//!
//! - [`path`] - shortest time-respecting paths between two states
//! - [`reach`] - every state reachable from a source, with distances
//! - [`neighbors`] - one-step successors and predecessors of a state
//! - [`aggregate`] - collapse all timestamps into a static `petgraph` graph

/// Static aggregation into a `petgraph` graph.
pub mod aggregate;

/// One-step moves in the time-expanded graph.
pub mod neighbors;

/// Shortest time-respecting paths.
pub mod path;

/// Exhaustive temporal breadth-first search.
pub mod reach;

pub use reach::TemporalBfsConfig;

use crate::graph::EvolvingGraph;
use crate::label::{NodeId, NodeLabel, TimeId, TimeLabel};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A `(node, timestamp)` state of the time-expanded graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct State {
    /// Node id.
    pub node: NodeId,
    /// Timestamp ordinal.
    pub time: TimeId,
}

impl State {
    /// Create a state.
    pub fn new(node: NodeId, time: TimeId) -> Self {
        Self { node, time }
    }
}

impl<V: NodeLabel, T: TimeLabel, A: Clone> EvolvingGraph<V, T, A> {
    /// State of a known node at a known timestamp.
    pub fn state(&self, v: &V, t: &T) -> Result<State> {
        Ok(State::new(self.node_id(v)?, self.timestamp_id(t)?))
    }

    /// Labels of a state.
    pub fn state_labels(&self, state: State) -> Result<(&V, &T)> {
        Ok((self.node_label(state.node)?, self.timestamp_label(state.time)?))
    }

    pub(crate) fn check_state(&self, state: State) -> Result<()> {
        if state.node as usize >= self.node_count() {
            return Err(Error::NodeOutOfRange {
                id: state.node as usize,
                len: self.node_count(),
            });
        }
        if state.time as usize >= self.timestamp_count() {
            return Err(Error::TimestampOutOfRange {
                id: state.time as usize,
                len: self.timestamp_count(),
            });
        }
        Ok(())
    }
}
