//! Time window queries over timestamp ordinals.

use crate::edge::TimeEdge;
use crate::graph::EvolvingGraph;
use crate::label::{NodeLabel, TimeId, TimeLabel};
use crate::Result;

/// An inclusive range of timestamp ordinals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    /// First ordinal (inclusive).
    pub start: TimeId,
    /// Last ordinal (inclusive).
    pub end: TimeId,
}

impl TimeWindow {
    /// Create a new time window. `start > end` gives an empty window.
    pub fn new(start: TimeId, end: TimeId) -> Self {
        Self { start, end }
    }

    /// Whether the window covers no ordinal.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Intersection of two windows, if any.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);

        (start <= end).then_some(Self { start, end })
    }

    /// Ordinals in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = TimeId> {
        self.start..=self.end
    }
}

impl<V: NodeLabel, T: TimeLabel, A: Clone> EvolvingGraph<V, T, A> {
    /// Window between two known timestamps (inclusive).
    pub fn window(&self, from: &T, to: &T) -> Result<TimeWindow> {
        Ok(TimeWindow::new(self.timestamp_id(from)?, self.timestamp_id(to)?))
    }

    /// Window covering every timestamp of the graph; empty if there are none.
    pub fn full_window(&self) -> TimeWindow {
        match self.timestamp_count() {
            0 => TimeWindow::new(1, 0),
            n => TimeWindow::new(0, (n - 1) as TimeId),
        }
    }

    /// Edges whose timestamp lies in `window`, by timestamp then insertion order.
    pub fn edges_in_window(&self, window: TimeWindow) -> Vec<&TimeEdge<A>> {
        self.clamp(window)
            .iter()
            .flat_map(|w| w.iter())
            .flat_map(|t| self.edge_store().at(t))
            .collect()
    }

    /// Number of edges per timestamp ordinal in `window`.
    pub fn edge_counts(&self, window: TimeWindow) -> Vec<(TimeId, usize)> {
        self.clamp(window)
            .iter()
            .flat_map(|w| w.iter())
            .map(|t| (t, self.edge_store().count_at(t)))
            .collect()
    }

    /// The part of `window` that covers existing timestamps.
    fn clamp(&self, window: TimeWindow) -> Option<TimeWindow> {
        window.intersect(&self.full_window())
    }
}
