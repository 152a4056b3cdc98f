//! Label bounds and dense id types.

use std::fmt::Debug;
use std::hash::Hash;

/// Dense node id, assigned in first-seen order.
pub type NodeId = u32;

/// Dense timestamp ordinal, consistent with the timestamp order.
pub type TimeId = u32;

/// Anything usable as a node label.
pub trait NodeLabel: Eq + Hash + Clone + Debug {}

impl<V: Eq + Hash + Clone + Debug> NodeLabel for V {}

/// Anything usable as a timestamp: labels must be totally ordered.
pub trait TimeLabel: Ord + Hash + Clone + Debug {}

impl<T: Ord + Hash + Clone + Debug> TimeLabel for T {}
