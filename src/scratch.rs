//! Per-pass scratch slot carried by every vertex and edge.
//!
//! Successive passes repurpose the slot for different meanings (a
//! visited-mark in one pass, a component id in the next). The tag makes a
//! stale value from a previous pass distinguishable from the current pass's
//! data; nothing clears the slot implicitly. Call
//! [`Graph::user_clear_vertices`]/[`Graph::user_clear_edges`] before any
//! pass that depends on a clean slot.
//!
//! [`Graph::user_clear_vertices`]: crate::Graph::user_clear_vertices
//! [`Graph::user_clear_edges`]: crate::Graph::user_clear_edges

use crate::graph::{EdgeId, VertexId};

/// Algorithm-owned scratch value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scratch {
    /// Cleared state; what `user_clear_*` resets to.
    #[default]
    None,
    /// Bare visited/touched mark.
    Mark,
    /// Pass-defined counter or ordinal.
    Count(u64),
    /// Component/partition id, e.g. from an SCC pass.
    Component(u32),
    /// Reference to another vertex (union-find parent, DFS predecessor).
    Vertex(VertexId),
    /// Reference to an edge (e.g. the tree edge that reached a vertex).
    Edge(EdgeId),
}

impl Scratch {
    /// Returns `true` if the slot holds no pass data.
    pub fn is_none(&self) -> bool {
        matches!(self, Scratch::None)
    }
}
