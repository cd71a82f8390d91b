//! Traversal: iterators for read-only passes and id-stepping accessors for
//! passes that delete or relink while walking a list.
//!
//! The iterators borrow the graph immutably and follow insertion order. A
//! pass that mutates during the walk uses the `first_*`/`next_*` accessors
//! instead, capturing the next id before unlinking the current record:
//!
//! ```
//! # use netgraph::Graph;
//! # let mut g = Graph::new();
//! # let v = g.add_vertex("v");
//! # let w = g.add_vertex("w");
//! # g.add_edge(v, w, 1, false).unwrap();
//! let mut cur = g.first_out(v);
//! while let Some(e) = cur {
//!     cur = g.next_out(e);
//!     g.remove_edge(e).unwrap();
//! }
//! assert_eq!(g.edge_count(), 0);
//! ```

use super::{EdgeId, Graph, VertexId, Way};

impl Graph {
    /// First vertex in insertion order, if any.
    #[must_use]
    pub fn first_vertex(&self) -> Option<VertexId> {
        self.vertex_list.first()
    }

    /// Vertex after `v` in the vertex list, or `None` at the tail or if `v`
    /// is stale.
    #[must_use]
    pub fn next_vertex(&self, v: VertexId) -> Option<VertexId> {
        self.vertices.get(v).and_then(|rec| rec.vertex_links.next)
    }

    /// First outgoing edge of `v`, or `None` if `v` has none or is stale.
    #[must_use]
    pub fn first_out(&self, v: VertexId) -> Option<EdgeId> {
        self.vertices.get(v).and_then(|rec| rec.out_head.first())
    }

    /// Edge after `e` in its source's outgoing list.
    #[must_use]
    pub fn next_out(&self, e: EdgeId) -> Option<EdgeId> {
        self.edges.get(e).and_then(|rec| rec.out_links.next)
    }

    /// First incoming edge of `v`, or `None` if `v` has none or is stale.
    #[must_use]
    pub fn first_in(&self, v: VertexId) -> Option<EdgeId> {
        self.vertices.get(v).and_then(|rec| rec.in_head.first())
    }

    /// Edge after `e` in its target's incoming list.
    #[must_use]
    pub fn next_in(&self, e: EdgeId) -> Option<EdgeId> {
        self.edges.get(e).and_then(|rec| rec.in_links.next)
    }

    /// First edge of `v` in the given direction.
    #[must_use]
    pub fn first_edge(&self, v: VertexId, way: Way) -> Option<EdgeId> {
        match way {
            Way::Out => self.first_out(v),
            Way::In => self.first_in(v),
        }
    }

    /// Edge after `e` in the adjacency list for the given direction.
    #[must_use]
    pub fn next_edge(&self, e: EdgeId, way: Way) -> Option<EdgeId> {
        match way {
            Way::Out => self.next_out(e),
            Way::In => self.next_in(e),
        }
    }

    /// Endpoint of `e` on the far side for the given direction: the target
    /// when following `Way::Out`, the source for `Way::In`.
    #[must_use]
    pub fn far_vertex(&self, e: EdgeId, way: Way) -> Option<VertexId> {
        self.edges.get(e).map(|rec| match way {
            Way::Out => rec.to,
            Way::In => rec.from,
        })
    }

    /// Iterates all vertices in insertion order.
    #[must_use]
    pub fn vertices(&self) -> VertexIter<'_> {
        VertexIter {
            graph: self,
            cur: self.vertex_list.first(),
        }
    }

    /// Iterates `v`'s outgoing edges in insertion order.
    #[must_use]
    pub fn out_edges(&self, v: VertexId) -> EdgeIter<'_> {
        EdgeIter {
            graph: self,
            cur: self.first_out(v),
            way: Way::Out,
        }
    }

    /// Iterates `v`'s incoming edges in insertion order.
    #[must_use]
    pub fn in_edges(&self, v: VertexId) -> EdgeIter<'_> {
        EdgeIter {
            graph: self,
            cur: self.first_in(v),
            way: Way::In,
        }
    }

    /// Iterates `v`'s edges in the given direction.
    #[must_use]
    pub fn edges(&self, v: VertexId, way: Way) -> EdgeIter<'_> {
        match way {
            Way::Out => self.out_edges(v),
            Way::In => self.in_edges(v),
        }
    }
}

/// Iterator over the vertex list in insertion order.
pub struct VertexIter<'a> {
    graph: &'a Graph,
    cur: Option<VertexId>,
}

impl Iterator for VertexIter<'_> {
    type Item = VertexId;

    fn next(&mut self) -> Option<VertexId> {
        let v = self.cur?;
        self.cur = self.graph.next_vertex(v);
        Some(v)
    }
}

/// Iterator over one vertex's adjacency list in insertion order.
pub struct EdgeIter<'a> {
    graph: &'a Graph,
    cur: Option<EdgeId>,
    way: Way,
}

impl Iterator for EdgeIter<'_> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<EdgeId> {
        let e = self.cur?;
        self.cur = self.graph.next_edge(e, self.way);
        Some(e)
    }
}
