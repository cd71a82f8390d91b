//! Structural-edit primitives: edge composition across a bypassed vertex,
//! endpoint relinking that keeps an in-progress iteration valid, and the
//! two-sided connecting-edge search.

use super::{Graph, EdgeId, InLinks, OutLinks, VertexId, Way};
use crate::error::{GraphError, Result};

impl Graph {
    /// Composes edges across `v`: for every (incoming I, outgoing O) pair a
    /// new edge I.from → O.to is created with `weight = min(I, O)` and
    /// `cutable = I && O`, then all of `v`'s original edges are deleted.
    /// `v` itself stays in the graph; removing it is the caller's decision.
    ///
    /// The cross product runs over the edge sets captured on entry, so the
    /// edges created here never feed back into it (self-loops on `v` would
    /// otherwise breed).
    ///
    /// # Errors
    /// [`GraphError::StaleVertex`] if `v` is not live.
    pub fn reroute_edges(&mut self, v: VertexId) -> Result<()> {
        self.vertex(v)?;
        let ins: Vec<(VertexId, u32, bool)> = self
            .in_edges(v)
            .filter_map(|e| {
                let rec = self.edges.get(e)?;
                Some((rec.from, rec.weight, rec.cutable))
            })
            .collect();
        let outs: Vec<(VertexId, u32, bool)> = self
            .out_edges(v)
            .filter_map(|e| {
                let rec = self.edges.get(e)?;
                Some((rec.to, rec.weight, rec.cutable))
            })
            .collect();

        for &(from, in_weight, in_cutable) in &ins {
            for &(to, out_weight, out_cutable) in &outs {
                self.add_edge(
                    from,
                    to,
                    in_weight.min(out_weight),
                    in_cutable && out_cutable,
                )?;
            }
        }
        self.unlink_edges(v)
    }

    /// Moves `e`'s source to `new_from`: unlinks `e` from the old source's
    /// outgoing list and appends it to the new one. Returns the edge that
    /// followed `e` in the old list, so an iteration over that list can
    /// continue from where `e` sat.
    ///
    /// # Errors
    /// [`GraphError::StaleEdge`] / [`GraphError::StaleVertex`] on dead
    /// handles.
    pub fn relink_from(&mut self, e: EdgeId, new_from: VertexId) -> Result<Option<EdgeId>> {
        if !self.vertices.contains(new_from) {
            return Err(GraphError::StaleVertex(new_from));
        }
        let (old_from, old_next) = {
            let rec = self.edge(e)?;
            (rec.from, rec.out_links.next)
        };
        let old_rec = self
            .vertices
            .get_mut(old_from)
            .ok_or(GraphError::StaleVertex(old_from))?;
        old_rec.out_head.unlink(&mut OutLinks(&mut self.edges), e);
        self.edge_mut(e)?.from = new_from;
        let new_rec = self
            .vertices
            .get_mut(new_from)
            .ok_or(GraphError::StaleVertex(new_from))?;
        new_rec
            .out_head
            .push_back(&mut OutLinks(&mut self.edges), e);
        Ok(old_next)
    }

    /// Moves `e`'s target to `new_to`; the incoming-list counterpart of
    /// [`Graph::relink_from`]. Returns the edge that followed `e` in the old
    /// target's incoming list.
    ///
    /// # Errors
    /// [`GraphError::StaleEdge`] / [`GraphError::StaleVertex`] on dead
    /// handles.
    pub fn relink_to(&mut self, e: EdgeId, new_to: VertexId) -> Result<Option<EdgeId>> {
        if !self.vertices.contains(new_to) {
            return Err(GraphError::StaleVertex(new_to));
        }
        let (old_to, old_next) = {
            let rec = self.edge(e)?;
            (rec.to, rec.in_links.next)
        };
        let old_rec = self
            .vertices
            .get_mut(old_to)
            .ok_or(GraphError::StaleVertex(old_to))?;
        old_rec.in_head.unlink(&mut InLinks(&mut self.edges), e);
        self.edge_mut(e)?.to = new_to;
        let new_rec = self
            .vertices
            .get_mut(new_to)
            .ok_or(GraphError::StaleVertex(new_to))?;
        new_rec.in_head.push_back(&mut InLinks(&mut self.edges), e);
        Ok(old_next)
    }

    /// Finds an edge connecting `v` to `other` in the given direction
    /// (`Way::Out`: an edge v → other), or `None`.
    ///
    /// Both endpoints' lists are scanned in lock-step, one step each per
    /// round, so the cost is bounded by the shorter list — the lists are
    /// rarely *both* huge. The first match from either side wins.
    #[must_use]
    pub fn find_connecting_edge(&self, v: VertexId, way: Way, other: VertexId) -> Option<EdgeId> {
        let inv = way.invert();
        let mut a = self.first_edge(v, way);
        let mut b = self.first_edge(other, inv);
        while let (Some(ae), Some(be)) = (a, b) {
            if self.far_vertex(ae, way) == Some(other) {
                return Some(ae);
            }
            if self.far_vertex(be, inv) == Some(v) {
                return Some(be);
            }
            a = self.next_edge(ae, way);
            b = self.next_edge(be, inv);
        }
        None
    }

    /// Returns `true` iff `v` has exactly one incoming edge. O(1): checks
    /// non-empty and that the first edge has no successor.
    #[must_use]
    pub fn in_size1(&self, v: VertexId) -> bool {
        match self.first_in(v) {
            Some(e) => self.next_in(e).is_none(),
            None => false,
        }
    }

    /// Returns `true` iff `v` has exactly one outgoing edge. O(1).
    #[must_use]
    pub fn out_size1(&self, v: VertexId) -> bool {
        match self.first_out(v) {
            Some(e) => self.next_out(e).is_none(),
            None => false,
        }
    }
}
