//! Vertex and edge attribute accessors, plus the loop-report hooks.
//!
//! Getters answer `None` for stale handles; setters refuse them with
//! [`GraphError`] so a pass writing through a dead handle is caught instead
//! of silently dropped.

use core::fmt::Write as _;

use super::{EdgeId, Graph, VertexId};
use crate::error::{GraphError, Result};
use crate::scratch::Scratch;

impl Graph {
    /// Vertex name, as shown in dumps.
    #[must_use]
    pub fn name(&self, v: VertexId) -> Option<&str> {
        self.vertices.get(v).map(|rec| rec.name.as_str())
    }

    /// Renames `v`.
    ///
    /// # Errors
    /// [`GraphError::StaleVertex`] if `v` is not live.
    pub fn set_name(&mut self, v: VertexId, name: impl Into<String>) -> Result<()> {
        self.vertex_mut(v)?.name = name.into();
        Ok(())
    }

    /// Algorithm-assigned ordering weight, default 0.
    #[must_use]
    pub fn rank(&self, v: VertexId) -> Option<u32> {
        self.vertices.get(v).map(|rec| rec.rank)
    }

    /// Sets the rank attribute.
    ///
    /// # Errors
    /// [`GraphError::StaleVertex`] if `v` is not live.
    pub fn set_rank(&mut self, v: VertexId, rank: u32) -> Result<()> {
        self.vertex_mut(v)?.rank = rank;
        Ok(())
    }

    /// Load metric, default 0.0.
    #[must_use]
    pub fn fanout(&self, v: VertexId) -> Option<f64> {
        self.vertices.get(v).map(|rec| rec.fanout)
    }

    /// Sets the fanout attribute.
    ///
    /// # Errors
    /// [`GraphError::StaleVertex`] if `v` is not live.
    pub fn set_fanout(&mut self, v: VertexId, fanout: f64) -> Result<()> {
        self.vertex_mut(v)?.fanout = fanout;
        Ok(())
    }

    /// Algorithm-assigned partition/phase tag, default 0.
    #[must_use]
    pub fn color(&self, v: VertexId) -> Option<u32> {
        self.vertices.get(v).map(|rec| rec.color)
    }

    /// Sets the color attribute.
    ///
    /// # Errors
    /// [`GraphError::StaleVertex`] if `v` is not live.
    pub fn set_color(&mut self, v: VertexId, color: u32) -> Result<()> {
        self.vertex_mut(v)?.color = color;
        Ok(())
    }

    /// Explicit rank-group string for the dot export, if any.
    ///
    /// Vertices sharing a group are emitted into one trailing rank
    /// constraint; the names `sink`, `source`, `min`, and `max` map to that
    /// exact dot rank keyword, anything else to `rank=same`.
    #[must_use]
    pub fn rank_group(&self, v: VertexId) -> Option<&str> {
        self.vertices
            .get(v)
            .and_then(|rec| rec.rank_group.as_deref())
    }

    /// Sets or clears the rank-group string.
    ///
    /// # Errors
    /// [`GraphError::StaleVertex`] if `v` is not live.
    pub fn set_rank_group(&mut self, v: VertexId, group: Option<String>) -> Result<()> {
        self.vertex_mut(v)?.rank_group = group;
        Ok(())
    }

    /// Per-pass scratch slot of `v`.
    #[must_use]
    pub fn user(&self, v: VertexId) -> Option<Scratch> {
        self.vertices.get(v).map(|rec| rec.user)
    }

    /// Writes `v`'s scratch slot.
    ///
    /// # Errors
    /// [`GraphError::StaleVertex`] if `v` is not live.
    pub fn set_user(&mut self, v: VertexId, user: Scratch) -> Result<()> {
        self.vertex_mut(v)?.user = user;
        Ok(())
    }

    /// Source and target of `e`.
    #[must_use]
    pub fn edge_endpoints(&self, e: EdgeId) -> Option<(VertexId, VertexId)> {
        self.edges.get(e).map(|rec| (rec.from, rec.to))
    }

    /// Source vertex of `e`.
    #[must_use]
    pub fn edge_from(&self, e: EdgeId) -> Option<VertexId> {
        self.edges.get(e).map(|rec| rec.from)
    }

    /// Target vertex of `e`.
    #[must_use]
    pub fn edge_to(&self, e: EdgeId) -> Option<VertexId> {
        self.edges.get(e).map(|rec| rec.to)
    }

    /// Edge weight. Weight 0 = present but suppressed from dumps.
    #[must_use]
    pub fn weight(&self, e: EdgeId) -> Option<u32> {
        self.edges.get(e).map(|rec| rec.weight)
    }

    /// Sets the edge weight.
    ///
    /// # Errors
    /// [`GraphError::StaleEdge`] if `e` is not live.
    pub fn set_weight(&mut self, e: EdgeId, weight: u32) -> Result<()> {
        self.edge_mut(e)?.weight = weight;
        Ok(())
    }

    /// Whether a cycle-breaking pass may legally remove this edge.
    #[must_use]
    pub fn cutable(&self, e: EdgeId) -> Option<bool> {
        self.edges.get(e).map(|rec| rec.cutable)
    }

    /// Sets the cutable flag.
    ///
    /// # Errors
    /// [`GraphError::StaleEdge`] if `e` is not live.
    pub fn set_cutable(&mut self, e: EdgeId, cutable: bool) -> Result<()> {
        self.edge_mut(e)?.cutable = cutable;
        Ok(())
    }

    /// Edge label rendered in the dot export, if any.
    #[must_use]
    pub fn label(&self, e: EdgeId) -> Option<&str> {
        self.edges.get(e).and_then(|rec| rec.label.as_deref())
    }

    /// Sets or clears the edge label.
    ///
    /// # Errors
    /// [`GraphError::StaleEdge`] if `e` is not live.
    pub fn set_label(&mut self, e: EdgeId, label: Option<String>) -> Result<()> {
        self.edge_mut(e)?.label = label;
        Ok(())
    }

    /// Per-pass scratch slot of `e`.
    #[must_use]
    pub fn edge_user(&self, e: EdgeId) -> Option<Scratch> {
        self.edges.get(e).map(|rec| rec.user)
    }

    /// Writes `e`'s scratch slot.
    ///
    /// # Errors
    /// [`GraphError::StaleEdge`] if `e` is not live.
    pub fn set_edge_user(&mut self, e: EdgeId, user: Scratch) -> Result<()> {
        self.edge_mut(e)?.user = user;
        Ok(())
    }

    /// Renders `v` for diagnostics: name followed by nonzero rank, fanout,
    /// and color (`adder r3 f2 c1`).
    #[must_use]
    pub fn vertex_display(&self, v: VertexId) -> String {
        match self.vertices.get(v) {
            Some(rec) => {
                let mut out = rec.name.clone();
                if rec.rank != 0 {
                    let _ = write!(out, " r{}", rec.rank);
                }
                if rec.fanout != 0.0 {
                    let _ = write!(out, " f{}", rec.fanout);
                }
                if rec.color != 0 {
                    let _ = write!(out, " c{}", rec.color);
                }
                out
            }
            None => format!("{v:?} (freed)"),
        }
    }

    /// Builds the fatal error for a vertex a pass found entangled in a cycle
    /// it cannot resolve. The caller propagates it; reporting and abort
    /// policy belong to the compiler driver.
    #[must_use]
    pub fn loop_error(&self, v: VertexId) -> GraphError {
        GraphError::UnresolvableLoop {
            vertex: self.vertex_display(v),
        }
    }

    /// Diagnostic-only cycle-vertex logging, gated on the subscriber's
    /// verbosity. Non-fatal counterpart of [`Graph::loop_error`].
    pub fn trace_loop(&self, v: VertexId) {
        tracing::debug!(vertex = %self.vertex_display(v), "vertex is part of an unresolved loop");
    }
}
