//! Error type for graph invariant violations and diagnostic I/O failures.
//!
//! Every condition modeled here is fatal to the compilation unit that owns
//! the graph: stale handles mean a calling pass violated the lifecycle
//! contract, unresolvable loops end the unit after reporting, and dump I/O
//! failures are unrecoverable environment errors. The crate never aborts on
//! its own; errors propagate with `?` to the driver that owns the abort
//! policy.

use std::path::PathBuf;

use thiserror::Error;

use crate::graph::{EdgeId, VertexId};

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, GraphError>;

/// Failure conditions surfaced by graph operations.
#[derive(Error, Debug)]
pub enum GraphError {
    /// A structural operation was handed a vertex handle whose record has
    /// been freed. Indicates a bug in the calling pass, not a runtime
    /// condition.
    #[error("stale vertex handle {0:?}")]
    StaleVertex(VertexId),

    /// A structural operation was handed an edge handle whose record has
    /// been freed.
    #[error("stale edge handle {0:?}")]
    StaleEdge(EdgeId),

    /// A downstream pass determined this vertex is entangled in a cycle it
    /// cannot resolve. Built by [`Graph::loop_error`].
    ///
    /// [`Graph::loop_error`]: crate::Graph::loop_error
    #[error("loops detected in graph: {vertex}")]
    UnresolvableLoop {
        /// Rendering of the offending vertex (name plus nonzero attributes).
        vertex: String,
    },

    /// A diagnostic dump file could not be created.
    #[error("can't write {}: {source}", path.display())]
    CreateFile {
        /// Target path of the dump.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// Writing to an already-open diagnostic stream failed.
    #[error("dump write failed: {0}")]
    Write(#[from] std::io::Error),
}

impl GraphError {
    /// Whether this error must terminate the compilation unit.
    ///
    /// Currently every variant is fatal; the severity tag exists so the
    /// top-level handler can route without matching variants.
    pub fn is_fatal(&self) -> bool {
        true
    }
}
