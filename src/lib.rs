//! # `netgraph` — mutable dependency-graph substrate for HDL compilation
//!
//! A generic, mutable, directed, weighted, attributed multigraph used to
//! represent dependency, scheduling, and data-flow relationships among
//! compiler-internal objects. Downstream passes (cycle breaking, SCC
//! collapsing, topological ranking, critical-path coloring) are built on the
//! traversal and mutation primitives exposed here; the graph itself never
//! runs an algorithm.
//!
//! ## Design
//!
//! - **Generational arenas** ([`arena::Arena`]): vertex and edge records are
//!   addressed by `u32` index + generation handles ([`VertexId`],
//!   [`EdgeId`]). Freed slots are reused, and every outstanding handle to a
//!   freed record goes stale rather than dangling.
//! - **Intrusive index-linked lists**: the global vertex list and each
//!   vertex's outgoing/incoming adjacency lists thread prev/next cells
//!   embedded in the records, giving O(1) insert, unlink, and relink with no
//!   per-list allocation. All three lists preserve insertion order, which
//!   deterministic dumps and tie-breaking passes rely on.
//! - **Deletion during iteration** is the canonical pattern, not an error:
//!   capture the next id before unlinking the current record
//!   (`first_*`/`next_*` accessors), or use the successor id returned by
//!   `relink_from`/`relink_to`.
//! - **Per-pass scratch slots** ([`Scratch`]): a tagged value each pass
//!   repurposes, reset only explicitly via `user_clear_*`.
//! - **Fatal conditions as errors** ([`GraphError`]): stale handles,
//!   unresolvable loops, and dump I/O failures propagate to the driver that
//!   owns the abort policy; nothing is swallowed and nothing aborts from
//!   inside the crate.
//!
//! Single-threaded by design: one pass owns the graph at a time and mutates
//! it through `&mut Graph`.
//!
//! ## Example
//!
//! ```rust
//! use netgraph::{Graph, Way};
//!
//! let mut g = Graph::new();
//! let fetch = g.add_vertex("fetch");
//! let decode = g.add_vertex("decode");
//! let execute = g.add_vertex("execute");
//! g.add_edge(fetch, decode, 1, false)?;
//! g.add_edge(decode, execute, 2, true)?;
//!
//! // Bypass `decode`: compose its in/out edge pairs.
//! g.reroute_edges(decode)?;
//! let direct = g.find_connecting_edge(fetch, Way::Out, execute).unwrap();
//! assert_eq!(g.weight(direct), Some(1));
//! assert_eq!(g.cutable(direct), Some(false));
//! # Ok::<(), netgraph::GraphError>(())
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod arena;
pub mod error;
pub mod graph;
pub(crate) mod list;
pub mod scratch;

pub use arena::{Arena, ArenaId};
pub use error::{GraphError, Result};
pub use graph::{EdgeId, EdgeIter, Graph, RankDir, VertexId, VertexIter, Way};
pub use scratch::Scratch;

// Handles must stay word-sized; passes store them in bulk side tables.
const _: () = {
    use core::mem;
    assert!(mem::size_of::<VertexId>() == 8);
    assert!(mem::size_of::<EdgeId>() == 8);
    assert!(mem::size_of::<Option<VertexId>>() <= 12);
};
