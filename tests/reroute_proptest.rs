//! Property tests for the structural invariants: adjacency-list symmetry
//! after arbitrary edit sequences, reroute composition counts, and stale
//! handle detection under slot reuse.

use proptest::prelude::*;

use netgraph::{EdgeId, Graph, VertexId, Way};

#[derive(Debug, Clone)]
enum Op {
    AddVertex,
    AddEdge { from: usize, to: usize, weight: u32, cutable: bool },
    RemoveEdge(usize),
    RemoveVertex(usize),
    UnlinkEdges(usize),
    Reroute(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::AddVertex),
        4 => (any::<usize>(), any::<usize>(), 0u32..10, any::<bool>())
            .prop_map(|(from, to, weight, cutable)| Op::AddEdge { from, to, weight, cutable }),
        2 => any::<usize>().prop_map(Op::RemoveEdge),
        1 => any::<usize>().prop_map(Op::RemoveVertex),
        1 => any::<usize>().prop_map(Op::UnlinkEdges),
        1 => any::<usize>().prop_map(Op::Reroute),
    ]
}

fn pick<T: Copy>(items: &[T], raw: usize) -> Option<T> {
    if items.is_empty() {
        None
    } else {
        Some(items[raw % items.len()])
    }
}

/// Every out-list entry must appear in its target's in-list and vice versa,
/// and the arena counts must agree with what the lists reach.
fn check_symmetry(g: &Graph) {
    let mut seen_vertices = 0usize;
    let mut seen_edges = 0usize;
    for v in g.vertices() {
        seen_vertices += 1;
        for e in g.out_edges(v) {
            seen_edges += 1;
            let (from, to) = g.edge_endpoints(e).unwrap();
            assert_eq!(from, v);
            assert!(g.in_edges(to).any(|x| x == e));
        }
        for e in g.in_edges(v) {
            let (_, to) = g.edge_endpoints(e).unwrap();
            assert_eq!(to, v);
            assert!(g.out_edges(g.edge_from(e).unwrap()).any(|x| x == e));
        }
    }
    assert_eq!(seen_vertices, g.vertex_count());
    assert_eq!(seen_edges, g.edge_count());
}

proptest! {
    #[test]
    fn prop_edit_sequence_keeps_lists_symmetric(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let mut g = Graph::new();
        let mut live_vertices: Vec<VertexId> = Vec::new();
        let mut live_edges: Vec<EdgeId> = Vec::new();

        for op in ops {
            match op {
                Op::AddVertex => {
                    live_vertices.push(g.add_vertex(format!("v{}", live_vertices.len())));
                }
                Op::AddEdge { from, to, weight, cutable } => {
                    if let (Some(f), Some(t)) = (pick(&live_vertices, from), pick(&live_vertices, to)) {
                        live_edges.push(g.add_edge(f, t, weight, cutable).unwrap());
                    }
                }
                Op::RemoveEdge(raw) => {
                    if let Some(e) = pick(&live_edges, raw) {
                        g.remove_edge(e).unwrap();
                        live_edges.retain(|&x| x != e);
                    }
                }
                Op::RemoveVertex(raw) => {
                    if let Some(v) = pick(&live_vertices, raw) {
                        g.remove_vertex(v).unwrap();
                        live_vertices.retain(|&x| x != v);
                        live_edges.retain(|&e| g.edge_endpoints(e).is_some());
                    }
                }
                Op::UnlinkEdges(raw) => {
                    if let Some(v) = pick(&live_vertices, raw) {
                        g.unlink_edges(v).unwrap();
                        live_edges.retain(|&e| g.edge_endpoints(e).is_some());
                    }
                }
                Op::Reroute(raw) => {
                    if let Some(v) = pick(&live_vertices, raw) {
                        g.reroute_edges(v).unwrap();
                        live_edges.retain(|&e| g.edge_endpoints(e).is_some());
                        for x in g.vertices().collect::<Vec<_>>() {
                            for e in g.out_edges(x) {
                                if !live_edges.contains(&e) {
                                    live_edges.push(e);
                                }
                            }
                        }
                    }
                }
            }
            check_symmetry(&g);
        }
        prop_assert_eq!(g.vertex_count(), live_vertices.len());
        prop_assert_eq!(g.edge_count(), live_edges.len());
    }

    #[test]
    fn prop_reroute_bipartite_counts(
        n_in in 0usize..6,
        n_out in 0usize..6,
        weights in prop::collection::vec((1u32..100, 1u32..100, any::<bool>(), any::<bool>()), 36),
    ) {
        let mut g = Graph::new();
        let v = g.add_vertex("mid");
        let ins: Vec<VertexId> = (0..n_in).map(|i| g.add_vertex(format!("in{i}"))).collect();
        let outs: Vec<VertexId> = (0..n_out).map(|i| g.add_vertex(format!("out{i}"))).collect();

        let mut expect = Vec::new();
        for (i, &src) in ins.iter().enumerate() {
            let (iw, _, ic, _) = weights[i];
            g.add_edge(src, v, iw, ic).unwrap();
            for (j, &dst) in outs.iter().enumerate() {
                let (_, ow, _, oc) = weights[j];
                expect.push((src, dst, iw.min(ow), ic && oc));
            }
        }
        for (j, &dst) in outs.iter().enumerate() {
            let (_, ow, _, oc) = weights[j];
            g.add_edge(v, dst, ow, oc).unwrap();
        }

        g.reroute_edges(v).unwrap();

        prop_assert_eq!(g.edge_count(), n_in * n_out);
        prop_assert!(g.out_edges(v).next().is_none());
        prop_assert!(g.in_edges(v).next().is_none());
        for (src, dst, w, c) in expect {
            let e = g.find_connecting_edge(src, Way::Out, dst).unwrap();
            prop_assert_eq!(g.weight(e), Some(w));
            prop_assert_eq!(g.cutable(e), Some(c));
        }
    }

    #[test]
    fn prop_slot_reuse_never_revives_handles(rounds in 1usize..20) {
        let mut g = Graph::new();
        let mut dead: Vec<(VertexId, EdgeId)> = Vec::new();
        for i in 0..rounds {
            let a = g.add_vertex(format!("a{i}"));
            let b = g.add_vertex(format!("b{i}"));
            let e = g.add_edge(a, b, 1, false).unwrap();
            g.remove_vertex(a).unwrap();
            dead.push((a, e));
            // Every handle freed so far stays stale, including those whose
            // slots the adds above have since reused.
            for &(v, e) in &dead {
                prop_assert_eq!(g.name(v), None);
                prop_assert_eq!(g.edge_endpoints(e), None);
            }
        }
        prop_assert_eq!(g.vertex_count(), rounds);
    }
}
