//! Diagnostic renderings: the free-form text dump and the graphviz dot
//! export.
//!
//! Both are pure read-only consumers. Output order follows the vertex list
//! and each adjacency list, so two dumps of an unchanged graph are
//! byte-identical. Edges with weight 0 are present in the graph but
//! suppressed from both renderings.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{EdgeId, Graph, VertexId};
use crate::error::{GraphError, Result};

/// Rank-group names that are dot rank keywords of their own; every other
/// group renders as `rank=same`.
const RANK_KEYWORDS: [&str; 4] = ["sink", "source", "min", "max"];

fn escape_dot(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

impl Graph {
    /// Writes the human-readable dump: one line per vertex (name, color when
    /// nonzero), then its incident edges, incoming before outgoing. Edges
    /// with weight 0 are omitted.
    ///
    /// # Errors
    /// [`GraphError::Write`] if the stream rejects a write.
    pub fn dump<W: Write>(&self, w: &mut W) -> Result<()> {
        writeln!(w, " Graph:")?;
        for v in self.vertices() {
            let rec = self.vertex(v)?;
            write!(w, "\tNode: {}", rec.name)?;
            if rec.color != 0 {
                write!(w, "  color={}", rec.color)?;
            }
            writeln!(w)?;
            self.dump_edges(w, v)?;
        }
        Ok(())
    }

    /// Writes `v`'s edge lines alone, incoming then outgoing — the
    /// per-vertex slice of [`Graph::dump`] for targeted debugging.
    ///
    /// # Errors
    /// [`GraphError::Write`] if the stream rejects a write.
    pub fn dump_edges<W: Write>(&self, w: &mut W, v: VertexId) -> Result<()> {
        for e in self.in_edges(v) {
            self.dump_edge(w, e, false)?;
        }
        for e in self.out_edges(v) {
            self.dump_edge(w, e, true)?;
        }
        Ok(())
    }

    fn dump_edge<W: Write>(&self, w: &mut W, e: EdgeId, outgoing: bool) -> Result<()> {
        let rec = self.edge(e)?;
        if rec.weight == 0 {
            return Ok(());
        }
        let (arrow, far) = if outgoing {
            ("->", rec.to)
        } else {
            ("<-", rec.from)
        };
        let far_name = self.name(far).unwrap_or("?");
        write!(w, "\t\t{arrow} {far_name}")?;
        if rec.cutable {
            write!(w, "  [CUTABLE]")?;
        }
        writeln!(w)?;
        Ok(())
    }

    /// Writes a graphviz document: header with the layout direction,
    /// vertices grouped into named clusters (explicit rank-group, or color
    /// when `color_as_subgraph`), one node statement per vertex with a
    /// stable numeric id, one arrow statement per edge (weight 0
    /// suppressed), and trailing rank constraints.
    ///
    /// Numeric ids are assigned in subgraph-then-insertion order and kept in
    /// a side map for this rendering only — never stored on the vertex,
    /// which may carry live pass state.
    ///
    /// # Errors
    /// [`GraphError::Write`] if the stream rejects a write.
    pub fn write_dot<W: Write>(&self, w: &mut W, label: &str, color_as_subgraph: bool) -> Result<()> {
        writeln!(w, "digraph netgraph {{")?;
        writeln!(w, "\tgraph\t[label=\"{}\",", escape_dot(label))?;
        writeln!(w, "\t\t labelloc=t, labeljust=l,")?;
        writeln!(w, "\t\t rankdir={}];", self.rank_dir.dot_name())?;

        // Cluster membership and explicit rank groups, members in
        // vertex-list insertion order, groups in name order.
        let mut subgraphs: BTreeMap<String, Vec<VertexId>> = BTreeMap::new();
        let mut rank_sets: BTreeMap<String, Vec<VertexId>> = BTreeMap::new();
        for v in self.vertices() {
            let rec = self.vertex(v)?;
            let cluster = if color_as_subgraph && rec.color != 0 {
                rec.color.to_string()
            } else {
                String::new()
            };
            subgraphs.entry(cluster).or_default().push(v);
            if let Some(group) = &rec.rank_group {
                rank_sets.entry(group.clone()).or_default().push(v);
            }
        }

        let mut numbers: HashMap<VertexId, usize> = HashMap::new();
        let mut n = 0usize;
        for (cluster, members) in &subgraphs {
            if !cluster.is_empty() {
                writeln!(w, "\tsubgraph cluster_{cluster} {{")?;
                writeln!(w, "\tlabel=\"{}\"", escape_dot(cluster))?;
            }
            for &v in members {
                numbers.insert(v, n);
                let rec = self.vertex(v)?;
                let mut label = if rec.name.is_empty() {
                    "\\N".to_string()
                } else {
                    escape_dot(&rec.name)
                };
                if rec.rank != 0 {
                    let _ = write!(label, " r{}", rec.rank);
                }
                if rec.fanout != 0.0 {
                    let _ = write!(label, " f{}", rec.fanout);
                }
                if rec.color != 0 {
                    let _ = write!(label, "\\n c{}", rec.color);
                }
                if !cluster.is_empty() {
                    write!(w, "\t")?;
                }
                writeln!(w, "\tn{n}\t[fontsize=8 label=\"{label}\"];")?;
                n += 1;
            }
            if !cluster.is_empty() {
                writeln!(w, "\t}};")?;
            }
        }

        for v in self.vertices() {
            for e in self.out_edges(v) {
                let rec = self.edge(e)?;
                if rec.weight == 0 {
                    continue;
                }
                let (Some(&from_n), Some(&to_n)) = (numbers.get(&rec.from), numbers.get(&rec.to))
                else {
                    continue;
                };
                let label = rec.label.as_deref().map(escape_dot).unwrap_or_default();
                write!(
                    w,
                    "\tn{from_n} -> n{to_n} [fontsize=8 label=\"{label}\" weight={}",
                    rec.weight
                )?;
                if rec.cutable {
                    write!(w, " style=dashed")?;
                }
                writeln!(w, "];")?;
            }
        }

        for (group, members) in &rank_sets {
            let keyword = if RANK_KEYWORDS.contains(&group.as_str()) {
                group.as_str()
            } else {
                "same"
            };
            write!(w, "\t{{ rank={keyword}; ")?;
            for (i, &v) in members.iter().enumerate() {
                if i != 0 {
                    write!(w, ", ")?;
                }
                write!(w, "n{}", numbers[&v])?;
            }
            writeln!(w, " }}")?;
        }

        writeln!(w, "}}")?;
        Ok(())
    }

    /// Renders the dot document into `path`, labeled with the path itself.
    ///
    /// # Errors
    /// [`GraphError::CreateFile`] if the file cannot be created,
    /// [`GraphError::Write`] on write failure.
    pub fn dump_dot_file(&self, path: impl AsRef<Path>, color_as_subgraph: bool) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| GraphError::CreateFile {
            path: path.to_path_buf(),
            source,
        })?;
        let mut w = BufWriter::new(file);
        self.write_dot(&mut w, &path.display().to_string(), color_as_subgraph)?;
        w.flush()?;
        tracing::info!(path = %path.display(), "wrote graph dot dump");
        Ok(())
    }

    /// Renders the dot document into `<prefix><name>.dot` — the debug-dump
    /// naming used when the driver supplies a per-run output prefix.
    ///
    /// # Errors
    /// Same as [`Graph::dump_dot_file`].
    pub fn dump_dot_file_prefixed(
        &self,
        prefix: &str,
        name: &str,
        color_as_subgraph: bool,
    ) -> Result<()> {
        self.dump_dot_file(format!("{prefix}{name}.dot"), color_as_subgraph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_dump(g: &Graph) -> String {
        let mut buf = Vec::new();
        g.dump(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn render_dot(g: &Graph, color_as_subgraph: bool) -> String {
        let mut buf = Vec::new();
        g.write_dot(&mut buf, "test", color_as_subgraph).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_dump_lists_edges_both_sides() {
        let mut g = Graph::new();
        let a = g.add_vertex("a");
        let b = g.add_vertex("b");
        g.add_edge(a, b, 1, true).unwrap();
        g.set_color(b, 3).unwrap();

        let text = render_dump(&g);
        assert!(text.starts_with(" Graph:\n"));
        assert!(text.contains("\tNode: a\n"));
        assert!(text.contains("\tNode: b  color=3\n"));
        assert!(text.contains("\t\t-> b  [CUTABLE]\n"));
        assert!(text.contains("\t\t<- a  [CUTABLE]\n"));
    }

    #[test]
    fn test_dump_suppresses_weight_zero() {
        let mut g = Graph::new();
        let a = g.add_vertex("a");
        let b = g.add_vertex("b");
        let e = g.add_edge(a, b, 0, false).unwrap();

        let text = render_dump(&g);
        assert!(!text.contains("->"));
        assert!(!text.contains("<-"));

        g.set_weight(e, 1).unwrap();
        let text = render_dump(&g);
        assert!(text.contains("\t\t-> b\n"));
        assert!(text.contains("\t\t<- a\n"));
    }

    #[test]
    fn test_dot_structure() {
        let mut g = Graph::new();
        let a = g.add_vertex("a");
        let b = g.add_vertex("b");
        g.add_edge(a, b, 2, false).unwrap();
        g.add_edge(b, a, 0, false).unwrap();

        let dot = render_dot(&g, false);
        assert!(dot.starts_with("digraph netgraph {\n"));
        assert!(dot.contains("rankdir=TB"));
        assert!(dot.contains("\tn0\t[fontsize=8 label=\"a\"];"));
        assert!(dot.contains("\tn1\t[fontsize=8 label=\"b\"];"));
        assert!(dot.contains("\tn0 -> n1 [fontsize=8 label=\"\" weight=2];"));
        // Weight-0 edge suppressed.
        assert!(!dot.contains("n1 -> n0"));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn test_dot_color_clusters() {
        let mut g = Graph::new();
        let a = g.add_vertex("a");
        let b = g.add_vertex("b");
        let c = g.add_vertex("c");
        g.set_color(b, 1).unwrap();
        g.set_color(c, 1).unwrap();

        let dot = render_dot(&g, true);
        assert!(dot.contains("subgraph cluster_1 {"));
        // Uncolored vertex a stays outside any cluster and is numbered
        // first (the unclustered group sorts ahead).
        assert!(dot.contains("\tn0\t[fontsize=8 label=\"a\"];"));
        assert!(dot.contains("label=\"b\\n c1\""));

        let dot = render_dot(&g, false);
        assert!(!dot.contains("subgraph"));
    }

    #[test]
    fn test_dot_rank_constraints() {
        let mut g = Graph::new();
        let a = g.add_vertex("a");
        let b = g.add_vertex("b");
        let c = g.add_vertex("c");
        g.set_rank_group(a, Some("sink".to_string())).unwrap();
        g.set_rank_group(b, Some("stage2".to_string())).unwrap();
        g.set_rank_group(c, Some("stage2".to_string())).unwrap();

        let dot = render_dot(&g, false);
        assert!(dot.contains("{ rank=sink; n0 }"));
        assert!(dot.contains("{ rank=same; n1, n2 }"));
    }

    #[test]
    fn test_dot_escapes_names() {
        let mut g = Graph::new();
        g.add_vertex("odd \"name\"");
        let dot = render_dot(&g, false);
        assert!(dot.contains("label=\"odd \\\"name\\\"\""));
    }

    #[test]
    fn test_cutable_edge_dashed() {
        let mut g = Graph::new();
        let a = g.add_vertex("a");
        let b = g.add_vertex("b");
        let e = g.add_edge(a, b, 1, true).unwrap();
        g.set_label(e, Some("dep".to_string())).unwrap();

        let dot = render_dot(&g, false);
        assert!(dot.contains("label=\"dep\" weight=1 style=dashed];"));
    }
}
