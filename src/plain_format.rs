//! Human-readable graph lists.
//!
//! Any number of blocks, each made of a name line, an `N M` line with the
//! vertex and edge counts, and `M` lines with the endpoints `u v` of one edge
//! each (`0 <= u, v < N`, `u != v`).  Repeated edges are parallel edges.
//! Blank lines are ignored everywhere.

use std::io::Write;

use crate::config::GonalityConfig;
use crate::error::ParseError;
use crate::graph::Graph;
use crate::Vertex;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedGraph {
    pub name: String,
    pub graph: Graph,
}

fn error(line: usize, message: impl Into<String>) -> ParseError {
    ParseError::Plain {
        line,
        message: message.into(),
    }
}

fn parse_pair(line: usize, text: &str) -> Result<(usize, usize), ParseError> {
    let mut fields = text.split_whitespace().map(str::parse::<usize>);
    match (fields.next(), fields.next(), fields.next()) {
        (Some(Ok(first)), Some(Ok(second)), None) => Ok((first, second)),
        _ => Err(error(
            line,
            format!("expected two non-negative integers, got {:?}", text),
        )),
    }
}

/// Reads every graph in `input`.  Line numbers in errors start at 1.
pub fn read_graphs(input: &str, config: &GonalityConfig) -> Result<Vec<NamedGraph>, ParseError> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(index, text)| (index + 1, text.trim_end()))
        .filter(|(_, text)| !text.trim_start().is_empty());
    let mut last_line = 0;
    let mut next_line = |what: &str| {
        let (line, text) = lines
            .next()
            .ok_or_else(|| error(last_line + 1, format!("unexpected end of input, expected {}", what)))?;
        last_line = line;
        Ok::<_, ParseError>((line, text))
    };

    let max_vertices = config.max_vertices.min(usize::from(Vertex::MAX));
    let mut graphs = Vec::new();
    loop {
        let name = match next_line("a graph name") {
            Ok((_, name)) => name.to_owned(),
            Err(_) => break,
        };

        let (line, text) = next_line("the vertex and edge counts")?;
        let (vertex_count, edge_count) = parse_pair(line, text)?;
        if vertex_count == 0 || vertex_count > max_vertices {
            return Err(error(
                line,
                format!("{} vertices, expected 1..={}", vertex_count, max_vertices),
            ));
        }
        if edge_count > config.max_edges {
            return Err(error(
                line,
                format!("{} edges, expected at most {}", edge_count, config.max_edges),
            ));
        }

        let mut graph = Graph::new(Vertex::try_from(vertex_count).unwrap());
        for _ in 0..edge_count {
            let (line, text) = next_line("an edge")?;
            let (u, v) = parse_pair(line, text)?;
            if u >= vertex_count || v >= vertex_count {
                return Err(error(
                    line,
                    format!("edge {} {} leaves the vertex range 0..{}", u, v, vertex_count),
                ));
            }
            if u == v {
                return Err(error(line, format!("loop at vertex {}", u)));
            }
            graph.add_edge(Vertex::try_from(u).unwrap(), Vertex::try_from(v).unwrap());
        }
        tracing::trace!(%name, vertex_count, edge_count, "read graph");
        graphs.push(NamedGraph { name, graph });
    }
    Ok(graphs)
}

/// Writes one block.  Edges are listed as `u v` with `u < v`, in vertex
/// order.
pub fn write_graph<W: Write>(output: &mut W, named: &NamedGraph) -> std::io::Result<()> {
    writeln!(output, "{}", named.name)?;
    writeln!(
        output,
        "{} {}",
        named.graph.get_vertex_count(),
        named.graph.get_edge_count()
    )?;
    for (u, v) in named.graph.iter_edges() {
        writeln!(output, "{} {}", u, v)?;
    }
    Ok(())
}
