//! The [graph6](https://users.cecs.anu.edu.au/~bdm/data/formats.txt) format:
//! a vertex count followed by the strictly upper triangle of the adjacency
//! matrix, six bits per printable byte.  Only simple graphs are representable.

use crate::config::GonalityConfig;
use crate::error::{GraphError, ParseError};
use crate::graph::Graph;
use crate::upper_triangle::{strictly_upper_triangular_matrix_capacity, ColumnMajorIterator};
use crate::Vertex;

const BIAS: u8 = 63;
const LAST_PRINTABLE: u8 = 126;
const HEADER: &str = ">>graph6<<";

/// Largest vertex count fitting in the 1 byte and 4 byte size encodings.
const SHORT_SIZE_MAX: u64 = 62;
const MEDIUM_SIZE_MAX: u64 = 258_047;

struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn peek(&self) -> Result<u8, ParseError> {
        self.bytes
            .get(self.offset)
            .copied()
            .ok_or(ParseError::Truncated {
                expected: self.offset + 1,
            })
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8], ParseError> {
        let end = self.offset + count;
        if end > self.bytes.len() {
            return Err(ParseError::Truncated { expected: end });
        }
        let taken = &self.bytes[self.offset..end];
        self.offset = end;
        Ok(taken)
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }
}

/// Big-endian concatenation of the six-bit groups.
fn sextets_to_number(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(0, |number, byte| (number << 6) | u64::from(byte - BIAS))
}

fn read_vertex_count(reader: &mut Reader) -> Result<u64, ParseError> {
    let first = reader.take(1)?[0];
    if first < LAST_PRINTABLE {
        return Ok(u64::from(first - BIAS));
    }
    if reader.peek()? < LAST_PRINTABLE {
        return Ok(sextets_to_number(reader.take(3)?));
    }
    reader.take(1)?;
    Ok(sextets_to_number(reader.take(6)?))
}

/// Decodes a single graph6 line.  A trailing line break and the optional
/// `>>graph6<<` header are accepted.
pub fn decode(line: &str, config: &GonalityConfig) -> Result<Graph, ParseError> {
    let line = line.trim_end_matches(|c| c == '\n' || c == '\r');
    let line = line.strip_prefix(HEADER).unwrap_or(line);
    let bytes = line.as_bytes();
    if let Some((offset, byte)) = bytes
        .iter()
        .enumerate()
        .find(|(_, byte)| !(BIAS..=LAST_PRINTABLE).contains(*byte))
    {
        return Err(ParseError::InvalidByte {
            offset,
            byte: *byte,
        });
    }

    let mut reader = Reader { bytes, offset: 0 };
    let vertex_count = read_vertex_count(&mut reader)?;
    let max = config.max_vertices.min(usize::from(Vertex::MAX));
    let vertex_count = match usize::try_from(vertex_count) {
        Ok(vertex_count) if vertex_count <= max => Vertex::try_from(vertex_count).unwrap(),
        _ => {
            return Err(GraphError::TooManyVertices {
                vertex_count: usize::try_from(vertex_count).unwrap_or(usize::MAX),
                max,
            }
            .into())
        }
    };

    let cells = strictly_upper_triangular_matrix_capacity(vertex_count) as usize;
    let body = reader.take((cells + 5) / 6)?;
    if reader.remaining() > 0 {
        return Err(ParseError::TrailingBytes(reader.remaining()));
    }

    let bits = body
        .iter()
        .flat_map(|byte| (0..6).rev().map(move |shift| ((byte - BIAS) >> shift) & 1 == 1));
    let mut graph = Graph::new(vertex_count);
    for ((u, v), present) in ColumnMajorIterator::new(vertex_count).zip(bits) {
        if present {
            graph.add_edge(u, v);
        }
    }
    Ok(graph)
}

fn number_to_sextets(number: u64, sextets: u32, output: &mut String) {
    for i in (0..sextets).rev() {
        let sextet = ((number >> (6 * i)) & 0x3f) as u8;
        output.push(char::from(sextet + BIAS));
    }
}

/// Encodes `graph` as one graph6 line, without a trailing line break.
pub fn encode(graph: &Graph) -> Result<String, GraphError> {
    if let Some((u, v)) = graph.find_parallel_edge() {
        return Err(GraphError::ParallelEdges { u, v });
    }

    let vertex_count = graph.get_vertex_count();
    let mut output = String::new();
    let size = u64::from(vertex_count);
    if size <= SHORT_SIZE_MAX {
        number_to_sextets(size, 1, &mut output);
    } else if size <= MEDIUM_SIZE_MAX {
        output.push(char::from(LAST_PRINTABLE));
        number_to_sextets(size, 3, &mut output);
    } else {
        output.push(char::from(LAST_PRINTABLE));
        output.push(char::from(LAST_PRINTABLE));
        number_to_sextets(size, 6, &mut output);
    }

    let mut sextet = 0u8;
    let mut filled = 0;
    for (u, v) in ColumnMajorIterator::new(vertex_count) {
        sextet = (sextet << 1) | u8::from(graph.is_adjacent(u, v));
        filled += 1;
        if filled == 6 {
            output.push(char::from(sextet + BIAS));
            sextet = 0;
            filled = 0;
        }
    }
    if filled > 0 {
        output.push(char::from((sextet << (6 - filled)) + BIAS));
    }
    Ok(output)
}
