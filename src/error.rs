//! Recoverable errors.  These only come from reading graphs and checking them
//! before they're handed to the engine; misuse of the engine itself panics.
use thiserror::Error;

use crate::Vertex;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("graph has no vertices")]
    Empty,

    #[error("graph has {vertex_count} vertices but at most {max} are supported")]
    TooManyVertices { vertex_count: usize, max: usize },

    #[error("graph has {edge_count} edges but at most {max} are supported")]
    TooManyEdges { edge_count: usize, max: usize },

    #[error("graph is not connected")]
    Disconnected,

    #[error("vertices {u} and {v} are joined by parallel edges")]
    ParallelEdges { u: Vertex, v: Vertex },

    #[error("cannot subdivide every edge into {parts} parts; expected 2..={max}")]
    InvalidSubdivision { parts: usize, max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: {message}")]
    Plain { line: usize, message: String },

    #[error("graph6: byte {byte:#04x} at offset {offset} is not in the printable range 63..=126")]
    InvalidByte { offset: usize, byte: u8 },

    #[error("graph6: input ends before {expected} bytes were read")]
    Truncated { expected: usize },

    #[error("graph6: {0} unexpected trailing bytes")]
    TrailingBytes(usize),

    #[error(transparent)]
    Graph(#[from] GraphError),
}
