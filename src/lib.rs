//! Divisorial gonality of finite undirected graphs in the chip-firing model.
//!
//! The entry points are [`Graph`] for building (or [`graph6::decode`] /
//! [`plain_format::read_graphs`] for reading) a graph, [`ChipFiringEngine`] for
//! the per-divisor primitives and [`GonalitySearch`] /
//! [`find_gonality_with`] for the exhaustive search.

pub mod burning;
pub mod config;
pub mod conjecture;
pub mod divisor;
pub mod engine;
pub mod error;
pub mod gonality;
pub mod graph;
pub mod graph6;
pub mod independent_set;
pub mod plain_format;
pub mod rank;
pub mod subdivision;
pub mod upper_triangle;

/// Vertices are numbered `0..n`.
pub type Vertex = u16;

pub use config::GonalityConfig;
pub use divisor::Divisor;
pub use engine::{burn, has_positive_rank, is_reduced, reduce, ChipFiringEngine};
pub use error::{GraphError, ParseError};
pub use gonality::{
    find_all_minimum_degree_divisors, find_all_positive_rank_v0_reduced_divisors, find_gonality,
    find_gonality_with, find_positive_rank_divisor, Gonality, GonalitySearch,
};
pub use graph::{arb_connected_graph, Graph};
pub use independent_set::approximate_maximum_independent_set;
