//! Finite undirected multigraphs as consumed by the chip-firing engine.
//!
//! Assumptions imposed on *your* code:
//!
//! 1. Vertices are integer numbers `0..n` and `n` is fixed at construction
//!    time.  [`crate::subdivision::subdivide`] builds a new graph rather than
//!    growing an existing one.
//! 1. Loops are not representable: [`Graph::add_edge`] panics on `u == v`.
//! 1. Parallel edges are fine.  The chip-firing engine counts them, only the
//!    independent set approximation and graph6 insist on simple graphs.
//!
//! Edges are kept twice: as a neighbour list per vertex (with multiplicity;
//! this is what the burning algorithm walks) and as a roaring bitmap over the
//! strictly upper triangle (without multiplicity; this answers adjacency
//! queries).

use std::collections::VecDeque;
use std::ops::Range;

use proptest::prelude::*;
use roaring::RoaringBitmap;

use crate::config::GonalityConfig;
use crate::error::GraphError;
use crate::upper_triangle::{
    strictly_upper_triangular_matrix_capacity, ColumnMajorIterator, UpperTriangularAdjacency,
};
use crate::Vertex;

/// An undirected graph, possibly with parallel edges.
#[derive(Clone, PartialEq, Eq)]
pub struct Graph {
    neighbours: Vec<Vec<Vertex>>,
    adjacency: UpperTriangularAdjacency,
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let edges: Vec<(Vertex, Vertex)> = self.iter_edges().collect();
        write!(
            f,
            "Graph::from_edges_iter({}, vec!{:?}.into_iter())",
            self.get_vertex_count(),
            edges
        )?;
        Ok(())
    }
}

impl Graph {
    /// Constructs a graph with `vertex_count` vertices and no edges.
    pub fn new(vertex_count: Vertex) -> Self {
        Self {
            neighbours: vec![Vec::new(); usize::from(vertex_count)],
            adjacency: UpperTriangularAdjacency::zeroed(vertex_count),
        }
    }

    /// Requires `u < vertex_count && v < vertex_count && u != v` for every
    /// edge `(u, v)` in `edges`.  Panics otherwise.  Repeated pairs become
    /// parallel edges.
    pub fn from_edges_iter<I: Iterator<Item = (Vertex, Vertex)>>(
        vertex_count: Vertex,
        edges: I,
    ) -> Self {
        let mut graph = Self::new(vertex_count);
        for (u, v) in edges {
            graph.add_edge(u, v);
        }
        graph
    }

    /// `0 - 1 - ... - (n-1)`.
    pub fn path(vertex_count: Vertex) -> Self {
        Self::from_edges_iter(vertex_count, (1..vertex_count).map(|v| (v - 1, v)))
    }

    /// `0 - 1 - ... - (n-1) - 0`.  Requires `n >= 3`.
    pub fn cycle(vertex_count: Vertex) -> Self {
        assert!(vertex_count >= 3);
        let mut graph = Self::path(vertex_count);
        graph.add_edge(vertex_count - 1, 0);
        graph
    }

    pub fn complete(vertex_count: Vertex) -> Self {
        Self::from_edges_iter(vertex_count, ColumnMajorIterator::new(vertex_count))
    }

    #[inline]
    pub fn get_vertex_count(&self) -> Vertex {
        self.adjacency.size()
    }

    /// Counts parallel edges individually.
    pub fn get_edge_count(&self) -> usize {
        let endpoints: usize = self.neighbours.iter().map(Vec::len).sum();
        debug_assert_eq!(endpoints % 2, 0);
        endpoints / 2
    }

    /// Requires `u != v`.  Panics otherwise.
    pub fn add_edge(&mut self, u: Vertex, v: Vertex) {
        assert!(u < self.get_vertex_count());
        assert!(v < self.get_vertex_count());
        assert!(u != v, "loops are not supported");
        self.neighbours[usize::from(u)].push(v);
        self.neighbours[usize::from(v)].push(u);
        self.adjacency.set(u, v);
    }

    /// Neighbours of `u`, each repeated once per edge, in insertion order.
    #[inline]
    pub fn neighbours(&self, u: Vertex) -> &[Vertex] {
        &self.neighbours[usize::from(u)]
    }

    /// Number of edge endpoints at `u`.
    #[inline]
    pub fn degree(&self, u: Vertex) -> usize {
        self.neighbours[usize::from(u)].len()
    }

    /// Whether at least one edge joins `u` and `v`.  Requires `u != v`.
    #[inline]
    pub fn is_adjacent(&self, u: Vertex, v: Vertex) -> bool {
        self.adjacency.get(u, v)
    }

    /// Number of edges joining `u` and `v`, as recorded at `u`.
    pub fn multiplicity(&self, u: Vertex, v: Vertex) -> usize {
        self.neighbours(u).iter().filter(|w| **w == v).count()
    }

    /// No parallel edges.
    pub fn is_simple(&self) -> bool {
        self.adjacency.len() == self.get_edge_count() as u64
    }

    /// Each emitted pair `(u, v)` satisfies `u < v` and appears once per
    /// parallel edge.  Pairs come in vertex order, then in insertion order.
    pub fn iter_edges(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        self.neighbours.iter().enumerate().flat_map(|(u, neighbours)| {
            let u = Vertex::try_from(u).unwrap();
            neighbours
                .iter()
                .filter(move |v| u < **v)
                .map(move |v| (u, *v))
        })
    }

    /// Visit all vertices reachable from `start` in a breadth-first-search
    /// (BFS) order.
    pub fn iter_vertices_bfs(&self, start: Vertex) -> BfsVerticesIterator {
        assert!(start < self.get_vertex_count());
        BfsVerticesIterator {
            graph: self,
            visited: RoaringBitmap::new(),
            to_visit: vec![start].into(),
        }
    }

    pub fn is_connected(&self) -> bool {
        if self.get_vertex_count() == 0 {
            return true;
        }
        self.iter_vertices_bfs(0).count() == usize::from(self.get_vertex_count())
    }

    /// Checks everything the chip-firing engine takes for granted: a
    /// non-empty, connected graph of supported size.  Parallel edges are
    /// accepted.
    pub fn validate(&self, config: &GonalityConfig) -> Result<(), GraphError> {
        let vertex_count = usize::from(self.get_vertex_count());
        if vertex_count == 0 {
            return Err(GraphError::Empty);
        }
        if vertex_count > config.max_vertices {
            return Err(GraphError::TooManyVertices {
                vertex_count,
                max: config.max_vertices,
            });
        }
        let edge_count = self.get_edge_count();
        if edge_count > config.max_edges {
            return Err(GraphError::TooManyEdges {
                edge_count,
                max: config.max_edges,
            });
        }
        if !self.is_connected() {
            return Err(GraphError::Disconnected);
        }
        Ok(())
    }

    /// Like [`Self::validate`], additionally rejecting parallel edges.
    pub fn validate_simple(&self, config: &GonalityConfig) -> Result<(), GraphError> {
        self.validate(config)?;
        match self.find_parallel_edge() {
            Some((u, v)) => Err(GraphError::ParallelEdges { u, v }),
            None => Ok(()),
        }
    }

    /// The first pair `u < v` (column by column) joined by more than one edge.
    pub fn find_parallel_edge(&self) -> Option<(Vertex, Vertex)> {
        self.adjacency
            .iter_ones()
            .find(|(u, v)| self.multiplicity(*u, *v) > 1)
    }
}

/// See [`Graph::iter_vertices_bfs`].
pub struct BfsVerticesIterator<'a> {
    graph: &'a Graph,
    visited: RoaringBitmap,
    to_visit: VecDeque<Vertex>,
}

impl<'a> Iterator for BfsVerticesIterator<'a> {
    type Item = Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(u) = self.to_visit.pop_front() {
            if self.visited.contains(u.into()) {
                continue;
            }
            self.visited.insert(u.into());
            self.to_visit.extend(
                self.graph
                    .neighbours(u)
                    .iter()
                    .filter(|v| !self.visited.contains((**v).into())),
            );
            return Some(u);
        }
        None
    }
}

pub fn arb_prufer_sequence(vertex_count: Vertex) -> BoxedStrategy<Vec<Vertex>> {
    assert!(vertex_count >= 2); // trees smaller than this have to be enumerated by hand
    proptest::collection::vec(0..vertex_count, usize::from(vertex_count) - 2).boxed()
}

// https://en.wikipedia.org/wiki/Pr%C3%BCfer_sequence#Algorithm_to_convert_a_Pr%C3%BCfer_sequence_into_a_tree
pub fn tree_from_prufer_sequence(prufer_sequence: &[Vertex]) -> Graph {
    let vertex_count = prufer_sequence.len() + 2;
    let mut tree = Graph::new(Vertex::try_from(vertex_count).unwrap());

    let mut degree: Vec<usize> = vec![1; vertex_count];
    for u in prufer_sequence {
        degree[usize::from(*u)] += 1;
    }

    for u in prufer_sequence {
        let leaf = degree.iter().position(|d| *d == 1).unwrap();
        tree.add_edge(*u, Vertex::try_from(leaf).unwrap());
        degree[usize::from(*u)] -= 1;
        degree[leaf] -= 1;
    }

    let mut last = (0..vertex_count).filter(|v| degree[*v] == 1);
    let u = last.next().unwrap();
    let v = last.next().unwrap();
    tree.add_edge(Vertex::try_from(u).unwrap(), Vertex::try_from(v).unwrap());

    tree
}

/// Random connected simple graphs: a uniformly random spanning tree plus every
/// other pair of vertices independently with probability
/// `extra_edge_probability`.
pub fn arb_connected_graph(
    vertex_count: impl Into<Range<Vertex>>,
    extra_edge_probability: f64,
) -> BoxedStrategy<Graph> {
    let vertex_count = vertex_count.into();
    assert!(vertex_count.start >= 2);
    vertex_count
        .prop_flat_map(move |vertex_count| {
            let cells = strictly_upper_triangular_matrix_capacity(vertex_count) as usize;
            (
                arb_prufer_sequence(vertex_count),
                proptest::collection::vec(proptest::bool::weighted(extra_edge_probability), cells),
            )
                .prop_map(move |(prufer_sequence, extra_edges)| {
                    let mut graph = tree_from_prufer_sequence(&prufer_sequence);
                    for ((u, v), present) in ColumnMajorIterator::new(vertex_count).zip(extra_edges) {
                        if present && !graph.is_adjacent(u, v) {
                            graph.add_edge(u, v);
                        }
                    }
                    graph
                })
        })
        .boxed()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    #[should_panic = "loops are not supported"]
    fn negative_test_loop() {
        let mut graph = Graph::new(2);
        graph.add_edge(1, 1);
    }

    #[test]
    fn parallel_edges_are_counted() {
        let graph = Graph::from_edges_iter(3, vec![(0, 1), (1, 0), (1, 2)].into_iter());
        assert_eq!(graph.get_edge_count(), 3);
        assert_eq!(graph.degree(1), 3);
        assert_eq!(graph.multiplicity(0, 1), 2);
        assert_eq!(graph.multiplicity(1, 0), 2);
        assert!(!graph.is_simple());
        assert_eq!(
            graph.iter_edges().collect::<Vec<_>>(),
            vec![(0, 1), (0, 1), (1, 2)]
        );
        assert_eq!(
            graph.validate_simple(&GonalityConfig::default()),
            Err(GraphError::ParallelEdges { u: 0, v: 1 })
        );
        assert_eq!(graph.validate(&GonalityConfig::default()), Ok(()));
    }

    #[test]
    fn named_families() {
        assert_eq!(Graph::path(4).get_edge_count(), 3);
        assert_eq!(Graph::cycle(5).get_edge_count(), 5);
        assert_eq!(Graph::complete(5).get_edge_count(), 10);
        assert!(Graph::complete(5).is_simple());
        assert!((0..5).all(|v| Graph::cycle(5).degree(v) == 2));
    }

    #[test]
    fn validation_failures() {
        let config = GonalityConfig::default();
        assert_eq!(Graph::new(0).validate(&config), Err(GraphError::Empty));
        assert_eq!(Graph::new(1).validate(&config), Ok(()));
        assert_eq!(
            Graph::from_edges_iter(4, vec![(0, 1), (2, 3)].into_iter()).validate(&config),
            Err(GraphError::Disconnected)
        );
        let tight = GonalityConfig {
            max_vertices: 3,
            ..Default::default()
        };
        assert_eq!(
            Graph::path(4).validate(&tight),
            Err(GraphError::TooManyVertices {
                vertex_count: 4,
                max: 3
            })
        );
        let tight = GonalityConfig {
            max_edges: 2,
            ..Default::default()
        };
        assert_eq!(
            Graph::cycle(3).validate(&tight),
            Err(GraphError::TooManyEdges {
                edge_count: 3,
                max: 2
            })
        );
    }

    #[test]
    fn bfs_order() {
        let graph = Graph::from_edges_iter(5, vec![(0, 3), (0, 1), (3, 4), (1, 2)].into_iter());
        assert_eq!(
            graph.iter_vertices_bfs(0).collect::<Vec<_>>(),
            vec![0, 3, 1, 4, 2]
        );
    }

    #[test]
    fn prufer_sequence_of_a_star() {
        let star = tree_from_prufer_sequence(&[0, 0, 0]);
        assert_eq!(star.degree(0), 4);
        assert_eq!(star.get_edge_count(), 4);
    }

    proptest! {
        #[test]
        fn prufer_sequences_give_trees(prufer_sequence in arb_prufer_sequence(12)) {
            let tree = tree_from_prufer_sequence(&prufer_sequence);
            prop_assert_eq!(tree.get_edge_count(), 11);
            prop_assert!(tree.is_connected());
            prop_assert!(tree.is_simple());
        }

        #[test]
        fn arbitrary_graphs_are_valid(graph in arb_connected_graph(2..20, 0.3)) {
            prop_assert_eq!(graph.validate_simple(&GonalityConfig::default()), Ok(()));
            let edges: HashSet<(Vertex, Vertex)> = graph.iter_edges().collect();
            prop_assert_eq!(edges.len(), graph.get_edge_count());
            for (u, v) in edges {
                prop_assert!(graph.is_adjacent(v, u));
                prop_assert!(graph.neighbours(v).contains(&u));
            }
        }

        #[test]
        fn multiplicities_agree_from_both_ends(
            edges in proptest::collection::vec((0..6u16, 0..6u16), 0..20)
        ) {
            let mut graph = Graph::new(6);
            for (u, v) in edges.into_iter().filter(|(u, v)| u != v) {
                graph.add_edge(u, v);
            }
            for u in 0..6 {
                for v in 0..6 {
                    prop_assert_eq!(graph.multiplicity(u, v), graph.multiplicity(v, u));
                }
            }
        }
    }
}
