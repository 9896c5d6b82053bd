use crate::config::GonalityConfig;
use crate::error::GraphError;
use crate::graph::Graph;
use crate::Vertex;

/// The `parts`-th regular subdivision: every edge becomes a path of `parts`
/// edges.
///
/// The original vertices keep their numbers.  The `parts - 1` new vertices on
/// each edge are numbered from `n` upwards, edge by edge in
/// [`Graph::iter_edges`] order, walking from the smaller endpoint to the
/// larger one.  Every copy of a parallel edge gets a path of its own.
pub fn subdivide(graph: &Graph, parts: usize, config: &GonalityConfig) -> Result<Graph, GraphError> {
    if parts < 2 || parts > config.max_parts_per_edge {
        return Err(GraphError::InvalidSubdivision {
            parts,
            max: config.max_parts_per_edge,
        });
    }

    let original_count = usize::from(graph.get_vertex_count());
    let vertex_count = original_count + graph.get_edge_count() * (parts - 1);
    let max = config.max_vertices.min(usize::from(Vertex::MAX));
    if vertex_count > max {
        return Err(GraphError::TooManyVertices { vertex_count, max });
    }

    let mut subdivision = Graph::new(Vertex::try_from(vertex_count).unwrap());
    let mut next = graph.get_vertex_count();
    for (u, v) in graph.iter_edges() {
        let mut previous = u;
        for _ in 1..parts {
            subdivision.add_edge(previous, next);
            previous = next;
            next += 1;
        }
        subdivision.add_edge(previous, v);
    }
    assert_eq!(usize::from(next), vertex_count);
    Ok(subdivision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::arb_connected_graph;
    use proptest::prelude::*;

    #[test]
    fn subdividing_a_triangle() {
        let config = GonalityConfig::default();
        let subdivision = subdivide(&Graph::cycle(3), 2, &config).unwrap();
        assert_eq!(subdivision.get_vertex_count(), 6);
        assert_eq!(subdivision.get_edge_count(), 6);
        // 0 - 1 becomes 0 - 3 - 1, 0 - 2 becomes 0 - 4 - 2, 1 - 2 becomes 1 - 5 - 2.
        assert_eq!(
            subdivision.iter_edges().collect::<Vec<_>>(),
            vec![(0, 3), (0, 4), (1, 3), (1, 5), (2, 4), (2, 5)]
        );
    }

    #[test]
    fn parallel_edges_get_separate_paths() {
        let config = GonalityConfig::default();
        let banana = Graph::from_edges_iter(2, vec![(0, 1), (0, 1)].into_iter());
        let subdivision = subdivide(&banana, 3, &config).unwrap();
        assert_eq!(subdivision.get_vertex_count(), 6);
        assert_eq!(subdivision.get_edge_count(), 6);
        assert!(subdivision.is_simple());
        assert_eq!(subdivision.degree(0), 2);
        assert_eq!(subdivision.degree(1), 2);
    }

    #[test]
    fn invalid_part_counts() {
        let config = GonalityConfig::default();
        let c4 = Graph::cycle(4);
        assert_eq!(
            subdivide(&c4, 1, &config),
            Err(GraphError::InvalidSubdivision { parts: 1, max: 10 })
        );
        assert_eq!(
            subdivide(&c4, 11, &config),
            Err(GraphError::InvalidSubdivision { parts: 11, max: 10 })
        );
        let tight = GonalityConfig {
            max_vertices: 10,
            ..Default::default()
        };
        assert_eq!(
            subdivide(&c4, 3, &tight),
            Err(GraphError::TooManyVertices {
                vertex_count: 12,
                max: 10
            })
        );
    }

    proptest! {
        #[test]
        fn counts_after_subdivision(graph in arb_connected_graph(2..15, 0.3), parts in 2usize..6) {
            let config = GonalityConfig::default();
            let subdivision = subdivide(&graph, parts, &config).unwrap();
            let n = usize::from(graph.get_vertex_count());
            let m = graph.get_edge_count();
            prop_assert_eq!(usize::from(subdivision.get_vertex_count()), n + m * (parts - 1));
            prop_assert_eq!(subdivision.get_edge_count(), m * parts);
            prop_assert_eq!(subdivision.validate(&config), Ok(()));
            for v in graph.get_vertex_count()..subdivision.get_vertex_count() {
                prop_assert_eq!(subdivision.degree(v), 2);
            }
            for v in 0..graph.get_vertex_count() {
                prop_assert_eq!(subdivision.degree(v), graph.degree(v));
            }
        }
    }
}
