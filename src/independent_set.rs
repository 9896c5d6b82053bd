//! Boppana–Halldórsson approximation of maximum independent sets.
//!
//! Used for cheap upper bounds on the gonality: if `A` is an independent set
//! of a *simple* graph, one chip on every vertex outside `A` has positive
//! rank.  With parallel edges that no longer holds, so everything here
//! requires a simple graph.
//!
//! Ravi Boppana and Magnús M. Halldórsson (1992), Approximating Maximum
//! Independent Sets by Excluding Subgraphs, BIT Numerical Mathematics
//! 32(2):180-196, doi:10.1007/BF01994876

use rand::Rng;
use roaring::RoaringBitmap;

use crate::divisor::Divisor;
use crate::graph::Graph;
use crate::Vertex;

fn vertex(v: u32) -> Vertex {
    Vertex::try_from(v).unwrap()
}

pub fn is_independent(graph: &Graph, set: &RoaringBitmap) -> bool {
    set.iter()
        .all(|u| set.iter().all(|v| u == v || !graph.is_adjacent(vertex(u), vertex(v))))
}

pub fn is_clique(graph: &Graph, set: &RoaringBitmap) -> bool {
    set.iter()
        .all(|u| set.iter().all(|v| u == v || graph.is_adjacent(vertex(u), vertex(v))))
}

/// A large independent set and a large clique of the subgraph induced by
/// `set`, in that order.
///
/// Picks a random pivot, recurses on its neighbours and on its
/// non-neighbours, and adds the pivot to the independent set found among the
/// non-neighbours and to the clique found among the neighbours.
pub fn ramsey<R: Rng + ?Sized>(
    graph: &Graph,
    set: &RoaringBitmap,
    rng: &mut R,
) -> (RoaringBitmap, RoaringBitmap) {
    if set.is_empty() {
        return (RoaringBitmap::new(), RoaringBitmap::new());
    }

    let pivot = set.select(rng.gen_range(0..set.len()) as u32).unwrap();
    let mut neighbours = RoaringBitmap::new();
    let mut non_neighbours = RoaringBitmap::new();
    for v in set.iter().filter(|v| *v != pivot) {
        if graph.is_adjacent(vertex(pivot), vertex(v)) {
            neighbours.insert(v);
        } else {
            non_neighbours.insert(v);
        }
    }

    let (neighbours_independent, mut neighbours_clique) = ramsey(graph, &neighbours, rng);
    let (mut non_neighbours_independent, non_neighbours_clique) =
        ramsey(graph, &non_neighbours, rng);
    non_neighbours_independent.insert(pivot);
    neighbours_clique.insert(pivot);

    debug_assert!(is_independent(graph, &neighbours_independent));
    debug_assert!(is_independent(graph, &non_neighbours_independent));
    debug_assert!(is_clique(graph, &neighbours_clique));
    debug_assert!(is_clique(graph, &non_neighbours_clique));

    // Ties go to the second candidate.
    let independent = if neighbours_independent.len() > non_neighbours_independent.len() {
        neighbours_independent
    } else {
        non_neighbours_independent
    };
    let clique = if neighbours_clique.len() > non_neighbours_clique.len() {
        neighbours_clique
    } else {
        non_neighbours_clique
    };
    debug_assert!(independent.is_subset(set) && clique.is_subset(set));
    (independent, clique)
}

/// "Clique Removal": runs [`ramsey`] on what's left of the graph, removes the
/// clique it found and repeats until nothing is left.  Returns the largest
/// independent set seen along the way.
pub fn approximate_maximum_independent_set<R: Rng + ?Sized>(
    graph: &Graph,
    rng: &mut R,
) -> RoaringBitmap {
    assert!(graph.is_simple(), "independent sets only bound the gonality of simple graphs");
    let mut remaining: RoaringBitmap = (0..u32::from(graph.get_vertex_count())).collect();
    let mut best = RoaringBitmap::new();
    while !remaining.is_empty() {
        let (independent, clique) = ramsey(graph, &remaining, rng);
        assert!(!clique.is_empty());
        remaining -= clique;
        if independent.len() > best.len() {
            best = independent;
        }
    }
    assert!(graph.get_vertex_count() == 0 || !best.is_empty());
    best
}

/// The largest of `trials` runs of [`approximate_maximum_independent_set`].
/// Every result is checked, and a set that turns out not to be independent
/// panics.
pub fn best_independent_set<R: Rng + ?Sized>(
    graph: &Graph,
    trials: usize,
    rng: &mut R,
) -> RoaringBitmap {
    let mut best = RoaringBitmap::new();
    for trial in 0..trials {
        let candidate = approximate_maximum_independent_set(graph, rng);
        assert!(
            is_independent(graph, &candidate),
            "approximation returned a set that is not independent"
        );
        tracing::trace!(trial, size = candidate.len(), "independent set approximation");
        if candidate.len() > best.len() {
            best = candidate;
        }
    }
    best
}

/// One chip on every vertex outside `set`.
pub fn independent_set_divisor(graph: &Graph, set: &RoaringBitmap) -> Divisor {
    Divisor::indicator(graph.get_vertex_count(), |v| !set.contains(v.into()))
}
