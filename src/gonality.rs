//! Exhaustive search for positive rank divisors of a given degree.
//!
//! If a positive rank effective divisor of degree `d` exists, then so does a
//! `v0`-reduced one (reduce it to vertex 0; the class, and thus the rank,
//! doesn't change).  A `v0`-reduced divisor of positive rank has a chip on
//! `v0`, so only divisors with at least one chip there are enumerated, and
//! each is checked to be `v0`-reduced (one burn) before paying for the rank
//! oracle.
//!
//! Divisors are enumerated vertex by vertex, putting as many chips as
//! possible on the current vertex first.  Everything dominated by a divisor of
//! degree `k` is therefore seen before the `(k + 1)`-th chip lands anywhere
//! but on `v0`, so asking for degree `d` directly is no slower than asking
//! for `1, 2, ..., d` in turn.

use rayon::prelude::*;

use crate::config::GonalityConfig;
use crate::divisor::Divisor;
use crate::engine::ChipFiringEngine;
use crate::graph::Graph;
use crate::Vertex;

/// Result of [`GonalitySearch::find_gonality`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gonality {
    pub degree: u32,
    /// The first positive rank `v0`-reduced divisor of that degree in
    /// enumeration order.
    pub witness: Divisor,
}

/// Branch and bound over effective divisors of one graph.  Owns its scratch
/// space, so concurrent searches each need their own.
#[derive(Clone, Debug)]
pub struct GonalitySearch<'g> {
    engine: ChipFiringEngine<'g>,
    partial: Divisor,
}

#[inline]
fn chips(count: u32) -> i32 {
    i32::try_from(count).unwrap()
}

impl<'g> GonalitySearch<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        assert!(graph.get_vertex_count() > 0);
        Self {
            engine: ChipFiringEngine::new(graph),
            partial: Divisor::zeroed(graph.get_vertex_count()),
        }
    }

    /// Returns a positive rank `v0`-reduced divisor of exactly `degree` chips,
    /// if there is one.
    pub fn find_positive_rank_divisor(&mut self, degree: u32) -> Option<Divisor> {
        (1..=degree)
            .rev()
            .find_map(|chips_on_v0| self.find_with_chips_on_v0(degree, chips_on_v0))
    }

    /// Calls `visit` on every positive rank `v0`-reduced divisor of exactly
    /// `degree` chips, in enumeration order.
    pub fn find_all_positive_rank_v0_reduced_divisors<F: FnMut(&Divisor)>(
        &mut self,
        degree: u32,
        mut visit: F,
    ) {
        for chips_on_v0 in (1..=degree).rev() {
            self.find_all_with_chips_on_v0(degree, chips_on_v0, &mut visit);
        }
    }

    /// Tries degrees `1, 2, ...` until a positive rank divisor turns up.  One
    /// chip on every vertex always has positive rank, so the answer is at most
    /// the number of vertices.
    pub fn find_gonality(&mut self) -> Gonality {
        let vertex_count = self.engine.graph().get_vertex_count();
        search_degrees(vertex_count, |degree| self.find_positive_rank_divisor(degree))
    }

    /// Every positive rank `v0`-reduced divisor of the smallest degree that
    /// has any, together with that degree.  The first one listed is the
    /// [`Gonality::witness`].
    pub fn find_all_minimum_degree_divisors(&mut self) -> (u32, Vec<Divisor>) {
        let vertex_count = self.engine.graph().get_vertex_count();
        let mut found = Vec::new();
        let Gonality { degree, .. } = search_degrees(vertex_count, |degree| {
            self.find_all_positive_rank_v0_reduced_divisors(degree, |divisor| {
                found.push(divisor.clone())
            });
            found.first().cloned()
        });
        (degree, found)
    }

    /// The subtree of the enumeration with exactly `chips_on_v0` chips on
    /// vertex 0.  These subtrees are independent of each other, which is what
    /// the parallel search splits on.
    fn find_with_chips_on_v0(&mut self, degree: u32, chips_on_v0: u32) -> Option<Divisor> {
        assert!(1 <= chips_on_v0 && chips_on_v0 <= degree);
        self.partial[0] = chips(chips_on_v0);
        if self.search_first(chips(degree - chips_on_v0), 1) {
            Some(self.partial.clone())
        } else {
            None
        }
    }

    fn find_all_with_chips_on_v0(
        &mut self,
        degree: u32,
        chips_on_v0: u32,
        visit: &mut dyn FnMut(&Divisor),
    ) {
        assert!(1 <= chips_on_v0 && chips_on_v0 <= degree);
        self.partial[0] = chips(chips_on_v0);
        self.search_all(chips(degree - chips_on_v0), 1, visit);
    }

    fn search_first(&mut self, remaining: i32, finished_vertices: usize) -> bool {
        let vertex_count = usize::from(self.engine.graph().get_vertex_count());
        if finished_vertices >= vertex_count {
            return self.accepts(remaining);
        }
        let v = Vertex::try_from(finished_vertices).unwrap();
        if finished_vertices + 1 == vertex_count {
            // Any other amount on the last vertex leaves chips undistributed.
            self.partial[v] = remaining;
            return self.search_first(0, vertex_count);
        }
        for count in (0..=remaining).rev() {
            self.partial[v] = count;
            if self.search_first(remaining - count, finished_vertices + 1) {
                return true;
            }
        }
        self.partial[v] = 0;
        false
    }

    fn search_all(
        &mut self,
        remaining: i32,
        finished_vertices: usize,
        visit: &mut dyn FnMut(&Divisor),
    ) {
        let vertex_count = usize::from(self.engine.graph().get_vertex_count());
        if finished_vertices >= vertex_count {
            if self.accepts(remaining) {
                visit(&self.partial);
            }
            return;
        }
        let v = Vertex::try_from(finished_vertices).unwrap();
        if finished_vertices + 1 == vertex_count {
            self.partial[v] = remaining;
            self.search_all(0, vertex_count, visit);
            self.partial[v] = 0;
            return;
        }
        for count in (0..=remaining).rev() {
            self.partial[v] = count;
            self.search_all(remaining - count, finished_vertices + 1, visit);
        }
        self.partial[v] = 0;
    }

    /// Cheapest tests first: every chip placed, a chip on `v0`, `v0`-reduced,
    /// and only then the rank oracle.
    fn accepts(&mut self, remaining: i32) -> bool {
        if remaining != 0 || self.partial[0] <= 0 {
            return false;
        }
        if !self.engine.burn(&self.partial, 0).is_empty() {
            cov_mark::hit!(search_skips_divisors_that_are_not_v0_reduced);
            return false;
        }
        self.engine.has_positive_rank(&self.partial)
    }
}

pub fn find_positive_rank_divisor(graph: &Graph, degree: u32) -> Option<Divisor> {
    GonalitySearch::new(graph).find_positive_rank_divisor(degree)
}

pub fn find_all_positive_rank_v0_reduced_divisors<F: FnMut(&Divisor)>(
    graph: &Graph,
    degree: u32,
    visit: F,
) {
    GonalitySearch::new(graph).find_all_positive_rank_v0_reduced_divisors(degree, visit)
}

pub fn find_gonality(graph: &Graph) -> Gonality {
    GonalitySearch::new(graph).find_gonality()
}

pub fn find_all_minimum_degree_divisors(graph: &Graph) -> (u32, Vec<Divisor>) {
    GonalitySearch::new(graph).find_all_minimum_degree_divisors()
}

/// [`GonalitySearch::find_positive_rank_divisor`] with the subtrees for each
/// chip count on `v0` spread over the rayon thread pool, one search (and
/// thus one set of scratch buffers) per worker.  The earliest subtree in
/// enumeration order wins, so the result is the same divisor the sequential
/// search returns.
pub fn find_positive_rank_divisor_parallel(graph: &Graph, degree: u32) -> Option<Divisor> {
    (1..degree + 1)
        .into_par_iter()
        .rev()
        .map_init(
            || GonalitySearch::new(graph),
            |search, chips_on_v0| search.find_with_chips_on_v0(degree, chips_on_v0),
        )
        .find_first(Option::is_some)
        .flatten()
}

/// All positive rank `v0`-reduced divisors of exactly `degree` chips, found in
/// parallel and returned in enumeration order.
pub fn find_all_positive_rank_v0_reduced_divisors_parallel(
    graph: &Graph,
    degree: u32,
) -> Vec<Divisor> {
    (1..degree + 1)
        .into_par_iter()
        .rev()
        .map_init(
            || GonalitySearch::new(graph),
            |search, chips_on_v0| {
                let mut found = Vec::new();
                search.find_all_with_chips_on_v0(degree, chips_on_v0, &mut |divisor| {
                    found.push(divisor.clone())
                });
                found
            },
        )
        .flatten()
        .collect()
}

/// [`find_gonality`], using the parallel search when `config.parallel` is set.
pub fn find_gonality_with(graph: &Graph, config: &GonalityConfig) -> Gonality {
    if !config.parallel {
        return find_gonality(graph);
    }
    let vertex_count = graph.get_vertex_count();
    assert!(vertex_count > 0);
    search_degrees(vertex_count, |degree| {
        find_positive_rank_divisor_parallel(graph, degree)
    })
}

/// Runs `search` on degrees `1, 2, ...` and stops at the first one that
/// yields a divisor.  Panics past `vertex_count`, which one chip per vertex
/// always reaches.
fn search_degrees<F>(vertex_count: Vertex, mut search: F) -> Gonality
where
    F: FnMut(u32) -> Option<Divisor>,
{
    let vertex_count = u32::from(vertex_count);
    let mut degree = 1;
    loop {
        tracing::debug!(degree, "searching for a positive rank divisor");
        if let Some(witness) = search(degree) {
            tracing::debug!(degree, %witness, "gonality found");
            return Gonality { degree, witness };
        }
        assert!(
            degree < vertex_count,
            "no positive rank divisor of degree {} on {} vertices",
            degree,
            vertex_count
        );
        degree += 1;
    }
}
