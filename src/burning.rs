//! [Dhar's burning algorithm](https://en.wikipedia.org/wiki/Chip-firing_game)
//! and divisor reduction built on top of it.
//!
//! Fire starts at a vertex that acts as an unconstrained sink and spreads
//! along edges.  Every chip on a vertex shields it from one burning edge; a
//! vertex with more burning incident edges than chips catches fire as well.
//! Whatever is left unburnt when the fire dies out is the largest set of
//! vertices that can fire simultaneously without any vertex going into debt.

use std::collections::VecDeque;

use roaring::RoaringBitmap;

use crate::divisor::Divisor;
use crate::graph::Graph;
use crate::Vertex;

/// Scratch space for the burning algorithm, sized once per graph and reused
/// across calls.  Not shared: every thread running a search owns one.
#[derive(Clone, Debug)]
pub struct Burner {
    burnt: RoaringBitmap,
    burnt_edges: Vec<u32>,
    to_visit: VecDeque<Vertex>,
    firing_set: Vec<Vertex>,
}

impl Burner {
    pub fn new(vertex_count: Vertex) -> Self {
        Self {
            burnt: RoaringBitmap::new(),
            burnt_edges: vec![0; usize::from(vertex_count)],
            to_visit: VecDeque::with_capacity(usize::from(vertex_count)),
            firing_set: Vec::with_capacity(usize::from(vertex_count)),
        }
    }

    /// Returns the firing set of `divisor` with respect to `start`, in
    /// increasing vertex order.  It never contains `start`.
    ///
    /// Requires every entry of `divisor` other than `start`'s to be
    /// non-negative.  The chip count on `start` itself is never read.
    pub fn burn(&mut self, graph: &Graph, divisor: &Divisor, start: Vertex) -> &[Vertex] {
        let vertex_count = graph.get_vertex_count();
        assert!(start < vertex_count);
        assert_eq!(divisor.vertex_count(), vertex_count);
        assert_eq!(self.burnt_edges.len(), usize::from(vertex_count));
        assert!(
            (0..vertex_count).all(|v| v == start || divisor[v] >= 0),
            "only the starting vertex may be in debt"
        );

        self.burnt.clear();
        self.burnt_edges.fill(0);
        self.to_visit.clear();

        self.burnt.insert(start.into());
        self.to_visit.push_back(start);
        while let Some(u) = self.to_visit.pop_front() {
            for v in graph.neighbours(u) {
                let v = *v;
                let burnt_edges = &mut self.burnt_edges[usize::from(v)];
                *burnt_edges += 1;
                // Checking `burnt` first keeps `start`'s entry unread.
                if !self.burnt.contains(v.into()) && i64::from(*burnt_edges) > i64::from(divisor[v]) {
                    self.burnt.insert(v.into());
                    self.to_visit.push_back(v);
                }
            }
        }

        self.firing_set.clear();
        self.firing_set
            .extend((0..vertex_count).filter(|v| !self.burnt.contains((*v).into())));
        &self.firing_set
    }

    /// Repeatedly burns from `target` and fires whatever is left unburnt until
    /// nothing is.  Terminates on connected graphs.
    pub fn reduce(&mut self, graph: &Graph, divisor: &Divisor, target: Vertex) -> Reduction {
        assert!(target < graph.get_vertex_count());
        let mut current = divisor.clone();
        let mut script = vec![0u32; usize::from(graph.get_vertex_count())];
        loop {
            let firing_set = self.burn(graph, &current, target);
            if firing_set.is_empty() {
                break;
            }
            for v in firing_set {
                script[usize::from(*v)] += 1;
            }
            fire(graph, &mut current, firing_set);
        }
        assert_eq!(script[usize::from(target)], 0);
        Reduction {
            divisor: current,
            script,
        }
    }

    /// With a `target`: whether `divisor` is `target`-reduced.  Without one:
    /// whether it is reduced with respect to *some* vertex.
    pub fn is_reduced(&mut self, graph: &Graph, divisor: &Divisor, target: Option<Vertex>) -> bool {
        match target {
            Some(target) => self.burn(graph, divisor, target).is_empty(),
            None => (0..graph.get_vertex_count()).any(|v| self.burn(graph, divisor, v).is_empty()),
        }
    }
}

/// Outcome of [`Burner::reduce`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reduction {
    /// The `target`-reduced divisor linearly equivalent to the input.
    pub divisor: Divisor,
    /// How many times each vertex fired.  Always 0 at the target.
    pub script: Vec<u32>,
}

/// Fires every vertex of `firing_set` once, simultaneously: each loses one
/// chip per incident edge and each of its neighbours gains one per edge.
pub fn fire(graph: &Graph, divisor: &mut Divisor, firing_set: &[Vertex]) {
    for u in firing_set {
        for v in graph.neighbours(*u) {
            divisor[*u] -= 1;
            divisor[*v] += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::arb_connected_graph;
    use proptest::prelude::*;

    fn burn(graph: &Graph, chips: Vec<i32>, start: Vertex) -> Vec<Vertex> {
        let mut burner = Burner::new(graph.get_vertex_count());
        burner.burn(graph, &Divisor::from_chips(chips), start).to_vec()
    }

    #[test]
    fn burning_a_cycle() {
        let c4 = Graph::cycle(4);
        assert_eq!(burn(&c4, vec![1, 0, 1, 0], 0), vec![]);
        assert_eq!(burn(&c4, vec![1, 0, 1, 0], 1), vec![0, 2, 3]);
        assert_eq!(burn(&c4, vec![0, 0, 0, 0], 2), vec![]);
    }

    #[test]
    fn parallel_edges_need_more_chips() {
        let graph = Graph::from_edges_iter(2, vec![(0, 1), (0, 1)].into_iter());
        assert_eq!(burn(&graph, vec![0, 1], 0), vec![]);
        assert_eq!(burn(&graph, vec![0, 2], 0), vec![1]);
    }

    #[test]
    fn start_may_be_in_debt() {
        let p3 = Graph::path(3);
        assert_eq!(burn(&p3, vec![-3, 0, 1], 0), vec![2]);
    }

    #[test]
    #[should_panic = "only the starting vertex may be in debt"]
    fn negative_entries_elsewhere_are_rejected() {
        let p3 = Graph::path(3);
        burn(&p3, vec![0, -1, 1], 0);
    }

    #[test]
    fn reducing_to_an_endpoint_of_a_path() {
        let p3 = Graph::path(3);
        let mut burner = Burner::new(3);
        let reduction = burner.reduce(&p3, &Divisor::from_chips(vec![0, 0, 1]), 0);
        assert_eq!(reduction.divisor, Divisor::from_chips(vec![1, 0, 0]));
        assert_eq!(reduction.script, vec![0, 1, 2]);
    }

    #[test]
    fn reduced_with_respect_to_some_vertex() {
        let p3 = Graph::path(3);
        let mut burner = Burner::new(3);
        let divisor = Divisor::from_chips(vec![0, 0, 2]);
        assert!(!burner.is_reduced(&p3, &divisor, Some(0)));
        assert!(!burner.is_reduced(&p3, &divisor, Some(1)));
        assert!(burner.is_reduced(&p3, &divisor, Some(2)));
        assert!(burner.is_reduced(&p3, &divisor, None));

        let c4 = Graph::cycle(4);
        let mut burner = Burner::new(4);
        let spread = Divisor::from_chips(vec![1, 1, 1, 1]);
        assert!(!burner.is_reduced(&c4, &spread, None));
    }

    #[test]
    fn firing_preserves_degree() {
        let c4 = Graph::cycle(4);
        let mut divisor = Divisor::from_chips(vec![2, 0, 0, 0]);
        fire(&c4, &mut divisor, &[0]);
        assert_eq!(divisor.as_slice(), &[0, 1, 0, 1]);
        fire(&c4, &mut divisor, &[0, 1, 2, 3]);
        assert_eq!(divisor.as_slice(), &[0, 1, 0, 1]);
    }

    fn graph_and_divisor() -> impl Strategy<Value = (Graph, Divisor)> {
        arb_connected_graph(2..10, 0.3).prop_flat_map(|graph| {
            let vertex_count = usize::from(graph.get_vertex_count());
            (
                Just(graph),
                proptest::collection::vec(0..4i32, vertex_count).prop_map(Divisor::from_chips),
            )
        })
    }

    proptest! {
        #[test]
        fn burning_is_deterministic_and_spares_start((graph, divisor) in graph_and_divisor(), start in any::<prop::sample::Index>()) {
            let start = Vertex::try_from(start.index(usize::from(graph.get_vertex_count()))).unwrap();
            let mut burner = Burner::new(graph.get_vertex_count());
            let first = burner.burn(&graph, &divisor, start).to_vec();
            let second = burner.burn(&graph, &divisor, start).to_vec();
            prop_assert!(!first.contains(&start));
            prop_assert_eq!(first, second);
        }

        #[test]
        fn firing_set_fires_legally((graph, divisor) in graph_and_divisor(), start in any::<prop::sample::Index>()) {
            let start = Vertex::try_from(start.index(usize::from(graph.get_vertex_count()))).unwrap();
            let mut burner = Burner::new(graph.get_vertex_count());
            let firing_set = burner.burn(&graph, &divisor, start).to_vec();
            let mut fired = divisor.clone();
            fire(&graph, &mut fired, &firing_set);
            prop_assert!(fired.is_effective());
            prop_assert_eq!(fired.degree(), divisor.degree());
        }

        #[test]
        fn reduction_is_reduced_and_idempotent((graph, divisor) in graph_and_divisor(), target in any::<prop::sample::Index>()) {
            let target = Vertex::try_from(target.index(usize::from(graph.get_vertex_count()))).unwrap();
            let mut burner = Burner::new(graph.get_vertex_count());
            let reduction = burner.reduce(&graph, &divisor, target);
            prop_assert!(burner.is_reduced(&graph, &reduction.divisor, Some(target)));
            prop_assert!(reduction.divisor.is_effective());
            prop_assert_eq!(reduction.divisor.degree(), divisor.degree());
            prop_assert_eq!(reduction.script[usize::from(target)], 0);

            let again = burner.reduce(&graph, &reduction.divisor, target);
            prop_assert_eq!(&again.divisor, &reduction.divisor);
            prop_assert!(again.script.iter().all(|s| *s == 0));
        }
    }
}
