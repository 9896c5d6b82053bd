//! Positive rank test.
//!
//! An effective divisor has positive rank iff every vertex can be given a chip
//! by moving to some effective divisor in the same linear equivalence class.
//! For a target `u` that's decided by burning from `u` and firing whatever
//! stays unburnt, over and over: either `u` eventually gains a chip, or the
//! fire consumes the whole graph and `u` can never be reached.

use roaring::RoaringBitmap;

use crate::burning::{fire, Burner};
use crate::divisor::Divisor;
use crate::graph::Graph;
use crate::Vertex;

/// Scratch space for [`RankOracle::has_positive_rank`].
#[derive(Clone, Debug)]
pub struct RankOracle {
    working: Divisor,
    /// Vertices known to hold a chip in some effective divisor equivalent to
    /// the one being tested.
    reachable: RoaringBitmap,
}

impl RankOracle {
    pub fn new(vertex_count: Vertex) -> Self {
        Self {
            working: Divisor::zeroed(vertex_count),
            reachable: RoaringBitmap::new(),
        }
    }

    /// Requires an effective divisor.  `divisor` itself is left untouched.
    pub fn has_positive_rank(&mut self, burner: &mut Burner, graph: &Graph, divisor: &Divisor) -> bool {
        let vertex_count = graph.get_vertex_count();
        assert_eq!(divisor.vertex_count(), vertex_count);
        assert!(divisor.is_effective(), "divisor must be effective");

        self.working.copy_from(divisor);
        self.reachable.clear();
        self.mark_reachable();

        for u in 0..vertex_count {
            while !self.reachable.contains(u.into()) {
                let firing_set = burner.burn(graph, &self.working, u);
                if firing_set.is_empty() {
                    cov_mark::hit!(rank_oracle_unreachable_vertex);
                    return false;
                }
                fire(graph, &mut self.working, firing_set);
                self.mark_reachable();
            }
        }
        true
    }

    fn mark_reachable(&mut self) {
        for (v, _) in self.working.support() {
            self.reachable.insert(v.into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::arb_connected_graph;
    use proptest::prelude::*;

    fn has_positive_rank(graph: &Graph, chips: Vec<i32>) -> bool {
        let vertex_count = graph.get_vertex_count();
        let mut burner = Burner::new(vertex_count);
        let mut oracle = RankOracle::new(vertex_count);
        oracle.has_positive_rank(&mut burner, graph, &Divisor::from_chips(chips))
    }

    #[test]
    fn midpoint_of_a_path_reaches_both_ends() {
        let p3 = Graph::path(3);
        assert!(has_positive_rank(&p3, vec![0, 1, 0]));
        assert!(has_positive_rank(&p3, vec![1, 0, 0]));
    }

    #[test]
    fn one_chip_on_a_cycle_is_not_enough() {
        cov_mark::check!(rank_oracle_unreachable_vertex);
        let c4 = Graph::cycle(4);
        assert!(!has_positive_rank(&c4, vec![1, 0, 0, 0]));
    }

    #[test]
    fn two_chips_on_a_cycle() {
        let c4 = Graph::cycle(4);
        assert!(has_positive_rank(&c4, vec![1, 0, 1, 0]));
        assert!(has_positive_rank(&c4, vec![2, 0, 0, 0]));
        assert!(has_positive_rank(&c4, vec![1, 1, 0, 0]));
    }

    #[test]
    fn complete_graph_needs_all_but_one_vertex() {
        let k4 = Graph::complete(4);
        assert!(!has_positive_rank(&k4, vec![1, 1, 0, 0]));
        assert!(!has_positive_rank(&k4, vec![2, 0, 0, 0]));
        assert!(has_positive_rank(&k4, vec![1, 1, 1, 0]));
    }

    #[test]
    fn zero_divisor_has_no_rank() {
        assert!(!has_positive_rank(&Graph::path(2), vec![0, 0]));
    }

    #[test]
    #[should_panic = "divisor must be effective"]
    fn non_effective_divisors_are_rejected() {
        has_positive_rank(&Graph::path(3), vec![2, 0, -1]);
    }

    #[test]
    fn input_is_not_mutated() {
        let c4 = Graph::cycle(4);
        let divisor = Divisor::from_chips(vec![2, 0, 0, 0]);
        let mut burner = Burner::new(4);
        let mut oracle = RankOracle::new(4);
        assert!(oracle.has_positive_rank(&mut burner, &c4, &divisor));
        assert_eq!(divisor.as_slice(), &[2, 0, 0, 0]);
    }

    fn graph_divisor_and_extra_chip() -> impl Strategy<Value = (Graph, Divisor, Vertex)> {
        arb_connected_graph(2..9, 0.3).prop_flat_map(|graph| {
            let vertex_count = graph.get_vertex_count();
            (
                Just(graph),
                proptest::collection::vec(0..3i32, usize::from(vertex_count))
                    .prop_map(Divisor::from_chips),
                0..vertex_count,
            )
        })
    }

    proptest! {
        #[test]
        fn positive_rank_is_monotone((graph, divisor, extra) in graph_divisor_and_extra_chip()) {
            let mut bigger = divisor.clone();
            bigger[extra] += 1;
            prop_assert!(bigger.dominates(&divisor));
            if has_positive_rank(&graph, divisor.as_slice().to_vec()) {
                prop_assert!(has_positive_rank(&graph, bigger.as_slice().to_vec()));
            }
        }

        #[test]
        fn one_chip_everywhere_has_positive_rank(graph in arb_connected_graph(2..12, 0.3)) {
            let everywhere = vec![1; usize::from(graph.get_vertex_count())];
            prop_assert!(has_positive_rank(&graph, everywhere));
        }
    }
}
