use crate::burning::{Burner, Reduction};
use crate::divisor::Divisor;
use crate::graph::Graph;
use crate::rank::RankOracle;
use crate::Vertex;

/// The chip-firing primitives bound to one graph, together with the scratch
/// space they reuse between calls.
///
/// An engine is cheap to build and must not be shared between concurrent
/// searches; give every worker its own.  The graph is expected to have passed
/// [`Graph::validate`].
///
/// # Panics
///
/// On a disconnected graph, where reduction would never finish.
#[derive(Clone, Debug)]
pub struct ChipFiringEngine<'g> {
    graph: &'g Graph,
    burner: Burner,
    oracle: RankOracle,
}

impl<'g> ChipFiringEngine<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        assert!(graph.is_connected(), "graph must be connected");
        let vertex_count = graph.get_vertex_count();
        Self {
            graph,
            burner: Burner::new(vertex_count),
            oracle: RankOracle::new(vertex_count),
        }
    }

    #[inline]
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// See [`Burner::burn`].  The returned slice is only valid until the next
    /// call on this engine.
    pub fn burn(&mut self, divisor: &Divisor, start: Vertex) -> &[Vertex] {
        self.burner.burn(self.graph, divisor, start)
    }

    pub fn reduce(&mut self, divisor: &Divisor, target: Vertex) -> Reduction {
        self.burner.reduce(self.graph, divisor, target)
    }

    pub fn is_reduced(&mut self, divisor: &Divisor, target: Option<Vertex>) -> bool {
        self.burner.is_reduced(self.graph, divisor, target)
    }

    pub fn has_positive_rank(&mut self, divisor: &Divisor) -> bool {
        self.oracle
            .has_positive_rank(&mut self.burner, self.graph, divisor)
    }
}

/// One-shot [`ChipFiringEngine::burn`] for callers that don't keep an engine
/// around.
pub fn burn(graph: &Graph, divisor: &Divisor, start: Vertex) -> Vec<Vertex> {
    ChipFiringEngine::new(graph).burn(divisor, start).to_vec()
}

pub fn reduce(graph: &Graph, divisor: &Divisor, target: Vertex) -> Reduction {
    ChipFiringEngine::new(graph).reduce(divisor, target)
}

pub fn is_reduced(graph: &Graph, divisor: &Divisor, target: Option<Vertex>) -> bool {
    ChipFiringEngine::new(graph).is_reduced(divisor, target)
}

pub fn has_positive_rank(graph: &Graph, divisor: &Divisor) -> bool {
    ChipFiringEngine::new(graph).has_positive_rank(divisor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_reuses_scratch_across_graph_operations() {
        let c4 = Graph::cycle(4);
        let mut engine = ChipFiringEngine::new(&c4);
        let divisor = Divisor::from_chips(vec![0, 2, 0, 0]);

        assert!(engine.has_positive_rank(&divisor));
        assert_eq!(engine.burn(&divisor, 0).to_vec(), vec![1]);
        let reduction = engine.reduce(&divisor, 0);
        assert_eq!(reduction.divisor, Divisor::from_chips(vec![1, 0, 1, 0]));
        assert_eq!(reduction.script, vec![0, 1, 0, 0]);
        assert!(engine.is_reduced(&reduction.divisor, Some(0)));
        assert!(engine.has_positive_rank(&reduction.divisor));
        assert!(!engine.has_positive_rank(&Divisor::from_chips(vec![0, 0, 1, 0])));
    }

    #[test]
    fn one_shot_helpers_agree_with_the_engine() {
        let p3 = Graph::path(3);
        let divisor = Divisor::from_chips(vec![0, 0, 1]);
        assert_eq!(burn(&p3, &divisor, 0), vec![2]);
        assert_eq!(reduce(&p3, &divisor, 0).divisor, Divisor::from_chips(vec![1, 0, 0]));
        assert!(is_reduced(&p3, &divisor, Some(2)));
        assert!(has_positive_rank(&p3, &divisor));
    }

    #[test]
    #[should_panic = "graph must be connected"]
    fn rank_on_a_disconnected_graph() {
        has_positive_rank(&Graph::new(2), &Divisor::from_chips(vec![1, 0]));
    }

    #[test]
    #[should_panic = "graph must be connected"]
    fn reduction_on_a_disconnected_graph() {
        reduce(&Graph::new(2), &Divisor::from_chips(vec![0, 1]), 0);
    }

    #[test]
    fn single_vertex_is_connected() {
        let divisor = Divisor::from_chips(vec![1]);
        assert!(has_positive_rank(&Graph::new(1), &divisor));
    }
}
