//! Experimental checks of two conjectures about gonality.
//!
//! * Brill–Noether: every graph of genus `g = m - n + 1` has gonality at
//!   most `(g + 3) / 2` (rounded down).
//! * Subdivision: the `k`-th regular subdivision of a graph has the same
//!   gonality as the graph itself.
//!
//! Both checks expect a graph that passed [`Graph::validate`].

use crate::config::GonalityConfig;
use crate::divisor::Divisor;
use crate::engine::ChipFiringEngine;
use crate::error::GraphError;
use crate::gonality::{
    find_gonality_with, find_positive_rank_divisor, find_positive_rank_divisor_parallel, Gonality,
};
use crate::graph::Graph;
use crate::independent_set::{best_independent_set, independent_set_divisor};
use crate::subdivision::subdivide;

pub fn brill_noether_bound(graph: &Graph) -> i64 {
    let genus = graph.get_edge_count() as i64 - i64::from(graph.get_vertex_count()) + 1;
    (genus + 3) / 2
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BrillNoetherOutcome {
    /// Some vertex has degree at most 1.  Contracting its edge changes
    /// neither gonality nor genus, so the graph isn't interesting.
    SkippedLeaf,
    /// The bound is at least `n - 2`, which every non-complete simple graph
    /// meets.
    SkippedTrivialBound,
    /// An independent set of `n - degree` vertices meets the bound.
    SkippedIndependentSet { degree: u32 },
    Meets { gonality: Gonality },
    Fails { gonality: Gonality, bound: i64 },
}

impl BrillNoetherOutcome {
    pub fn is_counterexample(&self) -> bool {
        matches!(self, BrillNoetherOutcome::Fails { .. })
    }
}

/// Runs the cheap tests before the exhaustive search.  Requires a simple
/// graph.
pub fn check_brill_noether(graph: &Graph, config: &GonalityConfig) -> BrillNoetherOutcome {
    let vertex_count = graph.get_vertex_count();
    if (0..vertex_count).any(|v| graph.degree(v) <= 1) {
        tracing::debug!("vertex of degree at most 1, skipping");
        return BrillNoetherOutcome::SkippedLeaf;
    }

    let bound = brill_noether_bound(graph);
    if bound >= i64::from(vertex_count) - 2 {
        tracing::debug!(bound, vertex_count, "bound trivially met, skipping");
        return BrillNoetherOutcome::SkippedTrivialBound;
    }

    let mut rng = config.rng();
    let mut engine = ChipFiringEngine::new(graph);
    for _ in 0..config.independent_set_trials {
        let set = best_independent_set(graph, 1, &mut rng);
        let divisor = independent_set_divisor(graph, &set);
        assert!(
            engine.has_positive_rank(&divisor),
            "divisor {} of an independent set has rank 0",
            divisor
        );
        let degree = u32::try_from(divisor.degree()).unwrap();
        if i64::from(degree) <= bound {
            cov_mark::hit!(brill_noether_met_by_independent_set);
            tracing::debug!(degree, bound, "independent set meets the bound, skipping");
            return BrillNoetherOutcome::SkippedIndependentSet { degree };
        }
    }

    let gonality = find_gonality_with(graph, config);
    if i64::from(gonality.degree) > bound {
        tracing::debug!(gonality = gonality.degree, bound, witness = %gonality.witness, "fails the Brill–Noether bound");
        BrillNoetherOutcome::Fails { gonality, bound }
    } else {
        tracing::debug!(gonality = gonality.degree, bound, "meets the Brill–Noether bound");
        BrillNoetherOutcome::Meets { gonality }
    }
}

/// Outcome of comparing a graph with one of its subdivisions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubdivisionReport {
    pub parts: usize,
    pub bound: i64,
    /// Gonality of the graph itself.
    pub gonality: Gonality,
    /// Gonality of the subdivision.  Only computed by
    /// [`check_subdivision_extended`].
    pub subdivided: Option<Gonality>,
    /// A positive rank divisor on the subdivision of degree one less than
    /// the gonality of the graph.  Only searched for by
    /// [`check_subdivision_fast`].
    pub smaller_divisor: Option<Divisor>,
    /// The witness for the graph's gonality extended by zeros to the new
    /// vertices, if it has positive rank on the subdivision as well.
    pub padded_witness: Option<Divisor>,
}

impl SubdivisionReport {
    pub fn is_counterexample(&self) -> bool {
        let degree = self.gonality.degree;
        i64::from(degree) > self.bound
            || self.smaller_divisor.is_some()
            || self.subdivided.as_ref().map_or(false, |subdivided| {
                subdivided.degree != degree || i64::from(subdivided.degree) > self.bound
            })
    }
}

/// Computes the gonality of both the graph and its `parts`-th subdivision.
pub fn check_subdivision_extended(
    graph: &Graph,
    parts: usize,
    config: &GonalityConfig,
) -> Result<SubdivisionReport, GraphError> {
    let subdivision = subdivide(graph, parts, config)?;
    let gonality = find_gonality_with(graph, config);
    let subdivided = find_gonality_with(&subdivision, config);
    let report = SubdivisionReport {
        parts,
        bound: brill_noether_bound(graph),
        gonality,
        subdivided: Some(subdivided),
        smaller_divisor: None,
        padded_witness: None,
    };
    tracing::debug!(
        parts,
        gonality = report.gonality.degree,
        counterexample = report.is_counterexample(),
        "compared gonality with the subdivision"
    );
    Ok(report)
}

/// Only looks for a positive rank divisor of degree `gon(G) - 1` on the
/// subdivision instead of computing its gonality.
///
/// When there is none, the witness on the graph padded with zeros is the
/// natural candidate for a divisor of degree `gon(G)` on the subdivision.
/// It is only reported after the rank oracle confirms it.
pub fn check_subdivision_fast(
    graph: &Graph,
    parts: usize,
    config: &GonalityConfig,
) -> Result<SubdivisionReport, GraphError> {
    let subdivision = subdivide(graph, parts, config)?;
    let gonality = find_gonality_with(graph, config);
    let smaller_degree = gonality.degree - 1;
    let smaller_divisor = if config.parallel {
        find_positive_rank_divisor_parallel(&subdivision, smaller_degree)
    } else {
        find_positive_rank_divisor(&subdivision, smaller_degree)
    };

    let padded_witness = if smaller_divisor.is_none() {
        let padded = gonality.witness.padded(subdivision.get_vertex_count());
        if ChipFiringEngine::new(&subdivision).has_positive_rank(&padded) {
            Some(padded)
        } else {
            tracing::debug!(%padded, "padded witness has rank 0 on the subdivision");
            None
        }
    } else {
        None
    };

    let report = SubdivisionReport {
        parts,
        bound: brill_noether_bound(graph),
        gonality,
        subdivided: None,
        smaller_divisor,
        padded_witness,
    };
    tracing::debug!(
        parts,
        gonality = report.gonality.degree,
        counterexample = report.is_counterexample(),
        "looked for a smaller divisor on the subdivision"
    );
    Ok(report)
}
