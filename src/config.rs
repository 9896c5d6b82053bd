use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Knobs shared by validation, subdivision and the searches.
#[derive(Clone, Debug)]
pub struct GonalityConfig {
    /// Largest graph the engine accepts.  Every scratch buffer is sized by the
    /// graph at hand, this is only a sanity bound on inputs.
    pub max_vertices: usize,
    /// Largest number of edges accepted by the readers.
    pub max_edges: usize,
    /// Largest `k` accepted by [`crate::subdivision::subdivide`].
    pub max_parts_per_edge: usize,
    /// How many times the randomized independent set approximation runs before
    /// falling back to the exhaustive search.
    pub independent_set_trials: usize,
    /// Optional deterministic seed for the approximation.
    pub seed: Option<u64>,
    /// Split the gonality search across the rayon thread pool.
    pub parallel: bool,
}

impl Default for GonalityConfig {
    fn default() -> Self {
        Self {
            max_vertices: 1500,
            max_edges: 100_000,
            max_parts_per_edge: 10,
            independent_set_trials: 15,
            seed: None,
            parallel: false,
        }
    }
}

impl GonalityConfig {
    pub fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        }
    }
}
