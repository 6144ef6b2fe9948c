use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::env::types::{Action, Observation};

/// Multi-discrete `[n_discs, n_symbols]` action space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSpace {
    pub n_discs: usize,
    pub n_symbols: usize,
}

impl ActionSpace {
    pub fn new(n_discs: usize, n_symbols: usize) -> Self {
        Self { n_discs, n_symbols }
    }

    pub fn contains(&self, action: &Action) -> bool {
        action.disc < self.n_discs && action.symbol < self.n_symbols
    }

    /// Uniform sample over all `n_discs * n_symbols` actions.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Action {
        Action {
            disc: rng.gen_range(0..self.n_discs),
            symbol: rng.gen_range(0..self.n_symbols),
        }
    }
}

/// `n_discs × 2` box: column 0 is a symbol in `[0, n_symbols)`, column 1 the
/// correctness bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationSpace {
    pub n_discs: usize,
    pub n_symbols: usize,
}

impl ObservationSpace {
    pub fn new(n_discs: usize, n_symbols: usize) -> Self {
        Self { n_discs, n_symbols }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.n_discs, 2)
    }

    pub fn contains(&self, obs: &Observation) -> bool {
        obs.len() == self.n_discs && obs.discs().iter().all(|d| d.symbol < self.n_symbols)
    }
}
