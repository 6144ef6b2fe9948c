use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Auxiliary information returned by `reset` and `step`. The padlock always
/// returns an empty map.
pub type Info = serde_json::Map<String, serde_json::Value>;

/// Extra reset options. No key is recognised yet.
pub type ResetOptions = serde_json::Map<String, serde_json::Value>;

/// `(observation, reward, terminated, truncated, info)`
pub type StepResult<O, I> = (O, f32, bool, bool, I);

/// Turn disc `disc` to `symbol`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub disc: usize,
    pub symbol: usize,
}

impl Action {
    pub fn new(disc: usize, symbol: usize) -> Self {
        Self { disc, symbol }
    }
}

impl From<(usize, usize)> for Action {
    fn from((disc, symbol): (usize, usize)) -> Self {
        Self { disc, symbol }
    }
}

impl From<[usize; 2]> for Action {
    fn from([disc, symbol]: [usize; 2]) -> Self {
        Self { disc, symbol }
    }
}

/// One row of an observation: the symbol shown on a disc and whether it
/// matches the hidden combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscReading {
    pub symbol: usize,
    pub correct: bool,
}

/// The visible combination paired, disc by disc, with its feedback mask.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    discs: Vec<DiscReading>,
}

impl Observation {
    pub(crate) fn new(combination: &[usize], mask: &[bool]) -> Self {
        debug_assert_eq!(combination.len(), mask.len());
        let discs = combination
            .iter()
            .zip(mask)
            .map(|(&symbol, &correct)| DiscReading { symbol, correct })
            .collect();
        Self { discs }
    }

    pub fn discs(&self) -> &[DiscReading] {
        &self.discs
    }

    pub fn len(&self) -> usize {
        self.discs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.discs.is_empty()
    }

    pub fn symbols(&self) -> Vec<usize> {
        self.discs.iter().map(|d| d.symbol).collect()
    }

    pub fn mask(&self) -> Vec<bool> {
        self.discs.iter().map(|d| d.correct).collect()
    }

    /// True when every disc shows the right symbol.
    pub fn is_solved(&self) -> bool {
        self.discs.iter().all(|d| d.correct)
    }

    /// The `D × 2` matrix form `[[symbol, correct as 0/1], ...]`.
    pub fn to_rows(&self) -> Vec<[i64; 2]> {
        self.discs
            .iter()
            .map(|d| [d.symbol as i64, i64::from(d.correct)])
            .collect()
    }
}

/// One transition. `obs` is the observation `act` was chosen from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrajectoryStep<O, A> {
    pub obs: O,
    pub act: A,
    pub rew: f32,
    pub terminated: bool,
    pub truncated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trajectory<O, A> {
    pub id: Uuid,
    pub seed: Option<u64>,
    pub steps: Vec<TrajectoryStep<O, A>>,
    /// Observation after the last step.
    pub final_obs: O,
}
