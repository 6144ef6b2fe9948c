use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::env::errors::EnvError;
use crate::env::space::{ActionSpace, ObservationSpace};
use crate::env::traits::Env;
use crate::env::types::{Action, Info, Observation, ResetOptions, StepResult};

/// Discs on the reference lock.
pub const N_DISCS: usize = 4;
/// Symbols per disc on the reference lock.
pub const N_SYMBOLS: usize = 4;

/// Every step costs the same, solved or not.
pub const STEP_REWARD: f32 = -1.0;

/// Lock dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    pub n_discs: usize,
    pub n_symbols: usize,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            n_discs: N_DISCS,
            n_symbols: N_SYMBOLS,
        }
    }
}

impl LockConfig {
    pub fn new(n_discs: usize, n_symbols: usize) -> Self {
        Self { n_discs, n_symbols }
    }

    pub fn validate(&self) -> Result<(), EnvError> {
        if self.n_discs == 0 {
            return Err(EnvError::InvalidConfig(
                "a lock needs at least one disc".to_string(),
            ));
        }
        // With a single symbol the start would always equal the secret.
        if self.n_symbols < 2 {
            return Err(EnvError::InvalidConfig(format!(
                "a lock needs at least two symbols per disc, got {}",
                self.n_symbols
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct LockState {
    /// Hidden combination, fixed for the episode.
    secret: Vec<usize>,
    /// Combination currently shown to the agent.
    combination: Vec<usize>,
}

impl LockState {
    fn observe(&self) -> Observation {
        Observation::new(&self.combination, &feedback(&self.secret, &self.combination))
    }
}

/// Position-wise equality of `combination` against `secret`.
fn feedback(secret: &[usize], combination: &[usize]) -> Vec<bool> {
    combination
        .iter()
        .zip(secret)
        .map(|(shown, hidden)| shown == hidden)
        .collect()
}

/// A combination padlock the agent opens by trial and error.
///
/// Each action turns one disc to one symbol. The observation pairs every disc
/// with a bit telling whether it already shows the secret symbol. Every step
/// costs [`STEP_REWARD`]; the episode terminates once all discs are right.
/// The environment itself never truncates, see
/// [`TimeLimit`](crate::env::TimeLimit) for a step cap.
#[derive(Debug)]
pub struct PadlockEnv {
    config: LockConfig,
    /// Per-instance RNG, re-seeded by `reset(Some(seed), ..)`.
    rng: ChaCha8Rng,
    /// `None` until the first reset.
    state: Option<LockState>,
}

impl PadlockEnv {
    /// A reference `4 × 4` lock. Without a seed the RNG is seeded from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            config: LockConfig::default(),
            rng: seeded_rng(seed),
            state: None,
        }
    }

    pub fn with_config(config: LockConfig, seed: Option<u64>) -> Result<Self, EnvError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: seeded_rng(seed),
            state: None,
        })
    }

    pub fn config(&self) -> LockConfig {
        self.config
    }

    pub fn action_space(&self) -> ActionSpace {
        ActionSpace::new(self.config.n_discs, self.config.n_symbols)
    }

    pub fn observation_space(&self) -> ObservationSpace {
        ObservationSpace::new(self.config.n_discs, self.config.n_symbols)
    }

    /// The visible combination, or `None` before the first reset.
    pub fn combination(&self) -> Option<&[usize]> {
        self.state.as_ref().map(|s| s.combination.as_slice())
    }

    pub fn is_solved(&self) -> bool {
        self.state
            .as_ref()
            .is_some_and(|s| s.combination == s.secret)
    }

    fn draw_combination(&mut self) -> Vec<usize> {
        (0..self.config.n_discs)
            .map(|_| self.rng.gen_range(0..self.config.n_symbols))
            .collect()
    }

    fn check_action(&self, action: &Action) -> Result<(), EnvError> {
        if action.disc >= self.config.n_discs {
            return Err(EnvError::DiscOutOfRange {
                disc: action.disc,
                n_discs: self.config.n_discs,
            });
        }
        if action.symbol >= self.config.n_symbols {
            return Err(EnvError::SymbolOutOfRange {
                symbol: action.symbol,
                n_symbols: self.config.n_symbols,
            });
        }
        Ok(())
    }
}

fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

impl Env for PadlockEnv {
    type Obs = Observation;
    type Act = Action;
    type Info = Info;

    fn reset(
        &mut self,
        seed: Option<u64>,
        options: Option<&ResetOptions>,
    ) -> Result<(Self::Obs, Self::Info), EnvError> {
        if let Some(seed) = seed {
            self.rng = ChaCha8Rng::seed_from_u64(seed);
        }
        if let Some(options) = options.filter(|o| !o.is_empty()) {
            let keys: Vec<&str> = options.keys().map(String::as_str).collect();
            warn!(?keys, "ignoring unrecognised reset options");
        }

        let secret = self.draw_combination();
        let mut combination = self.draw_combination();
        while combination == secret {
            combination = self.draw_combination();
        }

        debug!(
            ?seed,
            n_discs = self.config.n_discs,
            n_symbols = self.config.n_symbols,
            "padlock reset"
        );

        let state = LockState {
            secret,
            combination,
        };
        let obs = state.observe();
        self.state = Some(state);
        Ok((obs, Info::new()))
    }

    fn step(&mut self, act: Self::Act) -> Result<StepResult<Self::Obs, Self::Info>, EnvError> {
        self.check_action(&act)?;
        let state = self.state.as_mut().ok_or(EnvError::NotInitialized)?;

        state.combination[act.disc] = act.symbol;
        let obs = state.observe();
        let terminated = obs.is_solved();

        trace!(disc = act.disc, symbol = act.symbol, mask = ?obs.mask(), "padlock step");
        if terminated {
            debug!("padlock opened");
        }

        Ok((obs, STEP_REWARD, terminated, false, Info::new()))
    }
}
