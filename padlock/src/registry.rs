// padlock/src/registry.rs
//
// Named environment specs so generic driver code can build an environment
// from an id and a seed.

use crate::env::{Action, Env, EnvError, Info, LockConfig, Observation, PadlockEnv, TimeLimit};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};
use tracing::debug;

/// Id of the reference `4 × 4` padlock.
pub const PADLOCK_V0: &str = "Padlock-v0";

pub type BoxedEnv = Box<dyn Env<Obs = Observation, Act = Action, Info = Info>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvSpec {
    pub id: String,
    #[serde(default)]
    pub config: LockConfig,
    /// Wrap the environment in a [`TimeLimit`] when set.
    #[serde(default)]
    pub max_episode_steps: Option<u64>,
}

impl EnvSpec {
    pub fn new(id: impl Into<String>, config: LockConfig) -> Self {
        Self {
            id: id.into(),
            config,
            max_episode_steps: None,
        }
    }

    pub fn with_max_episode_steps(mut self, max_episode_steps: u64) -> Self {
        self.max_episode_steps = Some(max_episode_steps);
        self
    }

    pub fn make(&self, seed: Option<u64>) -> Result<BoxedEnv, EnvError> {
        let env = PadlockEnv::with_config(self.config, seed)?;
        let env: BoxedEnv = match self.max_episode_steps {
            Some(limit) => Box::new(TimeLimit::new(env, limit)),
            None => Box::new(env),
        };
        Ok(env)
    }
}

static REGISTRY: OnceLock<RwLock<HashMap<String, EnvSpec>>> = OnceLock::new();

fn registry() -> &'static RwLock<HashMap<String, EnvSpec>> {
    REGISTRY.get_or_init(|| {
        let builtin = EnvSpec::new(PADLOCK_V0, LockConfig::default());
        RwLock::new(HashMap::from([(builtin.id.clone(), builtin)]))
    })
}

/// Register a new spec. Ids are unique; the config is validated up front so
/// `make` cannot fail on it later.
pub fn register(spec: EnvSpec) -> Result<(), EnvError> {
    spec.config.validate()?;
    let mut specs = registry().write().unwrap_or_else(PoisonError::into_inner);
    if specs.contains_key(&spec.id) {
        return Err(EnvError::DuplicateEnv(spec.id));
    }
    debug!(id = %spec.id, config = ?spec.config, "registered environment");
    specs.insert(spec.id.clone(), spec);
    Ok(())
}

pub fn spec(id: &str) -> Result<EnvSpec, EnvError> {
    registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(id)
        .cloned()
        .ok_or_else(|| EnvError::UnknownEnv(id.to_string()))
}

/// Build a registered environment by id.
pub fn make(id: &str, seed: Option<u64>) -> Result<BoxedEnv, EnvError> {
    spec(id)?.make(seed)
}

pub fn registered_ids() -> Vec<String> {
    let mut ids: Vec<String> = registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .keys()
        .cloned()
        .collect();
    ids.sort();
    ids
}
