use crate::env::errors::EnvError;
use crate::env::types::{ResetOptions, StepResult};

/// A Gymnasium-style episodic environment.
///
/// `reset` starts (or restarts) an episode and must be called before the first
/// `step`. `step` returns `(observation, reward, terminated, truncated, info)`
/// in that order.
pub trait Env: Send {
    type Obs: Send + Clone + 'static;
    type Act: Send + Clone + 'static;
    type Info: Send + Clone + 'static;

    /// Start a new episode. A `Some` seed re-seeds the environment's own RNG.
    fn reset(
        &mut self,
        seed: Option<u64>,
        options: Option<&ResetOptions>,
    ) -> Result<(Self::Obs, Self::Info), EnvError>;

    fn step(&mut self, act: Self::Act) -> Result<StepResult<Self::Obs, Self::Info>, EnvError>;

    /// Environments without a visual representation report `Unsupported`
    /// instead of silently doing nothing.
    fn render(&mut self) -> Result<(), EnvError> {
        Err(EnvError::Unsupported("render"))
    }

    fn close(&mut self) -> Result<(), EnvError> {
        Ok(())
    }
}

impl<E: Env + ?Sized> Env for Box<E> {
    type Obs = E::Obs;
    type Act = E::Act;
    type Info = E::Info;

    fn reset(
        &mut self,
        seed: Option<u64>,
        options: Option<&ResetOptions>,
    ) -> Result<(Self::Obs, Self::Info), EnvError> {
        (**self).reset(seed, options)
    }

    fn step(&mut self, act: Self::Act) -> Result<StepResult<Self::Obs, Self::Info>, EnvError> {
        (**self).step(act)
    }

    fn render(&mut self) -> Result<(), EnvError> {
        (**self).render()
    }

    fn close(&mut self) -> Result<(), EnvError> {
        (**self).close()
    }
}
