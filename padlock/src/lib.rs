//! A combination-padlock environment for reinforcement learning.
//!
//! The agent turns one disc at a time and sees, for every disc, whether it
//! shows the hidden symbol. See [`env::PadlockEnv`].
pub mod env;
pub mod registry;
pub mod rollout;

pub use env::{Action, Env, EnvError, LockConfig, Observation, PadlockEnv, TimeLimit, VecEnv};
pub use registry::{EnvSpec, PADLOCK_V0, make, register};
pub use rollout::{Policy, RandomPolicy, RolloutConfig, run_episode, run_episodes};
