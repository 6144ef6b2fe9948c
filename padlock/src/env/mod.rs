// padlock/src/env/mod.rs
mod errors;
mod padlock;
mod space;
mod time_limit;
mod traits;
mod types;
mod vec_env;

pub use errors::EnvError;
pub use padlock::{LockConfig, N_DISCS, N_SYMBOLS, PadlockEnv, STEP_REWARD};
pub use space::{ActionSpace, ObservationSpace};
pub use time_limit::TimeLimit;
pub use traits::Env;
pub use types::{
    Action, DiscReading, Info, Observation, ResetOptions, StepResult, Trajectory, TrajectoryStep,
};
pub use vec_env::VecEnv;
