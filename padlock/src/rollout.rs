// padlock/src/rollout.rs
use crate::env::{Action, ActionSpace, Env, EnvError, Observation, Trajectory, TrajectoryStep};
use futures::future::join_all;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Chooses the next action from the latest observation.
pub trait Policy<O, A>: Send {
    fn act(&mut self, obs: &O) -> A;
}

/// Uniformly random disc and symbol, from its own seeded RNG.
#[derive(Debug)]
pub struct RandomPolicy {
    space: ActionSpace,
    rng: ChaCha8Rng,
}

impl RandomPolicy {
    pub fn new(space: ActionSpace, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { space, rng }
    }
}

impl Policy<Observation, Action> for RandomPolicy {
    fn act(&mut self, _obs: &Observation) -> Action {
        self.space.sample(&mut self.rng)
    }
}

#[derive(Debug, Clone)]
pub struct RolloutConfig {
    /// Give up after this many steps. The episode is then reported as
    /// truncated.
    pub max_steps: Option<u64>,
    pub record_trajectory: bool,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            max_steps: Some(10_000),
            record_trajectory: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeStats<O, A> {
    pub id: Uuid,
    pub seed: Option<u64>,
    pub steps: u64,
    pub total_reward: f32,
    pub terminated: bool,
    pub truncated: bool,
    pub trajectory: Option<Trajectory<O, A>>,
}

// The basic RL loop
pub fn run_episode<E, P>(
    env: &mut E,
    policy: &mut P,
    seed: Option<u64>,
    cfg: &RolloutConfig,
) -> Result<EpisodeStats<E::Obs, E::Act>, EnvError>
where
    E: Env + ?Sized,
    P: Policy<E::Obs, E::Act> + ?Sized,
{
    let id = Uuid::new_v4();
    let (mut obs, _) = env.reset(seed, None)?;
    let mut recorded = Vec::new();

    let mut steps = 0;
    let mut total_reward = 0.0;
    let mut terminated = false;
    let mut truncated = false;

    while !(terminated || truncated) {
        if cfg.max_steps.is_some_and(|max| steps >= max) {
            truncated = true;
            break;
        }

        let act = policy.act(&obs);
        let (next_obs, reward, term, trunc, _) = env.step(act.clone())?;
        steps += 1;
        total_reward += reward;
        terminated = term;
        truncated = trunc;

        if cfg.record_trajectory {
            recorded.push(TrajectoryStep {
                obs,
                act,
                rew: reward,
                terminated,
                truncated,
            });
        }
        obs = next_obs;
    }

    info!(%id, ?seed, steps, total_reward, terminated, "episode finished");

    let trajectory = cfg.record_trajectory.then(|| Trajectory {
        id,
        seed,
        steps: recorded,
        final_obs: obs,
    });

    Ok(EpisodeStats {
        id,
        seed,
        steps,
        total_reward,
        terminated,
        truncated,
        trajectory,
    })
}

/// Run one episode per seed on tokio's blocking pool. Each episode gets a
/// fresh environment and a policy built from its seed; results come back in
/// seed order.
pub async fn run_episodes<E, P, FE, FP>(
    make_env: FE,
    make_policy: FP,
    seeds: Vec<u64>,
    cfg: RolloutConfig,
) -> Result<Vec<EpisodeStats<E::Obs, E::Act>>, EnvError>
where
    E: Env + 'static,
    P: Policy<E::Obs, E::Act> + 'static,
    FE: Fn() -> E,
    FP: Fn(u64) -> P,
{
    let handles: Vec<_> = seeds
        .into_iter()
        .map(|seed| {
            let mut env = make_env();
            let mut policy = make_policy(seed);
            let cfg = cfg.clone();
            tokio::task::spawn_blocking(move || {
                run_episode(&mut env, &mut policy, Some(seed), &cfg)
            })
        })
        .collect();

    join_all(handles)
        .await
        .into_iter()
        .map(|joined| match joined {
            Ok(episode) => episode,
            Err(e) => Err(EnvError::Other(Box::new(e))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{LockConfig, PadlockEnv, TimeLimit};

    /// Walks the first wrong disc through the symbols until the mask flips.
    struct Sweep {
        n_symbols: usize,
    }

    impl Policy<Observation, Action> for Sweep {
        fn act(&mut self, obs: &Observation) -> Action {
            let (disc, reading) = obs
                .discs()
                .iter()
                .enumerate()
                .find(|(_, d)| !d.correct)
                .expect("act called on an open lock");
            Action::new(disc, (reading.symbol + 1) % self.n_symbols)
        }
    }

    #[test]
    fn test_sweep_opens_the_lock() {
        // Arrange
        let mut env = PadlockEnv::new(None);
        let mut policy = Sweep { n_symbols: 4 };
        let cfg = RolloutConfig {
            max_steps: None,
            record_trajectory: true,
        };

        // Act
        let stats = run_episode(&mut env, &mut policy, Some(3), &cfg).unwrap();

        // Assert
        assert!(stats.terminated);
        assert!(!stats.truncated);
        assert!(stats.steps >= 1 && stats.steps <= 12);
        assert_eq!(stats.total_reward, -(stats.steps as f32));
        let trajectory = stats.trajectory.unwrap();
        assert_eq!(trajectory.id, stats.id);
        assert_eq!(trajectory.steps.len() as u64, stats.steps);
        assert!(trajectory.final_obs.is_solved());
        assert!(trajectory.steps.last().unwrap().terminated);
    }

    #[test]
    fn test_max_steps_truncates() {
        let mut env = PadlockEnv::with_config(LockConfig::new(8, 8), None).unwrap();
        let mut policy = RandomPolicy::new(env.action_space(), Some(0));
        let cfg = RolloutConfig {
            max_steps: Some(5),
            record_trajectory: false,
        };

        let stats = run_episode(&mut env, &mut policy, Some(0), &cfg).unwrap();

        assert!(stats.steps <= 5);
        if !stats.terminated {
            assert!(stats.truncated);
            assert_eq!(stats.steps, 5);
        }
        assert!(stats.trajectory.is_none());
    }

    #[test]
    fn test_time_limit_truncation_ends_the_episode() {
        let inner = PadlockEnv::with_config(LockConfig::new(8, 8), None).unwrap();
        let mut env = TimeLimit::new(inner, 2);
        let mut policy = RandomPolicy::new(ActionSpace::new(8, 8), Some(1));

        let stats =
            run_episode(&mut env, &mut policy, Some(1), &RolloutConfig::default()).unwrap();

        assert!(stats.steps <= 2);
        assert!(stats.terminated || stats.truncated);
    }

    #[tokio::test]
    async fn test_run_episodes_is_reproducible() {
        let seeds = vec![0, 1, 2, 3];
        let cfg = RolloutConfig {
            max_steps: Some(2_000),
            record_trajectory: true,
        };
        let make_env = || PadlockEnv::new(None);
        let make_policy = |seed| RandomPolicy::new(ActionSpace::new(4, 4), Some(seed));

        let first = run_episodes(make_env, make_policy, seeds.clone(), cfg.clone())
            .await
            .unwrap();
        let second = run_episodes(make_env, make_policy, seeds.clone(), cfg)
            .await
            .unwrap();

        assert_eq!(first.len(), seeds.len());
        for ((a, b), seed) in first.iter().zip(&second).zip(&seeds) {
            assert_eq!(a.seed, Some(*seed));
            assert_eq!(a.steps, b.steps);
            assert_eq!(a.total_reward, b.total_reward);
            assert_eq!(a.terminated, b.terminated);
            let (ta, tb) = (a.trajectory.as_ref().unwrap(), b.trajectory.as_ref().unwrap());
            assert_eq!(ta.final_obs, tb.final_obs);
            assert_ne!(a.id, b.id);
        }
    }

    #[tokio::test]
    async fn test_run_episodes_with_sweep_all_terminate() {
        let stats = run_episodes(
            || PadlockEnv::new(None),
            |_| Sweep { n_symbols: 4 },
            (10..20).collect(),
            RolloutConfig::default(),
        )
        .await
        .unwrap();

        assert_eq!(stats.len(), 10);
        assert!(stats.iter().all(|s| s.terminated && s.steps <= 12));
    }
}
