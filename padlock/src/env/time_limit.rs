use super::{Env, EnvError, ResetOptions, StepResult};

/// Truncates episodes of the wrapped environment after `max_episode_steps`
/// steps. Termination takes precedence: a step that both solves and hits
/// the limit reports `terminated = true, truncated = false`.
#[derive(Debug)]
pub struct TimeLimit<E> {
    env: E,
    max_episode_steps: u64,
    elapsed_steps: Option<u64>,
}

impl<E: Env> TimeLimit<E> {
    pub fn new(env: E, max_episode_steps: u64) -> Self {
        Self {
            env,
            max_episode_steps,
            elapsed_steps: None,
        }
    }

    pub fn max_episode_steps(&self) -> u64 {
        self.max_episode_steps
    }

    /// Steps taken since the last reset, `None` before the first one.
    pub fn elapsed_steps(&self) -> Option<u64> {
        self.elapsed_steps
    }

    pub fn inner(&self) -> &E {
        &self.env
    }

    pub fn into_inner(self) -> E {
        self.env
    }
}

impl<E: Env> Env for TimeLimit<E> {
    type Obs = E::Obs;
    type Act = E::Act;
    type Info = E::Info;

    fn reset(
        &mut self,
        seed: Option<u64>,
        options: Option<&ResetOptions>,
    ) -> Result<(Self::Obs, Self::Info), EnvError> {
        let out = self.env.reset(seed, options)?;
        self.elapsed_steps = Some(0);
        Ok(out)
    }

    fn step(&mut self, act: Self::Act) -> Result<StepResult<Self::Obs, Self::Info>, EnvError> {
        let elapsed = self.elapsed_steps.ok_or(EnvError::NotInitialized)?;
        let (obs, reward, terminated, truncated, info) = self.env.step(act)?;

        let elapsed = elapsed + 1;
        self.elapsed_steps = Some(elapsed);
        let truncated = truncated || (!terminated && elapsed >= self.max_episode_steps);

        Ok((obs, reward, terminated, truncated, info))
    }

    fn render(&mut self) -> Result<(), EnvError> {
        self.env.render()
    }

    fn close(&mut self) -> Result<(), EnvError> {
        self.env.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{Action, PadlockEnv};

    #[test]
    fn test_truncates_at_limit() {
        let mut env = TimeLimit::new(PadlockEnv::new(Some(0)), 3);
        env.reset(Some(0), None).unwrap();
        // Re-applying the current symbol never opens an unsolved lock.
        let disc0 = env.inner().combination().unwrap()[0];
        let noop = Action::new(0, disc0);

        let (_, _, _, truncated, _) = env.step(noop).unwrap();
        assert!(!truncated);
        let (_, _, _, truncated, _) = env.step(noop).unwrap();
        assert!(!truncated);
        let (_, reward, terminated, truncated, _) = env.step(noop).unwrap();
        assert!(truncated);
        assert!(!terminated);
        assert_eq!(reward, -1.0);
        assert_eq!(env.elapsed_steps(), Some(3));
    }

    #[test]
    fn test_reset_restarts_the_count() {
        let mut env = TimeLimit::new(PadlockEnv::new(Some(1)), 1);
        env.reset(None, None).unwrap();
        let disc0 = env.inner().combination().unwrap()[0];
        let (.., truncated, _) = env.step(Action::new(0, disc0)).unwrap();
        assert!(truncated);

        env.reset(None, None).unwrap();

        assert_eq!(env.elapsed_steps(), Some(0));
    }

    #[test]
    fn test_step_before_reset_is_rejected() {
        let mut env = TimeLimit::new(PadlockEnv::new(Some(0)), 10);

        assert!(matches!(
            env.step(Action::new(0, 0)),
            Err(EnvError::NotInitialized)
        ));
    }

    #[test]
    fn test_rejected_action_is_not_counted() {
        let mut env = TimeLimit::new(PadlockEnv::new(Some(0)), 10);
        env.reset(None, None).unwrap();

        assert!(env.step(Action::new(9, 0)).is_err());

        assert_eq!(env.elapsed_steps(), Some(0));
    }

    #[test]
    fn test_render_still_unsupported() {
        let mut env = TimeLimit::new(PadlockEnv::new(Some(0)), 10);
        assert!(matches!(env.render(), Err(EnvError::Unsupported(_))));
    }
}
