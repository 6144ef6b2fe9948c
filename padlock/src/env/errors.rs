use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnvError {
    #[error("disc {disc} is out of range for a lock with {n_discs} discs")]
    DiscOutOfRange { disc: usize, n_discs: usize },

    #[error("symbol {symbol} is out of range for a lock with {n_symbols} symbols")]
    SymbolOutOfRange { symbol: usize, n_symbols: usize },

    #[error("step called before reset")]
    NotInitialized,

    #[error("{0} is not supported by this environment")]
    Unsupported(&'static str),

    #[error("invalid lock configuration: {0}")]
    InvalidConfig(String),

    #[error("no environment registered under id {0:?}")]
    UnknownEnv(String),

    #[error("an environment is already registered under id {0:?}")]
    DuplicateEnv(String),

    #[error("action count {actions} doesn't match environment count {envs}")]
    BatchSizeMismatch { actions: usize, envs: usize },

    #[error("Environment error: {0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl EnvError {
    /// True for caller mistakes: out-of-range actions and stepping an
    /// environment that was never reset.
    pub fn is_precondition_violation(&self) -> bool {
        matches!(
            self,
            EnvError::DiscOutOfRange { .. }
                | EnvError::SymbolOutOfRange { .. }
                | EnvError::NotInitialized
        )
    }
}
