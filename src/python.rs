// src/python.rs
//
// Python bindings for the padlock environment.
//
// Mirrors the Gymnasium API:
// - PadlockEnv(seed=None): reset(*, seed=None, options=None) and step(action)
// - make(id, seed=None): build a registered environment by id
//
// Observations are lists of [symbol, correct] rows.

use pyo3::exceptions::{PyNotImplementedError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use padlock::env::{Info, N_DISCS, N_SYMBOLS, ResetOptions};
use padlock::registry::{self, BoxedEnv};
use padlock::{Action, Env, EnvError, LockConfig, PADLOCK_V0, PadlockEnv as RustPadlockEnv};

type Rows = Vec<[i64; 2]>;

fn to_py_err(err: EnvError) -> PyErr {
    match err {
        EnvError::Unsupported(_) => PyNotImplementedError::new_err(err.to_string()),
        EnvError::NotInitialized => PyRuntimeError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

fn info_to_dict<'py>(py: Python<'py>, info: &Info) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    for (key, value) in info {
        dict.set_item(key, value.to_string())?;
    }
    Ok(dict)
}

/// Options are not interpreted yet; keys are kept so the core can report
/// them.
fn parse_options(options: Option<&Bound<'_, PyDict>>) -> PyResult<Option<ResetOptions>> {
    let Some(options) = options else {
        return Ok(None);
    };
    let mut parsed = ResetOptions::new();
    for (key, value) in options.iter() {
        let key: String = key.extract()?;
        parsed.insert(key, serde_json::Value::String(value.str()?.to_string()));
    }
    Ok(Some(parsed))
}

/// Accepts any two-element iterable of non-negative ints (tuple, list, numpy
/// array).
fn parse_action(action: &Bound<'_, PyAny>) -> PyResult<Action> {
    let values = action
        .try_iter()?
        .map(|item| item?.extract::<usize>())
        .collect::<PyResult<Vec<usize>>>()?;

    match values.as_slice() {
        &[disc, symbol] => Ok(Action::new(disc, symbol)),
        _ => Err(PyValueError::new_err(format!(
            "action must be (disc, symbol), got {} values",
            values.len()
        ))),
    }
}

/// Combination padlock environment.
#[pyclass(name = "PadlockEnv", unsendable)]
pub struct PyPadlockEnv {
    inner: BoxedEnv,
    config: LockConfig,
}

#[pymethods]
impl PyPadlockEnv {
    /// Create a new environment.
    ///
    /// Args:
    ///     seed: Optional seed for the environment's RNG
    ///     n_discs: Number of discs (default: 4)
    ///     n_symbols: Symbols per disc (default: 4)
    #[new]
    #[pyo3(signature = (seed=None, n_discs=N_DISCS, n_symbols=N_SYMBOLS))]
    fn new(seed: Option<u64>, n_discs: usize, n_symbols: usize) -> PyResult<Self> {
        let config = LockConfig::new(n_discs, n_symbols);
        let env = RustPadlockEnv::with_config(config, seed).map_err(to_py_err)?;
        Ok(Self {
            inner: Box::new(env),
            config,
        })
    }

    /// Reset the environment.
    ///
    /// Returns:
    ///     Tuple of (observation, info)
    #[pyo3(signature = (*, seed=None, options=None))]
    fn reset<'py>(
        &mut self,
        py: Python<'py>,
        seed: Option<u64>,
        options: Option<&Bound<'py, PyDict>>,
    ) -> PyResult<(Rows, Bound<'py, PyDict>)> {
        let options = parse_options(options)?;
        let (obs, info) = self
            .inner
            .reset(seed, options.as_ref())
            .map_err(to_py_err)?;
        Ok((obs.to_rows(), info_to_dict(py, &info)?))
    }

    /// Turn one disc.
    ///
    /// Args:
    ///     action: (disc, symbol)
    ///
    /// Returns:
    ///     Tuple of (observation, reward, terminated, truncated, info)
    fn step<'py>(
        &mut self,
        py: Python<'py>,
        action: &Bound<'py, PyAny>,
    ) -> PyResult<(Rows, f32, bool, bool, Bound<'py, PyDict>)> {
        let action = parse_action(action)?;
        let (obs, reward, terminated, truncated, info) =
            self.inner.step(action).map_err(to_py_err)?;
        Ok((
            obs.to_rows(),
            reward,
            terminated,
            truncated,
            info_to_dict(py, &info)?,
        ))
    }

    /// Always raises NotImplementedError.
    fn render(&mut self) -> PyResult<()> {
        self.inner.render().map_err(to_py_err)
    }

    fn close(&mut self) -> PyResult<()> {
        self.inner.close().map_err(to_py_err)
    }

    /// `nvec` of the multi-discrete action space: [n_discs, n_symbols].
    #[getter]
    fn action_space(&self) -> (usize, usize) {
        (self.config.n_discs, self.config.n_symbols)
    }

    /// Shape of the observation: (n_discs, 2).
    #[getter]
    fn observation_space(&self) -> (usize, usize) {
        (self.config.n_discs, 2)
    }
}

/// Build a registered environment, e.g. make("Padlock-v0", seed=0).
#[pyfunction]
#[pyo3(signature = (id, seed=None))]
fn make(id: &str, seed: Option<u64>) -> PyResult<PyPadlockEnv> {
    let spec = registry::spec(id).map_err(to_py_err)?;
    let inner = spec.make(seed).map_err(to_py_err)?;
    Ok(PyPadlockEnv {
        inner,
        config: spec.config,
    })
}

/// A Python module implemented in Rust.
/// The name of this function must match the lib.name in Cargo.toml
#[pymodule]
fn padlock_env(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyPadlockEnv>()?;
    m.add_function(wrap_pyfunction!(make, m)?)?;
    m.add("PADLOCK_V0", PADLOCK_V0)?;
    Ok(())
}
