//! Python extension module for the padlock environment.
//!
//! Build with `--features python` (e.g. through maturin) to get an importable
//! `padlock_env` module; without the feature this crate only re-exports the
//! Rust API.
pub use padlock::*;

#[cfg(feature = "python")]
mod python;
