//! Run configuration.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with MAQAOA_ prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::CATALOG_SIZE;
use crate::error::ConfigError;
use crate::minimizer::Method;

/// Executor names accepted in `backend`.
pub const BACKENDS: &[&str] = &["simulator"];

/// Settings for one multi-angle QAOA run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaoaConfig {
    /// Number of QAOA layers.
    #[serde(default = "default_p")]
    pub p: usize,

    /// Catalog index of the graph instance (0..=15).
    #[serde(default)]
    pub idx: usize,

    /// Seed for angle generation, shot sampling and stochastic minimizers.
    #[serde(default = "default_seed")]
    pub seed: Option<u64>,

    /// Print diagnostics and progress.
    #[serde(default)]
    pub verbose: bool,

    /// Executor selection.
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Optimization method name, e.g. "COBYLA" or "L-BFGS-B".
    #[serde(default = "default_method")]
    pub method: String,

    /// Shots per objective evaluation.
    #[serde(default = "default_shots")]
    pub shots: u32,

    /// Minimizer iteration cap.
    #[serde(default = "default_maxiter")]
    pub maxiter: usize,

    /// Minimizer tolerance.
    #[serde(default = "default_tol")]
    pub tol: f64,
}

fn default_p() -> usize {
    1
}

fn default_seed() -> Option<u64> {
    Some(121)
}

fn default_backend() -> String {
    "simulator".to_string()
}

fn default_method() -> String {
    "COBYLA".to_string()
}

fn default_shots() -> u32 {
    1024
}

fn default_maxiter() -> usize {
    100
}

fn default_tol() -> f64 {
    1e-6
}

impl Default for QaoaConfig {
    fn default() -> Self {
        Self {
            p: default_p(),
            idx: 0,
            seed: default_seed(),
            verbose: false,
            backend: default_backend(),
            method: default_method(),
            shots: default_shots(),
            maxiter: default_maxiter(),
            tol: default_tol(),
        }
    }
}

impl QaoaConfig {
    /// Load and validate a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::read_file(path)?;
        config.validate()?;
        Ok(config)
    }

    fn read_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_yaml_ng::from_str(&contents)?)
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    ///
    /// The result is not validated, so callers can layer further
    /// overrides (command-line flags) first and then call
    /// [`validate`](Self::validate) once.
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::read_file(path)?,
            None => QaoaConfig::default(),
        };
        Ok(config.merge_env())
    }

    /// Merge environment variables into this configuration.
    ///
    /// Only variables that are set and parse override the current values.
    /// `MAQAOA_SEED=none` clears the seed.
    pub fn merge_env(mut self) -> Self {
        if let Ok(v) = std::env::var("MAQAOA_P") {
            if let Ok(val) = v.parse() {
                self.p = val;
            }
        }
        if let Ok(v) = std::env::var("MAQAOA_IDX") {
            if let Ok(val) = v.parse() {
                self.idx = val;
            }
        }
        if let Ok(v) = std::env::var("MAQAOA_SEED") {
            if v.eq_ignore_ascii_case("none") {
                self.seed = None;
            } else if let Ok(val) = v.parse() {
                self.seed = Some(val);
            }
        }
        if let Ok(v) = std::env::var("MAQAOA_VERBOSE") {
            if let Ok(val) = v.parse() {
                self.verbose = val;
            }
        }
        if let Ok(v) = std::env::var("MAQAOA_BACKEND") {
            self.backend = v;
        }
        if let Ok(v) = std::env::var("MAQAOA_METHOD") {
            self.method = v;
        }
        if let Ok(v) = std::env::var("MAQAOA_SHOTS") {
            if let Ok(val) = v.parse() {
                self.shots = val;
            }
        }
        if let Ok(v) = std::env::var("MAQAOA_MAXITER") {
            if let Ok(val) = v.parse() {
                self.maxiter = val;
            }
        }
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.p == 0 {
            return Err(ConfigError::ValidationError(
                "p must be at least 1".to_string(),
            ));
        }
        if self.idx >= CATALOG_SIZE {
            return Err(ConfigError::ValidationError(format!(
                "idx must be between 0 and {}, got {}",
                CATALOG_SIZE - 1,
                self.idx
            )));
        }
        if self.shots == 0 {
            return Err(ConfigError::ValidationError(
                "shots must be at least 1".to_string(),
            ));
        }
        if !(self.tol.is_finite() && self.tol >= 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "tol must be a non-negative number, got {}",
                self.tol
            )));
        }
        if !BACKENDS.contains(&self.backend.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "Unknown backend: {}",
                self.backend
            )));
        }
        self.method_kind()?;
        Ok(())
    }

    /// The parsed optimization method.
    pub fn method_kind(&self) -> Result<Method, ConfigError> {
        self.method
            .parse()
            .map_err(|e: crate::error::QaoaError| ConfigError::ValidationError(e.to_string()))
    }
}
