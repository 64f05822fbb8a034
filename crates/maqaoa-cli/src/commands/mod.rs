//! CLI command implementations.

pub mod catalog;
pub mod common;
pub mod inspect;
pub mod run;
pub mod version;

use anyhow::{Context, Result};
use clap::Args;

use maqaoa_core::QaoaConfig;

/// Options shared by `run` and `inspect`. Each flag overrides the
/// configuration file and `MAQAOA_*` variables.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// YAML configuration file
    #[arg(short, long, env = "MAQAOA_CONFIG")]
    pub config: Option<String>,

    /// Number of QAOA layers
    #[arg(short = 'p', long = "layers")]
    pub p: Option<usize>,

    /// Catalog index of the graph (0-15)
    #[arg(short, long)]
    pub idx: Option<usize>,

    /// Seed for angles, sampling and stochastic minimizers
    #[arg(long, conflicts_with = "no_seed")]
    pub seed: Option<u64>,

    /// Draw angles and samples from OS entropy
    #[arg(long)]
    pub no_seed: bool,

    /// Optimization method (COBYLA, Nelder-Mead, L-BFGS-B, SPSA)
    #[arg(short, long)]
    pub method: Option<String>,

    /// Shots per objective evaluation
    #[arg(short, long)]
    pub shots: Option<u32>,

    /// Minimizer iteration cap
    #[arg(long)]
    pub maxiter: Option<usize>,

    /// Minimizer tolerance
    #[arg(long)]
    pub tol: Option<f64>,

    /// Executor to run circuits on
    #[arg(short, long)]
    pub backend: Option<String>,

    /// Print the graph, angles and circuit, and show progress
    #[arg(short, long)]
    pub diagnostics: bool,
}

impl RunArgs {
    /// Load the configuration and apply the flags on top.
    pub fn resolve(&self) -> Result<QaoaConfig> {
        let config = QaoaConfig::load(self.config.as_deref())
            .context("Failed to load configuration")?;
        let config = self.apply(config);
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    fn apply(&self, mut config: QaoaConfig) -> QaoaConfig {
        if let Some(p) = self.p {
            config.p = p;
        }
        if let Some(idx) = self.idx {
            config.idx = idx;
        }
        if self.no_seed {
            config.seed = None;
        } else if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(method) = &self.method {
            config.method.clone_from(method);
        }
        if let Some(shots) = self.shots {
            config.shots = shots;
        }
        if let Some(maxiter) = self.maxiter {
            config.maxiter = maxiter;
        }
        if let Some(tol) = self.tol {
            config.tol = tol;
        }
        if let Some(backend) = &self.backend {
            config.backend.clone_from(backend);
        }
        if self.diagnostics {
            config.verbose = true;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "p: 2\nidx: 4\nmethod: SPSA\nshots: 64").unwrap();

        let args = RunArgs {
            config: file.path().to_str().map(String::from),
            idx: Some(9),
            method: Some("nelder-mead".into()),
            ..Default::default()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.p, 2);
        assert_eq!(config.idx, 9);
        assert_eq!(config.method, "nelder-mead");
        assert_eq!(config.shots, 64);
    }

    #[test]
    fn test_no_seed_clears_seed() {
        let args = RunArgs {
            no_seed: true,
            ..Default::default()
        };
        assert_eq!(args.apply(QaoaConfig::default()).seed, None);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let args = RunArgs {
            idx: Some(16),
            ..Default::default()
        };
        assert!(args.resolve().is_err());

        let args = RunArgs {
            method: Some("powell".into()),
            ..Default::default()
        };
        assert!(args.resolve().is_err());
    }

    #[test]
    fn test_flags_fix_invalid_file_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "method: powell\np: 0").unwrap();

        let args = RunArgs {
            config: file.path().to_str().map(String::from),
            method: Some("cobyla".into()),
            p: Some(3),
            ..Default::default()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.method, "cobyla");
        assert_eq!(config.p, 3);
    }

    #[test]
    fn test_diagnostics_sets_verbose() {
        let args = RunArgs {
            diagnostics: true,
            ..Default::default()
        };
        assert!(args.apply(QaoaConfig::default()).verbose);
    }
}
