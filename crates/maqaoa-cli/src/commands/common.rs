//! Shared helpers for CLI commands.

use anyhow::{Result, bail};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use maqaoa_adapter_sim::SimulatorBackend;
use maqaoa_core::QaoaConfig;
use maqaoa_hal::{ExecutorConfig, ExecutorFactory};

/// Create the executor named by `config.backend`, seeded from `config.seed`.
pub fn create_executor(config: &QaoaConfig) -> Result<SimulatorBackend> {
    let mut executor_config = ExecutorConfig::new(&config.backend);
    if let Some(seed) = config.seed {
        executor_config = executor_config.with_extra("seed", serde_json::json!(seed));
    }

    match config.backend.to_lowercase().as_str() {
        "simulator" => Ok(SimulatorBackend::from_config(executor_config)?),
        other => bail!("Unknown backend: '{other}'. Available: simulator"),
    }
}

/// Progress bar over minimizer iterations.
pub fn create_progress_bar(len: u64, message: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )?
        .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    Ok(pb)
}

/// Print a banner.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a section heading.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a labelled value.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use maqaoa_hal::Executor;

    #[test]
    fn test_create_simulator() {
        let executor = create_executor(&QaoaConfig::default()).unwrap();
        assert_eq!(executor.name(), "simulator");
        assert!(executor.capabilities().is_simulator);
    }

    #[test]
    fn test_unknown_backend() {
        let config = QaoaConfig {
            backend: "ibm_torino".into(),
            ..Default::default()
        };
        assert!(create_executor(&config).is_err());
    }

    #[test]
    fn test_progress_bar_template() {
        let pb = create_progress_bar(10, "COBYLA").unwrap();
        assert_eq!(pb.length(), Some(10));
    }
}
