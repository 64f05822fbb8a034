//! Multi-Angle QAOA Command-Line Interface
//!
//! Optimizes the per-node and per-edge angles of a QAOA circuit for one of
//! the catalog MaxCut instances.
//!
//! ```text
//! maqaoa run --idx 3 -p 2 --method nelder-mead --diagnostics
//! maqaoa inspect --idx 0
//! maqaoa catalog
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{RunArgs, catalog, inspect, run, version};

/// maqaoa - multi-angle QAOA for MaxCut
#[derive(Parser)]
#[command(name = "maqaoa")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Optimize the angles for a catalog instance
    Run(RunArgs),

    /// Build an instance and print its graph, angles and circuit
    Inspect(RunArgs),

    /// List the graph catalog
    Catalog,

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Run(args) => run::execute(&args),
        Commands::Inspect(args) => inspect::execute(&args),
        Commands::Catalog => catalog::execute(),
        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_run_defaults_leave_config_untouched() {
        let cli = parse(&["maqaoa", "run"]);
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert!(args.config.is_none());
        assert!(args.p.is_none());
        assert!(args.idx.is_none());
        assert!(args.method.is_none());
        assert!(!args.diagnostics);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_run_overrides() {
        let cli = parse(&[
            "maqaoa", "run", "-p", "3", "--idx", "7", "--seed", "9", "--method", "spsa",
            "--shots", "256", "--maxiter", "40", "--tol", "1e-4", "--diagnostics", "-vv",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.p, Some(3));
        assert_eq!(args.idx, Some(7));
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.method.as_deref(), Some("spsa"));
        assert_eq!(args.shots, Some(256));
        assert_eq!(args.maxiter, Some(40));
        assert_eq!(args.tol, Some(1e-4));
        assert!(args.diagnostics);
    }

    #[test]
    fn test_seed_and_no_seed_conflict() {
        assert!(Cli::try_parse_from(["maqaoa", "run", "--seed", "1", "--no-seed"]).is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["maqaoa"]).is_err());
    }

    #[test]
    fn test_catalog_and_version_parse() {
        assert!(matches!(parse(&["maqaoa", "catalog"]).command, Commands::Catalog));
        assert!(matches!(parse(&["maqaoa", "version"]).command, Commands::Version));
    }
}
