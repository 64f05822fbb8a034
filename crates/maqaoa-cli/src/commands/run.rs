//! Run command implementation.

use anyhow::Result;
use console::style;
use indicatif::ProgressBar;
use tracing::info;

use maqaoa_core::diagnostics::format_angles;
use maqaoa_core::{AngleInit, AnsatzReport, IterationReport, MaQaoa, OptimizationDriver, catalog};

use super::RunArgs;
use super::common::{
    create_executor, create_progress_bar, print_header, print_result, print_section,
    print_success,
};

/// Execute the run command.
pub fn execute(args: &RunArgs) -> Result<()> {
    let config = args.resolve()?;
    let method = config.method_kind()?;
    let graph = catalog::instance(config.idx)?;

    print_header("Multi-Angle QAOA Max-Cut");

    print_section("Problem Setup");
    print_result("Instance", format!("{} (idx {})", graph.name(), config.idx));
    print_result("Nodes", graph.num_nodes());
    print_result("Edges", graph.num_edges());
    print_result("QAOA layers (p)", config.p);
    print_result(
        "Angles",
        config.p * (graph.num_nodes() + graph.num_edges()),
    );
    print_result("Method", method);
    print_result("Shots", config.shots);
    print_result("Max iterations", config.maxiter);
    print_result(
        "Seed",
        config
            .seed
            .map_or_else(|| "unset".to_string(), |s| s.to_string()),
    );

    let qaoa = MaQaoa::new(
        graph,
        config.p,
        AngleInit::Generated { seed: config.seed },
        true,
    )?;
    if config.verbose {
        print_section("Diagnostics");
        AnsatzReport::new(&qaoa).print();
    }

    let mut executor = create_executor(&config)?;
    let mut driver = OptimizationDriver::new(method, config.seed)
        .with_maxiter(config.maxiter)
        .with_tol(config.tol)
        .with_shots(config.shots);

    print_section("Optimization");
    let pb = if config.verbose {
        create_progress_bar(config.maxiter as u64, &method.to_string())?
    } else {
        ProgressBar::hidden()
    };

    let outcome = driver.optimize_from(
        &qaoa,
        &mut executor,
        &qaoa.initial_point(),
        &mut |report: &IterationReport| {
            pb.set_position(report.iteration as u64);
            pb.set_message(format!("cut {:.4}", -report.value));
        },
    )?;
    pb.finish_and_clear();
    info!(iterations = driver.iterations(), "driver finished");

    print_result("Initial expected cut", format!("{:.4}", outcome.initial_value));
    print_result("Best expected cut", format!("{:.4}", outcome.best_value));
    print_result("Evaluations", outcome.evaluations);
    print_result("Iterations", outcome.iterations);
    print_result(
        "Converged",
        if outcome.converged {
            style("yes").green()
        } else {
            style("no").yellow()
        },
    );
    print_result("Betas", format_angles(&outcome.betas));
    print_result("Gammas", format_angles(&outcome.gammas));

    print_section("Results");
    let sampled = driver.sample_best_cut(&qaoa, &mut executor, &outcome.best_angles)?;
    let graph = qaoa.graph();
    let (exact_assignment, exact_cut) = graph.max_cut_brute_force()?;
    let (s, t) = graph.bitstring_to_partition(sampled.assignment);
    let (exact_s, exact_t) = graph.bitstring_to_partition(exact_assignment);

    print_result(
        "Best sampled",
        format!(
            "{} ({}/{} shots)",
            style(&sampled.bitstring).cyan(),
            sampled.count,
            sampled.shots
        ),
    );
    print_result("Sampled cut", format!("{:.4}", sampled.cut_value));
    print_result("Sampled partition", format!("{s:?} | {t:?}"));
    print_result("Optimal cut (exact)", format!("{exact_cut:.4}"));
    print_result("Optimal partition", format!("{exact_s:?} | {exact_t:?}"));

    let ratio = if exact_cut > 0.0 {
        outcome.best_value / exact_cut
    } else {
        1.0
    };
    print_result("Approximation ratio", format!("{ratio:.4}"));

    println!();
    if sampled.cut_value >= exact_cut {
        print_success("Sampled an optimal cut");
    } else {
        print_success("Optimization complete");
    }

    Ok(())
}
