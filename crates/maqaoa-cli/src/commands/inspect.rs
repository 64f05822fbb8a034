//! Inspect command implementation.

use anyhow::Result;
use console::style;

use maqaoa_core::{AngleInit, AnsatzReport, MaQaoa, catalog};

use super::RunArgs;
use super::common::print_header;

/// Build the configured instance and print its diagnostics.
///
/// The template is built without measurements, as it is never executed.
pub fn execute(args: &RunArgs) -> Result<()> {
    let config = args.resolve()?;
    let graph = catalog::instance(config.idx)?;

    print_header(&format!("Instance {} (idx {})", graph.name(), config.idx));

    let qaoa = MaQaoa::new(
        graph,
        config.p,
        AngleInit::Generated { seed: config.seed },
        false,
    )?;
    AnsatzReport::new(&qaoa).print();

    let (assignment, cut) = qaoa.graph().max_cut_brute_force()?;
    let (s, t) = qaoa.graph().bitstring_to_partition(assignment);
    println!();
    println!(
        "{} optimal cut {:.4}: {:?} | {:?}",
        style("ℹ").blue(),
        cut,
        s,
        t
    );
    Ok(())
}
