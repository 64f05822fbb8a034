//! Catalog command implementation.

use anyhow::Result;
use console::style;

use maqaoa_core::catalog;

/// List every catalog instance with its size and optimal cut.
pub fn execute() -> Result<()> {
    println!("{} Graph catalog:\n", style("maqaoa").cyan().bold());

    for (idx, name) in catalog::names().iter().enumerate() {
        let graph = catalog::instance(idx)?;
        let (_, cut) = graph.max_cut_brute_force()?;
        println!(
            "  {:>2}  {:<20} {:>2} nodes  {:>2} edges  max cut {:.2}",
            style(idx).yellow(),
            style(name).bold(),
            graph.num_nodes(),
            graph.num_edges(),
            cut
        );
    }
    Ok(())
}
