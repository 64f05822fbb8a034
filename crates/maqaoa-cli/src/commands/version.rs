//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - multi-angle QAOA for MaxCut",
        style("maqaoa").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  maqaoa-ir           Circuit intermediate representation");
    println!("  maqaoa-hal          Executor abstraction");
    println!("  maqaoa-adapter-sim  Statevector simulator");
    println!("  maqaoa-core         Circuit builder, estimator and optimizers");
    println!("  maqaoa-cli          Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
