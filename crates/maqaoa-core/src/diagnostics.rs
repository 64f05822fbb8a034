//! Optional inspection output for a constructed instance.
//!
//! Nothing here runs during construction; callers invoke
//! [`AnsatzReport`] explicitly once a [`MaQaoa`] exists.

use std::fmt::{self, Write as _};

use console::style;

use crate::ansatz::MaQaoa;

/// Human-readable summary of a [`MaQaoa`] instance.
#[derive(Debug, Clone, Copy)]
pub struct AnsatzReport<'a> {
    ansatz: &'a MaQaoa,
    show_circuit: bool,
}

impl<'a> AnsatzReport<'a> {
    /// Report on `ansatz`, including the circuit text.
    pub fn new(ansatz: &'a MaQaoa) -> Self {
        Self {
            ansatz,
            show_circuit: true,
        }
    }

    /// Leave out the circuit listing.
    pub fn without_circuit(mut self) -> Self {
        self.show_circuit = false;
        self
    }

    /// Styled rendering for terminals.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let heading = |title: &str| format!("{}\n", style(format!("▶ {title}")).green().bold());

        out.push_str(&heading("Graph"));
        out.push_str(&self.ansatz.graph().draw());

        out.push_str(&heading("Angles"));
        out.push_str(&self.angles_text());

        if self.show_circuit {
            out.push_str(&heading("Circuit"));
            out.push_str(&self.ansatz.circuit().to_string());
        }
        out
    }

    /// Print the styled rendering to stdout.
    pub fn print(&self) {
        print!("{}", self.render());
    }

    fn angles_text(&self) -> String {
        let q = self.ansatz;
        let mut out = String::new();
        let seed = q.seed().map_or_else(|| "unset".to_string(), |s| s.to_string());
        // Writing to a String cannot fail.
        let _ = writeln!(out, "  layers (p): {}", q.layers());
        let _ = writeln!(out, "  seed: {seed}");
        let _ = writeln!(out, "  measured: {}", q.is_measured());
        let _ = writeln!(out, "  parameters: {}", q.template().num_parameters());
        let _ = writeln!(out, "  betas: {}", format_angles(q.betas()));
        let _ = writeln!(out, "  gammas: {}", format_angles(q.gammas()));
        out
    }
}

impl fmt::Display for AnsatzReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ansatz.graph().draw())?;
        write!(f, "{}", self.angles_text())?;
        if self.show_circuit {
            write!(f, "{}", self.ansatz.circuit())?;
        }
        Ok(())
    }
}

/// `[0.1234, 1.5708, ...]` with four decimals.
pub fn format_angles(angles: &[f64]) -> String {
    let parts: Vec<String> = angles.iter().map(|a| format!("{a:.4}")).collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansatz::AngleInit;
    use crate::graph::MaxCutGraph;

    fn instance() -> MaQaoa {
        let g = MaxCutGraph::new("edge", 2, [(0, 1)]).unwrap();
        let init = AngleInit::Specified {
            betas: vec![0.5, 0.25],
            gammas: vec![1.0],
        };
        MaQaoa::new(g, 1, init, true).unwrap()
    }

    #[test]
    fn test_report_contents() {
        let qaoa = instance();
        let text = AnsatzReport::new(&qaoa).to_string();
        assert!(text.contains("Graph 'edge'"));
        assert!(text.contains("seed: unset"));
        assert!(text.contains("betas: [0.5000, 0.2500]"));
        assert!(text.contains("gammas: [1.0000]"));
        assert!(text.contains("measured: true"));
        assert!(text.contains("rz(params[2])"));
    }

    #[test]
    fn test_without_circuit() {
        let qaoa = instance();
        let text = AnsatzReport::new(&qaoa).without_circuit().to_string();
        assert!(!text.contains("rz("));
        assert!(text.contains("parameters: 3"));
    }

    #[test]
    fn test_render_includes_headings() {
        let qaoa = instance();
        let rendered = AnsatzReport::new(&qaoa).render();
        assert!(rendered.contains("Angles"));
        assert!(rendered.contains("Circuit"));
    }
}
