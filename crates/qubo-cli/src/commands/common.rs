//! Shared helpers for CLI commands.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use qubo_ir::Circuit;
use qubo_sim::Counts;

/// Number of rows printed before the remainder is summarised.
const MAX_ROWS: usize = 16;

/// Load a circuit from a JSON circuit document.
pub fn load_circuit(path: &Path) -> Result<Circuit> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext.to_lowercase().as_str() {
        "json" | "" => Circuit::from_json(&source)
            .with_context(|| format!("Invalid circuit document: {}", path.display())),
        other => anyhow::bail!("Unsupported circuit format: '.{other}'. Expected a .json document"),
    }
}

/// Print sampled counts as a table with bars.
pub fn print_results(counts: &Counts) {
    println!(
        "\n{} Results ({} shots):",
        style("✓").green().bold(),
        counts.total_shots()
    );

    let sorted = counts.sorted();
    let total = counts.total_shots() as f64;

    for (bitstring, count) in sorted.iter().take(MAX_ROWS) {
        let prob = **count as f64 / total * 100.0;
        print_row(bitstring, &format!("{count:>6}"), prob);
    }

    if sorted.len() > MAX_ROWS {
        println!("  ... and {} more outcomes", sorted.len() - MAX_ROWS);
    }
}

/// Print basis-state probabilities of a final statevector.
///
/// States with zero probability are left out.
pub fn print_probabilities(probabilities: &BTreeMap<String, f64>) {
    println!("\n{} Statevector probabilities:", style("✓").green().bold());

    let nonzero: Vec<_> = probabilities
        .iter()
        .filter(|(_, p)| **p > 1e-12)
        .collect();

    for (label, p) in nonzero.iter().take(MAX_ROWS) {
        print_row(label, &format!("{p:>8.6}"), **p * 100.0);
    }

    if nonzero.len() > MAX_ROWS {
        println!("  ... and {} more states", nonzero.len() - MAX_ROWS);
    }
}

fn print_row(label: &str, value: &str, percent: f64) {
    let bar_len = (percent / 2.0).round() as usize;
    let bar: String = "█".repeat(bar_len);

    println!(
        "  {}: {} ({:>6.2}%) {}",
        style(label).cyan(),
        value,
        percent,
        style(bar).green()
    );
}
