//! Draw command implementation.

use anyhow::Result;
use std::path::Path;

use super::common::load_circuit;

/// Execute the draw command.
pub fn execute(input: &Path) -> Result<()> {
    let circuit = load_circuit(input)?;
    println!("{}", circuit.draw());
    Ok(())
}
