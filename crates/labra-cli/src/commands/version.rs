//! Implementation of the `labractl version` command.

use crate::{
    error::CliResult,
    output::{Glyph, OutputManager},
};

pub fn execute(output: &OutputManager) -> CliResult<()> {
    output.line(&format!(
        "{} {}",
        output.glyph(Glyph::Version),
        env!("CARGO_PKG_VERSION")
    ))?;
    Ok(())
}
