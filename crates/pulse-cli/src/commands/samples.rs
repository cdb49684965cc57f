//! Sample listing command.

use anyhow::Result;
use pulse_core::SampleSource;

use crate::output;

pub fn execute() -> Result<()> {
    output::print_samples(&SampleSource::ALL);
    Ok(())
}
