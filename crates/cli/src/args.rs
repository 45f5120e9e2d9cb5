use std::time::Duration;

use clap::Parser;

/// Synthesize a minimum-adder SCM network computing `y = C * x`.
#[derive(Debug, Parser)]
#[command(name = "scm-synth", version, about)]
pub struct Args {
    /// The constant C to multiply by (any positive integer; even values
    /// are reduced to odd by extracting a trailing output shift).
    pub c_raw: u64,

    /// Give up on a given adder count after this many seconds. Unset
    /// means run each attempt to completion.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Suppress the per-attempt progress narration; only the final
    /// result is printed.
    #[arg(long)]
    pub quiet: bool,

    /// Emit the solution as JSON instead of the human-readable report.
    #[arg(long)]
    pub json: bool,
}

impl Args {
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}
