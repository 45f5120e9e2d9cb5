mod args;
mod output;

use std::process::ExitCode;

use clap::Parser;
use scm_backends::BruteForceBackend;

use args::Args;

fn init_logging(quiet: bool) {
    let default_filter = if quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.quiet);

    let mut backend = BruteForceBackend::new(args.timeout_duration());
    let solution = match scm_search::solve(args.c_raw, args.timeout_duration(), args.quiet, &mut backend) {
        Ok(solution) => solution,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&solution) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: failed to serialize solution: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else if !args.quiet {
        output::print_solution(&solution);
    }

    if solution.timed_out {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}
