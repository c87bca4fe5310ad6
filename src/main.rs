use clap::Parser;
use giftopt::{parse_instance, AllocationService, SolverConfig, SolverStrategy};
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Toy distribution solver: reads one problem instance and prints the
/// maximum number of satisfiable children, or -1 if the instance is
/// infeasible.
#[derive(Parser, Debug)]
#[command(name = "giftopt", version, about)]
struct Args {
    /// Solver strategy: auto, cbc, highs or greedy
    #[arg(long, default_value = "auto")]
    strategy: SolverStrategy,

    /// Wall-clock budget in seconds for the exact backends
    #[arg(long)]
    time_limit: Option<f64>,

    /// Read the instance from a file instead of stdin
    #[arg(long)]
    input: Option<PathBuf>,

    /// Let the backend print its own solver log
    #[arg(long)]
    verbose: bool,
}

fn read_input(path: Option<&PathBuf>) -> std::io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let text = match read_input(args.input.as_ref()) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("failed to read input: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let instance = match parse_instance(&text) {
        Ok(instance) => instance,
        Err(e) => {
            eprintln!("malformed instance: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = SolverConfig {
        strategy: args.strategy,
        time_limit: args.time_limit,
        verbose: args.verbose,
    };

    let service = AllocationService::from_config(&config);
    match service.run(&instance, &config) {
        Ok(result) => {
            println!("{}", result);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
