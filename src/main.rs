use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use u_pmsp::loader::load_instance;
use u_pmsp::scheduler::Solver;

const RULE: &str = "==================================================";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON instance file
    instance: PathBuf,
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    enable_tracing();
    let args = Args::parse();

    println!("{RULE}");
    println!("RUNNING INSTANCE FILE: {}", args.instance.display());
    println!("{RULE}");

    let instance = match load_instance(&args.instance) {
        Ok(instance) => instance,
        Err(e) => {
            tracing::error!(path = %args.instance.display(), error = %e, "failed to load instance");
            eprintln!("ERROR: {e}");
            return ExitCode::FAILURE;
        }
    };

    let report = Solver::default().solve(&instance);
    println!("{report}");
    ExitCode::SUCCESS
}
