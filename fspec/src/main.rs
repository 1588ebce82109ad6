// src/main.rs
use clap::Parser;
use fspec::SpecError;
use fspec::cli::{self, Args};
use fspec::core::switches::program_name;
use std::env;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn setup_logging(verbose: bool) {
    let default = if verbose { "fspec=debug" } else { "fspec=error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(args.verbose);

    let program = env::args_os()
        .next()
        .map_or_else(|| String::from("FSPEC"), |argv0| program_name(&argv0.to_string_lossy()));

    match cli::run(&args, &program) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            let silent = err
                .downcast_ref::<SpecError>()
                .is_some_and(|spec_err| !spec_err.is_reported());
            if !silent {
                eprintln!("{program}: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}
