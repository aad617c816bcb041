use std::{io::Read, path::PathBuf, process::ExitCode};

use clap::Parser;
use init_check::{parse_module, pass, Error};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "init-check", about = "Reports variables that are read before being stored to")]
struct Args {
    /// Name of the pass to run over every procedure.
    #[arg(short, long, default_value = "def-pass")]
    pass: String,

    /// List the available passes and exit.
    #[arg(long)]
    list: bool,

    /// IR file to read; standard input when omitted.
    input: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.list {
        for pass in pass::passes() {
            println!("{} - {}", pass.name, pass.description);
        }
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let info = pass::lookup(&args.pass)?;
    let source = read_source(args)?;
    let mut module = parse_module(&source)?;
    let stderr = std::io::stderr();
    pass::run_pass(info, &mut module, &mut stderr.lock())?;
    Ok(())
}

fn read_source(args: &Args) -> std::io::Result<String> {
    match &args.input {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut source = String::new();
            std::io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}
