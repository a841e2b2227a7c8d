//! cmodel CLI entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use cmodel_foundation::QualifiedName;
use cmodel_runtime::{Repl, Session, SessionConfig, print_error};
use tracing_subscriber::EnvFilter;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    model: Option<PathBuf>,
    init: Option<String>,
    batch_mode: bool,
    autosave: bool,
    verbosity: u8,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            "-a" | "--autosave" => config.autosave = true,
            "-v" => config.verbosity = config.verbosity.saturating_add(1),
            "--init" => {
                i += 1;
                if i >= args.len() {
                    return Err("--init requires a PREFIX:NAME value".into());
                }
                config.init = Some(args[i].clone());
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => {
                if config.model.is_some() {
                    return Err(format!("unexpected argument: {path}").into());
                }
                config.model = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    Ok(config)
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

/// Returns false when a batch check found a violation.
fn run(args: Vec<String>) -> Result<bool, Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(true);
    }

    if config.show_version {
        println!("cmodel {}", env!("CARGO_PKG_VERSION"));
        return Ok(true);
    }

    init_logging(config.verbosity);

    let path = config
        .model
        .ok_or("no model file given; see 'cmodel --help'")?;
    let session_config = SessionConfig::new()
        .with_model_path(&path)
        .with_autosave(config.autosave);

    let session = match &config.init {
        Some(name) => {
            if path.exists() {
                return Err(format!("'{}' already exists", path.display()).into());
            }
            let mut session = Session::create(QualifiedName::parse(name)?, session_config);
            session.save()?;
            session
        }
        None => Session::open(session_config)?,
    };

    if config.batch_mode {
        return Ok(match session.check() {
            Ok(checked) => {
                println!("ok: {checked} declarations resolved");
                true
            }
            Err(e) => {
                print_error(&e);
                false
            }
        });
    }

    let mut repl = Repl::new(session)?;
    repl.run()?;
    Ok(true)
}

fn print_help() {
    println!(
        "\x1b[1mcmodel\x1b[0m - Content model editor and checker

\x1b[1mUSAGE:\x1b[0m
    cmodel [OPTIONS] MODEL

\x1b[1mARGUMENTS:\x1b[0m
    MODEL                Content model file to open

\x1b[1mOPTIONS:\x1b[0m
    -h, --help           Print help information
    -V, --version        Print version information
    -b, --batch          Check every declaration and exit
    -a, --autosave       Save after every accepted edit
    --init PREFIX:NAME   Create MODEL as an empty model named PREFIX:NAME
    -v                   More log output (repeatable; RUST_LOG overrides)

\x1b[1mEXAMPLES:\x1b[0m
    cmodel --init acme:model acme.cmodel   Create a model and edit it
    cmodel acme.cmodel                     Edit an existing model
    cmodel -b acme.cmodel                  Check a model, non-zero on violation

Type 'help' in the shell for the command list."
    );
}
