//! Command-line script host for the crypto modules.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::Value;

use loadscript_crypto::{CallOutcome, ModuleCall, ModuleRegistry};

#[derive(Parser, Debug)]
#[command(name = "loadscript-crypto", version, about = "Run crypto module calls the way a load-test script would")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Invoke one exported function and print the JSON outcome
    Call {
        /// Module import path, e.g. k6/x/cryptography
        module: String,
        /// Exported function name, e.g. encryptData
        function: String,
        /// Arguments; each is parsed as JSON, bare words become strings
        args: Vec<String>,
    },
    /// Execute newline-delimited JSON calls against one shared session arena
    Run {
        /// Read calls from this file instead of stdin
        #[arg(long, short)]
        input: Option<PathBuf>,
    },
    /// List registered modules and their exports
    Modules,
}

fn parse_arg(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn init_logging() {
    // LOADSCRIPT_CRYPTO_LOG > RUST_LOG > info
    let filter = std::env::var("LOADSCRIPT_CRYPTO_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::new().parse_filters(&filter).init();
}

fn run_lines(
    registry: &mut ModuleRegistry,
    reader: impl BufRead,
    out: &mut impl Write,
) -> Result<bool, Box<dyn std::error::Error>> {
    let mut all_ok = true;
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let outcome = match serde_json::from_str::<ModuleCall>(&line) {
            Ok(call) => registry.dispatch(&call),
            Err(e) => {
                log::warn!("line {}: invalid call: {}", lineno + 1, e);
                CallOutcome::Error(format!("invalid call on line {}: {}", lineno + 1, e))
            }
        };
        all_ok &= outcome.is_ok();
        writeln!(out, "{}", serde_json::to_string(&outcome)?)?;
    }

    log::info!(
        "Finished script run, {} session(s) left open",
        registry.sessions().len()
    );
    Ok(all_ok)
}

fn run(args: Args) -> Result<bool, Box<dyn std::error::Error>> {
    let mut registry = ModuleRegistry::with_defaults()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Call {
            module,
            function,
            args,
        } => {
            let values: Vec<Value> = args.iter().map(|a| parse_arg(a)).collect();
            let outcome: CallOutcome = registry.call(&module, &function, &values).into();
            writeln!(out, "{}", serde_json::to_string(&outcome)?)?;
            Ok(outcome.is_ok())
        }
        Command::Run { input } => match input {
            Some(path) => {
                let file = File::open(&path)
                    .map_err(|e| format!("Failed to open {}: {}", path.display(), e))?;
                run_lines(&mut registry, BufReader::new(file), &mut out)
            }
            None => run_lines(&mut registry, io::stdin().lock(), &mut out),
        },
        Command::Modules => {
            writeln!(out, "{}", serde_json::to_string_pretty(&registry.modules())?)?;
            Ok(true)
        }
    }
}

fn main() -> ExitCode {
    // .env is optional
    let _ = dotenvy::dotenv();

    init_logging();
    let args = Args::parse();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            log::error!("{}", e);
            ExitCode::from(2)
        }
    }
}
