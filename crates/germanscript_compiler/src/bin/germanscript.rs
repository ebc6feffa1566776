//! GermanScript CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};
use germanscript_compiler::{CompilerConfig, compile};
use germanscript_declension::OfflineService;
use germanscript_foundation::{Error, ErrorCategory};
use tracing_subscriber::EnvFilter;

/// Exit code for errors that indicate a bug in the front end.
const INTERNAL_ERROR: u8 = 70;

#[derive(Debug, Parser)]
#[command(name = "germanscript", version, about = "Front end for GermanScript programs")]
struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Standard library read before the program
    #[arg(long, global = true, value_name = "FILE")]
    stdlib: Option<PathBuf>,

    /// Do not read a standard library
    #[arg(long, global = true, conflicts_with = "stdlib")]
    no_stdlib: bool,

    /// Seconds to wait for each external declension lookup
    #[arg(long, global = true, default_value_t = 10, value_name = "SECONDS")]
    timeout: u64,

    /// Keep external declension declarations instead of writing the resolved forms back
    #[arg(long, global = true)]
    no_rewrite: bool,

    /// Print errors without colour
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compile a program and report the first error
    Check {
        /// The program to compile
        file: PathBuf,
    },
    /// Compile a program and list every canonical signature
    Signatures {
        /// The program to compile
        file: PathBuf,
    },
}

impl Cli {
    fn config(&self) -> CompilerConfig {
        let file = match &self.command {
            Command::Check { file } | Command::Signatures { file } => file,
        };
        let mut config = CompilerConfig::for_entry(file)
            .with_lookup_timeout(Duration::from_secs(self.timeout))
            .with_source_rewrite(!self.no_rewrite)
            .with_colour(!self.no_color);
        if self.no_stdlib {
            config = config.with_standard_library(None);
        } else if let Some(stdlib) = &self.stdlib {
            config = config.with_standard_library(Some(stdlib.clone()));
        }
        config
    }
}

/// Maps the `-v` count to a default log directive; `RUST_LOG` overrides it.
fn directive_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config();
    match run(&cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&err, config.colour);
            if err.category() == ErrorCategory::Internal {
                ExitCode::from(INTERNAL_ERROR)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

async fn run(command: &Command, config: &CompilerConfig) -> Result<(), Error> {
    let compiled = compile(config, Arc::new(OfflineService)).await?;
    match command {
        Command::Check { .. } => println!("ok"),
        Command::Signatures { .. } => {
            for line in compiled.signatures() {
                println!("{line}");
            }
        }
    }
    Ok(())
}

fn print_error(err: &Error, colour: bool) {
    if colour {
        eprintln!("\x1b[31m{}\x1b[0m", err.report());
    } else {
        eprintln!("{}", err.report());
    }
}
