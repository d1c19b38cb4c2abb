//! Command-line front end.

mod common;
mod init;
mod score;
mod trends;
mod validate;

pub use init::{InitArgs, init_config};
pub use score::{ScoreArgs, score_tools};
pub use trends::{TrendsArgs, update_trends};
pub use validate::{ValidateArgs, validate_inputs};

use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::io::Write;

/// Where a command run sends its output and how it terminates.
pub trait Host {
    fn output(&mut self) -> impl Write;
    fn error(&mut self) -> impl Write;
    fn exit(&mut self, code: i32);
}

#[derive(Parser, Debug)]
#[command(name = "toolpulse", version, about = "Score, rank and track the trends of AI tools", long_about = None)]
struct Cli {
    /// Log progress information (`RUST_LOG` takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score and rank the tools of a signals file, then write this period's snapshot
    Score(ScoreArgs),

    /// Recompute the trend annotations of an existing snapshot
    Trends(TrendsArgs),

    /// Write the default configuration file
    Init(InitArgs),

    /// Check a configuration file and, optionally, snapshots
    Validate(ValidateArgs),
}

fn init_logging(verbose: bool) {
    let level = if verbose { "info" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).try_init();
}

/// Parse `args` and run the selected command against `host`.
///
/// Failures are reported on the host's error stream and end with exit code 1.
pub fn run<I, T>(host: &mut impl Host, args: I)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            if e.use_stderr() {
                let _ = write!(host.error(), "{e}");
                host.exit(1);
            } else {
                let _ = write!(host.output(), "{e}");
                host.exit(0);
            }
            return;
        }
    };

    init_logging(cli.verbose);

    let result = match &cli.command {
        Command::Score(args) => score_tools(host, args),
        Command::Trends(args) => update_trends(host, args),
        Command::Init(args) => init_config(host, args),
        Command::Validate(args) => validate_inputs(host, args),
    };

    if let Err(e) = result {
        let _ = writeln!(host.error(), "Error: {e:#}");
        host.exit(1);
    }
}
