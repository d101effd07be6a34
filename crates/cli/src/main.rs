mod cmd;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::print_error;

/// anvil - C++ build configuration compiler
#[derive(Parser)]
#[command(name = "anvil")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Serve the Build Server Protocol on stdin/stdout
  #[arg(long, hide = true)]
  bsp: bool,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Compile build.cpp, write build.ninja and run ninja
  Build,

  /// Remove build outputs
  Clean,

  /// Build, then run the first executable target
  Run {
    /// Arguments passed to the executable
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
  },

  /// Build, then run every test target
  Test {
    /// Arguments passed to each test binary
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let result = if cli.bsp {
    cmd::cmd_bsp()
  } else {
    match cli.command {
      Some(Commands::Build) => cmd::cmd_build(),
      Some(Commands::Clean) => cmd::cmd_clean(),
      Some(Commands::Run { args }) => cmd::cmd_run(&args),
      Some(Commands::Test { args }) => cmd::cmd_test(&args),
      None => Err(anyhow::anyhow!("no command given, see 'anvil --help'")),
    }
  };

  match result {
    Ok(code) => exit_code(code),
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}

/// Logs go to stderr so stdout stays free for protocol frames.
fn init_logging(verbose: bool) {
  let default = if verbose { "info" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn exit_code(code: i32) -> ExitCode {
  match u8::try_from(code) {
    Ok(code) => ExitCode::from(code),
    Err(_) => ExitCode::FAILURE,
  }
}
