mod cmd;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::ResolveArgs;
use output::OutputFormat;

/// varia - Resolve build variants across a module graph
#[derive(Parser)]
#[command(name = "varia")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(short, long, global = true, value_enum, default_value_t)]
  output: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Resolve a module file and print every variant with its dependencies
  Resolve(ResolveArgs),

  /// Resolve a module file and report success or every error
  Check(ResolveArgs),
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  // RUST_LOG wins over --verbose
  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match cli.command {
    Commands::Resolve(args) => cmd::cmd_resolve(&args, cli.output, cli.verbose),
    Commands::Check(args) => cmd::cmd_check(&args, cli.output),
  }
}
