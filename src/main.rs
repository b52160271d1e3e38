mod artifact;
mod commands;
mod core;
mod patch;
mod release;
mod ui;
mod utils;

use clap::{Parser, Subcommand};
use core::error::{ExitCode, ReleaseError, print_error};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Release automation for the Sora iOS SDK
#[derive(Parser)]
#[command(name = "sora-release")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Increase diagnostic logging (-v debug, -vv trace); overrides RUST_LOG
  #[arg(short, long, global = true, action = clap::ArgAction::Count)]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Bump the canary version in Sora.podspec and PackageInfo.swift, then commit, tag and push
  Canary {
    /// Print the new file contents and git commands without running them
    #[arg(long)]
    dry_run: bool,
  },

  /// Update Package.swift, PackageInfo.swift, CHANGES.md and README.md for a libwebrtc build
  Libwebrtc {
    /// libwebrtc version like "m143.7499.1.0"
    #[arg(id = "libwebrtc_version", value_name = "VERSION")]
    version: String,
    /// GitHub ID to record in CHANGES.md
    #[arg(long)]
    author: Option<String>,
    /// Print planned actions and diffs without writing files
    #[arg(long)]
    dry_run: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn init_tracing(verbose: u8) {
  let filter = match verbose {
    0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    1 => EnvFilter::new("debug"),
    _ => EnvFilter::new("trace"),
  };

  tracing_subscriber::registry()
    .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
    .with(filter)
    .init();
}

fn main() {
  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    // Usage errors share the single failure exit code; --help and --version exit 0
    Err(e) if e.use_stderr() => {
      let _ = e.print();
      std::process::exit(ExitCode::Failure.as_i32());
    }
    Err(e) => e.exit(),
  };
  init_tracing(cli.verbose);

  let root = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => handle_error(ReleaseError::from(e).context("Failed to get current directory")),
  };

  let ctx = match core::context::ReleaseContext::build(&root) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  let result = match cli.command {
    Commands::Canary { dry_run } => commands::run_canary(&ctx, dry_run),
    Commands::Libwebrtc {
      version,
      author,
      dry_run,
    } => commands::run_libwebrtc(&ctx, &version, author.as_deref(), dry_run),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: ReleaseError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
