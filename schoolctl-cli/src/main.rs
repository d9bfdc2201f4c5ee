//! schoolctl CLI - register and browse schools
//!
//! - `serve` / `migrate`: run the HTTP API over the `schools` table (with `server` feature)
//! - `add`: validate a school locally, upload its image, submit it
//! - `list` / `states`: fetch the listing once and search/filter it locally

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use schoolctl_core::SchoolConfig;

mod client;
mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "schoolctl",
    author,
    version,
    about = "Register schools and browse the school directory",
    long_about = "Run the school directory API, add schools to it with client-side validation, \
                  and search or filter the full listing locally."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces to an OTLP endpoint
    #[cfg(feature = "telemetry")]
    #[arg(long, global = true)]
    otel: bool,

    /// API endpoint for client commands (default: http://127.0.0.1:3030)
    #[arg(long, env = "SCHOOLCTL_ENDPOINT", global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    #[cfg(feature = "server")]
    Serve(commands::serve::ServeArgs),
    /// Create the database if missing and apply the schema
    #[cfg(feature = "server")]
    Migrate(commands::serve::MigrateArgs),
    /// Add a school (validates locally, uploads the image, submits)
    Add(commands::add::AddArgs),
    /// List schools, optionally searching and filtering by state
    List(commands::list::ListArgs),
    /// List the distinct states present in the directory
    States(commands::list::StatesArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let tracing_config = TracingConfig {
        debug: cli.debug,
        #[cfg(feature = "telemetry")]
        otel: cli.otel,
        ..Default::default()
    };
    tracing_setup::init(&tracing_config).ok();

    let config = SchoolConfig::load().context("Failed to load config")?;
    let endpoint = cli.endpoint.unwrap_or_else(|| config.endpoint());

    let result = match cli.command {
        #[cfg(feature = "server")]
        Commands::Serve(args) => commands::run_serve(args, &config).await,
        #[cfg(feature = "server")]
        Commands::Migrate(args) => commands::run_migrate(args, &config).await,
        Commands::Add(args) => commands::run_add(args, &endpoint).await,
        Commands::List(args) => commands::run_list(args, &endpoint).await,
        Commands::States(args) => commands::run_states(args, &endpoint).await,
        Commands::Completions(args) => run_completions(args),
    };

    tracing_setup::shutdown_otel();
    result
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
