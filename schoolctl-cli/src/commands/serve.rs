//! HTTP server and schema commands
//!
//! Both create the database when it is missing and apply the schema.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use schoolctl_core::SchoolConfig;
use schoolctl_server::{prepare_database, run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: from config, else 127.0.0.1:3030)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config and DB_* variables)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Directory uploaded images are stored in (default: ./uploads)
    #[arg(long)]
    pub upload_dir: Option<PathBuf>,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides config and DB_* variables)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

fn resolve_database_url(arg: Option<String>, config: &SchoolConfig) -> String {
    arg.filter(|url| !url.is_empty())
        .unwrap_or_else(|| config.database_url())
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: &SchoolConfig) -> Result<()> {
    let database_url = resolve_database_url(args.database_url, config);

    let mut server_config = ServerConfig::from(config);
    if let Some(bind) = args.bind {
        server_config.bind_addr = bind;
    }
    if args.cors_permissive {
        server_config.cors_permissive = true;
    }
    if let Some(dir) = args.upload_dir {
        server_config.upload_dir = dir;
    }

    tracing::info!("Starting schoolctl server on {}", server_config.bind_addr);

    let pool = prepare_database(&database_url, config.database.max_connections)
        .await
        .context("Failed to prepare database")?;

    // Blocks until shutdown
    run_server(pool, server_config)
        .await
        .context("Server error")?;

    Ok(())
}

/// Create the database if needed and apply the schema, then exit
pub async fn run_migrate(args: MigrateArgs, config: &SchoolConfig) -> Result<()> {
    let database_url = resolve_database_url(args.database_url, config);

    let pool = prepare_database(&database_url, 1)
        .await
        .context("Failed to prepare database")?;
    pool.close().await;

    println!("✓ Database ready");
    Ok(())
}
