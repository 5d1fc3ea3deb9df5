use anyhow::{Context, Result};
use clap::Parser;
use ldap_bind_auth::config::DEFAULT_LDAP_PORT;
use ldap_bind_auth::{attempt_login, Config};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "ldap-bind-auth")]
#[command(about = "Verify directory credentials with a single LDAP simple bind")]
struct Args {
    /// Directory server host (overrides config)
    #[arg(long, value_name = "HOST")]
    host: Option<String>,

    /// Directory server port (overrides config; default 389)
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Login name, expanded through bind.dn_template when configured
    #[arg(short, long)]
    username: String,

    /// Password for the bind
    #[arg(long)]
    password: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("ldap_bind_auth={},info", log_level))
        .init();

    let config = match &args.config {
        Some(path) => Some(
            Config::from_file(path)
                .with_context(|| format!("Failed to load config {:?}", path))?,
        ),
        None => None,
    };

    let host = args
        .host
        .clone()
        .or_else(|| config.as_ref().map(|c| c.directory.host.clone()))
        .context("Set --host <HOST> or provide a config file")?;
    let port = args
        .port
        .or_else(|| config.as_ref().and_then(|c| c.directory.port))
        .unwrap_or(DEFAULT_LDAP_PORT);
    let bind_dn = match &config {
        Some(config) => config.bind_dn(&args.username),
        None => args.username.clone(),
    };

    info!("Attempting simple bind as {} against {}:{}", bind_dn, host, port);
    match attempt_login(&host, port, &bind_dn, &args.password).await {
        Ok(true) => {
            info!("Credentials accepted");
            Ok(())
        }
        Ok(false) => {
            error!("Credentials rejected by the directory");
            std::process::exit(1);
        }
        Err(err) => {
            error!("Bind exchange failed: {:#}", anyhow::Error::from(err));
            std::process::exit(2);
        }
    }
}
