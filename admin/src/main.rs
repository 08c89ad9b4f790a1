//! pinot-admin - read-only inspection of a Pinot cluster from the shell.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pinot_client::{ClientConfig, PinotClient};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Query a Pinot controller and print its answers as JSON.
#[derive(Parser)]
#[command(name = "pinot-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Controller base URL [default: PINOT_URL, PINOT_CONTROLLER_URL or http://localhost:9000]
    #[arg(long, global = true)]
    controller_url: Option<String>,

    /// Basic auth token [default: PINOT_AUTH or PINOT_AUTH_TOKEN]
    #[arg(long, global = true)]
    auth_token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cluster name
    ClusterInfo,

    /// Show cluster-wide configuration
    ClusterConfigs,

    /// Check controller liveness
    Health,

    /// List schema names
    Schemas,

    /// Show one schema
    Schema {
        /// Schema name
        name: String,
    },

    /// List table names
    Tables,

    /// Show the config of a table
    Table {
        /// Table name, with or without type suffix
        name: String,
    },

    /// List the segments of a table
    Segments {
        /// Table name
        table: String,
    },

    /// List instance names
    Instances,

    /// Show one instance
    Instance {
        /// Instance name, e.g. Server_172.19.0.7_8098
        name: String,
    },

    /// List broker and server tenants
    Tenants,

    /// List users
    Users,
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn client_config(cli: &Cli) -> ClientConfig {
    let mut config = ClientConfig::from_env();
    if let Some(url) = &cli.controller_url {
        config = config.with_controller_url(url.as_str());
    }
    if let Some(token) = &cli.auth_token {
        config = config.with_auth_token(token.as_str());
    }
    config
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render response")?;
    println!("{rendered}");
    Ok(())
}

fn run(client: &PinotClient, command: Commands) -> Result<()> {
    match command {
        Commands::ClusterInfo => print_json(&client.get_cluster_info()?),
        Commands::ClusterConfigs => print_json(&client.get_cluster_configs()?),
        Commands::Health => {
            println!("{}", client.check_controller_health()?.response);
            Ok(())
        }
        Commands::Schemas => print_json(&client.get_schemas()?),
        Commands::Schema { name } => print_json(
            &client
                .get_schema(&name)
                .with_context(|| format!("failed to fetch schema {name}"))?,
        ),
        Commands::Tables => print_json(&client.get_tables()?),
        Commands::Table { name } => print_json(
            &client
                .get_table(&name)
                .with_context(|| format!("failed to fetch table {name}"))?,
        ),
        Commands::Segments { table } => print_json(
            &client
                .get_segments(&table)
                .with_context(|| format!("failed to list segments of {table}"))?,
        ),
        Commands::Instances => print_json(&client.get_instances()?),
        Commands::Instance { name } => print_json(
            &client
                .get_instance(&name)
                .with_context(|| format!("failed to fetch instance {name}"))?,
        ),
        Commands::Tenants => print_json(&client.get_tenants()?),
        Commands::Users => print_json(&client.get_users()?),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = client_config(&cli);
    tracing::info!(controller = %config.controller_url, "connecting");
    let client = PinotClient::new(config).context("invalid client configuration")?;

    run(&client, cli.command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_environment() {
        let cli = Cli::parse_from([
            "pinot-admin",
            "--controller-url",
            "http://pinot:9000",
            "--auth-token",
            "YWRtaW46YWRtaW4K",
            "tables",
        ]);
        let config = client_config(&cli);
        assert_eq!(config.controller_url, "http://pinot:9000");
        assert_eq!(config.auth_token.as_deref(), Some("YWRtaW46YWRtaW4K"));
    }

    #[test]
    fn subcommands_take_names() {
        let cli = Cli::parse_from(["pinot-admin", "-vv", "segments", "airlineStats"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Segments { table } if table == "airlineStats"));
    }
}
