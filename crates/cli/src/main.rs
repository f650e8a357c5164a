mod error;

use std::str::FromStr;

use api::ZabbixClient;
use clap::Parser;
use dispatch::Operation;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::ChronoLocal;

use error::{Error, Result};

const LOG_TIME_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

#[derive(Parser)]
#[command(name = "zbx-update")]
#[command(about = "Bulk-update Zabbix hosts and triggers matched by a hostname keyword", long_about = None)]
#[command(version)]
struct Cli {
    /// Zabbix username
    #[arg(short = 'n', long = "name", env = "ZABBIX_USER")]
    name: String,

    /// Zabbix password
    #[arg(short, long, env = "ZABBIX_PASSWORD", hide_env_values = true)]
    password: String,

    /// Zabbix API url
    #[arg(short, long, env = "ZABBIX_URL")]
    url: String,

    /// Print what would change but do nothing
    #[arg(short, long)]
    dryrun: bool,

    /// Keyword to filter host names for the operation
    keyword: String,

    /// Operation to perform on the matched hosts: list, enable, disable, raise, lower
    #[arg(value_parser = Operation::from_str)]
    operation: Operation,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let client = ZabbixClient::new(&cli.url);
    let version = client.api_version().await?;
    info!("zabbix api version {version}");

    // The authenticated session is built once here and passed into the
    // dispatcher; it is the only shared resource of an invocation.
    let session = client.login(&cli.name, &cli.password).await?;

    let outcome = dispatch::run(&session, &cli.keyword, cli.operation, cli.dryrun).await?;

    if !outcome.failures.is_empty() {
        for failure in &outcome.failures {
            tracing::error!("{} : {} : {}", failure.id, failure.label, failure.error);
        }
        return Err(Error::PartialFailure {
            failed: outcome.failures.len(),
            total: outcome.matched,
        });
    }

    Ok(())
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_timer(ChronoLocal::new(LOG_TIME_FORMAT.to_string()))
        .with_target(false)
        .init();
}
