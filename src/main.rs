//! `shopify-catalog-export`: serve the CSV exporters over HTTP or run one
//! from the command line.

use std::io::Write;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use shopify_catalog_export::export::{export, ExportError, Exporter};
use shopify_catalog_export::server::{serve, AppState};
use shopify_catalog_export::{
    ApiBaseUrl, ApiVersion, Credentials, ExportConfig, ExportConfigBuilder,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "shopify-catalog-export")]
#[command(about = "Export Shopify product catalogs to CSV")]
#[command(version)]
struct Cli {
    /// Admin API version
    #[arg(long, env = "SHOPIFY_API_VERSION", global = true)]
    api_version: Option<ApiVersion>,

    /// Send requests here instead of https://<shop-domain>
    #[arg(long, env = "SHOPIFY_API_BASE_URL", global = true)]
    api_base_url: Option<ApiBaseUrl>,

    /// Prepended to the User-Agent sent to Shopify
    #[arg(long, env = "SHOPIFY_USER_AGENT_PREFIX", global = true)]
    user_agent_prefix: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Address to listen on
        #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:3000")]
        bind: SocketAddr,
    },
    /// Run one exporter and write the CSV to stdout or a file
    Export {
        /// variants, simple, accounting, or products
        exporter: Exporter,

        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Shop domain
        #[arg(long, env = "SHOP_DOMAIN")]
        shop_domain: Option<String>,

        /// Admin API access token
        #[arg(long, env = "SHOP_TOKEN", hide_env_values = true)]
        shop_token: Option<String>,
    },
}

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "Command failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), BoxError> {
    let mut base_config = ExportConfig::builder();
    if let Some(version) = cli.api_version {
        base_config = base_config.api_version(version);
    }
    if let Some(url) = cli.api_base_url {
        tracing::info!(base_url = %url, "Using API base URL override");
        base_config = base_config.api_base_url(url);
    }
    if let Some(prefix) = cli.user_agent_prefix {
        base_config = base_config.user_agent_prefix(prefix);
    }

    match cli.command {
        Command::Serve { bind } => {
            let state = AppState::new(Credentials::from_env(), base_config);
            serve(bind, state).await?;
        }
        Command::Export {
            exporter,
            output,
            shop_domain,
            shop_token,
        } => {
            let credentials = Credentials::new(shop_domain.as_deref(), shop_token.as_deref());
            let config = base_config
                .credentials(&credentials)
                .and_then(ExportConfigBuilder::build)
                .map_err(ExportError::from)?;

            let document = export(exporter, &config).await?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &document.body)?;
                    tracing::info!(path = %path.display(), "Wrote CSV");
                }
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(document.body.as_bytes())?;
                    stdout.write_all(b"\n")?;
                    stdout.flush()?;
                }
            }
        }
    }

    Ok(())
}
