//! B2B pricing enrichment CLI
//!
//! Reads newline-delimited JSON records, attaches `b2b_pricing` to each, and
//! writes them to stdout in the same order.
//!
//! Usage:
//!   SHOPIFY=shpat_... b2b-enrich --shop my-store products.ndjson
//!   cat products.ndjson | b2b-enrich --shop my-store --catalog 10 --skip-failed
//!
//! Logs go to stderr and follow `RUST_LOG` (default `info`).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use shopify_b2b_pricing::enrich::{access_token, EnvSecretSource, Record, SECRET_NAME};
use shopify_b2b_pricing::{
    ApiVersion, CatalogRef, ConfigError, EnrichError, EnrichMode, Enricher, HostUrl,
    PricingConfig, ShopDomain,
};

/// Attach Shopify B2B catalog pricing to NDJSON product records
#[derive(Parser, Debug)]
#[command(name = "b2b-enrich", version)]
struct Args {
    /// Shop domain (`my-store` or `my-store.myshopify.com`)
    #[arg(long, env = "SHOPIFY_SHOP")]
    shop: String,

    /// Admin API version (e.g. 2025-10, unstable)
    #[arg(long, env = "SHOPIFY_API_VERSION")]
    api_version: Option<String>,

    /// Send requests to this origin instead of the shop domain
    #[arg(long)]
    api_host: Option<String>,

    /// Only price this catalog (numeric or gid://shopify/Catalog/<id>)
    #[arg(long)]
    catalog: Option<String>,

    /// Environment variable holding the Admin API access token
    #[arg(long, default_value = SECRET_NAME)]
    secret_name: String,

    /// Log and drop records that fail instead of stopping
    #[arg(long)]
    skip_failed: bool,

    /// Input file (default: stdin)
    input: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Access token unavailable: {0}")]
    Secret(EnrichError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: invalid JSON: {source}")]
    Json {
        line: usize,
        source: serde_json::Error,
    },

    #[error("Line {line}: {source}")]
    Enrich { line: usize, source: EnrichError },
}

fn build_config(args: &Args) -> Result<PricingConfig, ConfigError> {
    let mut builder = PricingConfig::builder().shop(ShopDomain::new(args.shop.as_str())?);

    if let Some(version) = &args.api_version {
        builder = builder.api_version(version.parse::<ApiVersion>()?);
    }
    if let Some(host) = &args.api_host {
        builder = builder.api_host(HostUrl::new(host.as_str())?);
    }
    if let Some(catalog) = &args.catalog {
        builder = builder.mode(EnrichMode::SingleCatalog(catalog.parse::<CatalogRef>()?));
    }

    builder.build()
}

async fn open_input(path: Option<&PathBuf>) -> Result<Box<dyn AsyncRead + Unpin>, CliError> {
    Ok(match path {
        Some(path) => Box::new(tokio::fs::File::open(path).await?),
        None => Box::new(tokio::io::stdin()),
    })
}

async fn run(args: Args) -> Result<(usize, usize), CliError> {
    let enricher = Enricher::new(build_config(&args)?);
    let token = access_token(&EnvSecretSource, &args.secret_name).map_err(CliError::Secret)?;

    let mut lines = BufReader::new(open_input(args.input.as_ref()).await?).lines();
    let mut stdout = tokio::io::stdout();
    let mut line_no = 0;
    let mut written = 0;
    let mut skipped = 0;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }

        let parsed = serde_json::from_str::<serde_json::Value>(&line)
            .map_err(|source| CliError::Json { line: line_no, source })
            .and_then(|value| {
                Record::from_value(value).map_err(|source| CliError::Enrich {
                    line: line_no,
                    source,
                })
            });

        let result = match parsed {
            Ok(record) => enricher
                .enrich(record, &token)
                .await
                .map_err(|source| CliError::Enrich { line: line_no, source }),
            Err(e) => Err(e),
        };

        match result {
            Ok(record) => {
                let mut out = serde_json::to_vec(&record).map_err(|source| CliError::Json {
                    line: line_no,
                    source,
                })?;
                out.push(b'\n');
                stdout.write_all(&out).await?;
                written += 1;
            }
            Err(e) if args.skip_failed => {
                tracing::warn!(error = %e, "Skipping record");
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    stdout.flush().await?;
    Ok((written, skipped))
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()).await {
        Ok((written, skipped)) => {
            tracing::info!(written, skipped, "Enrichment finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["b2b-enrich", "--shop", "test-shop"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let args = args(&[]);
        assert_eq!(args.secret_name, "SHOPIFY");
        assert!(!args.skip_failed);
        assert!(args.input.is_none());

        let config = build_config(&args).unwrap();
        assert_eq!(config.shop().as_ref(), "test-shop.myshopify.com");
        assert_eq!(config.api_version(), ApiVersion::latest());
        assert_eq!(config.mode(), &EnrichMode::AllCatalogs);
    }

    #[test]
    fn test_catalog_flag_selects_single_catalog_mode() {
        let config = build_config(&args(&["--catalog", "gid://shopify/Catalog/10"])).unwrap();
        assert_eq!(
            config.mode(),
            &EnrichMode::SingleCatalog(CatalogRef::parse("10").unwrap())
        );
    }

    #[test]
    fn test_invalid_api_version_is_config_error() {
        assert!(matches!(
            build_config(&args(&["--api-version", "2025-02"])),
            Err(ConfigError::InvalidApiVersion { .. })
        ));
    }
}
