//! Atlas Producer - publishes RFID hub scans to Atlas
//!
//! Fetches a bearer token with the OAuth2 client-credentials grant, then posts
//! one envelope holding a single scan to the ingestion endpoint.

use anyhow::Context;
use atlas_client::{AtlasConfig, IngestionClient, TokenClient};
use atlas_core::{
    Envelope, ExchangeIdGenerator, FixedExchangeId, JsonFileScanSource, PlaceholderScan,
    RandomExchangeIds, ScanRecord, ScanSource, MAX_EXCHANGE_ID,
};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

const DEFAULT_ENV_FILE: &str = ".env";

#[derive(Parser, Debug)]
#[command(name = "atlas-producer")]
#[command(version)]
#[command(about = "Publish an RFID hub scan to the Atlas ingestion endpoint", long_about = None)]
struct Cli {
    /// dotenv file with endpoint and client settings [default: .env]
    #[arg(short, long, env = "ATLAS_ENV_FILE")]
    env_file: Option<PathBuf>,

    /// Scan record JSON file (placeholder scan when omitted)
    #[arg(short, long)]
    record: Option<PathBuf>,

    /// Use this exchange id instead of a random one
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..MAX_EXCHANGE_ID as i64))]
    exchange_id: Option<u32>,

    /// Print the envelope and exit without contacting any endpoint
    #[arg(long)]
    dry_run: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Config problems surface before any network call; a dry run can do without
    let loaded = load_config(cli.env_file.as_deref(), Path::new(DEFAULT_ENV_FILE));
    let config = match loaded {
        Ok(loaded) => Some(loaded),
        Err(e) if cli.dry_run => {
            init_logging(log_level(cli.verbose, None))?;
            warn!("Configuration unavailable for dry run: {}", e);
            None
        }
        Err(e) => return Err(e),
    };

    if let Some((config, origin)) = &config {
        init_logging(log_level(cli.verbose, Some(&config.log_level)))?;
        match origin {
            ConfigOrigin::File(path) => info!("Configuration loaded from {}", path.display()),
            ConfigOrigin::Environment => warn!(
                "No {} file found, configuration read from the process environment",
                DEFAULT_ENV_FILE
            ),
        }
    }

    let envelope = build_envelope(&cli)?;

    match config {
        Some((config, _)) if !cli.dry_run => publish_command(&config, &envelope).await,
        _ => {
            println!("{}", serde_json::to_string_pretty(&envelope)?);
            Ok(())
        }
    }
}

/// Where the configuration was read from
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConfigOrigin {
    File(PathBuf),
    Environment,
}

/// Load config from the env file, falling back to the process environment
/// when no file is named and the default file is absent
fn load_config(
    env_file: Option<&Path>,
    default_file: &Path,
) -> anyhow::Result<(AtlasConfig, ConfigOrigin)> {
    let path = match env_file {
        Some(path) => path,
        None if default_file.exists() => default_file,
        None => {
            let config =
                AtlasConfig::from_env().context("loading configuration from environment")?;
            return Ok((config, ConfigOrigin::Environment));
        }
    };

    let config = AtlasConfig::from_env_file(path)
        .with_context(|| format!("loading configuration from {}", path.display()))?;
    Ok((config, ConfigOrigin::File(path.to_path_buf())))
}

/// Setup logging - CLI verbose flag takes precedence, then config, then default
fn log_level(verbose: u8, configured: Option<&str>) -> Level {
    if verbose > 0 {
        return match verbose {
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
    }

    match configured.unwrap_or("info").to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn init_logging(level: Level) -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn build_envelope(cli: &Cli) -> anyhow::Result<Envelope<ScanRecord>> {
    let source: Box<dyn ScanSource> = match &cli.record {
        Some(path) => Box::new(JsonFileScanSource::new(path)),
        None => Box::new(PlaceholderScan),
    };
    let ids: Box<dyn ExchangeIdGenerator> = match cli.exchange_id {
        Some(id) => Box::new(FixedExchangeId(id)),
        None => Box::new(RandomExchangeIds),
    };

    let scan = source.next_scan().context("reading scan record")?;
    let envelope = Envelope::stamped(&*ids, scan);
    info!(
        "Built envelope {} published at {}",
        envelope.exchange_id, envelope.publish_time_ms
    );

    Ok(envelope)
}

async fn publish_command(
    config: &AtlasConfig,
    envelope: &Envelope<ScanRecord>,
) -> anyhow::Result<()> {
    let credential = TokenClient::new(config)?
        .acquire()
        .await
        .context("acquiring access token")?;

    let receipt = IngestionClient::new(config)?
        .publish(&credential.access_token, envelope)
        .await
        .context("posting RFID scans")?;

    println!("RFID scans posted successfully \n {}", receipt);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parse() {
        let cli = Cli::try_parse_from([
            "atlas-producer",
            "--env-file",
            "prod.env",
            "--exchange-id",
            "9999",
            "--dry-run",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.env_file, Some(PathBuf::from("prod.env")));
        assert_eq!(cli.exchange_id, Some(9999));
        assert!(cli.dry_run);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_exchange_id_out_of_range() {
        assert!(Cli::try_parse_from(["atlas-producer", "--exchange-id", "10000"]).is_err());
    }

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(0, None), Level::INFO);
        assert_eq!(log_level(0, Some("WARN")), Level::WARN);
        assert_eq!(log_level(0, Some("bogus")), Level::INFO);
        assert_eq!(log_level(1, Some("error")), Level::INFO);
        assert_eq!(log_level(2, None), Level::DEBUG);
        assert_eq!(log_level(5, None), Level::TRACE);
    }

    #[test]
    fn test_build_envelope_placeholder() {
        let cli = Cli::try_parse_from(["atlas-producer", "--exchange-id", "12"]).unwrap();
        let envelope = build_envelope(&cli).unwrap();

        assert_eq!(envelope.exchange_id, 12);
        assert_eq!(envelope.len(), 1);
        assert_eq!(envelope.messages[0].payload.center, "RAJU");
        assert_eq!(envelope.receive_time_ms, envelope.publish_time_ms - 100);
    }

    #[test]
    fn test_build_envelope_from_record_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scan.json");
        fs::write(
            &path,
            r#"{"tagHexEpc":"E2801160","timestamp":1,"trackingNumber":2,"isFedexTag":false,"center":"IND"}"#,
        )
        .unwrap();

        let cli =
            Cli::try_parse_from(["atlas-producer", "--record", path.to_str().unwrap()]).unwrap();
        let envelope = build_envelope(&cli).unwrap();

        assert!(envelope.exchange_id < MAX_EXCHANGE_ID);
        assert_eq!(envelope.messages[0].payload.tag_hex_epc, "E2801160");
    }

    #[test]
    fn test_load_config_missing_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.env");
        let default_file = temp_dir.path().join(".env");
        assert!(load_config(Some(&missing), &default_file).is_err());
    }

    fn write_env_file(path: &Path) {
        fs::write(
            path,
            "ATLAS_INGESTION_URL=https://atlas.example.com/ingest\n\
             OKTA_URL=https://okta.example.com/token\n\
             CLIENT_ID=producer\n\
             CLIENT_SECRET=s3cr3t\n",
        )
        .unwrap();
    }

    #[test]
    fn test_load_config_default_file() {
        let temp_dir = TempDir::new().unwrap();
        let default_file = temp_dir.path().join(".env");
        write_env_file(&default_file);

        let (config, origin) = load_config(None, &default_file).unwrap();
        assert_eq!(origin, ConfigOrigin::File(default_file));
        assert_eq!(config.client_id, "producer");
    }

    #[test]
    fn test_load_config_falls_back_to_environment() {
        let temp_dir = TempDir::new().unwrap();
        let default_file = temp_dir.path().join(".env");

        match load_config(None, &default_file) {
            Ok((_, origin)) => assert_eq!(origin, ConfigOrigin::Environment),
            Err(e) => assert!(format!("{:#}", e).contains("loading configuration from environment")),
        }
    }
}
