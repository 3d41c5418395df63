//! blockseal: store encrypted files as content-addressed blocks
//!
//! Commands:
//!   add <filename>                 - encrypt a file, store it, print its address and secret
//!   get <address> <secret> [-o]    - fetch, decrypt and write a stored file
//!   status                         - check the configured storage backend
//!   config show                    - display the effective configuration

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;

use blockseal_core::config::{expand_tilde, BlocksealConfig};
use blockseal_core::{Address, BackendKind};
use blockseal_storage::{build_block_store, fetch_file, store_file, BlockStore, S3Credentials};

// ── CLI structure ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "blockseal",
    version,
    about = "Store encrypted files as content-addressed blocks",
    long_about = "blockseal: encrypt a file into a padded, authenticated block, store it in a \
                  content-addressed backend (IPFS by default), and recover it later from its \
                  address and secret",
    arg_required_else_help = true
)]
struct Cli {
    /// Path to the configuration file
    #[arg(
        long,
        short = 'c',
        env = "BLOCKSEAL_CONFIG",
        default_value = "~/.config/blockseal/config.toml"
    )]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides log.level
    #[arg(long, env = "BLOCKSEAL_LOG")]
    log: Option<String>,

    /// Log format; overrides log.format
    #[arg(long, env = "BLOCKSEAL_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encrypt a file and store it as a single block
    ///
    /// Prints the block address and the secret needed to decrypt it.
    /// Both are required to get the file back; neither is stored anywhere.
    Add {
        /// File to store
        filename: PathBuf,
    },

    /// Fetch a block, decrypt it and write the file
    Get {
        /// Block address printed by `add`
        address: String,
        /// Secret printed by `add`
        secret: String,
        /// Output path (default: the address, in the current directory)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Check that the storage backend is reachable
    Status,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the active configuration (merged defaults + config file)
    Show,
}

#[derive(Clone, Debug, ValueEnum)]
enum LogFormat {
    Json,
    Text,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = expand_tilde(&cli.config);
    let config = BlocksealConfig::load(&config_path)
        .with_context(|| format!("loading config: {}", config_path.display()))?;

    let level = cli.log.as_deref().unwrap_or(&config.log.level);
    let format = cli.log_format.clone().unwrap_or(match config.log.format.as_str() {
        "json" => LogFormat::Json,
        _ => LogFormat::Text,
    });
    init_logging(level, &format);

    match cli.command {
        Commands::Add { filename } => cmd_add(&config, &filename).await,
        Commands::Get {
            address,
            secret,
            output,
        } => cmd_get(&config, &address, &secret, output.as_deref()).await,
        Commands::Status => cmd_status(&config).await,
        Commands::Config {
            action: ConfigAction::Show,
        } => cmd_config_show(&config, &config_path),
    }
}

/// Logs go to stderr; stdout carries only command output.
fn init_logging(level: &str, format: &LogFormat) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

// ── Storage from config + environment credentials ─────────────────────────────

/// Read S3 credentials from AWS_ACCESS_KEY_ID / AWS_SECRET_ACCESS_KEY
/// (falling back to BLOCKSEAL_ACCESS_KEY_ID / BLOCKSEAL_SECRET_ACCESS_KEY).
fn s3_credentials_from_env() -> Option<S3Credentials> {
    let access_key_id = std::env::var("AWS_ACCESS_KEY_ID")
        .or_else(|_| std::env::var("BLOCKSEAL_ACCESS_KEY_ID"))
        .ok()?;
    let secret_access_key = std::env::var("AWS_SECRET_ACCESS_KEY")
        .or_else(|_| std::env::var("BLOCKSEAL_SECRET_ACCESS_KEY"))
        .ok()?;
    Some(S3Credentials {
        access_key_id,
        secret_access_key,
    })
}

fn open_store(config: &BlocksealConfig) -> Result<Box<dyn BlockStore>> {
    let creds = match config.storage.backend {
        BackendKind::S3 => s3_credentials_from_env(),
        _ => None,
    };
    build_block_store(&config.storage, creds.as_ref()).context("building block store")
}

// ── `blockseal add` ───────────────────────────────────────────────────────────

async fn cmd_add(config: &BlocksealConfig, filename: &Path) -> Result<()> {
    let data = tokio::fs::read(filename)
        .await
        .with_context(|| format!("reading {}", filename.display()))?;

    let store = open_store(config)?;
    let stored = store_file(store.as_ref(), &data, config.codec.block_size)
        .await
        .with_context(|| format!("storing {}", filename.display()))?;

    println!("Key: {}", stored.address);
    println!("Secret: {}", stored.secret);
    Ok(())
}

// ── `blockseal get` ───────────────────────────────────────────────────────────

async fn cmd_get(
    config: &BlocksealConfig,
    address: &str,
    secret: &str,
    output: Option<&Path>,
) -> Result<()> {
    let store = open_store(config)?;
    get_to_path(store.as_ref(), &Address::new(address), secret, output).await?;
    Ok(())
}

/// Fetch and decode the block, then write it out. The output path is only
/// touched once the whole decode has succeeded.
async fn get_to_path(
    store: &dyn BlockStore,
    address: &Address,
    secret: &str,
    output: Option<&Path>,
) -> Result<PathBuf> {
    let data = fetch_file(store, address, secret)
        .await
        .with_context(|| format!("fetching {address}"))?;

    let path = resolve_output_path(address, output);
    write_output(&path, &data).await?;
    info!(path = %path.display(), bytes = data.len(), "wrote file");
    Ok(path)
}

/// Output path: `--output` if given, else the address literal.
fn resolve_output_path(address: &Address, output: Option<&Path>) -> PathBuf {
    output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(address.as_str()))
}

/// Atomic write: temp file beside `path`, then rename over it, so the
/// destination either holds the complete file or is left untouched.
/// The temp file is removed if any step fails.
async fn write_output(path: &Path, data: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let tmp = parent.join(format!(
        ".{}.blockseal_tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    let result = write_and_rename(&tmp, path, data).await;
    if result.is_err() {
        let _ = tokio::fs::remove_file(&tmp).await;
    }
    result
}

async fn write_and_rename(tmp: &Path, path: &Path, data: &[u8]) -> Result<()> {
    use tokio::io::AsyncWriteExt;

    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(tmp)
        .await
        .with_context(|| format!("creating tmp: {}", tmp.display()))?;
    file.write_all(data)
        .await
        .with_context(|| format!("writing tmp: {}", tmp.display()))?;
    file.sync_all()
        .await
        .with_context(|| format!("syncing tmp: {}", tmp.display()))?;
    drop(file);

    // 0644 regardless of umask
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(tmp, std::fs::Permissions::from_mode(0o644))
            .await
            .with_context(|| format!("setting permissions: {}", tmp.display()))?;
    }

    tokio::fs::rename(tmp, path)
        .await
        .with_context(|| format!("renaming to: {}", path.display()))?;
    Ok(())
}

// ── `blockseal status` ────────────────────────────────────────────────────────

async fn cmd_status(config: &BlocksealConfig) -> Result<()> {
    let store = open_store(config)?;

    println!("blockseal v{}", env!("CARGO_PKG_VERSION"));
    println!("  backend:    {}", store.describe());
    println!("  block size: {} bytes", config.codec.block_size);

    match store.check_health().await {
        Ok(()) => {
            println!("  storage:    ok");
            Ok(())
        }
        Err(e) => {
            println!("  storage:    UNREACHABLE");
            Err(e).context("storage health check failed")
        }
    }
}

// ── `blockseal config show` ───────────────────────────────────────────────────

fn cmd_config_show(config: &BlocksealConfig, config_path: &Path) -> Result<()> {
    if config_path.exists() {
        println!("# Configuration from: {}", config_path.display());
    } else {
        println!(
            "# Configuration: defaults (no file at {})",
            config_path.display()
        );
    }
    println!();
    let rendered = toml::to_string_pretty(config).context("serializing config to TOML")?;
    print!("{rendered}");
    Ok(())
}
