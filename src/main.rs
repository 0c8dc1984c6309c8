//! Class Board - class information board with password-gated editing.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use class_board as app;

use app::AppError;
use app::cli::{self, Cli, Command, Password};
use app::config::{AppConfig, Backend, ConfigLoadResult, SECRET_ENV};
use app::store::{LocalStore, RemoteStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Determine config path based on mode
    let config_path = if cli.dev {
        PathBuf::from("config.toml")
    } else {
        cli.config.clone().unwrap_or_else(AppConfig::default_path)
    };

    if let Command::InitConfig { force } = cli.command {
        return init_config(&config_path, force);
    }

    let config = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => config,
        ConfigLoadResult::Missing => {
            bail!("No config at {}; run `class-board init-config` first", config_path.display())
        }
        ConfigLoadResult::Invalid(e) => {
            return Err(AppError::config(format!("{}: {e}", config_path.display())).into());
        }
    };

    let _log_guard = app::logging::init(&config.logging);
    tracing::info!("Config path: {:?}", config_path);

    let mut password = Password::new(cli.password);
    let secret = config.store.admin_secret.as_str();
    match config.store.backend {
        Backend::Remote => {
            tracing::info!("Using remote store at {}", config.remote.api_url);
            let store = RemoteStore::new(&config.remote, secret)?;
            cli::run(store, cli.command, &mut password).await
        }
        Backend::Local => {
            let path = &config.local.database_path;
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .map_err(AppError::from)
                    .with_context(|| format!("Cannot create data directory {}", parent.display()))?;
            }
            tracing::info!("Using local store at {}", path.display());
            let store = LocalStore::open(&config.local.database_url(), secret).await?;
            cli::run(store, cli.command, &mut password).await
        }
    }
}

/// Write a default config file.
fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    AppConfig::default()
        .save(path)
        .with_context(|| format!("Cannot write {}", path.display()))?;

    println!("Wrote {}", path.display());
    println!("Set store.admin_secret (or {SECRET_ENV}) before making changes.");
    Ok(())
}
