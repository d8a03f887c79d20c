use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use tokio::runtime::Handle;
use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use lazyimg::application::{ChannelDisplay, LazyImageLoader};
use lazyimg::domain::{LoadStatus, SourceId};
use lazyimg::infrastructure::{
    AppConfig, CliArgs, Command, DiskImageCache, HttpImageFetcher, StorageManager,
};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn storage() -> StorageManager {
    StorageManager::new().unwrap_or_else(|_| {
        StorageManager::with_dir(std::env::temp_dir().join(lazyimg::NAME).join("config"))
    })
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let mut config = storage()
        .load_config(args.config.as_deref())
        .wrap_err("failed to load config")?;
    config.merge_with_args(args);
    Ok(config)
}

async fn fetch(config: &AppConfig, cache: Arc<DiskImageCache>, url: String) -> Result<Vec<u8>> {
    let fetcher = Arc::new(HttpImageFetcher::new(&config.http)?);
    let (display, mut events) = ChannelDisplay::channel();

    let loader = LazyImageLoader::new(Handle::current(), cache, fetcher, Arc::new(display));
    let mut status = loader.subscribe();
    loader.set_source(url);

    let settled = status.wait_for(LoadStatus::is_settled).await?.clone();
    match settled {
        LoadStatus::Delivered(origin) => {
            let event = events
                .recv()
                .await
                .ok_or_else(|| eyre!("loader delivered without an event"))?;
            info!(source = %event.source, origin = %origin, size = event.bytes.len(), "Image resolved");
            Ok(event.bytes.to_vec())
        }
        LoadStatus::Failed(reason) => Err(eyre!("failed to load image: {reason}")),
        other => Err(eyre!("loader stopped in unexpected state: {other:?}")),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    if let Command::Init { force } = args.command {
        let path = storage()
            .write_default_config(args.config.as_deref(), force)
            .wrap_err("failed to write config")?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = load_config(&args)?;
    init_logging(&config)?;

    info!(version = lazyimg::VERSION, "Starting {}", lazyimg::NAME);

    let cache = Arc::new(
        config
            .cache_dir
            .clone()
            .map_or_else(DiskImageCache::default_location, DiskImageCache::new),
    );

    match args.command {
        Command::Fetch { url, output } => {
            let bytes = fetch(&config, cache, url).await?;
            match output {
                Some(path) => std::fs::write(&path, &bytes)
                    .wrap_err_with(|| format!("failed to write {}", path.display()))?,
                None => std::io::stdout().lock().write_all(&bytes)?,
            }
        }
        Command::Clear { url: Some(url) } => {
            LazyImageLoader::purge_cache_entry(cache.as_ref(), &SourceId::new(url)).await;
        }
        Command::Clear { url: None } => {
            LazyImageLoader::purge_cache(cache.as_ref()).await?;
            info!(dir = %cache.cache_dir().display(), "Cleared image cache");
        }
        Command::Path { url } => {
            println!("{}", cache.entry_path(&SourceId::new(url)).display());
        }
        // Handled before the config is loaded.
        Command::Init { .. } => {}
    }

    Ok(())
}
