use super::app_config::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "lazyimg",
    version,
    about = "Fetch remote images through a local disk cache",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Image cache directory.
    #[arg(long, value_name = "DIR", env = "LAZYIMG_CACHE_DIR", global = true)]
    pub cache_dir: Option<PathBuf>,

    /// HTTP request timeout in seconds.
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve an image through the cache, downloading it on a miss.
    Fetch {
        /// Image URL.
        url: String,

        /// Write the bytes here instead of stdout.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Clear the whole cache, or one entry when a URL is given.
    Clear {
        /// Image URL whose entry should be removed.
        url: Option<String>,
    },
    /// Print the cache file path for a URL.
    Path {
        /// Image URL.
        url: String,
    },
    /// Write a config file holding the defaults, at `--config` or the default path.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}
