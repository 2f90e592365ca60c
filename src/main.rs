//! Lectern - a terminal feed reader core.
//!
//! # Usage
//!
//! ```bash
//! lectern feeds.json
//! lectern --select 42 feeds.json
//! lectern --no-images feeds.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use lectern::app::App;
use lectern::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};

/// A terminal feed reader with callout highlighting and an image viewer
#[derive(Parser, Debug)]
#[command(name = "lectern", version, about, long_about = None)]
struct Cli {
    /// Feed dump (JSON) to read
    #[arg(value_name = "DUMP")]
    dump: PathBuf,

    /// Article id to open at startup
    #[arg(long, value_name = "ID")]
    select: Option<u64>,

    /// Disable image rendering (show placeholders only)
    #[arg(long)]
    no_images: bool,

    /// Directory downloaded images are saved into
    #[arg(long, value_name = "DIR")]
    download_dir: Option<PathBuf>,

    /// Write tracing output to a file
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn init_logging(log_path: Option<&std::path::Path>) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into());
    match log_path {
        Some(path) => {
            // The terminal owns stderr while the app runs; logs go to a file.
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log.as_deref())?;

    if !cli.dump.exists() {
        anyhow::bail!("Feed dump not found: {}", cli.dump.display());
    }

    let mut app = App::new(cli.dump)
        .with_images_enabled(!effective.no_images)
        .with_download_dir(effective.download_dir.clone())
        .with_select(cli.select)
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    app.run().context("Application error")
}
