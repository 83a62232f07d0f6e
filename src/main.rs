use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::error;

use darth_scraper::config::ConfigLoader;
use darth_scraper::export::Quoting;
use darth_scraper::logging::{init_logging, LogConfig};
use darth_scraper::{Filter, Session};

/// Fetch a web page, preview it or export it to a .csv file
#[derive(Parser, Debug)]
#[command(name = "darth-scraper", version)]
struct Cli {
    /// Settings file (TOML, YAML or JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true, env = "DARTH_SCRAPER_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the filtered page, cut to the preview limit
    Preview {
        url: String,

        #[arg(short, long, value_enum)]
        filter: Option<Filter>,
    },
    /// Write the filtered page to <output-dir>/<filename>.csv
    Export {
        url: String,

        filename: String,

        #[arg(short, long, value_enum)]
        filter: Option<Filter>,

        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Quote fields per RFC 4180 instead of a plain comma join
        #[arg(long)]
        rfc4180: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_config = LogConfig {
        default_filter: if cli.verbose { "debug" } else { "info" }.to_string(),
        log_file: cli.log_file.clone(),
    };
    if let Err(e) = init_logging(&log_config) {
        eprintln!("{e}");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            let message = e
                .downcast_ref::<darth_scraper::ScrapeError>()
                .map(|err| err.user_message().to_string())
                .unwrap_or_else(|| format!("{e:#}"));
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_file(path);
    }
    let mut config = loader.load().context("loading settings")?;

    match cli.command {
        Command::Preview { url, filter } => {
            let session = Session::from_config(&config);
            let filter = filter.unwrap_or(config.default_filter);
            let preview = session.preview(&url, filter)?;
            println!("{preview}");
        }
        Command::Export {
            url,
            filename,
            filter,
            output_dir,
            rfc4180,
        } => {
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            if rfc4180 {
                config.quoting = Quoting::Rfc4180;
            }
            let session = Session::from_config(&config);
            let filter = filter.unwrap_or(config.default_filter);
            let path = session.export(&url, filter, &filename)?;
            println!("{}", path.display());
        }
    }

    Ok(())
}
