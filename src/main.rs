//! posterwall - A virtualized movie and series browser with TUI.
//!
//! Usage:
//!   posterwall                         Launch TUI on a synthetic library
//!   posterwall --catalog lib.json      Launch TUI on a catalog file
//!   posterwall list --kind series      Print a collection
//!   posterwall generate --count 1400 --out lib.json
//!   posterwall --help                  Show help

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use posterwall_catalog::{Catalog, CollectionProvider, SyntheticLibrary};
use posterwall_core::{LoadMode, MediaKind};
use posterwall_tui::{Tab, TuiConfig, UserSettings};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "POSTERWALL_LOG";

#[derive(Parser)]
#[command(
    name = "posterwall",
    version,
    about = "A virtualized movie and series browser",
    long_about = "posterwall browses large movie and series libraries through a fixed pool \
                  of poster cards.\n\n\
                  Launch the interactive TUI by running `posterwall`, or use \
                  subcommands for quick operations."
)]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    /// Cards appended per population tick
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Window in which repeated activations are dropped
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Tab to open on startup
    #[arg(long, value_enum)]
    tab: Option<TabArg>,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Where the library comes from.
#[derive(Args)]
struct SourceArgs {
    /// Catalog JSON file (defaults to a synthetic library)
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    /// Movies in the synthetic library
    #[arg(long, global = true, default_value = "1400")]
    movies: usize,

    /// Series in the synthetic library
    #[arg(long, global = true, default_value = "300")]
    series: usize,
}

#[derive(Subcommand)]
enum Command {
    /// Print a collection
    List {
        /// Collection to print
        #[arg(short, long, value_enum, default_value = "movies")]
        kind: KindArg,

        /// Print at most this many items
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Write a synthetic catalog to a file
    Generate {
        /// Number of movies
        #[arg(long, default_value = "1400")]
        count: usize,

        /// Number of series (defaults to a quarter of the movies)
        #[arg(long = "series-count")]
        series_count: Option<usize>,

        /// Output file
        #[arg(short, long)]
        out: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Movies,
    Series,
}

impl From<KindArg> for MediaKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Movies => MediaKind::Movie,
            KindArg::Series => MediaKind::Series,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TabArg {
    Dashboard,
    Movies,
    Series,
}

impl From<TabArg> for Tab {
    fn from(tab: TabArg) -> Self {
        match tab {
            TabArg::Dashboard => Tab::Dashboard,
            TabArg::Movies => Tab::Movies,
            TabArg::Series => Tab::Series,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.command.is_none())?;

    match cli.command {
        Some(Command::List {
            kind,
            limit,
            format,
        }) => {
            let catalog = open_catalog(&cli.source)?;
            run_list(&catalog, kind.into(), limit, format)?;
        }
        Some(Command::Generate {
            count,
            series_count,
            out,
        }) => {
            run_generate(count, series_count.unwrap_or(count / 4), &out)?;
        }
        None => {
            // Launch TUI
            let catalog = open_catalog(&cli.source)?;

            let mut grid = UserSettings::load().grid_config();
            if let Some(chunk_size) = cli.chunk_size {
                grid.chunk_size = chunk_size.max(1);
            }
            if let Some(ms) = cli.debounce_ms {
                grid.debounce_window = Duration::from_millis(ms);
            }

            let mut config = TuiConfig::new().with_grid(grid);
            if let Some(tab) = cli.tab {
                config = config.with_initial_tab(tab.into());
            }
            if let Some(path) = &cli.source.catalog {
                config = config.with_catalog_path(path);
            }
            posterwall_tui::run(catalog, config)?;
        }
    }

    Ok(())
}

/// Install the tracing subscriber.
///
/// The TUI owns the terminal, so interactive sessions log to a file.
fn init_logging(interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    if !interactive {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
        return Ok(());
    }

    let Some(dir) = dirs::data_dir().map(|d| d.join("posterwall").join("logs")) else {
        return Ok(());
    };
    std::fs::create_dir_all(&dir)
        .wrap_err_with(|| format!("Cannot create log directory {}", dir.display()))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("posterwall.log"))
        .wrap_err("Cannot open log file")?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

/// Load the catalog file, or generate the synthetic library.
fn open_catalog(source: &SourceArgs) -> Result<Catalog> {
    match &source.catalog {
        Some(path) => Catalog::load_json(path)
            .wrap_err_with(|| format!("Failed to load catalog {}", path.display())),
        None => SyntheticLibrary::new(source.movies, source.series)
            .build()
            .wrap_err("Failed to build synthetic library"),
    }
}

/// Print a collection through the provider boundary.
fn run_list(
    catalog: &Catalog,
    kind: MediaKind,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let mode = limit.map_or(LoadMode::Full, LoadMode::Limited);
    let collection = catalog.fetch_collection(kind, mode)?;

    match format {
        OutputFormat::Text => {
            println!();
            println!("{}", "─".repeat(70));
            println!(
                " {} - showing {} of {}",
                kind.plural(),
                collection.len(),
                collection.total_count
            );
            println!("{}", "─".repeat(70));
            println!();

            for item in &collection.items {
                let year = item.year().map(|y| y.to_string()).unwrap_or_default();
                let watched = if item.flags.watched { "✓" } else { " " };
                println!(
                    " {} {:<44} {:>4}  {}",
                    watched,
                    truncate(&item.title, 44),
                    year,
                    item.status.as_deref().unwrap_or("")
                );
            }

            if collection.summary().has_more {
                println!();
                println!(" … {} more", collection.total_count - collection.len());
            }
        }
        OutputFormat::Json => {
            let items: Vec<_> = collection.items.iter().map(|item| item.as_ref()).collect();
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
    }

    Ok(())
}

/// Write a synthetic catalog to `out`.
fn run_generate(movies: usize, series: usize, out: &Path) -> Result<()> {
    eprintln!("Generating {movies} movies and {series} series...");

    let catalog = SyntheticLibrary::new(movies, series)
        .build()
        .wrap_err("Failed to build synthetic library")?;
    catalog
        .save_json(out)
        .wrap_err_with(|| format!("Failed to write {}", out.display()))?;

    eprintln!("Wrote {} items to {}", catalog.len(), out.display());
    Ok(())
}

/// Truncate a string to max length, adding ellipsis if needed.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
