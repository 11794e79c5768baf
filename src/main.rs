use clap::Parser;
use color_eyre::eyre::bail;
use color_eyre::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use std::io::stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use floor_navigator::catalog::{builtin, load_catalog_file};
use floor_navigator::fetch::{DiagramSource, FetchWorker, FileSource, HttpSource};
use floor_navigator::telemetry;
use floor_navigator::ui::App;
use floor_navigator::viewer::MapViewer;

#[derive(Parser, Debug)]
#[command(name = "floor-navigator")]
#[command(about = "Floor Navigator - browse building floor plans and rooms")]
#[command(version)]
struct Args {
    /// Directory the floor map paths are relative to
    #[arg(long, env = "NAVIGATOR_ROOT", default_value = ".", value_name = "DIR")]
    root: PathBuf,

    /// Fetch floor maps over HTTP from this base URL instead of the root directory
    #[arg(long, env = "NAVIGATOR_BASE_URL", value_name = "URL")]
    base_url: Option<String>,

    /// Floor catalog JSON (defaults to the built-in college catalog)
    #[arg(long, env = "NAVIGATOR_CATALOG", value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Floor shown at startup (defaults to the lowest floor)
    #[arg(long)]
    floor: Option<u32>,

    /// HTTP timeout in seconds
    #[arg(long, value_name = "SECS")]
    fetch_timeout: Option<u64>,

    /// Write logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print the catalog as JSON and exit
    #[arg(long)]
    dump_catalog: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if let Some(log_file) = &args.log_file {
        telemetry::init_file_logging(log_file, &args.log_level)?;
    }

    let catalog = match &args.catalog {
        Some(path) => load_catalog_file(path)?,
        None => builtin::college(),
    };

    if args.dump_catalog {
        println!("{}", catalog.to_json_string()?);
        return Ok(());
    }

    let Some(floor) = args.floor.or_else(|| catalog.first_floor()) else {
        bail!("catalog contains no floors");
    };

    let source: Arc<dyn DiagramSource> = match &args.base_url {
        Some(base_url) => Arc::new(HttpSource::new(
            base_url,
            args.fetch_timeout.map(Duration::from_secs),
        )),
        None => Arc::new(FileSource::new(&args.root)),
    };
    tracing::info!(
        floors = catalog.len(),
        rooms = catalog.total_rooms(),
        floor,
        "starting navigator"
    );

    let mut app = App::new(MapViewer::new(catalog), FetchWorker::new(source));
    app.open_floor(floor)?;

    let terminal = ratatui::init();
    execute!(stdout(), EnableMouseCapture)?;
    let result = app.run(terminal);
    if let Err(err) = execute!(stdout(), DisableMouseCapture) {
        tracing::warn!(%err, "failed to disable mouse capture");
    }
    ratatui::restore();
    result
}
