use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use artview_core::source::mock::MockSource;
use artview_core::{BulkCount, Config, ConfigOverrides, PageSource, SelectionController, load_page};

mod output;

use output::{ColorMode, SelectSummary};

/// artview: print pages of the Art Institute of Chicago collection and run
/// bulk selections across pages from the command line
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Artworks endpoint (default: https://api.artic.edu/api/v1/artworks)
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Use a generated demo collection of N artworks instead of the API
    #[arg(long, global = true, value_name = "N")]
    demo: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one page of artworks
    Page {
        /// 1-based page number
        #[arg(default_value_t = 1)]
        page: u32,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Select N rows starting from a page, following pages until done
    Select {
        /// Total number of rows to select
        count: String,

        /// Page the selection starts on
        #[arg(long, default_value_t = 1)]
        start_page: u32,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // CLI flags > env vars > config file > defaults
    let file_config = artview_core::config_file::load_config();
    let config = Config::resolve(
        &file_config,
        ConfigOverrides {
            api_base: cli.api_base,
            timeout_secs: cli.timeout,
            theme: None,
        },
    );

    let source: Arc<dyn PageSource> = match cli.demo {
        Some(total) => Arc::new(MockSource::sequential(total)),
        None => Arc::new(config.client()),
    };

    match cli.command {
        Command::Page { page, no_color } => print_page(source.as_ref(), page, no_color).await,
        Command::Select {
            count,
            start_page,
            no_color,
        } => {
            // Validate before touching the network.
            let count = match BulkCount::parse(&count) {
                Ok(count) => count,
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(2);
                }
            };
            select(source.as_ref(), count, start_page, no_color).await
        }
    }
}

async fn print_page(source: &dyn PageSource, page: u32, no_color: bool) -> anyhow::Result<()> {
    let color = ColorMode(!no_color);
    let window = load_page(source, page)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load artworks: {e}"))?;

    let mut stdout = std::io::stdout();
    output::print_page(&mut stdout, &window, |_| false, color)?;
    stdout.flush()?;
    Ok(())
}

async fn select(
    source: &dyn PageSource,
    count: BulkCount,
    start_page: u32,
    no_color: bool,
) -> anyhow::Result<()> {
    let color = ColorMode(!no_color);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message(format!("Loading page {start_page}..."));

    let mut controller = SelectionController::new();
    let window = load_page(source, start_page)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load artworks: {e}"))?;
    controller.on_page_loaded(window);

    // Ids in the order they were added.
    let mut order = controller.request_bulk_select(count);
    let mut page = start_page;
    let mut pages_loaded = 1;

    while controller.is_pursuing() {
        page += 1;
        if let Some(p) = controller.pursuit() {
            spinner.set_message(format!(
                "Loading page {page}... ({} of {} selected)",
                controller.selected_count(),
                p.target
            ));
        }
        let window = load_page(source, page).await.map_err(|e| {
            spinner.finish_and_clear();
            anyhow::anyhow!("Failed to load artworks: {e}")
        })?;
        pages_loaded += 1;
        order.extend(controller.on_page_loaded(window));
    }
    spinner.finish_and_clear();
    tracing::info!(selected = order.len(), pages_loaded, "bulk selection finished");

    let mut stdout = std::io::stdout();
    output::print_selected_ids(&mut stdout, &order)?;
    output::print_select_summary(
        &mut stdout,
        &SelectSummary {
            requested: count.get(),
            selected: controller.selected_count(),
            total: controller.window().total,
            start_page,
            last_page: page,
            pages_loaded,
        },
        color,
    )?;
    stdout.flush()?;
    Ok(())
}
