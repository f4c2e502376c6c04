use std::io;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use ratatui::Terminal;
use ratatui::crossterm::event;
use ratatui::crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use tokio::sync::mpsc;

use artview_core::source::mock::MockSource;
use artview_core::{Config, ConfigOverrides, PageSource};

mod action;
mod app;
mod backend;
mod input;
mod logging;
mod model;
mod theme;
mod tui_event;
mod view;

use app::App;

/// artview: browse the Art Institute of Chicago collection and select rows
/// across pages.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Artworks endpoint (default: https://api.artic.edu/api/v1/artworks)
    #[arg(long)]
    api_base: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Color theme: default or modern
    #[arg(long)]
    theme: Option<String>,

    /// Browse a generated demo collection of N artworks instead of the API
    #[arg(long, value_name = "N")]
    demo: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let _log_guard = logging::init();

    // CLI flags > env vars > config file > defaults
    let file_config = artview_core::config_file::load_config();
    let config = Config::resolve(
        &file_config,
        ConfigOverrides {
            api_base: args.api_base,
            timeout_secs: args.timeout,
            theme: args.theme,
        },
    );
    tracing::info!(api_base = %config.api_base, timeout_secs = config.timeout_secs, "starting");

    let (source, origin): (Arc<dyn PageSource>, String) = match args.demo {
        Some(total) => (
            Arc::new(MockSource::sequential(total).with_delay(Duration::from_millis(250))),
            format!("demo collection ({total} artworks)"),
        ),
        None => (Arc::new(config.client()), config.api_base.clone()),
    };

    let theme = theme::Theme::by_name(config.theme.as_deref());
    tracing::debug!(theme = theme.name, "theme selected");

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let backend_terminal = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_terminal)?;

    // Drain any stray input events (e.g. Enter keypress from launching the command)
    while event::poll(Duration::from_millis(50)).unwrap_or(false) {
        let _ = event::read();
    }

    let mut app = App::new(theme, origin);

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<tui_event::BackendCommand>();
    app.backend_cmd_tx = Some(cmd_tx);

    tokio::spawn(backend::run(source, cmd_rx, event_tx));

    app.go_to_page(1);

    // Main event loop
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|f| app.view(f))?;

        tokio::select! {
            maybe_event = event_rx.recv() => {
                if let Some(backend_event) = maybe_event {
                    app.handle_backend_event(backend_event);
                    // Drain any additional queued backend events
                    while let Ok(evt) = event_rx.try_recv() {
                        app.handle_backend_event(evt);
                    }
                }
            }
            _ = async {
                if event::poll(tick_rate).unwrap_or(false)
                    && let Ok(evt) = event::read()
                {
                    let action = input::map_event(&evt, &app.input_mode);
                    app.update(action);
                }
            } => {}
        }

        app.update(action::Action::Tick);

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    tracing::info!(selected = app.selection.selected_count(), "exiting");
    Ok(())
}
