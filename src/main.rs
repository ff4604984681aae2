use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use arboard::Clipboard;
use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;

use dispatch::app::{App, Effect};
use dispatch::config::{self, Config};
use dispatch::data::{self, sample, DataError, Datasets};
use dispatch::{input, logging, ui};

#[derive(Debug, Parser)]
#[command(
    name = "dispatch",
    version,
    about = "Dispatch: driver assignment dashboard for the terminal"
)]
struct Args {
    /// Initial route (/, /completed, /track, /assign)
    #[arg(long, default_value = "/")]
    route: String,

    /// Completed assignments file (.csv or .json)
    #[arg(long)]
    completed: Option<PathBuf>,

    /// Ongoing assignments file (.csv or .json)
    #[arg(long)]
    ongoing: Option<PathBuf>,

    /// Config file (defaults to $DISPATCH_CONFIG or the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = match args.config.as_deref() {
        Some(path) => config::load_from(path),
        None => config::load(),
    };
    let _log_guard = logging::init(&config.log)?;
    tracing::info!(route = %args.route, "starting");

    let (datasets, load_errors) = load_datasets(&args, &config);
    let mut app = App::new(datasets, config.grid.grid_options(), &args.route);
    app.report_load_errors(&load_errors);

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "exited with error");
        eprintln!("{err:?}");
    }

    Ok(())
}

/// CLI paths win over the config file; anything missing or unreadable falls
/// back to the built-in samples.
fn load_datasets(args: &Args, settings: &Config) -> (Datasets, Vec<DataError>) {
    let completed_path = args
        .completed
        .clone()
        .or_else(|| settings.data.completed.as_deref().and_then(config::expand_path));
    let ongoing_path = args
        .ongoing
        .clone()
        .or_else(|| settings.data.ongoing.as_deref().and_then(config::expand_path));

    let (completed, completed_err) =
        data::load_or_sample(completed_path.as_deref(), sample::completed);
    let (ongoing, ongoing_err) = data::load_or_sample(ongoing_path.as_deref(), sample::ongoing);
    let errors = [completed_err, ongoing_err].into_iter().flatten().collect();
    (Datasets { completed, ongoing }, errors)
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;
        if app.should_quit {
            tracing::info!("quit");
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => input::handle_key(&mut app, key),
                Event::Mouse(mouse) => {
                    if let Some(size) = terminal_rect() {
                        input::handle_mouse(&mut app, mouse, size);
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        for effect in app.take_effects() {
            apply_effect(&mut app, effect);
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}

fn apply_effect(app: &mut App, effect: Effect) {
    match effect {
        Effect::Clipboard { text, label } => {
            let ok = match Clipboard::new() {
                Ok(mut clipboard) => clipboard.set_text(text.as_str()).is_ok(),
                Err(err) => {
                    tracing::warn!(error = %err, "clipboard unavailable");
                    false
                }
            };
            app.apply_clipboard_result(label, ok);
        }
    }
}

fn terminal_rect() -> Option<Rect> {
    let (width, height) = crossterm::terminal::size().ok()?;
    Some(Rect {
        x: 0,
        y: 0,
        width,
        height,
    })
}
