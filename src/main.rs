mod app;
mod config;
mod logging;
mod resolver;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{DefaultTerminal, Terminal};
use tracing::{debug, info};

use crate::app::App;

/// Terminal chatbot for personal finance basics.
#[derive(Debug, Parser)]
#[command(name = "moneymind", version, about)]
struct Cli {
    /// Resolve a single query and print the advice without starting the UI.
    #[arg(long, value_name = "QUERY")]
    ask: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // One-shot mode: no terminal UI, no logging setup.
    if let Some(query) = cli.ask {
        // Empty input never reaches the resolver.
        if !query.is_empty() {
            println!("{}", resolver::resolve(&query));
        }
        return Ok(());
    }

    let start_time = Instant::now();

    // Load configuration first so the log level can come from it
    let loaded_config = config::load_config();

    let (session_id, _guard) = match logging::init(&loaded_config.config.logging.level) {
        Ok(ctx) => {
            logging::cleanup_old_logs(&ctx.log_directory);
            (ctx.session_id, Some(ctx._guard))
        }
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {}", e);
            (logging::generate_session_id(), None)
        }
    };

    debug!(
        config_path = %loaded_config.config_path.display(),
        status = ?loaded_config.status,
        "config_loaded"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = Terminal::new(ratatui::backend::CrosstermBackend::new(stdout))?;

    let app = App::new(loaded_config.config, session_id.clone());
    let result = run_app(terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;

    // Log session end
    let duration = start_time.elapsed();
    info!(
        session_id = %session_id,
        duration_secs = duration.as_secs_f64(),
        "session_end"
    );

    result
}

fn run_app(mut terminal: DefaultTerminal, mut app: App) -> Result<()> {
    loop {
        app.tick();

        // Draw UI
        terminal.draw(|f| ui::draw_ui(f, &app))?;

        // Poll for events with a short timeout so the spinner keeps animating
        if crossterm::event::poll(Duration::from_millis(50))? {
            match crossterm::event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    KeyCode::Enter => app.submit(),
                    KeyCode::Esc => app.clear_input(),
                    KeyCode::Backspace => app.backspace(),
                    KeyCode::Delete => app.delete_char(),
                    KeyCode::Left => app.move_left(),
                    KeyCode::Right => app.move_right(),
                    KeyCode::Home => app.move_home(),
                    KeyCode::End => app.move_end(),
                    KeyCode::Char(c) => app.insert_char(c),
                    _ => {}
                },
                Event::Resize(_, _) => {
                    // Terminal resized, will be handled in next draw
                }
                _ => {}
            }
        }
    }
}
