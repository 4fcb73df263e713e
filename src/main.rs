//! Ayumi - Walking with God daily
//!
//! Shows the day's devotional dashboard in the terminal, or prints it with
//! `--print`.

use std::io;
use std::panic;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use ayumi::app::App;
use ayumi::cli::Cli;
use ayumi::config::{Config, OutputMode};
use ayumi::{logger, ui};

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Resolves once, waiting at most `deadline`, and writes the result to stdout
async fn print_dashboard(
    mut app: App,
    output: OutputMode,
    deadline: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = app.wait_within(deadline).await;
    match output {
        OutputMode::Json => println!("{}", serde_json::to_string_pretty(content.as_ref())?),
        OutputMode::Devotional => print!("{}", ui::devotional_text(&content)),
        _ => print!("{}", ui::plain_text(&content)),
    }
    Ok(())
}

/// Runs the full-screen terminal view until the user quits
fn run_terminal(mut app: App) -> Result<(), Box<dyn std::error::Error>> {
    setup_panic_hook();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main event loop
    loop {
        app.poll_pending();
        terminal.draw(|f| ui::render(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    // The interactive view owns the terminal, so its logs go to a file
    let log_dir = match config.output {
        OutputMode::Interactive => config.resolved_cache_dir(),
        _ => None,
    };
    logger::init(config.verbose, log_dir.as_deref());

    let mut app = App::from_config(&config)?;
    app.start(config.force_refresh);

    match config.output {
        OutputMode::Interactive => run_terminal(app),
        output => print_dashboard(app, output, config.deadline).await,
    }
}
