//! Varitable - a terminal-based editor for product variant image tables.
//!
//! The table lives entirely in memory and is rebuilt on every launch;
//! only preferences are persisted.

mod app;
mod cli;
mod config;
mod error;
mod events;
mod grid;
mod library;
mod logging;
mod terminal;
mod ui;

use anyhow::Context;
use clap::Parser;
use tracing::warn;

use crate::app::App;
use crate::cli::Cli;
use crate::config::Config;
use crate::events::EventHandler;
use crate::grid::StateGrid;
use crate::library::ImageLibrary;
use crate::terminal::TerminalGuard;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init().context("failed to initialize logging")?;

    let config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using default: {}", e);
        Config::default()
    });
    ui::init_theme(&config.settings.theme);

    // CLI flags win over configuration.
    let image_dir = cli.images.as_ref().or(config.settings.image_dir.as_ref());
    let library = match image_dir {
        Some(dir) => ImageLibrary::scan_or_sample(dir),
        None => ImageLibrary::sample(),
    };

    let grid = if cli.empty {
        StateGrid::new(5)
    } else {
        StateGrid::seeded()
    };

    let mut app = App::with_parts(config, grid, library);
    let mut guard = TerminalGuard::new().context("failed to initialize terminal")?;
    let events = EventHandler::new();

    while !app.should_quit() {
        guard
            .terminal()
            .draw(|frame| app.view(frame))
            .context("failed to draw frame")?;
        let event = events.next().context("failed to read terminal event")?;
        app.update(event);
    }

    drop(guard);
    logging::shutdown();
    Ok(())
}
