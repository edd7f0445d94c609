//! Book Finder: search Google Books or OpenLibrary from the desktop
//!
//! Usage:
//!   bookfinder                   - Open the Book Finder window
//!   bookfinder search [options]  - Search from the terminal
//!   bookfinder --help            - Show help

mod app;
mod catalog;
mod commands;
mod config;
mod error;
mod logging;
mod native;
mod preferences;
mod state;
mod ui;

use app::BookFinder;
use catalog::SearchForm;
use clap::Parser;
use commands::Cli;
use config::{Config, ProviderKind};
use iced::{window, Size};
use preferences::Preferences;

fn main() -> iced::Result {
    logging::init();

    let cli = Cli::parse();

    match cli.command {
        None => start_gui(),
        Some(search) => {
            if let Err(e) = run_search(search.search_form(), search.provider()) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

/// Headless search: one request, one line per book
fn run_search(form: SearchForm, provider: Option<ProviderKind>) -> error::Result<()> {
    let mut config = Config::discover()?;
    if let Some(kind) = provider {
        config.provider = kind;
    }

    let query = form
        .to_query()
        .ok_or_else(|| error::Error::Validation(form.empty_message().to_string()))?;

    let client = catalog::http_client(config.request_timeout());
    let provider = catalog::provider(&config, client);
    tracing::info!("Searching {} for {:?}", provider.name(), query);

    let rt = tokio::runtime::Runtime::new()?;
    let books = rt.block_on(provider.search(&query, config.page_size))?;

    if books.is_empty() {
        println!("No books found.");
    }
    for (i, book) in books.iter().enumerate() {
        println!("{:>2}. {}", i + 1, book);
        if let Some(link) = &book.link {
            println!("    {}", link);
        }
    }
    Ok(())
}

fn start_gui() -> iced::Result {
    let config = Config::discover().unwrap_or_else(|e| {
        tracing::warn!("{} (using default settings)", e);
        Config::default()
    });
    let preferences = Preferences::open_default();

    tracing::info!("Starting Book Finder...");

    iced::application(BookFinder::title, BookFinder::update, BookFinder::view)
        .subscription(BookFinder::subscription)
        .theme(BookFinder::theme)
        .window(window::Settings {
            size: Size::new(1100.0, 800.0),
            position: window::Position::Centered,
            min_size: Some(Size::new(640.0, 480.0)),
            resizable: true,
            ..Default::default()
        })
        .antialiasing(true)
        .run_with(move || BookFinder::new(config, preferences))
}
