use clap::{ArgAction, Parser, Subcommand};
use dialoguer::{Input, Select};
use serde::Serialize;
use show_finder::{
    ClickEvent, DEFAULT_BASE_URL, DirectoryError, Element, EpisodeController, EpisodeSummary,
    GET_EPISODES_CLASS, MISSING_IMAGE_URL, Page, SHOW_ID_ATTRIBUTE, SearchController,
    ShowDirectory, ShowSummary, WidgetConfig, WidgetError, find_episodes_button,
};
use std::process;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Search the TVmaze directory for shows and list their episodes
#[derive(Parser, Debug)]
#[command(name = "show-finder", version, about)]
struct Cli {
    /// Base URL of the TVmaze API
    #[arg(long, env = "SHOW_FINDER_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Image URL used for shows without artwork
    #[arg(long, default_value = MISSING_IMAGE_URL, global = true)]
    missing_image: String,

    /// Increase log output (-v: info, -vv: debug). RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search once and print the resulting page
    Search {
        /// Search term, passed to the directory as-is
        term: String,

        /// Also show the episodes of the show with this id
        #[arg(long, value_name = "SHOW_ID")]
        episodes: Option<u64>,

        /// Print the page as HTML instead of a text outline
        #[arg(long, conflicts_with = "json")]
        html: bool,

        /// Print the normalized show and episode records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search and browse episodes interactively
    Interactive,
}

/// Errors reported by the command line front end
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Widget(#[from] WidgetError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Show {0} is not among the search results")]
    ShowNotListed(u64),

    #[error("Failed to encode JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Records printed by `search --json`
#[derive(Debug, Serialize)]
struct SearchOutput {
    shows: Vec<ShowSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    episodes: Option<Vec<EpisodeSummary>>,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// First text found under the first descendant with `tag`.
fn text_of(element: &Element, tag: &str) -> String {
    element
        .find_by_tag(tag)
        .map(|e| e.text_content())
        .unwrap_or_default()
}

/// Prints the rendered page as a plain text outline.
fn print_outline(page: &Page) {
    let entries: Vec<&Element> = page.shows_list.child_elements().collect();

    if entries.is_empty() {
        println!("No shows found.");
    }

    for entry in entries {
        println!(
            "[{}] {}",
            entry.attribute(SHOW_ID_ATTRIBUTE).unwrap_or("?"),
            text_of(entry, "h5")
        );

        let summary = text_of(entry, "small");
        if !summary.is_empty() {
            println!("  {}", summary);
        }

        if let Some(image) = entry.find_by_tag("img").and_then(|img| img.attribute("src")) {
            println!("  Image: {}", image);
        }
    }

    if !page.episodes_area.is_hidden() {
        println!("\n=== Episodes ===");
        let lines: Vec<&Element> = page.episodes_list.child_elements().collect();
        if lines.is_empty() {
            println!("No episodes found.");
        }
        for line in lines {
            println!("  {}", line.text_content());
        }
    }
}

fn run_search(
    config: &WidgetConfig,
    term: &str,
    episodes: Option<u64>,
    html: bool,
) -> Result<(), CliError> {
    let directory = config.build_directory()?;
    let search = SearchController::new(&directory);
    let episode_controller = EpisodeController::new(&directory);

    let mut page = Page::new();
    page.set_search_term(term);
    search.submit(&mut page)?;

    if let Some(show_id) = episodes {
        let button = find_episodes_button(&page.shows_list, show_id)
            .ok_or(CliError::ShowNotListed(show_id))?;
        episode_controller.handle_click(&mut page, &ClickEvent::new(button))?;
    }

    if html {
        println!("{}", page.to_html());
    } else {
        print_outline(&page);
    }

    Ok(())
}

fn run_search_json(
    config: &WidgetConfig,
    term: &str,
    episodes: Option<u64>,
) -> Result<(), CliError> {
    let directory = config.build_directory()?;
    let shows = directory.search_shows(term)?;

    let episodes = match episodes {
        Some(show_id) if shows.iter().any(|show| show.id == show_id) => {
            Some(directory.get_episodes(show_id)?)
        }
        Some(show_id) => return Err(CliError::ShowNotListed(show_id)),
        None => None,
    };

    let output = SearchOutput { shows, episodes };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

fn run_interactive(config: &WidgetConfig) -> Result<(), CliError> {
    let directory = config.build_directory()?;
    let search = SearchController::new(&directory);
    let episode_controller = EpisodeController::new(&directory);
    let mut page = Page::new();

    loop {
        let term = Input::<String>::new()
            .with_prompt("Search shows (Ctrl-C to quit)")
            .allow_empty(true)
            .interact_text()?;

        page.set_search_term(&term);
        if let Err(e) = search.submit(&mut page) {
            eprintln!("Error: {}", e);
            continue;
        }
        print_outline(&page);

        let buttons = page.shows_list.find_by_class(GET_EPISODES_CLASS);
        if buttons.is_empty() {
            continue;
        }

        let names: Vec<String> = page
            .shows_list
            .child_elements()
            .map(|entry| text_of(entry, "h5"))
            .collect();

        let selection = Select::new()
            .with_prompt("Show episodes for (Esc for a new search)")
            .items(&names)
            .default(0)
            .interact_opt()?;

        let Some(index) = selection else {
            continue;
        };
        let Some(button) = buttons.get(index) else {
            continue;
        };

        match episode_controller.handle_click(&mut page, &ClickEvent::new(button.clone())) {
            Ok(_) => print_outline(&page),
            Err(e) => eprintln!("Error: {}", e),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = WidgetConfig {
        base_url: cli.base_url,
        missing_image_url: cli.missing_image,
        ..Default::default()
    };

    let result = match cli.command {
        Command::Search {
            term,
            episodes,
            html,
            json,
        } => {
            if json {
                run_search_json(&config, &term, episodes)
            } else {
                run_search(&config, &term, episodes, html)
            }
        }
        Command::Interactive => run_interactive(&config),
    };

    if let Err(e) = result {
        eprintln!("\nError: {}", e);
        process::exit(1);
    }
}
