use crate::prelude::{eprintln, print, println, *};
use colored::Colorize;
use countrycards_core::card::{flag_glyph, grid_columns, CountryCard};
use countrycards_core::view::Screen;
use prettytable::{Cell, Row};

use super::{client, load_view};

/// Display columns reserved for one card.
const CARD_WIDTH: usize = 30;
/// Space between two cards, padding included.
const CARD_GAP: usize = 3;
const DEFAULT_TERMINAL_WIDTH: usize = 80;

#[derive(Debug, clap::Args, Clone)]
pub struct ListOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Number of card columns (defaults to what fits in the terminal)
    #[arg(short, long, env = "COUNTRY_CARDS_COLUMNS")]
    pub columns: Option<usize>,
}

pub async fn run(options: ListOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Fetching countries from {}", global.api_url);
    }

    let view = load_view(&client()?, &global.api_url).await;
    let screen = view.screen(&global.view_options());

    if options.json {
        println!("{}", format_screen_json(&screen)?);
    } else {
        let columns = options.columns.unwrap_or_else(detect_columns).max(1);
        print!("{}", format_screen_text(&screen, columns));
    }

    if let Some(failure) = view.error() {
        return Err(Error::LoadFailed(failure.message.clone()).into());
    }

    if global.verbose {
        eprintln!("Rendered {} cards", screen.cards().len());
    }

    Ok(())
}

fn detect_columns() -> usize {
    let width = terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| w as usize)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH);

    grid_columns(width, CARD_WIDTH, CARD_GAP)
}

fn format_screen_json(screen: &Screen) -> Result<String> {
    serde_json::to_string_pretty(screen).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

/// Convert a screen to terminal text with colors.
///
/// The loading placeholder has no text, so it renders as an empty string.
fn format_screen_text(screen: &Screen, columns: usize) -> String {
    match screen {
        Screen::Placeholder { .. } => String::new(),
        Screen::ErrorPanel { heading, detail } => format_error_panel(heading, detail),
        Screen::Grid { title, cards } => format_grid(title, cards, columns),
    }
}

fn format_error_panel(heading: &str, detail: &str) -> String {
    let mut result = String::new();
    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_red()));
    result.push_str(&f!("{}\n", heading.bright_white().bold()));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_red()));
    result.push_str(&f!("\n{}\n\n", detail.red().bold()));
    result
}

fn format_grid(title: &str, cards: &[CountryCard], columns: usize) -> String {
    let mut result = String::new();

    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&f!("{}\n", title.to_uppercase().bright_cyan().bold()));
    result.push_str(&f!("{}\n\n", "=".repeat(80).bright_cyan()));

    if cards.is_empty() {
        result.push_str(&f!("{}\n", "No countries to show.".yellow()));
        return result;
    }

    result.push_str(&cards_table(cards, columns).to_string());
    result.push_str(&f!(
        "\n{} {}\n",
        cards.len().to_string().bright_cyan().bold(),
        "countries".bright_white()
    ));

    result
}

/// Lay the cards out in rows of `columns` multi-line cells.
///
/// Cell text stays uncolored so the table can measure its width.
fn cards_table(cards: &[CountryCard], columns: usize) -> prettytable::Table {
    let mut table = new_table();

    for chunk in cards.chunks(columns.max(1)) {
        let cells = chunk.iter().map(|card| Cell::new(&card_text(card))).collect();
        table.add_row(Row::new(cells));
    }

    table
}

fn card_text(card: &CountryCard) -> String {
    f!(
        "{}\n{}\n{}\n{}\n{}\n",
        flag_glyph(&card.key),
        card.name,
        card.capital_line,
        card.region_line,
        card.population_line
    )
}
