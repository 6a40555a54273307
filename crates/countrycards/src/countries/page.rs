use crate::assets::placeholder_data_uri;
use crate::prelude::{eprintln, println, *};
use countrycards_core::card::CardOptions;
use countrycards_core::html::render_document;
use countrycards_core::view::{ViewOptions, ViewState};

use super::{client, load_view};

#[derive(Debug, clap::Args, Clone)]
pub struct PageOptions {
    /// Exit with an error status when the country list fails to load
    #[arg(long)]
    pub strict: bool,
}

/// Fetch once and print the resulting HTML page to stdout.
///
/// A failed load still prints a page (the error panel); `--strict` makes the
/// failure visible to scripts through the exit status as well.
pub async fn run(options: PageOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Fetching countries from {}", global.api_url);
    }

    let view = load_view(&client()?, &global.api_url).await;
    println!("{}", render_page(&view, global.view_options())?);

    match view.error() {
        Some(failure) if options.strict => Err(Error::LoadFailed(failure.message.clone()).into()),
        _ => Ok(()),
    }
}

/// Render a self-contained page.
///
/// No server hosts `/placeholder.png` for a printed page, so the flag
/// fallback is inlined.
fn render_page(view: &ViewState, options: ViewOptions) -> Result<String> {
    let options = ViewOptions {
        cards: CardOptions {
            placeholder_src: placeholder_data_uri()?,
            ..options.cards
        },
        ..options
    };

    Ok(render_document(&view.screen(&options)))
}
