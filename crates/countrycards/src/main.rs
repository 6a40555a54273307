use crate::prelude::*;
use clap::Parser;
use countrycards_core::card::{CardOptions, FLAG_URL_TEMPLATE, PLACEHOLDER_IMAGE};
use countrycards_core::format::Locale;
use countrycards_core::view::{ErrorDisplay, ViewOptions};

mod assets;
mod countries;
mod error;
mod prelude;
mod serve;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Browse the independent countries of the world as cards, in the terminal or the browser"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Country list endpoint
    #[clap(
        long,
        env = "COUNTRY_CARDS_API_URL",
        global = true,
        default_value = countries::COUNTRIES_URL
    )]
    api_url: String,

    /// Flag image URL template, `{code}` is replaced by the country code
    #[clap(
        long,
        env = "COUNTRY_CARDS_FLAG_URL",
        global = true,
        default_value = FLAG_URL_TEMPLATE
    )]
    flag_url: String,

    /// Locale used to format population counts
    #[clap(long, env = "COUNTRY_CARDS_LOCALE", global = true, default_value = "en-US")]
    locale: Locale,

    /// Show only the top-level error message instead of the full diagnostic
    #[clap(
        long,
        env = "COUNTRY_CARDS_REDACT_ERRORS",
        global = true,
        default_value = "false"
    )]
    redact_errors: bool,

    /// Whether to display additional information.
    #[clap(long, env = "COUNTRY_CARDS_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

impl Global {
    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            cards: CardOptions {
                flag_url_template: self.flag_url.clone(),
                placeholder_src: PLACEHOLDER_IMAGE.to_string(),
                locale: self.locale,
            },
            errors: if self.redact_errors {
                ErrorDisplay::Redacted
            } else {
                ErrorDisplay::Verbatim
            },
        }
    }
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Print the country cards in the terminal
    List(crate::countries::list::ListOptions),

    /// Print the country cards as a standalone HTML page
    Page(crate::countries::page::PageOptions),

    /// Serve the country cards page over HTTP
    Serve(crate::serve::ServeOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::List(options) => crate::countries::list::run(options, app.global).await,
        SubCommands::Page(options) => crate::countries::page::run(options, app.global).await,
        SubCommands::Serve(options) => crate::serve::run(options, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
