use crate::prelude::*;
use countrycards_core::country::{parse_countries, Country};
use countrycards_core::view::{LoadFailure, ViewState};

pub mod list;
pub mod page;

/// Every sovereign state, as flagged by the data source.
pub const COUNTRIES_URL: &str = "https://restcountries.com/v3.1/independent?status=true";

pub fn client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("countrycards/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}

/// Fetch the country list. Records come back in API order.
pub async fn fetch_countries(client: &reqwest::Client, url: &str) -> Result<Vec<Country>> {
    let response = client
        .get(url)
        .send()
        .await
        .context("Failed to fetch country list")?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        })
        .context("Failed to fetch country list");
    }

    let body = response
        .text()
        .await
        .context("Failed to read country list response")?;

    parse_countries(&body).context("Failed to parse country list")
}

/// Diagnostic text for an error report: the message followed by its causes.
///
/// Built from the cause chain rather than the report's `Debug` output, which
/// carries terminal color codes once `color_eyre` is installed.
pub fn diagnostic(err: &color_eyre::eyre::Report) -> String {
    let mut text = f!("Error: {err}");
    for (idx, cause) in err.chain().skip(1).enumerate() {
        if idx == 0 {
            text.push_str("\n\nCaused by:");
        }
        text.push_str(&f!("\n    {idx}: {cause}"));
    }
    text
}

pub fn load_failure(err: &color_eyre::eyre::Report) -> LoadFailure {
    LoadFailure::new(err.to_string(), diagnostic(err))
}

/// Fetch the country list, collapsing every failure into a [`LoadFailure`].
///
/// Network errors, HTTP error statuses and malformed bodies are not told apart.
pub async fn load(client: &reqwest::Client, url: &str) -> Result<Vec<Country>, LoadFailure> {
    match fetch_countries(client, url).await {
        Ok(countries) => {
            log::info!("Loaded {} countries from {url}", countries.len());
            Ok(countries)
        }
        Err(err) => {
            log::error!("Couldn't get countries. {err:#}");
            Err(load_failure(&err))
        }
    }
}

/// Fetch once and return the settled view.
pub async fn load_view(client: &reqwest::Client, url: &str) -> ViewState {
    ViewState::new().settle(load(client, url).await)
}
