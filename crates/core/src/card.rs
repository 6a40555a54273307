use serde::Serialize;

use crate::country::Country;
use crate::format::{format_population, Locale};

/// Flag image service, keyed by the two-letter country code.
pub const FLAG_URL_TEMPLATE: &str = "https://flagsapi.com/{code}/flat/64.png";

/// Locally served image shown when a flag fails to load.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.png";

pub const NO_CAPITAL: &str = "No capital";
pub const CAPITAL_ICON: &str = "🌆";
pub const REGION_ICON: &str = "🌐";
pub const POPULATION_ICON: &str = "👥";

/// Glyph used in the terminal when a code has no regional-indicator flag.
pub const PLACEHOLDER_FLAG: &str = "🏳";

/// Options controlling how records become cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardOptions {
    pub flag_url_template: String,
    pub placeholder_src: String,
    pub locale: Locale,
}

impl Default for CardOptions {
    fn default() -> Self {
        Self {
            flag_url_template: FLAG_URL_TEMPLATE.to_string(),
            placeholder_src: PLACEHOLDER_IMAGE.to_string(),
            locale: Locale::default(),
        }
    }
}

/// Which source a flag image currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagState {
    Remote,
    Fallback,
}

/// Flag image with a one-shot fallback.
///
/// This is the flag as published in the JSON screen (`/state`,
/// `list --json`). Rendering always starts from [`FlagState::Remote`]; the
/// swap itself happens where the image is loaded. The HTML page does it in the
/// `onerror` handler, and a JSON consumer applies [`FlagImage::on_load_error`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagImage {
    pub src: String,
    pub fallback_src: String,
    pub alt: String,
    pub state: FlagState,
}

impl FlagImage {
    /// Source the image should be displayed from right now.
    pub fn current_src(&self) -> &str {
        match self.state {
            FlagState::Remote => &self.src,
            FlagState::Fallback => &self.fallback_src,
        }
    }

    /// Record a load failure. Swaps to the fallback the first time only.
    ///
    /// Returns `true` if the source changed. A failing placeholder must not
    /// loop, so any later call is a no-op.
    pub fn on_load_error(&mut self) -> bool {
        match self.state {
            FlagState::Remote => {
                self.state = FlagState::Fallback;
                true
            }
            FlagState::Fallback => false,
        }
    }
}

/// Display model for a single country card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryCard {
    pub key: String,
    pub flag: FlagImage,
    pub name: String,
    pub capital_line: String,
    pub region_line: String,
    pub population_line: String,
}

/// Expand the flag URL template for a country code.
pub fn flag_url(template: &str, code: &str) -> String {
    template.replace("{code}", code)
}

pub fn capital_line(country: &Country) -> String {
    format!(
        "{CAPITAL_ICON} {}",
        country.first_capital().unwrap_or(NO_CAPITAL)
    )
}

pub fn region_line(country: &Country) -> String {
    format!("{REGION_ICON} {}", country.region)
}

pub fn population_line(country: &Country, locale: Locale) -> String {
    format!(
        "{POPULATION_ICON} {}",
        format_population(country.population, locale)
    )
}

/// Build the card for one record
pub fn build_card(country: &Country, options: &CardOptions) -> CountryCard {
    CountryCard {
        key: country.country_code().to_string(),
        flag: FlagImage {
            src: flag_url(&options.flag_url_template, country.country_code()),
            fallback_src: options.placeholder_src.clone(),
            alt: format!("Flag of {}", country.common_name()),
            state: FlagState::Remote,
        },
        name: country.common_name().to_string(),
        capital_line: capital_line(country),
        region_line: region_line(country),
        population_line: population_line(country, options.locale),
    }
}

/// Build one card per record, preserving order.
pub fn build_cards(countries: &[Country], options: &CardOptions) -> Vec<CountryCard> {
    countries
        .iter()
        .map(|country| build_card(country, options))
        .collect()
}

/// Regional-indicator flag for a two-letter code.
///
/// Returns `None` for anything that is not exactly two ASCII letters.
pub fn flag_emoji(code: &str) -> Option<String> {
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    code.to_ascii_uppercase()
        .chars()
        .map(|c| char::from_u32(0x1F1E6 + (c as u32 - 'A' as u32)))
        .collect()
}

/// Terminal flag with the placeholder glyph as fallback.
pub fn flag_glyph(code: &str) -> String {
    flag_emoji(code).unwrap_or_else(|| PLACEHOLDER_FLAG.to_string())
}

pub const MAX_GRID_COLUMNS: usize = 5;

/// Number of card columns that fit in `available_width`.
///
/// Always between 1 and [`MAX_GRID_COLUMNS`], matching the responsive grid
/// of the HTML page.
pub fn grid_columns(available_width: usize, card_width: usize, gap: usize) -> usize {
    if card_width == 0 {
        return 1;
    }

    ((available_width + gap) / (card_width + gap)).clamp(1, MAX_GRID_COLUMNS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::country::fixtures::country;

    #[test]
    fn test_capital_line_missing_capital() {
        let chad = country("Chad", "TD", &[], "Africa", 16425859);
        assert_eq!(capital_line(&chad), "🌆 No capital");
    }

    #[test]
    fn test_capital_line_present() {
        let brazil = country("Brazil", "BR", &["Brasília"], "Americas", 213993437);
        assert_eq!(capital_line(&brazil), "🌆 Brasília");
    }

    #[test]
    fn test_build_card_fields() {
        let brazil = country("Brazil", "BR", &["Brasília"], "Americas", 213993437);

        let card = build_card(&brazil, &CardOptions::default());

        assert_eq!(card.key, "BR");
        assert_eq!(card.name, "Brazil");
        assert_eq!(card.flag.src, "https://flagsapi.com/BR/flat/64.png");
        assert_eq!(card.flag.fallback_src, "/placeholder.png");
        assert_eq!(card.flag.alt, "Flag of Brazil");
        assert_eq!(card.flag.state, FlagState::Remote);
        assert_eq!(card.region_line, "🌐 Americas");
        assert_eq!(card.population_line, "👥 213,993,437");
    }

    #[test]
    fn test_build_card_respects_locale() {
        let options = CardOptions {
            locale: Locale::DeDe,
            ..CardOptions::default()
        };
        let card = build_card(&country("Chad", "TD", &[], "Africa", 1000000), &options);

        assert_eq!(card.population_line, "👥 1.000.000");
    }

    #[test]
    fn test_flag_fallback_swaps_exactly_once() {
        let mut cards = build_cards(
            &[
                country("Brazil", "BR", &["Brasília"], "Americas", 1),
                country("Chad", "TD", &[], "Africa", 1),
            ],
            &CardOptions::default(),
        );

        assert!(cards[0].flag.on_load_error());
        assert_eq!(cards[0].flag.current_src(), "/placeholder.png");

        // The placeholder failing too must not trigger another swap
        assert!(!cards[0].flag.on_load_error());
        assert_eq!(cards[0].flag.state, FlagState::Fallback);

        // Siblings are untouched
        assert_eq!(cards[1].flag.state, FlagState::Remote);
        assert_eq!(
            cards[1].flag.current_src(),
            "https://flagsapi.com/TD/flat/64.png"
        );
    }

    #[test]
    fn test_flag_url_custom_template() {
        assert_eq!(
            flag_url("http://localhost:8080/flags/{code}.png", "TD"),
            "http://localhost:8080/flags/TD.png"
        );
    }

    #[test]
    fn test_flag_emoji() {
        assert_eq!(flag_emoji("BR").as_deref(), Some("🇧🇷"));
        assert_eq!(flag_emoji("td").as_deref(), Some("🇹🇩"));
        assert_eq!(flag_emoji("XKX"), None);
        assert_eq!(flag_emoji("1A"), None);
        assert_eq!(flag_emoji(""), None);
        assert_eq!(flag_glyph("??"), PLACEHOLDER_FLAG);
    }

    #[test]
    fn test_grid_columns() {
        assert_eq!(grid_columns(20, 30, 2), 1);
        assert_eq!(grid_columns(30, 30, 2), 1);
        assert_eq!(grid_columns(62, 30, 2), 2);
        assert_eq!(grid_columns(80, 30, 2), 2);
        assert_eq!(grid_columns(500, 30, 2), MAX_GRID_COLUMNS);
        assert_eq!(grid_columns(80, 0, 2), 1);
    }
}
