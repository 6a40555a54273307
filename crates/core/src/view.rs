//! View controller state.
//!
//! The view moves from `Loading` to exactly one of `Failed` or `Loaded`, once.
//! Rendering goes through [`ViewState::screen`], which turns the state into a
//! surface-independent [`Screen`] that the HTML and terminal renderers draw.

use serde::Serialize;

use crate::card::{build_cards, CardOptions, CountryCard};
use crate::country::{sort_countries, Country};

pub const LOADING_BACKGROUND: &str = "loading.gif";
pub const ERROR_HEADING: &str = "Seems like there was an error loading the page :/";
pub const GRID_TITLE: &str = "Country Cards";

/// The single error kind of the view: the country list could not be loaded.
///
/// Network failures, HTTP error statuses, and malformed bodies all end up
/// here. `message` is the top-level description; `diagnostic` carries the
/// full report including the cause chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    pub message: String,
    pub diagnostic: String,
}

impl LoadFailure {
    pub fn new(message: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            diagnostic: diagnostic.into(),
        }
    }

    /// Failure whose diagnostic is just the message.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            diagnostic: message.clone(),
            message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Loading,
    Failed(LoadFailure),
    Loaded(Vec<Country>),
}

/// How much of a load failure is shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorDisplay {
    /// Full diagnostic text, unmodified.
    #[default]
    Verbatim,
    /// Top-level message only, without the cause chain.
    Redacted,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewOptions {
    pub cards: CardOptions,
    pub errors: ErrorDisplay,
}

/// What a surface should draw for the current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Screen {
    Placeholder { background: String },
    ErrorPanel { heading: String, detail: String },
    Grid { title: String, cards: Vec<CountryCard> },
}

impl ViewState {
    pub fn new() -> Self {
        Self::Loading
    }

    /// Apply the outcome of the one fetch.
    ///
    /// A successful list is sorted before it is stored. Only a `Loading`
    /// state accepts an outcome; once settled, later outcomes are dropped.
    pub fn settle(self, outcome: Result<Vec<Country>, LoadFailure>) -> Self {
        match self {
            ViewState::Loading => match outcome {
                Ok(countries) => ViewState::Loaded(sort_countries(countries)),
                Err(failure) => ViewState::Failed(failure),
            },
            settled => settled,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn error(&self) -> Option<&LoadFailure> {
        match self {
            ViewState::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Loaded countries, empty unless the load succeeded.
    pub fn countries(&self) -> &[Country] {
        match self {
            ViewState::Loaded(countries) => countries,
            _ => &[],
        }
    }

    pub fn screen(&self, options: &ViewOptions) -> Screen {
        match self {
            ViewState::Loading => Screen::Placeholder {
                background: LOADING_BACKGROUND.to_string(),
            },
            ViewState::Failed(failure) => Screen::ErrorPanel {
                heading: ERROR_HEADING.to_string(),
                detail: match options.errors {
                    ErrorDisplay::Verbatim => failure.diagnostic.clone(),
                    ErrorDisplay::Redacted => failure.message.clone(),
                },
            },
            ViewState::Loaded(countries) => Screen::Grid {
                title: GRID_TITLE.to_string(),
                cards: build_cards(countries, &options.cards),
            },
        }
    }
}

impl Screen {
    pub fn cards(&self) -> &[CountryCard] {
        match self {
            Screen::Grid { cards, .. } => cards,
            _ => &[],
        }
    }
}
