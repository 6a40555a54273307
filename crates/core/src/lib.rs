//! Core library for countrycards
//!
//! This crate is the **Functional Core** of the countrycards application,
//! following the Functional Core - Imperative Shell pattern.
//!
//! # Architecture Overview
//!
//! - **`countrycards_core`** (this crate): Pure transformation functions with zero I/O
//! - **`countrycards`**: HTTP fetch, terminal output and the web server (the Imperative Shell)
//!
//! Everything here is deterministic and testable with fixture data. The shell
//! performs the single fetch, hands the outcome to [`view::ViewState::settle`]
//! and draws whatever [`view::ViewState::screen`] returns.
//!
//! # Module Organization
//!
//! - [`country`]: The country record as returned by the REST Countries API
//! - [`collation`]: Locale-aware name comparison used for sorting
//! - [`format`]: Locale-aware population formatting
//! - [`card`]: Display model for one country card, including the flag fallback
//! - [`view`]: The loading / error / success state machine
//! - [`html`]: Standalone HTML document rendering
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use countrycards_core::country::parse_countries;
//! use countrycards_core::view::{ViewOptions, ViewState};
//!
//! let countries = parse_countries(body)?;
//! let view = ViewState::new().settle(Ok(countries));
//! let html = countrycards_core::html::render_document(&view.screen(&ViewOptions::default()));
//! ```

pub mod card;
pub mod collation;
pub mod country;
pub mod format;
pub mod html;
pub mod view;
