//! HTML rendering of a [`Screen`].
//!
//! Produces a standalone HTML5 document. All text coming from the API or from
//! error diagnostics is escaped; nothing is dropped or rewritten.

use html_escape::{
    encode_double_quoted_attribute, encode_script_single_quoted_text,
    encode_style_single_quoted_text, encode_text,
};

use crate::card::CountryCard;
use crate::view::Screen;

/// Seconds between reloads while the view is still loading.
pub const LOADING_REFRESH_SECS: u32 = 1;

const STYLE: &str = r#"
* { box-sizing: border-box; }
body { margin: 0; font-family: Georgia, "Times New Roman", serif; }
.loading { min-height: 100vh; background-position: center; background-repeat: no-repeat; background-size: cover; }
.error-screen { min-height: 100vh; display: flex; align-items: center; justify-content: center; background: #000; }
.error-panel { max-width: 28rem; background: #fff; padding: 1.5rem; border-radius: 0.75rem; box-shadow: 0 1px 3px rgba(0,0,0,.1); color: #dc2626; font-weight: 600; font-size: 0.875rem; white-space: pre-wrap; word-break: break-word; }
.error-panel .heading { font-size: 1.5rem; color: #4b5563; padding-bottom: 0.5rem; margin: 0; font-weight: 400; white-space: normal; }
.page { min-height: 100vh; background: #f3f4f6; padding: 1rem; }
.page h1 { font-size: 3rem; font-weight: 700; text-align: center; margin: 0 0 1.5rem; }
.grid { display: grid; grid-template-columns: repeat(1, minmax(0, 1fr)); gap: 1.5rem; padding: 0 1rem; }
.card { background: #fff; border-radius: 1rem; box-shadow: 0 1px 3px rgba(0,0,0,.1); padding: 1rem; display: flex; flex-direction: column; align-items: center; }
.card img { margin-bottom: 0.5rem; }
.card h2 { font-size: 1.125rem; font-weight: 600; text-align: center; margin: 0; }
.card p { font-size: 0.875rem; color: #4b5563; margin: 0; }
@media (min-width: 640px) { .grid { grid-template-columns: repeat(2, minmax(0, 1fr)); padding: 0 1.5rem; } }
@media (min-width: 768px) { .grid { grid-template-columns: repeat(3, minmax(0, 1fr)); padding: 0 2.5rem; } .error-panel { max-width: 48rem; } }
@media (min-width: 1024px) { .grid { grid-template-columns: repeat(4, minmax(0, 1fr)); padding: 0 5rem; } }
@media (min-width: 1536px) { .grid { grid-template-columns: repeat(5, minmax(0, 1fr)); padding: 0 10rem; } }
"#;

/// Render a complete HTML document for the screen.
pub fn render_document(screen: &Screen) -> String {
    let (title, head_extra, body) = match screen {
        Screen::Placeholder { background } => (
            "Loading",
            format!(r#"<meta http-equiv="refresh" content="{LOADING_REFRESH_SECS}">"#),
            render_placeholder(background),
        ),
        Screen::ErrorPanel { heading, detail } => {
            ("Error", String::new(), render_error_panel(heading, detail))
        }
        Screen::Grid { title, cards } => (title.as_str(), String::new(), render_grid(title, cards)),
    };

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    if !head_extra.is_empty() {
        html.push_str(&head_extra);
        html.push('\n');
    }
    html.push_str(&format!("<title>{}</title>\n", encode_text(title)));
    html.push_str(&format!("<style>{STYLE}</style>\n"));
    html.push_str("</head>\n<body>\n");
    html.push_str(&body);
    html.push_str("</body>\n</html>\n");
    html
}

/// Full-viewport background image, no text.
pub fn render_placeholder(background: &str) -> String {
    format!(
        "<div class=\"loading\" style=\"background-image: url('{}')\"></div>\n",
        encode_double_quoted_attribute(&encode_style_single_quoted_text(background))
    )
}

pub fn render_error_panel(heading: &str, detail: &str) -> String {
    format!(
        "<div class=\"error-screen\">\n<div class=\"error-panel\" role=\"alert\">\n<p class=\"heading\">{}</p>\n{}\n</div>\n</div>\n",
        encode_text(heading),
        encode_text(detail)
    )
}

pub fn render_grid(title: &str, cards: &[CountryCard]) -> String {
    let mut html = String::from("<div class=\"page\">\n");
    html.push_str(&format!("<h1>{}</h1>\n", encode_text(title)));
    html.push_str("<div class=\"grid\">\n");
    for card in cards {
        html.push_str(&render_card(card));
    }
    html.push_str("</div>\n</div>\n");
    html
}

/// One card. The flag's `onerror` handler clears itself before swapping to
/// the placeholder, so a broken placeholder cannot trigger a second swap.
pub fn render_card(card: &CountryCard) -> String {
    // A JS string literal inside a double-quoted attribute.
    let fallback = encode_script_single_quoted_text(&card.flag.fallback_src);
    format!(
        concat!(
            "<article class=\"card\" data-key=\"{key}\">\n",
            "<img src=\"{src}\" alt=\"{alt}\" onerror=\"this.onerror=null;this.src='{fallback}'\">\n",
            "<h2>{name}</h2>\n",
            "<p>{capital}</p>\n",
            "<p>{region}</p>\n",
            "<p>{population}</p>\n",
            "</article>\n"
        ),
        key = encode_double_quoted_attribute(&card.key),
        src = encode_double_quoted_attribute(card.flag.current_src()),
        alt = encode_double_quoted_attribute(&card.flag.alt),
        fallback = encode_double_quoted_attribute(&fallback),
        name = encode_text(&card.name),
        capital = encode_text(&card.capital_line),
        region = encode_text(&card.region_line),
        population = encode_text(&card.population_line),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardOptions;
    use crate::country::fixtures::{country, BRAZIL_AND_CHAD};
    use crate::country::parse_countries;
    use crate::view::{LoadFailure, ViewOptions, ViewState};

    fn loaded_document() -> String {
        let view = ViewState::new().settle(Ok(parse_countries(BRAZIL_AND_CHAD).unwrap()));
        render_document(&view.screen(&ViewOptions::default()))
    }

    #[test]
    fn test_render_loading_has_background_only() {
        let html = render_document(&ViewState::new().screen(&ViewOptions::default()));

        assert!(html.contains("background-image: url('loading.gif')"));
        assert!(html.contains("http-equiv=\"refresh\""));
        assert!(!html.contains("<article"));
        assert!(!html.contains("error-panel\" role"));
    }

    #[test]
    fn test_render_placeholder_quotes_for_css() {
        let html = render_placeholder("it's.gif");

        assert!(html.contains(r#"style="background-image: url('it\'s.gif')""#));
    }

    #[test]
    fn test_render_grid_orders_cards() {
        let html = loaded_document();

        let brazil = html.find("data-key=\"BR\"").unwrap();
        let chad = html.find("data-key=\"TD\"").unwrap();
        assert!(brazil < chad);
        assert_eq!(html.matches("<article").count(), 2);
        assert!(html.contains("<h1>Country Cards</h1>"));
        assert!(html.contains("<p>🌆 No capital</p>"));
        assert!(html.contains("<p>👥 213,993,437</p>"));
        assert!(!html.contains("loading.gif"));
        assert!(!html.contains("role=\"alert\""));
    }

    #[test]
    fn test_render_card_flag_fallback_is_one_shot() {
        let html = loaded_document();

        assert!(html.contains("src=\"https://flagsapi.com/BR/flat/64.png\""));
        assert!(html.contains("onerror=\"this.onerror=null;this.src='/placeholder.png'\""));
    }

    #[test]
    fn test_render_card_uses_current_flag_source() {
        let mut cards = crate::card::build_cards(
            &[country("Chad", "TD", &[], "Africa", 1)],
            &CardOptions::default(),
        );
        cards[0].flag.on_load_error();

        let html = render_card(&cards[0]);

        assert!(html.contains("src=\"/placeholder.png\""));
    }

    #[test]
    fn test_render_error_panel_escapes_but_keeps_detail() {
        let view = ViewState::new().settle(Err(LoadFailure::from_message(
            "expected value at line 1 column 1: <html>",
        )));

        let html = render_document(&view.screen(&ViewOptions::default()));

        assert!(html.contains("Seems like there was an error loading the page :/"));
        assert!(html.contains("expected value at line 1 column 1: &lt;html&gt;"));
        assert!(!html.contains("<article"));
        assert!(!html.contains("loading.gif"));
    }

    #[test]
    fn test_render_card_fallback_quotes_for_script() {
        let options = CardOptions {
            placeholder_src: "/img/o'brien.png".to_string(),
            ..CardOptions::default()
        };
        let cards = crate::card::build_cards(&[country("Chad", "TD", &[], "Africa", 1)], &options);

        let html = render_card(&cards[0]);

        assert!(html.contains(r#"onerror="this.onerror=null;this.src='/img/o\'brien.png'""#));
        assert!(!html.contains("&#x27;"));
    }

    #[test]
    fn test_render_card_escapes_names() {
        let cards = crate::card::build_cards(
            &[country("<b>Bad</b>", "X\"", &[], "Nowhere", 1)],
            &CardOptions::default(),
        );

        let html = render_card(&cards[0]);

        assert!(html.contains("<h2>&lt;b&gt;Bad&lt;/b&gt;</h2>"));
        assert!(html.contains("data-key=\"X&quot;\""));
    }
}
