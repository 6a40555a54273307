use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Punctuation in collation order. Anything not listed sorts after these.
const PUNCTUATION: &str = "_-\u{2010}\u{2013}\u{2014},;:!?.'\u{2018}\u{2019}\"\u{201c}\u{201d}()[]{}@*/\\&#%`";

/// Primary weight of one collation element.
///
/// Variants are declared in sort order: whitespace, punctuation, symbols,
/// digits, letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Primary {
    Space,
    Punctuation(usize),
    Symbol(char),
    Digit(char),
    Letter(char),
}

impl Primary {
    fn of(ch: char) -> Self {
        if ch.is_whitespace() {
            Primary::Space
        } else if let Some(rank) = PUNCTUATION.chars().position(|p| p == ch) {
            Primary::Punctuation(rank)
        } else if ch.is_alphabetic() {
            Primary::Letter(ch)
        } else if ch.is_numeric() {
            Primary::Digit(ch)
        } else {
            Primary::Symbol(ch)
        }
    }
}

/// Letters that carry their diacritic in the base character, so NFD leaves
/// them whole. They sort as their base letters with an accent difference.
fn fold(lower: char) -> Option<&'static str> {
    match lower {
        'ø' => Some("o"),
        'ł' => Some("l"),
        'đ' => Some("d"),
        'ħ' => Some("h"),
        'ŧ' => Some("t"),
        'ı' => Some("i"),
        'æ' => Some("ae"),
        'œ' => Some("oe"),
        'ß' => Some("ss"),
        _ => None,
    }
}

/// Collation weights for a single string.
///
/// Mirrors the three comparison levels of the default Unicode collation:
/// base letters first, then accents, then case.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SortKey {
    primary: Vec<Primary>,
    secondary: Vec<bool>,
    tertiary: Vec<bool>,
}

fn sort_key(text: &str) -> SortKey {
    let mut key = SortKey {
        primary: Vec::with_capacity(text.len()),
        secondary: Vec::with_capacity(text.len()),
        tertiary: Vec::with_capacity(text.len()),
    };

    for ch in text.nfd() {
        if is_combining_mark(ch) {
            // Marks attach to the previous base letter.
            if let Some(accented) = key.secondary.last_mut() {
                *accented = true;
            }
            continue;
        }

        let upper = ch.is_uppercase();
        let lower = ch.to_lowercase().next().unwrap_or(ch);

        match fold(lower) {
            Some(base) => {
                for letter in base.chars() {
                    key.primary.push(Primary::Letter(letter));
                    key.secondary.push(true);
                    key.tertiary.push(upper);
                }
            }
            None => {
                key.primary.push(Primary::of(lower));
                key.secondary.push(false);
                key.tertiary.push(upper);
            }
        }
    }

    key
}

/// Compare two display names the way a locale-aware UI sort does.
///
/// `Åland` sorts next to `Aland` (before `Albania`), unaccented letters
/// precede accented ones, and lowercase precedes uppercase. Whitespace and
/// punctuation sort ahead of digits and letters. Ties fall back to
/// code-point order so the ordering is total.
pub fn compare(a: &str, b: &str) -> Ordering {
    let ka = sort_key(a);
    let kb = sort_key(b);

    ka.primary
        .cmp(&kb.primary)
        .then_with(|| ka.secondary.cmp(&kb.secondary))
        .then_with(|| ka.tertiary.cmp(&kb.tertiary))
        .then_with(|| a.cmp(b))
}
