use std::fmt;
use std::str::FromStr;

/// Locales supported for population formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    EnUs,
    EnGb,
    DeDe,
    FrFr,
    PtBr,
    EsEs,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unsupported locale: {0}. Supported locales: en-US, en-GB, de-DE, fr-FR, pt-BR, es-ES")]
pub struct UnsupportedLocale(pub String);

impl Locale {
    pub fn tag(self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::EnGb => "en-GB",
            Locale::DeDe => "de-DE",
            Locale::FrFr => "fr-FR",
            Locale::PtBr => "pt-BR",
            Locale::EsEs => "es-ES",
        }
    }

    /// Thousands separator for this locale.
    pub fn grouping_separator(self) -> &'static str {
        match self {
            Locale::EnUs | Locale::EnGb => ",",
            Locale::DeDe | Locale::PtBr | Locale::EsEs => ".",
            // NARROW NO-BREAK SPACE
            Locale::FrFr => "\u{202f}",
        }
    }

    /// Smallest digit count at which grouping kicks in.
    ///
    /// Spanish leaves four-digit numbers ungrouped ("1000", "10.000").
    pub fn minimum_grouping_digits(self) -> usize {
        match self {
            Locale::EsEs => 5,
            _ => 4,
        }
    }
}

impl FromStr for Locale {
    type Err = UnsupportedLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('_', "-").to_ascii_lowercase().as_str() {
            "en" | "en-us" => Ok(Locale::EnUs),
            "en-gb" => Ok(Locale::EnGb),
            "de" | "de-de" => Ok(Locale::DeDe),
            "fr" | "fr-fr" => Ok(Locale::FrFr),
            "pt-br" => Ok(Locale::PtBr),
            "es" | "es-es" => Ok(Locale::EsEs),
            _ => Err(UnsupportedLocale(s.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Insert `separator` between every group of three digits.
pub fn group_digits(value: u64, separator: &str, minimum_grouping_digits: usize) -> String {
    let digits = value.to_string();
    if digits.len() < minimum_grouping_digits {
        return digits;
    }

    let mut result = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            result.push_str(separator);
        }
        result.push(ch);
    }
    result
}

/// Format a population count with the locale's digit grouping.
pub fn format_population(population: u64, locale: Locale) -> String {
    group_digits(
        population,
        locale.grouping_separator(),
        locale.minimum_grouping_digits(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_population_en_us() {
        assert_eq!(format_population(1000000, Locale::EnUs), "1,000,000");
        assert_eq!(format_population(213993437, Locale::EnUs), "213,993,437");
    }

    #[test]
    fn test_format_population_small_values() {
        assert_eq!(format_population(0, Locale::EnUs), "0");
        assert_eq!(format_population(999, Locale::EnUs), "999");
        assert_eq!(format_population(1000, Locale::EnUs), "1,000");
    }

    #[test]
    fn test_format_population_other_locales() {
        assert_eq!(format_population(16425859, Locale::DeDe), "16.425.859");
        assert_eq!(format_population(16425859, Locale::PtBr), "16.425.859");
        assert_eq!(
            format_population(1000000, Locale::FrFr),
            "1\u{202f}000\u{202f}000"
        );
    }

    #[test]
    fn test_format_population_spanish_minimum_grouping() {
        assert_eq!(format_population(1000, Locale::EsEs), "1000");
        assert_eq!(format_population(10000, Locale::EsEs), "10.000");
    }

    #[test]
    fn test_format_population_u64_max() {
        assert_eq!(
            format_population(u64::MAX, Locale::EnUs),
            "18,446,744,073,709,551,615"
        );
    }

    #[test]
    fn test_locale_from_str() {
        assert_eq!("en-US".parse::<Locale>(), Ok(Locale::EnUs));
        assert_eq!("pt_BR".parse::<Locale>(), Ok(Locale::PtBr));
        assert_eq!("DE-de".parse::<Locale>(), Ok(Locale::DeDe));
        assert_eq!("es".parse::<Locale>(), Ok(Locale::EsEs));
    }

    #[test]
    fn test_locale_from_str_unknown() {
        let err = "tlh".parse::<Locale>().unwrap_err();
        assert_eq!(err, UnsupportedLocale("tlh".to_string()));
        assert!(err.to_string().contains("Unsupported locale: tlh"));
    }

    #[test]
    fn test_locale_display_round_trips_tag() {
        assert_eq!(Locale::FrFr.to_string(), "fr-FR");
        assert_eq!(Locale::default(), Locale::EnUs);
    }
}
