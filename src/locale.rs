//! Display locales and the localized category-label table
//!
//! The archive stores biographies in up to three languages. The locale only
//! selects among stored translations and display labels; it never changes
//! which records exist.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported display locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English
    #[default]
    En,
    /// Somali
    So,
    /// Arabic
    Ar,
}

impl Locale {
    /// Parse a locale from its wire string. Unknown values fall back to English.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "so" => Locale::So,
            "ar" => Locale::Ar,
            _ => Locale::En,
        }
    }

    /// Wire string for this locale, as used in stored biography maps
    pub fn key(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::So => "so",
            Locale::Ar => "ar",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Look up the display label for a raw category value.
///
/// The table covers the four legacy category keys the editor writes. Any
/// other value (categories are free text upstream) is displayed unchanged.
pub fn category_label(locale: Locale, category: &str) -> &str {
    match (category, locale) {
        ("Politics", Locale::En) => "Politics",
        ("Politics", Locale::So) => "Siyaasadda",
        ("Politics", Locale::Ar) => "السياسة",
        ("Business", Locale::En) => "Business",
        ("Business", Locale::So) => "Ganacsiga",
        ("Business", Locale::Ar) => "الأعمال",
        ("History", Locale::En) => "History",
        ("History", Locale::So) => "Taariikhda",
        ("History", Locale::Ar) => "التاريخ",
        ("Arts & Culture", Locale::En) => "Arts & Culture",
        ("Arts & Culture", Locale::So) => "Fanka & Dhaqanka",
        ("Arts & Culture", Locale::Ar) => "الفنون والثقافة",
        _ => category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_locales() {
        assert_eq!(Locale::parse("en"), Locale::En);
        assert_eq!(Locale::parse("so"), Locale::So);
        assert_eq!(Locale::parse("AR"), Locale::Ar);
    }

    #[test]
    fn test_parse_unknown_falls_back_to_english() {
        assert_eq!(Locale::parse("fr"), Locale::En);
        assert_eq!(Locale::parse(""), Locale::En);
    }

    #[test]
    fn test_category_label_lookup() {
        assert_eq!(category_label(Locale::So, "Business"), "Ganacsiga");
        assert_eq!(category_label(Locale::Ar, "Politics"), "السياسة");
    }

    #[test]
    fn test_unmapped_category_displays_raw_value() {
        assert_eq!(category_label(Locale::So, "Sports"), "Sports");
    }
}
