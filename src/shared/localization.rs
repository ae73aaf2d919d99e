use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Display languages supported by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Ru,
    Uz,
    En,
}

/// Shared ru/uz/en display-name triple used by every localized entity.
///
/// Stored as a JSONB column; missing variants deserialize to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LocalizedText {
    #[serde(default)]
    pub ru: String,
    #[serde(default)]
    pub uz: String,
    #[serde(default)]
    pub en: String,
}

impl LocalizedText {
    pub fn new(ru: impl Into<String>, uz: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            ru: ru.into(),
            uz: uz.into(),
            en: en.into(),
        }
    }

    /// Resolve a display string for the requested language.
    ///
    /// Falls back to ru, then en, then uz. Returns an empty string only when
    /// all variants are empty.
    pub fn resolve(&self, lang: Lang) -> &str {
        let preferred = match lang {
            Lang::Ru => &self.ru,
            Lang::Uz => &self.uz,
            Lang::En => &self.en,
        };
        if !preferred.is_empty() {
            return preferred;
        }

        for fallback in [&self.ru, &self.en, &self.uz] {
            if !fallback.is_empty() {
                return fallback;
            }
        }

        ""
    }

    pub fn is_empty(&self) -> bool {
        self.ru.is_empty() && self.uz.is_empty() && self.en.is_empty()
    }
}

/// Standard `?lang=` query parameter for localized list endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize, utoipa::IntoParams)]
pub struct LangQuery {
    /// Display language (ru, uz or en). Defaults to ru.
    #[serde(default)]
    pub lang: Lang,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefers_requested_language() {
        let text = LocalizedText::new("Принтер", "Printer (uz)", "Printer");

        assert_eq!(text.resolve(Lang::Ru), "Принтер");
        assert_eq!(text.resolve(Lang::Uz), "Printer (uz)");
        assert_eq!(text.resolve(Lang::En), "Printer");
    }

    #[test]
    fn test_resolve_falls_back_to_ru_first() {
        let text = LocalizedText::new("Принтер", "", "");

        assert_eq!(text.resolve(Lang::En), "Принтер");
        assert_eq!(text.resolve(Lang::Uz), "Принтер");
    }

    #[test]
    fn test_resolve_falls_back_to_en_before_uz() {
        let text = LocalizedText::new("", "Skaner", "Scanner");

        assert_eq!(text.resolve(Lang::Ru), "Scanner");
    }

    #[test]
    fn test_resolve_empty_only_when_all_variants_empty() {
        let text = LocalizedText::default();

        assert_eq!(text.resolve(Lang::Ru), "");
        assert_eq!(text.resolve(Lang::Uz), "");
        assert_eq!(text.resolve(Lang::En), "");
        assert!(text.is_empty());
    }

    #[test]
    fn test_deserialize_with_missing_variants() {
        let text: LocalizedText = serde_json::from_str(r#"{"ru":"Сканер"}"#).unwrap();

        assert_eq!(text.ru, "Сканер");
        assert_eq!(text.uz, "");
        assert_eq!(text.resolve(Lang::En), "Сканер");
    }
}
