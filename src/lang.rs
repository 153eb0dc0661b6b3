//! Supported language codes.

use serde::{Deserialize, Serialize};

/// Reserved source-language value stored when the request used auto-detection.
pub const AUTO_SENTINEL: &str = "AUTO";

/// Closed set of language codes accepted by the translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Lang {
    En,
    Tr,
    De,
    Fr,
    Es,
    It,
    Pt,
    Ru,
    Ja,
    Ko,
    Zh,
    Ar,
    Hi,
    Nl,
    Pl,
}

impl Lang {
    pub const ALL: [Lang; 15] = [
        Lang::En,
        Lang::Tr,
        Lang::De,
        Lang::Fr,
        Lang::Es,
        Lang::It,
        Lang::Pt,
        Lang::Ru,
        Lang::Ja,
        Lang::Ko,
        Lang::Zh,
        Lang::Ar,
        Lang::Hi,
        Lang::Nl,
        Lang::Pl,
    ];

    /// Uppercase code, e.g. `"EN"`.
    pub fn code(&self) -> &'static str {
        match self {
            Lang::En => "EN",
            Lang::Tr => "TR",
            Lang::De => "DE",
            Lang::Fr => "FR",
            Lang::Es => "ES",
            Lang::It => "IT",
            Lang::Pt => "PT",
            Lang::Ru => "RU",
            Lang::Ja => "JA",
            Lang::Ko => "KO",
            Lang::Zh => "ZH",
            Lang::Ar => "AR",
            Lang::Hi => "HI",
            Lang::Nl => "NL",
            Lang::Pl => "PL",
        }
    }

    /// Human-readable name for better prompting.
    pub fn name(&self) -> &'static str {
        match self {
            Lang::En => "English",
            Lang::Tr => "Turkish",
            Lang::De => "German",
            Lang::Fr => "French",
            Lang::Es => "Spanish",
            Lang::It => "Italian",
            Lang::Pt => "Portuguese",
            Lang::Ru => "Russian",
            Lang::Ja => "Japanese",
            Lang::Ko => "Korean",
            Lang::Zh => "Chinese",
            Lang::Ar => "Arabic",
            Lang::Hi => "Hindi",
            Lang::Nl => "Dutch",
            Lang::Pl => "Polish",
        }
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Lang::ALL
            .iter()
            .copied()
            .find(|lang| lang.code() == upper)
            .ok_or_else(|| format!("Unknown language code: {}", s))
    }
}

impl TryFrom<String> for Lang {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Lang> for String {
    fn from(lang: Lang) -> Self {
        lang.code().to_string()
    }
}

/// Source-language component of a cache key: an explicit code or the
/// `AUTO` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SourceLang {
    Auto,
    Code(Lang),
}

impl SourceLang {
    /// Resolve the stored source language for a request.
    pub fn resolve(source_lang: Option<Lang>) -> Self {
        match source_lang {
            Some(lang) => SourceLang::Code(lang),
            None => SourceLang::Auto,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceLang::Auto => AUTO_SENTINEL,
            SourceLang::Code(lang) => lang.code(),
        }
    }
}

impl std::fmt::Display for SourceLang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for SourceLang {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        if value.eq_ignore_ascii_case(AUTO_SENTINEL) {
            Ok(SourceLang::Auto)
        } else {
            value.parse().map(SourceLang::Code)
        }
    }
}

impl From<SourceLang> for String {
    fn from(source: SourceLang) -> Self {
        source.as_str().to_string()
    }
}
