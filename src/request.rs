//! Translation request payload and its validation.

use crate::error::{Result, TranscacheError};
use crate::lang::Lang;
use serde::{Deserialize, Serialize};

/// Loosely-typed request as submitted by a caller.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateInput {
    pub text: Option<String>,
    pub target_lang: Option<String>,
    pub source_lang: Option<String>,
    /// Boolean, `"true"`/`"false"`, or `1`/`0`.
    #[serde(default)]
    pub auto_lang_detection: Option<serde_json::Value>,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub target_lang: Lang,
    pub source_lang: Option<Lang>,
    pub auto_detect: bool,
}

/// Response returned to the caller, both for cache hits and fresh calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub translated_text: String,
    pub from_cache: bool,
}

impl TranslationRequest {
    /// Build a request with an explicit source language.
    pub fn explicit(text: impl Into<String>, source_lang: Lang, target_lang: Lang) -> Self {
        Self {
            text: text.into(),
            target_lang,
            source_lang: Some(source_lang),
            auto_detect: false,
        }
    }

    /// Build a request that asks the provider to detect the source language.
    pub fn auto_detect(text: impl Into<String>, target_lang: Lang) -> Self {
        Self {
            text: text.into(),
            target_lang,
            source_lang: None,
            auto_detect: true,
        }
    }

    /// Check the detect/source-language invariant.
    pub fn check_invariant(&self) -> Result<()> {
        match (self.auto_detect, self.source_lang) {
            (false, None) => Err(TranscacheError::Validation(
                "sourceLang is required when autoLangDetection is false".to_string(),
            )),
            (true, Some(_)) => Err(TranscacheError::Validation(
                "sourceLang must not be provided when autoLangDetection is true".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

impl TranslateInput {
    pub fn validate(self) -> Result<TranslationRequest> {
        let text = self.text.unwrap_or_default();
        if text.is_empty() {
            return Err(TranscacheError::Validation(
                "text must not be empty".to_string(),
            ));
        }

        let target_lang = match self.target_lang {
            Some(code) => code
                .parse::<Lang>()
                .map_err(|e| TranscacheError::Validation(format!("targetLang: {}", e)))?,
            None => {
                return Err(TranscacheError::Validation(
                    "targetLang is required".to_string(),
                ))
            }
        };

        let auto_detect = parse_flag(self.auto_lang_detection.as_ref());

        // Empty string counts as absent
        let source_lang = self.source_lang.filter(|s| !s.is_empty());

        let source_lang = match (auto_detect, source_lang) {
            (true, Some(_)) => {
                return Err(TranscacheError::Validation(
                    "sourceLang must not be provided when autoLangDetection is true".to_string(),
                ))
            }
            (true, None) => None,
            (false, None) => {
                return Err(TranscacheError::Validation(
                    "sourceLang must be provided when autoLangDetection is false".to_string(),
                ))
            }
            (false, Some(code)) => Some(
                code.parse::<Lang>()
                    .map_err(|e| TranscacheError::Validation(format!("sourceLang: {}", e)))?,
            ),
        };

        Ok(TranslationRequest {
            text,
            target_lang,
            source_lang,
            auto_detect,
        })
    }
}

/// Interpret the auto-detection flag. Only `true`, `1` and their string
/// forms enable it; anything else (including absence) means `false`.
fn parse_flag(value: Option<&serde_json::Value>) -> bool {
    match value {
        Some(serde_json::Value::Bool(b)) => *b,
        Some(serde_json::Value::Number(n)) => n.as_i64() == Some(1),
        Some(serde_json::Value::String(s)) => {
            let s = s.trim();
            s.eq_ignore_ascii_case("true") || s == "1"
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(value: serde_json::Value) -> TranslateInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_explicit_request_validates() {
        let req = input(json!({
            "text": "Hello world",
            "targetLang": "tr",
            "sourceLang": "en"
        }))
        .validate()
        .unwrap();

        assert_eq!(req.target_lang, Lang::Tr);
        assert_eq!(req.source_lang, Some(Lang::En));
        assert!(!req.auto_detect);
    }

    #[test]
    fn test_auto_detect_flag_forms() {
        for flag in [json!(true), json!("true"), json!("TRUE"), json!(1), json!("1")] {
            let req = input(json!({
                "text": "Hola",
                "targetLang": "EN",
                "autoLangDetection": flag
            }))
            .validate()
            .unwrap();
            assert!(req.auto_detect);
            assert!(req.source_lang.is_none());
        }
    }

    #[test]
    fn test_false_flag_requires_source_lang() {
        let err = input(json!({
            "text": "Hola",
            "targetLang": "EN",
            "autoLangDetection": "false"
        }))
        .validate()
        .unwrap_err();
        assert!(err.to_string().contains("sourceLang must be provided"));
    }

    #[test]
    fn test_auto_detect_rejects_source_lang() {
        let err = input(json!({
            "text": "Hola",
            "targetLang": "EN",
            "sourceLang": "ES",
            "autoLangDetection": true
        }))
        .validate()
        .unwrap_err();
        assert!(err.to_string().contains("must not be provided"));
    }

    #[test]
    fn test_empty_source_lang_is_absent() {
        let req = input(json!({
            "text": "Hola",
            "targetLang": "EN",
            "sourceLang": "",
            "autoLangDetection": true
        }))
        .validate()
        .unwrap();
        assert!(req.source_lang.is_none());
    }

    #[test]
    fn test_whitespace_text_is_kept_verbatim() {
        let request = input(json!({ "text": "   ", "targetLang": "TR", "sourceLang": "EN" }))
            .validate()
            .unwrap();
        assert_eq!(request.text, "   ");
        assert_eq!(request.source_lang, Some(Lang::En));
    }

    #[test]
    fn test_rejects_empty_text_and_unknown_lang() {
        assert!(input(json!({ "text": "", "targetLang": "EN", "sourceLang": "TR" }))
            .validate()
            .is_err());
        assert!(input(json!({ "text": "hi", "targetLang": "XX", "sourceLang": "TR" }))
            .validate()
            .is_err());
        assert!(input(json!({ "text": "hi", "sourceLang": "TR" }))
            .validate()
            .is_err());
        assert!(input(json!({ "text": "hi", "targetLang": "EN", "sourceLang": "AUTO" }))
            .validate()
            .is_err());
    }

    #[test]
    fn test_check_invariant() {
        assert!(TranslationRequest::explicit("a", Lang::En, Lang::Tr)
            .check_invariant()
            .is_ok());
        assert!(TranslationRequest::auto_detect("a", Lang::Tr)
            .check_invariant()
            .is_ok());

        let mut bad = TranslationRequest::auto_detect("a", Lang::Tr);
        bad.auto_detect = false;
        let err = bad.check_invariant().unwrap_err();
        assert!(err.to_string().contains("sourceLang is required"));
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let resp = TranslateResponse {
            translated_text: "Merhaba".to_string(),
            from_cache: true,
        };
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value, json!({ "translatedText": "Merhaba", "fromCache": true }));
    }
}
