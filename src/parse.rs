//! Parsing of provider output into a translation.
//!
//! The provider is asked for strict JSON but routinely wraps it in markdown
//! fences or answers with plain text. Parsing is total: whatever comes back
//! is turned into a [`ParsedResponse`].

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Placeholder used when a JSON object carries no `translation` field.
pub const NO_TRANSLATION_MARKER: &str = "[No translation returned]";

/// Detected language recorded when detection could not be recovered.
pub const UNKNOWN_LANG: &str = "UNKNOWN";

/// Opening fence. A known tag may be followed by spaces or run straight into
/// the body; any other word counts as a tag only at the end of its line.
static FENCE_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^```(?:(?i:json|jsonc|javascript|js|text|txt)\b[ \t]*\r?\n?|[A-Za-z0-9_-]+[ \t]*\r?\n|[ \t]*\r?\n?)",
    )
    .expect("valid regex")
});

static FENCE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n?```$").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedResponse {
    /// JSON object with both a translation and a detected source language.
    DetectedTranslation {
        detected_lang: String,
        translation: String,
    },
    /// JSON string, or an object without a usable detected language.
    PlainTranslation { translation: String },
    /// Output that was not valid JSON, used verbatim.
    RawFallback { text: String },
}

impl ParsedResponse {
    /// Detected source language to record, given whether detection was asked for.
    pub fn detected_source_lang(&self, auto_detect: bool) -> Option<String> {
        if !auto_detect {
            return None;
        }
        match self {
            ParsedResponse::DetectedTranslation { detected_lang, .. } => {
                Some(detected_lang.clone())
            }
            ParsedResponse::PlainTranslation { .. } => None,
            ParsedResponse::RawFallback { .. } => Some(UNKNOWN_LANG.to_string()),
        }
    }

    pub fn into_translated_text(self) -> String {
        match self {
            ParsedResponse::DetectedTranslation { translation, .. } => translation,
            ParsedResponse::PlainTranslation { translation } => translation,
            ParsedResponse::RawFallback { text } => text,
        }
    }
}

/// Remove a surrounding markdown code fence, if any.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let without_open = match FENCE_OPEN.find(trimmed) {
        Some(m) => &trimmed[m.end()..],
        None => trimmed,
    };
    let without_close = match FENCE_CLOSE.find(without_open) {
        Some(m) => &without_open[..m.start()],
        None => without_open,
    };
    without_close.trim()
}

/// Turn raw provider output into a translation. Never fails.
pub fn parse_response(raw: &str, auto_detect: bool) -> ParsedResponse {
    let body = strip_code_fences(raw);

    match serde_json::from_str::<Value>(body) {
        Ok(Value::String(translation)) => ParsedResponse::PlainTranslation { translation },
        Ok(Value::Object(map)) => {
            let translation = match map.get("translation").and_then(Value::as_str) {
                Some(t) => t.to_string(),
                None => {
                    warn!("Provider JSON has no translation field");
                    NO_TRANSLATION_MARKER.to_string()
                }
            };

            let detected = if auto_detect {
                map.get("detectedLang")
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_uppercase)
            } else {
                None
            };

            match detected {
                Some(detected_lang) => ParsedResponse::DetectedTranslation {
                    detected_lang,
                    translation,
                },
                None => ParsedResponse::PlainTranslation { translation },
            }
        }
        Ok(other) => {
            debug!("Provider returned non-object JSON ({}), using raw text", kind(&other));
            ParsedResponse::RawFallback {
                text: body.to_string(),
            }
        }
        Err(e) => {
            debug!("Provider output is not JSON ({}), using raw text", e);
            ParsedResponse::RawFallback {
                text: body.to_string(),
            }
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::Array(_) => "array",
        Value::String(_) => "string",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_json_object() {
        let parsed = parse_response(r#"{"translation":"Merhaba"}"#, false);
        assert_eq!(
            parsed,
            ParsedResponse::PlainTranslation {
                translation: "Merhaba".to_string()
            }
        );
        assert_eq!(parsed.detected_source_lang(false), None);
    }

    #[test]
    fn test_fenced_json() {
        let raw = "```json\n{\"translation\":\"Merhaba\"}\n```";
        let parsed = parse_response(raw, false);
        assert_eq!(parsed.into_translated_text(), "Merhaba");

        let bare_fence = "```\n{\"translation\":\"Merhaba\"}\n```";
        assert_eq!(parse_response(bare_fence, false).into_translated_text(), "Merhaba");
    }

    #[test]
    fn test_detected_language_is_uppercased() {
        let raw = r#"  {"detectedLang": "es", "translation": "Hello world"}  "#;
        let parsed = parse_response(raw, true);
        assert_eq!(parsed.detected_source_lang(true), Some("ES".to_string()));
        assert_eq!(parsed.into_translated_text(), "Hello world");
    }

    #[test]
    fn test_detected_language_ignored_without_auto_detect() {
        let raw = r#"{"detectedLang": "es", "translation": "Hello"}"#;
        let parsed = parse_response(raw, false);
        assert!(matches!(parsed, ParsedResponse::PlainTranslation { .. }));
    }

    #[test]
    fn test_missing_detected_language_is_none() {
        let parsed = parse_response(r#"{"translation": "Hello"}"#, true);
        assert_eq!(parsed.detected_source_lang(true), None);
    }

    #[test]
    fn test_json_string() {
        let parsed = parse_response(r#""Merhaba""#, true);
        assert_eq!(parsed.detected_source_lang(true), None);
        assert_eq!(parsed.into_translated_text(), "Merhaba");
    }

    #[test]
    fn test_object_without_translation() {
        let parsed = parse_response(r#"{"detectedLang": "fr"}"#, true);
        assert_eq!(parsed.detected_source_lang(true), Some("FR".to_string()));
        assert_eq!(parsed.into_translated_text(), NO_TRANSLATION_MARKER);
    }

    #[test]
    fn test_raw_fallback() {
        let parsed = parse_response("Merhaba dünya", true);
        assert_eq!(
            parsed,
            ParsedResponse::RawFallback {
                text: "Merhaba dünya".to_string()
            }
        );
        assert_eq!(parsed.detected_source_lang(true), Some(UNKNOWN_LANG.to_string()));
        assert_eq!(parsed.detected_source_lang(false), None);
    }

    #[test]
    fn test_raw_fallback_keeps_fence_stripped_text() {
        let parsed = parse_response("```\nnot json at all\n```", false);
        assert_eq!(parsed.into_translated_text(), "not json at all");
    }

    #[test]
    fn test_non_object_json_falls_back() {
        assert!(matches!(
            parse_response("42", false),
            ParsedResponse::RawFallback { .. }
        ));
        assert!(matches!(
            parse_response("[1, 2]", true),
            ParsedResponse::RawFallback { .. }
        ));
        assert_eq!(parse_response("", false).into_translated_text(), "");
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("```JSON {}```"), "{}");
        assert_eq!(strip_code_fences("```Merhaba```"), "Merhaba");
        assert_eq!(strip_code_fences("plain"), "plain");
        assert_eq!(strip_code_fences("  ```\nx\n```  "), "x");
        assert_eq!(strip_code_fences("```python\nprint(1)\n```"), "print(1)");
    }

    #[test]
    fn test_known_tag_glued_to_body() {
        let parsed = parse_response(r#"```json{"translation":"x"}```"#, false);
        assert_eq!(
            parsed,
            ParsedResponse::PlainTranslation {
                translation: "x".to_string()
            }
        );
        assert_eq!(strip_code_fences("```JSON{}```"), "{}");
        assert_eq!(strip_code_fences("```js\n{}\n```"), "{}");
    }

    #[test]
    fn test_plain_words_after_fence_are_kept() {
        assert_eq!(strip_code_fences("```textbook```"), "textbook");
        assert_eq!(strip_code_fences("```jsonless```"), "jsonless");

        let parsed = parse_response("```Merhaba dünya```", true);
        assert_eq!(parsed.detected_source_lang(true), Some(UNKNOWN_LANG.to_string()));
        assert_eq!(parsed.into_translated_text(), "Merhaba dünya");
    }
}
