use crate::lang::Lang;

/// Build the translation prompt sent to the provider.
///
/// With `auto_detect` the provider is asked to report the detected source
/// language alongside the translation; otherwise `source` is used as given.
/// The text is embedded as a JSON string literal so quotes and newlines in
/// the input cannot break out of the quoted block.
pub fn build_prompt(text: &str, target: Lang, source: Option<Lang>, auto_detect: bool) -> String {
    let quoted = quote_text(text);
    let target = describe(target);

    match source {
        Some(source) if !auto_detect => {
            let source = describe(source);
            format!(
                r#"You are a professional translator.
Your task is to translate the text below from {source} to {target}.

Do not attempt to detect or guess any other language.
Respond with strict JSON only, in exactly this shape:
{{"translation": "<translated text>"}}
Do not wrap the JSON in markdown code fences and do not add any other text.

Text:
{quoted}"#
            )
        }
        _ => format!(
            r#"You are a professional translator.
Your task is to detect the source language of the text below and translate it precisely into {target}.

Respond with strict JSON only, in exactly this shape:
{{"detectedLang": "<ISO 639-1 code of the source language>", "translation": "<translated text>"}}
Do not wrap the JSON in markdown code fences and do not add any other text.

Text:
{quoted}"#
        ),
    }
}

fn describe(lang: Lang) -> String {
    format!("{} ({})", lang.name(), lang.code())
}

fn quote_text(text: &str) -> String {
    // Serializing a &str cannot fail
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}
