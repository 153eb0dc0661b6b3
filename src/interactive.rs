use crate::config::Config;
use crate::lang::Lang;
use crate::request::TranslationRequest;
use anyhow::Context;
use console::style;
use dialoguer::{Confirm, FuzzySelect, Input};
use std::fs;

pub struct InteractiveResult {
    pub config: Config,
    pub request: TranslationRequest,
}

pub fn run_interactive_wizard() -> anyhow::Result<InteractiveResult> {
    print_header();

    // Step 1: Check/Setup API Key
    let config = setup_api_key()?;

    // Step 2: Text to translate
    let text: String = Input::new()
        .with_prompt("Text to translate")
        .interact_text()?;
    if text.trim().is_empty() {
        anyhow::bail!("Text is required");
    }

    // Step 3: Source language, or let the model detect it
    let auto_detect = Confirm::new()
        .with_prompt("Detect the source language automatically?")
        .default(true)
        .interact()?;

    let source_lang = if auto_detect {
        None
    } else {
        Some(select_language("Select source language:", 0)?)
    };

    // Step 4: Target language. Default to Turkish for English sources, else English
    let default_idx = if source_lang == Some(Lang::En) { 1 } else { 0 };
    let target_lang = select_language("Select target language:", default_idx)?;

    if source_lang == Some(target_lang) {
        println!(
            "{} Target language is same as source",
            style("!").yellow()
        );
    }

    let request = TranslationRequest {
        text,
        target_lang,
        source_lang,
        auto_detect,
    };

    print_summary(&request, &config);

    if !Confirm::new()
        .with_prompt("Proceed?")
        .default(true)
        .interact()?
    {
        anyhow::bail!("Cancelled by user");
    }

    println!();

    Ok(InteractiveResult { config, request })
}

fn print_header() {
    println!();
    println!(
        "{}",
        style("╔═══════════════════════════════════════════════════╗").cyan()
    );
    println!(
        "{}",
        style("║        transcache - Cached AI Translation         ║").cyan()
    );
    println!(
        "{}",
        style("╚═══════════════════════════════════════════════════╝").cyan()
    );
    println!();
}

fn setup_api_key() -> anyhow::Result<Config> {
    let mut config = Config::load().context("Failed to load configuration")?;

    if config.has_api_key() {
        println!("{} API key configured", style("✓").green());
        return Ok(config);
    }

    println!("{} Gemini API key not found", style("!").yellow());
    println!("  Get one at: https://aistudio.google.com/apikey\n");

    let api_key: String = Input::new()
        .with_prompt("Enter your Gemini API key")
        .interact_text()?;

    if api_key.trim().is_empty() {
        anyhow::bail!("API key is required");
    }

    config.gemini_api_key = Some(api_key.trim().to_string());

    // Offer to save
    if Confirm::new()
        .with_prompt("Save API key to config file?")
        .default(true)
        .interact()?
    {
        save_config(&config)?;
        println!("{} API key saved to config\n", style("✓").green());
    }

    Ok(config)
}

fn save_config(config: &Config) -> anyhow::Result<()> {
    if let Some(config_path) = Config::config_file_path() {
        if let Some(dir) = config_path.parent() {
            fs::create_dir_all(dir)?;
        }
        let toml_content = toml::to_string_pretty(config)?;
        fs::write(config_path, toml_content)?;
    }
    Ok(())
}

fn select_language(prompt: &str, default: usize) -> anyhow::Result<Lang> {
    let items: Vec<String> = Lang::ALL.iter().map(language_label).collect();

    let selection = FuzzySelect::new()
        .with_prompt(prompt)
        .items(&items)
        .default(default)
        .interact()?;

    Ok(Lang::ALL[selection])
}

fn language_label(lang: &Lang) -> String {
    format!("{} ({})", lang.name(), lang.code())
}

fn print_summary(request: &TranslationRequest, config: &Config) {
    println!("\n{}", style("═══ Summary ═══").bold());
    println!("  Text:   {}", style(preview(&request.text, 60)).cyan());
    match request.source_lang {
        Some(ref source) => println!("  From:   {}", language_label(source)),
        None => println!("  From:   {}", style("auto-detect").italic()),
    }
    println!("  To:     {}", language_label(&request.target_lang));
    println!("  Model:  {}", config.gemini_model);
    println!("  Store:  {}", config.store_path.display());
    println!();
}

/// First `max` characters of `text`, with an ellipsis when cut.
fn preview(text: &str, max: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() {
        format!("{}…", head)
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_label() {
        assert_eq!(language_label(&Lang::En), "English (EN)");
        assert_eq!(language_label(&Lang::Ja), "Japanese (JA)");
    }

    #[test]
    fn test_default_target_index_points_at_turkish() {
        assert_eq!(Lang::ALL[1], Lang::Tr);
        assert_eq!(Lang::ALL[0], Lang::En);
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("merhaba dünya", 7), "merhaba…");
        assert_eq!(preview("", 3), "");
    }
}
