use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use transcache::config::Config;
use transcache::interactive::run_interactive_wizard;
use transcache::provider::GeminiClient;
use transcache::store::{CacheStore, RedbStore};
use transcache::{TranslateInput, TranslateResponse, TranslationRequest, TranslationService};

#[derive(Parser)]
#[command(name = "transcache")]
#[command(version, about = "Cached text translation using AI")]
#[command(long_about = "Translate text with Google Gemini, reusing earlier results from a local translation store.")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Translation store file (overrides TRANSCACHE_STORE)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Translate a piece of text
    Translate {
        /// Text to translate
        #[arg(short, long)]
        text: String,

        /// Target language code (e.g., TR, EN, DE)
        #[arg(long)]
        to: String,

        /// Source language code; omit together with --auto to detect it
        #[arg(long, conflicts_with = "auto")]
        from: Option<String>,

        /// Let the model detect the source language
        #[arg(long)]
        auto: bool,

        /// Model to request instead of the configured one
        #[arg(long)]
        model: Option<String>,

        /// Print the full JSON response instead of just the text
        #[arg(long)]
        json: bool,
    },

    /// Check that the translation store can be opened
    CheckStore,

    /// Guided translation prompt
    Interactive,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn load_config(store: Option<PathBuf>) -> Result<Config> {
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(path) = store {
        config.store_path = path;
    }
    config
        .validate()
        .context("Configuration validation failed")?;
    Ok(config)
}

async fn run_translation(
    config: &Config,
    request: &TranslationRequest,
    model: Option<String>,
) -> Result<TranslateResponse> {
    let store = RedbStore::open(&config.store_path)
        .await
        .with_context(|| format!("Failed to open store {}", config.store_path.display()))?;

    let mut service = TranslationService::new(
        Arc::new(GeminiClient::from_config(config)),
        Arc::new(store),
        config,
    );
    if let Some(model) = model {
        service = service.with_model(model);
    }
    info!("Using model {}", service.model());

    service
        .translate(request)
        .await
        .context("Translation failed")
}

fn print_response(response: &TranslateResponse, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(response)?);
        return Ok(());
    }

    println!("{}", response.translated_text);
    if response.from_cache {
        eprintln!("{} served from cache", style("✓").green());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Command::Translate {
            text,
            to,
            from,
            auto,
            model,
            json,
        } => {
            let request = TranslateInput {
                text: Some(text),
                target_lang: Some(to),
                source_lang: from,
                auto_lang_detection: Some(serde_json::Value::Bool(auto)),
            }
            .validate()?;

            let config = load_config(cli.store)?;
            if !config.has_api_key() {
                eprintln!(
                    "{} GEMINI_API_KEY not set; new translations will fail",
                    style("!").yellow()
                );
            }

            let response = run_translation(&config, &request, model).await?;
            print_response(&response, json)?;
        }
        Command::CheckStore => {
            let config = load_config(cli.store)?;
            let store = RedbStore::open(&config.store_path)
                .await
                .with_context(|| format!("Failed to open store {}", config.store_path.display()))?;
            let count = store.len().await?;

            info!("Store:   {}", store.path().display());
            info!("Records: {}", count);
            println!("{} translation store OK ({} records)", style("✓").green(), count);
        }
        Command::Interactive => {
            let result = run_interactive_wizard()?;
            let mut config = result.config;
            if let Some(path) = cli.store {
                config.store_path = path;
            }
            config
                .validate()
                .context("Configuration validation failed")?;

            let response = run_translation(&config, &result.request, None).await?;
            print_response(&response, false)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_translate_command() {
        let cli = Cli::try_parse_from([
            "transcache", "translate", "--text", "Hello", "--to", "tr", "--from", "en",
        ])
        .unwrap();

        match cli.command {
            Command::Translate {
                text,
                to,
                from,
                auto,
                model,
                json,
            } => {
                assert_eq!(text, "Hello");
                assert_eq!(to, "tr");
                assert_eq!(from.as_deref(), Some("en"));
                assert!(!auto);
                assert!(model.is_none());
                assert!(!json);
            }
            _ => panic!("expected translate command"),
        }
    }

    #[test]
    fn test_from_conflicts_with_auto() {
        let result = Cli::try_parse_from([
            "transcache", "translate", "-t", "Hola", "--to", "en", "--from", "es", "--auto",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_model_flag() {
        let cli = Cli::try_parse_from([
            "transcache", "translate", "-t", "Hola", "--to", "en", "--auto", "--model",
            "gemini-2.0-flash",
        ])
        .unwrap();

        match cli.command {
            Command::Translate { model, auto, .. } => {
                assert_eq!(model.as_deref(), Some("gemini-2.0-flash"));
                assert!(auto);
            }
            _ => panic!("expected translate command"),
        }
    }

    #[test]
    fn test_global_store_flag() {
        let cli = Cli::try_parse_from(["transcache", "check-store", "--store", "/tmp/t.redb"])
            .unwrap();
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/t.redb")));
        assert!(matches!(cli.command, Command::CheckStore));
    }
}
