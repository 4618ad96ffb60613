//! Command-line front end for the scraper.
//!
//! Usage:
//!   translate-scraper text <source> <target> <query...>
//!   translate-scraper info <source> <target> <query...>
//!   translate-scraper audio <lang> <output-file> [--slow] <text...>
//!   translate-scraper languages [source|target]
//!
//! Optional environment variables:
//! - TRANSLATE_BASE_URL (defaults to https://translate.google.com)
//! - TRANSLATE_TIMEOUT_SECS (defaults to 10)
//! - TRANSLATE_AUDIO_TIMEOUT_SECS (defaults to 30)
//! - TRANSLATE_RETRY_DELAY_MS (defaults to 250)

use anyhow::{bail, Context, Result};
use std::fs;
use tracing::info;
use translate_scraper::{
    all_languages, language_list, synthesize_audio, translate_info, translate_text, Config,
    Endpoint, LanguageType,
};

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  translate-scraper text <source> <target> <query...>");
    eprintln!("  translate-scraper info <source> <target> <query...>");
    eprintln!("  translate-scraper audio <lang> <output-file> [--slow] <text...>");
    eprintln!("  translate-scraper languages [source|target]");
}

/// Words after the fixed positional arguments, joined back into one string
fn joined(words: &[String]) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

fn print_languages(direction: Option<&str>) -> Result<()> {
    let list = match direction {
        Some(direction) => {
            let direction: LanguageType = direction.parse().map_err(anyhow::Error::msg)?;
            language_list(direction)
        }
        None => all_languages(),
    };

    for (code, name) in list {
        println!("{:<10} {}", code, name);
    }
    Ok(())
}

async fn run_endpoint(
    client: &reqwest::Client,
    config: &Config,
    endpoint: Endpoint,
    args: &[String],
) -> Result<()> {
    match endpoint {
        Endpoint::Text => {
            let (Some(source), Some(target), Some(query)) =
                (args.first(), args.get(1), joined(args.get(2..).unwrap_or_default()))
            else {
                print_usage();
                bail!("text needs a source, a target and a query");
            };

            match translate_text(client, config, source, target, &query).await {
                Some(translation) => println!("{}", translation),
                None => bail!("No translation found"),
            }
        }
        Endpoint::Info => {
            let (Some(source), Some(target), Some(query)) =
                (args.first(), args.get(1), joined(args.get(2..).unwrap_or_default()))
            else {
                print_usage();
                bail!("info needs a source, a target and a query");
            };

            match translate_info(client, config, source, target, &query).await {
                Some(info) => println!("{}", serde_json::to_string_pretty(&info.to_json())?),
                None => bail!("No translation info found"),
            }
        }
        Endpoint::Audio => {
            let slow = args.iter().any(|arg| arg == "--slow");
            let rest: Vec<String> = args.iter().filter(|arg| *arg != "--slow").cloned().collect();

            let (Some(lang), Some(output), Some(text)) =
                (rest.first(), rest.get(1), joined(rest.get(2..).unwrap_or_default()))
            else {
                print_usage();
                bail!("audio needs a language, an output file and some text");
            };

            let Some(audio) = synthesize_audio(client, config, lang, &text, slow).await else {
                bail!("No audio returned");
            };

            fs::write(output, &audio).with_context(|| format!("Failed to write {}", output))?;
            info!("Wrote {} bytes of audio to {}", audio.len(), output);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("translate_scraper=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let Some(command) = args.get(1) else {
        print_usage();
        std::process::exit(1);
    };

    if command == "languages" {
        return print_languages(args.get(2).map(String::as_str));
    }

    let endpoint: Endpoint = match command.parse() {
        Ok(endpoint) => endpoint,
        Err(e) => {
            print_usage();
            return Err(e.into());
        }
    };

    let config = Config::from_env().context("Failed to load configuration")?;
    let client = reqwest::Client::new();

    run_endpoint(&client, &config, endpoint, &args[2..]).await
}
