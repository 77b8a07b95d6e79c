mod client;
mod config;
mod llm;
mod routes;
mod state;
mod translate;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use client::{languages::languages, LocalStorage, SystemClipboard, TranslateApi, TranslationForm};
use crate::config::Config;
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "ai-translator", version, about = "LLM-backed translation service and client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API (default)
    Serve,
    /// Translate text through a running server
    Translate {
        /// Input language code
        #[arg(long, default_value = "en")]
        from: String,
        /// Output language code
        #[arg(long, default_value = "ur")]
        to: String,
        /// Copy the translation to the clipboard
        #[arg(long)]
        copy: bool,
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Print the stored translation history
    History,
    /// List the available languages
    Languages,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ai_translator=debug,tower_http=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Translate { from, to, copy, text } => {
            translate(&config, &from, &to, copy, text.join(" ")).await
        }
        Command::History => {
            let storage = LocalStorage::new(&config.client_config.storage_path);
            println!("{}", serde_json::to_string_pretty(&storage.load_history()?)?);
            Ok(())
        }
        Command::Languages => {
            for language in languages() {
                println!("{}\t{}", language.value, language.label);
            }
            Ok(())
        }
    }
}

async fn serve(config: Config) -> Result<()> {
    let host = config.system_config.host.clone();
    let port = config.system_config.port;

    // One provider client for the life of the process
    let app_state = AppState::new(config)?;
    info!("Using LLM provider {}", app_state.llm.name());

    let app = routes::build_app(app_state);

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    info!("Starting server on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn translate(config: &Config, from: &str, to: &str, copy: bool, text: String) -> Result<()> {
    let api = TranslateApi::new(&config.client_config.server_url);
    let storage = LocalStorage::new(&config.client_config.storage_path);

    let mut form = TranslationForm::new(
        Some(client::languages::resolve_language(from)),
        Some(client::languages::resolve_language(to)),
        text,
    );
    eprintln!("{}", form.counter_label());

    info!("Submitting to {}", api.endpoint());
    let pending = form.start_submission();
    if form.is_loading() {
        eprintln!("Translating...");
    }
    let reply = api.post(&pending.request).await;
    form.finish_submission(pending, reply, &storage);

    if !form.error().is_empty() {
        anyhow::bail!("{}", form.error());
    }

    println!("{}", form.translated_text());
    if copy {
        let mut clipboard = SystemClipboard::new()?;
        if !form.copy_translation(&mut clipboard)? {
            warn!("Nothing to copy");
        }
    }
    Ok(())
}
