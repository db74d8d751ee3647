//! trollguard: interactive tone analyzer
//!
//! Without a subcommand, prompts for text until `exit`. `analyze` runs a
//! single analysis on an argument or stdin.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;
use trollguard::console;
use trollguard::{Config, Secrets, ToneAnalyzer};

/// TrollGuard tone analyzer
#[derive(Parser)]
#[command(name = "trollguard")]
#[command(version = trollguard::PKG_VERSION)]
#[command(about = "Hybrid NLP tone analyzer: toxicity, emotion, sarcasm and sentiment")]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Inference API base URL (overrides the config file)
    #[arg(long, env = "TROLLGUARD_BASE_URL")]
    base_url: Option<String>,

    /// HuggingFace API key (overrides secrets.toml)
    #[arg(long, env = "HF_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a single text and exit
    Analyze {
        /// Text to analyze (or omit to read from stdin)
        text: Option<String>,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(url) = args.base_url {
        config.huggingface.base_url = Some(url);
    }
    let api_key = match args.api_key {
        Some(key) => Some(key),
        None => Secrets::load()?.api_key(),
    };

    let analyzer = config.analyzer_builder(api_key).build()?;
    info!(
        version = trollguard::version_string(),
        providers = ?analyzer.provider_names(),
        "analyzer ready"
    );

    match args.command {
        None => {
            let stdin = io::stdin();
            console::run_interactive(&analyzer, stdin.lock(), io::stdout()).await?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Analyze { text, json }) => analyze_once(&analyzer, text, json).await,
    }
}

async fn analyze_once(
    analyzer: &ToneAnalyzer,
    text: Option<String>,
    json: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let text = resolve_text(text)?;
    let written = console::analyze_once(analyzer, &text, json, io::stdout(), io::stderr()).await?;
    Ok(if written {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Resolve text input from an optional CLI argument, falling back to piped stdin.
fn resolve_text(arg: Option<String>) -> io::Result<String> {
    if let Some(text) = arg {
        return Ok(text);
    }
    let mut buf = String::new();
    if !io::stdin().is_terminal() {
        io::stdin().read_to_string(&mut buf)?;
    }
    Ok(buf)
}
