//! HabitForge CLI - Command-line interface
//!
//! Usage:
//!   habit extract "I run 5km three times a week"
//!   habit batch sentences.txt --language it
//!   habit replay annotated.json

use std::path::{Path, PathBuf};
use std::pin::pin;

use anyhow::Context;
use clap::{Parser, Subcommand};
use futures::stream::{self, StreamExt};
use habit_core::{AppConfig, HabitRecord};
use habit_extractor::adapter::AnnotatedDocument;
use habit_extractor::{HabitExtractor, HabitPipeline};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "habit")]
#[command(about = "Extract structured habits from free text")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a habit from one sentence
    Extract {
        /// Sentence to analyze
        text: String,
        /// Two-letter language code (skips language identification)
        #[arg(short, long)]
        language: Option<String>,
        /// Pretty-print the JSON record
        #[arg(long)]
        pretty: bool,
    },
    /// Extract habits from a file with one sentence per line (JSON Lines output)
    Batch {
        /// Input file
        file: PathBuf,
        #[arg(short, long)]
        language: Option<String>,
        /// Sentences analyzed concurrently (output keeps input order)
        #[arg(short = 'j', long, default_value_t = 4)]
        jobs: usize,
    },
    /// Run the engine offline on a pre-annotated sentence
    Replay {
        /// JSON document with text, language, tokens and entities
        file: PathBuf,
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config, cli.verbose);

    match cli.command {
        Commands::Extract {
            text,
            language,
            pretty,
        } => {
            let pipeline = habit_nlp::create_pipeline(&config)?;
            let record = pipeline
                .extract_with_language(&text, language.as_deref())
                .await?;
            println!("{}", render(&record, pretty)?);
        }
        Commands::Batch {
            file,
            language,
            jobs,
        } => {
            let content = read_file(&file)?;
            let pipeline = habit_nlp::create_pipeline(&config)?;
            run_batch(&pipeline, &content, language.as_deref(), jobs).await?;
        }
        Commands::Replay { file, pretty } => {
            let record = replay(&read_file(&file)?)?;
            println!("{}", render(&record, pretty)?);
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::from_file(path)?.with_env_override()?,
        None => AppConfig::from_env()?,
    };
    Ok(config)
}

/// Logs go to stderr so stdout stays machine-readable
fn init_tracing(config: &AppConfig, verbose: u8) {
    let level = match verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("habit_cli={level},habit_extractor={level},habit_nlp={level}").into()
    });

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.logging.json_format {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

async fn run_batch(
    pipeline: &HabitPipeline,
    content: &str,
    language: Option<&str>,
    jobs: usize,
) -> anyhow::Result<()> {
    let mut results = pin!(stream::iter(batch_sentences(content))
        .map(|(line_no, sentence)| async move {
            (line_no, pipeline.extract_with_language(sentence, language).await)
        })
        .buffered(jobs.max(1)));

    while let Some((line_no, result)) = results.next().await {
        match result {
            Ok(record) => println!("{}", render(&record, false)?),
            Err(e) => warn!(line = line_no, error = %e, "skipping sentence"),
        }
    }
    Ok(())
}

/// Non-blank lines with their 1-based line numbers
fn batch_sentences(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

fn replay(document: &str) -> anyhow::Result<HabitRecord> {
    let document: AnnotatedDocument =
        serde_json::from_str(document).context("Invalid annotated document")?;
    if document.text.trim().is_empty() {
        anyhow::bail!("Annotated document has empty text");
    }

    let sentence = document.into_sentence();
    Ok(HabitExtractor::new().extract(&sentence))
}

fn render(record: &HabitRecord, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(record)?
    } else {
        serde_json::to_string(record)?
    };
    Ok(json)
}
