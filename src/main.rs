//! Summa Digest CLI - chunked document summarisation
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use std::path::PathBuf;
use summa_digest::source::Source;
use summa_digest::{chunk, merge, provider, summarize_all, Config, RuleTokenizer, SummaryAgent};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "summa-digest")]
#[command(author, version, about = "Chunked LLM summarisation of long documents", long_about = None)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise a document from a file path or URL
    Summarise {
        /// File path or http(s) URL
        input: String,
        /// Maximum words per chunk
        #[arg(long)]
        max_words: Option<usize>,
        /// Path to summa.toml
        #[arg(long)]
        config: Option<PathBuf>,
        /// Also write the report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show how a document would be chunked, without calling a model
    Chunks {
        /// File path or http(s) URL
        input: String,
        /// Maximum words per chunk
        #[arg(long)]
        max_words: Option<usize>,
        /// Path to summa.toml
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Generate shell completions
    Completions {
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Summarise {
            input,
            max_words,
            config,
            output,
        } => {
            let config = load_config(config, max_words)?;
            let document = Source::parse(&input).load().await?;
            let tokenizer = RuleTokenizer::new();

            let chunks = chunk(&document.text, config.chunking.max_words, &tokenizer);
            println!(
                "{} {} ({} chunks, max {} words each)\n",
                "Summarising".bold(),
                document.title.as_deref().unwrap_or(&document.origin),
                chunks.len(),
                config.chunking.max_words
            );

            let client = provider::from_config(&config)?;
            let agent = SummaryAgent::new(client, &config.agent);
            let summaries = summarize_all(&agent, &chunks).await;
            let report = merge(&summaries);

            println!("{}", "=== FINAL SUMMARY ===".green().bold());
            println!("{}", report);

            if let Some(path) = output {
                let header = format!(
                    "# {} - {}\n\n",
                    document.origin,
                    chrono::Local::now().format("%Y-%m-%d %H:%M")
                );
                std::fs::write(&path, header + &report)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                println!("Report written to {}", path.display());
            }
        }
        Commands::Chunks {
            input,
            max_words,
            config,
        } => {
            let config = load_config(config, max_words)?;
            let document = Source::parse(&input).load().await?;
            let max_words = config.chunking.max_words;
            let chunks = chunk(&document.text, max_words, &RuleTokenizer::new());

            println!("Split into {} chunks\n", chunks.len());
            for (i, c) in chunks.iter().enumerate() {
                let label = format!("--- Chunk {} ({} words) ---", i + 1, c.word_count());
                if c.is_oversized(max_words) {
                    println!("{} {}", label.yellow(), "[single oversized sentence]".yellow());
                } else {
                    println!("{}", label.cyan());
                }
                println!("{}\n", preview(&c.text(), 20));
            }
        }
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "summa-digest",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

/// Logs go to stderr so the report on stdout stays clean
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<PathBuf>, max_words: Option<usize>) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => Config::load_from(&path)?,
        None => Config::load()?,
    };
    if let Some(max_words) = max_words {
        config.chunking.max_words = max_words;
        config.validate()?;
    }
    Ok(config)
}

/// The first `words` whitespace-separated words, with an ellipsis if cut
fn preview(text: &str, words: usize) -> String {
    let mut parts = text.split_whitespace();
    let head: Vec<&str> = parts.by_ref().take(words).collect();
    if parts.next().is_some() {
        format!("{} ...", head.join(" "))
    } else {
        head.join(" ")
    }
}
