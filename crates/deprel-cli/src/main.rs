//! deprel CLI - Command-line interface
//!
//! Usage:
//!   deprel extract <file>
//!   deprel analyze <text> --corpus <file>
//!   deprel table <file>

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use deprel_core::{AnnotatorSession, AppConfig, CorpusFormat, LoggingConfig};
use deprel_extractor::{DependencyTable, RelationPipeline};
use deprel_parser::{load_annotations, CorpusAnnotator};

#[derive(Parser)]
#[command(name = "deprel")]
#[command(about = "Dependency-parse relation extraction CLI")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract relations from every sentence of an annotation file
    Extract {
        /// CoNLL-X or JSON Lines file
        path: PathBuf,
        /// Corpus format (auto, conll, jsonl)
        #[arg(long)]
        format: Option<CorpusFormat>,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Annotate text through the corpus annotator and extract relations
    Analyze {
        /// Sentence or paragraph
        text: String,
        /// Corpus backing the annotator (overrides config)
        #[arg(long)]
        corpus: Option<PathBuf>,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print the dependency table of every sentence in a file
    Table {
        /// CoNLL-X or JSON Lines file
        path: PathBuf,
        /// Corpus format (auto, conll, jsonl)
        #[arg(long)]
        format: Option<CorpusFormat>,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    Ok(config.with_env_override()?)
}

fn init_tracing(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    if config.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_json<T: Serialize>(items: &[T], pretty: bool) -> anyhow::Result<()> {
    for item in items {
        let line = if pretty {
            serde_json::to_string_pretty(item)?
        } else {
            serde_json::to_string(item)?
        };
        println!("{}", line);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config.logging);
    tracing::debug!("Configuration: {:?}", config);

    let pipeline = RelationPipeline::from_config(&config.extraction);

    match cli.command {
        Commands::Extract {
            path,
            format,
            pretty,
        } => {
            let format = format.unwrap_or(config.annotator.format);
            let annotations = load_annotations(&path, format)
                .with_context(|| format!("loading {}", path.display()))?;
            let relations = pipeline.extract_annotations(&annotations)?;
            tracing::info!("Extracted relations for {} sentences", relations.len());
            print_json(&relations, pretty)?;
        }
        Commands::Analyze {
            text,
            corpus,
            pretty,
        } => {
            let mut annotator_config = config.annotator.clone();
            if corpus.is_some() {
                annotator_config.corpus_path = corpus;
            }

            let session = AnnotatorSession::open(CorpusAnnotator::from_config(&annotator_config)?);
            let relations = pipeline.extract_paragraph(session.annotator(), &text)?;
            print_json(&relations, pretty)?;
            session.close()?;
        }
        Commands::Table { path, format } => {
            let format = format.unwrap_or(config.annotator.format);
            let annotations = load_annotations(&path, format)
                .with_context(|| format!("loading {}", path.display()))?;

            for annotation in &annotations {
                annotation.validate()?;
                let table = DependencyTable::from_annotation(annotation);
                println!("# {}", annotation.text());
                println!("index\tword\tpos\trelation\tgovernor\tgovernor_word\tpair_text");
                for row in table.rows() {
                    println!("{}", row);
                }
                println!();
            }
        }
    }

    Ok(())
}
