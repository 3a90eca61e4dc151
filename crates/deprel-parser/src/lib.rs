//! deprel Parser - Loading pre-computed sentence annotations
//!
//! Supports parsing of:
//! - CoNLL-X dependency files (as written by LTP and most parsers)
//! - JSON Lines, one serialized `Annotation` per line
//!
//! Each parser implements the `AnnotationParser` trait. Parsed corpora back
//! the [`CorpusAnnotator`], which replays them through the `Annotator` trait.

use std::path::Path;

use deprel_core::{Annotation, CorpusFormat, DeprelError};
use thiserror::Error;

pub mod conll;
pub mod corpus;
pub mod jsonl;

pub use conll::ConllParser;
pub use corpus::CorpusAnnotator;
pub use jsonl::JsonlParser;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur while loading annotations
#[derive(Error, Debug)]
pub enum ParserError {
    /// File format is not supported
    #[error("Unsupported corpus format: {0}")]
    UnsupportedFormat(String),

    /// IO error while reading the file
    #[error("IO error reading file: {path}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CoNLL row
    #[error("CoNLL error at line {line}: {message}")]
    Conll { line: usize, message: String },

    /// Malformed JSON line
    #[error("JSON error at line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Sentence parsed but its sequences are inconsistent
    #[error("Invalid annotation for sentence ending at line {line}: {message}")]
    InvalidAnnotation { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, ParserError>;

impl From<ParserError> for DeprelError {
    fn from(err: ParserError) -> Self {
        DeprelError::Parse(err.to_string())
    }
}

// ============================================================================
// Format Detection
// ============================================================================

/// Detect corpus format from extension
pub fn format_from_extension(ext: &str) -> Option<CorpusFormat> {
    match ext.to_lowercase().as_str() {
        "conll" | "conllx" | "conllu" | "txt" => Some(CorpusFormat::Conll),
        "jsonl" | "json" | "ndjson" => Some(CorpusFormat::Jsonl),
        _ => None,
    }
}

/// Resolve `CorpusFormat::Auto` against a path
pub fn resolve_format(path: &Path, format: CorpusFormat) -> Result<CorpusFormat> {
    if format != CorpusFormat::Auto {
        return Ok(format);
    }

    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(format_from_extension)
        .ok_or_else(|| ParserError::UnsupportedFormat(path.display().to_string()))
}

// ============================================================================
// Parser Trait
// ============================================================================

/// Trait for annotation corpus parsers
pub trait AnnotationParser: Send + Sync {
    /// Parse annotations from in-memory content
    fn parse_str(&self, content: &str) -> Result<Vec<Annotation>>;

    /// Format handled by this parser
    fn format(&self) -> CorpusFormat;

    /// Parse annotations from a file
    fn parse_file(&self, path: &Path) -> Result<Vec<Annotation>> {
        let content = std::fs::read_to_string(path).map_err(|e| ParserError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;
        self.parse_str(&content)
    }
}

/// Get the parser for a concrete format
pub fn parser_for(format: CorpusFormat) -> Result<Box<dyn AnnotationParser>> {
    match format {
        CorpusFormat::Conll => Ok(Box::new(ConllParser)),
        CorpusFormat::Jsonl => Ok(Box::new(JsonlParser)),
        CorpusFormat::Auto => Err(ParserError::UnsupportedFormat(
            "format must be resolved before parsing".to_string(),
        )),
    }
}

/// Load every annotation from a corpus file
pub fn load_annotations(path: &Path, format: CorpusFormat) -> Result<Vec<Annotation>> {
    let format = resolve_format(path, format)?;
    let annotations = parser_for(format)?.parse_file(path)?;

    tracing::info!(
        "Loaded {} annotated sentences from {} ({})",
        annotations.len(),
        path.display(),
        format
    );
    Ok(annotations)
}

// ============================================================================
// Tests
// ============================================================================
