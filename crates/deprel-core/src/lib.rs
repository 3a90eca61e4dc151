//! deprel Core - Annotation model, annotator contract and shared types
//!
//! This crate defines the core abstractions used throughout deprel:
//! - Per-sentence annotation model (tokens, POS tags, arcs, entity tags, roles)
//! - Dependency relation labels
//! - The `Annotator` contract and its scoped session handle
//! - Common error types
//! - Configuration management

pub mod annotation;
pub mod annotator;
pub mod config;

pub use annotation::{Annotation, DependencyArc, Relation, RoleArgument, SemanticRole};
pub use annotator::{Annotator, AnnotatorSession};
pub use config::{
    AnnotatorConfig, AppConfig, ConfigError, CorpusFormat, ExtractionConfig, LoggingConfig,
};

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for deprel operations
#[derive(Error, Debug)]
pub enum DeprelError {
    #[error("Invalid annotation: {0}")]
    InvalidAnnotation(String),

    #[error("Annotator error: {0}")]
    Annotator(String),

    #[error("Sentence not found: {0}")]
    NotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, DeprelError>;
