//! deprel Configuration Management
//!
//! Handles configuration from environment variables, config files,
//! and command-line arguments with defaults matching the built-in rules.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Annotation backend configuration
    pub annotator: AnnotatorConfig,

    /// Relation extraction configuration
    pub extraction: ExtractionConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        self.apply_env()?;
        Ok(self)
    }

    /// Overwrite every field whose environment variable is set
    fn apply_env(&mut self) -> Result<(), ConfigError> {
        // Annotator
        if let Ok(path) = std::env::var("DEPREL_CORPUS") {
            self.annotator.corpus_path = Some(PathBuf::from(path));
        }
        if let Ok(format) = std::env::var("DEPREL_CORPUS_FORMAT") {
            self.annotator.format = format.parse()?;
        }

        // Extraction
        if let Ok(words) = std::env::var("DEPREL_COLLOCATION_STOP_WORDS") {
            self.extraction.collocation_stop_words = split_list(&words);
        }
        if let Ok(words) = std::env::var("DEPREL_COORDINATION_STOP_WORDS") {
            self.extraction.coordination_stop_words = split_list(&words);
        }
        if let Ok(value) = std::env::var("DEPREL_SPLIT_SENTENCES") {
            self.extraction.split_sentences = parse_bool("DEPREL_SPLIT_SENTENCES", &value)?;
        }
        if let Ok(value) = std::env::var("DEPREL_PARALLEL") {
            self.extraction.parallel = parse_bool("DEPREL_PARALLEL", &value)?;
        }

        // Logging
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(value) = std::env::var("LOG_JSON") {
            self.logging.json_format = parse_bool("LOG_JSON", &value)?;
        }

        Ok(())
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Annotation backend configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotatorConfig {
    /// Corpus of pre-computed annotations served by the corpus annotator
    pub corpus_path: Option<PathBuf>,

    /// Corpus file format
    pub format: CorpusFormat,
}

impl AnnotatorConfig {
    /// Corpus path, or an error naming the missing setting
    pub fn require_corpus(&self) -> Result<&Path, ConfigError> {
        self.corpus_path
            .as_deref()
            .ok_or_else(|| ConfigError::MissingRequired("annotator.corpus_path".to_string()))
    }
}

/// Supported corpus file formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorpusFormat {
    /// Detect from file extension
    #[default]
    Auto,
    /// CoNLL-X tab-separated columns
    Conll,
    /// One JSON annotation per line
    Jsonl,
}

impl std::str::FromStr for CorpusFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "conll" | "conllx" => Ok(Self::Conll),
            "jsonl" | "json" => Ok(Self::Jsonl),
            _ => Err(ConfigError::InvalidValue {
                key: "DEPREL_CORPUS_FORMAT".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for CorpusFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Conll => write!(f, "conll"),
            Self::Jsonl => write!(f, "jsonl"),
        }
    }
}

/// Relation extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Words that suppress subject-predicate and modifier pairs
    pub collocation_stop_words: Vec<String>,

    /// Words that suppress coordinated pairs
    pub coordination_stop_words: Vec<String>,

    /// Split input text into sentences before analysis
    pub split_sentences: bool,

    /// Process sentences of a paragraph in parallel
    pub parallel: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            collocation_stop_words: ["是", "又", "而且", "root"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            coordination_stop_words: ["是", "又", "而且"].iter().map(|s| s.to_string()).collect(),
            split_sentences: true,
            parallel: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,

    /// Include file/line in logs
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            include_location: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    const ENV_KEYS: &[&str] = &[
        "DEPREL_CORPUS",
        "DEPREL_CORPUS_FORMAT",
        "DEPREL_COLLOCATION_STOP_WORDS",
        "DEPREL_COORDINATION_STOP_WORDS",
        "DEPREL_SPLIT_SENTENCES",
        "DEPREL_PARALLEL",
        "LOG_LEVEL",
        "LOG_JSON",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.annotator.format, CorpusFormat::Auto);
        assert!(config.annotator.corpus_path.is_none());
        assert_eq!(config.extraction.collocation_stop_words.len(), 4);
        assert!(config
            .extraction
            .collocation_stop_words
            .contains(&"root".to_string()));
        assert_eq!(config.extraction.coordination_stop_words.len(), 3);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_corpus_format_parse() {
        assert_eq!(
            "conll".parse::<CorpusFormat>().unwrap(),
            CorpusFormat::Conll
        );
        assert_eq!(
            "JSONL".parse::<CorpusFormat>().unwrap(),
            CorpusFormat::Jsonl
        );
        assert!("xml".parse::<CorpusFormat>().is_err());
    }

    #[test]
    fn test_require_corpus() {
        let config = AnnotatorConfig::default();
        assert!(matches!(
            config.require_corpus(),
            Err(ConfigError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_from_file_partial_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[annotator]
corpus_path = "/data/corpus.conll"
format = "conll"

[extraction]
coordination_stop_words = ["和"]
parallel = false
"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(
            config.annotator.corpus_path,
            Some(PathBuf::from("/data/corpus.conll"))
        );
        assert_eq!(config.annotator.format, CorpusFormat::Conll);
        assert_eq!(config.extraction.coordination_stop_words, vec!["和"]);
        assert!(!config.extraction.parallel);
        // Untouched sections keep their defaults
        assert_eq!(config.extraction.collocation_stop_words.len(), 4);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_from_file_missing() {
        let err = AppConfig::from_file("/nonexistent/deprel.toml").unwrap_err();
        assert!(matches!(err, ConfigError::FileReadError { .. }));
    }

    #[test]
    #[serial]
    fn test_from_env() {
        clear_env();
        std::env::set_var("DEPREL_CORPUS", "/tmp/sentences.jsonl");
        std::env::set_var("DEPREL_CORPUS_FORMAT", "jsonl");
        std::env::set_var("DEPREL_COORDINATION_STOP_WORDS", "和, 与 ,");
        std::env::set_var("DEPREL_PARALLEL", "off");

        let config = AppConfig::from_env().unwrap();
        clear_env();

        assert_eq!(
            config.annotator.corpus_path,
            Some(PathBuf::from("/tmp/sentences.jsonl"))
        );
        assert_eq!(config.annotator.format, CorpusFormat::Jsonl);
        assert_eq!(config.extraction.coordination_stop_words, vec!["和", "与"]);
        assert!(!config.extraction.parallel);
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_bool() {
        clear_env();
        std::env::set_var("DEPREL_PARALLEL", "sometimes");
        let result = AppConfig::from_env();
        clear_env();

        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    #[serial]
    fn test_env_override_wins() {
        clear_env();
        let mut base = AppConfig::default();
        base.logging.level = "warn".to_string();
        base.annotator.format = CorpusFormat::Conll;

        std::env::set_var("LOG_LEVEL", "debug");
        let config = base.with_env_override().unwrap();
        clear_env();

        assert_eq!(config.logging.level, "debug");
        // Not set in env, file value kept
        assert_eq!(config.annotator.format, CorpusFormat::Conll);
    }

    #[test]
    #[serial]
    fn test_env_override_with_default_value() {
        clear_env();
        let mut base = AppConfig::default();
        base.extraction.parallel = false;
        base.logging.level = "warn".to_string();
        base.annotator.format = CorpusFormat::Conll;

        std::env::set_var("DEPREL_PARALLEL", "true");
        std::env::set_var("LOG_LEVEL", "info");
        std::env::set_var("DEPREL_CORPUS_FORMAT", "auto");
        let config = base.with_env_override().unwrap();
        clear_env();

        assert!(config.extraction.parallel);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.annotator.format, CorpusFormat::Auto);
    }
}
