//! JSON Lines parser

use deprel_core::{Annotation, CorpusFormat};

use crate::{AnnotationParser, ParserError, Result};

/// Parser for one serialized `Annotation` per line
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonlParser;

impl AnnotationParser for JsonlParser {
    fn parse_str(&self, content: &str) -> Result<Vec<Annotation>> {
        let mut sentences = Vec::new();

        for (i, raw) in content.lines().enumerate() {
            let line = i + 1;
            if raw.trim().is_empty() {
                continue;
            }

            let mut annotation: Annotation = serde_json::from_str(raw)
                .map_err(|source| ParserError::Json { line, source })?;

            // Entity tags are optional in the line format
            if annotation.netags.is_empty() {
                annotation.netags = vec!["O".to_string(); annotation.words.len()];
            }

            annotation
                .validate()
                .map_err(|e| ParserError::InvalidAnnotation {
                    line,
                    message: e.to_string(),
                })?;
            sentences.push(annotation);
        }

        Ok(sentences)
    }

    fn format(&self) -> CorpusFormat {
        CorpusFormat::Jsonl
    }
}
