//! CoNLL-X parser
//!
//! Tab-separated rows `ID FORM LEMMA CPOSTAG POSTAG FEATS HEAD DEPREL [...]`,
//! one token per line, sentences separated by blank lines. An optional 11th
//! column carries the entity tag.

use deprel_core::{Annotation, CorpusFormat, DependencyArc};

use crate::{AnnotationParser, ParserError, Result};

const MIN_COLUMNS: usize = 8;
const NETAG_COLUMN: usize = 10;

/// Parser for CoNLL-X dependency files
#[derive(Debug, Clone, Copy, Default)]
pub struct ConllParser;

/// Tokens collected for the sentence currently being read
#[derive(Default)]
struct SentenceBuffer {
    words: Vec<String>,
    postags: Vec<String>,
    arcs: Vec<DependencyArc>,
    netags: Vec<String>,
}

impl SentenceBuffer {
    fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn finish(&mut self, line: usize) -> Result<Annotation> {
        let buffer = std::mem::take(self);
        let annotation =
            Annotation::new(buffer.words, buffer.postags, buffer.arcs).with_netags(buffer.netags);

        annotation
            .validate()
            .map_err(|e| ParserError::InvalidAnnotation {
                line,
                message: e.to_string(),
            })?;
        Ok(annotation)
    }
}

fn column(value: &str) -> Option<&str> {
    if value.is_empty() || value == "_" {
        None
    } else {
        Some(value)
    }
}

impl ConllParser {
    fn parse_row(&self, row: &str, line: usize, buffer: &mut SentenceBuffer) -> Result<()> {
        let mut cols: Vec<&str> = row.split('\t').collect();
        if cols.len() < MIN_COLUMNS {
            cols = row.split_whitespace().collect();
        }
        if cols.len() < MIN_COLUMNS {
            return Err(ParserError::Conll {
                line,
                message: format!("expected at least {} columns, got {}", MIN_COLUMNS, cols.len()),
            });
        }

        // CoNLL-U multiword ranges and empty nodes carry no arc
        if cols[0].contains('-') || cols[0].contains('.') {
            return Ok(());
        }

        let id: usize = cols[0].parse().map_err(|_| ParserError::Conll {
            line,
            message: format!("invalid token id '{}'", cols[0]),
        })?;
        if id != buffer.words.len() + 1 {
            return Err(ParserError::Conll {
                line,
                message: format!("expected token id {}, got {}", buffer.words.len() + 1, id),
            });
        }

        let head: usize = cols[6].parse().map_err(|_| ParserError::Conll {
            line,
            message: format!("invalid head '{}'", cols[6]),
        })?;
        let pos = column(cols[4]).or_else(|| column(cols[3])).unwrap_or("_");
        let netag = cols.get(NETAG_COLUMN).copied().and_then(column).unwrap_or("O");

        buffer.words.push(cols[1].to_string());
        buffer.postags.push(pos.to_string());
        buffer.arcs.push(DependencyArc::new(head, cols[7]));
        buffer.netags.push(netag.to_string());
        Ok(())
    }
}

impl AnnotationParser for ConllParser {
    fn parse_str(&self, content: &str) -> Result<Vec<Annotation>> {
        let mut sentences = Vec::new();
        let mut buffer = SentenceBuffer::default();
        let mut last_line = 0;

        for (i, raw) in content.lines().enumerate() {
            let line = i + 1;
            last_line = line;
            let row = raw.trim_end_matches('\r');

            if row.trim().is_empty() {
                if !buffer.is_empty() {
                    sentences.push(buffer.finish(line)?);
                }
                continue;
            }
            if row.starts_with('#') {
                continue;
            }

            self.parse_row(row, line, &mut buffer)?;
        }

        if !buffer.is_empty() {
            sentences.push(buffer.finish(last_line)?);
        }

        Ok(sentences)
    }

    fn format(&self) -> CorpusFormat {
        CorpusFormat::Conll
    }
}
