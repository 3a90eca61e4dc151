//! Corpus-backed annotator
//!
//! Replays pre-computed annotations through the `Annotator` contract so the
//! extraction pipeline can run without a live annotation engine.

use std::collections::HashMap;
use std::path::Path;

use deprel_core::{
    Annotation, Annotator, AnnotatorConfig, CorpusFormat, DependencyArc, DeprelError, Result,
    SemanticRole,
};

use crate::load_annotations;

/// Annotator serving a fixed corpus of annotated sentences
#[derive(Debug, Default)]
pub struct CorpusAnnotator {
    annotations: Vec<Annotation>,
    /// Whitespace-free sentence text -> annotation index
    by_text: HashMap<String, usize>,
    /// Token sequence -> annotation index
    by_words: HashMap<Vec<String>, usize>,
}

fn normalize(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

impl CorpusAnnotator {
    /// Index a set of annotations; the first occurrence of a sentence wins
    pub fn new(annotations: Vec<Annotation>) -> Self {
        let mut by_text = HashMap::new();
        let mut by_words = HashMap::new();

        for (i, annotation) in annotations.iter().enumerate() {
            by_text.entry(normalize(&annotation.text())).or_insert(i);
            by_words.entry(annotation.words.clone()).or_insert(i);
        }

        Self {
            annotations,
            by_text,
            by_words,
        }
    }

    /// Load a corpus file
    pub fn load(path: &Path, format: CorpusFormat) -> Result<Self> {
        let annotations = load_annotations(path, format)?;
        Ok(Self::new(annotations))
    }

    /// Load the corpus named by the configuration
    pub fn from_config(config: &AnnotatorConfig) -> Result<Self> {
        let path = config.require_corpus()?;
        Self::load(path, config.format)
    }

    /// Number of sentences in the corpus
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Check if the corpus is empty
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// All annotations in corpus order
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    fn lookup_words(&self, words: &[String]) -> Result<&Annotation> {
        self.by_words
            .get(words)
            .map(|&i| &self.annotations[i])
            .ok_or_else(|| DeprelError::NotFound(words.concat()))
    }
}

impl Annotator for CorpusAnnotator {
    fn segment(&self, sentence: &str) -> Result<Vec<String>> {
        self.by_text
            .get(&normalize(sentence))
            .map(|&i| self.annotations[i].words.clone())
            .ok_or_else(|| DeprelError::NotFound(sentence.to_string()))
    }

    fn tag(&self, words: &[String]) -> Result<Vec<String>> {
        Ok(self.lookup_words(words)?.postags.clone())
    }

    fn parse(&self, words: &[String], _postags: &[String]) -> Result<Vec<DependencyArc>> {
        Ok(self.lookup_words(words)?.arcs.clone())
    }

    fn recognize_entities(&self, words: &[String], _postags: &[String]) -> Result<Vec<String>> {
        Ok(self.lookup_words(words)?.netags.clone())
    }

    fn label_roles(
        &self,
        words: &[String],
        _postags: &[String],
        _arcs: &[DependencyArc],
    ) -> Result<Vec<SemanticRole>> {
        Ok(self.lookup_words(words)?.roles.clone())
    }

    fn release(&mut self) -> Result<()> {
        tracing::debug!("Releasing corpus of {} sentences", self.annotations.len());
        self.annotations.clear();
        self.by_text.clear();
        self.by_words.clear();
        Ok(())
    }
}
