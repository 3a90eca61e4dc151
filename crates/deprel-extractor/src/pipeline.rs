//! Relation extraction pipeline
//!
//! Annotates a sentence once, builds its dependency table, and runs every
//! rule against the same table. Sentences are independent, so paragraphs and
//! corpora fan out across a rayon pool when parallelism is enabled.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use deprel_core::{Annotation, Annotator, ExtractionConfig, Result};

use crate::core_triple::{CoreSummary, CoreTripleRule};
use crate::relation::{
    CollocationRule, Collocations, CoordinationRule, EntityCollocationRule, WordPair,
};
use crate::sentence::split_sentences;
use crate::table::DependencyTable;
use crate::{RelationRule, StopWords};

/// Everything extracted from a single sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceRelations {
    /// Sentence text
    pub sentence: String,
    /// Core summary
    pub core: CoreSummary,
    /// Subject-predicate and modifier collocations
    pub collocations: Collocations,
    /// Coordinated word pairs
    pub coordinated_pairs: Vec<WordPair>,
    /// Noun collocations
    pub entity_collocations: Vec<String>,
}

/// Runs every relation rule over annotated sentences
#[derive(Debug, Clone)]
pub struct RelationPipeline {
    core: CoreTripleRule,
    collocation: CollocationRule,
    coordination: CoordinationRule,
    entity: EntityCollocationRule,
    split_sentences: bool,
    parallel: bool,
}

impl RelationPipeline {
    /// Create a pipeline with the default stop words
    pub fn new() -> Self {
        Self {
            core: CoreTripleRule,
            collocation: CollocationRule::default(),
            coordination: CoordinationRule::default(),
            entity: EntityCollocationRule,
            split_sentences: true,
            parallel: true,
        }
    }

    /// Create a pipeline from configuration
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            collocation: CollocationRule::new(config.collocation_stop_words.iter().collect()),
            coordination: CoordinationRule::new(config.coordination_stop_words.iter().collect()),
            split_sentences: config.split_sentences,
            parallel: config.parallel,
            ..Self::new()
        }
    }

    /// Override collocation stop words
    pub fn with_collocation_stop_words(mut self, stop_words: StopWords) -> Self {
        self.collocation = CollocationRule::new(stop_words);
        self
    }

    /// Override coordination stop words
    pub fn with_coordination_stop_words(mut self, stop_words: StopWords) -> Self {
        self.coordination = CoordinationRule::new(stop_words);
        self
    }

    /// Enable or disable sentence splitting in [`Self::extract_paragraph`]
    pub fn with_sentence_splitting(mut self, split: bool) -> Self {
        self.split_sentences = split;
        self
    }

    /// Enable or disable parallel processing
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Run every rule against a built table
    pub fn extract_table(
        &self,
        sentence: impl Into<String>,
        table: &DependencyTable,
    ) -> SentenceRelations {
        let sentence = sentence.into();
        tracing::debug!(
            "Extracting relations from {} tokens with {}, {}, {}, {}",
            table.len(),
            self.core.name(),
            self.collocation.name(),
            self.coordination.name(),
            self.entity.name()
        );

        SentenceRelations {
            sentence,
            core: self.core.apply(table),
            collocations: self.collocation.apply(table),
            coordinated_pairs: self.coordination.apply(table),
            entity_collocations: self.entity.apply(table),
        }
    }

    /// Validate an annotation, build its table and extract relations
    pub fn extract_annotation(&self, annotation: &Annotation) -> Result<SentenceRelations> {
        annotation.validate()?;
        let table = DependencyTable::from_annotation(annotation);
        Ok(self.extract_table(annotation.text(), &table))
    }

    /// Extract relations for a batch of pre-computed annotations, in order
    pub fn extract_annotations(&self, annotations: &[Annotation]) -> Result<Vec<SentenceRelations>> {
        if self.parallel {
            annotations
                .par_iter()
                .map(|a| self.extract_annotation(a))
                .collect()
        } else {
            annotations
                .iter()
                .map(|a| self.extract_annotation(a))
                .collect()
        }
    }

    /// Annotate one sentence and extract its relations
    pub fn extract_relations<A>(&self, annotator: &A, sentence: &str) -> Result<SentenceRelations>
    where
        A: Annotator + ?Sized,
    {
        let annotation = annotator.analyze(sentence)?;
        let table = DependencyTable::from_annotation(&annotation);
        Ok(self.extract_table(sentence, &table))
    }

    /// Split a paragraph into sentences and extract relations for each
    pub fn extract_paragraph<A>(
        &self,
        annotator: &A,
        paragraph: &str,
    ) -> Result<Vec<SentenceRelations>>
    where
        A: Annotator + ?Sized,
    {
        let sentences = if self.split_sentences {
            split_sentences(paragraph)
        } else {
            vec![paragraph.trim()]
        };
        let sentences: Vec<&str> = sentences.into_iter().filter(|s| !s.is_empty()).collect();
        tracing::debug!("Paragraph split into {} sentences", sentences.len());

        if self.parallel {
            sentences
                .par_iter()
                .map(|s| self.extract_relations(annotator, s))
                .collect()
        } else {
            sentences
                .iter()
                .map(|s| self.extract_relations(annotator, s))
                .collect()
        }
    }
}

impl Default for RelationPipeline {
    fn default() -> Self {
        Self::new()
    }
}
