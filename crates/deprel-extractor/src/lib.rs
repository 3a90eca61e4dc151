//! deprel Extractor - Relation extraction over dependency parses
//!
//! Turns a sentence's flat head/relation arcs into a [`DependencyTable`] and
//! runs rule-based extractors over it: core triples, collocations,
//! coordinated pairs and noun collocations.

pub mod core_triple;
pub mod pipeline;
pub mod relation;
pub mod sentence;
pub mod stopwords;
pub mod table;

pub use core_triple::{extract_core, CoreSummary, CoreTripleRule};
pub use pipeline::{RelationPipeline, SentenceRelations};
pub use relation::{
    find_collocations, find_coordinated_pairs, find_entity_collocations, CollocationRule,
    Collocations, CoordinationRule, EntityCollocationRule, WordPair,
};
pub use sentence::split_sentences;
pub use stopwords::StopWords;
pub use table::{DependencyRow, DependencyTable, ROOT_SENTINEL};

/// Trait for rules evaluated against a dependency table
///
/// Rules are pure: applying one twice to the same table yields the same output.
pub trait RelationRule: Send + Sync {
    type Output;

    /// Short rule identifier used in logs
    fn name(&self) -> &'static str;

    /// Evaluate the rule
    fn apply(&self, table: &DependencyTable) -> Self::Output;
}
