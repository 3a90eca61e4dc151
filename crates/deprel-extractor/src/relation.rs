//! Collocation, coordination and entity-collocation rules
//!
//! Heuristic pattern rules over a [`DependencyTable`]. They are deliberately
//! permissive and may over- or under-fire on complex sentences.

use serde::{Deserialize, Serialize};

use deprel_core::Relation;

use crate::table::{DependencyRow, DependencyTable, ROOT_SENTINEL};
use crate::{RelationRule, StopWords};

// ============================================================================
// Output Types
// ============================================================================

/// A dependent word and the word it attaches to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordPair {
    /// Dependent token
    pub word: String,
    /// Governor token
    pub governor: String,
}

impl WordPair {
    /// Create a new pair
    pub fn new(word: impl Into<String>, governor: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            governor: governor.into(),
        }
    }

    /// Pair as `(word, governor)`
    pub fn as_tuple(&self) -> (&str, &str) {
        (&self.word, &self.governor)
    }
}

impl From<&DependencyRow> for WordPair {
    fn from(row: &DependencyRow) -> Self {
        Self::new(row.word.clone(), row.governor_word.clone())
    }
}

/// Output of [`find_collocations`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collocations {
    /// SBV pairs, only reported for sentences containing a coordination
    pub subject_predicate: Vec<WordPair>,
    /// ADV pairs followed by ATT pairs
    pub modifiers: Vec<WordPair>,
}

impl Collocations {
    /// Check if both collections are empty
    pub fn is_empty(&self) -> bool {
        self.subject_predicate.is_empty() && self.modifiers.is_empty()
    }
}

// ============================================================================
// Rules
// ============================================================================

fn pairs_with_relation(
    table: &DependencyTable,
    relation: &Relation,
    stop_words: &StopWords,
) -> Vec<WordPair> {
    table
        .with_relation(relation)
        .filter(|row| !stop_words.blocks(&row.word, &row.governor_word))
        .map(WordPair::from)
        .collect()
}

/// Find subject-predicate and modifier collocations
///
/// Subject-predicate pairs are gated on the sentence containing at least one
/// `COO` relation. Modifier pairs collect `ADV` rows, then `ATT` rows.
pub fn find_collocations(table: &DependencyTable, stop_words: &StopWords) -> Collocations {
    let mut collocations = Collocations::default();

    if table.has_relation(&Relation::Coo) {
        collocations.subject_predicate = pairs_with_relation(table, &Relation::Sbv, stop_words);
    }

    if table.has_relation(&Relation::Adv) || table.has_relation(&Relation::Att) {
        collocations.modifiers = pairs_with_relation(table, &Relation::Adv, stop_words);
        collocations
            .modifiers
            .extend(pairs_with_relation(table, &Relation::Att, stop_words));
    }

    collocations
}

/// Find coordinated word pairs (`COO` rows)
pub fn find_coordinated_pairs(table: &DependencyTable, stop_words: &StopWords) -> Vec<WordPair> {
    pairs_with_relation(table, &Relation::Coo, stop_words)
}

/// Find noun collocations: pair texts of every `n`-tagged, non-root row
///
/// Only the `"root "` governor sentinel disqualifies a pair; a real token
/// spelled `root` is kept, unlike a plain substring check on `root`.
pub fn find_entity_collocations(table: &DependencyTable) -> Vec<String> {
    table
        .with_pos("n")
        .filter(|row| !row.is_root() && !row.pair_text.contains(ROOT_SENTINEL))
        .map(|row| row.pair_text.clone())
        .collect()
}

/// Rule wrapper for [`find_collocations`]
#[derive(Debug, Clone)]
pub struct CollocationRule {
    stop_words: StopWords,
}

impl CollocationRule {
    /// Create the rule with a custom stop-word set
    pub fn new(stop_words: StopWords) -> Self {
        Self { stop_words }
    }
}

impl Default for CollocationRule {
    fn default() -> Self {
        Self::new(StopWords::collocation_default())
    }
}

impl RelationRule for CollocationRule {
    type Output = Collocations;

    fn name(&self) -> &'static str {
        "collocation"
    }

    fn apply(&self, table: &DependencyTable) -> Collocations {
        find_collocations(table, &self.stop_words)
    }
}

/// Rule wrapper for [`find_coordinated_pairs`]
#[derive(Debug, Clone)]
pub struct CoordinationRule {
    stop_words: StopWords,
}

impl CoordinationRule {
    /// Create the rule with a custom stop-word set
    pub fn new(stop_words: StopWords) -> Self {
        Self { stop_words }
    }
}

impl Default for CoordinationRule {
    fn default() -> Self {
        Self::new(StopWords::coordination_default())
    }
}

impl RelationRule for CoordinationRule {
    type Output = Vec<WordPair>;

    fn name(&self) -> &'static str {
        "coordination"
    }

    fn apply(&self, table: &DependencyTable) -> Vec<WordPair> {
        find_coordinated_pairs(table, &self.stop_words)
    }
}

/// Rule wrapper for [`find_entity_collocations`]
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityCollocationRule;

impl RelationRule for EntityCollocationRule {
    type Output = Vec<String>;

    fn name(&self) -> &'static str {
        "entity_collocation"
    }

    fn apply(&self, table: &DependencyTable) -> Vec<String> {
        find_entity_collocations(table)
    }
}

// ============================================================================
// Tests
// ============================================================================
