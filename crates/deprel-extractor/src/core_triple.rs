//! Core-triple extraction
//!
//! Summarizes a sentence by its subject + predicate + object skeleton, falling
//! back to subject-predicate pairs, verb-object pairs, and finally the bare
//! root word.

use serde::{Deserialize, Serialize};

use deprel_core::Relation;

use crate::table::{DependencyRow, DependencyTable};
use crate::RelationRule;

/// Sentence summary produced by [`extract_core`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CoreSummary {
    /// Subject, root and object words concatenated in sentence order
    Triple(String),
    /// Pair texts of the root's SBV dependents
    SubjectPredicate(Vec<String>),
    /// Pair texts of the root's VOB dependents
    VerbObject(Vec<String>),
    /// Words of every HED row
    Root(Vec<String>),
    /// No HED row in the sentence
    #[default]
    Empty,
}

impl CoreSummary {
    /// Check if nothing was extracted
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Triple(text) => text.is_empty(),
            Self::SubjectPredicate(items) | Self::VerbObject(items) | Self::Root(items) => {
                items.is_empty()
            }
            Self::Empty => true,
        }
    }

    /// Summary as a list of strings regardless of shape
    pub fn texts(&self) -> Vec<&str> {
        match self {
            Self::Triple(text) => vec![text.as_str()],
            Self::SubjectPredicate(items) | Self::VerbObject(items) | Self::Root(items) => {
                items.iter().map(String::as_str).collect()
            }
            Self::Empty => Vec::new(),
        }
    }
}

fn pair_texts(rows: &[&DependencyRow], relation: &Relation) -> Vec<String> {
    rows.iter()
        .filter(|row| &row.relation == relation)
        .map(|row| row.pair_text.clone())
        .collect()
}

/// Extract the core summary of a sentence
///
/// The first `HED` row anchors the lookup of direct dependents. A full
/// SBV + VOB triple wins over SBV-only pairs, which win over VOB-only pairs,
/// which win over the bare root words.
pub fn extract_core(table: &DependencyTable) -> CoreSummary {
    let roots: Vec<&DependencyRow> = table.roots().collect();
    if roots.len() > 1 {
        tracing::warn!(
            "Sentence has {} HED rows, anchoring on token {}",
            roots.len(),
            roots[0].index
        );
    }

    if let Some(root) = roots.first() {
        let children: Vec<&DependencyRow> = table.children_of(root.index).collect();
        let has = |relation: &Relation| children.iter().any(|row| &row.relation == relation);

        if has(&Relation::Sbv) && has(&Relation::Vob) {
            let mut indices: Vec<usize> = children
                .iter()
                .filter(|row| matches!(row.relation, Relation::Sbv | Relation::Vob))
                .map(|row| row.index)
                .collect();
            indices.push(root.index);
            indices.sort_unstable();

            let text: String = indices
                .iter()
                .filter_map(|&i| table.get(i))
                .map(|row| row.word.as_str())
                .collect();
            tracing::debug!("Core triple: {}", text);
            return CoreSummary::Triple(text);
        }

        if has(&Relation::Sbv) {
            tracing::debug!("Core falls back to subject-predicate pairs");
            return CoreSummary::SubjectPredicate(pair_texts(&children, &Relation::Sbv));
        }

        if has(&Relation::Vob) {
            tracing::debug!("Core falls back to verb-object pairs");
            return CoreSummary::VerbObject(pair_texts(&children, &Relation::Vob));
        }

        tracing::debug!("Core falls back to root words");
        return CoreSummary::Root(roots.iter().map(|row| row.word.clone()).collect());
    }

    CoreSummary::Empty
}

/// Rule wrapper for [`extract_core`]
#[derive(Debug, Clone, Copy, Default)]
pub struct CoreTripleRule;

impl RelationRule for CoreTripleRule {
    type Output = CoreSummary;

    fn name(&self) -> &'static str {
        "core_triple"
    }

    fn apply(&self, table: &DependencyTable) -> CoreSummary {
        extract_core(table)
    }
}
