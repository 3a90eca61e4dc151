//! Dependency table
//!
//! Flattens a sentence's parallel token / tag / arc sequences into one row per
//! token, each row carrying its governor's word and the reading-order
//! concatenation of the two.

use std::fmt;

use serde::Serialize;

use deprel_core::{Annotation, DependencyArc, Relation};

/// Governor word recorded for the sentence root
pub const ROOT_SENTINEL: &str = "root ";

/// One token of the sentence with its governor resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyRow {
    /// 0-based token position
    pub index: usize,

    /// Surface form
    pub word: String,

    /// Part-of-speech tag
    pub pos: String,

    /// Relation to the governor
    pub relation: Relation,

    /// 0-based governor position, `None` for the root
    pub governor: Option<usize>,

    /// Governor surface form, [`ROOT_SENTINEL`] for the root
    pub governor_word: String,

    /// `word` and `governor_word` concatenated in sentence order
    pub pair_text: String,
}

impl DependencyRow {
    /// Whether this token is attached to the virtual root
    pub fn is_root(&self) -> bool {
        self.governor.is_none()
    }

    /// Governor position with the root clamped to 0
    ///
    /// Only meaningful together with [`DependencyRow::is_root`]; use
    /// [`DependencyRow::governor`] to tell the root apart from token 0.
    pub fn governor_index(&self) -> usize {
        self.governor.unwrap_or(0)
    }
}

impl fmt::Display for DependencyRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let governor = match self.governor {
            Some(g) => g.to_string(),
            None => "-".to_string(),
        };
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.index,
            self.word,
            self.pos,
            self.relation,
            governor,
            self.governor_word.trim_end(),
            self.pair_text
        )
    }
}

/// Read-only table of dependency rows for a single sentence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependencyTable {
    rows: Vec<DependencyRow>,
}

impl DependencyTable {
    /// Build the table from aligned token, tag and arc sequences
    ///
    /// # Panics
    ///
    /// Panics if the sequences differ in length or an arc points past the end
    /// of the sentence. Run [`Annotation::validate`] first when the input is
    /// untrusted.
    pub fn build(words: &[String], postags: &[String], arcs: &[DependencyArc]) -> Self {
        assert!(
            words.len() == postags.len() && words.len() == arcs.len(),
            "misaligned annotation: {} tokens, {} POS tags, {} arcs",
            words.len(),
            postags.len(),
            arcs.len()
        );

        let rows = arcs
            .iter()
            .enumerate()
            .map(|(index, arc)| {
                let word = words[index].clone();
                let governor = arc.governor();
                let governor_word = match governor {
                    Some(g) => {
                        assert!(
                            g < words.len(),
                            "token {} points at governor {} outside a {}-token sentence",
                            index,
                            arc.head,
                            words.len()
                        );
                        words[g].clone()
                    }
                    None => ROOT_SENTINEL.to_string(),
                };

                // The root sentinel sits before every real token
                let pair_text = match governor {
                    Some(g) if index < g => format!("{}{}", word, governor_word),
                    _ => format!("{}{}", governor_word, word),
                };

                DependencyRow {
                    index,
                    word,
                    pos: postags[index].clone(),
                    relation: arc.relation.clone(),
                    governor,
                    governor_word,
                    pair_text,
                }
            })
            .collect();

        Self { rows }
    }

    /// Build the table for an annotated sentence
    pub fn from_annotation(annotation: &Annotation) -> Self {
        Self::build(&annotation.words, &annotation.postags, &annotation.arcs)
    }

    /// All rows in token order
    pub fn rows(&self) -> &[DependencyRow] {
        &self.rows
    }

    /// Row for a token position
    pub fn get(&self, index: usize) -> Option<&DependencyRow> {
        self.rows.get(index)
    }

    /// Number of rows (tokens)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows attached to their governor by `relation`
    pub fn with_relation<'a, 'r>(
        &'a self,
        relation: &'r Relation,
    ) -> impl Iterator<Item = &'a DependencyRow> + 'r
    where
        'a: 'r,
    {
        self.rows.iter().filter(move |row| &row.relation == relation)
    }

    /// Rows tagged `pos`
    pub fn with_pos<'a, 'p>(
        &'a self,
        pos: &'p str,
    ) -> impl Iterator<Item = &'a DependencyRow> + 'p
    where
        'a: 'p,
    {
        self.rows.iter().filter(move |row| row.pos == pos)
    }

    /// Direct dependents of the token at `index`
    pub fn children_of(&self, index: usize) -> impl Iterator<Item = &DependencyRow> + '_ {
        self.rows
            .iter()
            .filter(move |row| row.governor == Some(index))
    }

    /// Rows labelled `HED`
    pub fn roots(&self) -> impl Iterator<Item = &DependencyRow> + '_ {
        self.rows.iter().filter(|row| row.relation == Relation::Hed)
    }

    /// Check if any row carries `relation`
    pub fn has_relation(&self, relation: &Relation) -> bool {
        self.rows.iter().any(|row| &row.relation == relation)
    }

    /// Surface forms of every token tagged `pos`
    pub fn words_with_pos(&self, pos: &str) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|row| row.pos == pos)
            .map(|row| row.word.as_str())
            .collect()
    }
}

impl From<&Annotation> for DependencyTable {
    fn from(annotation: &Annotation) -> Self {
        Self::from_annotation(annotation)
    }
}
