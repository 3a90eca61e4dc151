//! Sentence annotation model
//!
//! The per-token output of the upstream annotation engine: words, part-of-speech
//! tags, dependency arcs, entity tags and semantic roles. Every sequence is
//! index-aligned with `words`.

use serde::{Deserialize, Serialize};

use crate::{DeprelError, Result};

// ============================================================================
// Dependency Relation Labels
// ============================================================================

/// Dependency relation between a token and its governor (LTP label set)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Relation {
    /// Subject-verb
    Sbv,
    /// Verb-object
    Vob,
    /// Indirect object
    Iob,
    /// Fronting object
    Fob,
    /// Double (pivotal construction)
    Dbl,
    /// Attribute
    Att,
    /// Adverbial
    Adv,
    /// Complement
    Cmp,
    /// Coordination
    Coo,
    /// Preposition-object
    Pob,
    /// Left adjunct
    Lad,
    /// Right adjunct
    Rad,
    /// Independent structure
    Is,
    /// Punctuation
    Wp,
    /// Head (sentence root)
    Hed,
    /// Any label outside the known set
    Other(String),
}

impl Relation {
    /// Get the label as emitted by the annotator
    pub fn as_str(&self) -> &str {
        match self {
            Self::Sbv => "SBV",
            Self::Vob => "VOB",
            Self::Iob => "IOB",
            Self::Fob => "FOB",
            Self::Dbl => "DBL",
            Self::Att => "ATT",
            Self::Adv => "ADV",
            Self::Cmp => "CMP",
            Self::Coo => "COO",
            Self::Pob => "POB",
            Self::Lad => "LAD",
            Self::Rad => "RAD",
            Self::Is => "IS",
            Self::Wp => "WP",
            Self::Hed => "HED",
            Self::Other(label) => label,
        }
    }

    /// Map an annotator label to a relation; labels are case-sensitive
    pub fn from_label(label: &str) -> Self {
        match label {
            "SBV" => Self::Sbv,
            "VOB" => Self::Vob,
            "IOB" => Self::Iob,
            "FOB" => Self::Fob,
            "DBL" => Self::Dbl,
            "ATT" => Self::Att,
            "ADV" => Self::Adv,
            "CMP" => Self::Cmp,
            "COO" => Self::Coo,
            "POB" => Self::Pob,
            "LAD" => Self::Lad,
            "RAD" => Self::Rad,
            "IS" => Self::Is,
            "WP" => Self::Wp,
            "HED" => Self::Hed,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Relation {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<&str> for Relation {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

impl From<Relation> for String {
    fn from(relation: Relation) -> Self {
        relation.as_str().to_string()
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Arcs and Roles
// ============================================================================

/// A dependency arc as produced by the parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyArc {
    /// 1-based governor position; 0 marks the sentence root
    pub head: usize,

    /// Relation to the governor
    pub relation: Relation,
}

impl DependencyArc {
    /// Create a new arc
    pub fn new(head: usize, relation: impl Into<Relation>) -> Self {
        Self {
            head,
            relation: relation.into(),
        }
    }

    /// Whether this arc attaches its token to the virtual root
    pub fn is_root(&self) -> bool {
        self.head == 0
    }

    /// 0-based governor index, `None` for the root
    pub fn governor(&self) -> Option<usize> {
        self.head.checked_sub(1)
    }
}

/// One argument of a semantic role frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleArgument {
    /// Role name (A0, A1, TMP, LOC, ...)
    pub name: String,

    /// First token of the argument span (inclusive)
    pub start: usize,

    /// Last token of the argument span (inclusive)
    pub end: usize,
}

/// Semantic role frame for a single predicate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticRole {
    /// 0-based index of the predicate token
    pub predicate: usize,

    /// Arguments attached to the predicate
    pub arguments: Vec<RoleArgument>,
}

impl SemanticRole {
    /// Flatten into `(predicate, role, start, end)` records
    pub fn records(&self) -> Vec<(usize, &str, usize, usize)> {
        self.arguments
            .iter()
            .map(|arg| (self.predicate, arg.name.as_str(), arg.start, arg.end))
            .collect()
    }
}

// ============================================================================
// Annotation
// ============================================================================

/// Full annotation of a single sentence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Segmented tokens
    pub words: Vec<String>,

    /// Part-of-speech tag per token
    pub postags: Vec<String>,

    /// Dependency arc per token
    pub arcs: Vec<DependencyArc>,

    /// BIO-style entity tag per token
    #[serde(default)]
    pub netags: Vec<String>,

    /// Semantic role frames (pass-through)
    #[serde(default)]
    pub roles: Vec<SemanticRole>,
}

impl Annotation {
    /// Create an annotation from the three sequences the table builder needs;
    /// entity tags default to `O`
    pub fn new(words: Vec<String>, postags: Vec<String>, arcs: Vec<DependencyArc>) -> Self {
        let netags = vec!["O".to_string(); words.len()];
        Self {
            words,
            postags,
            arcs,
            netags,
            roles: Vec::new(),
        }
    }

    /// Set entity tags
    pub fn with_netags(mut self, netags: Vec<String>) -> Self {
        self.netags = netags;
        self
    }

    /// Set semantic roles
    pub fn with_roles(mut self, roles: Vec<SemanticRole>) -> Self {
        self.roles = roles;
        self
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the sentence has no tokens
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Surface text of the sentence (tokens concatenated)
    pub fn text(&self) -> String {
        self.words.concat()
    }

    /// Check that all sequences are aligned and every governor is in range
    pub fn validate(&self) -> Result<()> {
        let n = self.words.len();

        if self.postags.len() != n {
            return Err(DeprelError::InvalidAnnotation(format!(
                "{} tokens but {} POS tags",
                n,
                self.postags.len()
            )));
        }
        if self.arcs.len() != n {
            return Err(DeprelError::InvalidAnnotation(format!(
                "{} tokens but {} arcs",
                n,
                self.arcs.len()
            )));
        }
        if self.netags.len() != n {
            return Err(DeprelError::InvalidAnnotation(format!(
                "{} tokens but {} entity tags",
                n,
                self.netags.len()
            )));
        }

        if let Some((i, arc)) = self.arcs.iter().enumerate().find(|(_, a)| a.head > n) {
            return Err(DeprelError::InvalidAnnotation(format!(
                "arc {} points at governor {} outside a {}-token sentence",
                i, arc.head, n
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
