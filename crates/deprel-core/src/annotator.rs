//! Annotator contract
//!
//! The segmentation, tagging, parsing, NER and SRL engines are external. This
//! module fixes the boundary they are consumed through, and the lifecycle
//! handle that keeps one loaded annotator alive for the whole process.

use std::ops::Deref;

use crate::{Annotation, DependencyArc, Result, SemanticRole};

/// Trait for sentence annotation backends
pub trait Annotator: Send + Sync {
    /// Split a sentence into tokens
    fn segment(&self, sentence: &str) -> Result<Vec<String>>;

    /// Assign one part-of-speech tag per token
    fn tag(&self, words: &[String]) -> Result<Vec<String>>;

    /// Produce one dependency arc per token
    fn parse(&self, words: &[String], postags: &[String]) -> Result<Vec<DependencyArc>>;

    /// Assign one entity tag per token
    fn recognize_entities(&self, words: &[String], postags: &[String]) -> Result<Vec<String>>;

    /// Label semantic roles for each predicate
    fn label_roles(
        &self,
        words: &[String],
        postags: &[String],
        arcs: &[DependencyArc],
    ) -> Result<Vec<SemanticRole>>;

    /// Release loaded resources. Called exactly once by `AnnotatorSession`.
    fn release(&mut self) -> Result<()> {
        Ok(())
    }

    /// Run the full pipeline once for a sentence
    fn analyze(&self, sentence: &str) -> Result<Annotation> {
        let words = self.segment(sentence)?;
        let postags = self.tag(&words)?;
        let arcs = self.parse(&words, &postags)?;
        let netags = self.recognize_entities(&words, &postags)?;
        let roles = self.label_roles(&words, &postags, &arcs)?;

        let annotation = Annotation {
            words,
            postags,
            arcs,
            netags,
            roles,
        };
        annotation.validate()?;
        Ok(annotation)
    }
}

/// Process-wide handle owning a loaded annotator
///
/// Acquire once at startup with [`AnnotatorSession::open`] and share `&A`
/// with workers. Resources are released by [`AnnotatorSession::close`], or on
/// drop if the session was never closed explicitly.
pub struct AnnotatorSession<A: Annotator> {
    annotator: Option<A>,
}

impl<A: Annotator> AnnotatorSession<A> {
    /// Take ownership of a loaded annotator
    pub fn open(annotator: A) -> Self {
        tracing::info!("Annotator session opened");
        Self {
            annotator: Some(annotator),
        }
    }

    /// Borrow the annotator
    pub fn annotator(&self) -> &A {
        // Only `close` and `drop` take the annotator out, and both consume the session
        self.annotator
            .as_ref()
            .unwrap_or_else(|| unreachable!("annotator session already released"))
    }

    /// Release the annotator, reporting any failure
    pub fn close(mut self) -> Result<()> {
        match self.annotator.take() {
            Some(annotator) => Self::release(annotator),
            None => Ok(()),
        }
    }

    fn release(mut annotator: A) -> Result<()> {
        annotator.release()?;
        tracing::info!("Annotator session closed");
        Ok(())
    }
}

impl<A: Annotator> Deref for AnnotatorSession<A> {
    type Target = A;

    fn deref(&self) -> &A {
        self.annotator()
    }
}

impl<A: Annotator> Drop for AnnotatorSession<A> {
    fn drop(&mut self) {
        if let Some(annotator) = self.annotator.take() {
            if let Err(e) = Self::release(annotator) {
                tracing::warn!("Failed to release annotator: {}", e);
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DeprelError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Whitespace tokenizer that attaches every token to the first one
    struct FlatAnnotator {
        releases: Arc<AtomicUsize>,
        fail_release: bool,
    }

    impl FlatAnnotator {
        fn new(releases: Arc<AtomicUsize>) -> Self {
            Self {
                releases,
                fail_release: false,
            }
        }
    }

    impl Annotator for FlatAnnotator {
        fn segment(&self, sentence: &str) -> Result<Vec<String>> {
            Ok(sentence.split_whitespace().map(String::from).collect())
        }

        fn tag(&self, words: &[String]) -> Result<Vec<String>> {
            Ok(vec!["n".to_string(); words.len()])
        }

        fn parse(&self, words: &[String], _postags: &[String]) -> Result<Vec<DependencyArc>> {
            Ok((0..words.len())
                .map(|i| {
                    if i == 0 {
                        DependencyArc::new(0, "HED")
                    } else {
                        DependencyArc::new(1, "COO")
                    }
                })
                .collect())
        }

        fn recognize_entities(&self, words: &[String], _postags: &[String]) -> Result<Vec<String>> {
            Ok(vec!["O".to_string(); words.len()])
        }

        fn label_roles(
            &self,
            _words: &[String],
            _postags: &[String],
            _arcs: &[DependencyArc],
        ) -> Result<Vec<SemanticRole>> {
            Ok(Vec::new())
        }

        fn release(&mut self) -> Result<()> {
            self.releases.fetch_add(1, Ordering::SeqCst);
            if self.fail_release {
                return Err(DeprelError::Annotator("release failed".to_string()));
            }
            Ok(())
        }
    }

    #[test]
    fn test_analyze_runs_full_pipeline() {
        let annotator = FlatAnnotator::new(Arc::new(AtomicUsize::new(0)));
        let annotation = annotator.analyze("apples pears plums").unwrap();

        assert_eq!(annotation.len(), 3);
        assert_eq!(annotation.arcs[0], DependencyArc::new(0, "HED"));
        assert_eq!(annotation.netags.len(), 3);
    }

    #[test]
    fn test_session_releases_once_on_drop() {
        let releases = Arc::new(AtomicUsize::new(0));
        {
            let session = AnnotatorSession::open(FlatAnnotator::new(releases.clone()));
            assert_eq!(session.analyze("a b").unwrap().len(), 2);
        }
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_session_close_releases_once() {
        let releases = Arc::new(AtomicUsize::new(0));
        let session = AnnotatorSession::open(FlatAnnotator::new(releases.clone()));
        session.close().unwrap();
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_session_close_reports_release_error() {
        let releases = Arc::new(AtomicUsize::new(0));
        let annotator = FlatAnnotator {
            releases: releases.clone(),
            fail_release: true,
        };
        let session = AnnotatorSession::open(annotator);
        assert!(session.close().is_err());
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }
}
