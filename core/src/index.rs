use crate::bitmap::Bitmap;
use crate::content::ContentSource;
use crate::error::IngestError;
use crate::normalize::{Normalizer, Pipeline};
use crate::tokenizer::tokenize;
use std::collections::HashMap;
use std::fmt;

/// 1-based, dense, assigned in ingestion order.
pub type DocId = u32;

/// Term → posting list map plus the registry of ingested documents.
///
/// Grows only through [`ingest`](Self::ingest) / [`ingest_text`](Self::ingest_text);
/// every failed ingestion leaves it untouched. Not meant for concurrent access:
/// callers serialize writers themselves.
pub struct PostingStore {
    normalizer: Box<dyn Normalizer>,
    /// `documents[i]` is the name of document `i + 1`.
    documents: Vec<String>,
    ids: HashMap<String, DocId>,
    postings: HashMap<String, Vec<DocId>>,
}

impl PostingStore {
    pub fn new(normalizer: Box<dyn Normalizer>) -> Self {
        Self {
            normalizer,
            documents: Vec::new(),
            ids: HashMap::new(),
            postings: HashMap::new(),
        }
    }

    /// Read `name` from `source` and index it.
    pub fn ingest(&mut self, name: &str, source: &dyn ContentSource) -> Result<DocId, IngestError> {
        self.check_new(name)?;
        let content = source.read(name).map_err(|reason| IngestError::ContentUnavailable {
            name: name.to_owned(),
            reason,
        })?;
        Ok(self.add(name, &content))
    }

    /// Index text the caller already holds, with the same checks as [`ingest`](Self::ingest).
    pub fn ingest_text(&mut self, name: &str, content: &str) -> Result<DocId, IngestError> {
        self.check_new(name)?;
        Ok(self.add(name, content))
    }

    fn check_new(&self, name: &str) -> Result<(), IngestError> {
        if name.contains('\0') {
            return Err(IngestError::InvalidDocumentReference(name.to_owned()));
        }
        if self.ids.contains_key(name) {
            return Err(IngestError::DuplicateDocument(name.to_owned()));
        }
        Ok(())
    }

    fn add(&mut self, name: &str, content: &str) -> DocId {
        self.documents.push(name.to_owned());
        let doc_id = self.documents.len() as DocId;
        self.ids.insert(name.to_owned(), doc_id);

        // tokenize() yields a set, so each term is posted once per document.
        let terms = tokenize(content, self.normalizer.as_ref());
        let num_terms = terms.len();
        for term in terms {
            self.postings.entry(term).or_default().push(doc_id);
        }
        tracing::debug!(doc_id, name, num_terms, "ingested document");
        doc_id
    }

    /// Bitmap over the current corpus of the documents containing `term`.
    /// Unknown terms give an all-zero bitmap.
    pub fn resolve(&self, term: &str) -> Bitmap {
        let mut bitmap = Bitmap::zeros(self.documents.len());
        let key = self.normalize_query_term(term);
        if let Some(list) = self.postings.get(&key) {
            for &doc_id in list {
                bitmap.set(doc_id as usize - 1, true);
            }
        }
        bitmap
    }

    /// Lower-case, then stem when stemming is on. Stopwords are not filtered here.
    pub fn normalize_query_term(&self, term: &str) -> String {
        let lowered = term.to_lowercase();
        if self.normalizer.should_stem() {
            self.normalizer.stem(&lowered)
        } else {
            lowered
        }
    }

    /// Posting list of an already-normalized term.
    pub fn postings(&self, term: &str) -> &[DocId] {
        self.postings.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every term with its posting list, sorted by term.
    pub fn term_postings(&self) -> Vec<(&str, &[DocId])> {
        let mut all: Vec<(&str, &[DocId])> = self
            .postings
            .iter()
            .map(|(term, list)| (term.as_str(), list.as_slice()))
            .collect();
        all.sort_unstable_by_key(|&(term, _)| term);
        all
    }

    pub fn terms(&self) -> usize {
        self.postings.len()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn document_name(&self, doc_id: DocId) -> Option<&str> {
        let idx = (doc_id as usize).checked_sub(1)?;
        self.documents.get(idx).map(String::as_str)
    }

    pub fn document_id(&self, name: &str) -> Option<DocId> {
        self.ids.get(name).copied()
    }

    /// `(id, name)` pairs in ingestion order.
    pub fn documents(&self) -> impl Iterator<Item = (DocId, &str)> + '_ {
        self.documents
            .iter()
            .enumerate()
            .map(|(idx, name)| (idx as DocId + 1, name.as_str()))
    }
}

impl Default for PostingStore {
    fn default() -> Self {
        Self::new(Box::new(Pipeline::plain()))
    }
}

impl fmt::Debug for PostingStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostingStore")
            .field("documents", &self.documents)
            .field("terms", &self.postings.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MemorySource;
    use crate::error::Unavailable;

    #[test]
    fn ids_are_dense_and_ordered() {
        let mut store = PostingStore::default();
        for (i, name) in ["a", "b", "c"].iter().enumerate() {
            let id = store.ingest_text(name, "text").unwrap();
            assert_eq!(id, i as DocId + 1);
        }
        let docs: Vec<_> = store.documents().collect();
        assert_eq!(docs, vec![(1, "a"), (2, "b"), (3, "c")]);
        assert_eq!(store.document_id("b"), Some(2));
        assert_eq!(store.document_name(0), None);
        assert_eq!(store.document_name(4), None);
    }

    #[test]
    fn repeated_words_post_once() {
        let mut store = PostingStore::default();
        store.ingest_text("doc1", "data data DATA").unwrap();
        assert_eq!(store.postings("data"), &[1]);
        assert_eq!(store.terms(), 1);
        assert_eq!(store.term_postings(), vec![("data", &[1][..])]);
    }

    #[test]
    fn failed_read_allocates_nothing() {
        let mut store = PostingStore::default();
        let source = MemorySource::new();
        let err = store.ingest("ghost", &source).unwrap_err();
        assert!(matches!(
            err,
            IngestError::ContentUnavailable { reason: Unavailable::NotFound, .. }
        ));
        assert!(store.is_empty());
        assert_eq!(store.terms(), 0);
        assert_eq!(store.ingest_text("real", "x").unwrap(), 1);
    }

    #[test]
    fn nul_in_name_is_rejected() {
        let mut store = PostingStore::default();
        let err = store.ingest_text("bad\0name", "x").unwrap_err();
        assert!(matches!(err, IngestError::InvalidDocumentReference(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn resolve_is_case_insensitive() {
        let mut store = PostingStore::default();
        store.ingest_text("doc1", "Kernel panic").unwrap();
        assert_eq!(store.resolve("KERNEL"), Bitmap::from_bits(&[true]));
    }
}
