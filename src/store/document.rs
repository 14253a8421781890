//! In-memory document store.
//!
//! Documents are kept verbatim in doc id order, so lookup is a plain index
//! into a vector.

use serde::{Deserialize, Serialize};

use crate::data::{DocId, Document};
use crate::error::{LexisError, Result};

/// `DocId -> Document` mapping for one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentStore {
    documents: Vec<Document>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document, returning the id it is stored under.
    pub fn push(&mut self, document: Document) -> Result<DocId> {
        let id = u32::try_from(self.documents.len())
            .map_err(|_| LexisError::invalid_argument("document store is full"))?;
        self.documents.push(document);
        Ok(DocId::new(id))
    }

    /// Id the next pushed document will get.
    pub fn next_doc_id(&self) -> Result<DocId> {
        u32::try_from(self.documents.len())
            .map(DocId::new)
            .map_err(|_| LexisError::invalid_argument("document store is full"))
    }

    pub fn get(&self, doc_id: DocId) -> Option<&Document> {
        self.documents.get(doc_id.as_usize())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DocId, &Document)> {
        self.documents
            .iter()
            .enumerate()
            .map(|(i, doc)| (DocId::new(i as u32), doc))
    }
}
