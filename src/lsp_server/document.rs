//! Document Manager for the Hurler LSP Server
//!
//! This module keeps the text of every open document using DashMap for
//! concurrent access, and remembers which document the user touched last.
//! The run action has no arguments, so it targets that active document.

use dashmap::DashMap;
use lsp_types::Url;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Error types for document operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// Document not found in the manager
    NotFound,
    /// Invalid URI format or normalization failed
    InvalidUri(String),
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentError::NotFound => write!(f, "Document not found"),
            DocumentError::InvalidUri(msg) => write!(f, "Invalid URI: {}", msg),
        }
    }
}

impl std::error::Error for DocumentError {}

/// Snapshot of an open document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Full document text
    pub text: String,
    /// Absolute file path; `None` for non-file URIs
    pub path: Option<PathBuf>,
}

impl Document {
    fn from_uri(uri: &Url, text: String) -> Self {
        Self {
            text,
            path: uri.to_file_path().ok(),
        }
    }
}

/// Thread-safe document manager for tracking open files
#[derive(Debug, Clone)]
pub struct DocumentManager {
    /// Open documents by normalized URI
    documents: Arc<DashMap<String, Document>>,

    /// Normalized URI of the most recently used document
    active: Arc<RwLock<Option<String>>>,
}

impl DocumentManager {
    /// Creates a new DocumentManager instance
    ///
    /// # Examples
    ///
    /// ```
    /// use hurler::lsp_server::document::DocumentManager;
    ///
    /// let manager = DocumentManager::new();
    /// assert!(manager.active_document().is_none());
    /// ```
    pub fn new() -> Self {
        Self {
            documents: Arc::new(DashMap::new()),
            active: Arc::new(RwLock::new(None)),
        }
    }

    /// Normalizes a URI to a consistent string format
    ///
    /// file:// URIs are rebuilt from their path with forward slashes so the
    /// same file maps to one key on every platform.
    fn normalize_uri(uri: &Url) -> Result<String, DocumentError> {
        let uri_str = uri.as_str();

        if uri_str.is_empty() {
            return Err(DocumentError::InvalidUri("Empty URI".to_string()));
        }

        if uri.scheme() == "file" {
            match uri.to_file_path() {
                Ok(path) => {
                    let normalized_path = path.to_string_lossy().replace('\\', "/");
                    Ok(format!("file://{}", normalized_path))
                }
                Err(_) => Ok(uri_str.to_string()),
            }
        } else {
            Ok(uri_str.to_string())
        }
    }

    /// Inserts a document and makes it the active one
    ///
    /// If a document with the same URI already exists, it will be replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// use hurler::lsp_server::document::DocumentManager;
    /// use lsp_types::Url;
    ///
    /// let manager = DocumentManager::new();
    /// let uri = Url::parse("file:///api/users.hurl").unwrap();
    /// manager.insert(uri, "GET https://example.com".to_string()).unwrap();
    /// assert_eq!(manager.len(), 1);
    /// ```
    pub fn insert(&self, uri: Url, text: String) -> Result<(), DocumentError> {
        let normalized_uri = Self::normalize_uri(&uri)?;
        self.documents
            .insert(normalized_uri.clone(), Document::from_uri(&uri, text));
        self.mark_active(normalized_uri);
        Ok(())
    }

    /// Replaces an existing document's text and makes it the active one
    ///
    /// Returns `Err(DocumentError::NotFound)` if the document was never
    /// inserted.
    pub fn update(&self, uri: Url, text: String) -> Result<(), DocumentError> {
        let normalized_uri = Self::normalize_uri(&uri)?;

        match self.documents.get_mut(&normalized_uri) {
            Some(mut entry) => entry.text = text,
            None => return Err(DocumentError::NotFound),
        }

        self.mark_active(normalized_uri);
        Ok(())
    }

    /// Retrieves a document snapshot by URI
    pub fn get(&self, uri: &Url) -> Option<Document> {
        let normalized_uri = Self::normalize_uri(uri).ok()?;
        self.documents
            .get(&normalized_uri)
            .map(|entry| entry.value().clone())
    }

    /// Removes a document, clearing the active marker if it pointed there
    pub fn remove(&self, uri: &Url) -> Option<Document> {
        let normalized_uri = Self::normalize_uri(uri).ok()?;
        let removed = self
            .documents
            .remove(&normalized_uri)
            .map(|(_, document)| document);

        if let Ok(mut active) = self.active.write() {
            if active.as_deref() == Some(normalized_uri.as_str()) {
                *active = None;
            }
        }

        removed
    }

    /// Marks an open document as active
    ///
    /// Returns `Err(DocumentError::NotFound)` for documents that are not open.
    pub fn set_active(&self, uri: &Url) -> Result<(), DocumentError> {
        let normalized_uri = Self::normalize_uri(uri)?;
        if !self.documents.contains_key(&normalized_uri) {
            return Err(DocumentError::NotFound);
        }
        self.mark_active(normalized_uri);
        Ok(())
    }

    /// Returns the active document, if it is still open
    pub fn active_document(&self) -> Option<Document> {
        let key = self.active.read().ok()?.clone()?;
        self.documents.get(&key).map(|entry| entry.value().clone())
    }

    fn mark_active(&self, normalized_uri: String) {
        if let Ok(mut active) = self.active.write() {
            *active = Some(normalized_uri);
        }
    }

    /// Returns the number of documents currently managed
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if the manager has no documents
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Clears all documents and the active marker
    pub fn clear(&self) {
        self.documents.clear();
        if let Ok(mut active) = self.active.write() {
            *active = None;
        }
    }
}

impl Default for DocumentManager {
    fn default() -> Self {
        Self::new()
    }
}
