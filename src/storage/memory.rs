//! In-memory document store
//!
//! Holds fixed document lists per collection. Individual collections can be
//! marked as failing to exercise the service's error path.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};

use super::DocumentStore;
use crate::error::{DashError, Result};
use crate::resource::{Document, ResourceKind};

/// Document store kept entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: HashMap<ResourceKind, Vec<Document>>,
    failing: HashSet<ResourceKind>,
}

impl MemoryStore {
    /// Create an empty store; every collection lists as `[]`
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the documents of one collection
    pub fn with_documents(mut self, kind: ResourceKind, documents: Vec<Document>) -> Self {
        self.collections.insert(kind, documents);
        self
    }

    /// Make every query against `kind` fail
    pub fn failing(mut self, kind: ResourceKind) -> Self {
        self.failing.insert(kind);
        self
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list(&self, kind: ResourceKind) -> Result<Vec<Document>> {
        if self.failing.contains(&kind) {
            return Err(DashError::storage(kind, "collection unavailable"));
        }
        Ok(self.collections.get(&kind).cloned().unwrap_or_default())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
