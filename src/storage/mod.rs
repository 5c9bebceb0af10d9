//! Document storage module
//!
//! Provides the read-only view of the four resource collections.
//! The service talks to MongoDB; tests and demos use the in-memory store.

mod memory;
mod mongo;

pub use memory::*;
pub use mongo::*;

use async_trait::async_trait;

use crate::error::Result;
use crate::resource::{Document, ResourceKind};

/// Read access to the resource collections
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every document in the collection for `kind`, in store order
    async fn list(&self, kind: ResourceKind) -> Result<Vec<Document>>;

    /// Verify the store is reachable
    async fn ping(&self) -> Result<()>;

    /// Short backend name for logs
    fn backend(&self) -> &'static str;
}
