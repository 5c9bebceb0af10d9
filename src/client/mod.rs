//! Dashboard fetch client
//!
//! The dashboard's only outbound interface: one GET per resource endpoint,
//! expecting a JSON array of documents.

mod http;

pub use http::*;

use async_trait::async_trait;

use crate::error::Result;
use crate::resource::{Document, ResourceKind};

/// Source of resource listings for the dashboard
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Fetch every document of `kind`, in the order the service sent them
    async fn fetch(&self, kind: ResourceKind) -> Result<Vec<Document>>;

    /// Service address quoted in failure messages
    fn base_address(&self) -> String;
}
