//! # JobDash - Job Tracker Data Service and Dashboard
//!
//! JobDash is a minimal data dashboard. A read-only REST service exposes
//! four MongoDB collections (users, customers, jobs, pipelines), and a
//! terminal dashboard renders them behind a mock login gate.
//!
//! ## Features
//!
//! - **Read-only Data Service**: axum routes returning whole collections, schema-less
//! - **Concurrent Fetches**: four independent loads per login, isolated failures
//! - **Stale Result Guard**: session generations keep late responses out of a reset dashboard
//! - **Terminal Dashboard**: interactive or one-shot snapshot rendering
//!
//! ## Serving
//!
//! ```no_run
//! use jobdash::api::{ApiServer, ApiServerConfig};
//! use jobdash::storage::MongoStore;
//! use std::sync::Arc;
//!
//! # async fn serve() -> jobdash::Result<()> {
//! let store = MongoStore::connect("mongodb://localhost:27017/tracker", None).await?;
//! let server = ApiServer::new(ApiServerConfig::default(), Arc::new(store));
//! server.run().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Driving the Dashboard
//!
//! ```no_run
//! use jobdash::client::HttpFetcher;
//! use jobdash::dashboard::{render, DashboardController, StalePolicy};
//! use std::sync::Arc;
//!
//! # async fn show() -> jobdash::Result<()> {
//! let fetcher = HttpFetcher::new("http://localhost:5500/api", None)?;
//! let mut controller = DashboardController::new(Arc::new(fetcher), StalePolicy::Discard);
//!
//! controller.submit_login("alice");
//! controller.settle().await;
//! println!("{}", render(controller.state()));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod resource;
pub mod storage;

// Re-export commonly used types
pub use dashboard::{DashboardController, DashboardState, StalePolicy};
pub use error::{DashError, Result};
pub use resource::{Document, ResourceKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    //! Convenient re-exports for common usage
    //!
    //! ```no_run
    //! use jobdash::prelude::*;
    //! ```

    pub use crate::api::{ApiServer, ApiServerConfig};
    pub use crate::client::{HttpFetcher, ResourceFetcher};
    pub use crate::dashboard::{render, DashboardController, DashboardState, Phase, StalePolicy};
    pub use crate::error::{DashError, Result};
    pub use crate::resource::{Document, ResourceKind};
    pub use crate::storage::{DocumentStore, MemoryStore, MongoStore};
}
