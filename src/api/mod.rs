//! JobDash Data Service
//!
//! Read-only REST API over the four resource collections. Every route
//! returns the full, unfiltered contents of one collection in store order.
//!
//! ## API Endpoints
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/` | GET | Service banner and endpoint list |
//! | `/health` | GET | Liveness probe |
//! | `/api/users` | GET | All user documents |
//! | `/api/customers` | GET | All customer documents |
//! | `/api/jobs` | GET | All job documents |
//! | `/api/pipelines` | GET | All pipeline documents |
//!
//! A storage fault on a list route answers `500` with
//! `{"error": "Failed to fetch <collection> from database."}`.

mod handlers;
mod models;
mod server;

pub use handlers::*;
pub use models::*;
pub use server::*;
