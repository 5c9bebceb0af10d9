//! API Data Models
//!
//! Response bodies that are not plain document arrays.

use serde::{Deserialize, Serialize};

use crate::resource::ResourceKind;

/// Error body returned with a 5xx status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Generic message naming the failing resource
    pub error: String,
}

/// Body of `GET /`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub endpoints: Vec<String>,
}

impl ServiceInfo {
    /// Banner listing every resource route
    pub fn current() -> Self {
        Self {
            message: "MongoDB Backend API is running!".to_string(),
            endpoints: ResourceKind::ALL
                .iter()
                .map(|kind| format!("GET {}", kind.route()))
                .collect(),
        }
    }
}
