//! MongoDB-backed document store
//!
//! Collections are read without a schema: every document is converted to
//! JSON the way a Node/Mongoose backend would serialize it, so ObjectIds
//! become hex strings and dates become ISO-8601 strings.

use async_trait::async_trait;
use bson::{doc, Bson, Document as BsonDocument};
use chrono::SecondsFormat;
use futures::TryStreamExt;
use mongodb::{options::ClientOptions, Client, Database};
use serde_json::{Number, Value};
use tracing::{debug, info};

use super::DocumentStore;
use crate::error::{DashError, Result};
use crate::resource::{Document, ResourceKind};

/// Database used when neither the URI nor the caller names one
pub const DEFAULT_DATABASE: &str = "test";

/// Document store over a MongoDB database
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Connect and verify the deployment answers a `ping`.
    ///
    /// `database` overrides the database named in the URI.
    pub async fn connect(uri: &str, database: Option<&str>) -> Result<Self> {
        let options = ClientOptions::parse(uri)
            .await
            .map_err(|e| DashError::connection(redact_uri(uri), e.to_string()))?;

        let client = Client::with_options(options)
            .map_err(|e| DashError::connection(redact_uri(uri), e.to_string()))?;

        let database = match database {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
        };

        let store = Self { database };
        store.ping().await.map_err(|e| match e {
            DashError::ConnectionError { message, .. } => {
                DashError::connection(redact_uri(uri), message)
            }
            other => other,
        })?;

        info!("Connected to MongoDB database '{}'", store.database.name());
        Ok(store)
    }

    /// Name of the database being served
    pub fn database_name(&self) -> &str {
        self.database.name()
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn list(&self, kind: ResourceKind) -> Result<Vec<Document>> {
        let cursor = self
            .database
            .collection::<BsonDocument>(kind.collection())
            .find(doc! {})
            .await
            .map_err(|e| DashError::storage(kind, e.to_string()))?;

        let raw: Vec<BsonDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| DashError::storage(kind, e.to_string()))?;

        debug!("Read {} documents from {}", raw.len(), kind.collection());
        Ok(raw.into_iter().map(document_to_json).collect())
    }

    async fn ping(&self) -> Result<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|e| DashError::connection(self.database.name(), e.to_string()))
    }

    fn backend(&self) -> &'static str {
        "mongodb"
    }
}

/// Convert a BSON document to a JSON object, keeping field order
pub fn document_to_json(doc: BsonDocument) -> Document {
    doc.into_iter()
        .map(|(key, value)| (key, bson_to_json(value)))
        .collect()
}

/// Convert a single BSON value to JSON
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => Value::String(
            dt.to_chrono()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
        Bson::Document(inner) => Value::Object(document_to_json(inner)),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::String(s) => Value::String(s),
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Int32(i) => Value::from(i),
        Bson::Int64(i) => Value::from(i),
        Bson::Double(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        Bson::Null | Bson::Undefined => Value::Null,
        other => other.into_relaxed_extjson(),
    }
}

/// Strip credentials from a connection string before it reaches a log line
fn redact_uri(uri: &str) -> String {
    match (uri.find("://"), uri.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &uri[..scheme_end], &uri[at..])
        }
        _ => uri.to_string(),
    }
}
