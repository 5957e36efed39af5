//! # bidgate-store
//!
//! HTTP client for the record store (the no-code backend holding clients,
//! tenders, questions, evidence, and projects) plus the field mapper that
//! turns its loosely-typed records into `bidgate_core` entities.
//!
//! The generic object API is:
//! - `GET  {base}/obj/{type}?constraints=…&sort_field=…&descending=…&cursor=…&limit=…`
//! - `GET  {base}/obj/{type}/{id}`
//! - `POST {base}/obj/{type}` (create, returns the new id)
//! - `PATCH {base}/obj/{type}/{id}` (partial update)
//!
//! Every request carries the configured bearer token. Non-success responses
//! are logged with their body and returned as [`StoreError::Api`]; whether a
//! caller degrades or fails is decided at the HTTP boundary.

pub mod clients;
pub mod evidence;
pub mod mapper;
pub mod projects;
pub mod query;
pub mod tenders;

mod error;
mod http;

pub use error::StoreError;
pub use mapper::ClientFields;
pub use query::{Constraint, ConstraintType, Direction, Query};

use std::time::Duration;

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::http::check_response;

/// Largest page the record store returns per request.
pub const PAGE_SIZE: usize = 100;

#[derive(Deserialize)]
struct ListEnvelope {
    response: ListPage,
}

#[derive(Deserialize)]
struct ListPage {
    #[serde(default)]
    results: Vec<serde_json::Value>,
    #[serde(default)]
    remaining: u64,
}

#[derive(Deserialize)]
struct GetEnvelope {
    response: serde_json::Value,
}

#[derive(Deserialize)]
struct CreateResponse {
    #[serde(default)]
    id: Option<String>,
}

// ── Client ─────────────────────────────────────────────────────────

/// Authenticated client for the record store's object API.
#[derive(Clone)]
pub struct RecordStore {
    http: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl RecordStore {
    /// Create a client for `base_url` (e.g. `https://app.example.com/api/1.1`).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the underlying `reqwest::Client` fails to build.
    pub fn new(base_url: &str, api_token: &str, timeout: Duration) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("bidgate/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
        })
    }

    fn object_url(&self, type_name: &str) -> String {
        format!("{}/obj/{}", self.base_url, urlencoding::encode(type_name))
    }

    fn record_url(&self, type_name: &str, id: &str) -> String {
        format!("{}/{}", self.object_url(type_name), urlencoding::encode(id))
    }

    /// List records of `type_name` matching `query`, following pages until
    /// the query limit is reached or the store reports nothing remaining.
    ///
    /// Records that fail to decode as `T` are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a request fails, the store returns a
    /// non-success status, or a page cannot be parsed.
    pub async fn list<T: DeserializeOwned>(
        &self,
        type_name: &str,
        query: &Query,
    ) -> Result<Vec<T>, StoreError> {
        let max = query.max_results().map_or(usize::MAX, |n| n as usize);
        let params = query.to_query_string()?;
        let prefix = if params.is_empty() {
            String::new()
        } else {
            format!("{params}&")
        };

        let mut records = Vec::new();
        let mut cursor = 0usize;
        while records.len() < max {
            let page_size = (max - records.len()).min(PAGE_SIZE);
            let url = format!(
                "{}?{prefix}cursor={cursor}&limit={page_size}",
                self.object_url(type_name)
            );
            let resp = check_response(
                self.http
                    .get(&url)
                    .bearer_auth(&self.api_token)
                    .send()
                    .await?,
            )
            .await?;
            let page = resp.json::<ListEnvelope>().await?.response;

            let fetched = page.results.len();
            for value in page.results {
                match serde_json::from_value::<T>(value) {
                    Ok(record) => records.push(record),
                    Err(e) => tracing::warn!(type_name, %e, "skipping undecodable record"),
                }
            }

            if fetched == 0 || page.remaining == 0 {
                break;
            }
            cursor += fetched;
        }
        records.truncate(max);
        Ok(records)
    }

    /// Fetch one record by id. A 404 is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] for transport failures, other non-success
    /// statuses, or an undecodable body.
    pub async fn get<T: DeserializeOwned>(
        &self,
        type_name: &str,
        id: &str,
    ) -> Result<Option<T>, StoreError> {
        let resp = self
            .http
            .get(self.record_url(type_name, id))
            .bearer_auth(&self.api_token)
            .send()
            .await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let envelope = check_response(resp).await?.json::<GetEnvelope>().await?;
        serde_json::from_value(envelope.response)
            .map(Some)
            .map_err(|e| StoreError::Parse(format!("{type_name} {id}: {e}")))
    }

    /// Create a record and return its store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the request fails or the response has no id.
    pub async fn create<B: Serialize + Sync>(
        &self,
        type_name: &str,
        body: &B,
    ) -> Result<String, StoreError> {
        let resp = check_response(
            self.http
                .post(self.object_url(type_name))
                .bearer_auth(&self.api_token)
                .json(body)
                .send()
                .await?,
        )
        .await?;
        resp.json::<CreateResponse>()
            .await?
            .id
            .ok_or_else(|| StoreError::Parse(format!("create {type_name}: response missing 'id'")))
    }

    /// Apply a partial update to a record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the request fails or the store rejects it.
    pub async fn update<B: Serialize + Sync>(
        &self,
        type_name: &str,
        id: &str,
        body: &B,
    ) -> Result<(), StoreError> {
        check_response(
            self.http
                .patch(self.record_url(type_name, id))
                .bearer_auth(&self.api_token)
                .json(body)
                .send()
                .await?,
        )
        .await?;
        Ok(())
    }
}
