// Firebase realtime database implementation of RecordStore.
//
// Talks to the REST API: every node is addressable as `<db>/<path>.json`.
//   get    -> GET   <base>.json
//   push   -> POST  <base>.json           (response: {"name": "<new key>"})
//   update -> PATCH <base>/<key>.json
//   clear  -> PUT   <base>/<key>.json {}

use crate::core::leaderboard::{
    EntryPatch, LeaderboardEntry, RecordStore, StoreError, StoredRecord,
};
use crate::infra::firebase::ServiceAccountAuth;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

/// Body returned by a POST (push).
#[derive(Debug, Deserialize)]
struct PushResponse {
    name: String,
}

pub struct FirebaseRecordStore {
    client: Client,
    auth: ServiceAccountAuth,
    /// `<database url>/<leaderboard path>` without the `.json` suffix.
    base_url: String,
}

impl FirebaseRecordStore {
    pub fn new(
        database_url: &str,
        leaderboard_path: &str,
        auth: ServiceAccountAuth,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| StoreError::Http(e.to_string()))?;

        Ok(Self {
            client,
            auth,
            base_url: format!(
                "{}/{}",
                database_url.trim_end_matches('/'),
                leaderboard_path.trim_matches('/')
            ),
        })
    }

    fn node_url(&self, key: Option<&str>) -> String {
        match key {
            Some(key) => format!("{}/{}.json", self.base_url, key),
            None => format!("{}.json", self.base_url),
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let token = self.auth.get_access_token().await?;
        let response = request
            .query(&[("access_token", token.as_str())])
            .send()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status { status, body });
        }

        Ok(response)
    }
}

/// Turn the JSON at the leaderboard node into records ordered by key.
///
/// The node is `null` when empty. Children that don't decode as an entry
/// (soft-deleted ones, stray data) are kept with `entry: None`.
pub fn decode_records(body: Value) -> Result<Vec<StoredRecord>, StoreError> {
    let children: BTreeMap<String, Value> = match body {
        Value::Null => return Ok(Vec::new()),
        other => serde_json::from_value(other)?,
    };

    Ok(children
        .into_iter()
        .map(|(key, value)| {
            let entry = serde_json::from_value::<LeaderboardEntry>(value).ok();
            StoredRecord { key, entry }
        })
        .collect())
}

#[async_trait]
impl RecordStore for FirebaseRecordStore {
    async fn get(&self) -> Result<Vec<StoredRecord>, StoreError> {
        let response = self.send(self.client.get(self.node_url(None))).await?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;
        decode_records(body)
    }

    async fn push(&self, entry: &LeaderboardEntry) -> Result<String, StoreError> {
        let response = self
            .send(self.client.post(self.node_url(None)).json(entry))
            .await?;
        let pushed: PushResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;
        Ok(pushed.name)
    }

    async fn update(&self, key: &str, patch: &EntryPatch) -> Result<(), StoreError> {
        self.send(self.client.patch(self.node_url(Some(key))).json(patch))
            .await?;
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<(), StoreError> {
        self.send(
            self.client
                .put(self.node_url(Some(key)))
                .json(&serde_json::json!({})),
        )
        .await?;
        Ok(())
    }
}
