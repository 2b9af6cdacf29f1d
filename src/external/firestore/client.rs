//! Firestore REST client for group and user-token reads.
//!
//! Uses the global `HTTP_CLIENT` for connection pooling. All reads are
//! point-in-time snapshots; no transactions or consistency guarantees.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use super::types::{
    CollectionSelector, Document, FieldFilter, FieldReference, Filter, Projection,
    RunQueryRequest, RunQueryResponseItem, StructuredQuery, Value,
};
use crate::config::FirestoreConfig;
use crate::error::{AppError, AppResult};
use crate::external::client::HTTP_CLIENT;
use crate::models::Group;
use crate::services::notifier::{GroupStore, TokenStore};

/// Maximum number of ids per `IN` filter accepted by the query API.
/// Larger target sets are chunked and the results merged.
pub const IN_QUERY_LIMIT: usize = 10;

/// Firestore REST API client
pub struct FirestoreClient {
    config: FirestoreConfig,
}

impl FirestoreClient {
    /// Creates a new client from configuration
    pub fn new(config: FirestoreConfig) -> Self {
        Self { config }
    }

    /// Resource prefix of the default database,
    /// `projects/{p}/databases/(default)/documents`
    fn documents_prefix(&self) -> String {
        format!(
            "projects/{}/databases/(default)/documents",
            self.config.project_id
        )
    }

    /// URL of the documents root under the configured base URL
    fn documents_url(&self) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.documents_prefix()
        )
    }

    /// Full resource name of a user document
    fn user_doc_name(&self, user_id: &str) -> String {
        format!("{}/users/{}", self.documents_prefix(), user_id)
    }

    /// Attach the bearer token when one is configured
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.request_timeout)
    }

    /// Fetch the tokens for one chunk of at most [`IN_QUERY_LIMIT`] user ids
    async fn fetch_token_chunk(&self, user_ids: &[String]) -> AppResult<Vec<String>> {
        let references = user_ids
            .iter()
            .map(|id| Value::reference(self.user_doc_name(id)))
            .collect();

        let request = RunQueryRequest {
            structured_query: StructuredQuery {
                from: vec![CollectionSelector {
                    collection_id: "users".to_string(),
                }],
                select: Some(Projection {
                    fields: vec![FieldReference {
                        field_path: "fcmToken".to_string(),
                    }],
                }),
                filter: Some(Filter {
                    field_filter: FieldFilter {
                        field: FieldReference {
                            field_path: "__name__".to_string(),
                        },
                        op: "IN".to_string(),
                        value: Value::array(references),
                    },
                }),
            },
        };

        let url = format!("{}:runQuery", self.documents_url());
        let response = self
            .authorize(HTTP_CLIENT.post(&url))
            .timeout(self.timeout())
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::firestore("run_query request", e))?
            .error_for_status()
            .map_err(|e| AppError::firestore("run_query status", e))?;

        let items: Vec<RunQueryResponseItem> = response
            .json()
            .await
            .map_err(|e| AppError::firestore("run_query response body", e))?;

        // Query result order; not semantically significant. Elements without
        // a document are read-time markers.
        Ok(items
            .into_iter()
            .filter_map(|item| item.document)
            .filter_map(|doc| doc.string_field("fcmToken").map(str::to_string))
            .filter(|token| !token.is_empty())
            .collect())
    }

}

#[async_trait]
impl GroupStore for FirestoreClient {
    /// Fetches a group document by id.
    ///
    /// # Returns
    /// `Ok(None)` when the document does not exist (HTTP 404); any other
    /// failure is an upstream error.
    async fn get_group(&self, group_id: &str) -> AppResult<Option<Group>> {
        let url = format!("{}/groups/{}", self.documents_url(), group_id);
        let response = self
            .authorize(HTTP_CLIENT.get(&url))
            .timeout(self.timeout())
            .send()
            .await
            .map_err(|e| AppError::firestore(format!("get_group({})", group_id), e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = response
            .error_for_status()
            .map_err(|e| AppError::firestore(format!("get_group({}) status", group_id), e))?;

        let document: Document = response
            .json()
            .await
            .map_err(|e| AppError::firestore(format!("get_group({}) body", group_id), e))?;

        Ok(Some(group_from_document(group_id, &document)))
    }
}

/// Builds a [`Group`] from a fetched document.
///
/// The id comes from the document's resource name; the requested id is the
/// fallback when the name is absent (the emulator omits it on some paths).
fn group_from_document(requested_id: &str, document: &Document) -> Group {
    let id = match document.doc_id() {
        "" => requested_id.to_string(),
        id => id.to_string(),
    };
    Group {
        id,
        members: document.string_array_field("members"),
    }
}

#[async_trait]
impl TokenStore for FirestoreClient {
    /// Resolves push tokens for the given user ids.
    ///
    /// Projects only the `fcmToken` field and chunks the id set to stay under
    /// the query API's `IN` membership cap; chunk results are merged in
    /// arrival order. Users without a token contribute nothing.
    async fn fetch_tokens(&self, user_ids: &[String]) -> AppResult<Vec<String>> {
        // Mirrors [`merge_token_chunks`]; routing this call through that
        // helper's closure parameter makes the `#[async_trait]`-boxed future
        // fail the `Send` auto-trait check on current rustc
        // (rust-lang/rust#110338), so the loop is repeated here verbatim.
        let mut tokens = Vec::new();
        for chunk in user_ids.chunks(IN_QUERY_LIMIT) {
            tokens.extend(self.fetch_token_chunk(chunk).await?);
        }
        Ok(tokens)
    }
}

/// Splits `user_ids` into chunks of at most [`IN_QUERY_LIMIT`], resolves each
/// chunk with `fetch_chunk`, and concatenates the results in arrival order.
/// The first chunk failure aborts the remaining chunks.
async fn merge_token_chunks<F>(user_ids: &[String], mut fetch_chunk: F) -> AppResult<Vec<String>>
where
    F: AsyncFnMut(&[String]) -> AppResult<Vec<String>>,
{
    let mut tokens = Vec::new();
    for chunk in user_ids.chunks(IN_QUERY_LIMIT) {
        tokens.extend(fetch_chunk(chunk).await?);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> FirestoreClient {
        FirestoreClient::new(FirestoreConfig {
            project_id: "ping-mobile".to_string(),
            base_url: "https://firestore.googleapis.com/v1".to_string(),
            auth_token: None,
            request_timeout: 10,
        })
    }

    #[test]
    fn test_documents_url() {
        assert_eq!(
            client().documents_url(),
            "https://firestore.googleapis.com/v1/projects/ping-mobile/databases/(default)/documents"
        );
    }

    #[test]
    fn test_documents_url_trims_trailing_slash() {
        let client = FirestoreClient::new(FirestoreConfig {
            project_id: "ping-mobile".to_string(),
            base_url: "http://localhost:8080/v1/".to_string(),
            auth_token: None,
            request_timeout: 10,
        });
        assert_eq!(
            client.documents_url(),
            "http://localhost:8080/v1/projects/ping-mobile/databases/(default)/documents"
        );
    }

    #[test]
    fn test_user_doc_name() {
        assert_eq!(
            client().user_doc_name("u2"),
            "projects/ping-mobile/databases/(default)/documents/users/u2"
        );
    }

    #[test]
    fn test_group_from_document_takes_id_from_resource_name() {
        let document: Document = serde_json::from_str(
            r#"{
                "name": "projects/p/databases/(default)/documents/groups/g1",
                "fields": {
                    "members": {"arrayValue": {"values": [
                        {"stringValue": "u1"},
                        {"stringValue": "u2"}
                    ]}}
                }
            }"#,
        )
        .unwrap();

        let group = group_from_document("g1", &document);
        assert_eq!(group.id, "g1");
        assert_eq!(group.members, vec!["u1", "u2"]);
    }

    #[test]
    fn test_group_from_document_falls_back_to_requested_id() {
        let document = Document::default();
        let group = group_from_document("g1", &document);
        assert_eq!(group.id, "g1");
        assert!(group.members.is_empty());
    }

    #[test]
    fn test_in_query_limit() {
        // The chunk size must match the query API's documented cap
        assert_eq!(IN_QUERY_LIMIT, 10);
    }

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("u{}", i)).collect()
    }

    #[tokio::test]
    async fn test_merge_token_chunks_splits_above_limit() {
        let user_ids = ids(11);
        let mut batches: Vec<Vec<String>> = Vec::new();
        let tokens = merge_token_chunks(&user_ids, async |chunk| {
            batches.push(chunk.to_vec());
            Ok(chunk.iter().map(|id| format!("tok-{}", id)).collect())
        })
        .await
        .unwrap();

        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0], ids(10));
        assert_eq!(batches[1], vec!["u10".to_string()]);
        // Merged output keeps arrival order across chunk boundaries
        assert_eq!(tokens.len(), 11);
        assert_eq!(tokens[0], "tok-u0");
        assert_eq!(tokens[9], "tok-u9");
        assert_eq!(tokens[10], "tok-u10");
    }

    #[tokio::test]
    async fn test_merge_token_chunks_25_ids() {
        let user_ids = ids(25);
        let mut batch_sizes = Vec::new();
        let tokens = merge_token_chunks(&user_ids, async |chunk| {
            batch_sizes.push(chunk.len());
            Ok(chunk.to_vec())
        })
        .await
        .unwrap();

        assert_eq!(batch_sizes, vec![10, 10, 5]);
        assert_eq!(tokens, user_ids);
    }

    #[tokio::test]
    async fn test_merge_token_chunks_single_chunk_at_limit() {
        let user_ids = ids(10);
        let mut calls = 0;
        let tokens = merge_token_chunks(&user_ids, async |chunk| {
            calls += 1;
            Ok(chunk.to_vec())
        })
        .await
        .unwrap();

        assert_eq!(calls, 1);
        assert_eq!(tokens, user_ids);
    }

    #[tokio::test]
    async fn test_merge_token_chunks_empty_input_makes_no_calls() {
        let mut calls = 0;
        let tokens = merge_token_chunks(&[], async |chunk: &[String]| {
            calls += 1;
            Ok(chunk.to_vec())
        })
        .await
        .unwrap();

        assert_eq!(calls, 0);
        assert!(tokens.is_empty());
    }

    #[tokio::test]
    async fn test_merge_token_chunks_propagates_chunk_failure() {
        let user_ids = ids(25);
        let mut calls = 0;
        let result = merge_token_chunks(&user_ids, async |chunk| {
            calls += 1;
            if calls == 2 {
                Err(AppError::firestore("run_query status", anyhow::anyhow!("503")))
            } else {
                Ok(chunk.to_vec())
            }
        })
        .await;

        assert!(result.is_err());
        // The failing chunk aborts the rest; the third chunk is never queried
        assert_eq!(calls, 2);
    }
}
