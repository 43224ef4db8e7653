use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use super::FavoritesStore;
use crate::catalog::coerce_id;
use crate::config::FirestoreConfig;
use crate::error::{Error, Result};

/// Favorites collection stored in Cloud Firestore, accessed through the REST API.
#[derive(Clone, Debug)]
pub struct FirestoreStore {
    http: reqwest::Client,
    collection_url: Url,
    access_token: Option<String>,
    page_size: u32,
}

#[derive(Debug, Deserialize)]
struct Document {
    name: String,
    #[serde(default)]
    fields: HashMap<String, FieldValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldValue {
    string_value: Option<String>,
    /// int64 values are encoded as JSON strings.
    integer_value: Option<String>,
    double_value: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<Document>,
    next_page_token: Option<String>,
}

impl Document {
    fn movie_id(&self) -> Option<i32> {
        let value = self.fields.get("movieId")?;

        if let Some(raw) = value.string_value.as_deref().or(value.integer_value.as_deref()) {
            return coerce_id(raw);
        }

        value
            .double_value
            .filter(|value| value.is_finite())
            .and_then(|value| i32::try_from(value.trunc() as i64).ok())
    }
}

impl FirestoreStore {
    pub fn new(config: &FirestoreConfig) -> Result<Self> {
        FirestoreStore::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(http: reqwest::Client, config: &FirestoreConfig) -> Result<Self> {
        let project_id = config.project_id.as_deref().ok_or_else(|| {
            Error::Config("favorites.firestore.project_id is required for the firestore backend".to_owned())
        })?;

        let mut collection_url = config.base_url.clone();
        collection_url
            .path_segments_mut()
            .map_err(|_| Error::Config(format!("{} cannot be a base URL", config.base_url)))?
            .pop_if_empty()
            .extend([
                "projects",
                project_id,
                "databases",
                config.database.as_str(),
                "documents",
                config.collection.as_str(),
            ]);

        Ok(FirestoreStore {
            http,
            collection_url,
            access_token: config.access_token.clone(),
            page_size: config.page_size,
        })
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: serde::de::DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let store_error = |err: reqwest::Error| Error::Store(format!("{}: {}", self.collection_url, err));

        let response = self
            .authorize(request)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(store_error)?;

        response.json::<T>().await.map_err(store_error)
    }
}

#[async_trait]
impl FavoritesStore for FirestoreStore {
    async fn add_favorite(&self, movie_id: &str) -> Result<bool> {
        let body = json!({
            "fields": {
                "movieId": { "stringValue": movie_id }
            }
        });

        let request = self.http.post(self.collection_url.clone()).json(&body);
        let document: Document = self.send(request).await?;

        log::debug!("Created favorite {} for movie {:?}", document.name, movie_id);
        Ok(!document.name.is_empty())
    }

    async fn list_favorites(&self) -> Result<Vec<Option<i32>>> {
        let mut movie_ids = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = self.collection_url.clone();
            {
                let mut query = url.query_pairs_mut();
                query.append_pair("pageSize", &self.page_size.to_string());
                if let Some(token) = &page_token {
                    query.append_pair("pageToken", token);
                }
            }

            let page: ListDocumentsResponse = self.send(self.http.get(url)).await?;
            movie_ids.extend(page.documents.iter().map(Document::movie_id));

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        log::debug!("Listed {} favorites", movie_ids.len());
        Ok(movie_ids)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const COLLECTION: &str = "/v1/projects/demo/databases/(default)/documents/favorites";

    fn config_for(server: &MockServer) -> FirestoreConfig {
        FirestoreConfig {
            base_url: Url::parse(&format!("{}/v1/", server.uri())).unwrap(),
            project_id: Some("demo".to_owned()),
            access_token: Some("owner".to_owned()),
            ..FirestoreConfig::default()
        }
    }

    fn document(name: &str, movie_id: serde_json::Value) -> serde_json::Value {
        json!({
            "name": format!("projects/demo/databases/(default)/documents/favorites/{}", name),
            "fields": { "movieId": movie_id },
            "createTime": "2021-01-05T10:00:00.000000Z",
            "updateTime": "2021-01-05T10:00:00.000000Z",
        })
    }

    #[test]
    fn firestore_backend_requires_a_project() {
        let config = FirestoreConfig::default();

        assert!(matches!(FirestoreStore::new(&config), Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn add_favorite_posts_a_movie_id_document() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(COLLECTION))
            .and(header("authorization", "Bearer owner"))
            .and(body_json(json!({"fields": {"movieId": {"stringValue": "3"}}})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(document("a1B2c3", json!({"stringValue": "3"}))),
            )
            .expect(1)
            .mount(&server)
            .await;

        let store = FirestoreStore::new(&config_for(&server)).unwrap();

        assert!(store.add_favorite("3").await.unwrap());
    }

    #[tokio::test]
    async fn list_favorites_follows_page_tokens() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(COLLECTION))
            .and(query_param("pageToken", "next"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "documents": [document("c", json!({"integerValue": "7"}))],
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(COLLECTION))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "documents": [
                    document("a", json!({"stringValue": "3"})),
                    document("b", json!({"stringValue": "not a movie"})),
                ],
                "nextPageToken": "next",
            })))
            .mount(&server)
            .await;

        let store = FirestoreStore::new(&config_for(&server)).unwrap();

        assert_eq!(
            store.list_favorites().await.unwrap(),
            vec![Some(3), None, Some(7)]
        );
    }

    #[tokio::test]
    async fn empty_collection_lists_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(COLLECTION))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let store = FirestoreStore::new(&config_for(&server)).unwrap();

        assert!(store.list_favorites().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn permission_denied_is_a_store_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": { "code": 403, "status": "PERMISSION_DENIED" }
            })))
            .mount(&server)
            .await;

        let store = FirestoreStore::new(&config_for(&server)).unwrap();

        assert!(matches!(store.add_favorite("1").await, Err(Error::Store(_))));
    }

    #[test]
    fn document_without_movie_id_has_no_movie() {
        let document: Document = serde_json::from_value(json!({
            "name": "projects/demo/databases/(default)/documents/favorites/x",
        }))
        .unwrap();

        assert_eq!(document.movie_id(), None);
    }

    #[test]
    fn double_movie_ids_are_truncated() {
        let document: Document =
            serde_json::from_value(document("d", json!({"doubleValue": 4.0}))).unwrap();

        assert_eq!(document.movie_id(), Some(4));
    }
}
