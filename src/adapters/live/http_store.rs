//! Live adapter for the `CollectionStore` port over a REST collection API.

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::StoreError;
use crate::ports::store::{record_id, CollectionStore, Page, Query, StoreFuture};

/// Collection store reached over HTTP.
///
/// Routes, relative to the base URL:
/// `GET /collections/{c}/items`, `GET|PATCH /collections/{c}/items/{id}`,
/// `POST /collections/{c}/items`.
pub struct HttpStore {
    client: Client,
    base_url: String,
    token: Option<String>,
}

/// Error body returned by the store, when it sends one.
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl HttpStore {
    /// Creates a client for the store at `base_url`, with an optional bearer token.
    #[must_use]
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self { client: Client::new(), base_url: base_url.trim_end_matches('/').to_string(), token }
    }

    fn items_url(&self, collection: &str) -> Result<Url, StoreError> {
        self.url(collection, None)
    }

    fn item_url(&self, collection: &str, id: &str) -> Result<Url, StoreError> {
        self.url(collection, Some(id))
    }

    /// Appends the route as path segments, percent-encoding each one.
    fn url(&self, collection: &str, id: Option<&str>) -> Result<Url, StoreError> {
        let base = &self.base_url;
        let mut url = Url::parse(base)
            .map_err(|e| StoreError::Transport(format!("invalid store URL {base}: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| StoreError::Transport(format!("store URL {base} cannot take a path")))?
            .pop_if_empty()
            .extend(["collections", collection, "items"])
            .extend(id);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        self.authorized(request)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))
    }
}

/// Reads the body of a successful response as JSON, or maps the failure.
async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    let status = response.status();
    let text = response.text().await.map_err(|e| StoreError::Transport(e.to_string()))?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&text).map(|b| b.message).unwrap_or(text);
        return Err(StoreError::Http { status: status.as_u16(), message });
    }

    serde_json::from_str(&text).map_err(|e| StoreError::Decode(e.to_string()))
}

impl CollectionStore for HttpStore {
    fn get_all<'a>(&'a self, collection: &'a str, query: &'a Query) -> StoreFuture<'a, Page> {
        Box::pin(async move {
            debug!(collection, limit = query.limit, skip = query.skip, "store get_all");
            let request = self
                .client
                .get(self.items_url(collection)?)
                .query(&[("limit", query.limit), ("skip", query.skip)]);
            read_json(self.send(request).await?).await
        })
    }

    fn get_by_id<'a>(
        &'a self,
        collection: &'a str,
        id: &'a str,
    ) -> StoreFuture<'a, Option<Value>> {
        Box::pin(async move {
            debug!(collection, id, "store get_by_id");
            let response = self.send(self.client.get(self.item_url(collection, id)?)).await?;
            if response.status() == StatusCode::NOT_FOUND {
                return Ok(None);
            }
            read_json(response).await.map(Some)
        })
    }

    fn update<'a>(&'a self, collection: &'a str, record: Value) -> StoreFuture<'a, Value> {
        Box::pin(async move {
            let id = record_id(&record)
                .ok_or_else(|| StoreError::Decode(format!("{collection} update is missing _id")))?
                .to_string();
            debug!(collection, id = %id, "store update");
            let request = self.client.patch(self.item_url(collection, &id)?).json(&record);
            read_json(self.send(request).await?).await
        })
    }

    fn create<'a>(&'a self, collection: &'a str, record: Value) -> StoreFuture<'a, Value> {
        Box::pin(async move {
            debug!(collection, id = record_id(&record), "store create");
            let request = self.client.post(self.items_url(collection)?).json(&record);
            read_json(self.send(request).await?).await
        })
    }
}
