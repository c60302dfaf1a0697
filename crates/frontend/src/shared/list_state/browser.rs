//! Browser-side collaborators: address bar and HTTP list endpoint.

use std::marker::PhantomData;

use async_trait::async_trait;
use contracts::shared::list_request::{EffectiveRequest, ListResponse};
use contracts::shared::query_string::{encode_params, to_query_string};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;

use super::controller::HistoryWriter;
use super::data_source::{FetchError, ListEndpoint};

/// Query of the current address, without the leading `?`
pub fn current_query() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .map(|search| search.trim_start_matches('?').to_string())
        .unwrap_or_default()
}

/// Writes the list state into the address bar with `history.replaceState`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserHistory;

impl HistoryWriter for BrowserHistory {
    fn replace_query(&mut self, query: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let location = window.location();
        let search = if query.is_empty() {
            String::new()
        } else {
            format!("?{query}")
        };

        // Only update URL if it actually changed
        if location.search().unwrap_or_default() == search {
            return;
        }

        let path = location.pathname().unwrap_or_default();
        let hash = location.hash().unwrap_or_default();
        let url = format!("{path}{search}{hash}");
        let result = window
            .history()
            .and_then(|history| history.replace_state_with_url(&JsValue::NULL, "", Some(&url)));
        if let Err(e) = result {
            log::warn!("history: replaceState failed: {e:?}");
        }
    }
}

/// `GET {url}?{query}` returning `{ items, totalCount }`.
pub struct HttpListEndpoint<T> {
    url: String,
    _row: PhantomData<fn() -> T>,
}

impl<T> HttpListEndpoint<T> {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            _row: PhantomData,
        }
    }

    pub fn request_url(&self, request: &EffectiveRequest) -> String {
        let query = to_query_string(&encode_params(request));
        if query.is_empty() {
            self.url.clone()
        } else {
            format!("{}?{}", self.url, query)
        }
    }
}

#[async_trait(?Send)]
impl<T: DeserializeOwned> ListEndpoint<T> for HttpListEndpoint<T> {
    async fn fetch(&self, request: &EffectiveRequest) -> Result<ListResponse<T>, FetchError> {
        let url = self.request_url(request);
        log::debug!("GET {url}");

        let response = Request::get(&url)
            .header("Cache-Control", "no-cache")
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        if !response.ok() {
            return Err(FetchError::Status(response.status()));
        }
        response
            .json::<ListResponse<T>>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}
