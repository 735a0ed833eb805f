use reqwest::{RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{ApiError, ApiResult};

/// Thin JSON wrapper over `reqwest` rooted at the API prefix.
///
/// Any non-success status collapses into [`ApiError::RequestFailed`]. There is
/// no retry and no timeout beyond what the transport applies.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Underlying HTTP client, shared with the image downloader.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        log::debug!("GET {}", endpoint);
        self.send_json(self.http.get(self.url(endpoint))).await
    }

    pub async fn get_text(&self, endpoint: &str) -> ApiResult<String> {
        log::debug!("GET {} (text)", endpoint);
        let response = check_status(self.http.get(self.url(endpoint)).send().await?)?;
        Ok(response.text().await?)
    }

    pub async fn post<B, T>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        log::debug!("POST {}", endpoint);
        self.send_json(self.http.post(self.url(endpoint)).json(body))
            .await
    }

    pub async fn put<B, T>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        log::debug!("PUT {}", endpoint);
        self.send_json(self.http.put(self.url(endpoint)).json(body))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        log::debug!("DELETE {}", endpoint);
        self.send_json(self.http.delete(self.url(endpoint))).await
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = check_status(request.send().await?)?;
        let body = response.bytes().await?;
        // empty bodies (204) decode as JSON null
        let body: &[u8] = if body.is_empty() { b"null" } else { &body };
        Ok(serde_json::from_slice(body)?)
    }
}

fn check_status(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        log::warn!("{} returned {}", response.url().path(), status);
        Err(ApiError::RequestFailed {
            status: status.as_u16(),
        })
    }
}
