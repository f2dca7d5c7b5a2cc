use crate::domain::ports::{HttpClient, HttpResponse};
use crate::error::{PaymentError, Result, TransportError};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// JSON-over-HTTP transport backed by a pooled `reqwest::Client`.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PaymentError::Config(format!("failed to build http client: {e}")))?;
        Ok(Self { client })
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> std::result::Result<HttpResponse, TransportError> {
        let response = request
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post(
        &self,
        url: &str,
        body: Vec<u8>,
    ) -> std::result::Result<HttpResponse, TransportError> {
        tracing::debug!(url, "POST");
        self.send(self.client.post(url).body(body)).await
    }

    async fn put(
        &self,
        url: &str,
        body: Vec<u8>,
    ) -> std::result::Result<HttpResponse, TransportError> {
        tracing::debug!(url, "PUT");
        self.send(self.client.put(url).body(body)).await
    }
}
