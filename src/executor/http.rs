use std::{sync::Arc, time::Instant};

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header::CONTENT_TYPE, Client, Method, RequestBuilder, Response};
use url::Url;

use crate::{
    observer::{RequestEvent, RunObserver},
    parser::RequestDescriptor,
};

use super::{ExecutionError, ExecutorOptions};

const KBN_VERSION_HEADER: &str = "kbn-version";

/// Runs a single request descriptor.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    async fn execute(&self, request: &RequestDescriptor) -> Result<Bytes, ExecutionError>;
}

pub struct HttpExecutor {
    client: Client,
    options: ExecutorOptions,
    observer: Arc<dyn RunObserver>,
}

impl HttpExecutor {
    pub fn new(
        options: ExecutorOptions,
        observer: Arc<dyn RunObserver>,
    ) -> Result<Self, ExecutionError> {
        let client = Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|source| ExecutionError::BuildClient { source })?;

        Ok(Self {
            client,
            options,
            observer,
        })
    }

    pub fn options(&self) -> &ExecutorOptions {
        &self.options
    }

    /// The base URL with its path replaced; scheme, host and query are kept.
    pub fn request_url(&self, path: &str) -> Url {
        let mut url = self.options.base_url.clone();
        url.set_path(path);
        url
    }

    fn build_request(&self, method: Method, url: &Url, body: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, url.clone())
            .header(KBN_VERSION_HEADER, &self.options.kibana_version);

        if let Some(credentials) = &self.options.credentials {
            builder = builder.basic_auth(&credentials.username, Some(&credentials.password));
        }

        if !body.is_empty() {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_string());
        }

        builder
    }

    async fn send_with_retry(
        &self,
        request: &RequestDescriptor,
        method: Method,
        url: &Url,
    ) -> Result<Response, ExecutionError> {
        let mut attempt = 0u32;
        loop {
            let prepared = self
                .build_request(method.clone(), url, &request.body)
                .build()
                .map_err(|source| ExecutionError::BuildRequest {
                    url: url.to_string(),
                    source,
                })?;

            let error = match self.client.execute(prepared).await {
                Ok(response) => return Ok(response),
                Err(error) => error,
            };

            let delay = if is_transport_error(&error) {
                self.options.retry.delay_for_attempt(attempt)
            } else {
                None
            };

            match delay {
                Some(delay) => {
                    self.observer.retrying(request, attempt + 1, delay, &error);
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                None => {
                    return Err(ExecutionError::NetworkFailure {
                        url: url.to_string(),
                        attempts: attempt + 1,
                        source: error,
                    });
                }
            }
        }
    }
}

/// Connection, timeout and send failures; anything else fails the request at once.
fn is_transport_error(error: &reqwest::Error) -> bool {
    !error.is_builder() && (error.is_connect() || error.is_timeout() || error.is_request())
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(&self, request: &RequestDescriptor) -> Result<Bytes, ExecutionError> {
        let url = self.request_url(&request.path);
        let start = Instant::now();

        if self.options.dry_run {
            self.observer.request_sent(&RequestEvent {
                method: &request.method,
                url: url.as_str(),
                dry_run: true,
                duration: start.elapsed(),
                status: None,
                response_bytes: 0,
            });
            return Ok(Bytes::new());
        }

        let method = Method::from_bytes(request.method.as_bytes()).map_err(|_| {
            ExecutionError::InvalidMethod {
                method: request.method.clone(),
            }
        })?;

        let response = self.send_with_retry(request, method, &url).await?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|source| ExecutionError::ReadBody {
                url: url.to_string(),
                source,
            })?;

        self.observer.request_sent(&RequestEvent {
            method: &request.method,
            url: url.as_str(),
            dry_run: false,
            duration: start.elapsed(),
            status: Some(status.as_u16()),
            response_bytes: body.len(),
        });

        if status.as_u16() / 100 >= 4 {
            return Err(ExecutionError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(body)
    }
}
