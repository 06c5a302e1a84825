// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! reqwest-backed transport with connection pooling.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use super::{HttpRequest, HttpResponse, Method, Transport};
use crate::config::Config;
use crate::core::constants::limits;
use crate::core::errors::{ClientError, TransportError};

/// HTTP transport resolving request paths against a fixed base URL
pub struct HttpTransport {
    http_client: Client,
    base_url: Url,
    request_timeout: Duration,
    connect_timeout: Duration,
}

impl HttpTransport {
    /// Build a transport from the client configuration
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        Self::build(
            &config.base_url,
            Duration::from_secs(config.request_timeout_secs),
            Duration::from_secs(config.connect_timeout_secs),
            config.accept_invalid_certs,
        )
    }

    /// Build a transport for `base_url` with a single overall timeout
    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self, ClientError> {
        let timeout = Duration::from_secs(timeout_secs);
        Self::build(base_url, timeout, timeout, false)
    }

    fn build(
        base_url: &str,
        request_timeout: Duration,
        connect_timeout: Duration,
        accept_invalid_certs: bool,
    ) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(base_url).map_err(|e| {
            ClientError::Configuration(format!("Invalid base URL '{}': {}", base_url, e))
        })?;

        // Paths are joined relative to the base, so keep any prefix such as `/api/`.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http_client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .tcp_nodelay(true)
            .pool_idle_timeout(Duration::from_secs(limits::POOL_IDLE_TIMEOUT_SECS))
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .map_err(|e| {
                ClientError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http_client,
            base_url,
            request_timeout,
            connect_timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    fn resolve(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| TransportError::InvalidRequest(format!("Invalid path '{}': {}", path, e)))
    }

    fn map_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            self.timeout_error(e.is_connect())
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else if e.is_builder() {
            TransportError::InvalidRequest(e.to_string())
        } else {
            TransportError::Request(e.to_string())
        }
    }

    /// Report the limit that actually elapsed
    fn timeout_error(&self, while_connecting: bool) -> TransportError {
        let limit = if while_connecting {
            self.connect_timeout
        } else {
            self.request_timeout
        };
        TransportError::Timeout(limit.as_secs())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Post => reqwest::Method::POST,
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = self.resolve(&request.path)?;

        debug!(
            method = request.method.as_str(),
            url = %url,
            body_len = request.body.len(),
            "Sending request"
        );

        let mut builder = self
            .http_client
            .request(request.method.into(), url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.body.is_empty() {
            builder = builder.body(request.body);
        }

        let response = builder.send().await.map_err(|e| {
            let err = self.map_error(e);
            warn!(url = %url, error = %err, "Transport failure");
            err
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_string(),
                    String::from_utf8_lossy(v.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.bytes().await.map_err(|e| self.map_error(e))?;

        debug!(url = %url, status, body_len = body.len(), "Received response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
