// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP dispatcher that forwards chat-completion bodies to the provider gateway.

use std::time::Duration;

use async_trait::async_trait;
use autoroute_config::model::UpstreamConfig;
use autoroute_core::{AutorouteError, DispatchRequest, DispatchResponse, Dispatcher};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;

/// Path appended to `upstream.base_url`.
const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Forwards requests to `{base_url}/v1/chat/completions` with the caller's credentials.
#[derive(Debug, Clone)]
pub struct HttpDispatcher {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpDispatcher {
    pub fn new(config: &UpstreamConfig) -> Result<Self, AutorouteError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AutorouteError::Dispatch {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            endpoint: format!("{}{COMPLETIONS_PATH}", config.base_url.trim_end_matches('/')),
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Dispatcher for HttpDispatcher {
    fn name(&self) -> &str {
        "http"
    }

    async fn dispatch(&self, request: DispatchRequest) -> Result<DispatchResponse, AutorouteError> {
        let mut builder = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(request.body);
        if let Some(authorization) = request.authorization {
            builder = builder.header(AUTHORIZATION, authorization);
        }

        let response = builder.send().await.map_err(|e| self.classify(e))?;

        let status = response.status();
        debug!(status = %status, endpoint = %self.endpoint, "upstream responded");

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        Ok(DispatchResponse {
            status: status.as_u16(),
            content_type,
            body: body.to_vec(),
        })
    }
}

impl HttpDispatcher {
    fn classify(&self, e: reqwest::Error) -> AutorouteError {
        if e.is_timeout() {
            AutorouteError::Timeout {
                duration: self.timeout,
            }
        } else {
            AutorouteError::Dispatch {
                message: format!("upstream request failed: {e}"),
                source: Some(Box::new(e)),
            }
        }
    }
}
