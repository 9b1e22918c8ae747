// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock dispatcher for deterministic gateway tests.
//!
//! `MockDispatcher` implements `Dispatcher` without any network access. It
//! records every request it receives and answers from a FIFO queue of
//! outcomes. When the queue is empty it echoes the request body back as a
//! `200 application/json` response, so tests can assert on exactly what the
//! gateway forwarded.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use autoroute_core::{AutorouteError, DispatchRequest, DispatchResponse, Dispatcher};

/// A pre-configured answer for one dispatch call.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Echo the request body with status 200.
    Echo,
    /// Return this JSON body with the given status.
    Respond { status: u16, body: serde_json::Value },
    /// Fail as if the provider were unreachable.
    Fail(String),
    /// Fail as if the provider did not answer in time.
    Timeout(Duration),
}

/// A dispatcher that records requests and returns queued outcomes.
#[derive(Clone, Default)]
pub struct MockDispatcher {
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    received: Arc<Mutex<Vec<DispatchRequest>>>,
}

impl MockDispatcher {
    /// Create a mock that echoes every request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock pre-loaded with outcomes.
    pub fn with_outcomes(outcomes: Vec<MockOutcome>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::from(outcomes))),
            received: Arc::default(),
        }
    }

    /// Queue another outcome.
    pub async fn push_outcome(&self, outcome: MockOutcome) {
        self.outcomes.lock().await.push_back(outcome);
    }

    /// Requests received so far, in order.
    pub async fn received(&self) -> Vec<DispatchRequest> {
        self.received.lock().await.clone()
    }

    /// Body of the most recent request parsed as JSON.
    pub async fn last_json(&self) -> Option<serde_json::Value> {
        let received = self.received.lock().await;
        received
            .last()
            .and_then(|r| serde_json::from_slice(&r.body).ok())
    }
}

#[async_trait]
impl Dispatcher for MockDispatcher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn dispatch(&self, request: DispatchRequest) -> Result<DispatchResponse, AutorouteError> {
        self.received.lock().await.push(request.clone());
        let outcome = self
            .outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or(MockOutcome::Echo);

        match outcome {
            MockOutcome::Echo => Ok(DispatchResponse {
                status: 200,
                content_type: Some("application/json".to_string()),
                body: request.body,
            }),
            MockOutcome::Respond { status, body } => Ok(DispatchResponse {
                status,
                content_type: Some("application/json".to_string()),
                body: body.to_string().into_bytes(),
            }),
            MockOutcome::Fail(message) => Err(AutorouteError::Dispatch {
                message,
                source: None,
            }),
            MockOutcome::Timeout(duration) => Err(AutorouteError::Timeout { duration }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: &str) -> DispatchRequest {
        DispatchRequest {
            body: body.as_bytes().to_vec(),
            authorization: Some("Bearer sk-test".to_string()),
        }
    }

    #[tokio::test]
    async fn echoes_by_default_and_records() {
        let mock = MockDispatcher::new();
        let resp = mock.dispatch(request(r#"{"model":"gpt-4"}"#)).await.unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, br#"{"model":"gpt-4"}"#.to_vec());

        let received = mock.received().await;
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].authorization.as_deref(), Some("Bearer sk-test"));
        assert_eq!(mock.last_json().await.unwrap()["model"], "gpt-4");
    }

    #[tokio::test]
    async fn queued_outcomes_are_used_in_order() {
        let mock = MockDispatcher::with_outcomes(vec![
            MockOutcome::Fail("connection refused".to_string()),
            MockOutcome::Timeout(Duration::from_secs(5)),
        ]);
        assert!(matches!(
            mock.dispatch(request("{}")).await,
            Err(AutorouteError::Dispatch { .. })
        ));
        assert!(matches!(
            mock.dispatch(request("{}")).await,
            Err(AutorouteError::Timeout { .. })
        ));
        assert!(mock.dispatch(request("{}")).await.is_ok());
    }

    #[tokio::test]
    async fn canned_response() {
        let mock = MockDispatcher::new();
        mock.push_outcome(MockOutcome::Respond {
            status: 429,
            body: serde_json::json!({"error": "rate limited"}),
        })
        .await;
        let resp = mock.dispatch(request("{}")).await.unwrap();
        assert_eq!(resp.status, 429);
    }
}
