//! Per-invocation request context.

use std::future::Future;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use lambda_http::{Request, RequestExt};

use crate::store::StoreError;

/// Headroom left to answer the gateway after a timed out store call.
const DEADLINE_MARGIN: Duration = Duration::from_millis(250);

/// Identity and deadline of the invocation a store call belongs to.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub request_id: String,
    deadline: Option<SystemTime>,
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: SystemTime) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn from_request(event: &Request) -> Self {
        match event.lambda_context_ref() {
            Some(lambda) => Self::new(lambda.request_id.clone())
                .with_deadline(UNIX_EPOCH + Duration::from_millis(lambda.deadline)),
            None => Self::default(),
        }
    }

    /// Time left for store work, or `None` when the invocation is unbounded.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline.map(|deadline| {
            deadline
                .duration_since(SystemTime::now())
                .unwrap_or_default()
                .saturating_sub(DEADLINE_MARGIN)
        })
    }

    /// Drops `call` if the deadline passes first.
    pub async fn run<T, F>(&self, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match self.remaining() {
            Some(left) => tokio::time::timeout(left, call)
                .await
                .map_err(|_| StoreError::DeadlineExceeded)?,
            None => call.await,
        }
    }
}
