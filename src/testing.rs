// Test doubles shared by unit tests across modules.
// A scripted transport that records requests instead of touching the network.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::api::{ApiRequest, ApiResponse, Transport};
use crate::error::{JournalError, Result};
use crate::storage::lock;

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum Reply {
    Respond(StatusCode, String),
    Offline,
}

impl Reply {
    pub fn ok_json(value: serde_json::Value) -> Self {
        Reply::Respond(StatusCode::OK, value.to_string())
    }
}

/// Transport answering from a script, in order.
///
/// Replies registered for a path with [`MockTransport::route`] are used
/// first, so concurrent requests to different paths get the right answer.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Reply>>,
    routed: Mutex<Vec<(String, Reply)>>,
    requests: Mutex<Vec<ApiRequest>>,
    events: Option<Arc<Mutex<Vec<String>>>>,
}

impl MockTransport {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Also append `send <path>` to a shared event log on every call.
    pub fn with_events(mut self, events: Arc<Mutex<Vec<String>>>) -> Self {
        self.events = Some(events);
        self
    }

    /// Answer the next request for `path` with `reply`.
    pub fn route(self, path: &str, reply: Reply) -> Self {
        lock(&self.routed).push((path.to_string(), reply));
        self
    }

    fn next_reply(&self, path: &str) -> Reply {
        let mut routed = lock(&self.routed);
        if let Some(pos) = routed.iter().position(|(p, _)| p == path) {
            return routed.remove(pos).1;
        }
        drop(routed);
        lock(&self.replies).pop_front().unwrap_or(Reply::Offline)
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<ApiRequest> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        if let Some(events) = &self.events {
            lock(events).push(format!("send {}", request.path));
        }
        let reply = self.next_reply(&request.path);
        lock(&self.requests).push(request);

        match reply {
            Reply::Respond(status, body) => Ok(ApiResponse { status, body }),
            Reply::Offline => Err(JournalError::NetworkUnavailable(
                "connection refused".to_string(),
            )),
        }
    }
}

/// A lesson with the given subject, otherwise fixed fields.
pub fn lesson(subject: &str) -> crate::api::LessonItem {
    crate::api::LessonItem {
        date: "2026-03-02".to_string(),
        lesson: 1,
        started_at: "09:00".to_string(),
        finished_at: "10:30".to_string(),
        subject: subject.to_string(),
        room: "204".to_string(),
        teacher: "Smirnova A.".to_string(),
    }
}
