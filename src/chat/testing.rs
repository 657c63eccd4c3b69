//! In-memory stand-ins for the completion endpoint and the channel.

use std::{collections::VecDeque, sync::Arc, sync::Mutex};

use async_trait::async_trait;
use tokio::time::Instant;

use super::{
    client::{BackendError, CompletionBackend, CompletionRequest},
    emitter::MessageSink,
};

pub type Scripted = Result<String, BackendError>;

pub fn rate_limited() -> Scripted {
    Err(BackendError::RateLimited("429".to_string()))
}

/// Replays scripted outcomes and records when each call happened.
pub struct ScriptedBackend {
    outcomes: Mutex<VecDeque<Scripted>>,
    fallback: fn() -> Scripted,
    pub calls: Mutex<Vec<(Instant, CompletionRequest)>>,
}

impl ScriptedBackend {
    pub fn new(outcomes: Vec<Scripted>, fallback: fn() -> Scripted) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into()),
            fallback,
            calls: Mutex::new(vec![]),
        })
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(at, _)| *at).collect()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn complete(&self, request: CompletionRequest) -> Result<String, BackendError> {
        self.calls.lock().unwrap().push((Instant::now(), request));
        let next = self.outcomes.lock().unwrap().pop_front();
        next.unwrap_or_else(self.fallback)
    }
}

/// Keeps every message sent to it, optionally failing on the n-th send.
#[derive(Default)]
pub struct RecordingSink {
    pub sent: Mutex<Vec<(Instant, String)>>,
    pub fail_on: Option<usize>,
}

impl RecordingSink {
    pub fn contents(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, content)| content.clone())
            .collect()
    }
}

#[async_trait]
impl MessageSink for RecordingSink {
    async fn send(&self, content: String) -> anyhow::Result<()> {
        let mut sent = self.sent.lock().unwrap();
        if self.fail_on == Some(sent.len()) {
            anyhow::bail!("channel went away");
        }
        sent.push((Instant::now(), content));
        Ok(())
    }
}
