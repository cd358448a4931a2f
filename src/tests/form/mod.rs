mod dose_tests;
mod group_tests;
mod path_tests;
mod reducer_tests;

use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::{
    domain::Preset,
    form::FormSession,
    submit::{SubmitEndpoint, SubmitError},
};

/// Endpoint double that records every document and replies with a fixed result.
pub(super) struct RecordingEndpoint {
    calls: AtomicUsize,
    documents: Mutex<Vec<Value>>,
    reply: Result<Value, SubmitError>,
}

impl RecordingEndpoint {
    pub(super) fn accepting() -> Self {
        Self::replying(Ok(json!({"id": "rec-1"})))
    }

    pub(super) fn rejecting(message: &str) -> Self {
        Self::replying(Err(SubmitError::new(message)))
    }

    fn replying(reply: Result<Value, SubmitError>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            documents: Mutex::new(Vec::new()),
            reply,
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(super) fn last_document(&self) -> Option<Value> {
        self.documents.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl SubmitEndpoint for RecordingEndpoint {
    async fn create_or_update(&self, document: Value) -> Result<Value, SubmitError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.documents.lock().unwrap().push(document);
        self.reply.clone()
    }
}

pub(super) fn treatment_session() -> FormSession {
    FormSession::from_preset(Preset::AnimalTreatment)
}

pub(super) fn doses_of(session: &FormSession, entry: usize) -> Vec<(Option<String>, bool)> {
    session
        .entries()
        .get(entry)
        .expect("entry exists")
        .doses()
        .iter()
        .map(|dose| (dose.date.map(|date| date.to_string()), dose.taken))
        .collect()
}
