//! Negotiators with canned candidate lists.

use super::{Negotiator, ProbeError, Session};

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Replays a fixed candidate list, then either ends or hangs forever.
pub(crate) struct Scripted {
    candidates: Vec<&'static str>,
    hang: bool,
    pub(crate) opened: Arc<AtomicUsize>,
    pub(crate) closed: Arc<AtomicUsize>,
}

impl Scripted {
    pub(crate) fn new(candidates: Vec<&'static str>) -> Self {
        Self {
            candidates,
            hang: false,
            opened: Arc::new(AtomicUsize::new(0)),
            closed: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn hanging(mut self) -> Self {
        self.hang = true;
        self
    }
}

struct ScriptedSession {
    candidates: VecDeque<String>,
    hang: bool,
    closed: Arc<AtomicUsize>,
}

#[async_trait]
impl Negotiator for Scripted {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn open(&self, rendezvous: &[String]) -> Result<Box<dyn Session>, ProbeError> {
        assert!(!rendezvous.is_empty());
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedSession {
            candidates: self.candidates.iter().map(|s| s.to_string()).collect(),
            hang: self.hang,
            closed: self.closed.clone(),
        }))
    }
}

#[async_trait]
impl Session for ScriptedSession {
    async fn next_candidate(&mut self) -> Option<String> {
        match self.candidates.pop_front() {
            Some(candidate) => Some(candidate),
            None if self.hang => std::future::pending().await,
            None => None,
        }
    }

    async fn close(&mut self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Fails to open, like a stack that cannot create the session.
pub(crate) struct Broken;

#[async_trait]
impl Negotiator for Broken {
    fn name(&self) -> &'static str {
        "broken"
    }

    async fn open(&self, _rendezvous: &[String]) -> Result<Box<dyn Session>, ProbeError> {
        Err(ProbeError::Unsupported)
    }
}
