use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("connection negotiation is not available on this platform")]
    Unsupported,
    #[cfg(feature = "webrtc")]
    #[error(transparent)]
    WebRtc(#[from] webrtc::Error),
}

/// A connection-negotiation stack able to gather local transport candidates.
#[async_trait]
pub trait Negotiator: Send + Sync {
    fn name(&self) -> &'static str;

    fn is_supported(&self) -> bool {
        true
    }

    /// Open a session against the rendezvous servers and start gathering.
    ///
    /// The session must already have an auxiliary channel and a local offer,
    /// nothing is ever sent to a peer.
    async fn open(&self, rendezvous: &[String]) -> Result<Box<dyn Session>, ProbeError>;
}

#[async_trait]
pub trait Session: Send {
    /// Next raw candidate line, `None` after end-of-candidates.
    async fn next_candidate(&mut self) -> Option<String>;

    async fn close(&mut self);
}

/// Stand-in for platforms without a negotiation stack.
pub struct Unsupported;

#[async_trait]
impl Negotiator for Unsupported {
    fn name(&self) -> &'static str {
        "unsupported"
    }

    fn is_supported(&self) -> bool {
        false
    }

    async fn open(&self, _rendezvous: &[String]) -> Result<Box<dyn Session>, ProbeError> {
        Err(ProbeError::Unsupported)
    }
}
