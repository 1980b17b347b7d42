pub use address::{LocalAddress, PrivateRanges};
pub use config::ProbeConfig;
pub use negotiator::{Negotiator, ProbeError, Session, Unsupported};
#[cfg(feature = "webrtc")]
pub use rtc::WebRtcNegotiator;

mod address;
mod config;
mod negotiator;
#[cfg(feature = "webrtc")]
mod rtc;
#[cfg(test)]
pub(crate) mod scripted;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const DISCOVERY_BUFFER: usize = 16;

/// The best negotiation stack compiled into this build.
pub fn platform_negotiator() -> Arc<dyn Negotiator> {
    #[cfg(feature = "webrtc")]
    return Arc::new(WebRtcNegotiator);
    #[cfg(not(feature = "webrtc"))]
    return Arc::new(Unsupported);
}

/// Finds private-range addresses of this machine by starting a connection
/// negotiation and reading the candidates it gathers.
#[derive(Clone)]
pub struct LocalAddressProbe {
    negotiator: Arc<dyn Negotiator>,
    rendezvous: Vec<String>,
    timeout: Option<Duration>,
    ranges: PrivateRanges,
}

impl LocalAddressProbe {
    pub fn new(negotiator: Arc<dyn Negotiator>, rendezvous: Vec<String>) -> Self {
        Self {
            negotiator,
            rendezvous,
            timeout: None,
            ranges: PrivateRanges::default(),
        }
    }

    pub fn from_config(config: &ProbeConfig) -> Self {
        Self::new(platform_negotiator(), config.rendezvous.clone())
            .with_timeout(config.timeout.map(Into::into))
            .with_private_ranges(config.private_ranges())
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_private_ranges(mut self, ranges: PrivateRanges) -> Self {
        self.ranges = ranges;
        self
    }

    /// Start gathering in the background.
    ///
    /// Addresses arrive in candidate order, consumers keep the last one.
    /// Failures are logged and simply end the stream.
    pub fn discover(&self) -> Discovery {
        let (sender, addresses) = mpsc::channel(DISCOVERY_BUFFER);
        if !self.negotiator.is_supported() {
            log::info!(
                "local address discovery is not available with {} negotiator",
                self.negotiator.name()
            );
            return Discovery {
                addresses,
                task: None,
            };
        }
        let task = tokio::spawn(gather(
            self.negotiator.clone(),
            self.rendezvous.clone(),
            self.timeout,
            self.ranges,
            sender,
        ));
        Discovery {
            addresses,
            task: Some(task),
        }
    }
}

/// Stream of addresses produced by one [LocalAddressProbe::discover] call.
///
/// Dropping it releases the negotiation session in the background,
/// [Discovery::finish] also waits for the release.
pub struct Discovery {
    addresses: mpsc::Receiver<LocalAddress>,
    task: Option<JoinHandle<()>>,
}

impl Discovery {
    pub async fn next(&mut self) -> Option<LocalAddress> {
        self.addresses.recv().await
    }

    pub async fn finish(self) {
        let Self { addresses, task } = self;
        drop(addresses);
        if let Some(task) = task {
            if let Err(e) = task.await {
                log::warn!("local address discovery task failed: {e}");
            }
        }
    }
}

async fn within<F: Future>(limit: Option<Duration>, future: F) -> Option<F::Output> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, future).await.ok(),
        None => Some(future.await),
    }
}

async fn relay_candidates(
    session: &mut dyn Session,
    ranges: PrivateRanges,
    sender: &mpsc::Sender<LocalAddress>,
) {
    while let Some(candidate) = session.next_candidate().await {
        match LocalAddress::from_candidate(&candidate, ranges) {
            Some(address) => {
                log::debug!("local address candidate {address}");
                if sender.send(address).await.is_err() {
                    return;
                }
            }
            None => log::trace!(r#"skipping candidate "{candidate}""#),
        }
    }
}

async fn gather(
    negotiator: Arc<dyn Negotiator>,
    rendezvous: Vec<String>,
    timeout: Option<Duration>,
    ranges: PrivateRanges,
    sender: mpsc::Sender<LocalAddress>,
) {
    let mut session = match negotiator.open(&rendezvous).await {
        Ok(session) => session,
        Err(e) => {
            log::warn!(
                "local address discovery with {} negotiator failed: {e}",
                negotiator.name()
            );
            return;
        }
    };

    let reason = tokio::select! {
        _ = sender.closed() => "discovery dropped",
        finished = within(timeout, relay_candidates(session.as_mut(), ranges, &sender)) => {
            if finished.is_some() {
                "end of candidates"
            } else {
                "gathering timed out"
            }
        }
    };
    session.close().await;
    log::debug!("negotiation session closed: {reason}");
}
