use super::{Negotiator, ProbeError, Session};

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;
use webrtc::api::APIBuilder;
use webrtc::data_channel::RTCDataChannel;
use webrtc::ice_transport::ice_candidate::RTCIceCandidate;
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::RTCPeerConnection;

/// Gathers candidates with a WebRTC peer connection that never gets an answer.
#[derive(Default)]
pub struct WebRtcNegotiator;

struct WebRtcSession {
    peer: RTCPeerConnection,
    _channel: Arc<RTCDataChannel>,
    candidates: mpsc::UnboundedReceiver<Option<String>>,
}

fn candidate_line(candidate: &RTCIceCandidate) -> Option<String> {
    match candidate.to_json() {
        Ok(init) => Some(init.candidate),
        Err(e) => {
            log::warn!(
                "cannot serialize ICE candidate {}:{}: {e}",
                candidate.address,
                candidate.port
            );
            None
        }
    }
}

/// Data channel first: without a channel or track some stacks never gather.
async fn start_gathering(peer: &RTCPeerConnection) -> Result<Arc<RTCDataChannel>, webrtc::Error> {
    let channel = peer.create_data_channel("probe", None).await?;
    let offer = peer.create_offer(None).await?;
    peer.set_local_description(offer).await?;
    Ok(channel)
}

#[async_trait]
impl Negotiator for WebRtcNegotiator {
    fn name(&self) -> &'static str {
        "webrtc"
    }

    async fn open(&self, rendezvous: &[String]) -> Result<Box<dyn Session>, ProbeError> {
        let api = APIBuilder::new().build();
        let config = RTCConfiguration {
            ice_servers: vec![RTCIceServer {
                urls: rendezvous.to_vec(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let peer = api.new_peer_connection(config).await?;

        let (sender, candidates) = mpsc::unbounded_channel();
        peer.on_ice_candidate(Box::new(move |candidate: Option<RTCIceCandidate>| {
            // A send error only means the session is being closed
            match candidate {
                Some(candidate) => {
                    if let Some(line) = candidate_line(&candidate) {
                        let _ = sender.send(Some(line));
                    }
                }
                None => {
                    let _ = sender.send(None);
                }
            }
            Box::pin(async {})
        }));

        match start_gathering(&peer).await {
            Ok(channel) => Ok(Box::new(WebRtcSession {
                peer,
                _channel: channel,
                candidates,
            })),
            Err(e) => {
                if let Err(close_error) = peer.close().await {
                    log::debug!("closing half-open peer connection: {close_error}");
                }
                Err(e.into())
            }
        }
    }
}

#[async_trait]
impl Session for WebRtcSession {
    async fn next_candidate(&mut self) -> Option<String> {
        self.candidates.recv().await.flatten()
    }

    async fn close(&mut self) {
        if let Err(e) = self.peer.close().await {
            log::warn!("error while closing peer connection: {e}");
        }
    }
}
