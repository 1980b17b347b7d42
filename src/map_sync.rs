use crate::controller::ViewState;

use serde::Deserialize;
use tokio::sync::watch;

/// The part of a map widget this crate drives.
pub trait MapSurface: Send {
    fn set_center(&mut self, center: [f64; 2], zoom: u8);
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapConfig {
    #[serde(default = "MapConfig::default_zoom")]
    pub zoom: u8,
}

impl MapConfig {
    pub const MAX_ZOOM: u8 = 19;

    fn default_zoom() -> u8 {
        15
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            zoom: Self::default_zoom(),
        }
    }
}

/// Recenters the map whenever the displayed location moves.
pub struct MapSync<M> {
    map: M,
    zoom: u8,
    last_center: Option<[f64; 2]>,
}

impl<M: MapSurface> MapSync<M> {
    pub fn new(map: M, zoom: u8) -> Self {
        Self {
            map,
            zoom,
            last_center: None,
        }
    }

    /// Returns whether the map was recentered.
    pub fn observe(&mut self, state: &ViewState) -> bool {
        let center = match &state.location {
            Some(location) => location.coordinates(),
            None => return false,
        };
        if self.last_center == Some(center) {
            return false;
        }
        self.map.set_center(center, self.zoom);
        self.last_center = Some(center);
        true
    }

    /// Follow `states` until the sender goes away, then hand the map back.
    pub async fn run(mut self, mut states: watch::Receiver<ViewState>) -> M {
        loop {
            {
                let state = states.borrow_and_update();
                self.observe(&state);
            }
            if states.changed().await.is_err() {
                return self.map;
            }
        }
    }
}
