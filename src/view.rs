//! Plain-text rendering of [ViewState] for the terminal front end.

use crate::controller::ViewState;
use crate::map_sync::MapSurface;
use crate::resolver::LocationRecord;

use std::fmt;
use tokio::sync::watch;

const PLACEHOLDER: &str = "Loading...";

pub fn location_line(record: &LocationRecord) -> String {
    format!(
        "{}, {}, {}",
        record.city, record.region, record.country_name
    )
}

/// "-0700" becomes "UTC: -07:00"; without an offset the zone name is shown.
pub fn timezone_line(record: &LocationRecord) -> String {
    let offset = record.utc_offset.as_str();
    let hours = offset.get(..3).unwrap_or(offset);
    let minutes = offset
        .get(3..)
        .filter(|minutes| !minutes.is_empty())
        .unwrap_or(record.timezone.as_str());
    format!("UTC: {hours}:{minutes}")
}

fn or_placeholder(value: Option<&str>) -> &str {
    value.filter(|value| !value.is_empty()).unwrap_or(PLACEHOLDER)
}

/// The four info boxes plus the local address.
pub struct InfoPanel<'a>(pub &'a ViewState);

impl fmt::Display for InfoPanel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.0.location.as_ref();
        let location = record.map(location_line);
        let timezone = record.map(timezone_line);
        let local_address = self.0.local_address.map(|address| address.to_string());

        writeln!(
            f,
            "ip address     {}",
            or_placeholder(record.map(|r| r.ip.as_str()))
        )?;
        writeln!(f, "location       {}", or_placeholder(location.as_deref()))?;
        writeln!(f, "timezone       {}", or_placeholder(timezone.as_deref()))?;
        writeln!(
            f,
            "isp            {}",
            or_placeholder(record.map(|r| r.org.as_str()))
        )?;
        write!(
            f,
            "local address  {}",
            local_address.as_deref().unwrap_or("-")
        )
    }
}

pub struct ErrorModal<'a>(pub &'a str);

impl fmt::Display for ErrorModal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "!! OH SNAP")?;
        writeln!(f, "!! {}", self.0)?;
        write!(f, "!! (:close to dismiss)")
    }
}

pub fn render(state: &ViewState) -> String {
    let mut screen = InfoPanel(state).to_string();
    if state.loading {
        screen.push_str("\n(searching...)");
    }
    if state.modal_visible {
        if let Some(error) = &state.error {
            screen.push('\n');
            screen.push_str(&ErrorModal(error).to_string());
        }
    }
    screen
}

/// Print every new state to stdout until the state channel closes.
pub async fn follow(mut states: watch::Receiver<ViewState>) {
    loop {
        let screen = render(&states.borrow_and_update());
        println!("\n{screen}");
        if states.changed().await.is_err() {
            return;
        }
    }
}

/// Map surface for terminals: there is no map, only the center it would show.
pub struct TerminalMap;

impl MapSurface for TerminalMap {
    fn set_center(&mut self, center: [f64; 2], zoom: u8) {
        let [latitude, longitude] = center;
        println!("map            centered on [{latitude}, {longitude}] at zoom {zoom}");
        log::debug!("map recentered to [{latitude}, {longitude}], zoom {zoom}");
    }
}
