use serde::Deserialize;
use std::num::NonZeroU64;
use std::time::Duration;

/// Timeout given in whole seconds in the config file. Zero is rejected at
/// deserialization, "no timeout" is expressed by leaving the key out.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(from = "NonZeroU64")]
pub struct NonZeroDuration(Duration);

impl NonZeroDuration {
    pub fn new(duration: Duration) -> Option<Self> {
        if duration.is_zero() {
            None
        } else {
            Some(Self(duration))
        }
    }

    pub fn from_secs(secs: u64) -> Option<Self> {
        NonZeroU64::new(secs).map(Self::from)
    }

    pub fn get(self) -> Duration {
        self.0
    }
}

impl From<NonZeroU64> for NonZeroDuration {
    fn from(secs: NonZeroU64) -> Self {
        Self(Duration::from_secs(secs.get()))
    }
}

impl From<NonZeroDuration> for Duration {
    fn from(duration: NonZeroDuration) -> Self {
        duration.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        timeout: Option<NonZeroDuration>,
    }

    #[test]
    fn zero_is_rejected() {
        assert!(NonZeroDuration::new(Duration::ZERO).is_none());
        assert!(NonZeroDuration::from_secs(0).is_none());
        assert!(toml::from_str::<Holder>("timeout = 0").is_err());
    }

    #[test]
    fn seconds_from_toml() {
        let holder: Holder = toml::from_str("timeout = 7").unwrap();
        assert_eq!(
            holder.timeout.map(Duration::from),
            Some(Duration::from_secs(7))
        );
        let holder: Holder = toml::from_str("").unwrap();
        assert!(holder.timeout.is_none());
    }
}
