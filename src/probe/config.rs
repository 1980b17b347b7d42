use super::PrivateRanges;
use crate::non_zero_duration::NonZeroDuration;

use serde::Deserialize;

const GOOGLE_STUN: &str = "stun:stun.l.google.com:19302";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfig {
    #[serde(default = "ProbeConfig::default_enabled")]
    pub enabled: bool,
    #[serde(default = "ProbeConfig::default_rendezvous", alias = "stun")]
    pub rendezvous: Vec<String>,
    /// Give up gathering after this long, by default wait for end-of-candidates
    #[serde(default)]
    pub timeout: Option<NonZeroDuration>,
    #[serde(default)]
    pub strict_private_ranges: bool,
}

impl ProbeConfig {
    fn default_enabled() -> bool {
        true
    }

    fn default_rendezvous() -> Vec<String> {
        vec![GOOGLE_STUN.into()]
    }

    pub fn private_ranges(&self) -> PrivateRanges {
        if self.strict_private_ranges {
            PrivateRanges::Strict
        } else {
            PrivateRanges::Prefix
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            rendezvous: Self::default_rendezvous(),
            timeout: None,
            strict_private_ranges: false,
        }
    }
}
