use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::net::Ipv4Addr;

lazy_static! {
    static ref DOTTED_QUAD: Regex = Regex::new(r"\b\d{1,3}(?:\.\d{1,3}){3}\b").unwrap();
}

/// Which IPv4 addresses count as "local".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrivateRanges {
    /// Anything starting with `10.`, `172.` or `192.168.`
    #[default]
    Prefix,
    /// 10.0.0.0/8, 172.16.0.0/12 and 192.168.0.0/16 only
    Strict,
}

impl PrivateRanges {
    pub fn contains(self, address: Ipv4Addr) -> bool {
        match self {
            Self::Prefix => matches!(address.octets(), [10, ..] | [172, ..] | [192, 168, ..]),
            Self::Strict => address.is_private(),
        }
    }
}

/// Private-range IPv4 address discovered on one of the local interfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalAddress(Ipv4Addr);

impl LocalAddress {
    pub fn new(address: Ipv4Addr, ranges: PrivateRanges) -> Option<Self> {
        ranges.contains(address).then_some(Self(address))
    }

    /// First dotted quad in a negotiation candidate line, if it is private.
    ///
    /// Candidates carrying IPv6 or mDNS host names yield nothing.
    pub fn from_candidate(candidate: &str, ranges: PrivateRanges) -> Option<Self> {
        let quad = DOTTED_QUAD.find(candidate)?;
        let address: Ipv4Addr = quad.as_str().parse().ok()?;
        Self::new(address, ranges)
    }

    pub fn ip(&self) -> Ipv4Addr {
        self.0
    }
}

impl fmt::Display for LocalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
