//! Join key shared by lookup entries and flow log records.
//!
//! Example: lookup row `443,TCP,sv_P3` and a log record with port `443` and
//! protocol number `6` both become `LookupKey { port: "443", protocol: "tcp" }`.

use std::fmt;

/// A destination port paired with a lowercased protocol name.
///
/// The port is kept as written; `"080"` and `"80"` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LookupKey {
    port: String,
    protocol: String,
}

impl LookupKey {
    pub fn new(port: impl Into<String>, protocol: &str) -> Self {
        Self {
            port: port.into(),
            protocol: protocol.to_lowercase(),
        }
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.port, self.protocol)
    }
}
