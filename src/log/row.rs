use crate::counts::Counts;
use crate::lookup::LookupKey;
use crate::protocol;

/// Number of leading fields a record needs for port and protocol to exist.
pub const MIN_FIELDS: usize = 8;

pub const VERSION_FIELD: usize = 0;
pub const DSTPORT_FIELD: usize = 6;
pub const PROTOCOL_FIELD: usize = 7;

/// The fields of one flow log record that the report uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowRecord<'a> {
    pub dstport: &'a str,
    pub protocol_number: &'a str,
}

impl FlowRecord<'_> {
    /// Join key with the protocol number resolved to its lowercased name.
    pub fn key(&self) -> LookupKey {
        LookupKey::new(self.dstport, &protocol::protocol_key(self.protocol_number))
    }
}

/// Occurrences per (dstport, protocol), in first-seen order.
pub type LogCounts = Counts<LookupKey>;
