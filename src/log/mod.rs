//! Parsing for AWS VPC flow logs (version 2, default field order).

pub mod parse;
pub mod row;

pub use parse::parse_log_file;
pub use row::{FlowRecord, LogCounts};
