use crate::error::{Error, Result};
use crate::log::row::{
    DSTPORT_FIELD, FlowRecord, LogCounts, MIN_FIELDS, PROTOCOL_FIELD, VERSION_FIELD,
};

use std::fs;
use std::path::Path;
use tracing::debug;

/// Only version 2 records are understood.
pub const SUPPORTED_VERSION: &str = "2";

/// Parse a flow log file into per-(dstport, protocol) counts.
///
/// Expected columns (whitespace-separated, v2 default format):
/// version account-id interface-id srcaddr dstaddr srcport dstport protocol ...
///
/// Example:
/// 2 123456789012 eni-0a1b2c3d 10.0.1.201 198.51.100.2 443 49153 6 25 20000 1620140761 1620140821 ACCEPT OK
///
/// One record with the wrong version fails the whole file.
pub fn parse_log_file(path: &Path) -> Result<LogCounts> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_log(&text, path)
}

fn parse_log(text: &str, path: &Path) -> Result<LogCounts> {
    let mut out = LogCounts::new();
    let mut records = 0usize;

    for (lineno, line) in text.lines().enumerate() {
        let lno = lineno + 1;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        let record = parse_record(line, path, lno)?;
        out.increment(record.key());
        records += 1;
    }

    debug!(
        path = %path.display(),
        records,
        combinations = out.len(),
        "parsed flow log"
    );
    Ok(out)
}

fn parse_record<'a>(line: &'a str, path: &Path, lno: usize) -> Result<FlowRecord<'a>> {
    let fields: Vec<&str> = line.split_whitespace().collect();

    let version = fields[VERSION_FIELD];
    if version != SUPPORTED_VERSION {
        debug!(path = %path.display(), line = lno, version, "unsupported record version");
        return Err(Error::VersionMismatch {
            path: path.to_path_buf(),
            line: lno,
            version: version.to_string(),
        });
    }

    if fields.len() < MIN_FIELDS {
        return Err(Error::MalformedLine {
            path: path.to_path_buf(),
            line: lno,
            found: fields.len(),
            expected: MIN_FIELDS,
        });
    }

    Ok(FlowRecord {
        dstport: fields[DSTPORT_FIELD],
        protocol_number: fields[PROTOCOL_FIELD],
    })
}
