//! Lookup table CSV (`dstport,protocol,tag`).
//!
//! Columns are matched by header name, so their order is free and unknown
//! columns are ignored. Headers and fields are trimmed.
//!
//! ```text
//! dstport,protocol,tag
//! 25,tcp,sv_P1
//! 443,TCP,sv_P2
//! ```

use crate::error::{Error, Result};
use crate::lookup::LookupKey;

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// One data row as it appears in the CSV.
#[derive(Debug, Clone, Deserialize)]
struct LookupRow {
    dstport: String,
    protocol: String,
    tag: String,
}

/// Validated mapping from join key to tag. Every key appears once.
#[derive(Debug, Clone, Default)]
pub struct LookupTable {
    tags: HashMap<LookupKey, String>,
}

impl LookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag; returns the rejected key if it is already present.
    pub fn insert(&mut self, key: LookupKey, tag: String) -> std::result::Result<(), LookupKey> {
        if self.tags.contains_key(&key) {
            return Err(key);
        }
        self.tags.insert(key, tag);
        Ok(())
    }

    pub fn get(&self, key: &LookupKey) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Read and validate a lookup table file.
///
/// The whole file is read before parsing. A repeated key fails the load and no
/// table is returned.
pub fn load_lookup_table(path: &Path) -> Result<LookupTable> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_lookup_table(&text, path)
}

fn parse_lookup_table(text: &str, path: &Path) -> Result<LookupTable> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut table = LookupTable::new();
    for row in rdr.deserialize::<LookupRow>() {
        let row = row.map_err(|source| Error::Csv {
            path: path.to_path_buf(),
            source,
        })?;

        let key = LookupKey::new(row.dstport, &row.protocol);
        if let Err(key) = table.insert(key, row.tag) {
            return Err(Error::DuplicateKey {
                port: key.port().to_string(),
                protocol: key.protocol().to_string(),
                path: path.to_path_buf(),
            });
        }
    }

    debug!(path = %path.display(), entries = table.len(), "loaded lookup table");
    Ok(table)
}
