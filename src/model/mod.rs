//! Aggregation model: join flow log counts with the lookup table.

use crate::counts::Counts;
use crate::log::LogCounts;
use crate::lookup::LookupTable;

/// Tag assigned to combinations the lookup table does not mention.
pub const UNTAGGED: &str = "Untagged";

/// Totals per tag, in the order each tag first receives a count.
pub type TagCounts = Counts<String>;

/// Sum log counts per tag.
///
/// Every combination lands on exactly one tag, so the totals of the result
/// and of `logs` are equal.
pub fn count_tags(lookup: &LookupTable, logs: &LogCounts) -> TagCounts {
    let mut tags = TagCounts::new();
    for (key, n) in logs.iter() {
        let tag = lookup.get(key).unwrap_or(UNTAGGED);
        tags.add(tag.to_string(), n);
    }
    tags
}
