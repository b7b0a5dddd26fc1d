//! Lookup table layer: the (dstport, protocol) join key and the CSV table
//! that maps keys to tags.

pub mod key;
pub mod table;

pub use key::LookupKey;
pub use table::{LookupTable, load_lookup_table};
