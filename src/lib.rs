//! Tag counts for AWS VPC flow logs.
//!
//! A run loads a lookup table mapping (destination port, protocol) pairs to
//! tags, counts flow log records per pair, and writes a two-section text
//! report. See [`pipeline::run`].

pub mod counts;
pub mod error;
pub mod log;
pub mod lookup;
pub mod model;
pub mod pipeline;
pub mod protocol;
pub mod render;

pub use error::{Error, Result};
