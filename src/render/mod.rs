//! Text report rendering and the no-overwrite writer.

pub mod text;

pub use text::{render_report, write_report};
