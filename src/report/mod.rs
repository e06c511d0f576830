//! Human-readable per-step output
//!
//! - separated-value tables (data table per step, statistics per run)
//! - Graphviz DOT rendering of a snapshot

mod dot;
mod table;

pub use dot::render_dot;
pub use table::{data_rows, DataTableRow, StatsTableRow, TableRow, TableWriter};
