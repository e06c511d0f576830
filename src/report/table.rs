use std::io::{self, Write};

use crate::codes::CodeTable;
use crate::tree::AdaptiveTree;
use crate::Symbol;

/// Row that can be written by [`TableWriter`]
pub trait TableRow {
    /// Cell values, in header order
    fn cells(&self) -> Vec<String>;
}

/// Code table row with its display order number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTableRow {
    /// Order number of the symbol's leaf
    pub order_number: usize,
    /// Symbol
    pub symbol: Symbol,
    /// Occurrences so far
    pub occurrences: u64,
    /// Current codeword as `0`/`1` text
    pub codeword: String,
}

impl DataTableRow {
    /// Header line matching [`TableRow::cells`]
    pub const HEADERS: [&'static str; 4] = ["Order number", "Character", "Occurrences", "Codeword"];
}

impl TableRow for DataTableRow {
    fn cells(&self) -> Vec<String> {
        vec![
            self.order_number.to_string(),
            self.symbol.to_string(),
            self.occurrences.to_string(),
            self.codeword.clone(),
        ]
    }
}

/// Per-step statistics row.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsTableRow {
    /// Symbol processed at this step
    pub symbol: Symbol,
    /// Average codeword length after the step
    pub average_code_length: f64,
    /// Entropy after the step
    pub entropy: f64,
}

impl StatsTableRow {
    /// Header line matching [`TableRow::cells`]
    pub const HEADERS: [&'static str; 3] = ["Character", "Average Codeword Length", "Entropy"];
}

impl TableRow for StatsTableRow {
    fn cells(&self) -> Vec<String> {
        vec![
            self.symbol.to_string(),
            self.average_code_length.to_string(),
            self.entropy.to_string(),
        ]
    }
}

/// Writes a header line followed by one separated line per row.
#[derive(Debug, Clone, Copy)]
pub struct TableWriter {
    separator: char,
}

impl TableWriter {
    /// Writer with a custom cell separator
    pub fn new(separator: char) -> Self {
        Self { separator }
    }

    /// Write `headers` and `rows` to `out`
    pub fn write<W, R>(&self, mut out: W, headers: &[&str], rows: &[R]) -> io::Result<()>
    where
        W: Write,
        R: TableRow,
    {
        let separator = self.separator.to_string();
        writeln!(out, "{}", headers.join(&separator))?;
        for row in rows {
            writeln!(out, "{}", row.cells().join(&separator))?;
        }
        out.flush()
    }
}

impl Default for TableWriter {
    fn default() -> Self {
        Self::new('\t')
    }
}

/// Rows for every symbol leaf, highest order number first.
pub fn data_rows(tree: &AdaptiveTree, table: &CodeTable) -> Vec<DataTableRow> {
    let mut rows: Vec<DataTableRow> = tree
        .order_sequence()
        .into_iter()
        .enumerate()
        .filter_map(|(position, id)| {
            let symbol = tree.node(id)?.symbol()?;
            let entry = table.get(symbol)?;
            Some(DataTableRow {
                order_number: position + 1,
                symbol,
                occurrences: entry.weight,
                codeword: entry.code.to_string(),
            })
        })
        .collect();
    rows.sort_by(|a, b| b.order_number.cmp(&a.order_number));
    rows
}
