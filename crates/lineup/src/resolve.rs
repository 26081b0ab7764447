//! Column width resolution.
//!
//! Widths are negotiated per column: the header label sets the floor, every
//! committed cell's measured output can raise it, and an explicit fixed
//! width on any cell overrides the result entirely. Widths are recomputed
//! on every render, never cached, since rows may change between calls.

use crate::table::Table;
use crate::util::display_width;

/// Resolved widths for all columns in a table, in column order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedWidths {
    /// Width for each column in display columns.
    pub widths: Vec<usize>,
}

impl ResolvedWidths {
    /// Get the width of a specific column.
    pub fn get(&self, index: usize) -> Option<usize> {
        self.widths.get(index).copied()
    }

    /// Get the total width of all columns (without separators).
    pub fn total(&self) -> usize {
        self.widths.iter().sum()
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    /// Check if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }
}

impl Table {
    /// Resolve column widths from header labels and committed rows.
    ///
    /// Each column is at least as wide as its header and as its widest
    /// measured cell. A fixed width carried by any cell in the column wins
    /// outright, even when smaller than the content; truncation happens at
    /// fill time.
    pub fn resolve_widths(&self) -> ResolvedWidths {
        self.resolve_impl(true)
    }

    /// Resolve column widths from committed rows only, ignoring headers.
    ///
    /// This is the width pass behind [`Table::print`], which emits no
    /// header line and therefore sizes columns to content alone.
    pub fn resolve_data_widths(&self) -> ResolvedWidths {
        self.resolve_impl(false)
    }

    fn resolve_impl(&self, include_headers: bool) -> ResolvedWidths {
        let mut widths = Vec::with_capacity(self.columns.len());

        for key in &self.columns {
            let mut width = if include_headers {
                display_width(key)
            } else {
                0
            };
            let mut fixed = None;

            for row in &self.rows {
                if let Some(cell) = row.cell(key) {
                    let measured = cell.render().measure(cell.value(), row);
                    width = width.max(display_width(&measured));
                    if let Some(w) = cell.fixed_width() {
                        fixed = Some(w);
                    }
                }
            }

            widths.push(fixed.unwrap_or(width));
        }

        ResolvedWidths { widths }
    }
}
