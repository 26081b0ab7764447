//! Cell renderer protocol.
//!
//! Every cell is rendered twice per table render: once in measure mode to
//! find the column's natural width, once in fill mode to produce the final
//! width-constrained text. The two modes are explicit trait methods; both
//! receive the owning row, so a renderer may inspect sibling cells.

use crate::table::Row;
use crate::util::{display_width, pad_left, pad_right, truncate_end};
use crate::value::Value;

/// Marker appended when content is cut to fit a column.
pub(crate) const ELLIPSIS: &str = "...";

/// The two-pass contract between a cell's value and its rendered text.
///
/// [`measure`](CellRender::measure) must return deterministic-length output
/// for a given value and must not pad. [`fill`](CellRender::fill) returns
/// the text actually placed in the cell, padded or truncated to exactly
/// `width` display columns.
///
/// # Example
///
/// ```rust
/// use lineup::{CellRender, Row, Value, pad_left};
///
/// struct Upper;
///
/// impl CellRender for Upper {
///     fn measure(&self, value: &Value, _row: &Row) -> String {
///         value.to_string().to_uppercase()
///     }
///
///     fn fill(&self, value: &Value, width: usize, row: &Row) -> String {
///         pad_left(&self.measure(value, row), width)
///     }
/// }
/// ```
pub trait CellRender {
    /// Render the value to determine its natural width.
    fn measure(&self, value: &Value, row: &Row) -> String;

    /// Render the value into exactly `width` display columns.
    fn fill(&self, value: &Value, width: usize, row: &Row) -> String;
}

/// The default renderer: plain stringification, left-aligned.
///
/// Null and missing values render as empty content. Content wider than the
/// column is truncated with an `"..."` marker; when the column is narrower
/// than the marker itself, the marker is cut down too.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextRender;

impl CellRender for TextRender {
    fn measure(&self, value: &Value, _row: &Row) -> String {
        value.to_string()
    }

    fn fill(&self, value: &Value, width: usize, row: &Row) -> String {
        let text = self.measure(value, row);
        if display_width(&text) > width {
            truncate_end(&text, width, ELLIPSIS)
        } else {
            pad_right(&text, width)
        }
    }
}

/// Fixed-precision numeric renderer, right-aligned.
///
/// Non-numeric values render as empty content.
///
/// # Example
///
/// ```rust
/// use lineup::{Cell, NumberRender, Table};
///
/// let mut t = Table::new();
/// t.cell_with("n", Cell::new(1.345).with_renderer(NumberRender::new(2)))
///     .new_row();
/// assert_eq!(t.print(), "1.35\n");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct NumberRender {
    precision: usize,
}

impl NumberRender {
    /// Create a renderer showing `precision` decimal places.
    pub fn new(precision: usize) -> Self {
        NumberRender { precision }
    }
}

impl CellRender for NumberRender {
    fn measure(&self, value: &Value, _row: &Row) -> String {
        match value.as_f64() {
            Some(n) => format!("{:.*}", self.precision, n),
            None => String::new(),
        }
    }

    fn fill(&self, value: &Value, width: usize, row: &Row) -> String {
        let text = self.measure(value, row);
        if display_width(&text) > width {
            truncate_end(&text, width, ELLIPSIS)
        } else {
            pad_left(&text, width)
        }
    }
}

/// Adapter building a renderer from a pair of closures.
pub struct ClosureRender {
    measure: Box<dyn Fn(&Value, &Row) -> String>,
    fill: Box<dyn Fn(&Value, usize, &Row) -> String>,
}

impl ClosureRender {
    /// Build a renderer from a measure closure and a fill closure.
    pub fn new<M, F>(measure: M, fill: F) -> Self
    where
        M: Fn(&Value, &Row) -> String + 'static,
        F: Fn(&Value, usize, &Row) -> String + 'static,
    {
        ClosureRender {
            measure: Box::new(measure),
            fill: Box::new(fill),
        }
    }
}

impl CellRender for ClosureRender {
    fn measure(&self, value: &Value, row: &Row) -> String {
        (self.measure)(value, row)
    }

    fn fill(&self, value: &Value, width: usize, row: &Row) -> String {
        (self.fill)(value, width, row)
    }
}
