//! The table: cell insertion, row lifecycle, sorting, totals, rendering.

use std::fmt;
use std::mem;
use std::rc::Rc;
use std::str::FromStr;

use crate::aggr::{Aggregate, Sum};
use crate::error::Error;
use crate::render::{CellRender, TextRender, ELLIPSIS};
use crate::resolve::ResolvedWidths;
use crate::util::{display_width, pad_right, truncate_end};
use crate::value::{compare, Value};

/// Default column separator: the two-space shift token.
const SHIFT: &str = "  ";

/// A single cell: a value plus its optional rendering rule and width override.
///
/// Built fluently and handed to [`Table::cell_with`]:
///
/// ```rust
/// use lineup::{Cell, NumberRender, Table};
///
/// let mut t = Table::new();
/// t.cell_with("price", Cell::new(12.5).with_renderer(NumberRender::new(2)))
///     .cell_with("name", Cell::new("widget").with_width(4))
///     .new_row();
/// ```
pub struct Cell {
    pub(crate) value: Value,
    pub(crate) renderer: Option<Rc<dyn CellRender>>,
    pub(crate) width: Option<usize>,
}

impl Cell {
    /// Create a cell holding `value`, rendered by the default renderer.
    pub fn new(value: impl Into<Value>) -> Self {
        Cell {
            value: value.into(),
            renderer: None,
            width: None,
        }
    }

    /// Attach a custom renderer.
    pub fn with_renderer(mut self, renderer: impl CellRender + 'static) -> Self {
        self.renderer = Some(Rc::new(renderer));
        self
    }

    /// Fix the owning column's width, overriding content-based sizing.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// The raw value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub(crate) fn render(&self) -> &dyn CellRender {
        self.renderer.as_deref().unwrap_or(&TextRender)
    }

    pub(crate) fn fixed_width(&self) -> Option<usize> {
        self.width
    }
}

/// An ordered mapping from column key to cell.
///
/// Renderers receive the owning row, so they can read sibling cells via
/// [`Row::get`].
#[derive(Default)]
pub struct Row {
    cells: Vec<(String, Cell)>,
}

impl Row {
    /// The value stored under `key`, if the row has that cell.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.cell(key).map(Cell::value)
    }

    /// True when the row holds no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub(crate) fn cell(&self, key: &str) -> Option<&Cell> {
        self.cells
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, cell)| cell)
    }

    pub(crate) fn insert(&mut self, key: String, cell: Cell) {
        match self.cells.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = cell,
            None => self.cells.push((key, cell)),
        }
    }
}

/// Sort direction for one criterion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// Smallest first; missing values last.
    #[default]
    Asc,
    /// Largest first; missing values first.
    Desc,
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "asc" => Ok(Direction::Asc),
            "des" => Ok(Direction::Desc),
            other => Err(Error::InvalidSortKey(format!(
                "unknown direction '{}', expected 'asc' or 'des'",
                other
            ))),
        }
    }
}

/// One sort criterion: a column key plus a direction.
///
/// Parses from the `"key"` / `"key|asc"` / `"key|des"` token grammar:
///
/// ```rust
/// use lineup::{Direction, SortKey};
///
/// let key: SortKey = "total|des".parse().unwrap();
/// assert_eq!(key.direction(), Direction::Desc);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortKey {
    column: String,
    direction: Direction,
}

impl SortKey {
    /// Create a criterion with an explicit direction.
    pub fn new(column: impl Into<String>, direction: Direction) -> Self {
        SortKey {
            column: column.into(),
            direction,
        }
    }

    /// Ascending criterion for `column`.
    pub fn asc(column: impl Into<String>) -> Self {
        SortKey::new(column, Direction::Asc)
    }

    /// Descending criterion for `column`.
    pub fn desc(column: impl Into<String>) -> Self {
        SortKey::new(column, Direction::Desc)
    }

    /// The column this criterion sorts on.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// The sort direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.split_once('|') {
            None => Ok(SortKey::asc(s)),
            Some((column, direction)) => Ok(SortKey::new(column, direction.parse()?)),
        }
    }
}

/// A registered total: aggregator plus optional formatter for one column.
struct TotalSpec {
    column: String,
    aggregate: Box<dyn Aggregate>,
    format: Option<Box<dyn Fn(&Value, usize) -> String>>,
}

/// A fixed-width plain-text table.
///
/// Cells accumulate into a pending row; [`new_row`](Table::new_row) commits
/// it. Column order is the first-seen insertion order of keys across all
/// rows. Every mutator returns `&mut Self` for chaining.
///
/// # Example
///
/// ```rust
/// use lineup::Table;
///
/// let mut t = Table::new();
/// t.cell("First column", "11").cell("Second column", "12").new_row();
/// t.cell("First column", "21").cell("Second column", "22").new_row();
///
/// assert_eq!(
///     t.to_string(),
///     "First column  Second column\n\
///      ------------  -------------\n\
///      11            12           \n\
///      21            22           \n"
/// );
/// ```
pub struct Table {
    separator: String,
    pub(crate) columns: Vec<String>,
    pub(crate) rows: Vec<Row>,
    pending: Row,
    totals: Vec<TotalSpec>,
}

impl Default for Table {
    fn default() -> Self {
        Table::new()
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("separator", &self.separator)
            .field("columns", &self.columns)
            .field("rows", &self.rows.len())
            .field("pending_cells", &self.pending.cells.len())
            .field("totals", &self.totals.len())
            .finish()
    }
}

impl Table {
    /// Create an empty table with the default two-space separator.
    pub fn new() -> Self {
        Table::with_separator(SHIFT)
    }

    /// Create an empty table with a custom column separator.
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Table {
            separator: separator.into(),
            columns: Vec::new(),
            rows: Vec::new(),
            pending: Row::default(),
            totals: Vec::new(),
        }
    }

    /// The column separator string.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Column keys in first-seen insertion order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The committed rows, in current order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Insert or overwrite a cell in the pending row, using the default
    /// renderer. Unseen keys are appended to the column order.
    pub fn cell(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.cell_with(key, Cell::new(value))
    }

    /// Insert or overwrite a fully configured cell in the pending row.
    pub fn cell_with(&mut self, key: impl Into<String>, cell: Cell) -> &mut Self {
        let key = key.into();
        self.register_column(&key);
        self.pending.insert(key, cell);
        self
    }

    /// Commit the pending row and start a fresh one.
    pub fn new_row(&mut self) -> &mut Self {
        let row = mem::take(&mut self.pending);
        self.rows.push(row);
        self
    }

    /// Sort committed rows by string criteria (`"key"`, `"key|asc"`,
    /// `"key|des"`). Earlier criteria take priority; ties fall through to
    /// later ones. Fails fast on an unknown direction token.
    pub fn sort<I, S>(&mut self, criteria: I) -> Result<&mut Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys = criteria
            .into_iter()
            .map(|token| token.as_ref().parse())
            .collect::<Result<Vec<SortKey>, Error>>()?;
        Ok(self.sort_by(&keys))
    }

    /// Sort committed rows by pre-parsed criteria. The sort is stable and
    /// mutates row order in place.
    pub fn sort_by(&mut self, keys: &[SortKey]) -> &mut Self {
        self.rows.sort_by(|a, b| {
            for key in keys {
                let va = a.get(&key.column).unwrap_or(&Value::Missing);
                let vb = b.get(&key.column).unwrap_or(&Value::Missing);
                let mut ord = compare(va, vb);
                if key.direction == Direction::Desc {
                    ord = ord.reverse();
                }
                if ord != std::cmp::Ordering::Equal {
                    return ord;
                }
            }
            std::cmp::Ordering::Equal
        });
        self
    }

    /// Register the default (sum) total for a column.
    pub fn total(&mut self, key: impl Into<String>) -> &mut Self {
        self.total_with(key, Sum)
    }

    /// Register a total with a custom aggregator.
    pub fn total_with(&mut self, key: impl Into<String>, aggregate: impl Aggregate + 'static) -> &mut Self {
        self.push_total(key.into(), Box::new(aggregate), None)
    }

    /// Register a total with a custom aggregator and formatter. The
    /// formatter receives the aggregate result and the resolved column
    /// width; its output is placed on the totals line as-is.
    pub fn total_format<A, F>(&mut self, key: impl Into<String>, aggregate: A, format: F) -> &mut Self
    where
        A: Aggregate + 'static,
        F: Fn(&Value, usize) -> String + 'static,
    {
        self.push_total(key.into(), Box::new(aggregate), Some(Box::new(format)))
    }

    fn push_total(
        &mut self,
        column: String,
        aggregate: Box<dyn Aggregate>,
        format: Option<Box<dyn Fn(&Value, usize) -> String>>,
    ) -> &mut Self {
        self.register_column(&column);
        self.totals.push(TotalSpec {
            column,
            aggregate,
            format,
        });
        self
    }

    /// Render the full table: header line, dash separator, data rows, and
    /// the totals block when totals are registered. Every line ends with a
    /// newline.
    pub fn render(&self) -> String {
        if self.columns.is_empty() {
            return String::new();
        }

        let widths = self.resolve_widths();
        let mut lines = vec![self.header_line(&widths), self.dash_line(&widths)];
        self.push_body(&mut lines, &widths);
        join_lines(lines)
    }

    /// Render data rows only (plus the totals block when registered),
    /// without header or dash lines. Columns are sized to content alone.
    pub fn print(&self) -> String {
        if self.columns.is_empty() {
            return String::new();
        }

        let widths = self.resolve_data_widths();
        let mut lines = Vec::with_capacity(self.rows.len());
        self.push_body(&mut lines, &widths);
        join_lines(lines)
    }

    /// Render one line per column: the key, then every row's raw
    /// stringified value, all joined by `separator`. No padding is applied.
    pub fn print_transposed(&self, separator: &str) -> String {
        let mut lines = Vec::with_capacity(self.columns.len());
        for key in &self.columns {
            let mut parts = vec![key.clone()];
            for row in &self.rows {
                parts.push(row.get(key).map(Value::to_string).unwrap_or_default());
            }
            lines.push(parts.join(separator));
        }
        join_lines(lines)
    }

    fn register_column(&mut self, key: &str) {
        if !self.columns.iter().any(|k| k == key) {
            self.columns.push(key.to_string());
        }
    }

    fn header_line(&self, widths: &ResolvedWidths) -> String {
        let cells: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, key)| {
                let width = widths.get(i).unwrap_or(0);
                if display_width(key) > width {
                    truncate_end(key, width, ELLIPSIS)
                } else {
                    pad_right(key, width)
                }
            })
            .collect();
        cells.join(&self.separator)
    }

    fn dash_line(&self, widths: &ResolvedWidths) -> String {
        let cells: Vec<String> = widths.widths.iter().map(|w| "-".repeat(*w)).collect();
        cells.join(&self.separator)
    }

    fn push_body(&self, lines: &mut Vec<String>, widths: &ResolvedWidths) {
        for row in &self.rows {
            lines.push(self.format_row(row, widths));
        }
        if !self.totals.is_empty() {
            lines.push(self.dash_line(widths));
            lines.push(self.totals_line(widths));
        }
    }

    fn format_row(&self, row: &Row, widths: &ResolvedWidths) -> String {
        let cells: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, key)| {
                let width = widths.get(i).unwrap_or(0);
                match row.cell(key) {
                    Some(cell) => cell.render().fill(cell.value(), width, row),
                    None => " ".repeat(width),
                }
            })
            .collect();
        cells.join(&self.separator)
    }

    /// One shared trailing line holding every registered column's aggregate.
    /// Formatted totals are padded to the column width but never truncated.
    fn totals_line(&self, widths: &ResolvedWidths) -> String {
        let cells: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, key)| {
                let width = widths.get(i).unwrap_or(0);
                match self.totals.iter().find(|t| &t.column == key) {
                    Some(spec) => {
                        let values: Vec<Value> = self
                            .rows
                            .iter()
                            .map(|row| row.get(key).cloned().unwrap_or(Value::Missing))
                            .collect();
                        let result = spec.aggregate.reduce(&values);
                        let text = match &spec.format {
                            Some(format) => format(&result, width),
                            None => match spec.aggregate.label() {
                                Some(label) => format!("{} {}", label, result),
                                None => result.to_string(),
                            },
                        };
                        if display_width(&text) < width {
                            pad_right(&text, width)
                        } else {
                            text
                        }
                    }
                    None => " ".repeat(width),
                }
            })
            .collect();
        cells.join(&self.separator)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn join_lines(lines: Vec<String>) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggr::Avg;

    fn line(t: &Table, index: usize) -> String {
        t.render().lines().nth(index).unwrap().to_string()
    }

    #[test]
    fn renders_header_dashes_and_rows() {
        let mut t = Table::new();
        t.cell("First column", "11").cell("Second column", "12").new_row();
        t.cell("First column", "21").cell("Second column", "22").new_row();

        assert_eq!(
            t.render(),
            "First column  Second column\n\
             ------------  -------------\n\
             11            12           \n\
             21            22           \n"
        );
    }

    #[test]
    fn print_sizes_columns_to_content() {
        let mut t = Table::new();
        t.cell("First column", "11").cell("Second column", "12").new_row();
        t.cell("First column", "21").cell("Second column", "22").new_row();

        assert_eq!(t.print(), "11  12\n21  22\n");
    }

    #[test]
    fn width_grows_with_new_content() {
        let mut t = Table::new();
        t.cell("col", "").new_row();
        assert_eq!(line(&t, 0), "col");

        t.cell("col", "value").new_row();
        assert_eq!(line(&t, 0), "col  ");
    }

    #[test]
    fn column_order_is_first_seen() {
        let mut t = Table::new();
        t.cell("a", 1).cell("b", 2).new_row();
        t.cell("c", 3).cell("a", 4).new_row();
        assert_eq!(t.columns(), ["a", "b", "c"]);
    }

    #[test]
    fn missing_cells_render_blank() {
        let mut t = Table::new();
        t.cell("a", "x").cell("b", "y").new_row();
        t.cell("b", "z").new_row();

        assert_eq!(line(&t, 3), "   z");
    }

    #[test]
    fn overwriting_a_pending_cell_keeps_one_column() {
        let mut t = Table::new();
        t.cell("a", "first").cell("a", "second").new_row();
        assert_eq!(t.columns(), ["a"]);
        assert_eq!(t.rows()[0].get("a"), Some(&Value::Text("second".into())));
    }

    #[test]
    fn fixed_width_pads_short_values() {
        let mut t = Table::new();
        t.cell_with("col", Cell::new("value").with_width(10)).new_row();
        assert_eq!(line(&t, 2), "value     ");
    }

    #[test]
    fn fixed_width_truncates_long_values() {
        let mut t = Table::new();
        t.cell_with("col", Cell::new("A very long value").with_width(14))
            .new_row();
        assert_eq!(line(&t, 2), "A very long...");
    }

    #[test]
    fn transposed_output() {
        let mut t = Table::new();
        t.cell("c1", 11).cell("c2", 12).new_row();
        t.cell("c1", 21).cell("c2", 22).new_row();

        assert_eq!(t.print_transposed(":"), "c1:11:21\nc2:12:22\n");
    }

    #[test]
    fn empty_table_renders_nothing() {
        let t = Table::new();
        assert_eq!(t.render(), "");
        assert_eq!(t.print(), "");
        assert_eq!(t.print_transposed(":"), "");
    }

    #[test]
    fn sort_ascending_ranks_missing_last() {
        let mut t = Table::new();
        t.cell("a", 2).cell("id", "r1").new_row();
        t.cell("a", Value::Null).cell("id", "r2").new_row();
        t.cell("a", 1).cell("id", "r3").new_row();
        t.cell("a", Value::Missing).cell("id", "r4").new_row();

        t.sort(["a"]).unwrap();
        let ids: Vec<_> = t.rows().iter().map(|r| r.get("id").unwrap().to_string()).collect();
        assert_eq!(ids, ["r3", "r1", "r2", "r4"]);
    }

    #[test]
    fn sort_descending_ranks_missing_first() {
        let mut t = Table::new();
        t.cell("a", 1).cell("id", "r1").new_row();
        t.cell("a", 2).cell("id", "r2").new_row();
        t.cell("a", Value::Null).cell("id", "r3").new_row();
        t.cell("a", Value::Missing).cell("id", "r4").new_row();

        t.sort(["a|des"]).unwrap();
        let ids: Vec<_> = t.rows().iter().map(|r| r.get("id").unwrap().to_string()).collect();
        assert_eq!(ids, ["r4", "r3", "r2", "r1"]);
    }

    #[test]
    fn sort_multi_key_breaks_ties_in_order() {
        let mut t = Table::new();
        t.cell("a", 1).cell("b", 2).cell("id", "r1").new_row();
        t.cell("a", 1).cell("b", 1).cell("id", "r2").new_row();
        t.cell("a", 0).cell("b", 9).cell("id", "r3").new_row();

        t.sort(["a", "b"]).unwrap();
        let ids: Vec<_> = t.rows().iter().map(|r| r.get("id").unwrap().to_string()).collect();
        assert_eq!(ids, ["r3", "r2", "r1"]);
    }

    #[test]
    fn repeated_opposite_sorts_restore_order() {
        let mut t = Table::new();
        t.cell("a", 1).cell("id", "r1").new_row();
        t.cell("a", 1).cell("id", "r2").new_row();
        t.cell("a", 2).cell("id", "r3").new_row();

        t.sort(["a"]).unwrap();
        let first: Vec<_> = t.rows().iter().map(|r| r.get("id").unwrap().to_string()).collect();

        t.sort(["a|des"]).unwrap();
        t.sort(["a|asc"]).unwrap();
        let second: Vec<_> = t.rows().iter().map(|r| r.get("id").unwrap().to_string()).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn sort_rejects_unknown_direction() {
        let mut t = Table::new();
        t.cell("a", 1).new_row();
        let err = t.sort(["a|up"]).unwrap_err();
        assert!(err.to_string().contains("invalid sort key"));
    }

    #[test]
    fn sort_key_token_grammar() {
        assert_eq!("a".parse::<SortKey>().unwrap(), SortKey::asc("a"));
        assert_eq!("a|asc".parse::<SortKey>().unwrap(), SortKey::asc("a"));
        assert_eq!("a|des".parse::<SortKey>().unwrap(), SortKey::desc("a"));
        assert!("a|descending".parse::<SortKey>().is_err());
    }

    #[test]
    fn default_total_sums_the_column() {
        let mut t = Table::new();
        t.cell("a", 1).new_row();
        t.cell("a", 2).new_row();
        t.total("a");

        assert_eq!(line(&t, 5), "∑ 3");
    }

    #[test]
    fn total_with_labelled_aggregator() {
        let mut t = Table::new();
        t.cell("a", 1).new_row();
        t.cell("a", 3).new_row();
        t.total_with("a", Avg);

        assert_eq!(line(&t, 5), "Avg: 2");
    }

    #[test]
    fn total_with_custom_formatter() {
        let mut t = Table::new();
        t.cell("a", 1).new_row();
        t.cell("a", 3).new_row();
        t.total_format("a", Avg, |value, _width| {
            assert_eq!(value, &Value::Float(2.0));
            "Hey!".to_string()
        });

        assert_eq!(line(&t, 5), "Hey!");
    }

    #[test]
    fn totals_share_one_line_across_columns() {
        let mut t = Table::new();
        t.cell("a", 1).cell("b", "x").cell("c", 10).new_row();
        t.cell("a", 2).cell("b", "y").cell("c", 20).new_row();
        t.total("a").total("c");

        // Column b gets blank content on the shared totals line
        assert_eq!(line(&t, 5), "∑ 3     ∑ 30");
    }

    #[test]
    fn totals_are_excluded_from_sorting() {
        let mut t = Table::new();
        t.cell("a", 2).new_row();
        t.cell("a", 1).new_row();
        t.total("a");
        t.sort(["a"]).unwrap();

        assert_eq!(line(&t, 2), "1");
        assert_eq!(line(&t, 3), "2");
        assert_eq!(line(&t, 5), "∑ 3");
    }

    #[test]
    fn renderer_reads_sibling_cells() {
        use crate::render::ClosureRender;

        let mut t = Table::new();
        let mirror = ClosureRender::new(
            |_value, row| row.get("bar").unwrap().to_string(),
            |_value, width, row| pad_right(&row.get("bar").unwrap().to_string(), width),
        );
        t.cell_with("echo", Cell::new(0).with_renderer(mirror))
            .cell("bar", "hi")
            .new_row();

        assert_eq!(line(&t, 2), "hi    hi ");
    }
}
