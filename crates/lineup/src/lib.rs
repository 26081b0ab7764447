//! # Lineup - Aligned Plain-Text Tables
//!
//! `lineup` renders tabular data as fixed-width, aligned plain-text output
//! for terminal display. Cells are inserted row by row, each optionally
//! carrying a custom renderer or a fixed column width; rendering negotiates
//! one width per column from header labels and measured content, then fills
//! every cell to exactly that width.
//!
//! ## Core Concepts
//!
//! - [`Table`]: chainable cell insertion, row commits, rendering, sorting,
//!   and totals
//! - [`Cell`]: a value plus optional renderer and width override
//! - [`CellRender`]: the two-pass renderer contract - `measure` to size the
//!   column, `fill` to produce the final width-constrained text
//! - [`aggr`]: aggregators (`Sum`, `Avg`, ...) for trailing total rows
//! - [`print_array`] / [`print_obj`]: render serializable data without
//!   manual row building
//!
//! ## Quick Start
//!
//! ```rust
//! use lineup::Table;
//!
//! let mut t = Table::new();
//! t.cell("id", 1).cell("name", "first item").new_row();
//! t.cell("id", 2).cell("name", "second").new_row();
//!
//! assert_eq!(
//!     t.to_string(),
//!     "id  name      \n\
//!      --  ----------\n\
//!      1   first item\n\
//!      2   second    \n"
//! );
//! ```
//!
//! ## Sorting and Totals
//!
//! Committed rows can be re-ordered by multi-key criteria, and columns can
//! carry an aggregate rendered on a trailing totals line:
//!
//! ```rust
//! use lineup::Table;
//!
//! let mut t = Table::new();
//! t.cell("count", 3).cell("day", "tue").new_row();
//! t.cell("count", 1).cell("day", "mon").new_row();
//! t.sort(["day"]).unwrap().total("count");
//!
//! assert_eq!(
//!     t.to_string(),
//!     "count  day\n\
//!      -----  ---\n\
//!      1      mon\n\
//!      3      tue\n\
//!      -----  ---\n\
//!      ∑ 4       \n"
//! );
//! ```
//!
//! Missing values rank after real ones when sorting: real value, then
//! explicit null, then never-set, for ascending order (reversed for
//! descending).
//!
//! ## Custom Renderers
//!
//! A renderer is asked twice per cell per render: once to measure, once to
//! fill. Both calls receive the owning row, so a renderer may inspect
//! sibling cells:
//!
//! ```rust
//! use lineup::{Cell, ClosureRender, Table, pad_left};
//!
//! let mut t = Table::new();
//! let right = ClosureRender::new(
//!     |value, _row| value.to_string(),
//!     |value, width, _row| pad_left(&value.to_string(), width),
//! );
//! t.cell_with("n", Cell::new(7).with_renderer(right)).new_row();
//! ```

pub mod aggr;
mod error;
mod print;
mod render;
mod resolve;
mod table;
mod util;
mod value;

pub use error::Error;
pub use print::{print_array, print_obj, FieldSpec};
pub use render::{CellRender, ClosureRender, NumberRender, TextRender};
pub use resolve::ResolvedWidths;
pub use table::{Cell, Direction, Row, SortKey, Table};
pub use util::{display_width, pad_left, pad_right, truncate_end};
pub use value::Value;
