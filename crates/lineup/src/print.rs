//! Convenience printers for serializable data.
//!
//! These helpers build a [`Table`] from an array of uniform objects or from
//! a single object's key/value pairs, without manual row construction. Any
//! `serde::Serialize` type works; field order of the serialized object
//! defines column order.

use std::collections::HashMap;
use std::rc::Rc;

use serde::Serialize;

use crate::error::Error;
use crate::render::CellRender;
use crate::table::{Cell, Row, Table};
use crate::util::pad_left;
use crate::value::Value;

/// Per-field overrides for [`print_array`] and [`print_obj`].
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use lineup::{print_array, FieldSpec, NumberRender};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Item {
///     foo: &'static str,
///     number: f64,
/// }
///
/// let rows = [Item { foo: "fooooooooo", number: 1.345 }];
/// let mut spec = HashMap::new();
/// spec.insert("number".to_string(), FieldSpec::new().name("bar").renderer(NumberRender::new(0)));
/// spec.insert("foo".to_string(), FieldSpec::new().width(5));
///
/// assert_eq!(
///     print_array(&rows, &spec).unwrap(),
///     "foo    bar\n\
///      -----  ---\n\
///      fo...    1\n"
/// );
/// ```
#[derive(Default)]
pub struct FieldSpec {
    name: Option<String>,
    width: Option<usize>,
    renderer: Option<Rc<dyn CellRender>>,
}

impl FieldSpec {
    /// Create a spec with no overrides.
    pub fn new() -> Self {
        FieldSpec::default()
    }

    /// Override the displayed column name for this field.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Fix the column width for this field.
    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Attach a custom renderer for this field.
    pub fn renderer(mut self, renderer: impl CellRender + 'static) -> Self {
        self.renderer = Some(Rc::new(renderer));
        self
    }

    fn column_name(&self, key: &str) -> String {
        self.name.clone().unwrap_or_else(|| key.to_string())
    }

    fn cell(&self, value: Value) -> Cell {
        Cell {
            value,
            renderer: self.renderer.clone(),
            width: self.width,
        }
    }
}

/// Render an array of uniform objects as a full table (header, dash
/// separator, data rows). Fails fast when a row does not serialize to an
/// object.
pub fn print_array<T: Serialize>(
    rows: &[T],
    spec: &HashMap<String, FieldSpec>,
) -> Result<String, Error> {
    let mut table = Table::new();

    for item in rows {
        let json = serde_json::to_value(item)?;
        let object = json
            .as_object()
            .ok_or_else(|| Error::UnsupportedData("each row must serialize to an object".into()))?;

        for (key, field) in object {
            match spec.get(key) {
                Some(overrides) => {
                    table.cell_with(overrides.column_name(key), overrides.cell(field.clone().into()))
                }
                None => table.cell(key.as_str(), Value::from(field.clone())),
            };
        }
        table.new_row();
    }

    Ok(table.render())
}

/// Render a single object's key/value pairs as `"key : value"` lines,
/// labels right-aligned to the widest label. No header or dash lines.
pub fn print_obj<T: Serialize>(obj: &T, spec: &HashMap<String, FieldSpec>) -> Result<String, Error> {
    let json = serde_json::to_value(obj)?;
    let object = json
        .as_object()
        .ok_or_else(|| Error::UnsupportedData("expected an object".into()))?;

    // One row holding every field, so renderers can see sibling values
    let mut row = Row::default();
    let mut fields = Vec::with_capacity(object.len());
    for (key, field) in object {
        let label = match spec.get(key) {
            Some(overrides) => overrides.column_name(key),
            None => key.clone(),
        };
        let cell = match spec.get(key) {
            Some(overrides) => overrides.cell(field.clone().into()),
            None => Cell::new(Value::from(field.clone())),
        };
        row.insert(key.clone(), cell);
        fields.push((key.clone(), label));
    }

    let label_width = fields
        .iter()
        .map(|(_, label)| crate::util::display_width(label))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (key, label) in &fields {
        let rendered = match row.cell(key) {
            Some(cell) => cell.render().measure(cell.value(), &row),
            None => String::new(),
        };
        out.push_str(&pad_left(label, label_width));
        out.push_str(" : ");
        out.push_str(&rendered);
        out.push('\n');
    }

    Ok(out)
}
