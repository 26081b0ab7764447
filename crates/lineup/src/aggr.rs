//! Aggregators for total rows.
//!
//! An aggregator reduces a column's ordered values to one summary value.
//! Registered totals render on a single trailing line after the data rows;
//! the default formatting prefixes the aggregator's label when it declares
//! one (`"∑ 3"`, `"Avg: 2"`), else shows the raw result.

use crate::value::{compare, Value};

/// A reducer over a column's values producing one summary value.
pub trait Aggregate {
    /// Display label prefixed to the result by the default total formatting.
    fn label(&self) -> Option<&str> {
        None
    }

    /// Reduce the column's ordered values to a single result.
    fn reduce(&self, values: &[Value]) -> Value;
}

/// Sum of the column's numeric values. The default total aggregator.
///
/// Null and missing values are skipped. The result stays an integer when
/// every summed value is an integer.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sum;

impl Aggregate for Sum {
    fn label(&self) -> Option<&str> {
        Some("∑")
    }

    fn reduce(&self, values: &[Value]) -> Value {
        let mut int_sum: i64 = 0;
        let mut float_sum: f64 = 0.0;
        let mut any_float = false;

        for v in values {
            match v {
                Value::Int(i) => int_sum += i,
                Value::Float(x) => {
                    float_sum += x;
                    any_float = true;
                }
                _ => {}
            }
        }

        if any_float {
            Value::Float(float_sum + int_sum as f64)
        } else {
            Value::Int(int_sum)
        }
    }
}

/// Arithmetic mean of the column's numeric values.
#[derive(Clone, Copy, Debug, Default)]
pub struct Avg;

impl Aggregate for Avg {
    fn label(&self) -> Option<&str> {
        Some("Avg:")
    }

    fn reduce(&self, values: &[Value]) -> Value {
        let numbers: Vec<f64> = values.iter().filter_map(Value::as_f64).collect();
        if numbers.is_empty() {
            return Value::Null;
        }
        Value::Float(numbers.iter().sum::<f64>() / numbers.len() as f64)
    }
}

/// Smallest value in the column, by the sort ordering.
#[derive(Clone, Copy, Debug, Default)]
pub struct Min;

impl Aggregate for Min {
    fn reduce(&self, values: &[Value]) -> Value {
        values
            .iter()
            .filter(|v| !v.is_missing())
            .min_by(|a, b| compare(a, b))
            .cloned()
            .unwrap_or(Value::Null)
    }
}

/// Largest value in the column, by the sort ordering.
#[derive(Clone, Copy, Debug, Default)]
pub struct Max;

impl Aggregate for Max {
    fn reduce(&self, values: &[Value]) -> Value {
        values
            .iter()
            .filter(|v| !v.is_missing())
            .max_by(|a, b| compare(a, b))
            .cloned()
            .unwrap_or(Value::Null)
    }
}

/// Number of non-missing values in the column.
#[derive(Clone, Copy, Debug, Default)]
pub struct Count;

impl Aggregate for Count {
    fn reduce(&self, values: &[Value]) -> Value {
        Value::Int(values.iter().filter(|v| !v.is_missing()).count() as i64)
    }
}
