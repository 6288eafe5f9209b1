//! Orders a sequence of records ascending by one dynamically named field.
//!
//! The sequence is reordered in place: the caller's buffer is the result, any other view of it
//! observes the new order. There is deliberately no copying variant.
//!
//! Keys are resolved once per record (see [`crate::key`]), so absent and falsy values take the
//! sentinel, 999 by default, and sort last. Records with equal keys keep their input order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::OrderConfig;
use crate::key;
use crate::record::FieldAccess;
use crate::stable;

/// How two resolved keys are compared.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Comparison {
    /// `a - b`, negative is less, positive is greater, zero and NaN are equal.
    ///
    /// Non-numeric text resolves to NaN and then compares equal to everything, which leaves the
    /// final position of such records dependent on the input order. Only order numeric-like
    /// fields with this mode, or sanitize the values first.
    #[default]
    Subtractive,
    /// Total order over numeric keys, NaN keys after all numeric ones.
    Typed,
}

impl Comparison {
    #[inline]
    pub fn compare(self, a: f64, b: f64) -> Ordering {
        match self {
            Comparison::Subtractive => {
                let diff = a - b;
                if diff < 0.0 {
                    Ordering::Less
                } else if diff > 0.0 {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            }
            Comparison::Typed => match (a.is_nan(), b.is_nan()) {
                (false, false) => a.total_cmp(&b),
                (false, true) => Ordering::Less,
                (true, false) => Ordering::Greater,
                (true, true) => Ordering::Equal,
            },
        }
    }
}

/// Orders `seq` ascending by `field` with the default [`OrderConfig`] and returns it.
pub fn order_by_field<'a, R>(seq: &'a mut [R], field: &str) -> &'a mut [R]
where
    R: FieldAccess,
{
    order_by_field_with(seq, field, &OrderConfig::default())
}

/// Orders `seq` ascending by `field` and returns it.
pub fn order_by_field_with<'a, R>(
    seq: &'a mut [R],
    field: &str,
    config: &OrderConfig,
) -> &'a mut [R]
where
    R: FieldAccess,
{
    tracing::trace!(
        len = seq.len(),
        field,
        comparison = ?config.comparison,
        "ordering by field"
    );

    if seq.len() < 2 {
        return seq;
    }

    let mut entries: Vec<(f64, usize)> = seq
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let key = key::resolve(&record.field_value(field), config.sentinel, config.falsy);
            (key, i)
        })
        .collect();

    let comparison = config.comparison;
    stable::sort_by(&mut entries, |a, b| comparison.compare(a.0, b.0) == Ordering::Less);

    let mut perm: Vec<usize> = entries.into_iter().map(|(_, i)| i).collect();
    stable::apply_permutation(seq, &mut perm);

    seq
}

/// Orders the elements of a JSON array by `field` and returns the same value.
///
/// Anything that is not an array, `null` included, is returned unchanged.
pub fn order_value(value: Value, field: &str) -> Value {
    order_value_with(value, field, &OrderConfig::default())
}

pub fn order_value_with(mut value: Value, field: &str, config: &OrderConfig) -> Value {
    match value.as_array_mut() {
        Some(items) => {
            order_by_field_with(items.as_mut_slice(), field, config);
        }
        None => tracing::debug!(field, "not a sequence, passing through"),
    }

    value
}

/// Orders the sequence if there is one, `None` passes through.
pub fn order_option<'a, R>(seq: Option<&'a mut Vec<R>>, field: &str) -> Option<&'a mut Vec<R>>
where
    R: FieldAccess,
{
    match seq {
        Some(seq) => {
            order_by_field(seq.as_mut_slice(), field);
            Some(seq)
        }
        None => {
            tracing::debug!(field, "no sequence, passing through");
            None
        }
    }
}
