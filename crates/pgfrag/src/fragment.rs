//! The fragment type shared by all builders.

use crate::bind::BindValue;
use std::fmt;
use tokio_postgres::types::ToSql;

/// The first placeholder index of a statement (`$1`).
pub const FIRST_INDEX: usize = 1;

/// A piece of SQL text with its bound values.
///
/// `values[i]` binds placeholder `$(start + i)`, and `next_index` is the first
/// index the fragment did not use, i.e. `start + values.len()`. Pass
/// `next_index` as the `start` of the next builder call to keep numbering
/// contiguous across clauses.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct Fragment<V = BindValue> {
    pub text: String,
    pub next_index: usize,
    pub values: Vec<V>,
}

impl<V> Fragment<V> {
    /// An empty fragment that consumes no placeholders.
    pub fn empty(start: usize) -> Self {
        Self {
            text: String::new(),
            next_index: start,
            values: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The index of the fragment's first placeholder.
    ///
    /// Saturates at 0 for a hand-built fragment with more values than
    /// `next_index` allows.
    pub fn start(&self) -> usize {
        self.next_index.saturating_sub(self.values.len())
    }

    /// Re-encode the bound values, keeping text and numbering.
    pub fn map_values<U>(self, f: impl FnMut(V) -> U) -> Fragment<U> {
        Fragment {
            text: self.text,
            next_index: self.next_index,
            values: self.values.into_iter().map(f).collect(),
        }
    }

    pub fn into_parts(self) -> (String, usize, Vec<V>) {
        (self.text, self.next_index, self.values)
    }
}

impl Fragment<BindValue> {
    /// Bound values as references for `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.values
            .iter()
            .map(|v| v as &(dyn ToSql + Sync))
            .collect()
    }
}

impl<V> fmt::Display for Fragment<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Append `$index` to `out`.
pub(crate) fn push_placeholder(out: &mut String, index: usize) {
    out.push('$');
    out.push_str(&index.to_string());
}

/// `($start, $start+1, ...)` with `count` placeholders.
pub(crate) fn placeholder_group(start: usize, count: usize) -> String {
    let mut out = String::with_capacity(2 + count * 4);
    out.push('(');
    for i in 0..count {
        if i > 0 {
            out.push_str(", ");
        }
        push_placeholder(&mut out, start + i);
    }
    out.push(')');
    out
}
