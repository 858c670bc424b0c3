use crate::bind::BindValue;
use crate::fragment::{Fragment, push_placeholder};

/// Pagination input for [`limit_offset_string`].
///
/// A value of `0` counts as absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LimitOffset {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl LimitOffset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Build `LIMIT $n` and/or ` OFFSET $m`.
///
/// The offset clause always carries its leading space, even without a limit,
/// so the result can be appended directly after the previous clause.
pub fn limit_offset_string(page: LimitOffset, start: usize) -> Fragment {
    let mut text = String::new();
    let mut values = Vec::new();

    if let Some(limit) = page.limit.filter(|v| *v != 0) {
        text.push_str("LIMIT ");
        push_placeholder(&mut text, start + values.len());
        values.push(BindValue::Int(limit));
    }

    if let Some(offset) = page.offset.filter(|v| *v != 0) {
        text.push_str(" OFFSET ");
        push_placeholder(&mut text, start + values.len());
        values.push(BindValue::Int(offset));
    }

    let fragment = Fragment {
        text,
        next_index: start + values.len(),
        values,
    };
    trace_fragment!("limit_offset", fragment);
    fragment
}
