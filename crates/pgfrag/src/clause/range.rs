use crate::bind::BindValue;
use crate::fragment::{FIRST_INDEX, Fragment};
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;

/// Length of a millisecond Unix timestamp in the current era (e.g.
/// `1700000000000`).
const MS_EPOCH_LEN: usize = 13;

/// One end of a [`RangeSpec`].
#[derive(Debug, Clone, PartialEq)]
pub enum RangeBound {
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl RangeBound {
    /// `0`, `NaN` and `""` count as absent bounds.
    fn is_present(&self) -> bool {
        match self {
            Self::Int(i) => *i != 0,
            Self::Float(f) => *f != 0.0 && !f.is_nan(),
            Self::Text(s) => !s.is_empty(),
            Self::Timestamp(_) => true,
        }
    }

    fn to_bind(&self) -> BindValue {
        match self {
            Self::Int(i) => BindValue::Int(*i),
            Self::Float(f) => BindValue::Float(*f),
            Self::Text(s) => BindValue::Text(s.clone()),
            Self::Timestamp(ts) => BindValue::Timestamp(*ts),
        }
    }
}

impl fmt::Display for RangeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
            Self::Timestamp(ts) => f.write_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }
}

impl From<i32> for RangeBound {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for RangeBound {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for RangeBound {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for RangeBound {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for RangeBound {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<DateTime<Utc>> for RangeBound {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Timestamp(v)
    }
}

/// An open interval over one column: `from < column < to`.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSpec {
    pub from: Option<RangeBound>,
    pub to: Option<RangeBound>,
    /// Trusted column name, emitted verbatim.
    pub column: String,
    /// Wrap placeholders in `to_timestamp(...)`.
    pub to_timestamp: bool,
}

impl RangeSpec {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            from: None,
            to: None,
            column: column.into(),
            to_timestamp: false,
        }
    }

    pub fn with_from(mut self, from: impl Into<RangeBound>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn with_to(mut self, to: impl Into<RangeBound>) -> Self {
        self.to = Some(to.into());
        self
    }

    pub fn with_to_timestamp(mut self, to_timestamp: bool) -> Self {
        self.to_timestamp = to_timestamp;
        self
    }

    /// Whether the bounds look like millisecond epochs: either bound renders
    /// to exactly 13 characters.
    fn is_millis(&self) -> bool {
        [&self.from, &self.to]
            .into_iter()
            .flatten()
            .any(|bound| bound.to_string().chars().count() == MS_EPOCH_LEN)
    }

    fn placeholder(&self, index: usize, millis: bool) -> String {
        match (self.to_timestamp, millis) {
            (false, _) => format!("${index}"),
            (true, true) => format!("to_timestamp(${index}::double precision / 1000)"),
            (true, false) => format!("to_timestamp(${index})"),
        }
    }
}

/// Build an exclusive range predicate over `spec.column`.
///
/// - both bounds: `$1 < col AND col < $2`
/// - only `from`: `$1 < col`
/// - only `to`: `col < $1`
/// - neither: empty
///
/// A non-empty result is prefixed with `WHERE ` when `start` is
/// [`FIRST_INDEX`]. With `to_timestamp`, placeholders are wrapped in
/// `to_timestamp($n)`, or `to_timestamp($n::double precision / 1000)` when
/// either bound is 13 characters long.
pub fn range_string(spec: &RangeSpec, start: usize) -> Fragment {
    let from = spec.from.as_ref().filter(|b| b.is_present());
    let to = spec.to.as_ref().filter(|b| b.is_present());
    let millis = spec.is_millis();
    let column = &spec.column;

    let (predicate, values) = match (from, to) {
        (Some(from), Some(to)) => (
            format!(
                "{} < {column} AND {column} < {}",
                spec.placeholder(start, millis),
                spec.placeholder(start + 1, millis)
            ),
            vec![from.to_bind(), to.to_bind()],
        ),
        (Some(from), None) => (
            format!("{} < {column}", spec.placeholder(start, millis)),
            vec![from.to_bind()],
        ),
        (None, Some(to)) => (
            format!("{column} < {}", spec.placeholder(start, millis)),
            vec![to.to_bind()],
        ),
        (None, None) => return Fragment::empty(start),
    };

    let text = if start == FIRST_INDEX {
        format!("WHERE {predicate}")
    } else {
        predicate
    };

    let fragment = Fragment {
        text,
        next_index: start + values.len(),
        values,
    };
    trace_fragment!("range", fragment);
    fragment
}
