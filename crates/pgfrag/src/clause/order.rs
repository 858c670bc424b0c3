use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort direction for [`order_by_string`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Column input for [`order_by_string`]: a single column or a sequence.
///
/// An empty single column yields no columns; sequence entries are taken as
/// given.
pub trait OrderColumns {
    fn order_columns(&self) -> Vec<&str>;
}

impl OrderColumns for str {
    fn order_columns(&self) -> Vec<&str> {
        if self.is_empty() { Vec::new() } else { vec![self] }
    }
}

impl OrderColumns for String {
    fn order_columns(&self) -> Vec<&str> {
        self.as_str().order_columns()
    }
}

impl<S: AsRef<str>> OrderColumns for [S] {
    fn order_columns(&self) -> Vec<&str> {
        self.iter().map(AsRef::as_ref).collect()
    }
}

impl<S: AsRef<str>> OrderColumns for Vec<S> {
    fn order_columns(&self) -> Vec<&str> {
        self.as_slice().order_columns()
    }
}

impl<S: AsRef<str>, const N: usize> OrderColumns for [S; N] {
    fn order_columns(&self) -> Vec<&str> {
        self.as_slice().order_columns()
    }
}

impl<T: OrderColumns + ?Sized> OrderColumns for &T {
    fn order_columns(&self) -> Vec<&str> {
        (**self).order_columns()
    }
}

/// Build `ORDER BY <columns> <direction>`, or an empty string when there are
/// no columns. Column names are trusted and emitted verbatim.
pub fn order_by_string(columns: impl OrderColumns, order: SortOrder) -> String {
    let columns = columns.order_columns();
    if columns.is_empty() {
        return String::new();
    }
    format!("ORDER BY {} {order}", columns.join(", "))
}
