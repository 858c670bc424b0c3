//! # pgfrag
//!
//! Parameterized PostgreSQL clause fragments from application field maps.
//!
//! Each builder turns a camelCase [`FieldMap`] (or a small spec struct) into a
//! [`Fragment`]: SQL text with `$n` placeholders, the values bound to them,
//! and the next free placeholder index. Thread `next_index` into the next
//! builder's `start` and placeholders stay contiguous across clauses.
//!
//! ## Features
//!
//! - **Conditions**: `WHERE a = $1 AND b = ANY ($2)` from a field map
//! - **Updates**: `a = $1, b = $2` SET lists that keep explicit NULLs
//! - **Inserts**: single-row and validated batch `VALUES` lists
//! - **Pagination and ranges**: `LIMIT/OFFSET`, open range predicates with
//!   optional `to_timestamp` wrapping
//! - **Casing**: camelCase keys in, snake_case columns out, and back again for
//!   rows read from the database
//! - **Binding**: bound values implement `tokio_postgres`'s `ToSql`
//!
//! Column and table names are emitted verbatim; only values are parameterized.
//!
//! ## Example
//!
//! ```ignore
//! use pgfrag::prelude::*;
//!
//! let filter = FieldMap::new().with("accountId", 42).with("status", vec!["open", "held"]);
//!
//! let mut stmt = Statement::new("SELECT id, created_at FROM orders");
//! stmt.push_fragment(condition_string(&filter, stmt.next_index(), ConditionOptions::default()))?;
//! stmt.push_clause(&order_by_string("created_at", SortOrder::Desc));
//! stmt.push_fragment(limit_offset_string(LimitOffset::new().with_limit(50), stmt.next_index()))?;
//!
//! assert_eq!(
//!     stmt.sql(),
//!     "SELECT id, created_at FROM orders WHERE account_id = $1 AND status = ANY ($2) \
//!      ORDER BY created_at desc LIMIT $3"
//! );
//! let rows = client.query(stmt.sql(), &stmt.params_ref()).await?;
//! ```

/// Emit a trace event for a built fragment (no-op without the `tracing` feature).
macro_rules! trace_fragment {
    ($clause:expr, $fragment:expr) => {
        #[cfg(feature = "tracing")]
        {
            let fragment = &$fragment;
            tracing::trace!(
                target: "pgfrag.fragment",
                clause = $clause,
                start = fragment.start(),
                next_index = fragment.next_index,
                value_count = fragment.values.len(),
                sql = %fragment.text,
                "built fragment"
            );
        }
    };
}

pub mod bind;
pub mod casing;
pub mod clause;
pub mod error;
pub mod fragment;
pub mod prelude;
pub mod statement;
pub mod value;

pub use bind::BindValue;
pub use casing::{CamelcaseKeys, camel_to_snake, camelcase_keys, snake_to_camel};
pub use clause::{
    ConditionOptions, InsertRows, LimitOffset, OrderColumns, RangeBound, RangeSpec,
    SerializeOptions, SortOrder, condition_string, insert_string, limit_offset_string,
    object_to_string, order_by_string, range_string, set_string,
};
pub use error::{FragError, FragResult};
pub use fragment::{FIRST_INDEX, Fragment};
pub use statement::Statement;
pub use value::{FieldMap, FieldValue};
