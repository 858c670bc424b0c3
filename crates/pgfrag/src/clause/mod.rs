//! Clause builders.
//!
//! Every builder that binds values takes a `start` index and returns a
//! [`Fragment`](crate::Fragment) whose `next_index` is the `start` for the
//! next call:
//!
//! ```ignore
//! use pgfrag::clause::*;
//!
//! let cond = condition_string(&filter, 1, ConditionOptions::default());
//! let range = range_string(&RangeSpec::new("created_at").with_from(since), cond.next_index);
//! let page = limit_offset_string(LimitOffset::new().with_limit(20), range.next_index);
//! ```

mod assign;
mod insert;
mod limit;
mod order;
mod range;


pub use assign::{
    ConditionOptions, SerializeOptions, condition_string, object_to_string, set_string,
};
pub use insert::{InsertRows, insert_string};
pub use limit::{LimitOffset, limit_offset_string};
pub use order::{OrderColumns, SortOrder, order_by_string};
pub use range::{RangeBound, RangeSpec, range_string};
