//! Convenient imports for typical `pgfrag` usage.
//!
//! ```ignore
//! use pgfrag::prelude::*;
//! ```

pub use crate::{
    BindValue, ConditionOptions, FIRST_INDEX, FieldMap, FieldValue, FragError, FragResult,
    Fragment, LimitOffset, RangeSpec, SortOrder, Statement, camel_to_snake, camelcase_keys,
    condition_string, insert_string, limit_offset_string, order_by_string, range_string,
    set_string, snake_to_camel,
};
