use crate::bind::BindValue;
use crate::casing::camel_to_snake;
use crate::fragment::{FIRST_INDEX, Fragment, push_placeholder};
use crate::value::{FieldMap, FieldValue};

/// Options for [`object_to_string`].
///
/// Both flags default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Render array values as `column = ANY ($n)`.
    pub convert_arrays: bool,
    /// Keep `Null` values instead of dropping them.
    pub allow_null: bool,
}

impl SerializeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_convert_arrays(mut self, convert_arrays: bool) -> Self {
        self.convert_arrays = convert_arrays;
        self
    }

    pub fn with_allow_null(mut self, allow_null: bool) -> Self {
        self.allow_null = allow_null;
        self
    }
}

/// Options for [`condition_string`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConditionOptions {
    /// Prefix `WHERE ` even when `start` is not the first index.
    pub with_where: bool,
}

impl ConditionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_where(mut self, with_where: bool) -> Self {
        self.with_where = with_where;
        self
    }
}

/// Serialize a field map into `column = $n` assignments joined by `separator`.
///
/// `Undefined` entries are always dropped, `Null` entries unless
/// `allow_null` is set. Surviving keys keep their order and are converted
/// with [`camel_to_snake`]. Values are returned unconverted.
pub fn object_to_string(
    map: &FieldMap,
    separator: &str,
    start: usize,
    options: SerializeOptions,
) -> Fragment<FieldValue> {
    let mut text = String::new();
    let mut values = Vec::with_capacity(map.len());

    for (key, value) in map.iter() {
        if value.is_undefined() || (value.is_null() && !options.allow_null) {
            continue;
        }
        if !values.is_empty() {
            text.push_str(separator);
        }
        text.push_str(&camel_to_snake(key));

        let index = start + values.len();
        if options.convert_arrays && value.is_array() {
            text.push_str(" = ANY (");
            push_placeholder(&mut text, index);
            text.push(')');
        } else {
            text.push_str(" = ");
            push_placeholder(&mut text, index);
        }
        values.push(value.clone());
    }

    Fragment {
        text,
        next_index: start + values.len(),
        values,
    }
}

/// Build an `AND`-joined equality condition.
///
/// Arrays match with `= ANY ($n)`; `Null` and `Undefined` fields are skipped.
/// The result is prefixed with `WHERE ` when it is non-empty and either
/// `start` is [`FIRST_INDEX`] or `options.with_where` is set.
///
/// ```ignore
/// let filter = FieldMap::new().with("userId", 7).with("role", vec!["admin", "owner"]);
/// let f = condition_string(&filter, 1, ConditionOptions::default());
/// assert_eq!(f.text, "WHERE user_id = $1 AND role = ANY ($2)");
/// ```
pub fn condition_string(map: &FieldMap, start: usize, options: ConditionOptions) -> Fragment {
    let mut fragment = object_to_string(
        map,
        " AND ",
        start,
        SerializeOptions::new().with_convert_arrays(true),
    )
    .map_values(|v| BindValue::plain(&v));

    if !fragment.is_empty() && (start == FIRST_INDEX || options.with_where) {
        fragment.text.insert_str(0, "WHERE ");
    }

    trace_fragment!("condition", fragment);
    fragment
}

/// Build a `SET` assignment list (without the `SET` keyword).
///
/// `Null` fields are kept so columns can be cleared; arrays and maps are
/// bound as JSON text.
pub fn set_string(map: &FieldMap, start: usize) -> Fragment {
    let fragment = object_to_string(map, ", ", start, SerializeOptions::new().with_allow_null(true))
        .map_values(|v| BindValue::json_encoded(&v));

    trace_fragment!("set", fragment);
    fragment
}
