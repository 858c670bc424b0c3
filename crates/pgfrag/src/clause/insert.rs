use crate::bind::BindValue;
use crate::casing::camel_to_snake;
use crate::error::{FragError, FragResult};
use crate::fragment::{Fragment, placeholder_group};
use crate::value::FieldMap;

/// Rows accepted by [`insert_string`]: one map, or a batch of maps.
#[derive(Debug, Clone, Copy)]
pub enum InsertRows<'a> {
    Single(&'a FieldMap),
    Batch(&'a [FieldMap]),
}

impl<'a> From<&'a FieldMap> for InsertRows<'a> {
    fn from(map: &'a FieldMap) -> Self {
        Self::Single(map)
    }
}

impl<'a> From<&'a [FieldMap]> for InsertRows<'a> {
    fn from(rows: &'a [FieldMap]) -> Self {
        Self::Batch(rows)
    }
}

impl<'a> From<&'a Vec<FieldMap>> for InsertRows<'a> {
    fn from(rows: &'a Vec<FieldMap>) -> Self {
        Self::Batch(rows.as_slice())
    }
}

impl<'a, const N: usize> From<&'a [FieldMap; N]> for InsertRows<'a> {
    fn from(rows: &'a [FieldMap; N]) -> Self {
        Self::Batch(rows.as_slice())
    }
}

/// Build `(<columns>) VALUES (<placeholders>)[, (...)]`.
///
/// Single map: every key becomes a column, including `Undefined` ones, which
/// bind as `NULL`. Arrays and maps bind as JSON text.
///
/// Batch: columns come from the first row and every row must have exactly
/// the same keys in the same order. Placeholders continue across rows and
/// values are flattened row by row. `Undefined` binds as `NULL`; arrays stay
/// arrays and maps bind as JSON text.
///
/// # Errors
///
/// [`FragError::EmptyBatch`] for an empty batch and
/// [`FragError::MismatchedRowKeys`] for a row whose keys differ from the first.
pub fn insert_string<'a>(rows: impl Into<InsertRows<'a>>, start: usize) -> FragResult<Fragment> {
    let fragment = match rows.into() {
        InsertRows::Single(map) => single_row(map, start),
        InsertRows::Batch(rows) => batch_rows(rows, start)?,
    };

    trace_fragment!("insert", fragment);
    Ok(fragment)
}

fn column_list(map: &FieldMap) -> String {
    map.keys().map(camel_to_snake).collect::<Vec<_>>().join(", ")
}

fn single_row(map: &FieldMap, start: usize) -> Fragment {
    let text = format!(
        "({}) VALUES {}",
        column_list(map),
        placeholder_group(start, map.len())
    );
    let values: Vec<BindValue> = map.values().map(BindValue::json_encoded).collect();

    Fragment {
        text,
        next_index: start + values.len(),
        values,
    }
}

fn batch_rows(rows: &[FieldMap], start: usize) -> FragResult<Fragment> {
    let Some(first) = rows.first() else {
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "pgfrag.fragment", start, "rejected empty batch insert");
        return Err(FragError::EmptyBatch);
    };

    let columns: Vec<&str> = first.keys().collect();
    let mut text = format!("({}) VALUES ", column_list(first));
    let mut values = Vec::with_capacity(columns.len() * rows.len());
    let mut index = start;

    for (row_index, row) in rows.iter().enumerate() {
        if !row.keys().eq(columns.iter().copied()) {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                target: "pgfrag.fragment",
                row = row_index,
                "rejected batch insert with mismatched row keys"
            );
            return Err(FragError::mismatched_row_keys(
                row_index,
                columns.iter().copied(),
                row.keys(),
            ));
        }
        if row_index > 0 {
            text.push_str(", ");
        }
        text.push_str(&placeholder_group(index, columns.len()));
        index += columns.len();
        values.extend(row.values().map(BindValue::plain));
    }

    Ok(Fragment {
        text,
        next_index: index,
        values,
    })
}
