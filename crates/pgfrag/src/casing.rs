//! Identifier casing between application field names and database columns.
//!
//! - [`camel_to_snake`]: `userId` → `user_id`
//! - [`snake_to_camel`]: `_user_id_` → `userId`
//! - [`camelcase_keys`]: recursively camelCase every key of a map (or of each
//!   map in a sequence), e.g. for rows read back from the database.
//!
//! Only ASCII letters take part in the conversion. `snake_to_camel` is the
//! inverse of `camel_to_snake` for lower-camelCase identifiers made of letters;
//! it is not a general snake_case parser. Digits after an underscore keep the
//! underscore (`v_1` stays `v_1`) and repeated underscores collapse only once
//! (`a__b` → `a_B`).

use crate::value::{FieldMap, FieldValue};

/// Convert a camelCase identifier to snake_case.
///
/// Every ASCII uppercase letter becomes `_` followed by its lowercase form.
pub fn camel_to_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Convert a snake_case identifier to camelCase.
///
/// Leading and trailing underscore runs are stripped, then every `_x` pair
/// (x an ASCII letter) becomes uppercase `x`.
pub fn snake_to_camel(name: &str) -> String {
    let trimmed = name.trim_matches('_');
    let mut out = String::with_capacity(trimmed.len());
    let mut chars = trimmed.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '_' {
            if let Some(&next) = chars.peek() {
                if next.is_ascii_alphabetic() {
                    out.push(next.to_ascii_uppercase());
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

/// Types whose keys can be recursively converted to camelCase.
///
/// Implemented for a single [`FieldMap`] and for sequences of maps.
pub trait CamelcaseKeys {
    type Output;

    fn camelcase_keys(&self) -> Self::Output;
}

impl CamelcaseKeys for FieldMap {
    type Output = FieldMap;

    fn camelcase_keys(&self) -> FieldMap {
        camelcase_map(self)
    }
}

impl CamelcaseKeys for [FieldMap] {
    type Output = Vec<FieldMap>;

    fn camelcase_keys(&self) -> Vec<FieldMap> {
        self.iter().map(camelcase_map).collect()
    }
}

impl CamelcaseKeys for Vec<FieldMap> {
    type Output = Vec<FieldMap>;

    fn camelcase_keys(&self) -> Vec<FieldMap> {
        self.as_slice().camelcase_keys()
    }
}

/// Recursively convert every key of a map (or of each map in a sequence) to
/// camelCase, returning a new structure.
///
/// Nested maps are converted, as are maps directly inside arrays. Any other
/// value, including arrays nested in arrays, is copied unchanged. When two
/// keys convert to the same name the first position and the last value win.
pub fn camelcase_keys<T: CamelcaseKeys + ?Sized>(input: &T) -> T::Output {
    input.camelcase_keys()
}

fn camelcase_map(map: &FieldMap) -> FieldMap {
    let mut out = FieldMap::with_capacity(map.len());
    for (key, value) in map.iter() {
        out.insert(snake_to_camel(key), camelcase_value(value));
    }
    out
}

fn camelcase_value(value: &FieldValue) -> FieldValue {
    match value {
        FieldValue::Map(map) => FieldValue::Map(camelcase_map(map)),
        FieldValue::Array(items) => FieldValue::Array(
            items
                .iter()
                .map(|item| match item {
                    FieldValue::Map(map) => FieldValue::Map(camelcase_map(map)),
                    other => other.clone(),
                })
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_to_snake_basic() {
        assert_eq!(camel_to_snake("userId"), "user_id");
        assert_eq!(camel_to_snake("createdAtUtc"), "created_at_utc");
        assert_eq!(camel_to_snake("plain"), "plain");
    }

    #[test]
    fn camel_to_snake_leaves_non_letters() {
        assert_eq!(camel_to_snake("address2Line"), "address2_line");
        assert_eq!(camel_to_snake("a.bC"), "a.b_c");
    }

    #[test]
    fn camel_to_snake_leading_upper() {
        assert_eq!(camel_to_snake("UserId"), "_user_id");
    }

    #[test]
    fn snake_to_camel_strips_outer_underscores() {
        assert_eq!(snake_to_camel("_user_id_"), "userId");
        assert_eq!(snake_to_camel("__a_b__"), "aB");
        assert_eq!(snake_to_camel("___"), "");
    }

    #[test]
    fn snake_to_camel_limitations() {
        assert_eq!(snake_to_camel("v_1"), "v_1");
        assert_eq!(snake_to_camel("a__b"), "a_B");
        assert_eq!(snake_to_camel("a_B"), "aB");
    }

    #[test]
    fn round_trip_camel_identifiers() {
        for ident in ["id", "userId", "createdAtUtc", "aBC", "x"] {
            assert_eq!(snake_to_camel(&camel_to_snake(ident)), ident);
        }
    }

    #[test]
    fn camelcase_keys_recurses_maps_and_map_arrays() {
        let input = FieldMap::new()
            .with("asdf_dsf", 123)
            .with(
                "dd_dd",
                FieldMap::new().with("wer_wer", "sfds_sdf").with("d_e", 2),
            )
            .with(
                "fd_df",
                vec![
                    FieldValue::Map(FieldMap::new().with("wer_wer", vec![1, 3])),
                    FieldValue::Int(7),
                    FieldValue::Array(vec![FieldValue::Map(FieldMap::new().with("in_ner", 1))]),
                ],
            );

        let out = camelcase_keys(&input);
        assert_eq!(out.keys().collect::<Vec<_>>(), ["asdfDsf", "ddDd", "fdDf"]);

        let FieldValue::Map(nested) = out.get("ddDd").unwrap() else {
            panic!("expected map");
        };
        assert_eq!(nested.keys().collect::<Vec<_>>(), ["werWer", "dE"]);
        assert_eq!(nested.get("werWer"), Some(&FieldValue::from("sfds_sdf")));

        let FieldValue::Array(items) = out.get("fdDf").unwrap() else {
            panic!("expected array");
        };
        let FieldValue::Map(first) = &items[0] else {
            panic!("expected map");
        };
        assert!(first.contains_key("werWer"));
        assert_eq!(items[1], FieldValue::Int(7));
        // Arrays inside arrays are left alone.
        let FieldValue::Array(inner) = &items[2] else {
            panic!("expected array");
        };
        let FieldValue::Map(untouched) = &inner[0] else {
            panic!("expected map");
        };
        assert!(untouched.contains_key("in_ner"));
    }

    #[test]
    fn camelcase_keys_sequence() {
        let rows = vec![
            FieldMap::new().with("user_id", 1),
            FieldMap::new().with("user_id", 2),
        ];
        let out = camelcase_keys(&rows);
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].get("userId"), Some(&FieldValue::Int(2)));
        // Input untouched.
        assert!(rows[0].contains_key("user_id"));
    }

    #[test]
    fn camelcase_keys_is_idempotent() {
        let input = FieldMap::new()
            .with("userId", 1)
            .with("profile", FieldMap::new().with("displayName", "x"));
        let once = camelcase_keys(&input);
        assert_eq!(camelcase_keys(&once), once);
        assert_eq!(once, input);
    }

    #[test]
    fn camelcase_keys_collision_keeps_first_position() {
        let input = FieldMap::new()
            .with("user_id", 1)
            .with("other", 2)
            .with("userId", 3);
        let out = camelcase_keys(&input);
        assert_eq!(out.keys().collect::<Vec<_>>(), ["userId", "other"]);
        assert_eq!(out.get("userId"), Some(&FieldValue::Int(3)));
    }
}
