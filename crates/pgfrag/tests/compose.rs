//! Multi-clause statements assembled from chained fragments.

use pgfrag::prelude::*;
use pgfrag::{CamelcaseKeys, FragError};
use serde_json::json;

#[test]
fn select_with_condition_range_order_and_page() -> FragResult<()> {
    let filter = FieldMap::new()
        .with("accountId", 42)
        .with("status", vec!["open", "held"])
        .with("archivedAt", FieldValue::Undefined);

    let mut stmt = Statement::new("SELECT id FROM orders");
    let cond = condition_string(&filter, stmt.next_index(), ConditionOptions::default());
    stmt.push_fragment(cond)?;

    let range = range_string(
        &RangeSpec::new("created_at").with_from(1_700_000_000_000_i64).with_to_timestamp(true),
        stmt.next_index(),
    );
    stmt.push(" AND").push_fragment(range)?;
    stmt.push_clause(&order_by_string(["created_at", "id"], SortOrder::Desc));
    stmt.push_fragment(limit_offset_string(
        LimitOffset::new().with_limit(50).with_offset(100),
        stmt.next_index(),
    ))?;

    assert_eq!(
        stmt.sql(),
        "SELECT id FROM orders WHERE account_id = $1 AND status = ANY ($2) \
         AND to_timestamp($3::double precision / 1000) < created_at \
         ORDER BY created_at, id desc LIMIT $4 OFFSET $5"
    );
    assert_eq!(
        stmt.values(),
        &[
            BindValue::Int(42),
            BindValue::Array(vec![BindValue::from("open"), BindValue::from("held")]),
            BindValue::Int(1_700_000_000_000),
            BindValue::Int(50),
            BindValue::Int(100),
        ]
    );
    assert_eq!(stmt.next_index(), 6);
    Ok(())
}

#[test]
fn update_set_then_where() -> FragResult<()> {
    let changes = FieldMap::new()
        .with("displayName", "Ada")
        .with("bio", FieldValue::Null)
        .with("prefs", json!({"theme": "dark"}));
    let key = FieldMap::new().with("userId", 7);

    let set = set_string(&changes, FIRST_INDEX);
    let cond = condition_string(&key, set.next_index, ConditionOptions::new().with_where(true));

    let mut stmt = Statement::new("UPDATE users SET");
    stmt.push_fragment(set)?.push_fragment(cond)?;

    assert_eq!(
        stmt.sql(),
        "UPDATE users SET display_name = $1, bio = $2, prefs = $3 WHERE user_id = $4"
    );
    assert_eq!(stmt.values()[1], BindValue::Null);
    assert_eq!(stmt.values()[2], BindValue::Json(r#"{"theme":"dark"}"#.into()));
    Ok(())
}

#[test]
fn batch_insert_with_returning() -> FragResult<()> {
    let rows: Vec<FieldMap> = (1..=3)
        .map(|i| FieldMap::new().with("orderId", i).with("lineNo", i * 10))
        .collect();

    let mut stmt = Statement::new("INSERT INTO order_lines");
    stmt.push_fragment(insert_string(&rows, stmt.next_index())?)?;
    stmt.push_clause("RETURNING id");

    assert_eq!(
        stmt.sql(),
        "INSERT INTO order_lines (order_id, line_no) \
         VALUES ($1, $2), ($3, $4), ($5, $6) RETURNING id"
    );
    assert_eq!(stmt.values().len(), 6);
    Ok(())
}

#[test]
fn chained_indices_are_contiguous() {
    let a = condition_string(
        &FieldMap::new().with("a", 1).with("b", FieldValue::Null).with("c", 3),
        1,
        ConditionOptions::default(),
    );
    let b = range_string(&RangeSpec::new("ts").with_from(5).with_to(9), a.next_index);
    let c = limit_offset_string(LimitOffset::new().with_limit(10), b.next_index);

    for f in [&a, &b, &c] {
        assert_eq!(f.next_index - f.start(), f.values.len());
    }
    assert_eq!(a.start(), 1);
    assert_eq!(b.start(), a.next_index);
    assert_eq!(c.start(), b.next_index);
    assert_eq!(c.next_index, 6);
}

#[test]
fn fragment_from_stale_index_is_rejected() {
    let mut stmt = Statement::new("SELECT 1 FROM t");
    stmt.push_fragment(condition_string(
        &FieldMap::new().with("a", 1),
        stmt.next_index(),
        ConditionOptions::default(),
    ))
    .unwrap();

    let stale = limit_offset_string(LimitOffset::new().with_limit(1), FIRST_INDEX);
    let err = stmt.push_fragment(stale).unwrap_err();
    assert!(matches!(err, FragError::IndexMismatch { expected: 2, found: 1 }));
}

#[test]
fn rows_from_database_are_camelcased() {
    let rows = vec![
        FieldMap::try_from(json!({
            "user_id": 1,
            "created_at": "2024-01-01",
            "profile": {"display_name": "a"}
        }))
        .unwrap(),
        FieldMap::try_from(json!({"user_id": 2, "created_at": "2024-01-02", "profile": null}))
            .unwrap(),
    ];
    let out = rows.camelcase_keys();
    assert_eq!(out[0].keys().collect::<Vec<_>>(), ["userId", "createdAt", "profile"]);
    assert_eq!(
        serde_json::to_value(&out[0]).unwrap(),
        json!({"userId": 1, "createdAt": "2024-01-01", "profile": {"displayName": "a"}})
    );
    assert!(out[1].get("profile").unwrap().is_null());
}
