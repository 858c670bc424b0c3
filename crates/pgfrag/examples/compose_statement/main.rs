//! Build a filtered, paginated query and its bound values.
//!
//! Run with:
//!   cargo run --example compose_statement -p pgfrag
//!
//! Set `DATABASE_URL` to also execute it against Postgres.

use pgfrag::prelude::*;
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let request = json!({
        "accountId": 42,
        "status": ["open", "held"],
        "couponCode": null
    });
    let filter = FieldMap::try_from(request)?;

    let mut stmt = Statement::new("SELECT id, account_id, created_at FROM orders");
    stmt.push_fragment(condition_string(&filter, stmt.next_index(), ConditionOptions::default()))?;

    let since = RangeSpec::new("created_at")
        .with_from(1_700_000_000_000_i64)
        .with_to_timestamp(true);
    let range = range_string(&since, stmt.next_index());
    if !range.is_empty() {
        stmt.push(" AND");
        stmt.push_fragment(range)?;
    }

    stmt.push_clause(&order_by_string(["created_at", "id"], SortOrder::Desc));
    stmt.push_fragment(limit_offset_string(
        LimitOffset::new().with_limit(20).with_offset(40),
        stmt.next_index(),
    ))?;

    println!("SQL:    {}", stmt.sql());
    println!("Params: {:?}", stmt.values());

    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        println!("DATABASE_URL not set; not executing");
        return Ok(());
    };

    let (client, connection) = tokio_postgres::connect(&database_url, tokio_postgres::NoTls).await?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            eprintln!("connection error: {e}");
        }
    });

    for row in client.query(stmt.sql(), &stmt.params_ref()).await? {
        let id: i64 = row.get(0);
        println!("order {id}");
    }

    Ok(())
}
