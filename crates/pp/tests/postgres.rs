#![cfg(feature = "postgres")]

use std::sync::Arc;

use pp::{Dataset, PpResult, c, record};
use tokio_postgres::{NoTls, Row};

#[tokio::test]
async fn postgres_round_trip() -> PpResult<()> {
    dotenvy::dotenv().ok();
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(v) => v,
        Err(_) => {
            eprintln!("DATABASE_URL is not set; skipping postgres_round_trip");
            return Ok(());
        }
    };

    let (client, connection) = tokio_postgres::connect(&database_url, NoTls).await?;
    tokio::spawn(async move {
        let _ = connection.await;
    });
    client
        .batch_execute(
            "CREATE TEMP TABLE pp_items (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                qty BIGINT NOT NULL
            )",
        )
        .await?;

    let db = pp::dialect("postgres").db(Arc::new(client));

    let inserted = db
        .insert("pp_items")
        .rows(vec![
            record! { "name" => "widget", "qty" => 3 },
            record! { "name" => "gadget", "qty" => 5 },
        ])
        .returning("id")
        .prepared(true)
        .executor()
        .query()
        .await?;
    let ids = inserted
        .downcast::<Vec<Row>>()
        .map_err(|_| pp::PpError::new("unexpected row type"))?;
    assert_eq!(ids.len(), 2);

    let updated = db
        .update("pp_items")
        .set(record! { "qty" => 4 })
        .where_(c("name").eq("widget"))
        .prepared(true)
        .executor()
        .exec()
        .await?;
    assert_eq!(updated, 1);

    let rows = db
        .from("pp_items")
        .select(("name", "qty"))
        .where_(c("qty").gte(4))
        .order(c("name").asc())
        .prepared(true)
        .executor()
        .query()
        .await?
        .downcast::<Vec<Row>>()
        .map_err(|_| pp::PpError::new("unexpected row type"))?;
    let found: Vec<(String, i64)> = rows.iter().map(|r| (r.get(0), r.get(1))).collect();
    assert_eq!(
        found,
        vec![("gadget".to_string(), 5), ("widget".to_string(), 4)]
    );

    let deleted = db
        .delete("pp_items")
        .where_(c("qty").lt(10))
        .executor()
        .exec()
        .await?;
    assert_eq!(deleted, 2);
    Ok(())
}
