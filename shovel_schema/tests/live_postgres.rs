//! Runs against a real database when SHOVEL_TEST_DATABASE_URL is set.

use shovel_schema::config::DatabaseConfig;
use shovel_schema::db::connection::connect;
use shovel_schema::{diff, migrate, row_estimate, Column, Connection, Table};

async fn pool() -> Option<sqlx::PgPool> {
    let url = std::env::var("SHOVEL_TEST_DATABASE_URL").ok()?;
    let config = DatabaseConfig {
        url,
        pool_size: Some(1),
        timeout_seconds: Some(10),
    };
    Some(connect(&config).await.expect("connect"))
}

#[tokio::test]
async fn table_with_schema() {
    let Some(pg) = pool().await else {
        return;
    };
    pg.execute("drop schema if exists shovel_live_test cascade").await.unwrap();

    let mut table = Table::new("test_table")
        .in_schema("shovel_live_test")
        .column("id", "integer")
        .column("name", "text");
    table.add_unique(&["id"]);

    migrate(&pg, &table).await.unwrap();
    let dd = diff(&pg, &table.name, &table.columns, &table.schema).await.unwrap();
    assert!(dd.is_empty());

    table.add_column(Column::new("age", "integer"));
    migrate(&pg, &table).await.unwrap();
    migrate(&pg, &table).await.unwrap();

    let rows = pg
        .query(
            "select count(*)::text as n from information_schema.columns where table_schema = $1 and table_name = $2",
            &["shovel_live_test", "test_table"],
        )
        .await
        .unwrap();
    assert_eq!(rows[0]["n"], "3");

    assert!(row_estimate(&pg, "test_table").await.value().is_some());

    pg.execute("drop schema shovel_live_test cascade").await.unwrap();
}
