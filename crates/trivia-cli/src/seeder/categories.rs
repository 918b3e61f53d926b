//! Category seeding.

use sqlx::PgPool;
use std::collections::HashMap;
use std::time::Instant;
use trivia_models::CategoryId;

use super::models::STANDARD_CATEGORIES;

/// Inserts any standard category that is missing and returns every standard
/// category's id keyed by name.
pub async fn seed_categories(db: &PgPool) -> Result<HashMap<String, CategoryId>, sqlx::Error> {
    let start_time = Instant::now();
    println!("📚 Seeding {} categories...", STANDARD_CATEGORIES.len());

    let mut tx = db.begin().await?;
    let mut created = 0;

    for name in STANDARD_CATEGORIES {
        let inserted = sqlx::query(
            r#"INSERT INTO categories (type)
               SELECT $1::text
               WHERE NOT EXISTS (SELECT 1 FROM categories WHERE type = $1)"#,
        )
        .bind(name)
        .execute(&mut *tx)
        .await?;

        created += inserted.rows_affected();
    }

    tx.commit().await?;

    let ids = category_ids(db).await?;

    println!(
        "   ✓ Inserted {} categories ({} already present) in {:?}",
        created,
        STANDARD_CATEGORIES.len() as u64 - created,
        start_time.elapsed()
    );

    Ok(ids)
}

/// Every category id keyed by name. Duplicate names resolve to the lowest id.
pub async fn category_ids(db: &PgPool) -> Result<HashMap<String, CategoryId>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (CategoryId, String)>(
        "SELECT id, type FROM categories ORDER BY id DESC",
    )
    .fetch_all(db)
    .await?;

    Ok(rows.into_iter().map(|(id, name)| (name, id)).collect())
}

pub async fn clear_categories(db: &PgPool) -> Result<u64, sqlx::Error> {
    let start_time = Instant::now();
    println!("🗑️  Clearing categories...");

    let result = sqlx::query("DELETE FROM categories")
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} categories in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}
