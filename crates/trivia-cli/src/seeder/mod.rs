//! Database seeding.
//!
//! Categories are seeded first; questions are resolved against the
//! category ids the database hands back.

pub mod categories;
pub mod models;
pub mod questions;

use sqlx::PgPool;
use std::time::Instant;
use trivia_models::CategoryId;

pub use models::{QuestionSeed, STANDARD_CATEGORIES, SeedConfig};

/// What a seeding run inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories: usize,
    pub questions: usize,
}

/// Seeds the standard categories, then the bundled and generated questions.
pub async fn seed_all(db: &PgPool, config: SeedConfig) -> Result<SeedSummary, sqlx::Error> {
    let start_time = Instant::now();
    println!("🌱 Seeding database...\n");

    let category_ids = categories::seed_categories(db).await?;

    let mut seeds = if config.include_samples {
        questions::sample_questions(&category_ids)
    } else {
        Vec::new()
    };

    let mut standard: Vec<CategoryId> = STANDARD_CATEGORIES
        .iter()
        .filter_map(|name| category_ids.get(*name).copied())
        .collect();
    standard.sort();
    seeds.extend(questions::generate_questions(
        &standard,
        config.generated_questions,
    ));

    let inserted = questions::seed_questions(db, &seeds).await?;

    println!("\n✅ Seeding complete in {:?}", start_time.elapsed());

    Ok(SeedSummary {
        categories: category_ids.len(),
        questions: inserted.len(),
    })
}

/// Deletes every question, then every category.
pub async fn clear_all(db: &PgPool) -> Result<(u64, u64), sqlx::Error> {
    let start_time = Instant::now();
    println!("🧹 Clearing trivia data...\n");

    let questions = questions::clear_questions(db).await?;
    let categories = categories::clear_categories(db).await?;

    println!("\n✅ Cleared in {:?}", start_time.elapsed());

    Ok((questions, categories))
}
