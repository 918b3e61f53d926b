//! Question seeding: the bundled sample set plus fake questions generated
//! in parallel.

use fake::Fake;
use fake::faker::lorem::en::{Sentence, Words};
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashMap;
use std::time::Instant;
use trivia_models::{CategoryId, QuestionId};

use super::models::{QuestionSeed, SampleQuestion};

const BATCH_SIZE: usize = 500;

pub const SAMPLE_QUESTIONS: &[SampleQuestion] = &[
    SampleQuestion {
        question: "What is the heaviest organ in the human body?",
        answer: "The Liver",
        category: "Science",
        difficulty: 4,
    },
    SampleQuestion {
        question: "Who discovered penicillin?",
        answer: "Alexander Fleming",
        category: "Science",
        difficulty: 3,
    },
    SampleQuestion {
        question: "Hematology is a branch of medicine involving the study of what?",
        answer: "Blood",
        category: "Science",
        difficulty: 4,
    },
    SampleQuestion {
        question: "Which Dutch graphic artist, initials M C, was a creator of optical illusions?",
        answer: "Escher",
        category: "Art",
        difficulty: 1,
    },
    SampleQuestion {
        question: "La Giaconda is better known as what?",
        answer: "Mona Lisa",
        category: "Art",
        difficulty: 3,
    },
    SampleQuestion {
        question: "How many paintings did Van Gogh sell in his lifetime?",
        answer: "One",
        category: "Art",
        difficulty: 4,
    },
    SampleQuestion {
        question: "Which American artist was a pioneer of Abstract Expressionism, and a leading exponent of action painting?",
        answer: "Jackson Pollock",
        category: "Art",
        difficulty: 2,
    },
    SampleQuestion {
        question: "What is the largest lake in Africa?",
        answer: "Lake Victoria",
        category: "Geography",
        difficulty: 2,
    },
    SampleQuestion {
        question: "In which royal palace would you find the Hall of Mirrors?",
        answer: "The Palace of Versailles",
        category: "Geography",
        difficulty: 3,
    },
    SampleQuestion {
        question: "The Taj Mahal is located in which Indian city?",
        answer: "Agra",
        category: "Geography",
        difficulty: 2,
    },
    SampleQuestion {
        question: "Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?",
        answer: "Maya Angelou",
        category: "History",
        difficulty: 2,
    },
    SampleQuestion {
        question: "What boxer's original name is Cassius Clay?",
        answer: "Muhammad Ali",
        category: "History",
        difficulty: 1,
    },
    SampleQuestion {
        question: "Which dung beetle was worshipped by the ancient Egyptians?",
        answer: "Scarab",
        category: "History",
        difficulty: 4,
    },
    SampleQuestion {
        question: "Who invented Peanut Butter?",
        answer: "George Washington Carver",
        category: "History",
        difficulty: 2,
    },
    SampleQuestion {
        question: "What movie earned Tom Hanks his third straight Oscar nomination, in 1996?",
        answer: "Apollo 13",
        category: "Entertainment",
        difficulty: 4,
    },
    SampleQuestion {
        question: "What actor did author Anne Rice first denounce, then praise in the role of her beloved Lestat?",
        answer: "Tom Cruise",
        category: "Entertainment",
        difficulty: 4,
    },
    SampleQuestion {
        question: "What was the title of the 1990 fantasy directed by Tim Burton about a young man with multi-bladed appendages?",
        answer: "Edward Scissorhands",
        category: "Entertainment",
        difficulty: 3,
    },
    SampleQuestion {
        question: "Which is the only team to play in every soccer World Cup tournament?",
        answer: "Brazil",
        category: "Sports",
        difficulty: 3,
    },
    SampleQuestion {
        question: "Which country won the first ever soccer World Cup in 1930?",
        answer: "Uruguay",
        category: "Sports",
        difficulty: 4,
    },
];

/// Resolves the bundled samples against the seeded categories. Samples whose
/// category is missing are skipped.
pub fn sample_questions(categories: &HashMap<String, CategoryId>) -> Vec<QuestionSeed> {
    SAMPLE_QUESTIONS
        .iter()
        .filter_map(|sample| {
            categories.get(sample.category).map(|&category| QuestionSeed {
                question: sample.question.to_string(),
                answer: sample.answer.to_string(),
                category,
                difficulty: sample.difficulty,
            })
        })
        .collect()
}

/// Generates fake questions spread round-robin over `categories`, in
/// parallel using Rayon.
pub fn generate_questions(categories: &[CategoryId], count: usize) -> Vec<QuestionSeed> {
    if categories.is_empty() {
        return Vec::new();
    }

    (0..count)
        .into_par_iter()
        .map(|i| {
            let sentence: String = Sentence(4..9).fake();
            let answer: Vec<String> = Words(1..3).fake();

            QuestionSeed {
                question: format!("{}?", sentence.trim_end_matches('.')),
                answer: answer.join(" "),
                category: categories[i % categories.len()],
                difficulty: (1..6).fake::<i32>(),
            }
        })
        .collect()
}

pub async fn seed_questions(
    db: &PgPool,
    questions: &[QuestionSeed],
) -> Result<Vec<QuestionId>, sqlx::Error> {
    let start_time = Instant::now();
    println!("❓ Seeding {} questions...", questions.len());

    let ids = insert_questions_batch(db, questions).await?;

    println!(
        "   ✓ Inserted {} questions in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

/// Inserts questions in chunks inside one transaction.
pub async fn insert_questions_batch(
    db: &PgPool,
    questions: &[QuestionSeed],
) -> Result<Vec<QuestionId>, sqlx::Error> {
    let mut tx = db.begin().await?;
    let mut all_ids = Vec::with_capacity(questions.len());

    for chunk in questions.chunks(BATCH_SIZE) {
        let ids = insert_questions_chunk(&mut tx, chunk).await?;
        all_ids.extend(ids);
    }

    tx.commit().await?;
    Ok(all_ids)
}

async fn insert_questions_chunk(
    tx: &mut Transaction<'_, Postgres>,
    questions: &[QuestionSeed],
) -> Result<Vec<QuestionId>, sqlx::Error> {
    if questions.is_empty() {
        return Ok(Vec::new());
    }

    let texts: Vec<&str> = questions.iter().map(|q| q.question.as_str()).collect();
    let answers: Vec<&str> = questions.iter().map(|q| q.answer.as_str()).collect();
    let categories: Vec<i32> = questions.iter().map(|q| q.category.into_inner()).collect();
    let difficulties: Vec<i32> = questions.iter().map(|q| q.difficulty).collect();

    sqlx::query_scalar::<_, QuestionId>(
        r#"INSERT INTO questions (question, answer, category, difficulty)
           SELECT * FROM UNNEST($1::text[], $2::text[], $3::int4[], $4::int4[])
           RETURNING id"#,
    )
    .bind(&texts)
    .bind(&answers)
    .bind(&categories)
    .bind(&difficulties)
    .fetch_all(&mut **tx)
    .await
}

pub async fn clear_questions(db: &PgPool) -> Result<u64, sqlx::Error> {
    let start_time = Instant::now();
    println!("🗑️  Clearing questions...");

    let result = sqlx::query("DELETE FROM questions")
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} questions in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}
