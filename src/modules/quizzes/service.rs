use rand::Rng;
use rand::seq::SliceRandom;
use sqlx::PgPool;
use tracing::{debug, error, info, instrument};
use trivia_core::AppError;
use trivia_models::{CategoryId, Question, QuestionId};

use crate::metrics;
use crate::modules::categories::service::CategoryService;

/// Picks one question uniformly at random.
pub fn pick_question<R: Rng + ?Sized>(questions: Vec<Question>, rng: &mut R) -> Option<Question> {
    questions.choose(rng).cloned()
}

#[derive(Clone, Debug)]
pub struct QuizService {
    db: PgPool,
    categories: CategoryService,
}

impl QuizService {
    pub fn new(db: PgPool, categories: CategoryService) -> Self {
        Self { db, categories }
    }

    /// The next question for a round in `category` (or every category for
    /// [`CategoryId::ALL`]) that is not in `previous`. `None` ends the round.
    #[instrument(skip(self, previous), fields(db.operation = "SELECT", db.table = "questions", previous.len = previous.len()))]
    pub async fn next_question(
        &self,
        category: CategoryId,
        previous: &[QuestionId],
    ) -> Result<Option<Question>, AppError> {
        let filter = if category.is_all() {
            None
        } else {
            Some(self.categories.get_category_by_id(category).await?.id)
        };

        let pool_size = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM questions WHERE ($1::int4 IS NULL OR category = $1)",
        )
        .bind(filter)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error counting quiz questions");
            AppError::database(e)
        })?;

        if previous.len() as i64 >= pool_size {
            metrics::track_quiz_completed();
            info!(category.id = %category, pool = %pool_size, "Quiz round complete");
            return Ok(None);
        }

        let previous_ids: Vec<i32> = previous.iter().map(|id| id.into_inner()).collect();

        let eligible = sqlx::query_as::<_, Question>(
            r#"SELECT id, question, answer, category, difficulty
               FROM questions
               WHERE ($1::int4 IS NULL OR category = $1)
                 AND NOT (id = ANY($2))
               ORDER BY id"#,
        )
        .bind(filter)
        .bind(&previous_ids)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching quiz questions");
            AppError::database(e)
        })?;

        debug!(eligible = %eligible.len(), pool = %pool_size, "Eligible quiz questions");

        let question = pick_question(eligible, &mut rand::thread_rng());

        match &question {
            Some(q) => {
                metrics::track_quiz_question_served();
                debug!(question.id = %q.id, "Serving quiz question");
            }
            None => {
                metrics::track_quiz_completed();
                info!(category.id = %category, "Quiz round complete");
            }
        }

        Ok(question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn question(id: i32) -> Question {
        Question {
            id: QuestionId(id),
            question: format!("Question {}", id),
            answer: format!("Answer {}", id),
            category: CategoryId(1),
            difficulty: 1,
        }
    }

    #[test]
    fn test_pick_question_from_empty_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(pick_question(Vec::new(), &mut rng).is_none());
    }

    #[test]
    fn test_pick_question_stays_in_pool() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let picked = pick_question(vec![question(1), question(2), question(3)], &mut rng)
                .unwrap();
            assert!((1..=3).contains(&picked.id.into_inner()));
        }
    }

    #[test]
    fn test_pick_question_reaches_every_candidate() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let picked = pick_question(vec![question(1), question(2)], &mut rng).unwrap();
            seen.insert(picked.id);
        }
        assert_eq!(seen.len(), 2);
    }

    async fn insert_category(pool: &PgPool, kind: &str) -> CategoryId {
        sqlx::query_scalar::<_, CategoryId>("INSERT INTO categories (type) VALUES ($1) RETURNING id")
            .bind(kind)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    async fn insert_question(pool: &PgPool, category: CategoryId, text: &str) -> QuestionId {
        sqlx::query_scalar::<_, QuestionId>(
            "INSERT INTO questions (question, answer, category, difficulty) VALUES ($1, 'answer', $2, 1) RETURNING id",
        )
        .bind(text)
        .bind(category)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    fn service(pool: PgPool) -> QuizService {
        QuizService::new(pool.clone(), CategoryService::new(pool))
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_next_question_in_category(pool: PgPool) {
        let science = insert_category(&pool, "Science").await;
        let art = insert_category(&pool, "Art").await;
        insert_question(&pool, science, "What is H2O?").await;
        insert_question(&pool, science, "What is NaCl?").await;
        insert_question(&pool, art, "Who painted the Mona Lisa?").await;

        let service = service(pool);
        for _ in 0..10 {
            let question = service.next_question(science, &[]).await.unwrap().unwrap();
            assert_eq!(question.category, science);
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_next_question_excludes_previous(pool: PgPool) {
        let science = insert_category(&pool, "Science").await;
        let first = insert_question(&pool, science, "First").await;
        let second = insert_question(&pool, science, "Second").await;

        let service = service(pool);
        let question = service
            .next_question(science, &[first])
            .await
            .unwrap()
            .unwrap();

        assert_eq!(question.id, second);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_next_question_all_categories(pool: PgPool) {
        let science = insert_category(&pool, "Science").await;
        let art = insert_category(&pool, "Art").await;
        let first = insert_question(&pool, science, "First").await;
        let second = insert_question(&pool, art, "Second").await;

        let service = service(pool);
        let question = service
            .next_question(CategoryId::ALL, &[first])
            .await
            .unwrap()
            .unwrap();

        assert_eq!(question.id, second);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_round_ends_when_pool_is_exhausted(pool: PgPool) {
        let science = insert_category(&pool, "Science").await;
        let first = insert_question(&pool, science, "First").await;
        let second = insert_question(&pool, science, "Second").await;

        let service = service(pool);
        let question = service
            .next_question(science, &[first, second])
            .await
            .unwrap();

        assert!(question.is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_round_ends_for_empty_category(pool: PgPool) {
        let empty = insert_category(&pool, "Empty").await;

        let service = service(pool);
        assert!(service.next_question(empty, &[]).await.unwrap().is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_unknown_category_is_not_found(pool: PgPool) {
        let service = service(pool);
        let err = service
            .next_question(CategoryId(9999), &[])
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
