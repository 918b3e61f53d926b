#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use trivia::router::init_router;
use trivia::state::AppState;
use trivia_config::{CorsConfig, ServerConfig};
use trivia_models::{CategoryId, QuestionId};

pub fn setup_test_app(pool: PgPool) -> Router {
    init_router(AppState::new(
        pool,
        CorsConfig::default(),
        ServerConfig::default(),
    ))
}

/// Sends a request and returns the status with the parsed JSON body
/// (`Null` for an empty body).
pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

pub async fn create_test_category(pool: &PgPool, kind: &str) -> CategoryId {
    sqlx::query_scalar::<_, CategoryId>("INSERT INTO categories (type) VALUES ($1) RETURNING id")
        .bind(kind)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_question(
    pool: &PgPool,
    question: &str,
    answer: &str,
    category: CategoryId,
    difficulty: i32,
) -> QuestionId {
    sqlx::query_scalar::<_, QuestionId>(
        r#"INSERT INTO questions (question, answer, category, difficulty)
           VALUES ($1, $2, $3, $4)
           RETURNING id"#,
    )
    .bind(question)
    .bind(answer)
    .bind(category)
    .bind(difficulty)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Inserts `count` numbered questions into `category`, in id order.
pub async fn create_numbered_questions(
    pool: &PgPool,
    category: CategoryId,
    count: usize,
) -> Vec<QuestionId> {
    let mut ids = Vec::with_capacity(count);
    for i in 1..=count {
        ids.push(
            create_test_question(
                pool,
                &format!("Question number {}", i),
                &format!("Answer {}", i),
                category,
                (i % 5 + 1) as i32,
            )
            .await,
        );
    }
    ids
}

pub async fn question_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM questions")
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Makes every `DELETE FROM questions` fail with a database exception.
pub async fn block_question_deletes(pool: &PgPool) {
    sqlx::query(
        r#"CREATE FUNCTION reject_question_delete() RETURNS trigger AS $$
           BEGIN
               RAISE EXCEPTION 'questions are read-only';
           END;
           $$ LANGUAGE plpgsql"#,
    )
    .execute(pool)
    .await
    .unwrap();

    sqlx::query(
        "CREATE TRIGGER questions_read_only BEFORE DELETE ON questions \
         FOR EACH ROW EXECUTE FUNCTION reject_question_delete()",
    )
    .execute(pool)
    .await
    .unwrap();
}

pub fn assert_error(status: StatusCode, body: &serde_json::Value, expected: StatusCode) {
    assert_eq!(status, expected);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], expected.as_u16());
}
