use sqlx::PgPool;
use trivia_config::{CorsConfig, ServerConfig};

use crate::modules::categories::service::CategoryService;
use crate::modules::questions::service::QuestionService;
use crate::modules::quizzes::service::QuizService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub categories: CategoryService,
    pub questions: QuestionService,
    pub quizzes: QuizService,
    pub cors_config: CorsConfig,
    pub server_config: ServerConfig,
}

impl AppState {
    /// Builds the services around a shared pool.
    pub fn new(db: PgPool, cors_config: CorsConfig, server_config: ServerConfig) -> Self {
        let categories = CategoryService::new(db.clone());
        let questions = QuestionService::new(db.clone(), categories.clone());
        let quizzes = QuizService::new(db, categories.clone());

        Self {
            categories,
            questions,
            quizzes,
            cors_config,
            server_config,
        }
    }
}

pub async fn init_app_state() -> Result<AppState, trivia_db::DbError> {
    let db = trivia_db::init_db_pool().await?;
    trivia_db::run_migrations(&db).await?;

    Ok(AppState::new(
        db,
        CorsConfig::from_env(),
        ServerConfig::from_env(),
    ))
}
