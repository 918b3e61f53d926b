use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};
use trivia_core::{AppError, PageParams};
use trivia_models::{Category, CategoryId, Question, QuestionId};

use crate::metrics;
use crate::modules::categories::service::CategoryService;

use super::model::{CreateQuestionDto, QuestionPage};

const QUESTION_COLUMNS: &str = "id, question, answer, category, difficulty";

/// Escapes `LIKE` wildcards so a search term matches literally.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[derive(Clone, Debug)]
pub struct QuestionService {
    db: PgPool,
    categories: CategoryService,
}

impl QuestionService {
    pub fn new(db: PgPool, categories: CategoryService) -> Self {
        Self { db, categories }
    }

    /// Counts the rows matching `filter` and fetches the requested page of
    /// them in id order. `filter` binds at most one parameter as `$1`.
    async fn fetch_page(
        &self,
        filter: Filter,
        params: &PageParams,
    ) -> Result<QuestionPage, sqlx::Error> {
        let (where_clause, limit_idx) = match filter {
            Filter::All => ("", 1),
            Filter::Search(_) => (r" WHERE question ILIKE $1 ESCAPE '\'", 2),
            Filter::Category(_) => (" WHERE category = $1", 2),
        };

        let count_query = format!("SELECT COUNT(*) FROM questions{}", where_clause);
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        count_sql = match &filter {
            Filter::All => count_sql,
            Filter::Search(pattern) => count_sql.bind(pattern.as_str()),
            Filter::Category(id) => count_sql.bind(*id),
        };
        let total = count_sql.fetch_one(&self.db).await?;

        let Some(window) = params.window() else {
            return Ok(QuestionPage::empty(total));
        };

        let data_query = format!(
            "SELECT {} FROM questions{} ORDER BY id LIMIT ${} OFFSET ${}",
            QUESTION_COLUMNS,
            where_clause,
            limit_idx,
            limit_idx + 1
        );
        let mut data_sql = sqlx::query_as::<_, Question>(&data_query);
        data_sql = match &filter {
            Filter::All => data_sql,
            Filter::Search(pattern) => data_sql.bind(pattern.as_str()),
            Filter::Category(id) => data_sql.bind(*id),
        };
        let questions = data_sql
            .bind(window.limit)
            .bind(window.offset)
            .fetch_all(&self.db)
            .await?;

        Ok(QuestionPage {
            questions,
            total_questions: total,
        })
    }

    /// Every question, paginated. A page number of one or more past the end
    /// of a non-empty set is not found; page zero or below is an empty page.
    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "questions"))]
    pub async fn list_questions(&self, params: &PageParams) -> Result<QuestionPage, AppError> {
        let page = self.fetch_page(Filter::All, params).await.map_err(|e| {
            error!(error = %e, "Database error listing questions");
            AppError::not_found(e)
        })?;

        if params.window().is_some() && page.questions.is_empty() && page.total_questions > 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Page {} is beyond the last page of {} questions",
                params.page(),
                page.total_questions
            )));
        }

        debug!(
            page = %params.page(),
            returned = %page.questions.len(),
            total = %page.total_questions,
            "Fetched questions page"
        );

        Ok(page)
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "questions"))]
    pub async fn search_questions(
        &self,
        term: &str,
        params: &PageParams,
    ) -> Result<QuestionPage, AppError> {
        metrics::track_question_search();

        let pattern = format!("%{}%", escape_like(term));
        let page = self
            .fetch_page(Filter::Search(pattern), params)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error searching questions");
                AppError::database(e)
            })?;

        debug!(
            search.term = %term,
            matches = %page.total_questions,
            "Searched questions"
        );

        Ok(page)
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "questions"))]
    pub async fn list_by_category(
        &self,
        category_id: CategoryId,
        params: &PageParams,
    ) -> Result<(Category, QuestionPage), AppError> {
        let category = self.categories.get_category_by_id(category_id).await?;

        let page = self
            .fetch_page(Filter::Category(category.id), params)
            .await
            .map_err(|e| {
                error!(error = %e, category.id = %category.id, "Database error listing category questions");
                AppError::database(e)
            })?;

        Ok((category, page))
    }

    /// Inserts a validated question and returns its id with the refreshed
    /// listing.
    #[instrument(skip(self, dto), fields(db.operation = "INSERT", db.table = "questions"))]
    pub async fn create_question(
        &self,
        dto: CreateQuestionDto,
        params: &PageParams,
    ) -> Result<(QuestionId, QuestionPage), AppError> {
        let id = sqlx::query_scalar::<_, QuestionId>(
            r#"INSERT INTO questions (question, answer, category, difficulty)
               VALUES ($1, $2, $3, $4)
               RETURNING id"#,
        )
        .bind(dto.question.trim())
        .bind(dto.answer.trim())
        .bind(dto.category)
        .bind(dto.difficulty)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && (db_err.is_foreign_key_violation() || db_err.is_check_violation())
            {
                warn!(category.id = %dto.category, "Rejected question with invalid fields");
                return AppError::bad_request(anyhow::anyhow!(
                    "Question rejected by the database: {}",
                    db_err.message()
                ));
            }
            error!(error = %e, "Database error creating question");
            AppError::database(e)
        })?;

        metrics::track_question_created();
        info!(question.id = %id, category.id = %dto.category, "Question created");

        let page = self.fetch_page(Filter::All, params).await.map_err(|e| {
            error!(error = %e, "Database error listing questions after insert");
            AppError::database(e)
        })?;

        Ok((id, page))
    }

    /// Deletes a question. A missing id is not found; a failure after the
    /// row was located is unprocessable.
    #[instrument(skip(self), fields(db.operation = "DELETE", db.table = "questions"))]
    pub async fn delete_question(
        &self,
        id: QuestionId,
        params: &PageParams,
    ) -> Result<QuestionPage, AppError> {
        let existing = sqlx::query_scalar::<_, QuestionId>("SELECT id FROM questions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!(error = %e, question.id = %id, "Database error looking up question");
                AppError::database(e)
            })?;

        if existing.is_none() {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Question {} not found",
                id
            )));
        }

        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!(error = %e, question.id = %id, "Database error deleting question");
                AppError::unprocessable(e)
            })?;

        if result.rows_affected() == 0 {
            warn!(question.id = %id, "Question disappeared before it could be deleted");
            return Err(AppError::unprocessable(anyhow::anyhow!(
                "Question {} could not be deleted",
                id
            )));
        }

        metrics::track_question_deleted();
        info!(question.id = %id, "Question deleted");

        self.fetch_page(Filter::All, params).await.map_err(|e| {
            error!(error = %e, "Database error listing questions after delete");
            AppError::database(e)
        })
    }
}

enum Filter {
    All,
    /// An escaped `ILIKE` pattern
    Search(String),
    Category(CategoryId),
}
