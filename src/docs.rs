use utoipa::OpenApi;

use trivia_core::{ErrorResponse, PageParams};
use trivia_models::{Category, Question};

use crate::modules::categories::model::CategoriesResponse;
use crate::modules::questions::model::{
    CreateQuestionDto, CreatedQuestionResponse, DeletedQuestionResponse, QuestionsRequest,
    QuestionsResponse, SearchQuestionsDto,
};
use crate::modules::quizzes::model::{QuizCategory, QuizRequest, QuizResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::categories::controller::get_categories,
        crate::modules::categories::controller::get_questions_by_category,
        crate::modules::questions::controller::get_questions,
        crate::modules::questions::controller::post_questions,
        crate::modules::questions::controller::delete_question,
        crate::modules::quizzes::controller::play_quiz,
    ),
    components(
        schemas(
            Category,
            Question,
            CategoriesResponse,
            CreateQuestionDto,
            SearchQuestionsDto,
            QuestionsRequest,
            QuestionsResponse,
            CreatedQuestionResponse,
            DeletedQuestionResponse,
            QuizCategory,
            QuizRequest,
            QuizResponse,
            PageParams,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Categories", description = "Question categories"),
        (name = "Questions", description = "Browse, search, create and delete questions"),
        (name = "Quizzes", description = "Random quiz rounds")
    ),
    info(
        title = "Trivia API",
        version = "0.1.0",
        description = "Trivia question bank and quiz API built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;
