use axum::{
    Router,
    routing::{delete, get},
};

use crate::state::AppState;

use super::controller::{delete_question, get_questions, post_questions};

pub fn init_questions_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_questions).post(post_questions))
        .route("/{id}", delete(delete_question))
}
