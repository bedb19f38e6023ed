use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::db::queries::questions;
use crate::db::Question;
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::extract;
use crate::telemetry::QUIZ_QUESTION_CNTR;

#[derive(Deserialize)]
struct QuizBody {
    #[serde(default)]
    previous_questions: Vec<i64>,
    quiz_category: Option<QuizCategory>,
}

/// The client echoes the whole category object back each round; only the id
/// matters, and some screens send it as a string.
#[derive(Deserialize)]
struct QuizCategory {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

/// An exhausted quiz serializes as `{}`, which the client reads as "done".
#[derive(Serialize)]
struct QuizRound {
    #[serde(skip_serializing_if = "Option::is_none")]
    question: Option<Question>,
}

async fn next_question(
    State(pool): State<SqlitePool>,
    extract::Json(body): extract::Json<QuizBody>,
) -> ApiResult<QuizRound> {
    let category = body.quiz_category.ok_or_else(|| {
        ApiError::BadRequest("Quiz Category missing in request payload".to_owned())
    })?;

    let question =
        questions::next_quiz_question(&pool, category.id, &body.previous_questions).await?;
    if let Some(question) = &question {
        let category = question.category.to_string();
        QUIZ_QUESTION_CNTR.with_label_values(&[category.as_str()]).inc();
    }

    Ok(Json(QuizRound { question }))
}

pub fn quiz_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
