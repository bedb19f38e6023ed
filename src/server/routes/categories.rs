use std::collections::BTreeMap;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::queries::{categories, questions};
use crate::db::Question;
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::extract::Path;

#[derive(Serialize)]
struct CategoriesResponse {
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct CategoryQuestionsResponse {
    questions: Vec<Question>,
    total_questions: usize,
    current_category: i64,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResult<CategoriesResponse> {
    let categories = categories::get_category_map(&pool).await?;
    Ok(Json(CategoriesResponse { categories }))
}

/// Rejects category id 0 as invalid before touching storage; every other id
/// goes through unchecked, existing or not.
async fn questions_for_category(
    State(pool): State<SqlitePool>,
    Path(category_id): Path<i64>,
) -> ApiResult<CategoryQuestionsResponse> {
    if category_id == 0 {
        return Err(ApiError::BadRequest("Invalid category id".to_owned()));
    }
    let questions = questions::get_questions_for_category(&pool, category_id).await?;
    let total_questions = questions.len();

    Ok(Json(CategoryQuestionsResponse {
        questions,
        total_questions,
        current_category: category_id,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route(
            "/categories/{category_id}/questions",
            get(questions_for_category),
        )
        .with_state(state)
}
