use std::collections::BTreeMap;

use axum::extract::State;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::queries::{categories, questions};
use crate::db::Question;
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::extract;
use crate::server::extract::{Path, Query};

pub const QUESTIONS_PER_PAGE: usize = 10;

#[derive(Deserialize)]
struct QuestionsQuery {
    page: Option<usize>,
}

#[derive(Serialize)]
struct QuestionsPage {
    questions: Vec<Question>,
    total_questions: usize,
    categories: BTreeMap<i64, String>,
}

#[derive(Deserialize)]
struct NewQuestion {
    question: Option<String>,
    answer: Option<String>,
    category: Option<i64>,
    difficulty: Option<i64>,
}

#[derive(Serialize)]
struct CreatedQuestion {
    question: Question,
}

#[derive(Serialize)]
struct DeletedQuestion {
    deleted: i64,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm", default)]
    search_term: String,
}

#[derive(Serialize)]
struct SearchResults {
    questions: Vec<Question>,
    total_questions: usize,
}

/// Slices the materialized list. Page 0 and "no page" both mean the full,
/// unpaginated set; a page past the end comes back empty rather than failing.
fn paginate(questions: Vec<Question>, page: usize) -> Vec<Question> {
    if page == 0 {
        return questions;
    }
    let start = (page - 1).saturating_mul(QUESTIONS_PER_PAGE);
    questions
        .into_iter()
        .skip(start)
        .take(QUESTIONS_PER_PAGE)
        .collect()
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    Query(QuestionsQuery { page }): Query<QuestionsQuery>,
) -> ApiResult<QuestionsPage> {
    let all = questions::get_all_questions(&pool).await?;
    let total_questions = all.len();
    let categories = categories::get_category_map(&pool).await?;

    Ok(Json(QuestionsPage {
        questions: paginate(all, page.unwrap_or(0)),
        total_questions,
        categories,
    }))
}

/// All four fields are required and must be "truthy": empty strings and
/// zeroes are rejected the same way as missing keys.
async fn create_question(
    State(pool): State<SqlitePool>,
    extract::Json(body): extract::Json<NewQuestion>,
) -> ApiResult<CreatedQuestion> {
    let NewQuestion {
        question,
        answer,
        category,
        difficulty,
    } = body;
    let (question, answer, category, difficulty) = match (question, answer, category, difficulty) {
        (Some(question), Some(answer), Some(category), Some(difficulty))
            if !question.is_empty() && !answer.is_empty() && category != 0 && difficulty != 0 =>
        {
            (question, answer, category, difficulty)
        }
        _ => {
            return Err(ApiError::BadRequest(
                "You must include question, answer, category, and difficulty \
                 when creating a new question"
                    .to_owned(),
            ))
        }
    };

    let id = questions::create_question(&pool, &question, &answer, category, difficulty).await?;
    Ok(Json(CreatedQuestion {
        question: Question {
            id,
            question,
            answer,
            category,
            difficulty,
        },
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    Path(question_id): Path<i64>,
) -> ApiResult<DeletedQuestion> {
    let deleted = questions::delete_question(&pool, question_id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound(format!(
            "Question with {question_id} not found"
        )));
    }
    Ok(Json(DeletedQuestion {
        deleted: question_id,
    }))
}

async fn search(
    State(pool): State<SqlitePool>,
    extract::Json(SearchBody { search_term }): extract::Json<SearchBody>,
) -> ApiResult<SearchResults> {
    let questions = questions::search_questions(&pool, &search_term).await?;
    let total_questions = questions.len();

    Ok(Json(SearchResults {
        questions,
        total_questions,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/{question_id}", delete(delete_question))
        .route("/search", post(search))
        .with_state(state)
}
