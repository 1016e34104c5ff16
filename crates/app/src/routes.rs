use axum::extract::{FromRequest, FromRequestParts, State};
use axum::http::{Method, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use services::{AppServices, QuizStep};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use trivia_core::SearchTerm;
use trivia_core::model::{CategoryId, QuestionId};

use crate::dto::{
    CategoriesResponse, NewCategoryBody, PageQuery, QuestionCreatedResponse,
    QuestionDeletedResponse, QuestionDto, QuestionListResponse, QuestionsPostBody, QuizBody,
    QuizResponse, category_map, question_dtos,
};
use crate::error::ApiError;

/// `Json` extractor that reports malformed bodies as `ApiError`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// Build the API router over the given services.
pub fn router(services: AppServices) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(post_questions))
        .route("/questions/{id}", delete(delete_question))
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/{id}/questions", get(questions_by_category))
        .route("/quizzes", post(play_quiz))
        .fallback(unknown_route)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(TraceLayer::new_for_http())
        .layer(cors())
        .with_state(services)
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn unknown_route() -> ApiError {
    ApiError::NotFound("no such route".into())
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn list_questions(
    State(services): State<AppServices>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<QuestionListResponse>, ApiError> {
    let page = query.page()?;
    let view = services.questions().list_page(page).await?;
    let categories = services.categories().list_categories().await?;

    Ok(Json(QuestionListResponse {
        success: true,
        questions: question_dtos(&view.questions),
        total_questions: view.total,
        current_category: view.current_category.map(|c| c.label().to_owned()),
        categories: Some(category_map(&categories)),
    }))
}

async fn post_questions(
    State(services): State<AppServices>,
    ApiQuery(query): ApiQuery<PageQuery>,
    ApiJson(mut body): ApiJson<QuestionsPostBody>,
) -> Result<Response, ApiError> {
    let page = query.page()?;

    if let Some(term) = body.search_term.take().and_then(SearchTerm::new) {
        let view = services.questions().search(&term, page).await?;
        return Ok(Json(QuestionListResponse {
            success: true,
            questions: question_dtos(&view.questions),
            total_questions: view.total,
            current_category: view.current_category.map(|c| c.label().to_owned()),
            categories: None,
        })
        .into_response());
    }

    let questions = services.questions();
    let created = questions.create_question(body.into_draft()?).await?;
    let view = questions.overview(page).await?;

    Ok(Json(QuestionCreatedResponse {
        success: true,
        created: created.value(),
        questions: question_dtos(&view.questions),
        total_questions: view.total,
    })
    .into_response())
}

async fn delete_question(
    State(services): State<AppServices>,
    ApiPath(id): ApiPath<u64>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<QuestionDeletedResponse>, ApiError> {
    let page = query.page()?;
    let questions = services.questions();
    questions.delete_question(QuestionId::new(id)).await?;
    let view = questions.overview(page).await?;

    Ok(Json(QuestionDeletedResponse {
        success: true,
        deleted: id,
        questions: question_dtos(&view.questions),
        total_questions: view.total,
    }))
}

async fn list_categories(
    State(services): State<AppServices>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = services.categories().list_categories().await?;
    Ok(Json(CategoriesResponse {
        success: true,
        categories: category_map(&categories),
        total_categories: None,
    }))
}

async fn create_category(
    State(services): State<AppServices>,
    ApiJson(body): ApiJson<NewCategoryBody>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let label = body
        .category
        .ok_or_else(|| ApiError::BadRequest("missing field `category`".into()))?;
    let categories = services.categories();
    categories.create_category(label).await?;
    let all = categories.list_categories().await?;

    Ok(Json(CategoriesResponse {
        success: true,
        total_categories: Some(all.len()),
        categories: category_map(&all),
    }))
}

async fn questions_by_category(
    State(services): State<AppServices>,
    ApiPath(id): ApiPath<u64>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<QuestionListResponse>, ApiError> {
    let page = query.page()?;
    let view = services
        .questions()
        .list_by_category(CategoryId::new(id), page)
        .await?;

    Ok(Json(QuestionListResponse {
        success: true,
        questions: question_dtos(&view.questions),
        total_questions: view.total,
        current_category: view.current_category.map(|c| c.label().to_owned()),
        categories: None,
    }))
}

async fn play_quiz(
    State(services): State<AppServices>,
    ApiJson(body): ApiJson<QuizBody>,
) -> Result<Json<QuizResponse>, ApiError> {
    let request = body.into_request()?;
    let question = match services.quiz().next_question(&request).await? {
        QuizStep::Question(q) => Some(QuestionDto::from(&q)),
        QuizStep::Finished => {
            info!(served = request.excluded_ids.len(), "quiz finished");
            None
        }
    };

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}
