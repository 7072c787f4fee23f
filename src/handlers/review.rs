use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::services::review::{ReviewRecord, ReviewService};
use crate::utils::parse_id;
use axum::{extract::Path, extract::Query, response::IntoResponse, Extension, Json};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewResponse {
    /// Review ID
    pub review_id: i32,
    /// Game title
    pub title: String,
    /// Game designer
    pub designer: String,
    /// Reviewing user
    pub owner: String,
    /// Cover image URL
    pub review_img_url: String,
    /// Review text
    pub review_body: String,
    /// Category slug
    pub category: String,
    /// Creation timestamp
    pub created_at: String,
    /// Vote count, never negative
    pub votes: i32,
    /// Number of comments on this review
    pub comment_count: i64,
}

impl From<ReviewRecord> for ReviewResponse {
    fn from(r: ReviewRecord) -> Self {
        Self {
            review_id: r.review_id,
            title: r.title,
            designer: r.designer,
            owner: r.owner,
            review_img_url: r.review_img_url,
            review_body: r.review_body,
            category: r.category,
            created_at: r.created_at.to_string(),
            votes: r.votes,
            comment_count: r.comment_count,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReviewListQuery {
    /// Column to sort by (defaults to created_at)
    pub sort_by: Option<String>,
    /// "asc" or "desc" (defaults to desc)
    pub order: Option<String>,
    /// Restrict to a single category slug
    pub category: Option<String>,
}

/// Interpret a vote-mutation body. `{}` is an explicit no-op; the only
/// other accepted shape is `{"inc_votes": <integer>}`.
fn parse_vote_body(body: &Value) -> AppResult<Option<i64>> {
    let obj = body.as_object().ok_or(AppError::InvalidQuery)?;

    if obj.is_empty() {
        return Ok(None);
    }
    if obj.len() > 1 || !obj.contains_key("inc_votes") {
        return Err(AppError::InvalidQuery);
    }

    let inc_votes = obj
        .get("inc_votes")
        .and_then(Value::as_i64)
        .ok_or(AppError::InvalidQuery)?;

    Ok(Some(inc_votes))
}

#[utoipa::path(
    get,
    path = "/api/reviews",
    params(
        ("sort_by" = Option<String>, Query, description = "Column to sort by"),
        ("order" = Option<String>, Query, description = "asc or desc"),
        ("category" = Option<String>, Query, description = "Category slug filter"),
    ),
    responses(
        (status = 200, description = "Reviews with comment counts", body = Vec<ReviewResponse>),
        (status = 400, description = "Invalid sort_by or order", body = AppError),
        (status = 404, description = "Category does not exist", body = AppError),
    ),
    tag = "reviews"
)]
pub async fn list_reviews(
    Extension(db): Extension<DatabaseConnection>,
    Query(params): Query<ReviewListQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReviewService::new(db);
    let reviews: Vec<ReviewResponse> = service
        .list(
            params.sort_by.as_deref(),
            params.order.as_deref(),
            params.category.as_deref(),
        )
        .await?
        .into_iter()
        .map(ReviewResponse::from)
        .collect();

    Ok(ApiResponse::ok(reviews))
}

#[utoipa::path(
    get,
    path = "/api/reviews/{review_id}",
    params(("review_id" = String, Path, description = "Review ID")),
    responses(
        (status = 200, description = "A single review", body = ReviewResponse),
        (status = 400, description = "Malformed review ID", body = AppError),
        (status = 404, description = "No such review", body = AppError),
    ),
    tag = "reviews"
)]
pub async fn get_review(
    Extension(db): Extension<DatabaseConnection>,
    Path(review_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&review_id)?;

    let service = ReviewService::new(db);
    let review = service.get_by_id(id).await?;

    Ok(ApiResponse::ok(ReviewResponse::from(review)))
}

#[utoipa::path(
    patch,
    path = "/api/reviews/{review_id}",
    params(("review_id" = String, Path, description = "Review ID")),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Updated review", body = ReviewResponse),
        (status = 400, description = "Malformed ID, body or vote change", body = AppError),
        (status = 404, description = "No such review", body = AppError),
    ),
    tag = "reviews"
)]
pub async fn patch_review(
    Extension(db): Extension<DatabaseConnection>,
    Path(review_id): Path<String>,
    Json(payload): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&review_id)?;
    let inc_votes = parse_vote_body(&payload)?;

    let service = ReviewService::new(db);
    let review = service.change_votes(id, inc_votes).await?;

    Ok(ApiResponse::ok(ReviewResponse::from(review)))
}
