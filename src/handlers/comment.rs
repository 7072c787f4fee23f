use crate::error::{AppError, AppResult};
use crate::models::CommentModel;
use crate::response::ApiResponse;
use crate::services::comment::CommentService;
use crate::utils::parse_id;
use axum::{extract::Path, http::StatusCode, response::IntoResponse, Extension, Json};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCommentRequest {
    /// Comment text
    #[validate(length(min = 1))]
    pub body: String,
    /// Username of the comment author
    #[validate(length(min = 1))]
    pub author: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentResponse {
    /// Comment ID
    pub comment_id: i32,
    /// Comment text
    pub body: String,
    /// Vote count
    pub votes: i32,
    /// Author username
    pub author: String,
    /// Review the comment belongs to
    pub review_id: i32,
    /// Creation timestamp
    pub created_at: String,
}

impl From<CommentModel> for CommentResponse {
    fn from(c: CommentModel) -> Self {
        Self {
            comment_id: c.comment_id,
            body: c.body,
            votes: c.votes,
            author: c.author,
            review_id: c.review_id,
            created_at: c.created_at.to_string(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/reviews/{review_id}/comments",
    params(("review_id" = String, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Comments for the review", body = Vec<CommentResponse>),
        (status = 400, description = "Malformed review ID", body = AppError),
        (status = 404, description = "No such review", body = AppError),
    ),
    tag = "comments"
)]
pub async fn list_review_comments(
    Extension(db): Extension<DatabaseConnection>,
    Path(review_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&review_id)?;

    let service = CommentService::new(db);
    let comments: Vec<CommentResponse> = service
        .list_by_review(id)
        .await?
        .into_iter()
        .map(CommentResponse::from)
        .collect();

    Ok(ApiResponse::ok(comments))
}

#[utoipa::path(
    post,
    path = "/api/reviews/{review_id}/comments",
    params(("review_id" = String, Path, description = "Review ID")),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created", body = CommentResponse),
        (status = 400, description = "Malformed ID or body", body = AppError),
        (status = 404, description = "No such review or author", body = AppError),
    ),
    tag = "comments"
)]
pub async fn create_review_comment(
    Extension(db): Extension<DatabaseConnection>,
    Path(review_id): Path<String>,
    Json(payload): Json<CreateCommentRequest>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&review_id)?;
    payload.validate().map_err(|_| AppError::InvalidQuery)?;

    let service = CommentService::new(db);
    let comment = service.create(id, &payload.author, &payload.body).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message(CommentResponse::from(comment), "comment created".to_string()),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/comments/{comment_id}",
    params(("comment_id" = String, Path, description = "Comment ID")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 400, description = "Malformed comment ID", body = AppError),
    ),
    tag = "comments"
)]
pub async fn delete_comment(
    Extension(db): Extension<DatabaseConnection>,
    Path(comment_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&comment_id)?;

    let service = CommentService::new(db);
    service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
