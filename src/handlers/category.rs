use crate::error::AppResult;
use crate::models::CategoryModel;
use crate::response::ApiResponse;
use crate::services::category::CategoryService;
use axum::{response::IntoResponse, Extension};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    /// Unique category slug
    pub slug: String,
    /// Human-readable description
    pub description: String,
}

impl From<CategoryModel> for CategoryResponse {
    fn from(c: CategoryModel) -> Self {
        Self {
            slug: c.slug,
            description: c.description,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "All categories", body = Vec<CategoryResponse>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    Extension(db): Extension<DatabaseConnection>,
) -> AppResult<impl IntoResponse> {
    let service = CategoryService::new(db);
    let categories: Vec<CategoryResponse> = service
        .list()
        .await?
        .into_iter()
        .map(CategoryResponse::from)
        .collect();

    Ok(ApiResponse::ok(categories))
}
