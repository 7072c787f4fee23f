use crate::config::rate_limit::{RateLimitConfig, RateLimitRule};
use crate::handlers;
use axum::{http::StatusCode, response::IntoResponse, routing, Json, Router};
use serde_json::json;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};

pub fn create_routes() -> Router {
    Router::new()
        .nest("/api", api_routes())
        .fallback(path_not_found)
}

fn api_routes() -> Router {
    let rate_limit_config = RateLimitConfig::from_env();

    let read = public_read_routes(&rate_limit_config);
    let mutation = mutation_routes(&rate_limit_config);

    Router::new()
        .route("/", routing::get(api_index))
        .merge(read)
        .merge(mutation)
}

/// Public reads: categories, reviews, comments.
fn public_read_routes(config: &RateLimitConfig) -> Router {
    let router = Router::new()
        .route(
            "/categories",
            routing::get(handlers::category::list_categories),
        )
        .route("/reviews", routing::get(handlers::review::list_reviews))
        .route(
            "/reviews/{review_id}",
            routing::get(handlers::review::get_review),
        )
        .route(
            "/reviews/{review_id}/comments",
            routing::get(handlers::comment::list_review_comments),
        );

    with_optional_rate_limit(router, config.enabled, config.public_read)
}

/// Mutations: vote changes, comment creation and deletion.
fn mutation_routes(config: &RateLimitConfig) -> Router {
    let router = Router::new()
        .route(
            "/reviews/{review_id}",
            routing::patch(handlers::review::patch_review),
        )
        .route(
            "/reviews/{review_id}/comments",
            routing::post(handlers::comment::create_review_comment),
        )
        .route(
            "/comments/{comment_id}",
            routing::delete(handlers::comment::delete_comment),
        );

    with_optional_rate_limit(router, config.enabled, config.mutation)
}

fn with_optional_rate_limit(router: Router, enabled: bool, rule: RateLimitRule) -> Router {
    if !enabled {
        return router;
    }

    let governor_conf = GovernorConfigBuilder::default()
        .per_second(rule.per_second)
        .burst_size(rule.burst_size)
        .finish()
        .expect("Invalid rate limit configuration");

    router.layer(GovernorLayer::new(governor_conf))
}

async fn api_index() -> impl IntoResponse {
    Json(json!({
        "GET /api": "this listing",
        "GET /api/categories": "all review categories",
        "GET /api/reviews": "reviews with comment counts; accepts sort_by, order and category queries",
        "GET /api/reviews/{review_id}": "a single review with its comment count",
        "PATCH /api/reviews/{review_id}": "adjust a review's votes with { inc_votes }",
        "GET /api/reviews/{review_id}/comments": "all comments on a review",
        "POST /api/reviews/{review_id}/comments": "add a comment with { author, body }",
        "DELETE /api/comments/{comment_id}": "remove a comment",
    }))
}

async fn path_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Path not found" })),
    )
}
