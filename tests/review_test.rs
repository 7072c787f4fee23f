mod common;

use serde_json::Value;

const PLACEHOLDER_IMG: &str =
    "https://www.golenbock.com/wp-content/uploads/2015/01/placeholder-user.png";

#[tokio::test]
async fn get_review_by_id() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/reviews/1")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["review_id"], 1);
}

#[tokio::test]
async fn get_review_has_full_projection_and_comment_count() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/reviews/2")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    let review = &body["data"];
    assert_eq!(review["review_id"], 2);
    assert_eq!(review["title"], "Jenga");
    assert_eq!(review["designer"], "Leslie Scott");
    assert_eq!(review["owner"], "philippaclaire9");
    assert_eq!(review["review_img_url"], PLACEHOLDER_IMG);
    assert_eq!(review["review_body"], "Fiddly fun for all the family");
    assert_eq!(review["category"], "dexterity");
    assert_eq!(review["votes"], 5);
    assert_eq!(review["comment_count"], 3);
    assert!(review["created_at"].is_string());
}

#[tokio::test]
async fn get_review_rejects_malformed_id() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .get(app.url("/reviews/dog"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Invalid query");
}

#[tokio::test]
async fn get_review_unknown_id_is_not_found() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .get(app.url("/reviews/9999"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "9999 not found");
}

#[tokio::test]
async fn list_reviews_returns_all_with_comment_counts() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/reviews")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    let reviews = body["data"].as_array().unwrap();
    assert_eq!(reviews.len(), 13);
    for review in reviews {
        assert!(review["review_id"].is_i64());
        assert!(review["title"].is_string());
        assert!(review["owner"].is_string());
        assert!(review["category"].is_string());
        assert!(review["review_img_url"].is_string());
        assert!(review["created_at"].is_string());
        assert!(review["votes"].is_i64());
        assert!(review["comment_count"].is_i64());
    }
}

#[tokio::test]
async fn list_reviews_sorts_by_date_descending_by_default() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/reviews")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    let dates: Vec<String> = common::column_values(&body["data"], "created_at")
        .into_iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    assert!(common::is_sorted_desc(&dates));
}

#[tokio::test]
async fn list_reviews_accepts_sort_by() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .get(app.url("/reviews"))
        .query(&[("sort_by", "owner")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    let owners: Vec<String> = common::column_values(&body["data"], "owner")
        .into_iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    assert!(common::is_sorted_desc(&owners));
}

#[tokio::test]
async fn list_reviews_rejects_unknown_sort_column() {
    let app = common::spawn_app().await;

    for bad in ["not_a_column", "not-a-column"] {
        let resp = app
            .client
            .get(app.url("/reviews"))
            .query(&[("sort_by", bad)])
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);

        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "Invalid sort_by query");
    }
}

#[tokio::test]
async fn list_reviews_accepts_order() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .get(app.url("/reviews"))
        .query(&[("order", "asc")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    let dates: Vec<String> = common::column_values(&body["data"], "created_at")
        .into_iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    assert!(common::is_sorted_asc(&dates));
}

#[tokio::test]
async fn list_reviews_rejects_unknown_order() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .get(app.url("/reviews"))
        .query(&[("order", "order")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Invalid order query");
}

#[tokio::test]
async fn list_reviews_combines_sort_by_and_order() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .get(app.url("/reviews"))
        .query(&[("sort_by", "category"), ("order", "asc")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    let categories: Vec<String> = common::column_values(&body["data"], "category")
        .into_iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    assert!(common::is_sorted_asc(&categories));
}

#[tokio::test]
async fn list_reviews_sorts_by_numeric_columns() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .get(app.url("/reviews"))
        .query(&[("sort_by", "votes"), ("order", "asc")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    let votes: Vec<i64> = common::column_values(&body["data"], "votes")
        .into_iter()
        .map(|v| v.as_i64().unwrap())
        .collect();
    assert!(common::is_sorted_asc(&votes));

    let resp = app
        .client
        .get(app.url("/reviews"))
        .query(&[("sort_by", "comment_count")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    let counts: Vec<i64> = common::column_values(&body["data"], "comment_count")
        .into_iter()
        .map(|v| v.as_i64().unwrap())
        .collect();
    assert!(common::is_sorted_desc(&counts));
}

#[tokio::test]
async fn list_reviews_filters_by_category() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .get(app.url("/reviews"))
        .query(&[("category", "dexterity")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    let reviews = body["data"].as_array().unwrap();
    assert_eq!(reviews.len(), 1);

    let review = &reviews[0];
    assert_eq!(review["review_id"], 2);
    assert_eq!(review["title"], "Jenga");
    assert_eq!(review["category"], "dexterity");
    assert_eq!(review["comment_count"], 3);
}

#[tokio::test]
async fn list_reviews_unknown_category_is_not_found() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .get(app.url("/reviews"))
        .query(&[("category", "NotACategory")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "value not found");
}

#[tokio::test]
async fn list_reviews_empty_category_gives_empty_list() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .get(app.url("/reviews"))
        .query(&[("category", "children's games")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}
