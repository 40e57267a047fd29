//! Integration tests for the comment and story record flows.

mod helpers;

use http::StatusCode;

use comments_core::traits::DataProvider;
use comments_database::{PgAdapter, SqlDataProvider};
use comments_entity::Comment;

#[tokio::test]
async fn test_provider_add_then_get() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    let provider: SqlDataProvider<Comment> =
        SqlDataProvider::new(std::sync::Arc::new(PgAdapter::from(app.db_pool.clone())));

    let mut comment = Comment::new(helpers::unique_message("provider"), "!999");
    comment.description = Some("Round trip".to_string());
    let id = provider.add(&comment).await.unwrap();

    let stored = provider.get(id).await.unwrap().expect("comment exists");
    assert_eq!(stored.id, id);
    assert_eq!(stored.message, comment.message);
    assert_eq!(stored.description.as_deref(), Some("Round trip"));
    assert_eq!(stored.comment_with_link_to_rule, None);
    assert_eq!(stored.appearance_count, 1);
    assert_eq!(stored.number, "!999");

    assert_eq!(provider.delete(&[id]).await.unwrap(), 1);
    assert!(provider.get(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_add_assigns_number() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    let message = helpers::unique_message("numbered");
    let id = app.add_comment(&message).await;

    let response = app.request("GET", &format!("/api/comments/get/{id}"), None).await;
    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["message"], message.as_str());
    assert_eq!(data["appearanceCount"], 1);
    let number = data["number"].as_str().unwrap();
    assert!(number.starts_with('!'), "{number}");
    assert!(number.len() >= 4, "{number}");
}

#[tokio::test]
async fn test_increment_is_recorded() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    let message = helpers::unique_message("increment");
    let id = app.add_comment(&message).await;

    for _ in 0..2 {
        let response = app
            .request("POST", "/api/comments/increment", Some(serde_json::json!(id)))
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let response = app.request("GET", &format!("/api/comments/get/{id}"), None).await;
    assert_eq!(response.body["data"]["appearanceCount"], 3);

    let response = app
        .request("GET", &format!("/api/storyRecords/get?commentId={id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let usage = response.body["data"].as_array().unwrap();
    assert_eq!(usage.len(), 1);
    assert_eq!(usage[0]["commentId"], id.to_string());
    assert_eq!(usage[0]["commentText"], message.as_str());
    assert_eq!(usage[0]["incrementCount"], 2);
}

#[tokio::test]
async fn test_increment_unknown_comment() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    let response = app
        .request(
            "POST",
            "/api/comments/increment",
            Some(serde_json::json!(uuid::Uuid::new_v4())),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_keeps_omitted_fields() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    let response = app
        .request(
            "POST",
            "/api/comments/add",
            Some(serde_json::json!({
                "message": helpers::unique_message("update"),
                "description": "Explain why",
            })),
        )
        .await;
    let id = response.body["data"].as_str().unwrap().to_string();

    let response = app
        .request(
            "POST",
            "/api/comments/update",
            Some(serde_json::json!({ "id": id, "message": "Reworded" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", &format!("/api/comments/get/{id}"), None).await;
    assert_eq!(response.body["data"]["message"], "Reworded");

    let response = app
        .request("GET", &format!("/api/comments/description/{id}"), None)
        .await;
    assert_eq!(response.body["data"], "Explain why");
}

#[tokio::test]
async fn test_delete_removes_story() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    let id = app.add_comment(&helpers::unique_message("delete")).await;
    app.request("POST", "/api/comments/increment", Some(serde_json::json!(id)))
        .await;

    let response = app
        .request("POST", "/api/comments/delete", Some(serde_json::json!([id])))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"], 1);

    let response = app.request("GET", &format!("/api/comments/get/{id}"), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("GET", &format!("/api/storyRecords/get?commentId={id}"), None)
        .await;
    assert_eq!(response.body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_incomplete_comments_get_numbered() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    let id = app
        .insert_unnumbered_comment(&helpers::unique_message("incomplete"))
        .await;

    let response = app.request("GET", "/api/comments/getIncomplete", None).await;
    assert_eq!(response.status, StatusCode::OK);
    let listed = response.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|c| c["id"] == id.to_string());
    assert!(listed);

    let response = app
        .request("POST", "/api/comments/updateIncomplete", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"].as_u64().unwrap() >= 1);

    let response = app.request("GET", &format!("/api/comments/get/{id}"), None).await;
    assert_ne!(response.body["data"]["number"], "");
}

#[tokio::test]
async fn test_database_health() {
    let Some(app) = helpers::TestApp::new().await else {
        return;
    };
    let response = app.request("GET", "/api/health/database", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["database"], "connected");
}
