//! HTTP-level integration tests for project CRUD and access control.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_project, delete_auth, get_auth, post_json_auth, put_json_auth, register_user,
};
use sqlx::PgPool;

/// Creating a project returns 201 with defaults and the creator recorded.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_project(pool: PgPool) {
    let (token, user_id) = register_user(common::build_test_app(pool.clone()), "founder").await;

    let body = serde_json::json!({
        "title": "First Light",
        "artist_name": "The Examples",
        "description": "Debut record",
    });
    let response =
        post_json_auth(common::build_test_app(pool), "/api/v1/projects", &token, body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["title"], "First Light");
    assert_eq!(json["artist_name"], "The Examples");
    assert_eq!(json["status"], "doing");
    assert_eq!(json["created_by"], user_id);
}

/// A blank title is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_project_requires_title(pool: PgPool) {
    let (token, _) = register_user(common::build_test_app(pool.clone()), "untitled").await;

    let body = serde_json::json!({ "title": "   " });
    let response =
        post_json_auth(common::build_test_app(pool), "/api/v1/projects", &token, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// The listing shows only projects the caller created or collaborates on.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_is_scoped_to_member(pool: PgPool) {
    let (alice_token, _) = register_user(common::build_test_app(pool.clone()), "alice").await;
    let (bob_token, _) = register_user(common::build_test_app(pool.clone()), "bob").await;
    create_project(common::build_test_app(pool.clone()), &alice_token, "Alice's LP").await;
    create_project(common::build_test_app(pool.clone()), &bob_token, "Bob's EP").await;

    let response =
        get_auth(common::build_test_app(pool), "/api/v1/projects", &alice_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let projects = body_json(response).await;
    let projects = projects.as_array().unwrap().clone();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["title"], "Alice's LP");
}

/// Fetching someone else's project returns 403; an unknown id returns 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_enforces_membership(pool: PgPool) {
    let (owner_token, _) = register_user(common::build_test_app(pool.clone()), "insider").await;
    let (outsider_token, _) = register_user(common::build_test_app(pool.clone()), "outsider").await;
    let project_id =
        create_project(common::build_test_app(pool.clone()), &owner_token, "Secret").await;

    let uri = format!("/api/v1/projects/{project_id}");
    let response = get_auth(common::build_test_app(pool.clone()), &uri, &outsider_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response =
        get_auth(common::build_test_app(pool), "/api/v1/projects/999999", &owner_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Members can update project fields; clearing the title is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_project(pool: PgPool) {
    let (token, _) = register_user(common::build_test_app(pool.clone()), "editor").await;
    let project_id = create_project(common::build_test_app(pool.clone()), &token, "Draft").await;
    let uri = format!("/api/v1/projects/{project_id}");

    let body = serde_json::json!({ "title": "Final", "status": "done" });
    let response = put_json_auth(common::build_test_app(pool.clone()), &uri, &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Final");
    assert_eq!(json["status"], "done");

    let body = serde_json::json!({ "title": "  " });
    let response = put_json_auth(common::build_test_app(pool), &uri, &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Only the creator may delete a project.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_is_creator_only(pool: PgPool) {
    let (owner_token, _) = register_user(common::build_test_app(pool.clone()), "demolisher").await;
    register_user(common::build_test_app(pool.clone()), "helper").await;
    let project_id =
        create_project(common::build_test_app(pool.clone()), &owner_token, "Doomed").await;

    // Add a collaborator, who still may not delete.
    let body = serde_json::json!({ "email": "helper@test.com" });
    let collab_uri = format!("/api/v1/projects/{project_id}/collaborators");
    let response =
        post_json_auth(common::build_test_app(pool.clone()), &collab_uri, &owner_token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let login = serde_json::json!({ "username": "helper", "password": "test_password_123!" });
    let response =
        common::post_json(common::build_test_app(pool.clone()), "/api/v1/auth/login", login).await;
    assert_eq!(response.status(), StatusCode::OK);
    let helper_token = body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    let uri = format!("/api/v1/projects/{project_id}");
    let response = delete_auth(common::build_test_app(pool.clone()), &uri, &helper_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(common::build_test_app(pool.clone()), &uri, &owner_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(common::build_test_app(pool), &uri, &owner_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
