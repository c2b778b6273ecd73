//! HTTP-level integration tests for the invitation workflow.
//!
//! Tests cover sending, duplicate rejection, accept/decline, the
//! invited-user-only rule, and cancellation.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_project, delete_auth, get_auth, post_json_auth, register_user};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Send an invitation via the API and return its JSON.
async fn send_invitation(
    app: axum::Router,
    token: &str,
    project_id: i64,
    invited_user_id: i64,
) -> serde_json::Value {
    let body =
        serde_json::json!({ "project_id": project_id, "invited_user_id": invited_user_id });
    let response = post_json_auth(app, "/api/v1/invitations/send", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Respond to an invitation via the API.
async fn respond(
    app: axum::Router,
    token: &str,
    invitation_id: i64,
    accept: bool,
) -> axum::response::Response {
    let body = serde_json::json!({ "accept": accept });
    let uri = format!("/api/v1/invitations/{invitation_id}/respond");
    post_json_auth(app, &uri, token, body).await
}

// ---------------------------------------------------------------------------
// Sending
// ---------------------------------------------------------------------------

/// Sending an invitation returns 201 and the invitee sees it as pending.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_send_invitation(pool: PgPool) {
    let (owner_token, _) = register_user(common::build_test_app(pool.clone()), "inviter").await;
    let (invitee_token, invitee_id) =
        register_user(common::build_test_app(pool.clone()), "invitee").await;
    let project_id =
        create_project(common::build_test_app(pool.clone()), &owner_token, "Album").await;

    let invitation = send_invitation(
        common::build_test_app(pool.clone()),
        &owner_token,
        project_id,
        invitee_id,
    )
    .await;
    assert_eq!(invitation["project_id"], project_id);
    assert_eq!(invitation["invited_user_id"], invitee_id);
    assert_eq!(invitation["status"], "pending");

    // The invitee sees it in their inbox, with project and inviter context.
    let response =
        get_auth(common::build_test_app(pool), "/api/v1/invitations", &invitee_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let inbox = body_json(response).await;
    let inbox = inbox.as_array().unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0]["project_title"], "Album");
    assert_eq!(inbox[0]["inviter_username"], "inviter");
}

/// Inviting an unknown username returns 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_invite_unknown_user(pool: PgPool) {
    let (owner_token, _) = register_user(common::build_test_app(pool.clone()), "seancer").await;
    let project_id =
        create_project(common::build_test_app(pool.clone()), &owner_token, "Album").await;

    let body = serde_json::json!({ "project_id": project_id, "invited_user_id": 999_999 });
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/invitations/send",
        &owner_token,
        body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Inviting yourself returns 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_invite_self_rejected(pool: PgPool) {
    let (owner_token, owner_id) =
        register_user(common::build_test_app(pool.clone()), "narcissist").await;
    let project_id =
        create_project(common::build_test_app(pool.clone()), &owner_token, "Album").await;

    let body = serde_json::json!({ "project_id": project_id, "invited_user_id": owner_id });
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/invitations/send",
        &owner_token,
        body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A second pending invitation for the same user and project returns 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_pending_invitation_rejected(pool: PgPool) {
    let (owner_token, _) = register_user(common::build_test_app(pool.clone()), "spammer").await;
    let (_, spammee_id) = register_user(common::build_test_app(pool.clone()), "spammee").await;
    let project_id =
        create_project(common::build_test_app(pool.clone()), &owner_token, "Album").await;

    send_invitation(common::build_test_app(pool.clone()), &owner_token, project_id, spammee_id)
        .await;

    let body = serde_json::json!({ "project_id": project_id, "invited_user_id": spammee_id });
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/invitations/send",
        &owner_token,
        body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Responding
// ---------------------------------------------------------------------------

/// Accepting an invitation makes the invitee an active collaborator.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_accept_creates_membership(pool: PgPool) {
    let (owner_token, _) = register_user(common::build_test_app(pool.clone()), "welcomer").await;
    let (invitee_token, invitee_id) =
        register_user(common::build_test_app(pool.clone()), "welcomed").await;
    let project_id =
        create_project(common::build_test_app(pool.clone()), &owner_token, "Album").await;

    let invitation = send_invitation(
        common::build_test_app(pool.clone()),
        &owner_token,
        project_id,
        invitee_id,
    )
    .await;
    let invitation_id = invitation["id"].as_i64().unwrap();

    let response =
        respond(common::build_test_app(pool.clone()), &invitee_token, invitation_id, true).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "accepted");

    // The invitee can now read the project, with the default role recorded.
    let uri = format!("/api/v1/projects/{project_id}/collaborators");
    let response = get_auth(common::build_test_app(pool), &uri, &invitee_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["username"], "welcomed");
    assert_eq!(listed[0]["role"], "artist");
}

/// Declining leaves the invitee without project access.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_decline_leaves_no_membership(pool: PgPool) {
    let (owner_token, _) = register_user(common::build_test_app(pool.clone()), "decliner0").await;
    let (invitee_token, invitee_id) =
        register_user(common::build_test_app(pool.clone()), "decliner1").await;
    let project_id =
        create_project(common::build_test_app(pool.clone()), &owner_token, "Album").await;

    let invitation = send_invitation(
        common::build_test_app(pool.clone()),
        &owner_token,
        project_id,
        invitee_id,
    )
    .await;
    let invitation_id = invitation["id"].as_i64().unwrap();

    let response =
        respond(common::build_test_app(pool.clone()), &invitee_token, invitation_id, false).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "declined");

    let uri = format!("/api/v1/projects/{project_id}");
    let response = get_auth(common::build_test_app(pool), &uri, &invitee_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Only the invited user may respond.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_respond_requires_invitee(pool: PgPool) {
    let (owner_token, _) = register_user(common::build_test_app(pool.clone()), "sender2").await;
    let (_, target_id) = register_user(common::build_test_app(pool.clone()), "target2").await;
    let (meddler_token, _) = register_user(common::build_test_app(pool.clone()), "meddler").await;
    let project_id =
        create_project(common::build_test_app(pool.clone()), &owner_token, "Album").await;

    let invitation = send_invitation(
        common::build_test_app(pool.clone()),
        &owner_token,
        project_id,
        target_id,
    )
    .await;
    let invitation_id = invitation["id"].as_i64().unwrap();

    let response =
        respond(common::build_test_app(pool), &meddler_token, invitation_id, true).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// An invitation can only be responded to once.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_respond_is_single_shot(pool: PgPool) {
    let (owner_token, _) = register_user(common::build_test_app(pool.clone()), "onceler").await;
    let (invitee_token, invitee_id) =
        register_user(common::build_test_app(pool.clone()), "oncelee").await;
    let project_id =
        create_project(common::build_test_app(pool.clone()), &owner_token, "Album").await;

    let invitation = send_invitation(
        common::build_test_app(pool.clone()),
        &owner_token,
        project_id,
        invitee_id,
    )
    .await;
    let invitation_id = invitation["id"].as_i64().unwrap();

    let response =
        respond(common::build_test_app(pool.clone()), &invitee_token, invitation_id, false).await;
    assert_eq!(response.status(), StatusCode::OK);

    // A second response, even flipping the answer, is rejected.
    let response =
        respond(common::build_test_app(pool), &invitee_token, invitation_id, true).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

/// The inviter can cancel a pending invitation; the invitee then cannot accept.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_cancel_pending_invitation(pool: PgPool) {
    let (owner_token, _) = register_user(common::build_test_app(pool.clone()), "withdrawer").await;
    let (invitee_token, invitee_id) =
        register_user(common::build_test_app(pool.clone()), "withdrawee").await;
    let project_id =
        create_project(common::build_test_app(pool.clone()), &owner_token, "Album").await;

    let invitation = send_invitation(
        common::build_test_app(pool.clone()),
        &owner_token,
        project_id,
        invitee_id,
    )
    .await;
    let invitation_id = invitation["id"].as_i64().unwrap();

    let uri = format!("/api/v1/invitations/{invitation_id}/cancel");
    let response = delete_auth(common::build_test_app(pool.clone()), &uri, &owner_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "cancelled");

    let response =
        respond(common::build_test_app(pool), &invitee_token, invitation_id, true).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A bystander may not cancel someone else's invitation.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_cancel_requires_inviter_or_creator(pool: PgPool) {
    let (owner_token, _) = register_user(common::build_test_app(pool.clone()), "issuer").await;
    let (_, issued_id) = register_user(common::build_test_app(pool.clone()), "issued").await;
    let (bystander_token, _) =
        register_user(common::build_test_app(pool.clone()), "bystander").await;
    let project_id =
        create_project(common::build_test_app(pool.clone()), &owner_token, "Album").await;

    let invitation = send_invitation(
        common::build_test_app(pool.clone()),
        &owner_token,
        project_id,
        issued_id,
    )
    .await;
    let invitation_id = invitation["id"].as_i64().unwrap();

    let uri = format!("/api/v1/invitations/{invitation_id}/cancel");
    let response = delete_auth(common::build_test_app(pool), &uri, &bystander_token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
