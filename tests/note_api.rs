mod common;

use axum::http::StatusCode;
use projman::models::{Project, ProjectNote};
use serde_json::{json, Value};

async fn create_project(server: &axum_test::TestServer) -> Project {
    common::authed(server.post("/projects"))
        .json(&json!({ "project_id": "P-1", "name": "n" }))
        .await
        .json()
}

async fn create_note(
    server: &axum_test::TestServer,
    project_id: i64,
    content: &str,
) -> axum_test::TestResponse {
    common::authed(server.post(&format!("/projects/{project_id}/notes")))
        .json(&json!({ "content": content }))
        .await
}

#[tokio::test]
async fn note_round_trip() {
    let (server, _store) = common::test_server();
    let project = create_project(&server).await;

    let response = create_note(&server, project.id, "kickoff scheduled").await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let note: ProjectNote = response.json();
    assert_eq!(note.project_id, project.id);
    assert_eq!(note.content, "kickoff scheduled");
    assert_eq!(note.created_at, note.updated_at);

    let fetched: ProjectNote = common::authed(server.get(&format!("/notes/{}", note.id)))
        .await
        .json();
    assert_eq!(fetched.content, note.content);
    assert_eq!(fetched.created_at, note.created_at);
}

#[tokio::test]
async fn note_against_missing_project_is_not_found() {
    let (server, _store) = common::test_server();

    let response = create_note(&server, 42, "orphan").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    // No row was created anywhere.
    let project = create_project(&server).await;
    let notes: Vec<ProjectNote> =
        common::authed(server.get(&format!("/projects/{}/notes", project.id)))
            .await
            .json();
    assert!(notes.is_empty());
}

#[tokio::test]
async fn empty_content_is_rejected() {
    let (server, _store) = common::test_server();
    let project = create_project(&server).await;

    let response = create_note(&server, project.id, "").await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn listing_notes_of_a_missing_project_is_not_found() {
    let (server, _store) = common::test_server();

    let response = common::authed(server.get("/projects/999/notes")).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_note_changes_content_only() {
    let (server, _store) = common::test_server();
    let project = create_project(&server).await;
    let note: ProjectNote = create_note(&server, project.id, "draft").await.json();

    let response = common::authed(server.put(&format!("/notes/{}", note.id)))
        .json(&json!({ "content": "final" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let updated: ProjectNote = response.json();
    assert_eq!(updated.content, "final");
    assert_eq!(updated.project_id, project.id);
    assert_eq!(updated.created_at, note.created_at);
    assert!(updated.updated_at >= note.updated_at);
}

#[tokio::test]
async fn delete_note_leaves_project_intact() {
    let (server, _store) = common::test_server();
    let project = create_project(&server).await;
    let note: ProjectNote = create_note(&server, project.id, "ephemeral").await.json();

    let response = common::authed(server.delete(&format!("/notes/{}", note.id))).await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = common::authed(server.get(&format!("/notes/{}", note.id))).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = common::authed(server.get(&format!("/projects/{}", project.id))).await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn deleting_a_project_cascades_to_its_notes() {
    let (server, _store) = common::test_server();
    let project = create_project(&server).await;
    let first: ProjectNote = create_note(&server, project.id, "one").await.json();
    let second: ProjectNote = create_note(&server, project.id, "two").await.json();

    let response = common::authed(server.delete(&format!("/projects/{}", project.id))).await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    for id in [first.id, second.id] {
        let response = common::authed(server.get(&format!("/notes/{id}"))).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    let response = common::authed(server.get(&format!("/projects/{}/notes", project.id))).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
