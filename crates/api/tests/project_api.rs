//! HTTP-level integration tests for project endpoints.
//!
//! Covers the create-redirect contract, AI starter-task generation,
//! detail and search reads, and the task cascade on delete.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::Router;
use chrono::Utc;
use common::{
    body_json, delete_json_auth, get_auth, post_json_auth, put_json_auth, session_token,
};
use taskory_genai::{MockTaskGenerator, TaskDraft};
use taskory_store::MemoryStore;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a project via the API and return the id from the redirect.
async fn create_project(app: Router, token: &str, name: &str) -> String {
    let response = post_json_auth(
        app,
        "/api/v1/projects",
        serde_json::json!({ "name": name, "color_name": "Slate", "color_hex": "#64748b" }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let location = response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("redirect must carry a location");
    location
        .rsplit('/')
        .next()
        .expect("location must end with the project id")
        .to_string()
}

/// Create a task via the API, optionally attached to a project.
async fn create_task(app: Router, token: &str, content: &str, project: Option<&str>) -> String {
    let response = post_json_auth(
        app,
        "/api/v1/tasks",
        serde_json::json!({ "content": content, "project": project }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["$id"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// Creating a project answers with a 303 redirect to its app page, and
/// the project is immediately readable there.
#[tokio::test]
async fn test_create_project_redirects_to_its_page() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store);
    let token = session_token("u1");

    let response = post_json_auth(
        app.clone(),
        "/api/v1/projects",
        serde_json::json!({ "name": "Garden", "color_name": "Emerald", "color_hex": "#10b981" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let location = response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap()
        .to_string();
    assert!(location.starts_with("/app/projects/"));

    let id = location.rsplit('/').next().unwrap();
    let detail = get_auth(app, &format!("/api/v1/projects/{id}"), &token).await;
    assert_eq!(detail.status(), StatusCode::OK);

    let json = body_json(detail).await;
    assert_eq!(json["project"]["name"], "Garden");
    assert_eq!(json["project"]["color_name"], "Emerald");
    assert_eq!(json["project"]["userId"], "u1");
    assert!(json["tasks"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_project_validates_the_color_pair() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store);
    let token = session_token("u1");

    // Hex belongs to Blue, not Red.
    let response = post_json_auth(
        app.clone(),
        "/api/v1/projects",
        serde_json::json!({ "name": "Garden", "color_name": "Red", "color_hex": "#3b82f6" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = post_json_auth(
        app,
        "/api/v1/projects",
        serde_json::json!({ "name": "Garden", "color_name": "Vermilion", "color_hex": "#ef4444" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_project_rejects_bad_names() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store);
    let token = session_token("u1");

    let response = post_json_auth(
        app.clone(),
        "/api/v1/projects",
        serde_json::json!({ "name": "  ", "color_name": "Slate", "color_hex": "#64748b" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let long_name = "x".repeat(121);
    let response = post_json_auth(
        app,
        "/api/v1/projects",
        serde_json::json!({ "name": long_name, "color_name": "Slate", "color_hex": "#64748b" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// AI task generation
// ---------------------------------------------------------------------------

/// Opting in to generation inserts the returned drafts as tasks of the
/// new project, passing the prompt through verbatim.
#[tokio::test]
async fn test_create_with_ai_inserts_generated_tasks() {
    let store = Arc::new(MemoryStore::new());
    let generator = Arc::new(MockTaskGenerator::new(vec![vec![
        TaskDraft {
            content: "Prepare the beds".to_string(),
            due_date: Some(Utc::now() + chrono::Duration::days(3)),
        },
        TaskDraft {
            content: "Buy seeds".to_string(),
            due_date: None,
        },
    ]]));
    let app = common::build_test_app_with_generator(store, generator.clone());
    let token = session_token("u1");

    let response = post_json_auth(
        app.clone(),
        "/api/v1/projects",
        serde_json::json!({
            "name": "Garden",
            "color_name": "Slate",
            "color_hex": "#64748b",
            "ai_task_gen": true,
            "task_gen_prompt": "Plan a vegetable garden",
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(generator.call_count(), 1);
    assert_eq!(generator.prompts(), vec!["Plan a vegetable garden"]);

    let id = response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap()
        .rsplit('/')
        .next()
        .unwrap()
        .to_string();
    let detail = body_json(get_auth(app, &format!("/api/v1/projects/{id}"), &token).await).await;

    let tasks = detail["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    // Dated draft sorts before the undated one.
    assert_eq!(tasks[0]["content"], "Prepare the beds");
    assert_eq!(tasks[1]["content"], "Buy seeds");
    for task in tasks {
        assert_eq!(task["project"], id.as_str());
        assert_eq!(task["userId"], "u1");
        assert_eq!(task["completed"], false);
    }
}

#[tokio::test]
async fn test_create_without_ai_skips_the_generator() {
    let store = Arc::new(MemoryStore::new());
    let generator = Arc::new(MockTaskGenerator::with_drafts(&["never inserted"]));
    let app = common::build_test_app_with_generator(store.clone(), generator.clone());
    let token = session_token("u1");

    create_project(app, &token, "Plain").await;

    assert_eq!(generator.call_count(), 0);
    assert_eq!(store.len("tasks"), 0);
}

/// A generator that comes back empty (the degraded failure mode) still
/// leaves the project in place.
#[tokio::test]
async fn test_failed_generation_still_creates_the_project() {
    let store = Arc::new(MemoryStore::new());
    let generator = Arc::new(MockTaskGenerator::empty());
    let app = common::build_test_app_with_generator(store, generator.clone());
    let token = session_token("u1");

    let response = post_json_auth(
        app.clone(),
        "/api/v1/projects",
        serde_json::json!({
            "name": "Garden",
            "color_name": "Slate",
            "color_hex": "#64748b",
            "ai_task_gen": true,
            "task_gen_prompt": "Plan a vegetable garden",
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(generator.call_count(), 1);

    let id = response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap()
        .rsplit('/')
        .next()
        .unwrap()
        .to_string();
    let detail = body_json(get_auth(app, &format!("/api/v1/projects/{id}"), &token).await).await;
    assert_eq!(detail["project"]["name"], "Garden");
    assert!(detail["tasks"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

/// The detail view lists only open tasks, soonest due date first with
/// undated tasks at the end.
#[tokio::test]
async fn test_detail_lists_open_tasks_soonest_first() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store);
    let token = session_token("u1");
    let now = Utc::now();

    let id = create_project(app.clone(), &token, "Garden").await;
    let undated = create_task(app.clone(), &token, "undated", Some(&id)).await;
    let next_week = {
        let response = post_json_auth(
            app.clone(),
            "/api/v1/tasks",
            serde_json::json!({
                "content": "next week",
                "project": id,
                "due_date": (now + chrono::Duration::days(7)).to_rfc3339(),
            }),
            &token,
        )
        .await;
        body_json(response).await["$id"].as_str().unwrap().to_string()
    };
    let tomorrow = {
        let response = post_json_auth(
            app.clone(),
            "/api/v1/tasks",
            serde_json::json!({
                "content": "tomorrow",
                "project": id,
                "due_date": (now + chrono::Duration::days(1)).to_rfc3339(),
            }),
            &token,
        )
        .await;
        body_json(response).await["$id"].as_str().unwrap().to_string()
    };

    // A completed task never shows up in the detail view.
    let finished = create_task(app.clone(), &token, "finished", Some(&id)).await;
    put_json_auth(
        app.clone(),
        "/api/v1/tasks",
        serde_json::json!({ "id": finished, "completed": true }),
        &token,
    )
    .await;

    let detail = body_json(get_auth(app, &format!("/api/v1/projects/{id}"), &token).await).await;
    let listed: Vec<&str> = detail["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|task| task["$id"].as_str().unwrap())
        .collect();
    assert_eq!(listed, vec![&tomorrow, &next_week, &undated]);
}

#[tokio::test]
async fn test_detail_of_another_users_project_returns_403() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store);
    let owner = session_token("u1");
    let intruder = session_token("u2");

    let id = create_project(app.clone(), &owner, "Private").await;

    let response = get_auth(app, &format!("/api/v1/projects/{id}"), &intruder).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_detail_of_unknown_project_returns_404() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store);
    let token = session_token("u1");

    let response = get_auth(app, "/api/v1/projects/missing", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_search_matches_name_fragments() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store);
    let token = session_token("u1");

    let garden = create_project(app.clone(), &token, "Garden Plans").await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    let work = create_project(app.clone(), &token, "Work Stuff").await;

    let hits = body_json(get_auth(app.clone(), "/api/v1/projects/search?q=garden", &token).await).await;
    assert_eq!(hits["total"], 1);
    assert_eq!(hits["documents"][0]["$id"], garden.as_str());
    assert_eq!(hits["documents"][0]["name"], "Garden Plans");

    // An empty term returns every project, newest first.
    let all = body_json(get_auth(app.clone(), "/api/v1/projects/search", &token).await).await;
    assert_eq!(all["total"], 2);
    assert_eq!(all["documents"][0]["$id"], work.as_str());
    assert_eq!(all["documents"][1]["$id"], garden.as_str());

    let none = body_json(get_auth(app, "/api/v1/projects/search?q=zzz", &token).await).await;
    assert_eq!(none["total"], 0);
}

#[tokio::test]
async fn test_search_is_scoped_to_the_session_user() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store);
    let mine = session_token("u1");
    let theirs = session_token("u2");

    create_project(app.clone(), &mine, "Garden").await;

    let hits = body_json(get_auth(app, "/api/v1/projects/search?q=garden", &theirs).await).await;
    assert_eq!(hits["total"], 0);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_update_rewrites_name_and_colors() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store);
    let token = session_token("u1");

    let id = create_project(app.clone(), &token, "Garden").await;

    let response = put_json_auth(
        app,
        "/api/v1/projects",
        serde_json::json!({ "id": id, "name": "Allotment", "color_name": "Emerald", "color_hex": "#10b981" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Allotment");
    assert_eq!(json["color_name"], "Emerald");
    assert_eq!(json["color_hex"], "#10b981");
}

#[tokio::test]
async fn test_update_without_id_returns_400() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store);
    let token = session_token("u1");

    let response = put_json_auth(
        app,
        "/api/v1/projects",
        serde_json::json!({ "name": "Garden", "color_name": "Slate", "color_hex": "#64748b" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Project id not found.");
}

#[tokio::test]
async fn test_update_unknown_project_returns_404() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store);
    let token = session_token("u1");

    let response = put_json_auth(
        app,
        "/api/v1/projects",
        serde_json::json!({ "id": "missing", "name": "Garden", "color_name": "Slate", "color_hex": "#64748b" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_other_users_project_returns_403() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store);
    let owner = session_token("u1");
    let intruder = session_token("u2");

    let id = create_project(app.clone(), &owner, "Private").await;

    let response = put_json_auth(
        app,
        "/api/v1/projects",
        serde_json::json!({ "id": id, "name": "Stolen", "color_name": "Slate", "color_hex": "#64748b" }),
        &intruder,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// Deleting a project removes its tasks with it, leaving unrelated
/// tasks untouched.
#[tokio::test]
async fn test_delete_cascades_to_the_projects_tasks() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store.clone());
    let token = session_token("u1");

    let id = create_project(app.clone(), &token, "Garden").await;
    create_task(app.clone(), &token, "weed", Some(&id)).await;
    create_task(app.clone(), &token, "water", Some(&id)).await;
    create_task(app.clone(), &token, "unrelated", None).await;

    let response = delete_json_auth(
        app.clone(),
        "/api/v1/projects",
        serde_json::json!({ "id": id }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let detail = get_auth(app.clone(), &format!("/api/v1/projects/{id}"), &token).await;
    assert_eq!(detail.status(), StatusCode::NOT_FOUND);

    assert_eq!(store.len("projects"), 0);
    assert_eq!(store.len("tasks"), 1);
    let inbox = body_json(get_auth(app, "/api/v1/tasks?view=inbox", &token).await).await;
    assert_eq!(inbox["documents"][0]["content"], "unrelated");
}

#[tokio::test]
async fn test_delete_without_id_returns_400() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store);
    let token = session_token("u1");

    let response = delete_json_auth(app, "/api/v1/projects", serde_json::json!({}), &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "No project found with this id."
    );
}

#[tokio::test]
async fn test_delete_other_users_project_returns_403() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store.clone());
    let owner = session_token("u1");
    let intruder = session_token("u2");

    let id = create_project(app.clone(), &owner, "Private").await;

    let response = delete_json_auth(
        app,
        "/api/v1/projects",
        serde_json::json!({ "id": id }),
        &intruder,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(store.len("projects"), 1);
}
