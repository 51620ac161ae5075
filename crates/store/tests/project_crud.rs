//! Project repository behavior against the in-memory store: CRUD,
//! summary listings, and name search.

use std::time::Duration;

use taskory_store::models::{CreateProject, UpdateProject};
use taskory_store::repositories::project_repo::SUMMARY_LIMIT;
use taskory_store::repositories::ProjectRepo;
use taskory_store::MemoryStore;

fn project(name: &str) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        color_name: "Slate".to_string(),
        color_hex: "#64748b".to_string(),
    }
}

#[tokio::test]
async fn create_and_find_round_trip() {
    let store = MemoryStore::new();
    let created = ProjectRepo::create(&store, &project("Garden"), "u1")
        .await
        .unwrap();

    assert_eq!(created.name, "Garden");
    assert_eq!(created.user_id, "u1");
    assert_eq!(created.color_hex, "#64748b");

    let found = ProjectRepo::find_by_id(&store, &created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.name, "Garden");
}

#[tokio::test]
async fn find_missing_project_returns_none() {
    let store = MemoryStore::new();
    let found = ProjectRepo::find_by_id(&store, "missing").await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn summaries_list_newest_first_for_the_user() {
    let store = MemoryStore::new();
    let older = ProjectRepo::create(&store, &project("Older"), "u1")
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let newer = ProjectRepo::create(&store, &project("Newer"), "u1")
        .await
        .unwrap();
    ProjectRepo::create(&store, &project("Foreign"), "u2")
        .await
        .unwrap();

    let list = ProjectRepo::list_summaries(&store, "u1").await.unwrap();
    assert_eq!(list.total, 2);
    let ids: Vec<&str> = list.documents.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec![newer.id.as_str(), older.id.as_str()]);
}

#[tokio::test]
async fn summaries_cap_the_page_but_not_the_total() {
    let store = MemoryStore::new();
    for i in 0..(SUMMARY_LIMIT + 3) {
        ProjectRepo::create(&store, &project(&format!("Project {i}")), "u1")
            .await
            .unwrap();
    }

    let list = ProjectRepo::list_summaries(&store, "u1").await.unwrap();
    assert_eq!(list.total, SUMMARY_LIMIT + 3);
    assert_eq!(list.documents.len(), SUMMARY_LIMIT);
}

#[tokio::test]
async fn search_matches_name_fragments_case_insensitively() {
    let store = MemoryStore::new();
    let garden = ProjectRepo::create(&store, &project("Garden Plans"), "u1")
        .await
        .unwrap();
    ProjectRepo::create(&store, &project("Work"), "u1")
        .await
        .unwrap();
    ProjectRepo::create(&store, &project("Garden"), "u2")
        .await
        .unwrap();

    let list = ProjectRepo::search(&store, "gArDeN", "u1").await.unwrap();
    assert_eq!(list.total, 1);
    assert_eq!(list.documents[0].id, garden.id);
    assert_eq!(list.documents[0].color_name, "Slate");
}

#[tokio::test]
async fn update_rewrites_name_and_colors() {
    let store = MemoryStore::new();
    let created = ProjectRepo::create(&store, &project("Garden"), "u1")
        .await
        .unwrap();

    let updated = ProjectRepo::update(
        &store,
        &created.id,
        &UpdateProject {
            id: Some(created.id.clone()),
            name: "Allotment".to_string(),
            color_name: "Emerald".to_string(),
            color_hex: "#10b981".to_string(),
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.name, "Allotment");
    assert_eq!(updated.color_name, "Emerald");
    assert_eq!(updated.user_id, "u1");
}

#[tokio::test]
async fn update_and_delete_report_missing_projects() {
    let store = MemoryStore::new();
    let updated = ProjectRepo::update(
        &store,
        "missing",
        &UpdateProject {
            id: None,
            name: "x".into(),
            color_name: "Slate".into(),
            color_hex: "#64748b".into(),
        },
    )
    .await
    .unwrap();
    assert!(updated.is_none());

    assert!(!ProjectRepo::delete(&store, "missing").await.unwrap());
}

#[tokio::test]
async fn delete_removes_the_project() {
    let store = MemoryStore::new();
    let created = ProjectRepo::create(&store, &project("Garden"), "u1")
        .await
        .unwrap();

    assert!(ProjectRepo::delete(&store, &created.id).await.unwrap());
    assert!(ProjectRepo::find_by_id(&store, &created.id)
        .await
        .unwrap()
        .is_none());
}
