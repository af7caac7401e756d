//! Integration tests for the project image set and its main image.
//!
//! Exercises the repository layer against a real database:
//! - Create with images, main defaults to the first
//! - Add with and without `set_as_main`
//! - Delete of main and non-main images, down to an empty set
//! - Explicit main selection and membership checks
//! - Cascade delete and duplicate references
//! - Concurrent edits of one project keep the main image in the set

use assert_matches::assert_matches;
use sitecms_core::error::CoreError;
use sitecms_core::project_images::main_image_consistent;
use sitecms_db::models::project::{CreateProject, NewProject, UpdateProject};
use sitecms_db::models::status::ProjectStatus;
use sitecms_db::repositories::{ProjectImageRepo, ProjectRepo};
use sitecms_db::DbError;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_project(title: &str, images: &[&str]) -> NewProject {
    CreateProject {
        title: title.to_string(),
        description: None,
        status: None,
        location: None,
        service_ids: vec![],
        images: images.iter().map(|s| s.to_string()).collect(),
    }
    .normalize()
    .unwrap()
}

fn urls(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

async fn main_image_id(pool: &PgPool, project_id: i64) -> Option<i64> {
    ProjectRepo::find_by_id(pool, project_id)
        .await
        .unwrap()
        .unwrap()
        .main_image_id
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_sets_first_image_as_main(pool: PgPool) {
    let detail = ProjectRepo::create(&pool, &new_project("Bridge", &["/uploads/a.jpg", "/uploads/b.jpg"]))
        .await
        .unwrap();

    assert_eq!(detail.images.len(), 2);
    assert_eq!(detail.project.main_image_id, Some(detail.images[0].id));
    assert_eq!(detail.main_image_url.as_deref(), Some("/uploads/a.jpg"));
    assert_eq!(detail.project.status, ProjectStatus::Planned);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_without_images_is_rejected(pool: PgPool) {
    let input = NewProject {
        title: "Empty".into(),
        description: None,
        status: ProjectStatus::Planned,
        location: None,
        service_ids: vec![],
        images: vec![],
    };
    let err = ProjectRepo::create(&pool, &input).await.unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_unknown_service_rolls_back(pool: PgPool) {
    let mut input = new_project("Depot", &["/uploads/a.jpg"]);
    input.service_ids = vec![999];

    let err = ProjectRepo::create(&pool, &input).await.unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));

    let images: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM project_images")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(images, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn image_reference_belongs_to_one_project(pool: PgPool) {
    ProjectRepo::create(&pool, &new_project("First", &["/uploads/shared.jpg"]))
        .await
        .unwrap();

    let err = ProjectRepo::create(&pool, &new_project("Second", &["/uploads/shared.jpg"]))
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Sqlx(sqlx::Error::Database(ref db))
        if db.constraint() == Some("uq_project_images_url"));
}

// ---------------------------------------------------------------------------
// Add
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_keeps_main_unless_requested(pool: PgPool) {
    let detail = ProjectRepo::create(&pool, &new_project("Tower", &["/uploads/a.jpg"]))
        .await
        .unwrap();
    let id = detail.project.id;
    let first = detail.images[0].id;

    let after = ProjectImageRepo::add_images(&pool, id, &urls(&["/uploads/b.jpg"]), false)
        .await
        .unwrap();
    assert_eq!(after.images.len(), 2);
    assert_eq!(after.project.main_image_id, Some(first));

    let after = ProjectImageRepo::add_images(
        &pool,
        id,
        &urls(&["/uploads/c.jpg", "/uploads/d.jpg"]),
        true,
    )
    .await
    .unwrap();
    assert_eq!(after.images.len(), 4);
    assert_eq!(after.main_image_url.as_deref(), Some("/uploads/c.jpg"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_to_emptied_project_assigns_main(pool: PgPool) {
    let detail = ProjectRepo::create(&pool, &new_project("Shed", &["/uploads/a.jpg"]))
        .await
        .unwrap();
    let id = detail.project.id;

    let (emptied, _) = ProjectImageRepo::delete_image(&pool, id, detail.images[0].id)
        .await
        .unwrap();
    assert!(emptied.images.is_empty());
    assert_eq!(emptied.project.main_image_id, None);

    let after = ProjectImageRepo::add_images(&pool, id, &urls(&["/uploads/b.jpg"]), false)
        .await
        .unwrap();
    assert_eq!(after.project.main_image_id, Some(after.images[0].id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_to_missing_project_is_not_found(pool: PgPool) {
    let err = ProjectImageRepo::add_images(&pool, 4242, &urls(&["/uploads/a.jpg"]), false)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        DbError::Core(CoreError::NotFound { entity: "Project", id: 4242 })
    );
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_main_promotes_earliest_remaining(pool: PgPool) {
    let detail = ProjectRepo::create(&pool, &new_project("Hall", &["/uploads/a.jpg", "/uploads/b.jpg"]))
        .await
        .unwrap();
    let id = detail.project.id;
    let (a, b) = (detail.images[0].id, detail.images[1].id);

    let (after, removed) = ProjectImageRepo::delete_image(&pool, id, a).await.unwrap();
    assert_eq!(removed.url, "/uploads/a.jpg");
    assert_eq!(after.project.main_image_id, Some(b));

    let (after, _) = ProjectImageRepo::delete_image(&pool, id, b).await.unwrap();
    assert!(after.images.is_empty());
    assert_eq!(after.project.main_image_id, None);
    assert_eq!(main_image_id(&pool, id).await, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_other_image_keeps_main(pool: PgPool) {
    let detail = ProjectRepo::create(&pool, &new_project("Hall", &["/uploads/a.jpg", "/uploads/b.jpg"]))
        .await
        .unwrap();
    let id = detail.project.id;
    let (a, b) = (detail.images[0].id, detail.images[1].id);

    let (after, _) = ProjectImageRepo::delete_image(&pool, id, b).await.unwrap();
    assert_eq!(after.project.main_image_id, Some(a));
    assert_eq!(after.images.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_foreign_image_is_not_found(pool: PgPool) {
    let one = ProjectRepo::create(&pool, &new_project("One", &["/uploads/a.jpg"]))
        .await
        .unwrap();
    let two = ProjectRepo::create(&pool, &new_project("Two", &["/uploads/b.jpg"]))
        .await
        .unwrap();

    let err = ProjectImageRepo::delete_image(&pool, one.project.id, two.images[0].id)
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::NotFound { entity: "ProjectImage", .. }));

    // The other project's image survives.
    let images = ProjectImageRepo::list_by_project(&pool, two.project.id).await.unwrap();
    assert_eq!(images.len(), 1);
}

// ---------------------------------------------------------------------------
// Concurrent edits
// ---------------------------------------------------------------------------

async fn assert_consistent(pool: &PgPool, project_id: i64) {
    let detail = ProjectRepo::find_detail(pool, project_id).await.unwrap().unwrap();
    let ids: Vec<i64> = detail.images.iter().map(|img| img.id).collect();
    assert!(
        main_image_consistent(detail.project.main_image_id, &ids),
        "main {:?} not consistent with images {ids:?}",
        detail.project.main_image_id,
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_deletes_of_main_and_next_leave_last_as_main(pool: PgPool) {
    for round in 0..5 {
        let refs: Vec<String> = ["a", "b", "c"]
            .iter()
            .map(|name| format!("/uploads/{round}-{name}.jpg"))
            .collect();
        let refs: Vec<&str> = refs.iter().map(String::as_str).collect();
        let detail = ProjectRepo::create(&pool, &new_project("Race", &refs)).await.unwrap();
        let id = detail.project.id;
        let (a, b, c) = (detail.images[0].id, detail.images[1].id, detail.images[2].id);

        let first = tokio::spawn({
            let pool = pool.clone();
            async move { ProjectImageRepo::delete_image(&pool, id, a).await }
        });
        let second = tokio::spawn({
            let pool = pool.clone();
            async move { ProjectImageRepo::delete_image(&pool, id, b).await }
        });
        let (first, second) = tokio::join!(first, second);
        first.unwrap().unwrap();
        second.unwrap().unwrap();

        let after = ProjectRepo::find_detail(&pool, id).await.unwrap().unwrap();
        assert_eq!(after.project.main_image_id, Some(c));
        assert_eq!(after.images.iter().map(|img| img.id).collect::<Vec<_>>(), vec![c]);
        assert_consistent(&pool, id).await;
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_add_and_delete_of_main_stay_consistent(pool: PgPool) {
    let detail = ProjectRepo::create(&pool, &new_project("Race", &["/uploads/a.jpg"]))
        .await
        .unwrap();
    let id = detail.project.id;
    let a = detail.images[0].id;

    let add = tokio::spawn({
        let pool = pool.clone();
        async move {
            ProjectImageRepo::add_images(&pool, id, &urls(&["/uploads/b.jpg"]), false).await
        }
    });
    let delete = tokio::spawn({
        let pool = pool.clone();
        async move { ProjectImageRepo::delete_image(&pool, id, a).await }
    });
    let (add, delete) = tokio::join!(add, delete);
    add.unwrap().unwrap();
    delete.unwrap().unwrap();

    let after = ProjectRepo::find_detail(&pool, id).await.unwrap().unwrap();
    assert_eq!(after.images.len(), 1);
    assert_eq!(after.project.main_image_id, Some(after.images[0].id));
    assert_consistent(&pool, id).await;
}

// ---------------------------------------------------------------------------
// Set main
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn set_main_switches_to_member_image(pool: PgPool) {
    let detail = ProjectRepo::create(&pool, &new_project("Villa", &["/uploads/a.jpg", "/uploads/b.jpg"]))
        .await
        .unwrap();
    let id = detail.project.id;
    let b = detail.images[1].id;

    let after = ProjectImageRepo::set_main(&pool, id, b).await.unwrap();
    assert_eq!(after.project.main_image_id, Some(b));
    assert_eq!(after.main_image_url.as_deref(), Some("/uploads/b.jpg"));

    // Setting the current main again is a no-op.
    let again = ProjectImageRepo::set_main(&pool, id, b).await.unwrap();
    assert_eq!(again.project.main_image_id, Some(b));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn set_main_rejects_image_of_other_project(pool: PgPool) {
    let one = ProjectRepo::create(&pool, &new_project("One", &["/uploads/a.jpg"]))
        .await
        .unwrap();
    let two = ProjectRepo::create(&pool, &new_project("Two", &["/uploads/b.jpg"]))
        .await
        .unwrap();

    let err = ProjectImageRepo::set_main(&pool, one.project.id, two.images[0].id)
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));
    assert_eq!(main_image_id(&pool, one.project.id).await, Some(one.images[0].id));
}

// ---------------------------------------------------------------------------
// Update and delete project
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_changes_fields_but_not_images(pool: PgPool) {
    let detail = ProjectRepo::create(&pool, &new_project("Old", &["/uploads/a.jpg"]))
        .await
        .unwrap();
    let changes = UpdateProject {
        title: Some("New".into()),
        description: None,
        status: Some("completed".into()),
        location: None,
        service_ids: None,
    }
    .normalize()
    .unwrap();

    let updated = ProjectRepo::update(&pool, detail.project.id, &changes)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.project.title, "New");
    assert_eq!(updated.project.status, ProjectStatus::Completed);
    assert_eq!(updated.status_label, "Completed");
    assert_eq!(updated.project.main_image_id, detail.project.main_image_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_clears_text_only_when_blank(pool: PgPool) {
    let input = CreateProject {
        title: "Depot".into(),
        description: Some("Steel frame".into()),
        status: None,
        location: Some("Koper".into()),
        service_ids: vec![],
        images: urls(&["/uploads/a.jpg"]),
    }
    .normalize()
    .unwrap();
    let detail = ProjectRepo::create(&pool, &input).await.unwrap();

    let changes = UpdateProject {
        title: None,
        description: Some("".into()),
        status: None,
        location: None,
        service_ids: None,
    }
    .normalize()
    .unwrap();
    let updated = ProjectRepo::update(&pool, detail.project.id, &changes)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.project.description, None);
    assert_eq!(updated.project.location.as_deref(), Some("Koper"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_project_cascades_images(pool: PgPool) {
    let detail = ProjectRepo::create(&pool, &new_project("Gone", &["/uploads/a.jpg", "/uploads/b.jpg"]))
        .await
        .unwrap();

    let removed = ProjectRepo::delete(&pool, detail.project.id).await.unwrap();
    assert_eq!(removed, Some(urls(&["/uploads/a.jpg", "/uploads/b.jpg"])));

    let images = ProjectImageRepo::list_by_project(&pool, detail.project.id)
        .await
        .unwrap();
    assert!(images.is_empty());

    let again = ProjectRepo::delete(&pool, detail.project.id).await.unwrap();
    assert_eq!(again, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_details_groups_images_per_project(pool: PgPool) {
    ProjectRepo::create(&pool, &new_project("One", &["/uploads/a.jpg", "/uploads/b.jpg"]))
        .await
        .unwrap();
    ProjectRepo::create(&pool, &new_project("Two", &["/uploads/c.jpg"]))
        .await
        .unwrap();

    let list = ProjectRepo::list_details(&pool).await.unwrap();
    assert_eq!(list.len(), 2);
    for detail in &list {
        assert!(!detail.images.is_empty());
        assert!(detail.images.iter().all(|img| img.project_id == detail.project.id));
        assert!(detail.main_image_url.is_some());
    }
}
