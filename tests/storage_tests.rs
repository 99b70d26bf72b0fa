use record_manager::storage::models::{CredentialRecord, UserRecord};
use record_manager::storage::Database;

fn test_db() -> (tempfile::TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open(dir.path().join("data")).unwrap();
    (dir, db)
}

fn create_user(db: &Database, name: &str) -> (UserRecord, CredentialRecord) {
    db.create_user_with_credential(name, "stored-hash", "home-wifi", "w1")
        .unwrap()
        .expect("name should be free")
}

// ============================================================================
// User / credential tests
// ============================================================================

#[test]
fn test_create_user_with_credential() {
    let (_dir, db) = test_db();

    let (user, credential) = db
        .create_user_with_credential("ana", "stored-hash", "wifi", "w1")
        .unwrap()
        .expect("name should be free");

    assert_eq!(user.id, 1);
    assert_eq!(user.name, "ana");
    assert_eq!(user.password_hash, "stored-hash");

    assert_eq!(credential.id, 1);
    assert_eq!(credential.name, "wifi");
    assert_eq!(credential.password, "w1");
    assert_eq!(credential.user_id, user.id);
}

#[test]
fn test_create_assigns_sequential_ids() {
    let (_dir, db) = test_db();

    let (first, first_cred) = create_user(&db, "a");
    let (second, second_cred) = create_user(&db, "b");

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert_eq!(first_cred.id, 1);
    assert_eq!(second_cred.id, 2);
}

#[test]
fn test_create_duplicate_name_conflicts() {
    let (_dir, db) = test_db();
    let (original, original_cred) = create_user(&db, "ana");

    let conflict = db
        .create_user_with_credential("ana", "other-hash", "other-wifi", "w2")
        .unwrap();
    assert!(conflict.is_none());

    // The losing write must leave the original pair untouched.
    let user = db.get_user_by_name("ana").unwrap().expect("still present");
    assert_eq!(user.id, original.id);
    assert_eq!(user.password_hash, "stored-hash");

    let credential = db
        .get_credential_for_user(user.id)
        .unwrap()
        .expect("still present");
    assert_eq!(credential.id, original_cred.id);
    assert_eq!(credential.name, "home-wifi");
}

#[test]
fn test_get_user_by_name_not_found() {
    let (_dir, db) = test_db();
    assert!(db.get_user_by_name("nobody").unwrap().is_none());
}

#[test]
fn test_get_credential_for_user() {
    let (_dir, db) = test_db();
    let (user, credential) = create_user(&db, "ana");

    let retrieved = db
        .get_credential_for_user(user.id)
        .unwrap()
        .expect("credential should exist");
    assert_eq!(retrieved.id, credential.id);
    assert_eq!(retrieved.name, "home-wifi");
    assert_eq!(retrieved.password, "w1");

    assert!(db.get_credential_for_user(999).unwrap().is_none());
}

#[test]
fn test_update_credential() {
    let (_dir, db) = test_db();
    let (user, credential) = create_user(&db, "ana");

    let updated = db
        .update_credential(user.id, "office-wifi", "w2")
        .unwrap()
        .expect("credential should exist");
    assert_eq!(updated.id, credential.id);
    assert_eq!(updated.name, "office-wifi");
    assert_eq!(updated.password, "w2");

    // Persisted, not just returned
    let retrieved = db.get_credential_for_user(user.id).unwrap().unwrap();
    assert_eq!(retrieved.name, "office-wifi");
    assert_eq!(retrieved.password, "w2");
}

#[test]
fn test_update_credential_unknown_user() {
    let (_dir, db) = test_db();
    assert!(db.update_credential(42, "wifi", "w1").unwrap().is_none());
}

#[test]
fn test_delete_user_cascades() {
    let (_dir, db) = test_db();
    let (user, _) = create_user(&db, "ana");

    assert!(db.delete_user("ana").unwrap());

    assert!(db.get_user_by_name("ana").unwrap().is_none());
    assert!(db.get_credential_for_user(user.id).unwrap().is_none());
    assert!(db.list_users().unwrap().is_empty());
}

#[test]
fn test_delete_user_not_found() {
    let (_dir, db) = test_db();
    assert!(!db.delete_user("nobody").unwrap());
}

#[test]
fn test_delete_then_recreate_name() {
    let (_dir, db) = test_db();
    create_user(&db, "ana");

    db.delete_user("ana").unwrap();

    // The name index entry went with the user, so the name is free again.
    let recreated = db
        .create_user_with_credential("ana", "new-hash", "wifi", "w9")
        .unwrap();
    assert!(recreated.is_some());
}

#[test]
fn test_list_users_empty() {
    let (_dir, db) = test_db();
    assert!(db.list_users().unwrap().is_empty());
}

#[test]
fn test_list_users_in_creation_order() {
    let (_dir, db) = test_db();
    create_user(&db, "carla");
    create_user(&db, "ana");
    create_user(&db, "berta");

    let users = db.list_users().unwrap();
    assert_eq!(users.len(), 3);

    let names: Vec<&str> = users.iter().map(|u| u.user.name.as_str()).collect();
    assert_eq!(names, vec!["carla", "ana", "berta"]);

    for entry in &users {
        let credential = entry.credential.as_ref().expect("created as a pair");
        assert_eq!(credential.user_id, entry.user.id);
    }
}

// ============================================================================
// Image tests
// ============================================================================

#[test]
fn test_image_ids_ascend() {
    let (_dir, db) = test_db();

    let first = db.insert_image("received_image.jpg").unwrap();
    let second = db.insert_image("received_image.jpg").unwrap();
    let third = db.insert_image("received_image.jpg").unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert_eq!(third.id, 3);

    let latest = db.latest_image().unwrap().expect("images exist");
    assert_eq!(latest.id, 3);
    assert_eq!(latest.filename, "received_image.jpg");
}

#[test]
fn test_latest_image_empty() {
    let (_dir, db) = test_db();
    assert!(db.latest_image().unwrap().is_none());
}

#[test]
fn test_clear_images() {
    let (_dir, db) = test_db();
    db.insert_image("received_image.jpg").unwrap();
    db.insert_image("received_image.jpg").unwrap();
    db.insert_image("received_image.jpg").unwrap();

    assert_eq!(db.clear_images().unwrap(), 3);
    assert!(db.latest_image().unwrap().is_none());

    // Id allocation restarts once the table is empty
    let next = db.insert_image("received_image.jpg").unwrap();
    assert_eq!(next.id, 1);
}

#[test]
fn test_clear_images_empty() {
    let (_dir, db) = test_db();
    assert_eq!(db.clear_images().unwrap(), 0);
}
