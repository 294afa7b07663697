//! Tests for the JSON file repository

use std::io;

use rstest::{fixture, rstest};
use tempfile::TempDir;

use catree::domain::Category;
use catree::infrastructure::traits::{CategoryRepository, JsonFileRepository};
use catree::util::testing;

#[fixture]
fn workdir() -> TempDir {
    testing::init_test_setup();
    TempDir::new().expect("create temp dir")
}

fn sample() -> Vec<Category> {
    vec![
        Category::new(1, "Electronics"),
        Category::new(2, "Phones").with_parent(1),
    ]
}

#[rstest]
fn given_saved_list_when_listing_then_round_trips(workdir: TempDir) {
    let repo = JsonFileRepository::new(workdir.path().join("categories.json"));

    repo.save_all(&sample()).unwrap();
    let listed = repo.list().unwrap();

    assert_eq!(listed, sample());
}

#[rstest]
fn given_update_when_listing_then_parent_change_is_persisted(workdir: TempDir) {
    let repo = JsonFileRepository::new(workdir.path().join("categories.json"));
    repo.save_all(&sample()).unwrap();

    let moved = Category::new(2, "Phones");
    repo.update(&moved).unwrap();

    let listed = repo.list().unwrap();
    assert_eq!(listed[1].parent_id(), None);
    // Only the single record changed
    assert_eq!(listed[0], sample()[0]);
}

#[rstest]
fn given_unknown_id_when_updating_then_not_found(workdir: TempDir) {
    let repo = JsonFileRepository::new(workdir.path().join("categories.json"));
    repo.save_all(&sample()).unwrap();

    let err = repo.update(&Category::new(99, "Ghost")).unwrap_err();

    assert_eq!(err.kind(), io::ErrorKind::NotFound);
}

#[rstest]
fn given_missing_file_when_listing_then_error(workdir: TempDir) {
    let repo = JsonFileRepository::new(workdir.path().join("absent.json"));

    assert!(repo.list().is_err());
}

#[rstest]
fn given_malformed_file_when_listing_then_invalid_data(workdir: TempDir) {
    let path = workdir.path().join("categories.json");
    std::fs::write(&path, "not json").unwrap();
    let repo = JsonFileRepository::new(&path);

    let err = repo.list().unwrap_err();

    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}
