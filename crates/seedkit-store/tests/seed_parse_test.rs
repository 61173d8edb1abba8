// Integration tests for seed file parsing and running

use std::path::PathBuf;

use seedkit_core::{run_seeding, RunOnStart, SeedError, TRACKING_COLLECTION};
use seedkit_store::seed::parse_seed_file;
use seedkit_store::SqliteStorage;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

#[test]
fn test_parse_blog_seed() {
    let seed = parse_seed_file(&fixtures_dir().join("seed_blog.yaml")).unwrap();

    assert_eq!(seed.schema_version, 0);
    assert_eq!(seed.options.run_on_start, RunOnStart::Development);
    assert_eq!(seed.seeds.len(), 2);
    assert_eq!(seed.seeds[1].data["meta"]["order"], 1);
}

#[test]
fn test_reject_duplicate_seed_ids() {
    let err = parse_seed_file(&fixtures_dir().join("seed_duplicate_ids.yaml")).unwrap_err();
    assert!(matches!(err, SeedError::InvalidSeedFile { .. }));
}

#[test]
fn test_missing_file_is_invalid_seed_file() {
    let err = parse_seed_file(&fixtures_dir().join("does_not_exist.yaml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read seed file"));
}

#[test]
fn test_seed_file_runs_twice_idempotently() {
    let mut storage = SqliteStorage::open_in_memory().unwrap();

    for expected_created in [2, 0] {
        let seed = parse_seed_file(&fixtures_dir().join("seed_blog.yaml")).unwrap();
        let result = run_seeding(seed.into_config(), &mut storage, None).unwrap();
        assert_eq!(result.created, expected_created);
    }

    assert_eq!(storage.count(TRACKING_COLLECTION).unwrap(), 2);
}
