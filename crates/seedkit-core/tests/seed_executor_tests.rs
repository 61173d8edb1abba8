#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use serde_json::json;
use seedkit_core::ops::MemoryLogger;
use seedkit_core::{
    checksum, run_seeding, ConflictPolicy, MemoryStorage, SeedAction, SeedConfig, SeedEntity,
    SeedError, SeedExecutor, SeedLedger, SeedingOptions, Storage, TRACKING_COLLECTION,
};

use common::doc;

fn blog_entities() -> Vec<SeedEntity> {
    vec![
        SeedEntity::new("admin", "users", json!({ "name": "Admin", "role": "admin" })),
        SeedEntity::new("first-post", "posts", json!({ "title": "Hello" })),
        SeedEntity::new("second-post", "posts", json!({ "title": "Again" })),
    ]
}

#[test]
fn test_second_run_skips_everything() {
    let mut storage = MemoryStorage::new();

    let first = run_seeding(
        SeedConfig::new().with_entities(blog_entities()),
        &mut storage,
        None,
    )
    .unwrap();
    assert_eq!((first.total, first.created, first.skipped), (3, 3, 0));

    let second = run_seeding(
        SeedConfig::new().with_entities(blog_entities()),
        &mut storage,
        None,
    )
    .unwrap();
    assert_eq!((second.total, second.created, second.skipped), (3, 0, 3));
    assert!(second.seeds.iter().all(|s| s.action == SeedAction::Skipped));

    assert_eq!(storage.count("users"), 1);
    assert_eq!(storage.count("posts"), 2);
    assert_eq!(storage.count(TRACKING_COLLECTION), 3);
}

#[test]
fn test_skip_returns_stored_document() {
    let mut storage = MemoryStorage::new();
    let entities = || vec![SeedEntity::new("post", "posts", json!({ "title": "Hello" }))];
    let first = run_seeding(SeedConfig::new().with_entities(entities()), &mut storage, None)
        .unwrap();

    let id = first.seeds[0].id.clone();
    storage
        .update("posts", &id, doc(json!({ "views": 10 })))
        .unwrap();

    let second = run_seeding(SeedConfig::new().with_entities(entities()), &mut storage, None)
        .unwrap();
    assert_eq!(second.seeds[0].id, id);
    assert_eq!(second.seeds[0].data["views"], 10);
}

#[test]
fn test_update_policy_rewrites_changed_seed() {
    let mut storage = MemoryStorage::new();
    let v1 = || vec![SeedEntity::new("post", "posts", json!({ "title": "Draft" }))];
    let v2 = || vec![SeedEntity::new("post", "posts", json!({ "title": "Final" }))];
    let update = SeedingOptions::default().with_on_conflict(ConflictPolicy::Update);

    run_seeding(SeedConfig::new().with_entities(v1()), &mut storage, None).unwrap();

    let result = run_seeding(
        SeedConfig::new().with_entities(v2()),
        &mut storage,
        Some(update.clone()),
    )
    .unwrap();
    assert_eq!(result.updated, 1);
    assert_eq!(result.seeds[0].data["title"], "Final");
    assert_eq!(storage.documents("posts")[0].data["title"], "Final");

    let record = SeedLedger::find_by_seed_id(&storage, "post").unwrap().unwrap();
    assert_eq!(record.checksum, checksum(&doc(json!({ "title": "Final" }))));

    let again = run_seeding(SeedConfig::new().with_entities(v2()), &mut storage, Some(update))
        .unwrap();
    assert_eq!(again.skipped, 1);
    assert_eq!(again.updated, 0);
}

#[test]
fn test_entity_policy_overrides_global() {
    let mut storage = MemoryStorage::new();
    run_seeding(
        SeedConfig::new().with_entities(vec![SeedEntity::new(
            "post",
            "posts",
            json!({ "title": "Draft" }),
        )]),
        &mut storage,
        None,
    )
    .unwrap();

    let result = run_seeding(
        SeedConfig::new().with_entities(vec![SeedEntity::new(
            "post",
            "posts",
            json!({ "title": "Final" }),
        )
        .with_on_conflict(ConflictPolicy::Update)]),
        &mut storage,
        None,
    )
    .unwrap();
    assert_eq!(result.updated, 1);
}

#[test]
fn test_error_policy_reports_conflict_and_leaves_data() {
    let mut storage = MemoryStorage::new();
    run_seeding(
        SeedConfig::new().with_entities(vec![SeedEntity::new(
            "admin",
            "users",
            json!({ "name": "Admin" }),
        )]),
        &mut storage,
        None,
    )
    .unwrap();

    let err = run_seeding(
        SeedConfig::new().with_entities(vec![SeedEntity::new(
            "admin",
            "users",
            json!({ "name": "Changed" }),
        )]),
        &mut storage,
        Some(SeedingOptions::default().with_on_conflict(ConflictPolicy::Error)),
    )
    .unwrap_err();

    assert_eq!(
        err,
        SeedError::Conflict {
            seed_id: "admin".to_string(),
            collection: "users".to_string(),
        }
    );
    assert!(err.to_string().contains("admin"));
    assert!(err.to_string().contains("users"));
    assert_eq!(storage.documents("users")[0].data["name"], "Admin");
}

#[test]
fn test_conflict_after_creation_is_rolled_back() {
    let mut storage = MemoryStorage::new();
    run_seeding(
        SeedConfig::new().with_entities(vec![SeedEntity::new(
            "admin",
            "users",
            json!({ "name": "Admin" }),
        )]),
        &mut storage,
        None,
    )
    .unwrap();

    let err = run_seeding(
        SeedConfig::new().with_entities(vec![
            SeedEntity::new("welcome", "posts", json!({ "title": "Welcome" })),
            SeedEntity::new("admin", "users", json!({ "name": "Admin" })),
        ]),
        &mut storage,
        Some(SeedingOptions::default().with_on_conflict(ConflictPolicy::Error)),
    )
    .unwrap_err();

    let rollback = err.rollback().expect("conflict after a creation should roll back");
    assert!(err.original().is_conflict());
    assert_eq!(rollback.rolled_back_seeds.len(), 1);
    assert_eq!(rollback.rolled_back_seeds[0].seed_id, "welcome");
    assert_eq!(storage.count("posts"), 0);
    assert_eq!(storage.count("users"), 1);
    assert!(SeedLedger::find_by_seed_id(&storage, "welcome")
        .unwrap()
        .is_none());
    assert!(SeedLedger::find_by_seed_id(&storage, "admin")
        .unwrap()
        .is_some());
}

#[test]
fn test_seed_function_creations_are_rolled_back() {
    let mut storage = MemoryStorage::new();
    let config = SeedConfig::new().with_seed(|ctx| {
        ctx.seed(SeedEntity::new("author", "users", json!({ "name": "Ann" })))?;
        Err(SeedError::procedural("failed after seeding author"))
    });

    let err = run_seeding(config, &mut storage, None).unwrap_err();

    let rollback = err.rollback().expect("rollback error");
    assert_eq!(rollback.rolled_back_seeds.len(), 1);
    assert_eq!(rollback.rolled_back_seeds[0].seed_id, "author");
    assert!(rollback.is_complete());
    assert!(matches!(err.original(), SeedError::Procedural { .. }));
    assert_eq!(storage.count("users"), 0);
    assert_eq!(storage.count(TRACKING_COLLECTION), 0);
}

#[test]
fn test_failure_rolls_back_in_reverse_order() {
    let mut storage = MemoryStorage::new();
    let config = SeedConfig::new()
        .with_entities(vec![
            SeedEntity::new("admin", "users", json!({ "name": "Admin" })),
            SeedEntity::new("first", "posts", json!({ "title": "Hello" })),
        ])
        .with_seed(|_ctx| Err(SeedError::procedural("seed function exploded")));

    let err = run_seeding(config, &mut storage, None).unwrap_err();

    let rollback = err.rollback().expect("rollback error");
    let order: Vec<_> = rollback
        .rolled_back_seeds
        .iter()
        .map(|s| s.seed_id.as_str())
        .collect();
    assert_eq!(order, vec!["first", "admin"]);
    assert!(rollback.rollback_failures.is_empty());
    assert!(err.original().to_string().contains("seed function exploded"));
    assert!(err.to_string().contains("rolled back"));

    assert_eq!(storage.count("users"), 0);
    assert_eq!(storage.count("posts"), 0);
    assert_eq!(storage.count(TRACKING_COLLECTION), 0);
}

#[test]
fn test_rollback_continues_after_failed_delete() {
    let mut storage = MemoryStorage::new();
    storage.fail_deletes_in("posts");
    let config = SeedConfig::new()
        .with_entities(vec![
            SeedEntity::new("admin", "users", json!({ "name": "Admin" })),
            SeedEntity::new("first", "posts", json!({ "title": "Hello" })),
        ])
        .with_seed(|_ctx| Err(SeedError::procedural("boom")));

    let err = run_seeding(config, &mut storage, None).unwrap_err();

    let rollback = err.rollback().unwrap();
    assert_eq!(rollback.rollback_failures.len(), 1);
    assert_eq!(rollback.rollback_failures[0].seed_id, "first");
    assert_eq!(rollback.rolled_back_seeds.len(), 1);
    assert_eq!(rollback.rolled_back_seeds[0].seed_id, "admin");
    assert!(!rollback.is_complete());
    assert_eq!(storage.count("users"), 0);
    assert_eq!(storage.count("posts"), 1);
}

#[test]
fn test_failed_create_rolls_back_earlier_creations() {
    let mut storage = MemoryStorage::new();
    storage.fail_creates_in("posts");

    let err = run_seeding(
        SeedConfig::new().with_entities(blog_entities()),
        &mut storage,
        None,
    )
    .unwrap_err();

    let rollback = err.rollback().unwrap();
    assert_eq!(rollback.rolled_back_seeds.len(), 1);
    assert_eq!(rollback.rolled_back_seeds[0].seed_id, "admin");
    assert!(matches!(err.original(), SeedError::Storage { .. }));
    assert_eq!(storage.count("users"), 0);
    assert_eq!(storage.count(TRACKING_COLLECTION), 0);
}

#[test]
fn test_skipped_seeds_are_not_rolled_back() {
    let mut storage = MemoryStorage::new();
    run_seeding(
        SeedConfig::new().with_entities(vec![SeedEntity::new(
            "admin",
            "users",
            json!({ "name": "Admin" }),
        )]),
        &mut storage,
        None,
    )
    .unwrap();

    let config = SeedConfig::new()
        .with_entities(vec![
            SeedEntity::new("admin", "users", json!({ "name": "Admin" })),
            SeedEntity::new("post", "posts", json!({ "title": "Hello" })),
        ])
        .with_seed(|_ctx| Err(SeedError::procedural("boom")));
    let err = run_seeding(config, &mut storage, None).unwrap_err();

    let rollback = err.rollback().unwrap();
    assert_eq!(rollback.rolled_back_seeds.len(), 1);
    assert_eq!(rollback.rolled_back_seeds[0].seed_id, "post");
    assert_eq!(storage.count("users"), 1);
    assert_eq!(storage.count(TRACKING_COLLECTION), 1);
}

#[test]
fn test_failure_without_creations_is_returned_unchanged() {
    let mut storage = MemoryStorage::new();
    let err = run_seeding(
        SeedConfig::new().with_entities(vec![SeedEntity::new("bad", "posts", json!([1, 2]))]),
        &mut storage,
        None,
    )
    .unwrap_err();

    assert!(matches!(err, SeedError::InvalidSeedData { .. }));
    assert!(err.rollback().is_none());
}

#[test]
fn test_blank_document_id_is_rejected() {
    let mut storage = MemoryStorage::new();
    storage.blank_ids_in("posts");

    let err = run_seeding(
        SeedConfig::new().with_entities(vec![SeedEntity::new(
            "post",
            "posts",
            json!({ "title": "Hello" }),
        )]),
        &mut storage,
        None,
    )
    .unwrap_err();

    assert_eq!(
        err,
        SeedError::MissingDocumentId {
            seed_id: "post".to_string(),
            collection: "posts".to_string(),
        }
    );
    assert_eq!(storage.count(TRACKING_COLLECTION), 0);
}

#[test]
fn test_seed_context_sees_same_run_and_ledger() {
    let mut storage = MemoryStorage::new();

    let mut observed = Vec::new();
    let config = SeedConfig::new().with_seed(|ctx| {
        let author = ctx.seed(SeedEntity::new("author", "users", json!({ "name": "Ann" })))?;
        ctx.seed(SeedEntity::new(
            "post",
            "posts",
            json!({ "title": "Hello", "author_id": author.id }),
        ))?;
        observed.push(ctx.get_seeded("author")?);
        observed.push(ctx.get_seeded("never-seeded")?);
        Ok(())
    });
    let result = run_seeding(config, &mut storage, None).unwrap();
    assert_eq!(result.created, 2);

    let author = observed[0].as_ref().unwrap();
    assert_eq!(author.action, SeedAction::Created);
    assert_eq!(storage.documents("posts")[0].data["author_id"], author.id.as_str());
    assert!(observed[1].is_none());

    let mut from_ledger = None;
    let config = SeedConfig::new().with_seed(|ctx| {
        from_ledger = ctx.get_seeded("author")?;
        Ok(())
    });
    run_seeding(config, &mut storage, None).unwrap();
    let from_ledger = from_ledger.unwrap();
    assert_eq!(from_ledger.action, SeedAction::Skipped);
    assert_eq!(from_ledger.id, author.id);
    assert_eq!(from_ledger.data["name"], "Ann");
}

#[test]
fn test_defaults_run_before_seed_function() {
    let mut storage = MemoryStorage::new();
    let mut author_seen = false;
    let config = SeedConfig::new()
        .with_defaults(|b| vec![b.collection("users").create("author", json!({ "name": "Ann" }))])
        .with_seed(|ctx| {
            author_seen = ctx.get_seeded("author")?.is_some();
            Ok(())
        });

    run_seeding(config, &mut storage, None).unwrap();
    assert!(author_seen);
}

#[test]
fn test_quiet_run_suppresses_progress_messages() {
    let logger = MemoryLogger::new();
    let mut storage = MemoryStorage::new();
    let config = SeedConfig::new()
        .with_entities(vec![SeedEntity::new("post", "posts", json!({ "title": "Hi" }))])
        .with_seed(|ctx| {
            ctx.log("custom message");
            Ok(())
        });
    SeedExecutor::new(&mut storage)
        .with_logger(&logger)
        .run(config, Some(SeedingOptions::default().with_quiet(true)))
        .unwrap();
    assert!(logger.messages().is_empty());

    let logger = MemoryLogger::new();
    let mut storage = MemoryStorage::new();
    let config = SeedConfig::new()
        .with_entities(vec![SeedEntity::new("post", "posts", json!({ "title": "Hi" }))])
        .with_seed(|ctx| {
            ctx.log("custom message");
            Ok(())
        });
    SeedExecutor::new(&mut storage)
        .with_logger(&logger)
        .run(config, None)
        .unwrap();
    let messages = logger.messages();
    assert!(messages.iter().any(|m| m == "custom message"));
    assert_eq!(
        messages.last().map(String::as_str),
        Some("Seeding complete: 1 created, 0 updated, 0 skipped")
    );
}

#[test]
fn test_run_options_replace_config_options() {
    let mut storage = MemoryStorage::new();
    let mut seen_policy = None;
    let config = SeedConfig::new()
        .with_options(SeedingOptions::default().with_on_conflict(ConflictPolicy::Error))
        .with_seed(|ctx| {
            seen_policy = Some(ctx.options().on_conflict);
            Ok(())
        });

    run_seeding(
        config,
        &mut storage,
        Some(SeedingOptions::default().with_on_conflict(ConflictPolicy::Update)),
    )
    .unwrap();
    assert_eq!(seen_policy, Some(ConflictPolicy::Update));
}
