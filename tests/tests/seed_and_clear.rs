//! Scenario D: seeding reports per-entity counts that match what a
//! follow-up list returns, clearing empties everything, and seeded records
//! are as complete as user-created ones.

use tests::{Backend, TestServer};

use druk_core::Registry;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn seed_counts_match_follow_up_lists() {
    for backend in [Backend::Memory, Backend::Sqlite] {
        let server = TestServer::start(backend).await;
        let admin = server.admin().await;

        let counts = admin.seed().await.unwrap();
        for entity in ["tours", "hotels", "festivals"] {
            let listed = admin.list(entity).await.unwrap();
            assert_eq!(
                listed.len(),
                counts[entity],
                "{entity} count mismatch after seed"
            );
            assert!(!listed.is_empty());
        }
    }
}

#[tokio::test]
async fn seeded_records_have_every_required_field() {
    let server = TestServer::start(Backend::Memory).await;
    let admin = server.admin().await;
    admin.seed().await.unwrap();

    let registry = Registry::builtin();
    for entity in ["tours", "hotels", "festivals"] {
        let schema = registry.schema(entity).unwrap();
        for record in admin.list(entity).await.unwrap() {
            for field in schema.required_fields() {
                let value = record.value(&field.name);
                assert!(
                    !value.is_empty(),
                    "{entity} record {} has empty required field `{}`",
                    record.id,
                    field.name
                );
            }
        }
    }
}

#[tokio::test]
async fn clear_database_empties_every_collection() {
    let server = TestServer::start(Backend::Sqlite).await;
    let admin = server.admin().await;
    admin.seed().await.unwrap();

    admin.clear_database().await.unwrap();
    for entity in ["tours", "hotels", "festivals", "flights", "itineraries"] {
        assert_eq!(admin.list(entity).await.unwrap().len(), 0);
    }
}

#[tokio::test]
async fn seeding_twice_appends() {
    let server = TestServer::start(Backend::Memory).await;
    let admin = server.admin().await;

    let first = admin.seed().await.unwrap();
    admin.seed().await.unwrap();
    let tours = admin.list("tours").await.unwrap();
    assert_eq!(tours.len(), first["tours"] * 2);
}
