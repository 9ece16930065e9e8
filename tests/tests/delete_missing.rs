//! Scenario B: deleting an id that was never created returns 404 with the
//! entity's display name, and the collection size is unchanged.

use tests::{Backend, TestServer};

use druk_client::MutationCause;
use druk_core::Draft;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn delete_of_missing_id_is_404_and_size_preserving() {
    for backend in [Backend::Memory, Backend::Sqlite] {
        let server = TestServer::start(backend).await;
        let admin = server.admin().await;

        admin
            .create("tours", &Draft::default().with("name", "A").with("price", 1))
            .await
            .unwrap();

        let err = admin.delete("tours", 9999).await.unwrap_err();
        assert!(err.is_not_found());
        match &err.cause {
            MutationCause::Status { status, message } => {
                assert_eq!(*status, 404);
                assert_eq!(message, "Tour not found");
            }
            other => panic!("unexpected cause: {other:?}"),
        }

        assert_eq!(admin.list("tours").await.unwrap().len(), 1);
    }
}

#[tokio::test]
async fn malformed_id_is_400() {
    let server = TestServer::start(Backend::Memory).await;
    let response = reqwest::get(format!("{}/api/tours/not-a-number", server.base_url))
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("not-a-number"));
}

#[tokio::test]
async fn unknown_entity_is_404() {
    let server = TestServer::start(Backend::Memory).await;
    let response = reqwest::get(format!("{}/api/treks", server.base_url))
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn get_of_missing_id_is_404() {
    let server = TestServer::start(Backend::Memory).await;
    let gateway = server.gateway();
    let err = gateway.get("hotels", 42).await.unwrap_err();
    assert!(err.is_not_found());
}
