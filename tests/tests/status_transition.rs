//! Scenario C: PATCHing the status of a pending custom-tour request moves
//! it to the new value, visible on the next read. Any enumerated status may
//! move to any other; values outside the set are 400.

use tests::{Backend, TestServer};

use druk_core::{Draft, Value};
use pretty_assertions::assert_eq;

fn request_draft() -> Draft {
    Draft::default()
        .with("customerName", "Tashi")
        .with("email", "tashi@example.bt")
        .with("groupSize", 4)
}

#[tokio::test]
async fn approve_a_pending_request() {
    for backend in [Backend::Memory, Backend::Sqlite] {
        let server = TestServer::start(backend).await;
        let admin = server.admin().await;

        // Creation defaults the status field to "pending".
        let created = admin.create("custom-tours", &request_draft()).await.unwrap();
        assert_eq!(created.value("status"), &Value::String("pending".into()));

        admin.list("custom-tours").await.unwrap();
        let updated = admin
            .patch_status("custom-tours", created.id, "approved")
            .await
            .unwrap();
        assert_eq!(updated.value("status"), &Value::String("approved".into()));

        // The next collection read reflects the transition.
        let listed = admin.list("custom-tours").await.unwrap();
        assert_eq!(listed[0].value("status"), &Value::String("approved".into()));
    }
}

#[tokio::test]
async fn any_status_can_move_to_any_other() {
    let server = TestServer::start(Backend::Memory).await;
    let admin = server.admin().await;
    let created = admin.create("custom-tours", &request_draft()).await.unwrap();

    for status in ["completed", "pending", "rejected", "approved"] {
        let updated = admin
            .patch_status("custom-tours", created.id, status)
            .await
            .unwrap();
        assert_eq!(updated.value("status"), &Value::String(status.into()));
    }
}

#[tokio::test]
async fn unrecognized_status_is_400() {
    let server = TestServer::start(Backend::Memory).await;
    let admin = server.admin().await;
    let created = admin.create("custom-tours", &request_draft()).await.unwrap();

    let err = admin
        .patch_status("custom-tours", created.id, "maybe")
        .await
        .unwrap_err();
    assert!(err.is_validation());

    // The stored status is untouched.
    let record = admin.get("custom-tours", created.id).await.unwrap();
    assert_eq!(record.value("status"), &Value::String("pending".into()));
}

#[tokio::test]
async fn status_patch_on_statusless_entity_is_400() {
    let server = TestServer::start(Backend::Memory).await;
    let admin = server.admin().await;
    let tour = admin
        .create("tours", &Draft::default().with("name", "A").with("price", 1))
        .await
        .unwrap();

    let err = admin
        .patch_status("tours", tour.id, "approved")
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn status_patch_on_missing_id_is_404() {
    let server = TestServer::start(Backend::Memory).await;
    let admin = server.admin().await;
    let err = admin
        .patch_status("custom-tours", 123, "approved")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}
