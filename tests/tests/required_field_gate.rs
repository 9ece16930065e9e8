//! Scenario A: the form controller blocks submission while a required
//! field is empty — the server never sees the draft — and a valid draft
//! results in exactly one create call.

use tests::{Backend, TestServer};

use druk_client::{Flow, FormController};
use druk_core::{Error, Registry, Value};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn empty_required_field_never_reaches_the_server() {
    let server = TestServer::start(Backend::Memory).await;
    let admin = server.admin().await;
    let registry = Registry::builtin();
    let schema = registry.schema("tours").unwrap();

    let mut form = FormController::create(schema);
    form.edit_field("name", "");
    form.edit_field("price", 100);

    let err = form.submit().unwrap_err();
    assert!(matches!(err, Error::Validation { field } if field == "name"));

    // No POST was sent: the collection is still empty.
    assert_eq!(admin.list("tours").await.unwrap().len(), 0);
}

#[tokio::test]
async fn valid_draft_submits_once_and_appears_in_the_table() {
    let server = TestServer::start(Backend::Memory).await;
    let admin = server.admin().await;
    let registry = Registry::builtin();
    let schema = registry.schema("tours").unwrap();

    let mut form = FormController::create(schema);
    form.edit_field("name", "Druk Trek");
    form.edit_field("price", 100);

    let submission = form.submit().unwrap();
    assert_eq!(submission.flow, Flow::Create);
    // In flight: the submit affordance is disabled until resolution.
    assert!(matches!(form.submit(), Err(Error::SubmitInFlight)));

    let created = admin.create("tours", &submission.draft).await.unwrap();
    form.succeed();
    assert!(!form.is_open());

    let listed = admin.list("tours").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
    assert_eq!(listed[0].value("name"), &Value::String("Druk Trek".into()));
}

#[tokio::test]
async fn server_side_validation_rejects_with_field_detail() {
    let server = TestServer::start(Backend::Memory).await;
    let admin = server.admin().await;

    // Bypass the client gate: POST a payload with a bad price directly.
    let draft = druk_core::Draft::default()
        .with("name", "Druk Trek")
        .with("price", "free");
    let err = admin.create("tours", &draft).await.unwrap_err();
    assert!(err.is_validation());

    // P5: the failed create stored nothing.
    assert_eq!(admin.list("tours").await.unwrap().len(), 0);
}

#[tokio::test]
async fn failed_mutation_keeps_the_draft_for_retry() {
    let server = TestServer::start(Backend::Memory).await;
    // Unauthenticated gateway: the create is rejected with 401.
    let anon = server.gateway();
    let registry = Registry::builtin();
    let schema = registry.schema("tours").unwrap();

    let mut form = FormController::create(schema);
    form.edit_field("name", "Druk Trek");
    form.edit_field("price", 100);
    let submission = form.submit().unwrap();

    let err = anon.create("tours", &submission.draft).await.unwrap_err();
    assert!(!err.is_not_found());
    form.fail();

    // Draft is intact and resubmittable.
    assert!(form.is_open());
    assert_eq!(form.draft().get("name"), Some(&Value::String("Druk Trek".into())));
    assert!(form.submit().is_ok());
}
