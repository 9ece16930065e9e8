//! Writes require a server-issued session token; reads are public. The
//! admin password is only ever compared server-side.

use tests::{Backend, TestServer, ADMIN_PASSWORD};

use druk_core::Draft;
use pretty_assertions::assert_eq;

fn tour_draft() -> Draft {
    Draft::default().with("name", "Druk Trek").with("price", 100)
}

#[tokio::test]
async fn writes_without_a_session_are_401() {
    let server = TestServer::start(Backend::Memory).await;
    let anon = server.gateway();

    let err = anon.create("tours", &tour_draft()).await.unwrap_err();
    assert!(!err.is_not_found() && !err.is_validation());
    assert!(anon.delete("tours", 1).await.is_err());
    assert!(anon.seed().await.is_err());
    assert!(anon.clear_database().await.is_err());

    // Reads stay public.
    assert_eq!(anon.list("tours").await.unwrap().len(), 0);
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let server = TestServer::start(Backend::Memory).await;
    let gateway = server.gateway();
    assert!(gateway.login("druk123").await.is_err());
}

#[tokio::test]
async fn logout_revokes_the_token() {
    let server = TestServer::start(Backend::Memory).await;
    let admin = server.admin().await;

    admin.create("tours", &tour_draft()).await.unwrap();
    admin.logout().await.unwrap();
    assert!(admin.create("tours", &tour_draft()).await.is_err());

    // A fresh login restores write access.
    admin.login(ADMIN_PASSWORD).await.unwrap();
    admin.create("tours", &tour_draft()).await.unwrap();
}
