//! Create/update/delete round trips through the client gateway, checking
//! that every confirmed write is visible on the next collection read.

use tests::{Backend, TestServer};

use druk_core::{Draft, Value};
use pretty_assertions::assert_eq;

fn tour_draft(name: &str, price: i64) -> Draft {
    Draft::default().with("name", name).with("price", price)
}

async fn create_then_list_shows_the_record(backend: Backend) {
    let server = TestServer::start(backend).await;
    let admin = server.admin().await;

    assert_eq!(admin.list("tours").await.unwrap().len(), 0);

    let created = admin
        .create("tours", &tour_draft("Druk Path Trek", 1450))
        .await
        .unwrap();
    assert!(created.id > 0);
    assert_eq!(created.value("name"), &Value::String("Druk Path Trek".into()));

    let listed = admin.list("tours").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
}

async fn update_then_list_shows_new_values(backend: Backend) {
    let server = TestServer::start(backend).await;
    let admin = server.admin().await;

    let created = admin
        .create("tours", &tour_draft("Druk Path Trek", 1450))
        .await
        .unwrap();
    // Warm the cache, then mutate; the follow-up list must re-fetch.
    admin.list("tours").await.unwrap();

    let patch = Draft::default().with("price", 1600);
    let updated = admin.update("tours", created.id, &patch).await.unwrap();
    assert_eq!(updated.value("price"), &Value::I64(1600));
    assert_eq!(updated.value("name"), &Value::String("Druk Path Trek".into()));

    let listed = admin.list("tours").await.unwrap();
    assert_eq!(listed[0].value("price"), &Value::I64(1600));
}

async fn delete_then_list_drops_the_record(backend: Backend) {
    let server = TestServer::start(backend).await;
    let admin = server.admin().await;

    let a = admin.create("tours", &tour_draft("A", 1)).await.unwrap();
    let b = admin.create("tours", &tour_draft("B", 2)).await.unwrap();
    admin.list("tours").await.unwrap();

    admin.delete("tours", a.id).await.unwrap();
    let listed = admin.list("tours").await.unwrap();
    let ids: Vec<i64> = listed.iter().map(|r| r.id).collect();
    assert_eq!(ids, [b.id]);
}

async fn list_filter_narrows_by_equality(backend: Backend) {
    let server = TestServer::start(backend).await;
    let admin = server.admin().await;

    admin
        .create("tours", &tour_draft("A", 1).with("category", "cultural"))
        .await
        .unwrap();
    admin
        .create("tours", &tour_draft("B", 2).with("category", "trekking"))
        .await
        .unwrap();

    let cultural = admin
        .list_where("tours", "category", "cultural")
        .await
        .unwrap();
    assert_eq!(cultural.len(), 1);
    assert_eq!(cultural[0].value("name"), &Value::String("A".into()));

    // Query parameters that name no schema field are ignored.
    let all = admin.list_where("tours", "nonsense", "x").await.unwrap();
    assert_eq!(all.len(), 2);
}

async fn deleting_a_tour_detaches_its_itineraries(backend: Backend) {
    let server = TestServer::start(backend).await;
    let admin = server.admin().await;

    let tour = admin.create("tours", &tour_draft("A", 1)).await.unwrap();
    let itinerary = admin
        .create(
            "itineraries",
            &Draft::default()
                .with("title", "Week in Paro")
                .with("tourId", tour.id),
        )
        .await
        .unwrap();

    admin.delete("tours", tour.id).await.unwrap();
    let itinerary = admin.get("itineraries", itinerary.id).await.unwrap();
    assert_eq!(itinerary.value("tourId"), &Value::Null);
}

macro_rules! for_each_backend {
    ($($name:ident),* $(,)?) => {
        mod memory {
            use super::*;
            $(
                #[tokio::test]
                async fn $name() {
                    super::$name(Backend::Memory).await;
                }
            )*
        }
        mod sqlite {
            use super::*;
            $(
                #[tokio::test]
                async fn $name() {
                    super::$name(Backend::Sqlite).await;
                }
            )*
        }
    };
}

for_each_backend!(
    create_then_list_shows_the_record,
    update_then_list_shows_new_values,
    delete_then_list_drops_the_record,
    list_filter_narrows_by_equality,
    deleting_a_tour_detaches_its_itineraries,
);
