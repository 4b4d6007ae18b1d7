//! Tests of the REST client and of the store, against a mocked HTTP server

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use life_dashboard::client::Client;
use life_dashboard::item::parse_date;
use life_dashboard::traits::TodoSource;
use life_dashboard::{DateRange, RemoteTodoStore, Schedule, TodoFields, TodoId, TodoPatch};

const TOKEN: &str = "s3cr3t";

fn server_list() -> serde_json::Value {
    json!([
        {
            "id": "trip",
            "title": "Trip to the mountains",
            "startDate": "2025-12-09",
            "endDate": "2025-12-11",
            "allDay": true,
            "completed": false,
        },
        {
            "_id": 7,
            "title": "Dentist",
            "startDate": "2025-12-10T00:00:00.000Z",
            "endDate": "2025-12-10T00:00:00.000Z",
            "allDay": false,
            "startTime": "14:00",
            "endTime": "14:30",
            "completed": true,
        },
        {
            "id": "broken",
            "title": "",
            "startDate": "2025-12-10",
        },
    ])
}

async fn mount_list(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/todos"))
        .and(header("Authorization", "Bearer s3cr3t"))
        .respond_with(ResponseTemplate::new(200).set_body_json(server_list()))
        .mount(server)
        .await;
}

async fn loaded_store(server: &MockServer) -> RemoteTodoStore {
    let client = Client::new(server.uri(), Some(TOKEN.to_string())).unwrap();
    let mut store = RemoteTodoStore::new(client);
    store.load().await.unwrap();
    store
}

fn date(s: &str) -> chrono::NaiveDate {
    parse_date(s).unwrap()
}

#[tokio::test]
async fn list_decodes_and_skips_invalid_records() {
    let _ = env_logger::builder().is_test(true).try_init();
    let server = MockServer::start().await;
    mount_list(&server).await;

    let store = loaded_store(&server).await;
    assert_eq!(store.todos().len(), 2);

    let dentist = store.get(&TodoId::from("7")).unwrap();
    assert_eq!(dentist.start_date(), date("2025-12-10"));
    assert!(dentist.completed());
    assert!(dentist.all_day() == false);
}

#[tokio::test]
async fn no_token_means_an_empty_list_without_requests() {
    let _ = env_logger::builder().is_test(true).try_init();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let client = Client::new(server.uri(), None).unwrap();
    assert!(client.list().await.unwrap().is_empty());

    let mut store = RemoteTodoStore::new(client);
    store.load().await.unwrap();
    assert!(store.todos().is_empty());
}

#[tokio::test]
async fn add_uses_the_server_id() {
    let _ = env_logger::builder().is_test(true).try_init();
    let server = MockServer::start().await;
    mount_list(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/todos"))
        .and(header("Authorization", "Bearer s3cr3t"))
        .and(body_partial_json(json!({ "title": "Buy a tree", "startDate": "2025-12-20", "allDay": true })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "srv-1",
            "title": "Buy a tree",
            "startDate": "2025-12-20",
            "endDate": "2025-12-20",
            "allDay": true,
            "completed": false,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut store = loaded_store(&server).await;
    let id = store.add(TodoFields {
        title: "Buy a tree".to_string(),
        dates: DateRange::single(date("2025-12-20")),
        schedule: Schedule::AllDay,
        completed: false,
    }).await.unwrap();

    assert_eq!(id, TodoId::from("srv-1"));
    assert_eq!(store.todos().len(), 3);
}

#[tokio::test]
async fn failed_add_changes_nothing() {
    let _ = env_logger::builder().is_test(true).try_init();
    let server = MockServer::start().await;
    mount_list(&server).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut store = loaded_store(&server).await;
    let before = store.todos().to_vec();
    let result = store.add(TodoFields {
        title: "Buy a tree".to_string(),
        dates: DateRange::single(date("2025-12-20")),
        schedule: Schedule::AllDay,
        completed: false,
    }).await;
    assert!(result.is_err());
    assert_eq!(store.todos(), &before[..]);
}

#[tokio::test]
async fn failed_update_is_rolled_back_by_refetching() {
    let _ = env_logger::builder().is_test(true).try_init();
    let server = MockServer::start().await;
    mount_list(&server).await;
    Mock::given(method("PUT"))
        .and(path("/api/todos/trip"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let mut store = loaded_store(&server).await;
    let patch = TodoPatch { title: Some("Trip to the sea".to_string()), ..TodoPatch::default() };
    assert!(store.update(&TodoId::from("trip"), patch).await.is_err());

    let fresh = store.remote().list().await.unwrap();
    assert_eq!(store.todos(), &fresh[..]);
    assert_eq!(store.get(&TodoId::from("trip")).unwrap().title(), "Trip to the mountains");
}

#[tokio::test]
async fn drag_and_drop_sends_the_shifted_range() {
    let _ = env_logger::builder().is_test(true).try_init();
    let server = MockServer::start().await;
    mount_list(&server).await;
    Mock::given(method("PUT"))
        .and(path("/api/todos/trip"))
        .and(header("Authorization", "Bearer s3cr3t"))
        .and(body_partial_json(json!({
            "id": "trip",
            "title": "Trip to the mountains",
            "startDate": "2025-12-15",
            "endDate": "2025-12-17",
            "allDay": true,
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut store = loaded_store(&server).await;
    let id = TodoId::from("trip");
    // dropping on its own start date sends nothing
    store.reschedule(&id, date("2025-12-09")).await.unwrap();
    store.reschedule(&id, date("2025-12-15")).await.unwrap();

    let trip = store.get(&id).unwrap();
    assert_eq!(trip.dates(), DateRange::new(date("2025-12-15"), date("2025-12-17")).unwrap());
}

#[tokio::test]
async fn delete() {
    let _ = env_logger::builder().is_test(true).try_init();
    let server = MockServer::start().await;
    mount_list(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/api/todos/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/todos/trip"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let mut store = loaded_store(&server).await;
    store.remove(&TodoId::from("7")).await.unwrap();
    assert!(store.get(&TodoId::from("7")).is_none());

    // The server refuses: the todo comes back with the authoritative list
    assert!(store.remove(&TodoId::from("trip")).await.is_err());
    assert!(store.get(&TodoId::from("trip")).is_some());
    assert_eq!(store.todos().len(), 2);
}

#[tokio::test]
async fn mistyped_records_do_not_break_the_list() {
    let _ = env_logger::builder().is_test(true).try_init();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "ok", "title": "Fine", "startDate": "2025-12-10", "allDay": true },
            { "id": "flag", "title": "Done?", "startDate": "2025-12-10", "completed": "yes" },
            { "id": "num", "title": 5, "startDate": "2025-12-10" },
            { "id": "both", "_id": "64f0", "title": "Two ids", "startDate": "2025-12-11" },
        ])))
        .mount(&server)
        .await;

    let store = loaded_store(&server).await;
    let ids: Vec<&str> = store.todos().iter().map(|t| t.id().as_str()).collect();
    assert_eq!(ids, vec!["ok", "both"]);
}

#[tokio::test]
async fn rollback_survives_a_mistyped_record() {
    let _ = env_logger::builder().is_test(true).try_init();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "ok", "title": "Fine", "startDate": "2025-12-10" },
            { "id": "flag", "title": "Done?", "startDate": "2025-12-10", "completed": "yes" },
        ])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut store = loaded_store(&server).await;
    let patch = TodoPatch { title: Some("Renamed".to_string()), ..TodoPatch::default() };
    assert!(store.update(&TodoId::from("ok"), patch).await.is_err());
    assert_eq!(store.get(&TodoId::from("ok")).unwrap().title(), "Fine");
    assert_eq!(store.todos().len(), 1);
}
