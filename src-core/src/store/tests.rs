use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;

use super::*;
use crate::api::{ApiClient, CredentialStore, HttpResponse, MemoryCredentials, Method, RequestBody, TransportError};
use crate::config::ClientConfig;
use crate::domain::{Entity, RecordDraft, RecordPatch};
use crate::retry::RetryPolicy;
use crate::testing::{InstantDelay, ScriptedTransport};
use crate::upload::ImageFile;

const ORIGIN: &str = "https://api.example.com";

struct Harness {
    transport: Arc<ScriptedTransport>,
    delay: Arc<InstantDelay>,
    credentials: Arc<MemoryCredentials>,
    client: Arc<ApiClient>,
}

impl Harness {
    fn new(token: Option<&str>) -> Self {
        let transport = Arc::new(ScriptedTransport::new());
        let credentials = Arc::new(match token {
            Some(t) => MemoryCredentials::with_token(t),
            None => MemoryCredentials::new(),
        });
        let config = ClientConfig::new(ORIGIN).with_retry(RetryPolicy::new(3, Duration::from_millis(2000)));
        let client = Arc::new(ApiClient::new(config, transport.clone(), credentials.clone()));
        Self {
            transport,
            delay: Arc::new(InstantDelay::new()),
            credentials,
            client,
        }
    }

    fn gallery(&self) -> GalleryStore {
        GalleryStore::new(self.client.clone(), self.delay.clone())
    }

    fn projects(&self) -> ProjectStore {
        ProjectStore::new(self.client.clone(), self.delay.clone())
    }
}

fn png() -> ImageFile {
    ImageFile::new("still.png", "image/png", vec![7; 16]).unwrap()
}

fn gallery_item(id: &str, title: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "title": title,
        "category": "events",
        "section": "home",
        "year": "2023",
        "image": format!("uploads/{}.webp", id)
    })
}

#[tokio::test]
async fn test_fetch_normalizes_images_and_reads_pagination() {
    let h = Harness::new(None);
    h.transport.push_json(
        200,
        json!({
            "success": true,
            "data": [gallery_item("g1", "Premiere"), {"_id": "g2", "title": "Set", "imageUrl": "https://cdn.example.com/g2.jpg"}],
            "page": 1, "limit": 20, "total": 2, "pages": 1
        }),
    );
    let store = h.gallery();
    let items = store.fetch(FetchQuery::new().category("events")).await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].image_url.as_deref(), Some("https://api.example.com/uploads/g1.webp"));
    assert_eq!(items[1].image_url.as_deref(), Some("https://cdn.example.com/g2.jpg"));

    let state = store.snapshot();
    assert_eq!(state.phase, LoadPhase::Ready);
    assert_eq!(state.pagination.total, 2);
    assert_eq!(state.error, None);

    let sent = h.transport.requests();
    assert_eq!(sent[0].url, "https://api.example.com/api/gallery");
    assert_eq!(sent[0].query_value("page"), Some("1"));
    assert_eq!(sent[0].query_value("category"), Some("events"));
    assert_eq!(sent[0].query_value("section"), None);
}

#[tokio::test]
async fn test_unpaginated_fetch_gets_single_page() {
    let h = Harness::new(None);
    h.transport.push_json(200, json!([{"_id": "p1", "title": "Timepass", "section": "Featured"}]));
    let store = h.projects();
    store.fetch(FetchQuery::new()).await.unwrap();

    let state = store.snapshot();
    assert_eq!(state.pagination, Pagination::single_page(1));
    assert!(h.transport.requests()[0].query.is_empty());
    assert_eq!(state.items[0].image_url, None);
}

#[tokio::test]
async fn test_fetch_keeps_records_with_retired_values() {
    let h = Harness::new(None);
    h.transport.push_json(
        200,
        json!([{"_id": "p1", "section": "Banner"}, {"_id": "p2", "section": "Section1"}]),
    );
    let projects = h.projects();
    let items = projects.fetch(FetchQuery::new()).await.unwrap();
    assert_eq!(items.iter().map(|p| p.id()).collect::<Vec<_>>(), vec!["p1", "p2"]);
    assert_eq!(projects.by_section("Banner").len(), 2);

    h.transport.push_json(
        200,
        json!({
            "success": true,
            "data": [gallery_item("g1", "Premiere"), {"_id": "g2", "title": "Launch", "category": "press"}],
            "page": 1, "limit": 20, "total": 2, "pages": 1
        }),
    );
    let gallery = h.gallery();
    gallery.fetch(FetchQuery::new()).await.unwrap();
    let state = gallery.snapshot();
    assert_eq!(state.items.len() as u64, state.pagination.total);
    assert!(gallery.get("g2").is_some());
}

#[tokio::test]
async fn test_fetch_succeeds_on_fourth_attempt() {
    let h = Harness::new(None);
    h.transport.push_network_errors(3);
    h.transport.push_json(200, json!([gallery_item("g1", "Premiere")]));
    let store = h.gallery();

    let items = store.fetch(FetchQuery::new()).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(h.transport.requests().len(), 4);
    assert_eq!(h.delay.waits(), vec![Duration::from_secs(2); 3]);
    assert_eq!(store.snapshot().phase, LoadPhase::Ready);
}

#[tokio::test]
async fn test_fetch_gives_up_after_four_failures() {
    let h = Harness::new(None);
    h.transport.push_json(200, json!([gallery_item("g1", "Premiere")]));
    let store = h.gallery();
    store.fetch(FetchQuery::new()).await.unwrap();

    h.transport.push_network_errors(4);
    h.transport.push_json(200, json!([gallery_item("never", "Reached")]));
    let err = store.fetch(FetchQuery::new()).await.unwrap_err();

    assert_eq!(err, StoreError::Network);
    assert_eq!(h.transport.remaining(), 1);
    let state = store.snapshot();
    assert_eq!(state.phase, LoadPhase::Error);
    assert!(state.items.is_empty());
    assert_eq!(
        state.error.as_deref(),
        Some("Network error. Please check your connection and try again.")
    );
}

#[tokio::test]
async fn test_server_errors_are_retried_but_client_errors_are_not() {
    let h = Harness::new(None);
    h.transport.push(Ok(HttpResponse::new(503, "busy")));
    h.transport.push(Err(TransportError::Timeout));
    h.transport.push_json(200, json!([]));
    let store = h.gallery();
    store.fetch(FetchQuery::new()).await.unwrap();
    assert_eq!(h.delay.waits().len(), 2);

    h.transport.push_json(400, json!({"message": "Invalid category"}));
    let err = store.fetch(FetchQuery::new().category("foo")).await.unwrap_err();
    assert_eq!(err, StoreError::Rejected("Invalid category".into()));
    assert_eq!(h.transport.requests().len(), 4);
    assert_eq!(h.delay.waits().len(), 2);
}

#[tokio::test]
async fn test_listener_sees_phase_transitions() {
    let h = Harness::new(None);
    h.transport.push_json(200, json!([gallery_item("g1", "Premiere")]));
    let store = h.gallery();
    let phases = Arc::new(Mutex::new(Vec::new()));
    let seen = phases.clone();
    let handle = store.subscribe(move |state| seen.lock().unwrap().push(state.phase));

    store.fetch(FetchQuery::new()).await.unwrap();
    assert_eq!(*phases.lock().unwrap(), vec![LoadPhase::Loading, LoadPhase::Ready]);

    store.unsubscribe(handle);
    store.clear_error();
    assert_eq!(phases.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_add_uploads_multipart_and_refetches() {
    let h = Harness::new(Some("tok"));
    let store = h.gallery();
    h.transport.push_json(200, json!({"success": true, "data": gallery_item("g9", "Premiere")}));
    h.transport.push_json(200, json!([gallery_item("g9", "Premiere"), gallery_item("g1", "Old")]));

    let draft = RecordDraft::new("Premiere").category("Events").section("home").image(png());
    let created = store.add(draft).await.unwrap().unwrap();
    assert_eq!(created.id(), "g9");
    assert_eq!(created.image_url.as_deref(), Some("https://api.example.com/uploads/g9.webp"));

    let sent = h.transport.requests();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].method, Method::Post);
    assert_eq!(sent[0].header("x-auth-token"), Some("tok"));
    assert_eq!(sent[0].timeout, Duration::from_secs(30));
    match &sent[0].body {
        RequestBody::Multipart(form) => {
            assert_eq!(form.get_text("category"), Some("events"));
            assert_eq!(form.get_file("image").map(|f| f.size()), Some(16));
        }
        other => panic!("expected multipart, got {other:?}"),
    }
    assert_eq!(sent[1].method, Method::Get);
    assert_eq!(store.snapshot().len(), 2);
}

#[tokio::test]
async fn test_add_survives_failed_refetch() {
    let h = Harness::new(Some("tok"));
    let store = h.projects();
    h.transport.push_json(201, json!({"_id": "p1", "title": "Timepass", "image": "/uploads/p1.jpg"}));

    let draft = RecordDraft::new("Timepass").image(png());
    store.add(draft).await.unwrap();

    let state = store.snapshot();
    assert_eq!(state.phase, LoadPhase::Ready);
    assert_eq!(state.items[0].id(), "p1");
    assert_eq!(h.delay.waits().len(), 0);
}

#[tokio::test]
async fn test_invalid_add_sends_nothing() {
    let h = Harness::new(Some("tok"));
    let store = h.gallery();

    let draft = RecordDraft::new("Premiere").category("foo").section("home").image(png());
    let err = store.add(draft).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(
        store.snapshot().error.as_deref(),
        Some("Invalid category. Please select one of: events, movies, celebrations, awards, behind-the-scenes, other")
    );

    let err = store.add(RecordDraft::new("No image").category("events").section("home")).await.unwrap_err();
    assert_eq!(err.user_message(), "Image file is required");
    assert!(h.transport.requests().is_empty());
}

#[test]
fn test_oversized_image_is_blocked_before_upload() {
    let big = vec![0u8; (crate::upload::MAX_IMAGE_BYTES + 1) as usize];
    assert!(ImageFile::new("big.jpg", "image/jpeg", big).is_err());
    assert!(ImageFile::new("doc.pdf", "application/pdf", vec![1]).is_err());
}

#[tokio::test]
async fn test_missing_token_short_circuits() {
    let h = Harness::new(None);
    let store = h.gallery();
    let err = store.delete("g1").await.unwrap_err();
    assert!(err.is_auth());
    assert_eq!(err.user_message(), "Authentication token not found. Please login again.");
    assert!(h.transport.requests().is_empty());
}

#[tokio::test]
async fn test_unauthorized_clears_credentials() {
    let h = Harness::new(Some("stale"));
    h.transport.push_json(401, json!({"message": "Token is not valid"}));
    let store = h.projects();
    let err = store.delete_all().await.unwrap_err();
    assert_eq!(err, StoreError::Auth("Authentication failed. Please login again.".into()));
    assert_eq!(h.credentials.token(), None);
}

#[tokio::test]
async fn test_update_replaces_in_place() {
    let h = Harness::new(Some("tok"));
    h.transport.push_json(200, json!([gallery_item("g1", "Old"), gallery_item("g2", "Other")]));
    let store = h.gallery();
    store.fetch(FetchQuery::new()).await.unwrap();

    h.transport.push_json(200, gallery_item("g1", "New"));
    let updated = store
        .update("g1", RecordPatch::default().title("New"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "New");

    let items = store.items();
    assert_eq!(items[0].title, "New");
    assert_eq!(items[1].title, "Other");

    let sent = h.transport.requests();
    assert_eq!(sent[1].method, Method::Put);
    assert_eq!(sent[1].url, "https://api.example.com/api/gallery/g1");
    assert!(matches!(sent[1].body, RequestBody::Json(_)));
}

#[tokio::test]
async fn test_update_unknown_id_keeps_list() {
    let h = Harness::new(Some("tok"));
    h.transport.push_json(200, json!([gallery_item("g1", "Old")]));
    let store = h.gallery();
    store.fetch(FetchQuery::new()).await.unwrap();

    h.transport.push_json(200, gallery_item("zz", "Elsewhere"));
    store.update("zz", RecordPatch::default().year("2020")).await.unwrap();
    assert_eq!(store.items().len(), 1);
    assert_eq!(store.items()[0].title, "Old");
}

#[tokio::test]
async fn test_delete_not_found_reports_label() {
    let h = Harness::new(Some("tok"));
    h.transport.push_json(404, json!({"message": "nope"}));
    let store = h.gallery();
    let err = store.delete("missing").await.unwrap_err();
    assert_eq!(err, StoreError::NotFound("Gallery item not found".into()));
    assert_eq!(store.snapshot().phase, LoadPhase::Error);
}

#[tokio::test]
async fn test_delete_removes_record() {
    let h = Harness::new(Some("tok"));
    h.transport.push_json(200, json!([gallery_item("g1", "A"), gallery_item("g2", "B")]));
    let store = h.gallery();
    store.fetch(FetchQuery::new()).await.unwrap();

    h.transport.push_json(200, json!({"success": true, "message": "deleted"}));
    store.delete("g1").await.unwrap();
    assert_eq!(store.get("g1").map(|r| r.id().to_string()), None);
    assert!(store.get("g2").is_some());
}

#[tokio::test]
async fn test_delete_all_then_fetch_repopulates() {
    let h = Harness::new(Some("tok"));
    h.transport.push_json(200, json!([{"_id": "p1", "title": "A"}, {"_id": "p2", "title": "B"}]));
    let store = h.projects();
    store.fetch(FetchQuery::new()).await.unwrap();

    h.transport.push(Ok(HttpResponse::new(200, "")));
    store.delete_all().await.unwrap();
    assert!(store.snapshot().is_empty());
    assert_eq!(h.transport.requests()[1].url, "https://api.example.com/api/projects/all");

    h.transport.push_json(200, json!([{"_id": "p3", "title": "C"}]));
    store.refresh().await.unwrap();
    assert_eq!(store.items().len(), 1);
}

#[tokio::test]
async fn test_by_section_ignores_case() {
    let h = Harness::new(None);
    h.transport.push_json(
        200,
        json!([
            {"_id": "p1", "title": "A", "section": "Featured"},
            {"_id": "p2", "title": "B", "section": "Cameo"},
            {"_id": "p3", "title": "C", "section": "Featured"}
        ]),
    );
    let store = h.projects();
    store.fetch(FetchQuery::new()).await.unwrap();
    let featured = store.by_section("featured");
    assert_eq!(featured.iter().map(|p| p.id()).collect::<Vec<_>>(), vec!["p1", "p3"]);
    assert!(store.by_section("home").is_empty());
}

#[tokio::test]
async fn test_refresh_uses_last_query() {
    let h = Harness::new(None);
    h.transport.push_json(200, json!([]));
    h.transport.push_json(200, json!([]));
    let store = h.gallery();
    store.fetch(FetchQuery::new().section("about").page(2)).await.unwrap();
    store.refresh().await.unwrap();

    let sent = h.transport.requests();
    assert_eq!(sent[1].query_value("section"), Some("about"));
    assert_eq!(sent[1].query_value("page"), Some("2"));
}
