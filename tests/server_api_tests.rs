use folio::api::FolioApi;
use folio::server::{build_router, DeleteResponse, ErrorResponse, ListResponse, SubmitResponse};
use folio::store::memory::InMemoryStore;
use folio::store::table::TableStore;
use folio::store::FeedbackStore;
use serde_json::{json, Value};
use std::sync::Arc;

/// Spin up the HTTP server on an OS-assigned port, returning the base URL.
async fn spawn_test_server<S: FeedbackStore + 'static>(store: S) -> String {
    let app = build_router(Arc::new(FolioApi::new(store)));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://127.0.0.1:{}", port)
}

async fn post_json(base: &str, body: Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{}/api/feedback", base))
        .json(&body)
        .send()
        .await
        .unwrap()
}

fn visitor(name: &str, kind: &str, comment: &str) -> Value {
    json!({
        "full_name": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "contact_type": kind,
        "comment": comment,
    })
}

#[tokio::test]
async fn health_endpoint_answers() {
    let base = spawn_test_server(InMemoryStore::new()).await;
    let resp = reqwest::get(format!("{}/health", base)).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn json_submission_is_created_and_listed() {
    let base = spawn_test_server(InMemoryStore::new()).await;

    let resp = post_json(&base, visitor("Ada", "job_offer", "Hello there")).await;
    assert_eq!(resp.status(), 201);
    let created: SubmitResponse = resp.json().await.unwrap();
    assert!(created.success);
    assert!(created.message.starts_with("Thank you"));

    let resp = reqwest::get(format!("{}/api/feedback", base)).await.unwrap();
    assert_eq!(resp.status(), 200);
    let listed: ListResponse = resp.json().await.unwrap();
    assert!(listed.success);
    assert_eq!(listed.count, 1);
    assert_eq!(listed.data[0].id, created.id);
    assert_eq!(listed.data[0].phone.as_option(), None);
}

#[tokio::test]
async fn form_submission_trims_and_stores_phone() {
    let base = spawn_test_server(InMemoryStore::new()).await;

    let resp = reqwest::Client::new()
        .post(format!("{}/contact", base))
        .form(&[
            ("full_name", "  Grace Hopper "),
            ("email", "grace@example.com"),
            ("phone", "555-0100"),
            ("contact_type", "general"),
            ("comment", "Compilers!"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let listed: ListResponse = reqwest::get(format!("{}/api/feedback", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.data[0].full_name, "Grace Hopper");
    assert_eq!(listed.data[0].phone.as_option(), Some("555-0100"));
}

#[tokio::test]
async fn missing_field_is_rejected_with_field_name() {
    let base = spawn_test_server(InMemoryStore::new()).await;

    let resp = post_json(&base, visitor("Ada", "general", "   ")).await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["field"], "comment");

    let resp = post_json(
        &base,
        json!({ "full_name": "Ada", "email": "nope", "contact_type": "general", "comment": "hi" }),
    )
    .await;
    assert_eq!(resp.status(), 400);
    let body: ErrorResponse = resp.json().await.unwrap();
    assert!(!body.success);
    assert!(body.error.contains("email"));

    let listed: ListResponse = reqwest::get(format!("{}/api/feedback", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.count, 0);
}

#[tokio::test]
async fn undecodable_bodies_get_json_bad_request() {
    let base = spawn_test_server(InMemoryStore::new()).await;
    let client = reqwest::Client::new();

    let wrong_type = post_json(
        &base,
        json!({ "full_name": 123, "email": "ada@example.com", "contact_type": "general", "comment": "hi" }),
    )
    .await;
    let plain_text = client
        .post(format!("{}/api/feedback", base))
        .header("content-type", "text/plain")
        .body("full_name=Ada")
        .send()
        .await
        .unwrap();
    let form_as_json = client
        .post(format!("{}/contact", base))
        .json(&visitor("Ada", "general", "hi"))
        .send()
        .await
        .unwrap();

    for resp in [wrong_type, plain_text, form_as_json] {
        assert_eq!(resp.status(), 400);
        let content_type = resp.headers()["content-type"].to_str().unwrap().to_string();
        assert!(content_type.starts_with("application/json"));
        let body: ErrorResponse = resp.json().await.unwrap();
        assert!(!body.success);
        assert!(body.error.starts_with("Invalid request body"));
        assert!(body.field.is_none());
    }

    let listed: ListResponse = reqwest::get(format!("{}/api/feedback", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.count, 0);
}

#[tokio::test]
async fn filters_apply_to_listing_and_admin_page() {
    let base = spawn_test_server(InMemoryStore::new()).await;
    post_json(&base, visitor("Ada", "job_offer", "Open role")).await;
    post_json(&base, visitor("Grace", "general", "Great portfolio")).await;
    post_json(&base, visitor("Linus", "general", "Nice work")).await;

    let listed: ListResponse = reqwest::get(format!(
        "{}/api/feedback?contact_type=general&search=portfolio",
        base
    ))
    .await
    .unwrap()
    .json()
    .await
    .unwrap();
    assert_eq!(listed.count, 1);
    assert_eq!(listed.data[0].full_name, "Grace");

    let page: Value = reqwest::get(format!(
        "{}/admin/feedback?search=&contact_type=&date_range=today",
        base
    ))
    .await
    .unwrap()
    .json()
    .await
    .unwrap();
    assert_eq!(page["count"], 3);
    assert_eq!(page["contact_types"], json!(["general", "job_offer"]));
    assert_eq!(page["filters"]["date_range"], "today");
}

#[tokio::test]
async fn unknown_date_range_is_a_bad_request() {
    let base = spawn_test_server(InMemoryStore::new()).await;
    let resp = reqwest::get(format!("{}/api/feedback?date_range=decade", base))
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn delete_reports_whether_anything_was_removed() {
    let base = spawn_test_server(InMemoryStore::new()).await;
    let created: SubmitResponse = post_json(&base, visitor("Ada", "general", "Bye"))
        .await
        .json()
        .await
        .unwrap();

    let client = reqwest::Client::new();
    let url = format!("{}/api/feedback/{}", base, created.id);

    let first: DeleteResponse = client.delete(&url).send().await.unwrap().json().await.unwrap();
    assert!(first.success);
    assert!(first.deleted);

    let second: DeleteResponse = client.delete(&url).send().await.unwrap().json().await.unwrap();
    assert!(second.success);
    assert!(!second.deleted);
}

#[tokio::test]
async fn export_returns_csv_attachment() {
    let base = spawn_test_server(TableStore::open_in_memory().unwrap()).await;
    post_json(&base, visitor("Ada", "job_offer", "Line one, with comma")).await;

    let resp = reqwest::get(format!("{}/admin/feedback/export", base))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let content_type = resp.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/csv"));
    let disposition = resp.headers()["content-disposition"]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"feedback_export_"));

    let body = resp.text().await.unwrap();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines[0], "Date,Name,Email,Phone,Type,Message");
    assert!(lines[1].contains("Job Offer"));
    assert!(lines[1].contains("\"Line one, with comma\""));
}

#[tokio::test]
async fn store_failure_hides_details() {
    let store = InMemoryStore::new();
    store.set_simulate_write_error(true);
    let base = spawn_test_server(store).await;

    let resp = post_json(&base, visitor("Ada", "general", "Hi")).await;
    assert_eq!(resp.status(), 500);
    let body: ErrorResponse = resp.json().await.unwrap();
    assert_eq!(body.error, folio::server::SERVER_ERROR_MESSAGE);
}
