use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, CaseResponse, CaseStatus, Client};
use rust_decimal::Decimal;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

const CLIENT_BODY: &str = r#"{"name":"Acme Traders","email":"accounts@acme.example","phone":"+91-9876543210"}"#;

fn case_body(client_id: i64, invoice_number: &str, due_date: &str, amount: &str) -> String {
    format!(
        r#"{{"client_id":{client_id},"invoice_number":"{invoice_number}","invoice_date":"2024-03-01T00:00:00Z","due_date":"{due_date}","amount":"{amount}"}}"#
    )
}

// --- health ---

#[tokio::test]
async fn health_reports_healthy() {
    let app = app();
    let resp = app.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}

// --- list ---

#[tokio::test]
async fn list_clients_empty() {
    let app = app();
    let resp = app.oneshot(get_request("/api/clients")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let clients: Vec<Client> = body_json(resp).await;
    assert!(clients.is_empty());
}

#[tokio::test]
async fn list_cases_empty() {
    let app = app();
    let resp = app.oneshot(get_request("/api/cases")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let cases: Vec<CaseResponse> = body_json(resp).await;
    assert!(cases.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_client_returns_201() {
    let app = app();
    let resp = app
        .oneshot(json_request("POST", "/api/clients", CLIENT_BODY))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let client: Client = body_json(resp).await;
    assert_eq!(client.id, 1);
    assert_eq!(client.name, "Acme Traders");
    assert_eq!(client.email.as_deref(), Some("accounts@acme.example"));
    assert!(client.company.is_none());
}

#[tokio::test]
async fn create_client_missing_name_returns_422() {
    let app = app();
    let resp = app
        .oneshot(json_request(
            "POST",
            "/api/clients",
            r#"{"email":"no-name@acme.example"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_case_starts_in_new_status() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/api/clients", CLIENT_BODY))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/api/cases",
            &case_body(1, "INV-2024-001", "2024-03-31T00:00:00Z", "1500.50"),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let case: CaseResponse = body_json(resp).await;
    assert_eq!(case.case.id, 1);
    assert_eq!(case.case.status, CaseStatus::New);
    assert_eq!(case.case.amount, Decimal::new(150050, 2));
    assert_eq!(case.client.name, "Acme Traders");
}

#[tokio::test]
async fn create_case_unknown_client_returns_404() {
    let app = app();
    let resp = app
        .oneshot(json_request(
            "POST",
            "/api/cases",
            &case_body(99, "INV-1", "2024-03-31T00:00:00Z", "100.00"),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["detail"], "Client not found");
}

#[tokio::test]
async fn create_case_non_positive_amount_returns_422() {
    let app = app();
    let resp = app
        .oneshot(json_request(
            "POST",
            "/api/cases",
            &case_body(1, "INV-1", "2024-03-31T00:00:00Z", "0"),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = body_json(resp).await;
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn create_case_excess_decimal_places_returns_422() {
    let app = app();
    let resp = app
        .oneshot(json_request(
            "POST",
            "/api/cases",
            &case_body(1, "INV-1", "2024-03-31T00:00:00Z", "10.555"),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_client_not_found() {
    let app = app();
    let resp = app.oneshot(get_request("/api/clients/42")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["detail"], "Client not found");
}

#[tokio::test]
async fn get_case_not_found() {
    let app = app();
    let resp = app.oneshot(get_request("/api/cases/42")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["detail"], "Case not found");
}

#[tokio::test]
async fn get_client_non_numeric_id_returns_400() {
    let app = app();
    let resp = app
        .oneshot(get_request("/api/clients/not-a-number"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update ---

#[tokio::test]
async fn update_client_keeps_omitted_fields() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/api/clients", CLIENT_BODY))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            "/api/clients/1",
            r#"{"name":"Acme Traders Pvt Ltd"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Client = body_json(resp).await;
    assert_eq!(updated.name, "Acme Traders Pvt Ltd");
    // untouched by the name-only update
    assert_eq!(updated.email.as_deref(), Some("accounts@acme.example"));
    assert_eq!(updated.phone.as_deref(), Some("+91-9876543210"));
}

#[tokio::test]
async fn update_client_not_found() {
    let app = app();
    let resp = app
        .oneshot(json_request(
            "PUT",
            "/api/clients/42",
            r#"{"name":"Nobody"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_case_not_found() {
    let app = app();
    let resp = app
        .oneshot(json_request(
            "PUT",
            "/api/cases/42",
            r#"{"status":"Closed"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- delete ---

#[tokio::test]
async fn delete_client_not_found() {
    let app = app();
    let resp = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/clients/42")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_case_not_found() {
    let app = app();
    let resp = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/cases/42")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- list filtering, sorting, pagination ---

#[tokio::test]
async fn list_cases_filters_sorts_and_paginates() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/api/clients", CLIENT_BODY))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Three cases with due dates out of creation order.
    for (invoice, due) in [
        ("INV-1", "2024-04-10T00:00:00Z"),
        ("INV-2", "2024-03-15T00:00:00Z"),
        ("INV-3", "2024-05-01T00:00:00Z"),
    ] {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(json_request(
                "POST",
                "/api/cases",
                &case_body(1, invoice, due, "100.00"),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    // Default listing: newest created first.
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/api/cases?skip=0&limit=100"))
        .await
        .unwrap();
    let cases: Vec<CaseResponse> = body_json(resp).await;
    let ids: Vec<i64> = cases.iter().map(|c| c.case.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);

    // Sort by due date ascending.
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/api/cases?sort_by=due_date&order=asc"))
        .await
        .unwrap();
    let cases: Vec<CaseResponse> = body_json(resp).await;
    let ids: Vec<i64> = cases.iter().map(|c| c.case.id).collect();
    assert_eq!(ids, vec![2, 1, 3]);

    // Move one case along the lifecycle, then filter on it. The status
    // label contains a space and travels percent-encoded.
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            "/api/cases/2",
            r#"{"status":"In Follow-up"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/api/cases?status=In%20Follow-up"))
        .await
        .unwrap();
    let cases: Vec<CaseResponse> = body_json(resp).await;
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].case.id, 2);
    assert_eq!(cases[0].case.status, CaseStatus::InFollowUp);

    // Pagination applies after sorting.
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/api/cases?skip=1&limit=1"))
        .await
        .unwrap();
    let cases: Vec<CaseResponse> = body_json(resp).await;
    let ids: Vec<i64> = cases.iter().map(|c| c.case.id).collect();
    assert_eq!(ids, vec![2]);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle_with_cascade_delete() {
    use tower::Service;

    let mut app = app().into_service();

    // create client
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/api/clients", CLIENT_BODY))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let client: Client = body_json(resp).await;
    let client_id = client.id;

    // create case
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/api/cases",
            &case_body(client_id, "INV-2024-001", "2024-03-31T00:00:00Z", "1500.50"),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let case: CaseResponse = body_json(resp).await;
    let case_id = case.case.id;

    // get
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!("/api/cases/{case_id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: CaseResponse = body_json(resp).await;
    assert_eq!(fetched.case.invoice_number, "INV-2024-001");
    assert_eq!(fetched.client.id, client_id);

    // update — partial: only status
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/api/cases/{case_id}"),
            r#"{"status":"Partially Paid"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: CaseResponse = body_json(resp).await;
    assert_eq!(updated.case.status, CaseStatus::PartiallyPaid);
    assert!(updated.case.follow_up_notes.is_none()); // unchanged

    // update — partial: only notes
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/api/cases/{case_id}"),
            r#"{"follow_up_notes":"Paid half, chasing the rest"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: CaseResponse = body_json(resp).await;
    assert_eq!(updated.case.status, CaseStatus::PartiallyPaid); // unchanged
    assert_eq!(
        updated.case.follow_up_notes.as_deref(),
        Some("Paid half, chasing the rest")
    );

    // delete the client — its cases go with it
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/clients/{client_id}"))
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let body = body_bytes(resp).await;
    assert!(body.is_empty());

    // case gone
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!("/api/cases/{case_id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // both listings empty
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/api/cases"))
        .await
        .unwrap();
    let cases: Vec<CaseResponse> = body_json(resp).await;
    assert!(cases.is_empty());

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/api/clients"))
        .await
        .unwrap();
    let clients: Vec<Client> = body_json(resp).await;
    assert!(clients.is_empty());
}
