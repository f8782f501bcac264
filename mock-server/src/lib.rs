//! In-memory reference implementation of the case tracker REST API, used by
//! the core crate's integration tests and runnable standalone.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseStatus {
    New,
    #[serde(rename = "In Follow-up")]
    InFollowUp,
    #[serde(rename = "Partially Paid")]
    PartiallyPaid,
    Closed,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaseRecord {
    pub id: i64,
    pub client_id: i64,
    pub invoice_number: String,
    pub invoice_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub amount: Decimal,
    pub status: CaseStatus,
    pub follow_up_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Wire shape of a case response: the stored record with the owning client
/// joined in.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaseResponse {
    #[serde(flatten)]
    pub case: CaseRecord,
    pub client: Client,
}

#[derive(Deserialize)]
pub struct CreateClient {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateClient {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateCase {
    pub client_id: i64,
    pub invoice_number: String,
    pub invoice_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub amount: Decimal,
    pub follow_up_notes: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateCase {
    pub status: Option<CaseStatus>,
    pub follow_up_notes: Option<String>,
}

fn default_limit() -> usize {
    10
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    CreatedAt,
    DueDate,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Deserialize)]
pub struct ListCasesQuery {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
    pub status: Option<CaseStatus>,
    #[serde(default)]
    pub sort_by: SortBy,
    #[serde(default)]
    pub order: Order,
}

#[derive(Default)]
pub struct Store {
    clients: BTreeMap<i64, Client>,
    cases: BTreeMap<i64, CaseRecord>,
    next_client_id: i64,
    next_case_id: i64,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/health", get(health))
        .route("/api/clients", get(list_clients).post(create_client))
        .route(
            "/api/clients/{id}",
            get(get_client).put(update_client).delete(delete_client),
        )
        .route("/api/cases", get(list_cases).post(create_case))
        .route(
            "/api/cases/{id}",
            get(get_case).put(update_case).delete(delete_case),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn detail(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "detail": message })))
}

fn with_client(store: &Store, case: &CaseRecord) -> Option<CaseResponse> {
    let client = store.clients.get(&case.client_id)?;
    Some(CaseResponse {
        case: case.clone(),
        client: client.clone(),
    })
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn list_clients(
    State(db): State<Db>,
    Query(page): Query<Pagination>,
) -> Json<Vec<Client>> {
    let store = db.read().await;
    Json(
        store
            .clients
            .values()
            .skip(page.skip)
            .take(page.limit)
            .cloned()
            .collect(),
    )
}

async fn create_client(
    State(db): State<Db>,
    Json(input): Json<CreateClient>,
) -> (StatusCode, Json<Client>) {
    let mut store = db.write().await;
    store.next_client_id += 1;
    let now = Utc::now();
    let client = Client {
        id: store.next_client_id,
        name: input.name,
        email: input.email,
        phone: input.phone,
        company: input.company,
        created_at: now,
        updated_at: now,
    };
    store.clients.insert(client.id, client.clone());
    debug!("created client {}", client.id);
    (StatusCode::CREATED, Json(client))
}

async fn get_client(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Client>, (StatusCode, Json<Value>)> {
    let store = db.read().await;
    store
        .clients
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Client not found"))
}

async fn update_client(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateClient>,
) -> Result<Json<Client>, (StatusCode, Json<Value>)> {
    let mut store = db.write().await;
    let client = store
        .clients
        .get_mut(&id)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Client not found"))?;
    // Omitted optional fields keep their stored values.
    client.name = input.name;
    if let Some(email) = input.email {
        client.email = Some(email);
    }
    if let Some(phone) = input.phone {
        client.phone = Some(phone);
    }
    if let Some(company) = input.company {
        client.company = Some(company);
    }
    client.updated_at = Utc::now();
    Ok(Json(client.clone()))
}

async fn delete_client(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    let mut store = db.write().await;
    if store.clients.remove(&id).is_none() {
        return Err(detail(StatusCode::NOT_FOUND, "Client not found"));
    }
    // Deleting a client takes its cases with it.
    store.cases.retain(|_, case| case.client_id != id);
    debug!("deleted client {id}");
    Ok(StatusCode::NO_CONTENT)
}

async fn list_cases(
    State(db): State<Db>,
    Query(params): Query<ListCasesQuery>,
) -> Json<Vec<CaseResponse>> {
    let store = db.read().await;
    let mut rows: Vec<&CaseRecord> = store
        .cases
        .values()
        .filter(|case| params.status.is_none_or(|status| case.status == status))
        .collect();
    rows.sort_by_key(|case| {
        let key = match params.sort_by {
            SortBy::CreatedAt => case.created_at,
            SortBy::DueDate => case.due_date,
        };
        (key, case.id)
    });
    if matches!(params.order, Order::Desc) {
        rows.reverse();
    }
    Json(
        rows.into_iter()
            .skip(params.skip)
            .take(params.limit)
            .filter_map(|case| with_client(&store, case))
            .collect(),
    )
}

async fn get_case(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<CaseResponse>, (StatusCode, Json<Value>)> {
    let store = db.read().await;
    let case = store
        .cases
        .get(&id)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Case not found"))?;
    with_client(&store, case)
        .map(Json)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Client not found"))
}

async fn create_case(
    State(db): State<Db>,
    Json(input): Json<CreateCase>,
) -> Result<(StatusCode, Json<CaseResponse>), (StatusCode, Json<Value>)> {
    if input.amount <= Decimal::ZERO || input.amount.scale() > 2 {
        return Err(detail(
            StatusCode::UNPROCESSABLE_ENTITY,
            "amount must be a positive value with at most two decimal places",
        ));
    }
    let mut store = db.write().await;
    if !store.clients.contains_key(&input.client_id) {
        return Err(detail(StatusCode::NOT_FOUND, "Client not found"));
    }
    store.next_case_id += 1;
    let now = Utc::now();
    let case = CaseRecord {
        id: store.next_case_id,
        client_id: input.client_id,
        invoice_number: input.invoice_number,
        invoice_date: input.invoice_date,
        due_date: input.due_date,
        amount: input.amount,
        status: CaseStatus::New,
        follow_up_notes: input.follow_up_notes,
        created_at: now,
        updated_at: now,
    };
    store.cases.insert(case.id, case.clone());
    debug!("created case {}", case.id);
    let response = with_client(&store, &case)
        .map(Json)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Client not found"))?;
    Ok((StatusCode::CREATED, response))
}

async fn update_case(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateCase>,
) -> Result<Json<CaseResponse>, (StatusCode, Json<Value>)> {
    let mut store = db.write().await;
    let case = store
        .cases
        .get_mut(&id)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Case not found"))?;
    if let Some(status) = input.status {
        case.status = status;
    }
    if let Some(notes) = input.follow_up_notes {
        case.follow_up_notes = Some(notes);
    }
    case.updated_at = Utc::now();
    let updated = case.clone();
    with_client(&store, &updated)
        .map(Json)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Client not found"))
}

async fn delete_case(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    let mut store = db.write().await;
    if store.cases.remove(&id).is_none() {
        return Err(detail(StatusCode::NOT_FOUND, "Case not found"));
    }
    debug!("deleted case {id}");
    Ok(StatusCode::NO_CONTENT)
}
