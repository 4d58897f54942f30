//! In-process fake of the schedule API built on axum.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{Value, json};

pub const TOKEN: &str = "test-token";
pub const EMAIL: &str = "admin@school.test";
pub const PASSWORD: &str = "Passw0rd!";
pub const PDF_BYTES: &[u8] = b"%PDF-1.4\n% fake schedule\n";

#[derive(Clone, Default)]
pub struct FakeApi {
    pub(crate) records: Arc<Mutex<Vec<Value>>>,
    pub(crate) next_id: Arc<Mutex<u32>>,
    /// Answer updates with the stored record instead of a message
    pub echo_updates: bool,
    /// Keys merged into the update acknowledgement
    pub ack_extras: Option<Value>,
}

impl FakeApi {
    pub fn records(&self) -> Vec<Value> {
        self.records.lock().clone()
    }

    /// Seed a record as the server would store it
    pub fn insert(&self, mut record: Value) -> String {
        let id = self.allocate_id();
        record["_id"] = json!(id);
        self.records.lock().push(record);
        id
    }

    fn allocate_id(&self) -> String {
        let mut next = self.next_id.lock();
        *next += 1;
        format!("s{}", *next)
    }

    /// Bind to an ephemeral port and serve in the background
    pub async fn spawn(self) -> String {
        let app = router(self);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }
}

pub fn sample_record(school: &str) -> Value {
    json!({
        "schoolName": school,
        "principalName": "A. Rao",
        "vicePrincipalName": "B. Shah",
        "standard": "8",
        "division": "B",
        "subjects": [
            {"name": "Science", "lectures": ["08:00 - 09:00", "", "", "", "", "", ""]}
        ]
    })
}

fn router(api: FakeApi) -> Router {
    Router::new()
        .route("/auth/signin", post(signin))
        .route("/api/v1/get-schedules", get(list))
        .route("/api/v1/get-schedule/{id}", get(get_one))
        .route("/api/v1/add-schedule", post(add))
        .route("/api/v1/schedule/{id}", put(update))
        .route("/api/v1/remove-schedule/{id}", delete(remove))
        .route("/api/v1/get-schedule-pdf/{id}", get(pdf))
        .with_state(api)
}

fn unauthorized(headers: &HeaderMap) -> Option<Response> {
    let expected = format!("Bearer {TOKEN}");
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    if presented == Some(expected.as_str()) {
        None
    } else {
        Some(
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"message": "Unauthorized"})),
            )
                .into_response(),
        )
    }
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"message": "Schedule not found"})),
    )
        .into_response()
}

fn position(records: &[Value], id: &str) -> Option<usize> {
    records.iter().position(|record| record["_id"] == id)
}

async fn signin(Json(body): Json<Value>) -> Response {
    if body["username"] == EMAIL && body["password"] == PASSWORD {
        Json(json!({"token": TOKEN, "username": EMAIL, "role": "admin"})).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid credentials"})),
        )
            .into_response()
    }
}

async fn list(State(api): State<FakeApi>, headers: HeaderMap) -> Response {
    if let Some(denied) = unauthorized(&headers) {
        return denied;
    }
    Json(Value::Array(api.records())).into_response()
}

async fn get_one(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Some(denied) = unauthorized(&headers) {
        return denied;
    }
    let records = api.records.lock();
    match position(&records, &id) {
        Some(index) => Json(records[index].clone()).into_response(),
        None => not_found(),
    }
}

async fn add(State(api): State<FakeApi>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Some(denied) = unauthorized(&headers) {
        return denied;
    }
    let id = api.insert(body);
    let records = api.records.lock();
    let index = position(&records, &id).unwrap();
    (StatusCode::CREATED, Json(records[index].clone())).into_response()
}

async fn update(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(mut body): Json<Value>,
) -> Response {
    if let Some(denied) = unauthorized(&headers) {
        return denied;
    }
    let mut records = api.records.lock();
    let Some(index) = position(&records, &id) else {
        return not_found();
    };
    body["_id"] = json!(id);
    records[index] = body.clone();
    if api.echo_updates {
        Json(body).into_response()
    } else {
        let mut ack = json!({"message": "Schedule updated successfully"});
        if let Some(Value::Object(extras)) = &api.ack_extras {
            for (key, value) in extras {
                ack[key] = value.clone();
            }
        }
        Json(ack).into_response()
    }
}

async fn remove(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Some(denied) = unauthorized(&headers) {
        return denied;
    }
    let mut records = api.records.lock();
    match position(&records, &id) {
        Some(index) => {
            records.remove(index);
            Json(json!({"message": "Schedule deleted"})).into_response()
        }
        None => not_found(),
    }
}

async fn pdf(State(api): State<FakeApi>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    if let Some(denied) = unauthorized(&headers) {
        return denied;
    }
    if position(&api.records(), &id).is_none() {
        return not_found();
    }
    ([(header::CONTENT_TYPE, "application/pdf")], PDF_BYTES).into_response()
}
