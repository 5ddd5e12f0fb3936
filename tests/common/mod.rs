//! In-process stand-in for the HealthSync REST backend.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use reqwest::Url;
use serde_json::{json, Value};

use healthsync::chat::InMemoryChatHub;
use healthsync::config::ChatConfig;
use healthsync::http::ApiClient;
use healthsync::identity::InMemoryIdentityProvider;
use healthsync::scheduling::TimeOfDay;
use healthsync::AppState;

pub type TestState = AppState<InMemoryIdentityProvider, InMemoryChatHub>;

#[derive(Default)]
pub struct Store {
    pub doctors: HashMap<String, Value>,
    pub patients: HashMap<String, Value>,
    pub timeslots: Vec<Value>,
    pub bookings: Vec<Value>,
    /// user_id -> record, password included.
    pub auth: HashMap<String, Value>,
    /// Every request seen, as `METHOD /path`.
    pub requests: Vec<String>,
    /// Make `POST /api/authentication/` fail with a 500.
    pub fail_auth_create: bool,
    next_id: u32,
}

impl Store {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{}", self.next_id)
    }

    fn log(&mut self, line: impl Into<String>) {
        self.requests.push(line.into());
    }
}

type Shared = Arc<Mutex<Store>>;

pub struct MockBackend {
    pub store: Shared,
    pub client: ApiClient,
}

impl MockBackend {
    pub async fn start() -> Self {
        let store: Shared = Arc::default();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(store.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let base = Url::parse(&format!("http://{addr}/")).unwrap();
        let client = ApiClient::with_http_client(reqwest::Client::new(), base);
        Self { store, client }
    }

    pub fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap()
    }

    pub fn state(&self) -> TestState {
        AppState::new(
            self.client.clone(),
            Arc::new(InMemoryIdentityProvider::new()),
            Arc::new(InMemoryChatHub::new()),
            ChatConfig::default(),
        )
    }

    pub fn add_doctor(&self, id: &str, first: &str, last: &str, specialization: &str) {
        self.store().doctors.insert(
            id.to_string(),
            json!({
                "doctor_id": id,
                "first_name": first,
                "last_name": last,
                "education": {"degree": "MBBS", "school": "KEMU", "year": "2010"},
                "specialization": specialization,
                "hospital_name": "Mayo Hospital",
                "picture": format!("https://img.example/{id}.png"),
            }),
        );
    }

    pub fn add_patient(&self, id: &str, first: &str, last: &str) {
        self.store().patients.insert(
            id.to_string(),
            json!({
                "patient_id": id,
                "first_name": first,
                "last_name": last,
                "blood_type": "B+",
                "medical_history": "Asthma",
            }),
        );
    }

    pub fn add_timeslot(&self, id: &str, doctor_id: &str, start: &str, end: &str, status: &str) {
        self.store().timeslots.push(json!({
            "timeslot_id": id,
            "doctor_id": doctor_id,
            "start_time": start,
            "end_time": end,
            "fee": "1500.00",
            "availability_status": status,
        }));
    }

    pub fn add_booking(&self, id: &str, patient_id: &str, doctor_id: &str, date: &str, start: &str, status: &str) {
        let end = half_hour_after(start);
        self.store().bookings.push(json!({
            "booking_id": id,
            "patient_id": patient_id,
            "doctor_id": doctor_id,
            "timeslot_id": "T0",
            "date": date,
            "start_time": format!("{date}T{start}:00"),
            "end_time": format!("{date}T{end}:00"),
            "appointment_status": status,
        }));
    }

    pub fn add_auth(&self, user_id: &str, user_type: &str, email: &str, password: &str) {
        self.store().auth.insert(
            user_id.to_string(),
            json!({
                "user_id": user_id,
                "user_type": user_type,
                "phone_number": "03001234567",
                "email": email,
                "password": password,
            }),
        );
    }

    pub fn requests(&self) -> Vec<String> {
        self.store().requests.clone()
    }
}

fn half_hour_after(clock: &str) -> String {
    TimeOfDay::parse_24h(clock)
        .ok()
        .and_then(|t| t.checked_add_minutes(30))
        .map(|t| t.to_24h())
        .unwrap_or_else(|| "23:59".to_string())
}

fn router(store: Shared) -> Router {
    Router::new()
        .route("/api/doctors/", get(list_doctors).post(create_doctor))
        .route(
            "/api/doctors/{id}/",
            get(get_doctor).put(update_doctor).delete(delete_doctor),
        )
        .route("/api/doctors/{id}/summary/", get(doctor_summary))
        .route("/api/patients/", get(list_patients).post(create_patient))
        .route(
            "/api/patients/{id}/",
            get(get_patient).put(update_patient).delete(delete_patient),
        )
        .route("/api/timeslots/", get(list_timeslots).post(create_timeslot))
        .route("/api/timeslots/{id}/", axum::routing::delete(delete_timeslot))
        .route("/api/bookings/", get(list_bookings).post(create_booking))
        .route(
            "/api/bookings/{id}/",
            axum::routing::put(update_booking).delete(delete_booking),
        )
        .route("/api/authentication/", post(create_auth))
        .route("/api/authentication/login/", post(login))
        .route(
            "/api/authentication/{id}/",
            get(get_auth).put(update_auth).delete(delete_auth),
        )
        .with_state(store)
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn created(value: Value) -> Response {
    (StatusCode::CREATED, Json(value)).into_response()
}

fn merge(target: &mut Value, patch: Value) {
    if let (Some(target), Value::Object(patch)) = (target.as_object_mut(), patch) {
        for (key, value) in patch {
            target.insert(key, value);
        }
    }
}

fn public_auth(record: &Value) -> Value {
    let mut record = record.clone();
    if let Some(object) = record.as_object_mut() {
        object.remove("password");
    }
    record
}

async fn list_doctors(State(store): State<Shared>) -> Response {
    let mut store = store.lock().unwrap();
    store.log("GET /api/doctors/");
    let mut doctors: Vec<Value> = store.doctors.values().cloned().collect();
    doctors.sort_by_key(|d| d["doctor_id"].as_str().unwrap_or_default().to_string());
    Json(doctors).into_response()
}

async fn create_doctor(State(store): State<Shared>, Json(mut body): Json<Value>) -> Response {
    let mut store = store.lock().unwrap();
    store.log("POST /api/doctors/");
    let id = store.next_id("D");
    body["doctor_id"] = json!(id);
    store.doctors.insert(id, body.clone());
    created(body)
}

async fn get_doctor(State(store): State<Shared>, Path(id): Path<String>) -> Response {
    let mut store = store.lock().unwrap();
    store.log(format!("GET /api/doctors/{id}/"));
    match store.doctors.get(&id) {
        Some(doctor) => Json(doctor.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "Doctor not found"),
    }
}

async fn doctor_summary(State(store): State<Shared>, Path(id): Path<String>) -> Response {
    let mut store = store.lock().unwrap();
    store.log(format!("GET /api/doctors/{id}/summary/"));
    match store.doctors.get(&id) {
        Some(d) => Json(json!({
            "first_name": d["first_name"],
            "last_name": d["last_name"],
            "specialization": d["specialization"],
            "hospital_name": d["hospital_name"],
        }))
        .into_response(),
        None => error(StatusCode::NOT_FOUND, "Doctor not found"),
    }
}

async fn update_doctor(
    State(store): State<Shared>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> Response {
    let mut store = store.lock().unwrap();
    store.log(format!("PUT /api/doctors/{id}/"));
    match store.doctors.get_mut(&id) {
        Some(doctor) => {
            merge(doctor, patch);
            Json(doctor.clone()).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "Doctor not found"),
    }
}

async fn delete_doctor(State(store): State<Shared>, Path(id): Path<String>) -> Response {
    let mut store = store.lock().unwrap();
    store.log(format!("DELETE /api/doctors/{id}/"));
    match store.doctors.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => error(StatusCode::NOT_FOUND, "Doctor not found"),
    }
}

async fn list_patients(State(store): State<Shared>) -> Response {
    let mut store = store.lock().unwrap();
    store.log("GET /api/patients/");
    let mut patients: Vec<Value> = store.patients.values().cloned().collect();
    patients.sort_by_key(|p| p["patient_id"].as_str().unwrap_or_default().to_string());
    Json(patients).into_response()
}

async fn create_patient(State(store): State<Shared>, Json(mut body): Json<Value>) -> Response {
    let mut store = store.lock().unwrap();
    store.log("POST /api/patients/");
    let id = store.next_id("P");
    body["patient_id"] = json!(id);
    store.patients.insert(id.clone(), body.clone());
    created(json!({
        "patient_id": id,
        "first_name": body["first_name"],
        "last_name": body["last_name"],
        "message": "Patient created successfully",
    }))
}

async fn get_patient(State(store): State<Shared>, Path(id): Path<String>) -> Response {
    let mut store = store.lock().unwrap();
    store.log(format!("GET /api/patients/{id}/"));
    match store.patients.get(&id) {
        Some(patient) => Json(patient.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "Patient not found"),
    }
}

async fn update_patient(
    State(store): State<Shared>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> Response {
    let mut store = store.lock().unwrap();
    store.log(format!("PUT /api/patients/{id}/"));
    match store.patients.get_mut(&id) {
        Some(patient) => {
            merge(patient, patch);
            Json(patient.clone()).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "Patient not found"),
    }
}

async fn delete_patient(State(store): State<Shared>, Path(id): Path<String>) -> Response {
    let mut store = store.lock().unwrap();
    store.log(format!("DELETE /api/patients/{id}/"));
    match store.patients.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => error(StatusCode::NOT_FOUND, "Patient not found"),
    }
}

async fn list_timeslots(
    State(store): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut store = store.lock().unwrap();
    store.log("GET /api/timeslots/");
    let slots: Vec<Value> = store
        .timeslots
        .iter()
        .filter(|s| params.get("doctor_id").map_or(true, |d| s["doctor_id"] == json!(d)))
        .cloned()
        .collect();
    Json(slots).into_response()
}

async fn create_timeslot(State(store): State<Shared>, Json(mut body): Json<Value>) -> Response {
    let mut store = store.lock().unwrap();
    store.log("POST /api/timeslots/");
    let id = store.next_id("T");
    body["timeslot_id"] = json!(id);
    store.timeslots.push(body.clone());
    created(body)
}

async fn delete_timeslot(State(store): State<Shared>, Path(id): Path<String>) -> Response {
    let mut store = store.lock().unwrap();
    store.log(format!("DELETE /api/timeslots/{id}/"));
    let before = store.timeslots.len();
    store.timeslots.retain(|s| s["timeslot_id"] != json!(id));
    if store.timeslots.len() < before {
        StatusCode::NO_CONTENT.into_response()
    } else {
        error(StatusCode::NOT_FOUND, "Time slot not found")
    }
}

async fn list_bookings(
    State(store): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut store = store.lock().unwrap();
    store.log("GET /api/bookings/");
    let matches_param = |b: &Value, key: &str| params.get(key).map_or(true, |v| b[key] == json!(v));
    let bookings: Vec<Value> = store
        .bookings
        .iter()
        .filter(|b| matches_param(b, "doctor_id") && matches_param(b, "patient_id") && matches_param(b, "date"))
        .cloned()
        .collect();
    Json(bookings).into_response()
}

async fn create_booking(State(store): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut store = store.lock().unwrap();
    store.log("POST /api/bookings/");
    let taken = store.bookings.iter().any(|b| {
        b["doctor_id"] == body["doctor_id"]
            && b["start_time"] == body["start_time"]
            && b["appointment_status"] == json!("confirmed")
    });
    if taken {
        return error(StatusCode::CONFLICT, "Doctor already booked in that slot");
    }

    let start = body["start_time"].as_str().unwrap_or_default().to_string();
    let (date, clock) = start.split_once('T').unwrap_or(("", ""));
    let end_time = format!("{date}T{}:00", half_hour_after(clock.get(..5).unwrap_or_default()));
    let id = store.next_id("B");
    let booking = json!({
        "booking_id": id,
        "patient_id": body["patient_id"],
        "doctor_id": body["doctor_id"],
        "timeslot_id": body["timeslot_id"],
        "date": body["date"],
        "start_time": start.clone(),
        "end_time": end_time,
        "appointment_status": "confirmed",
    });
    store.bookings.push(booking.clone());
    created(booking)
}

async fn update_booking(
    State(store): State<Shared>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> Response {
    let mut store = store.lock().unwrap();
    store.log(format!("PUT /api/bookings/{id}/"));
    match store.bookings.iter_mut().find(|b| b["booking_id"] == json!(id)) {
        Some(booking) => {
            merge(booking, patch);
            Json(booking.clone()).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "Booking not found"),
    }
}

async fn delete_booking(State(store): State<Shared>, Path(id): Path<String>) -> Response {
    let mut store = store.lock().unwrap();
    store.log(format!("DELETE /api/bookings/{id}/"));
    let before = store.bookings.len();
    store.bookings.retain(|b| b["booking_id"] != json!(id));
    if store.bookings.len() < before {
        StatusCode::NO_CONTENT.into_response()
    } else {
        error(StatusCode::NOT_FOUND, "Booking not found")
    }
}

async fn create_auth(State(store): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut store = store.lock().unwrap();
    store.log("POST /api/authentication/");
    if store.fail_auth_create {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Server error");
    }
    if store.auth.values().any(|r| r["email"] == body["email"]) {
        return error(StatusCode::CONFLICT, "Email already registered");
    }
    let id = body["user_id"].as_str().unwrap_or_default().to_string();
    store.auth.insert(id, body.clone());
    created(public_auth(&body))
}

async fn login(State(store): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut store = store.lock().unwrap();
    store.log("POST /api/authentication/login/");
    let Some(record) = store.auth.values().find(|r| r["email"] == body["email"]) else {
        return error(StatusCode::NOT_FOUND, "User not found");
    };
    if record["password"] != body["password"] {
        return error(StatusCode::UNAUTHORIZED, "Password is incorrect");
    }
    Json(json!({ "user_id": record["user_id"], "user_type": record["user_type"] })).into_response()
}

async fn get_auth(State(store): State<Shared>, Path(id): Path<String>) -> Response {
    let mut store = store.lock().unwrap();
    store.log(format!("GET /api/authentication/{id}/"));
    match store.auth.get(&id) {
        Some(record) => Json(public_auth(record)).into_response(),
        None => error(StatusCode::NOT_FOUND, "User not found"),
    }
}

async fn update_auth(
    State(store): State<Shared>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> Response {
    let mut store = store.lock().unwrap();
    store.log(format!("PUT /api/authentication/{id}/"));
    match store.auth.get_mut(&id) {
        Some(record) => {
            merge(record, patch);
            Json(public_auth(record)).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "User not found"),
    }
}

async fn delete_auth(State(store): State<Shared>, Path(id): Path<String>) -> Response {
    let mut store = store.lock().unwrap();
    store.log(format!("DELETE /api/authentication/{id}/"));
    match store.auth.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => error(StatusCode::NOT_FOUND, "User not found"),
    }
}
