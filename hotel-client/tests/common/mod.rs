//! In-process mock of the hotel backend
//!
//! An `axum::Router` over shared state, driven through `OneshotHttpClient`.
//! Every request is recorded as `"METHOD /path"` so tests can assert what
//! reached the backend.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Value, json};

use hotel_client::client::HttpClient;
use hotel_client::{HotelApi, OneshotHttpClient};
use shared::client::{LoginRequest, UserInfo};
use shared::models::{
    Guest, GuestCreate, Incident, IncidentCreate, IncidentStatus, OutOfOrderRequest, Reservation,
    ReservationCreate, ReservationStatus, Role, Room, RoomCategory, RoomInput, RoomOffer,
    RoomStatus, RoomStatusUpdate, StayPricing,
};

pub const ADMIN_PASSWORD: &str = "Admin123!";
pub const STAFF_PASSWORD: &str = "Staff123!";

#[derive(Debug, Default)]
pub struct MockState {
    pub rooms: Vec<Room>,
    /// Returned by `GET /rooms/search` regardless of criteria
    pub offers: Vec<RoomOffer>,
    pub reservations: Vec<Reservation>,
    pub guests: Vec<Guest>,
    pub requests: Vec<String>,
    /// How long `POST /reservations` takes to answer
    pub create_delay: Option<Duration>,
    /// Answer for the next mutating call instead of applying it
    pub reject_next: Option<(StatusCode, String)>,
    next_id: i64,
}

impl MockState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        1000 + self.next_id
    }
}

#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    pub fn requests(&self) -> Vec<String> {
        self.state().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.state().requests.clear();
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/auth/login", post(login))
            .route("/auth/logout", post(logout))
            .route("/rooms", get(list_rooms).post(create_room))
            .route("/rooms/search", get(search_rooms))
            .route("/rooms/{id}", put(update_room).delete(delete_room))
            .route("/rooms/{id}/status", patch(change_room_status))
            .route("/rooms/{id}/out-of-order", post(room_out_of_order))
            .route("/rooms/{id}/in-service", post(room_in_service))
            .route("/reservations", get(list_reservations).post(create_reservation))
            .route("/reservations/search", get(search_reservations))
            .route("/reservations/{id}/{action}", post(reservation_action))
            .route("/guests", get(find_guests).post(create_guest))
            .route("/guests/me", get(my_guest))
            .route("/incidents", post(create_incident))
            .route("/reports/{kind}", get(report))
            .layer(middleware::from_fn_with_state(self.state.clone(), record))
            .with_state(self.state.clone())
    }

    pub fn http(&self) -> OneshotHttpClient {
        OneshotHttpClient::new(self.router())
    }

    /// API already signed in as `role`
    pub fn api_as(&self, role: Role) -> HotelApi<OneshotHttpClient> {
        let mut http = self.http();
        http.set_token(Some(token_for(role)));
        HotelApi::new(http)
    }
}

pub fn token_for(role: Role) -> String {
    format!("token-{}", role)
}

pub fn user_for(role: Role) -> UserInfo {
    UserInfo {
        id: role as i64 + 1,
        role,
        first_name: "Test".into(),
        last_name: role.as_str().into(),
        email: format!("{}@marazul.test", role),
        username: Some(role.as_str().into()),
        phone: None,
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn room(id: i64, number: &str, floor: i32, status: RoomStatus, capacity: u32) -> Room {
    Room {
        id,
        room_number: number.into(),
        floor,
        category: RoomCategory::Standard,
        status,
        capacity,
        base_price: Decimal::from(350),
        beds_count: Some(1),
        bed_type: Some("queen".into()),
        has_ocean_view: false,
        description: None,
    }
}

pub fn offer(room: Room, nights: u32) -> RoomOffer {
    let total = room.base_price * Decimal::from(nights);
    RoomOffer {
        room,
        pricing: Some(StayPricing {
            total_price: total,
            nights,
        }),
    }
}

pub fn reservation(id: i64, code: &str, status: ReservationStatus) -> Reservation {
    Reservation {
        id,
        reservation_code: code.into(),
        status,
        guest_id: Some(1),
        room_id: Some(1),
        check_in_date: date(2024, 1, 10),
        check_out_date: date(2024, 1, 12),
        adults_count: 2,
        children_count: 0,
        nights_count: Some(2),
        subtotal: Some(Decimal::from(625)),
        tax_amount: Some(Decimal::from(75)),
        total_amount: Some(Decimal::from(700)),
        special_requests: None,
        can_check_in: false,
        can_check_out: false,
        guest: None,
        room: None,
    }
}

// ========== Handlers ==========

type Shared = Arc<Mutex<MockState>>;

async fn record(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let line = format!("{} {}", request.method(), request.uri().path());
    state.lock().unwrap().requests.push(line);
    next.run(request).await
}

fn ok(data: Value) -> Response {
    Json(json!({ "success": true, "data": data })).into_response()
}

fn fail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "success": false, "message": message }))).into_response()
}

fn authorize(headers: &HeaderMap) -> Result<Role, Response> {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    Role::ALL
        .into_iter()
        .find(|r| token == Some(token_for(*r).as_str()))
        .ok_or_else(|| fail(StatusCode::UNAUTHORIZED, "Token inválido"))
}

fn take_rejection(state: &Shared) -> Option<Response> {
    state
        .lock()
        .unwrap()
        .reject_next
        .take()
        .map(|(status, message)| fail(status, &message))
}

async fn login(Json(req): Json<LoginRequest>) -> Response {
    let matched = Role::ALL.into_iter().find(|r| {
        let password = if *r == Role::Admin { ADMIN_PASSWORD } else { STAFF_PASSWORD };
        req.credential == r.as_str() && req.password == password
    });
    match matched {
        Some(role) => ok(json!({ "user": user_for(role), "token": token_for(role) })),
        None => fail(StatusCode::UNAUTHORIZED, "Credenciales inválidas"),
    }
}

async fn logout(headers: HeaderMap) -> Response {
    match authorize(&headers) {
        Ok(_) => ok(json!({})),
        Err(resp) => resp,
    }
}

async fn list_rooms(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    let state = state.lock().unwrap();
    let rooms: Vec<&Room> = state
        .rooms
        .iter()
        .filter(|r| q.get("status").is_none_or(|s| *s == r.status.as_str()))
        .filter(|r| q.get("floor").is_none_or(|f| r.floor.to_string() == *f))
        .collect();
    ok(json!({ "rooms": rooms }))
}

/// Only managers and admins may change the room catalogue
fn authorize_room_admin(headers: &HeaderMap) -> Result<Role, Response> {
    match authorize(headers)? {
        role @ (Role::Manager | Role::Admin) => Ok(role),
        _ => Err(fail(StatusCode::FORBIDDEN, "Acceso denegado")),
    }
}

fn room_from_input(id: i64, input: RoomInput, status: RoomStatus) -> Room {
    Room {
        id,
        room_number: input.room_number,
        floor: input.floor,
        category: input.category,
        status,
        capacity: input.capacity,
        base_price: input.base_price,
        beds_count: Some(input.beds_count),
        bed_type: Some(input.bed_type),
        has_ocean_view: input.has_ocean_view,
        description: Some(input.description),
    }
}

async fn create_room(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(input): Json<RoomInput>,
) -> Response {
    if let Err(resp) = authorize_room_admin(&headers) {
        return resp;
    }
    if let Some(resp) = take_rejection(&state) {
        return resp;
    }
    let mut state = state.lock().unwrap();
    if state.rooms.iter().any(|r| r.room_number == input.room_number) {
        return fail(StatusCode::CONFLICT, "El número de habitación ya existe");
    }
    let id = state.next_id();
    let room = room_from_input(id, input, RoomStatus::Available);
    state.rooms.push(room.clone());
    ok(json!({ "room": room }))
}

async fn update_room(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(input): Json<RoomInput>,
) -> Response {
    if let Err(resp) = authorize_room_admin(&headers) {
        return resp;
    }
    let mut state = state.lock().unwrap();
    match state.rooms.iter_mut().find(|r| r.id == id) {
        Some(room) => {
            *room = room_from_input(id, input, room.status);
            ok(json!({ "room": room }))
        }
        None => fail(StatusCode::NOT_FOUND, "Habitación no encontrada"),
    }
}

async fn delete_room(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(resp) = authorize_room_admin(&headers) {
        return resp;
    }
    if let Some(resp) = take_rejection(&state) {
        return resp;
    }
    let mut state = state.lock().unwrap();
    let before = state.rooms.len();
    state.rooms.retain(|r| r.id != id);
    if state.rooms.len() == before {
        return fail(StatusCode::NOT_FOUND, "Habitación no encontrada");
    }
    ok(json!({}))
}

async fn room_out_of_order(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(req): Json<OutOfOrderRequest>,
) -> Response {
    if let Err(resp) = authorize_room_admin(&headers) {
        return resp;
    }
    if req.reason.trim().is_empty() {
        return fail(StatusCode::BAD_REQUEST, "Motivo requerido");
    }
    set_room_status(&state, id, RoomStatus::OutOfOrder)
}

async fn room_in_service(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(resp) = authorize_room_admin(&headers) {
        return resp;
    }
    set_room_status(&state, id, RoomStatus::Available)
}

fn set_room_status(state: &Shared, id: i64, status: RoomStatus) -> Response {
    let mut state = state.lock().unwrap();
    match state.rooms.iter_mut().find(|r| r.id == id) {
        Some(room) => {
            room.status = status;
            ok(json!({ "room": room }))
        }
        None => fail(StatusCode::NOT_FOUND, "Habitación no encontrada"),
    }
}

async fn search_rooms(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    let state = state.lock().unwrap();
    ok(json!({ "rooms": state.offers }))
}

async fn change_room_status(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(update): Json<RoomStatusUpdate>,
) -> Response {
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    if let Some(resp) = take_rejection(&state) {
        return resp;
    }
    let mut state = state.lock().unwrap();
    match state.rooms.iter_mut().find(|r| r.id == id) {
        Some(room) => {
            room.status = update.status;
            ok(json!({ "room": room }))
        }
        None => fail(StatusCode::NOT_FOUND, "Habitación no encontrada"),
    }
}

async fn list_reservations(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    let state = state.lock().unwrap();
    ok(json!({ "reservations": state.reservations }))
}

async fn search_reservations(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    let query = q.get("query").cloned().unwrap_or_default().to_uppercase();
    let state = state.lock().unwrap();
    let found: Vec<&Reservation> = state
        .reservations
        .iter()
        .filter(|r| !query.is_empty() && r.reservation_code.to_uppercase().contains(&query))
        .collect();
    ok(json!({ "reservations": found }))
}

async fn create_reservation(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(req): Json<ReservationCreate>,
) -> Response {
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    let delay = state.lock().unwrap().create_delay;
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    if let Some(resp) = take_rejection(&state) {
        return resp;
    }
    let mut state = state.lock().unwrap();
    let id = state.next_id();
    let mut created = reservation(id, &format!("MAR-{}", id), ReservationStatus::Pending);
    created.guest_id = req.guest_id;
    created.room_id = Some(req.room_id);
    created.check_in_date = req.check_in_date;
    created.check_out_date = req.check_out_date;
    created.adults_count = req.adults_count;
    created.children_count = req.children_count;
    state.reservations.push(created.clone());
    ok(json!({ "reservation": created }))
}

async fn reservation_action(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((id, action)): Path<(i64, String)>,
) -> Response {
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    if let Some(resp) = take_rejection(&state) {
        return resp;
    }
    let target = match action.as_str() {
        "confirm" => ReservationStatus::Confirmed,
        "checkin" => ReservationStatus::CheckedIn,
        "checkout" => ReservationStatus::CheckedOut,
        "cancel" => ReservationStatus::Cancelled,
        _ => return fail(StatusCode::NOT_FOUND, "Acción desconocida"),
    };
    let mut state = state.lock().unwrap();
    match state.reservations.iter_mut().find(|r| r.id == id) {
        Some(r) => {
            r.status = target;
            r.can_check_in = false;
            r.can_check_out = false;
            if target == ReservationStatus::CheckedOut {
                let invoice = json!({
                    "id": 5000 + r.id,
                    "invoice_number": format!("FAC-{}", r.reservation_code),
                    "subtotal": r.subtotal,
                    "tax_amount": r.tax_amount,
                    "total_amount": r.total_amount,
                });
                return ok(json!({ "reservation": r, "invoice": invoice }));
            }
            ok(json!({ "reservation": r }))
        }
        None => fail(StatusCode::NOT_FOUND, "Reservación no encontrada"),
    }
}

async fn find_guests(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    let state = state.lock().unwrap();
    let email = q.get("email").cloned().unwrap_or_default();
    let guests: Vec<&Guest> = state
        .guests
        .iter()
        .filter(|g| g.email.as_deref() == Some(email.as_str()))
        .collect();
    ok(json!({ "guests": guests }))
}

async fn create_guest(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(req): Json<GuestCreate>,
) -> Response {
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    let mut state = state.lock().unwrap();
    let guest = Guest {
        id: state.next_id(),
        user_id: None,
        first_name: req.first_name,
        last_name: req.last_name,
        email: Some(req.email),
        phone: Some(req.phone),
        document_type: Some(req.document_type),
        document_number: Some(req.document_number),
        document_country: Some(req.document_country),
    };
    state.guests.push(guest.clone());
    ok(json!({ "guest": guest }))
}

async fn my_guest(headers: HeaderMap) -> Response {
    match authorize(&headers) {
        Ok(Role::Guest) => {
            let user = user_for(Role::Guest);
            ok(json!({ "guest": {
                "id": 77,
                "user_id": user.id,
                "first_name": user.first_name,
                "last_name": user.last_name,
                "email": user.email,
            }}))
        }
        Ok(_) => fail(StatusCode::NOT_FOUND, "Perfil de huésped no encontrado"),
        Err(resp) => resp,
    }
}

async fn create_incident(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(req): Json<IncidentCreate>,
) -> Response {
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    let id = state.lock().unwrap().next_id();
    let incident = Incident {
        id,
        title: req.title,
        description: req.description,
        incident_type: req.incident_type,
        priority: req.priority,
        status: Some(IncidentStatus::Reported),
        room_id: req.room_id,
    };
    ok(json!({ "incident": incident }))
}

async fn report(
    headers: HeaderMap,
    Path(kind): Path<String>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    ok(json!({
        "report": kind,
        "period": { "start": q.get("start_date"), "end": q.get("end_date") },
        "summary": { "occupancy_rate": 72.5, "total_revenue": 15400 }
    }))
}
