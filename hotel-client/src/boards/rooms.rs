//! Room status board

use std::collections::BTreeMap;

use shared::error::ErrorCode;
use shared::models::{Role, Room, RoomInput, RoomStatus, RoomStatusUpdate};

use super::settle;
use crate::api::{HotelApi, RoomFilter};
use crate::client::HttpClient;
use crate::error::{ClientResult, ValidationError};
use crate::guard::RoleSet;
use crate::validation::validate_room_input;

/// One allowed status change and who may make it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomTransition {
    pub from: RoomStatus,
    pub to: RoomStatus,
    pub roles: RoleSet,
}

const fn rule(from: RoomStatus, to: RoomStatus, roles: RoleSet) -> RoomTransition {
    RoomTransition { from, to, roles }
}

const DESK: RoleSet = RoleSet::of(&[Role::Receptionist, Role::Manager]);
const HOUSEKEEPING: RoleSet = RoleSet::of(&[Role::Cleaning, Role::Manager]);
const MANAGER: RoleSet = RoleSet::of(&[Role::Manager]);

pub const ROOM_TRANSITIONS: [RoomTransition; 9] = [
    rule(RoomStatus::Available, RoomStatus::Occupied, DESK),
    rule(RoomStatus::Available, RoomStatus::Maintenance, RoleSet::ANY),
    rule(RoomStatus::Occupied, RoomStatus::Cleaning, DESK),
    rule(RoomStatus::Cleaning, RoomStatus::Available, HOUSEKEEPING),
    rule(RoomStatus::Cleaning, RoomStatus::Maintenance, RoleSet::ANY),
    rule(RoomStatus::Maintenance, RoomStatus::Available, MANAGER),
    rule(RoomStatus::Maintenance, RoomStatus::Cleaning, MANAGER),
    rule(RoomStatus::OutOfOrder, RoomStatus::Maintenance, MANAGER),
    rule(RoomStatus::OutOfOrder, RoomStatus::Available, MANAGER),
];

/// Roles that create, edit, delete and take rooms out of service
pub const ROOM_ADMIN_ROLES: RoleSet = RoleSet::of(&[Role::Manager, Role::Admin]);

/// Targets offered for a room in `from` to someone acting as `role`
pub fn room_targets(from: RoomStatus, role: Role) -> Vec<RoomStatus> {
    ROOM_TRANSITIONS
        .iter()
        .filter(|t| t.from == from && t.roles.allows(role))
        .map(|t| t.to)
        .collect()
}

#[derive(Debug, Default)]
pub struct RoomBoard {
    filter: RoomFilter,
    rooms: Vec<Room>,
}

impl RoomBoard {
    pub fn new(filter: RoomFilter) -> Self {
        Self {
            filter,
            rooms: Vec::new(),
        }
    }

    pub fn filter(&self) -> &RoomFilter {
        &self.filter
    }

    /// Takes effect on the next reload
    pub fn set_filter(&mut self, filter: RoomFilter) {
        self.filter = filter;
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, room_id: i64) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == room_id)
    }

    pub async fn reload<H: HttpClient>(&mut self, api: &HotelApi<H>) -> ClientResult<()> {
        self.rooms = api.list_rooms(&self.filter).await?;
        tracing::debug!(count = self.rooms.len(), "Room board reloaded");
        Ok(())
    }

    /// Rooms grouped by floor, ascending, room numbers in order
    pub fn by_floor(&self) -> BTreeMap<i32, Vec<&Room>> {
        let mut floors: BTreeMap<i32, Vec<&Room>> = BTreeMap::new();
        for room in &self.rooms {
            floors.entry(room.floor).or_default().push(room);
        }
        for rooms in floors.values_mut() {
            rooms.sort_by(|a, b| a.room_number.cmp(&b.room_number));
        }
        floors
    }

    /// Count per status, every status listed
    pub fn status_counts(&self) -> Vec<(RoomStatus, usize)> {
        RoomStatus::ALL
            .iter()
            .map(|s| (*s, self.rooms.iter().filter(|r| r.status == *s).count()))
            .collect()
    }

    /// Targets offered for a loaded room; unknown rooms offer nothing
    pub fn offered(&self, room_id: i64, role: Role) -> Vec<RoomStatus> {
        self.room(room_id)
            .map(|room| room_targets(room.status, role))
            .unwrap_or_default()
    }

    /// Move a room to `target`, then reload the board
    pub async fn change_status<H: HttpClient>(
        &mut self,
        api: &HotelApi<H>,
        role: Role,
        room_id: i64,
        target: RoomStatus,
        notes: &str,
    ) -> ClientResult<()> {
        let room = self.loaded(room_id)?;
        if !room_targets(room.status, role).contains(&target) {
            return Err(ValidationError::new(
                "status",
                format!(
                    "Room {} cannot change from {} to {} as {}",
                    room.room_number, room.status, target, role
                ),
            )
            .with_code(ErrorCode::RoomTransitionNotAllowed)
            .into());
        }

        tracing::info!(room = %room.room_number, from = %room.status, to = %target, "Changing room status");
        let update = RoomStatusUpdate {
            status: target,
            notes: notes.trim().to_string(),
        };
        let result = api.change_room_status(room_id, &update).await;
        if let Err(e) = &result {
            tracing::warn!(room_id, error = %e, "Room status change rejected");
        }
        let reload = self.reload(api).await;
        settle(result, reload)
    }

    /// Add a room to the hotel, then reload the board
    pub async fn create_room<H: HttpClient>(
        &mut self,
        api: &HotelApi<H>,
        role: Role,
        input: RoomInput,
    ) -> ClientResult<Room> {
        require_room_admin(role)?;
        let input = input.normalized();
        validate_room_input(&input)?;

        tracing::info!(room = %input.room_number, floor = input.floor, "Creating room");
        let result = api.create_room(&input).await;
        if let Err(e) = &result {
            tracing::warn!(room = %input.room_number, error = %e, "Room creation rejected");
        }
        let reload = self.reload(api).await;
        settle(result, reload)
    }

    /// Replace a loaded room's details, then reload the board
    pub async fn update_room<H: HttpClient>(
        &mut self,
        api: &HotelApi<H>,
        role: Role,
        room_id: i64,
        input: RoomInput,
    ) -> ClientResult<Room> {
        require_room_admin(role)?;
        self.loaded(room_id)?;
        let input = input.normalized();
        validate_room_input(&input)?;

        tracing::info!(room_id, room = %input.room_number, "Updating room");
        let result = api.update_room(room_id, &input).await;
        if let Err(e) = &result {
            tracing::warn!(room_id, error = %e, "Room update rejected");
        }
        let reload = self.reload(api).await;
        settle(result, reload)
    }

    pub async fn delete_room<H: HttpClient>(
        &mut self,
        api: &HotelApi<H>,
        role: Role,
        room_id: i64,
    ) -> ClientResult<()> {
        require_room_admin(role)?;
        let room = self.loaded(room_id)?;

        tracing::info!(room = %room.room_number, "Deleting room");
        let result = api.delete_room(room_id).await;
        if let Err(e) = &result {
            tracing::warn!(room_id, error = %e, "Room deletion rejected");
        }
        let reload = self.reload(api).await;
        settle(result, reload)
    }

    /// Take a room out of service; a reason is required
    pub async fn set_out_of_order<H: HttpClient>(
        &mut self,
        api: &HotelApi<H>,
        role: Role,
        room_id: i64,
        reason: &str,
    ) -> ClientResult<()> {
        require_room_admin(role)?;
        let room = self.loaded(room_id)?;
        if room.status == RoomStatus::OutOfOrder {
            return Err(ValidationError::new(
                "status",
                format!("Room {} is already out of order", room.room_number),
            )
            .with_code(ErrorCode::RoomTransitionNotAllowed)
            .into());
        }
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(ValidationError::new("reason", "A reason is required")
                .with_code(ErrorCode::RequiredField)
                .into());
        }

        tracing::info!(room = %room.room_number, "Setting room out of order");
        let result = api.set_room_out_of_order(room_id, reason).await;
        if let Err(e) = &result {
            tracing::warn!(room_id, error = %e, "Out-of-order request rejected");
        }
        let reload = self.reload(api).await;
        settle(result, reload)
    }

    /// Return an out-of-order room to service
    pub async fn set_in_service<H: HttpClient>(
        &mut self,
        api: &HotelApi<H>,
        role: Role,
        room_id: i64,
    ) -> ClientResult<()> {
        require_room_admin(role)?;
        let room = self.loaded(room_id)?;
        if room.status != RoomStatus::OutOfOrder {
            return Err(ValidationError::new(
                "status",
                format!("Room {} is {}, not out of order", room.room_number, room.status),
            )
            .with_code(ErrorCode::RoomTransitionNotAllowed)
            .into());
        }

        tracing::info!(room = %room.room_number, "Returning room to service");
        let result = api.set_room_in_service(room_id).await;
        if let Err(e) = &result {
            tracing::warn!(room_id, error = %e, "In-service request rejected");
        }
        let reload = self.reload(api).await;
        settle(result, reload)
    }

    fn loaded(&self, room_id: i64) -> ClientResult<&Room> {
        self.room(room_id).ok_or_else(|| {
            ValidationError::new("room_id", format!("Room {} is not on the board", room_id))
                .with_code(ErrorCode::RoomNotFound)
                .into()
        })
    }
}

fn require_room_admin(role: Role) -> Result<(), ValidationError> {
    if ROOM_ADMIN_ROLES.allows(role) {
        return Ok(());
    }
    Err(ValidationError::new("role", format!("Role {} cannot manage rooms", role))
        .with_code(ErrorCode::RoleRequired))
}
