//! Room Model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operational status of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Available,
    Occupied,
    Cleaning,
    Maintenance,
    OutOfOrder,
}

impl RoomStatus {
    pub const ALL: [RoomStatus; 5] = [
        RoomStatus::Available,
        RoomStatus::Occupied,
        RoomStatus::Cleaning,
        RoomStatus::Maintenance,
        RoomStatus::OutOfOrder,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "available",
            RoomStatus::Occupied => "occupied",
            RoomStatus::Cleaning => "cleaning",
            RoomStatus::Maintenance => "maintenance",
            RoomStatus::OutOfOrder => "out_of_order",
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Room category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomCategory {
    Standard,
    Deluxe,
    Suite,
    Presidential,
}

impl RoomCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            RoomCategory::Standard => "standard",
            RoomCategory::Deluxe => "deluxe",
            RoomCategory::Suite => "suite",
            RoomCategory::Presidential => "presidential",
        }
    }
}

impl fmt::Display for RoomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Room entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub room_number: String,
    pub floor: i32,
    pub category: RoomCategory,
    pub status: RoomStatus,
    pub capacity: u32,
    pub base_price: Decimal,
    #[serde(default)]
    pub beds_count: Option<u32>,
    #[serde(default)]
    pub bed_type: Option<String>,
    #[serde(default)]
    pub has_ocean_view: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// Stay pricing computed by the backend for a search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StayPricing {
    pub total_price: Decimal,
    pub nights: u32,
}

/// Room returned by an availability search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomOffer {
    #[serde(flatten)]
    pub room: Room,
    #[serde(default)]
    pub pricing: Option<StayPricing>,
}

impl RoomOffer {
    /// Price shown to the user: the stay total when priced, else the base rate
    pub fn display_price(&self) -> Decimal {
        self.pricing
            .as_ref()
            .map(|p| p.total_price)
            .unwrap_or(self.room.base_price)
    }

    /// Nights covered by the offer (one when the backend sent no pricing)
    pub fn nights(&self) -> u32 {
        self.pricing.as_ref().map(|p| p.nights).unwrap_or(1)
    }
}

/// Availability search (`GET /rooms/search`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub capacity: u32,
}

impl SearchCriteria {
    /// Smallest and largest party a search accepts
    pub const CAPACITY_RANGE: std::ops::RangeInclusive<u32> = 1..=10;

    pub fn nights(&self) -> i64 {
        (self.check_out_date - self.check_in_date).num_days()
    }
}

/// Room status change payload (`PATCH /rooms/:id/status`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomStatusUpdate {
    pub status: RoomStatus,
    #[serde(default)]
    pub notes: String,
}

/// Currency sent with room rates
pub const ROOM_CURRENCY: &str = "GTQ";

/// Create/update room payload (`POST /rooms`, `PUT /rooms/:id`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomInput {
    pub room_number: String,
    pub floor: i32,
    pub category: RoomCategory,
    pub capacity: u32,
    pub beds_count: u32,
    pub bed_type: String,
    pub base_price: Decimal,
    pub currency: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub has_balcony: bool,
    #[serde(default)]
    pub has_ocean_view: bool,
    #[serde(default)]
    pub has_wifi: bool,
    #[serde(default)]
    pub has_air_conditioning: bool,
    #[serde(default)]
    pub has_minibar: bool,
    #[serde(default)]
    pub has_safe: bool,
}

impl Default for RoomInput {
    fn default() -> Self {
        Self {
            room_number: String::new(),
            floor: 1,
            category: RoomCategory::Standard,
            capacity: 2,
            beds_count: 1,
            bed_type: "queen".to_string(),
            base_price: Decimal::ZERO,
            currency: ROOM_CURRENCY.to_string(),
            description: String::new(),
            amenities: Vec::new(),
            has_balcony: false,
            has_ocean_view: false,
            has_wifi: true,
            has_air_conditioning: true,
            has_minibar: false,
            has_safe: false,
        }
    }
}

impl RoomInput {
    /// Prefill from an existing room so an edit only changes what it sets
    pub fn from_room(room: &Room) -> Self {
        Self {
            room_number: room.room_number.clone(),
            floor: room.floor,
            category: room.category,
            capacity: room.capacity,
            beds_count: room.beds_count.unwrap_or(1),
            bed_type: room.bed_type.clone().unwrap_or_else(|| "queen".to_string()),
            base_price: room.base_price,
            description: room.description.clone().unwrap_or_default(),
            has_ocean_view: room.has_ocean_view,
            ..Self::default()
        }
    }

    /// Trimmed, upper-cased room number and trimmed text fields
    pub fn normalized(mut self) -> Self {
        self.room_number = self.room_number.trim().to_uppercase();
        self.bed_type = self.bed_type.trim().to_string();
        self.description = self.description.trim().to_string();
        self.currency = ROOM_CURRENCY.to_string();
        self.amenities.retain(|a| !a.trim().is_empty());
        self
    }
}

/// `POST /rooms/:id/out-of-order` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutOfOrderRequest {
    pub reason: String,
}

/// `data` of single-room responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomEnvelope {
    pub room: Room,
}

/// `data` of `GET /rooms` and `GET /rooms/search`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomList<T> {
    #[serde(default = "Vec::new")]
    pub rooms: Vec<T>,
}
