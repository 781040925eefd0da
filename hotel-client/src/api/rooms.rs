//! Room endpoints

use shared::models::{
    OutOfOrderRequest, Room, RoomCategory, RoomEnvelope, RoomInput, RoomList, RoomOffer,
    RoomStatus, RoomStatusUpdate, SearchCriteria,
};
use shared::response::ApiResponse;

use super::{HotelApi, into_data, into_unit, with_query};
use crate::{ClientResult, HttpClient};

/// Rooms fetched per board load
pub const ROOM_PAGE_LIMIT: u32 = 100;

/// Room board filters; `None` filters are not sent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomFilter {
    pub status: Option<RoomStatus>,
    pub floor: Option<i32>,
    pub category: Option<RoomCategory>,
}

impl RoomFilter {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("status", self.status.map(|s| s.to_string()).unwrap_or_default()),
            ("floor", self.floor.map(|f| f.to_string()).unwrap_or_default()),
            ("category", self.category.map(|c| c.to_string()).unwrap_or_default()),
            ("page", "1".to_string()),
            ("limit", ROOM_PAGE_LIMIT.to_string()),
        ]
    }
}

impl<H: HttpClient> HotelApi<H> {
    /// `GET /rooms`
    pub async fn list_rooms(&self, filter: &RoomFilter) -> ClientResult<Vec<Room>> {
        let path = with_query("rooms", &filter.to_query());
        let resp: ApiResponse<RoomList<Room>> = self.http.get(&path).await?;
        Ok(into_data(resp, "rooms")?.rooms)
    }

    /// `GET /rooms/search`
    pub async fn search_available(&self, criteria: &SearchCriteria) -> ClientResult<Vec<RoomOffer>> {
        let path = with_query(
            "rooms/search",
            &[
                ("check_in_date", criteria.check_in_date.to_string()),
                ("check_out_date", criteria.check_out_date.to_string()),
                ("capacity", criteria.capacity.to_string()),
            ],
        );
        let resp: ApiResponse<RoomList<RoomOffer>> = self.http.get(&path).await?;
        Ok(into_data(resp, "rooms")?.rooms)
    }

    /// `PATCH /rooms/:id/status`
    pub async fn change_room_status(&self, room_id: i64, update: &RoomStatusUpdate) -> ClientResult<()> {
        let path = format!("rooms/{}/status", room_id);
        into_unit(self.http.patch(&path, update).await?)
    }

    /// `POST /rooms`
    pub async fn create_room(&self, input: &RoomInput) -> ClientResult<Room> {
        let resp: ApiResponse<RoomEnvelope> = self.http.post("rooms", input).await?;
        Ok(into_data(resp, "room")?.room)
    }

    /// `PUT /rooms/:id`
    pub async fn update_room(&self, room_id: i64, input: &RoomInput) -> ClientResult<Room> {
        let path = format!("rooms/{}", room_id);
        let resp: ApiResponse<RoomEnvelope> = self.http.put(&path, input).await?;
        Ok(into_data(resp, "room")?.room)
    }

    /// `DELETE /rooms/:id`
    pub async fn delete_room(&self, room_id: i64) -> ClientResult<()> {
        into_unit(self.http.delete(&format!("rooms/{}", room_id)).await?)
    }

    /// `POST /rooms/:id/out-of-order`
    pub async fn set_room_out_of_order(&self, room_id: i64, reason: &str) -> ClientResult<()> {
        let body = OutOfOrderRequest {
            reason: reason.to_string(),
        };
        into_unit(self.http.post(&format!("rooms/{}/out-of-order", room_id), &body).await?)
    }

    /// `POST /rooms/:id/in-service`
    pub async fn set_room_in_service(&self, room_id: i64) -> ClientResult<()> {
        into_unit(self.http.post_empty(&format!("rooms/{}/in-service", room_id)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_filter_query() {
        let filter = RoomFilter {
            status: Some(RoomStatus::OutOfOrder),
            floor: None,
            category: Some(RoomCategory::Suite),
        };
        assert_eq!(
            with_query("rooms", &filter.to_query()),
            "rooms?status=out_of_order&category=suite&page=1&limit=100"
        );
    }
}
