//! Room catalogue maintenance for managers and admins

use anyhow::Result;
use clap::{Args, Subcommand};
use rust_decimal::Decimal;

use hotel_client::api::RoomFilter;
use hotel_client::boards::{ROOM_ADMIN_ROLES, RoomBoard};
use shared::models::{RoomCategory, RoomInput};

use super::{Portal, wire};

#[derive(Subcommand, Debug)]
pub enum RoomCommand {
    /// Add a room
    Create(RoomFields),
    /// Change a room; unset fields keep their current value
    Update {
        #[arg(long)]
        id: i64,
        #[command(flatten)]
        fields: RoomFields,
    },
    Delete {
        #[arg(long)]
        id: i64,
    },
    /// Take a room out of service
    OutOfOrder {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        reason: String,
    },
    /// Return an out-of-order room to service
    InService {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Args, Debug, Default)]
pub struct RoomFields {
    #[arg(long)]
    number: Option<String>,
    #[arg(long)]
    floor: Option<i32>,
    #[arg(long, value_parser = wire::<RoomCategory>)]
    category: Option<RoomCategory>,
    #[arg(long)]
    capacity: Option<u32>,
    #[arg(long)]
    beds: Option<u32>,
    #[arg(long)]
    bed_type: Option<String>,
    /// Nightly rate in quetzales
    #[arg(long)]
    price: Option<Decimal>,
    #[arg(long)]
    description: Option<String>,
    /// Extra amenity, repeatable
    #[arg(long = "amenity")]
    amenities: Vec<String>,
    #[arg(long)]
    balcony: Option<bool>,
    #[arg(long)]
    ocean_view: Option<bool>,
    #[arg(long)]
    wifi: Option<bool>,
    #[arg(long)]
    air_conditioning: Option<bool>,
    #[arg(long)]
    minibar: Option<bool>,
    #[arg(long)]
    safe: Option<bool>,
}

impl RoomFields {
    /// Overlay the flags that were given onto `base`
    fn apply(self, mut base: RoomInput) -> RoomInput {
        if let Some(v) = self.number {
            base.room_number = v;
        }
        if let Some(v) = self.floor {
            base.floor = v;
        }
        if let Some(v) = self.category {
            base.category = v;
        }
        if let Some(v) = self.capacity {
            base.capacity = v;
        }
        if let Some(v) = self.beds {
            base.beds_count = v;
        }
        if let Some(v) = self.bed_type {
            base.bed_type = v;
        }
        if let Some(v) = self.price {
            base.base_price = v;
        }
        if let Some(v) = self.description {
            base.description = v;
        }
        if !self.amenities.is_empty() {
            base.amenities = self.amenities;
        }
        let flags = [
            (self.balcony, &mut base.has_balcony),
            (self.ocean_view, &mut base.has_ocean_view),
            (self.wifi, &mut base.has_wifi),
            (self.air_conditioning, &mut base.has_air_conditioning),
            (self.minibar, &mut base.has_minibar),
            (self.safe, &mut base.has_safe),
        ];
        for (given, slot) in flags {
            if let Some(v) = given {
                *slot = v;
            }
        }
        base
    }
}

pub async fn run(portal: &mut Portal, cmd: RoomCommand) -> Result<()> {
    let role = portal.require(ROOM_ADMIN_ROLES)?;
    let mut board = RoomBoard::new(RoomFilter::default());
    let result = board.reload(portal.store.api()).await;
    portal.settle(result)?;

    match cmd {
        RoomCommand::Create(fields) => {
            let input = fields.apply(RoomInput::default());
            let result = board.create_room(portal.store.api(), role, input).await;
            let room = portal.settle(result)?;
            println!("Room {} created with id {}", room.room_number, room.id);
        }
        RoomCommand::Update { id, fields } => {
            let base = board.room(id).map(RoomInput::from_room).unwrap_or_default();
            let input = fields.apply(base);
            let result = board.update_room(portal.store.api(), role, id, input).await;
            let room = portal.settle(result)?;
            println!("Room {} updated", room.room_number);
        }
        RoomCommand::Delete { id } => {
            let result = board.delete_room(portal.store.api(), role, id).await;
            portal.settle(result)?;
            println!("Room {} deleted", id);
        }
        RoomCommand::OutOfOrder { id, reason } => {
            let result = board
                .set_out_of_order(portal.store.api(), role, id, &reason)
                .await;
            portal.settle(result)?;
            println!("Room {} is out of order", id);
        }
        RoomCommand::InService { id } => {
            let result = board.set_in_service(portal.store.api(), role, id).await;
            portal.settle(result)?;
            println!("Room {} is back in service", id);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_keeps_unset_fields() {
        let base = RoomInput {
            room_number: "204".into(),
            floor: 2,
            capacity: 3,
            has_minibar: true,
            ..Default::default()
        };
        let fields = RoomFields {
            price: Some(Decimal::from(480)),
            wifi: Some(false),
            ..Default::default()
        };
        let input = fields.apply(base);
        assert_eq!(input.room_number, "204");
        assert_eq!(input.capacity, 3);
        assert_eq!(input.base_price, Decimal::from(480));
        assert!(!input.has_wifi);
        assert!(input.has_minibar);
    }
}
