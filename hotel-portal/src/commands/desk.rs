//! Staff boards and incident reporting

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;

use hotel_client::api::{ReservationFilter, RoomFilter};
use hotel_client::boards::{ReservationAction, ReservationBoard, RoomBoard};
use hotel_client::guard::StaffTab;
use hotel_client::incidents::report_incident;
use shared::models::{
    IncidentCreate, IncidentPriority, IncidentType, ReservationStatus, RoomCategory, RoomStatus,
};

use super::{Portal, wire};

#[derive(Args, Debug)]
pub struct RoomsArgs {
    #[arg(long, value_parser = wire::<RoomStatus>)]
    status: Option<RoomStatus>,
    #[arg(long)]
    floor: Option<i32>,
    #[arg(long, value_parser = wire::<RoomCategory>)]
    category: Option<RoomCategory>,

    /// Room id to change
    #[arg(long, requires = "to")]
    set: Option<i64>,
    /// Target status for --set
    #[arg(long, value_parser = wire::<RoomStatus>)]
    to: Option<RoomStatus>,
    #[arg(long, default_value = "")]
    notes: String,
}

#[derive(Args, Debug)]
pub struct ReservationsArgs {
    #[arg(long, value_parser = wire::<ReservationStatus>)]
    status: Option<ReservationStatus>,
    #[arg(long)]
    from: Option<NaiveDate>,
    #[arg(long)]
    to: Option<NaiveDate>,
    /// Free text: code, guest name or email
    #[arg(long, default_value = "")]
    search: String,

    /// Reservation id to act on
    #[arg(long, requires = "action")]
    id: Option<i64>,
    /// confirm, checkin, checkout or cancel
    #[arg(long)]
    action: Option<ReservationAction>,
    /// Check-in/out note, or the cancellation reason
    #[arg(long, default_value = "")]
    note: String,
}

#[derive(Args, Debug)]
pub struct IncidentArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    #[arg(long = "type", value_parser = wire::<IncidentType>, default_value = "maintenance")]
    incident_type: IncidentType,
    #[arg(long, value_parser = wire::<IncidentPriority>, default_value = "medium")]
    priority: IncidentPriority,
    #[arg(long)]
    room: Option<i64>,
    #[arg(long, default_value = "")]
    location: String,
    #[arg(long)]
    cost: Option<Decimal>,
    #[arg(long)]
    affects_guests: bool,
    #[arg(long)]
    affects_safety: bool,
    #[arg(long)]
    affects_operations: bool,
}

pub async fn rooms(portal: &mut Portal, args: RoomsArgs) -> Result<()> {
    let role = portal.require(StaffTab::Rooms.allowed_roles())?;
    let mut board = RoomBoard::new(RoomFilter {
        status: args.status,
        floor: args.floor,
        category: args.category,
    });
    let result = board.reload(portal.store.api()).await;
    portal.settle(result)?;

    if let (Some(room_id), Some(target)) = (args.set, args.to) {
        let result = board
            .change_status(portal.store.api(), role, room_id, target, &args.notes)
            .await;
        portal.settle(result)?;
        println!("Room {} is now {}", room_id, target);
    }

    for (floor, rooms) in board.by_floor() {
        println!("Floor {}", floor);
        for room in rooms {
            let actions: Vec<&str> = board
                .offered(room.id, role)
                .iter()
                .map(|s| s.as_str())
                .collect();
            println!(
                "  {:>5}  {:<6} {:<13} {:<13} -> {}",
                room.id,
                room.room_number,
                room.category.as_str(),
                room.status.as_str(),
                if actions.is_empty() { "-".to_string() } else { actions.join(", ") }
            );
        }
    }
    let counts: Vec<String> = board
        .status_counts()
        .into_iter()
        .map(|(status, n)| format!("{} {}", status, n))
        .collect();
    println!("{}", counts.join(" | "));
    Ok(())
}

pub async fn reservations(portal: &mut Portal, args: ReservationsArgs) -> Result<()> {
    let role = portal.require(StaffTab::Reservations.allowed_roles())?;
    let mut board = ReservationBoard::new(ReservationFilter {
        status: args.status,
        start_date: args.from,
        end_date: args.to,
        search: args.search,
    });
    let result = board.reload(portal.store.api()).await;
    portal.settle(result)?;

    if let (Some(id), Some(action)) = (args.id, args.action) {
        let result = board
            .perform(portal.store.api(), role, id, action, &args.note)
            .await;
        portal.settle(result)?;
        println!("Reservation {} is now {}", id, action.target());
    }

    for r in board.reservations() {
        let guest = r
            .guest
            .as_ref()
            .map(|g| format!("{} {}", g.first_name, g.last_name))
            .unwrap_or_default();
        let actions: Vec<&str> = ReservationAction::offered(r.status, role)
            .into_iter()
            .map(|a| a.as_str())
            .collect();
        println!(
            "{:>5}  {:<12} {:<12} {} → {}  {:<24} {}",
            r.id,
            r.reservation_code,
            r.status.as_str(),
            r.check_in_date,
            r.check_out_date,
            guest,
            actions.join(", ")
        );
    }
    Ok(())
}

pub async fn incident(portal: &mut Portal, args: IncidentArgs) -> Result<()> {
    portal.require(StaffTab::Incidents.allowed_roles())?;
    let incident = IncidentCreate {
        title: args.title,
        description: args.description,
        incident_type: args.incident_type,
        priority: args.priority,
        room_id: args.room,
        location: args.location,
        affects_guest_experience: args.affects_guests,
        affects_safety: args.affects_safety,
        affects_operations: args.affects_operations,
        estimated_cost: args.cost,
    };
    let result = report_incident(portal.store.api(), &incident).await;
    let created = portal.settle(result)?;
    println!("Incident #{} reported", created.id);
    Ok(())
}
