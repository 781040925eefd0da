//! Availability search and the booking wizard

use anyhow::{Result, bail};
use chrono::NaiveDate;
use clap::Args;

use hotel_client::AppRoute;
use hotel_client::boards::RESERVATION_DESK_ROLES;
use hotel_client::guard::RoleSet;
use hotel_client::wizard::{BookingMode, Clock, GuestContact, ReservationWizard, WizardState};
use shared::models::{Role, RoomOffer, SearchCriteria};
use shared::util::today;

use super::{Portal, present};

#[derive(Args, Debug)]
pub struct BookArgs {
    /// Check-in date (YYYY-MM-DD)
    #[arg(long)]
    check_in: NaiveDate,
    /// Check-out date (YYYY-MM-DD)
    #[arg(long)]
    check_out: NaiveDate,
    /// Room to book, as listed by `search`
    #[arg(long)]
    room: i64,
    #[arg(long, default_value_t = 2)]
    adults: u32,
    #[arg(long, default_value_t = 0)]
    children: u32,
    #[arg(long, default_value = "")]
    requests: String,

    // Guest contact, required when booking at the desk
    #[arg(long, default_value = "")]
    first_name: String,
    #[arg(long, default_value = "")]
    last_name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    document: String,
}

/// Roles that may book, and how
fn booking_mode(role: Role) -> Option<BookingMode> {
    if role == Role::Guest {
        Some(BookingMode::SelfService)
    } else if RESERVATION_DESK_ROLES.contains(role) {
        Some(BookingMode::Staff)
    } else {
        None
    }
}

fn booking_roles() -> RoleSet {
    RESERVATION_DESK_ROLES.with(Role::Guest)
}

fn print_offers(offers: &[RoomOffer]) {
    println!("{:>5}  {:<6} {:>5}  {:<13} {:>8}  {:>10}", "ID", "ROOM", "FLOOR", "CATEGORY", "CAPACITY", "PRICE");
    for offer in offers {
        let room = &offer.room;
        println!(
            "{:>5}  {:<6} {:>5}  {:<13} {:>8}  {:>10}",
            room.id,
            room.room_number,
            room.floor,
            room.category.as_str(),
            room.capacity,
            format!("{:.2}", offer.display_price())
        );
    }
}

pub async fn search(portal: &mut Portal, check_in: NaiveDate, check_out: NaiveDate, capacity: u32) -> Result<()> {
    let role = portal.require(booking_roles())?;
    let Some(mode) = booking_mode(role) else {
        bail!("Role {} cannot book", role);
    };
    let criteria = SearchCriteria {
        check_in_date: check_in,
        check_out_date: check_out,
        capacity,
    };

    let mut wizard = ReservationWizard::new(mode, Clock::Manual);
    let result = wizard
        .search(portal.store.api(), criteria, today())
        .await
        .map(|_| ());
    portal.settle(result)?;

    match wizard.state() {
        WizardState::Selecting { offers, .. } => {
            println!("{} room(s) free for {} night(s)", offers.len(), criteria.nights());
            print_offers(offers);
        }
        WizardState::Searching {
            notice: Some(notice),
            ..
        } => println!("{}", notice),
        other => tracing::debug!(state = other.name(), "Unexpected wizard state after search"),
    }
    Ok(())
}

pub async fn book(portal: &mut Portal, args: BookArgs) -> Result<()> {
    let role = portal.require(booking_roles())?;
    let Some(mode) = booking_mode(role) else {
        bail!("Role {} cannot book", role);
    };
    let criteria = SearchCriteria {
        check_in_date: args.check_in,
        check_out_date: args.check_out,
        capacity: args.adults + args.children,
    };

    let mut wizard = ReservationWizard::new(mode, Clock::realtime());
    let result = wizard
        .search(portal.store.api(), criteria, today())
        .await
        .map(|_| ());
    portal.settle(result)?;
    if let WizardState::Searching {
        notice: Some(notice),
        ..
    } = wizard.state()
    {
        bail!("{}", notice);
    }

    wizard.select(args.room).map_err(|_| {
        anyhow::anyhow!("Room {} is not free for these dates. Run `search` to list free rooms.", args.room)
    })?;
    wizard
        .edit_draft(|draft| {
            draft.adults_count = args.adults;
            draft.children_count = args.children;
            draft.special_requests = args.requests;
            if mode == BookingMode::Staff {
                draft.contact = GuestContact {
                    first_name: args.first_name,
                    last_name: args.last_name,
                    email: args.email,
                    phone: args.phone,
                    document_number: args.document,
                    ..Default::default()
                };
            }
        })
        .map_err(present)?;

    let result = wizard.submit(portal.store.api()).await.map(|_| ());
    portal.settle(result)?;

    match wizard.state() {
        WizardState::Submitted {
            reservation_code,
            after_expiry,
        } => {
            println!("Reservation {} created", reservation_code);
            if *after_expiry {
                println!("Note: confirmed after the hold window ran out");
            }
            if mode == BookingMode::SelfService {
                println!("See it under {}", AppRoute::GuestPortal);
            }
            Ok(())
        }
        WizardState::Expired { .. } => bail!("The hold on the room expired. Start the booking again."),
        other => bail!("Booking did not complete ({})", other.name()),
    }
}
