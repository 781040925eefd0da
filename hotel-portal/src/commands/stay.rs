//! Guest self-service check-in and check-out

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use hotel_client::guard::RoleSet;
use hotel_client::stay::{IdentityDocument, check_in_by_code, check_out_by_code};
use shared::models::Role;

use super::Portal;

const GUEST_ONLY: RoleSet = RoleSet::of(&[Role::Guest]);

#[derive(Args, Debug)]
pub struct CheckInArgs {
    /// Reservation code from the confirmation
    #[arg(long)]
    code: String,
    /// Scan of the passport or ID card (JPG, PNG or PDF, up to 5MB)
    #[arg(long)]
    document: PathBuf,
}

#[derive(Args, Debug)]
pub struct CheckOutArgs {
    #[arg(long)]
    code: String,
}

pub async fn check_in(portal: &mut Portal, args: CheckInArgs) -> Result<()> {
    portal.require(GUEST_ONLY)?;
    let document = IdentityDocument::from_path(&args.document)
        .with_context(|| format!("Cannot read {}", args.document.display()))?;

    let result = check_in_by_code(portal.store.api(), &args.code, &document).await;
    let reservation = portal.settle(result)?;
    match reservation.room.as_ref() {
        Some(room) => println!(
            "Checked in to {}. Your room is {}.",
            reservation.reservation_code, room.room_number
        ),
        None => println!("Checked in to {}.", reservation.reservation_code),
    }
    Ok(())
}

pub async fn check_out(portal: &mut Portal, args: CheckOutArgs) -> Result<()> {
    portal.require(GUEST_ONLY)?;
    let result = check_out_by_code(portal.store.api(), &args.code).await;
    let summary = portal.settle(result)?;
    println!("Checked out of {}.", summary.reservation.reservation_code);

    if let Some(invoice) = summary.invoice {
        println!(
            "Invoice {}",
            invoice.invoice_number.as_deref().unwrap_or("(pending number)")
        );
        for (label, amount) in [
            ("Subtotal", invoice.subtotal),
            ("Tax", invoice.tax_amount),
            ("Total", invoice.total_amount),
        ] {
            if let Some(amount) = amount {
                println!("  {:<9} Q{:.2}", label, amount);
            }
        }
    }
    Ok(())
}
