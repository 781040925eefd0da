//! Subcommands and the state they share

mod account;
mod booking;
mod catalogue;
mod desk;
mod reports;
mod stay;

use anyhow::{Result, anyhow, bail};
use clap::Subcommand;
use serde::de::DeserializeOwned;

use hotel_client::guard::{GuardDecision, RoleSet, evaluate};
use hotel_client::{ClientError, ClientResult, FileStorage, NetworkHttpClient, Role, SessionStore};

use crate::config::PortalConfig;

pub use account::AccountCommand;
pub use booking::BookArgs;
pub use catalogue::RoomCommand;
pub use desk::{IncidentArgs, ReservationsArgs, RoomsArgs};
pub use reports::ReportArgs;
pub use stay::{CheckInArgs, CheckOutArgs};

type Store = SessionStore<NetworkHttpClient, FileStorage>;

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(flatten)]
    Account(AccountCommand),

    /// Search free rooms for a stay
    Search {
        /// Check-in date (YYYY-MM-DD)
        #[arg(long)]
        check_in: chrono::NaiveDate,
        /// Check-out date (YYYY-MM-DD)
        #[arg(long)]
        check_out: chrono::NaiveDate,
        /// Number of guests
        #[arg(long, default_value_t = 2)]
        capacity: u32,
    },

    /// Book a room through the reservation wizard
    Book(BookArgs),

    /// Room board; with --set, change one room's status
    Rooms(RoomsArgs),

    /// Add, change or retire rooms
    #[command(subcommand)]
    Room(RoomCommand),

    /// Reservation board; with --action, act on one reservation
    Reservations(ReservationsArgs),

    /// Report an incident
    Incident(IncidentArgs),

    /// Occupancy or sales report, or the dashboard summary
    Report(ReportArgs),

    /// Check in to your reservation with an identity document
    Checkin(CheckInArgs),

    /// Check out and print the invoice
    Checkout(CheckOutArgs),
}

pub struct Portal {
    config: PortalConfig,
    store: Store,
}

impl Portal {
    /// Build the network client and restore any saved session
    pub fn open(config: PortalConfig) -> Result<Self> {
        let http = NetworkHttpClient::new(&config.client_config()).map_err(present)?;
        let storage = FileStorage::new(&config.data_dir);
        let mut store = SessionStore::new(http, storage);
        store.restore();
        Ok(Self { config, store })
    }

    pub async fn run(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Account(cmd) => account::run(self, cmd).await,
            Command::Search {
                check_in,
                check_out,
                capacity,
            } => booking::search(self, check_in, check_out, capacity).await,
            Command::Book(args) => booking::book(self, args).await,
            Command::Rooms(args) => desk::rooms(self, args).await,
            Command::Reservations(args) => desk::reservations(self, args).await,
            Command::Incident(args) => desk::incident(self, args).await,
            Command::Report(args) => reports::run(self, args).await,
            Command::Room(cmd) => catalogue::run(self, cmd).await,
            Command::Checkin(args) => stay::check_in(self, args).await,
            Command::Checkout(args) => stay::check_out(self, args).await,
        }
    }

    /// Guard a command; the role is returned when access is granted
    fn require(&self, allowed: RoleSet) -> Result<Role> {
        match evaluate(self.store.session(), allowed) {
            GuardDecision::Granted => self
                .store
                .session()
                .role()
                .ok_or_else(|| anyhow!("Not signed in")),
            GuardDecision::RedirectToLogin => bail!("Not signed in. Run `hotel-portal login` first."),
            GuardDecision::AccessDenied {
                current_role,
                required,
            } => bail!(
                "Access denied: signed in as {}, this needs one of: {}",
                current_role,
                required
            ),
            GuardDecision::Loading => bail!("Session is still loading"),
        }
    }

    /// Route a service result through the session (a 401 signs out) and present errors
    fn settle<T>(&mut self, result: ClientResult<T>) -> Result<T> {
        self.store.intercept(result).map_err(present)
    }
}

/// Error text shown to the operator: numeric code plus the friendly message
fn present(err: ClientError) -> anyhow::Error {
    tracing::debug!(error = %err, "Command failed");
    if err.is_unauthorized() {
        return anyhow!(
            "[{}] {} Run `hotel-portal login`.",
            err.code().code(),
            err.user_message()
        );
    }
    anyhow!("[{}] {}", err.code().code(), err.user_message())
}

/// Parse a backend enum from its wire name, for clap value parsers
fn wire<T: DeserializeOwned>(value: &str) -> std::result::Result<T, String> {
    serde_json::from_value(serde_json::Value::String(value.trim().to_lowercase()))
        .map_err(|_| format!("unknown value '{}'", value))
}
