//! Reservation board

use shared::error::ErrorCode;
use shared::models::{Reservation, ReservationStatus, Role};

use super::settle;
use crate::api::{HotelApi, ReservationFilter};
use crate::client::HttpClient;
use crate::error::{ClientResult, ValidationError};
use crate::guard::RoleSet;

/// Roles offered reservation actions
pub const RESERVATION_DESK_ROLES: RoleSet = RoleSet::of(&[Role::Receptionist, Role::Manager]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservationAction {
    Confirm,
    CheckIn,
    CheckOut,
    Cancel,
}

impl ReservationAction {
    pub const ALL: [ReservationAction; 4] = [
        ReservationAction::Confirm,
        ReservationAction::CheckIn,
        ReservationAction::CheckOut,
        ReservationAction::Cancel,
    ];

    pub fn applies_to(self, status: ReservationStatus) -> bool {
        use ReservationStatus as S;
        match self {
            ReservationAction::Confirm => status == S::Pending,
            ReservationAction::CheckIn => status == S::Confirmed,
            ReservationAction::CheckOut => status == S::CheckedIn,
            ReservationAction::Cancel => matches!(status, S::Pending | S::Confirmed),
        }
    }

    /// Status the backend moves the reservation to
    pub fn target(self) -> ReservationStatus {
        match self {
            ReservationAction::Confirm => ReservationStatus::Confirmed,
            ReservationAction::CheckIn => ReservationStatus::CheckedIn,
            ReservationAction::CheckOut => ReservationStatus::CheckedOut,
            ReservationAction::Cancel => ReservationStatus::Cancelled,
        }
    }

    pub fn requires_reason(self) -> bool {
        self == ReservationAction::Cancel
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReservationAction::Confirm => "confirm",
            ReservationAction::CheckIn => "checkin",
            ReservationAction::CheckOut => "checkout",
            ReservationAction::Cancel => "cancel",
        }
    }

    /// Actions offered for `status` to `role`
    pub fn offered(status: ReservationStatus, role: Role) -> Vec<ReservationAction> {
        if !RESERVATION_DESK_ROLES.contains(role) {
            return Vec::new();
        }
        Self::ALL.into_iter().filter(|a| a.applies_to(status)).collect()
    }
}

impl std::str::FromStr for ReservationAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| format!("unknown reservation action: {}", s))
    }
}

#[derive(Debug, Default)]
pub struct ReservationBoard {
    filter: ReservationFilter,
    reservations: Vec<Reservation>,
}

impl ReservationBoard {
    pub fn new(filter: ReservationFilter) -> Self {
        Self {
            filter,
            reservations: Vec::new(),
        }
    }

    pub fn filter(&self) -> &ReservationFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: ReservationFilter) {
        self.filter = filter;
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn reservation(&self, id: i64) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.id == id)
    }

    pub async fn reload<H: HttpClient>(&mut self, api: &HotelApi<H>) -> ClientResult<()> {
        self.reservations = api.list_reservations(&self.filter).await?;
        tracing::debug!(count = self.reservations.len(), "Reservation board reloaded");
        Ok(())
    }

    pub fn status_counts(&self) -> Vec<(ReservationStatus, usize)> {
        ReservationStatus::ALL
            .iter()
            .map(|s| (*s, self.reservations.iter().filter(|r| r.status == *s).count()))
            .collect()
    }

    pub fn offered(&self, id: i64, role: Role) -> Vec<ReservationAction> {
        self.reservation(id)
            .map(|r| ReservationAction::offered(r.status, role))
            .unwrap_or_default()
    }

    /// Run `action` on a loaded reservation, then reload the board.
    ///
    /// `note` is the check-in/check-out note, or the cancellation reason.
    pub async fn perform<H: HttpClient>(
        &mut self,
        api: &HotelApi<H>,
        role: Role,
        id: i64,
        action: ReservationAction,
        note: &str,
    ) -> ClientResult<()> {
        let Some(reservation) = self.reservation(id) else {
            return Err(ValidationError::new("id", format!("Reservation {} is not on the board", id))
                .with_code(ErrorCode::ReservationNotFound)
                .into());
        };
        if !ReservationAction::offered(reservation.status, role).contains(&action) {
            return Err(ValidationError::new(
                "action",
                format!(
                    "Cannot {} reservation {} while it is {}",
                    action.as_str(),
                    reservation.reservation_code,
                    reservation.status
                ),
            )
            .with_code(ErrorCode::ReservationActionNotAllowed)
            .into());
        }
        let note = note.trim();
        if action.requires_reason() && note.is_empty() {
            return Err(ValidationError::new("reason", "A cancellation reason is required")
                .with_code(ErrorCode::CancellationReasonRequired)
                .into());
        }

        tracing::info!(
            code = %reservation.reservation_code,
            action = action.as_str(),
            "Updating reservation"
        );
        let result = match action {
            ReservationAction::Confirm => api.confirm_reservation(id).await,
            ReservationAction::CheckIn => api.check_in(id, note).await,
            ReservationAction::CheckOut => api.check_out(id, note).await.map(|_| ()),
            ReservationAction::Cancel => api.cancel_reservation(id, note).await,
        };
        if let Err(e) = &result {
            tracing::warn!(id, action = action.as_str(), error = %e, "Reservation action rejected");
        }
        let reload = self.reload(api).await;
        settle(result, reload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_per_status() {
        use ReservationAction::*;
        let role = Role::Receptionist;
        assert_eq!(
            ReservationAction::offered(ReservationStatus::Pending, role),
            vec![Confirm, Cancel]
        );
        assert_eq!(
            ReservationAction::offered(ReservationStatus::Confirmed, role),
            vec![CheckIn, Cancel]
        );
        assert_eq!(
            ReservationAction::offered(ReservationStatus::CheckedIn, role),
            vec![CheckOut]
        );
        for status in [
            ReservationStatus::CheckedOut,
            ReservationStatus::Cancelled,
            ReservationStatus::NoShow,
        ] {
            assert!(ReservationAction::offered(status, role).is_empty());
        }
    }

    #[test]
    fn test_only_desk_roles_get_actions() {
        for role in [Role::Guest, Role::Cleaning, Role::Admin] {
            assert!(ReservationAction::offered(ReservationStatus::Pending, role).is_empty());
        }
        assert!(!ReservationAction::offered(ReservationStatus::Pending, Role::Manager).is_empty());
    }

    #[test]
    fn test_action_names_round_trip() {
        for action in ReservationAction::ALL {
            assert_eq!(action.as_str().parse::<ReservationAction>(), Ok(action));
        }
        assert!("refund".parse::<ReservationAction>().is_err());
        assert_eq!(ReservationAction::Cancel.target(), ReservationStatus::Cancelled);
    }
}
