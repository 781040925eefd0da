//! Status-transition boards
//!
//! Each board holds the last loaded listing, offers only the actions its
//! transition table allows for the acting role, sends one backend call per
//! action and then reloads the whole listing.

mod reservations;
mod rooms;

pub use reservations::{ReservationAction, ReservationBoard, RESERVATION_DESK_ROLES};
pub use rooms::{ROOM_ADMIN_ROLES, ROOM_TRANSITIONS, RoomBoard, RoomTransition, room_targets};

use crate::error::ClientResult;

/// Hand back the action result; reload failures are only logged
///
/// An applied change is reported as applied even when the listing could not
/// be refreshed afterwards. The listing then keeps its previous contents.
fn settle<T>(action: ClientResult<T>, reload: ClientResult<()>) -> ClientResult<T> {
    if let Err(reload_err) = reload {
        match &action {
            Ok(_) => tracing::warn!(error = %reload_err, "Change applied but reload failed"),
            Err(_) => tracing::warn!(error = %reload_err, "Reload after failed action also failed"),
        }
    }
    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    #[test]
    fn test_applied_change_survives_reload_failure() {
        let settled = settle(Ok(7), Err(ClientError::Network("timed out".into())));
        assert_eq!(settled.unwrap(), 7);
    }

    #[test]
    fn test_action_error_wins_over_reload_error() {
        let settled: ClientResult<()> = settle(
            Err(ClientError::Rejected {
                status: 409,
                message: "Room is occupied".into(),
            }),
            Err(ClientError::Network("timed out".into())),
        );
        match settled {
            Err(ClientError::Rejected { message, .. }) => assert_eq!(message, "Room is occupied"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
