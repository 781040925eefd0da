//! Wizard states and the transition function

use shared::models::{RoomOffer, SearchCriteria};

use super::countdown::{ConfirmationWindow, TickOutcome};
use super::draft::ReservationDraft;

/// Notice shown when a search finds nothing
pub const NO_AVAILABILITY: &str =
    "No rooms available for the selected dates. Please try different dates.";

#[derive(Debug, Clone, PartialEq)]
pub enum WizardState {
    Searching {
        /// Last criteria entered, kept when returning to the search step
        criteria: Option<SearchCriteria>,
        notice: Option<String>,
    },
    Selecting {
        criteria: SearchCriteria,
        offers: Vec<RoomOffer>,
        /// Draft entered before going back from the confirmation step
        draft: Option<ReservationDraft>,
    },
    Confirming {
        criteria: SearchCriteria,
        offers: Vec<RoomOffer>,
        offer: RoomOffer,
        draft: ReservationDraft,
        window: ConfirmationWindow,
        error: Option<String>,
        submitting: bool,
    },
    Expired {
        /// A create request sent before expiry has not answered yet
        submission_pending: bool,
    },
    Submitted {
        reservation_code: String,
        /// The backend accepted a request that was still in flight at expiry
        after_expiry: bool,
    },
}

impl Default for WizardState {
    fn default() -> Self {
        WizardState::Searching {
            criteria: None,
            notice: None,
        }
    }
}

impl WizardState {
    pub fn name(&self) -> &'static str {
        match self {
            WizardState::Searching { .. } => "searching",
            WizardState::Selecting { .. } => "selecting",
            WizardState::Confirming { .. } => "confirming",
            WizardState::Expired { .. } => "expired",
            WizardState::Submitted { .. } => "submitted",
        }
    }

    pub fn is_confirming(&self) -> bool {
        matches!(self, WizardState::Confirming { .. })
    }

    /// Seconds left on the confirmation step
    pub fn remaining_seconds(&self) -> Option<u32> {
        match self {
            WizardState::Confirming { window, .. } => Some(window.remaining()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    SearchCompleted {
        criteria: SearchCriteria,
        offers: Vec<RoomOffer>,
    },
    SearchFailed {
        criteria: SearchCriteria,
        message: String,
    },
    /// Pick an offer by room id
    Select(i64),
    ModifySearch,
    Back,
    EditDraft(ReservationDraft),
    Tick,
    SubmitStarted,
    SubmitSucceeded { reservation_code: String },
    SubmitFailed { message: String },
    Restart,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::SearchCompleted { .. } => "search_completed",
            Event::SearchFailed { .. } => "search_failed",
            Event::Select(_) => "select",
            Event::ModifySearch => "modify_search",
            Event::Back => "back",
            Event::EditDraft(_) => "edit_draft",
            Event::Tick => "tick",
            Event::SubmitStarted => "submit_started",
            Event::SubmitSucceeded { .. } => "submit_succeeded",
            Event::SubmitFailed { .. } => "submit_failed",
            Event::Restart => "restart",
        }
    }
}

/// An event the current state does not accept; the state is handed back
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidTransition {
    pub state: WizardState,
    pub event: &'static str,
}

impl InvalidTransition {
    pub fn message(&self) -> String {
        format!("'{}' is not available while {}", self.event, self.state.name())
    }
}

/// The single place wizard states change
pub fn transition(state: WizardState, event: Event) -> Result<WizardState, InvalidTransition> {
    use WizardState as S;

    let event_name = event.name();
    match (state, event) {
        (S::Searching { .. }, Event::SearchCompleted { criteria, offers }) => {
            if offers.is_empty() {
                Ok(S::Searching {
                    criteria: Some(criteria),
                    notice: Some(NO_AVAILABILITY.to_string()),
                })
            } else {
                Ok(S::Selecting {
                    criteria,
                    offers,
                    draft: None,
                })
            }
        }
        (S::Searching { .. }, Event::SearchFailed { criteria, message }) => Ok(S::Searching {
            criteria: Some(criteria),
            notice: Some(message),
        }),

        (
            S::Selecting {
                criteria,
                offers,
                draft,
            },
            Event::Select(room_id),
        ) => match offers.iter().find(|o| o.room.id == room_id).cloned() {
            Some(offer) => Ok(S::Confirming {
                criteria,
                offers,
                offer,
                draft: draft.unwrap_or_default(),
                window: ConfirmationWindow::new(),
                error: None,
                submitting: false,
            }),
            None => Err(InvalidTransition {
                state: S::Selecting {
                    criteria,
                    offers,
                    draft,
                },
                event: event_name,
            }),
        },
        (S::Selecting { criteria, .. }, Event::ModifySearch) => Ok(S::Searching {
            criteria: Some(criteria),
            notice: None,
        }),

        (
            S::Confirming {
                criteria,
                offers,
                draft,
                submitting: false,
                ..
            },
            Event::Back,
        ) => Ok(S::Selecting {
            criteria,
            offers,
            draft: Some(draft),
        }),
        (
            S::Confirming {
                criteria,
                offers,
                offer,
                window,
                submitting: false,
                ..
            },
            Event::EditDraft(draft),
        ) => Ok(S::Confirming {
            criteria,
            offers,
            offer,
            draft,
            window,
            error: None,
            submitting: false,
        }),
        (
            S::Confirming {
                criteria,
                offers,
                offer,
                draft,
                mut window,
                error,
                submitting,
            },
            Event::Tick,
        ) => match window.tick() {
            TickOutcome::Running(_) => Ok(S::Confirming {
                criteria,
                offers,
                offer,
                draft,
                window,
                error,
                submitting,
            }),
            TickOutcome::Expired | TickOutcome::AlreadyExpired => Ok(S::Expired {
                submission_pending: submitting,
            }),
        },
        (
            S::Confirming {
                criteria,
                offers,
                offer,
                draft,
                window,
                submitting: false,
                ..
            },
            Event::SubmitStarted,
        ) => Ok(S::Confirming {
            criteria,
            offers,
            offer,
            draft,
            window,
            error: None,
            submitting: true,
        }),
        (
            S::Confirming {
                submitting: true, ..
            },
            Event::SubmitSucceeded { reservation_code },
        ) => Ok(S::Submitted {
            reservation_code,
            after_expiry: false,
        }),
        (
            S::Confirming {
                criteria,
                offers,
                offer,
                draft,
                window,
                submitting: true,
                ..
            },
            Event::SubmitFailed { message },
        ) => Ok(S::Confirming {
            criteria,
            offers,
            offer,
            draft,
            window,
            error: Some(message),
            submitting: false,
        }),

        (
            S::Expired {
                submission_pending: true,
            },
            Event::SubmitSucceeded { reservation_code },
        ) => Ok(S::Submitted {
            reservation_code,
            after_expiry: true,
        }),
        (
            S::Expired {
                submission_pending: true,
            },
            Event::SubmitFailed { .. },
        ) => Ok(S::Expired {
            submission_pending: false,
        }),
        (S::Expired { .. }, Event::Restart) => Ok(S::default()),

        // Ticks only matter while a room is held.
        (state, Event::Tick) => Ok(state),

        (state, _) => Err(InvalidTransition {
            state,
            event: event_name,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::countdown::CONFIRMATION_WINDOW_SECS;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use shared::models::{Room, RoomCategory, RoomStatus};

    fn criteria() -> SearchCriteria {
        SearchCriteria {
            check_in_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2024, 1, 12).unwrap(),
            capacity: 2,
        }
    }

    fn offer(id: i64) -> RoomOffer {
        RoomOffer {
            room: Room {
                id,
                room_number: format!("{}", 100 + id),
                floor: 1,
                category: RoomCategory::Standard,
                status: RoomStatus::Available,
                capacity: 2,
                base_price: Decimal::from(350),
                beds_count: Some(1),
                bed_type: None,
                has_ocean_view: false,
                description: None,
            },
            pricing: None,
        }
    }

    fn selecting() -> WizardState {
        transition(
            WizardState::default(),
            Event::SearchCompleted {
                criteria: criteria(),
                offers: vec![offer(1), offer(2)],
            },
        )
        .unwrap()
    }

    fn confirming() -> WizardState {
        transition(selecting(), Event::Select(2)).unwrap()
    }

    #[test]
    fn test_empty_search_stays_searching_with_notice() {
        let state = transition(
            WizardState::default(),
            Event::SearchCompleted {
                criteria: criteria(),
                offers: vec![],
            },
        )
        .unwrap();
        assert_eq!(
            state,
            WizardState::Searching {
                criteria: Some(criteria()),
                notice: Some(NO_AVAILABILITY.to_string()),
            }
        );
    }

    #[test]
    fn test_select_starts_fresh_window() {
        let state = confirming();
        assert_eq!(state.remaining_seconds(), Some(CONFIRMATION_WINDOW_SECS));
        match state {
            WizardState::Confirming { offer, draft, .. } => {
                assert_eq!(offer.room.id, 2);
                assert_eq!(draft, ReservationDraft::default());
            }
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[test]
    fn test_select_unknown_room_is_rejected_and_state_kept() {
        let err = transition(selecting(), Event::Select(99)).unwrap_err();
        assert_eq!(err.state, selecting());
        assert_eq!(err.event, "select");
    }

    #[test]
    fn test_modify_search_discards_offers() {
        let state = transition(selecting(), Event::ModifySearch).unwrap();
        assert_eq!(
            state,
            WizardState::Searching {
                criteria: Some(criteria()),
                notice: None
            }
        );
    }

    #[test]
    fn test_back_keeps_draft_and_reentry_restarts_window() {
        let mut draft = ReservationDraft::default();
        draft.special_requests = "Late arrival".into();
        let mut state = transition(confirming(), Event::EditDraft(draft.clone())).unwrap();
        for _ in 0..10 {
            state = transition(state, Event::Tick).unwrap();
        }
        assert_eq!(state.remaining_seconds(), Some(890));

        let state = transition(state, Event::Back).unwrap();
        assert!(matches!(&state, WizardState::Selecting { draft: Some(d), .. } if *d == draft));

        // Ticks outside the confirmation step change nothing.
        let state = transition(state.clone(), Event::Tick).unwrap();
        let state = transition(state, Event::Select(1)).unwrap();
        assert_eq!(state.remaining_seconds(), Some(CONFIRMATION_WINDOW_SECS));
        assert!(matches!(state, WizardState::Confirming { draft: d, .. } if d == draft));
    }

    #[test]
    fn test_window_expiry_forces_expired() {
        let mut state = confirming();
        for _ in 0..CONFIRMATION_WINDOW_SECS - 1 {
            state = transition(state, Event::Tick).unwrap();
        }
        assert_eq!(state.remaining_seconds(), Some(1));
        let state = transition(state, Event::Tick).unwrap();
        assert_eq!(
            state,
            WizardState::Expired {
                submission_pending: false
            }
        );

        // Only restart is accepted now.
        assert!(transition(state.clone(), Event::Back).is_err());
        assert!(transition(state.clone(), Event::SubmitStarted).is_err());
        assert_eq!(transition(state, Event::Restart).unwrap(), WizardState::default());
    }

    #[test]
    fn test_submit_failure_keeps_confirming_and_window() {
        let state = transition(confirming(), Event::Tick).unwrap();
        let state = transition(state, Event::SubmitStarted).unwrap();
        assert!(transition(state.clone(), Event::SubmitStarted).is_err());
        assert!(transition(state.clone(), Event::Back).is_err());

        let state = transition(
            state,
            Event::SubmitFailed {
                message: "Room no longer available".into(),
            },
        )
        .unwrap();
        match &state {
            WizardState::Confirming {
                error,
                submitting,
                window,
                ..
            } => {
                assert_eq!(error.as_deref(), Some("Room no longer available"));
                assert!(!submitting);
                assert_eq!(window.remaining(), CONFIRMATION_WINDOW_SECS - 1);
            }
            other => panic!("unexpected state: {other:?}"),
        }
        let state = transition(state, Event::Tick).unwrap();
        assert_eq!(state.remaining_seconds(), Some(CONFIRMATION_WINDOW_SECS - 2));
    }

    #[test]
    fn test_submit_success_is_terminal() {
        let state = transition(confirming(), Event::SubmitStarted).unwrap();
        let state = transition(
            state,
            Event::SubmitSucceeded {
                reservation_code: "MAR-001".into(),
            },
        )
        .unwrap();
        assert_eq!(
            state,
            WizardState::Submitted {
                reservation_code: "MAR-001".into(),
                after_expiry: false
            }
        );
        assert!(transition(state.clone(), Event::Restart).is_err());
        assert_eq!(transition(state.clone(), Event::Tick).unwrap(), state);
    }

    #[test]
    fn test_in_flight_submit_across_expiry() {
        let mut state = transition(confirming(), Event::SubmitStarted).unwrap();
        for _ in 0..CONFIRMATION_WINDOW_SECS {
            state = transition(state, Event::Tick).unwrap();
        }
        assert_eq!(
            state,
            WizardState::Expired {
                submission_pending: true
            }
        );

        let late = transition(
            state.clone(),
            Event::SubmitSucceeded {
                reservation_code: "MAR-LATE".into(),
            },
        )
        .unwrap();
        assert_eq!(
            late,
            WizardState::Submitted {
                reservation_code: "MAR-LATE".into(),
                after_expiry: true
            }
        );

        let failed = transition(
            state,
            Event::SubmitFailed {
                message: "timeout".into(),
            },
        )
        .unwrap();
        assert_eq!(
            failed,
            WizardState::Expired {
                submission_pending: false
            }
        );
    }
}
