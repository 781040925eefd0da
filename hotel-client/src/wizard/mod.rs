//! Reservation wizard
//!
//! Search, pick a room, confirm within a fixed window, submit. States live in
//! [`state`]; this module drives them against the backend and owns the
//! countdown for the confirmation step.

mod countdown;
mod draft;
mod state;

pub use countdown::{CONFIRMATION_WINDOW_SECS, ConfirmationWindow, Countdown, TickOutcome};
pub use draft::{GuestContact, ReservationDraft};
pub use state::{Event, InvalidTransition, NO_AVAILABILITY, WizardState, transition};

use std::time::Duration;

use chrono::NaiveDate;
use shared::models::{Reservation, ReservationCreate, RoomOffer, SearchCriteria};

use crate::api::HotelApi;
use crate::client::HttpClient;
use crate::error::{ClientError, ClientResult};
use crate::validation::validate_search;

/// Backend phrases that mean "nothing free" rather than a failure
const NO_AVAILABILITY_MARKERS: [&str; 2] = ["no hay habitaciones disponibles", "no rooms available"];

/// Who the reservation is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingMode {
    /// A signed-in guest booking for themselves
    SelfService,
    /// Front desk booking on behalf of a guest identified by contact details
    Staff,
}

/// What drives the confirmation countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    /// The caller calls [`ReservationWizard::tick`]
    Manual,
    /// A background task ticks once per period
    Interval(Duration),
}

impl Clock {
    pub fn realtime() -> Self {
        Clock::Interval(Duration::from_secs(1))
    }
}

pub struct ReservationWizard {
    mode: BookingMode,
    clock: Clock,
    state: WizardState,
    countdown: Option<Countdown>,
}

enum Next {
    Done(ClientResult<Reservation>),
    Ticks(u64),
    TickerStopped,
}

impl ReservationWizard {
    pub fn new(mode: BookingMode, clock: Clock) -> Self {
        Self {
            mode,
            clock,
            state: WizardState::default(),
            countdown: None,
        }
    }

    pub fn mode(&self) -> BookingMode {
        self.mode
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Whether a background countdown is running
    pub fn has_countdown(&self) -> bool {
        self.countdown.is_some()
    }

    /// Feed one event through [`transition`]; a rejected event leaves the state as it was.
    ///
    /// Countdown ticks that elapsed since the last call are applied first.
    pub fn apply(&mut self, event: Event) -> ClientResult<&WizardState> {
        self.catch_up();
        self.apply_event(event)
    }

    /// Apply every countdown tick that elapsed without anyone waiting for it
    pub fn catch_up(&mut self) -> &WizardState {
        let due = match self.countdown.as_mut() {
            Some(countdown) => countdown.due(),
            None => 0,
        };
        self.apply_ticks(due);
        &self.state
    }

    fn apply_event(&mut self, event: Event) -> ClientResult<&WizardState> {
        let was_confirming = self.state.is_confirming();
        let before = self.state.name();
        let current = std::mem::take(&mut self.state);
        match transition(current, event) {
            Ok(next) => {
                if next.name() != before {
                    tracing::debug!(from = before, to = next.name(), "Wizard state changed");
                }
                self.state = next;
                self.sync_countdown(was_confirming);
                Ok(&self.state)
            }
            Err(rejected) => {
                let message = rejected.message();
                self.state = rejected.state;
                Err(ClientError::InvalidState(message))
            }
        }
    }

    fn sync_countdown(&mut self, was_confirming: bool) {
        match (&self.state, self.clock) {
            (WizardState::Confirming { .. }, Clock::Interval(period)) if !was_confirming => {
                self.countdown = Some(Countdown::start(period));
            }
            (WizardState::Confirming { .. }, _) => {}
            _ => {
                // Dropping cancels the ticker task.
                self.countdown = None;
            }
        }
    }

    fn apply_ticks(&mut self, count: u64) {
        for _ in 0..count {
            if !self.state.is_confirming() {
                break;
            }
            self.apply_tick();
        }
    }

    fn apply_tick(&mut self) {
        if let Err(e) = self.apply_event(Event::Tick) {
            tracing::warn!(error = %e, "Tick rejected");
        }
        if let WizardState::Expired { .. } = self.state {
            tracing::info!("Confirmation window expired");
        }
    }

    /// Run an availability search; invalid criteria never reach the backend
    pub async fn search<H: HttpClient>(
        &mut self,
        api: &HotelApi<H>,
        criteria: SearchCriteria,
        today: NaiveDate,
    ) -> ClientResult<&WizardState> {
        self.catch_up();
        if !matches!(self.state, WizardState::Searching { .. }) {
            return Err(ClientError::InvalidState(format!(
                "Search is not available while {}",
                self.state.name()
            )));
        }
        validate_search(&criteria, today)?;

        match api.search_available(&criteria).await {
            Ok(offers) => {
                tracing::debug!(count = offers.len(), "Availability search returned");
                self.apply_event(Event::SearchCompleted { criteria, offers })
            }
            Err(e) if reports_no_availability(&e) => self.apply_event(Event::SearchCompleted {
                criteria,
                offers: Vec::new(),
            }),
            Err(e) => {
                tracing::warn!(error = %e, "Availability search failed");
                self.apply_event(Event::SearchFailed {
                    criteria,
                    message: e.user_message(),
                })?;
                Err(e)
            }
        }
    }

    pub fn select(&mut self, room_id: i64) -> ClientResult<&WizardState> {
        self.apply(Event::Select(room_id))
    }

    pub fn modify_search(&mut self) -> ClientResult<&WizardState> {
        self.apply(Event::ModifySearch)
    }

    pub fn back(&mut self) -> ClientResult<&WizardState> {
        self.apply(Event::Back)
    }

    pub fn restart(&mut self) -> ClientResult<&WizardState> {
        self.apply(Event::Restart)
    }

    /// Change the draft on the confirmation step
    pub fn edit_draft(
        &mut self,
        edit: impl FnOnce(&mut ReservationDraft),
    ) -> ClientResult<&WizardState> {
        self.catch_up();
        let mut draft = match &self.state {
            WizardState::Confirming { draft, .. } => draft.clone(),
            other => {
                return Err(ClientError::InvalidState(format!(
                    "The reservation details cannot be edited while {}",
                    other.name()
                )));
            }
        };
        edit(&mut draft);
        self.apply_event(Event::EditDraft(draft))
    }

    /// One manual tick
    pub fn tick(&mut self) -> &WizardState {
        self.catch_up();
        self.apply_tick();
        &self.state
    }

    /// Wait for the background countdown's next tick and apply it.
    ///
    /// Returns `None` when no countdown is running.
    pub async fn wait_tick(&mut self) -> Option<&WizardState> {
        let countdown = self.countdown.as_mut()?;
        match countdown.tick().await {
            Some(elapsed) => self.apply_ticks(elapsed),
            None => self.countdown = None,
        }
        Some(&self.state)
    }

    /// Validate the draft and create the reservation.
    ///
    /// Countdown ticks keep being applied while the request is in flight, so
    /// the window can expire before the backend answers.
    pub async fn submit<H: HttpClient>(&mut self, api: &HotelApi<H>) -> ClientResult<&WizardState> {
        self.catch_up();
        let (criteria, offer, draft) = match &self.state {
            WizardState::Confirming {
                criteria,
                offer,
                draft,
                submitting: false,
                ..
            } => (criteria.clone(), offer.clone(), draft.clone()),
            other => {
                return Err(ClientError::InvalidState(format!(
                    "Submit is not available while {}",
                    other.name()
                )));
            }
        };

        draft.validate_party(offer.room.capacity)?;
        if self.mode == BookingMode::Staff {
            draft.contact.validate()?;
        }

        self.apply_event(Event::SubmitStarted)?;
        let request = place_reservation(api, self.mode, &criteria, &offer, &draft);
        tokio::pin!(request);

        let outcome = loop {
            let next = match self.countdown.as_mut() {
                Some(countdown) => tokio::select! {
                    result = &mut request => Next::Done(result),
                    tick = countdown.tick() => match tick {
                        Some(elapsed) => Next::Ticks(elapsed),
                        None => Next::TickerStopped,
                    },
                },
                None => Next::Done((&mut request).await),
            };
            match next {
                Next::Done(result) => break result,
                Next::Ticks(elapsed) => self.apply_ticks(elapsed),
                Next::TickerStopped => self.countdown = None,
            }
        };
        self.catch_up();

        match outcome {
            Ok(reservation) => {
                tracing::info!(
                    code = %reservation.reservation_code,
                    room = %offer.room.room_number,
                    "Reservation created"
                );
                self.apply_event(Event::SubmitSucceeded {
                    reservation_code: reservation.reservation_code,
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "Reservation request failed");
                self.apply_event(Event::SubmitFailed {
                    message: e.user_message(),
                })?;
                Err(e)
            }
        }
    }
}

fn reports_no_availability(error: &ClientError) -> bool {
    let text = match error {
        ClientError::Rejected { message, .. } | ClientError::NotFound(message) => message,
        _ => return false,
    };
    let text = text.to_lowercase();
    NO_AVAILABILITY_MARKERS.iter().any(|m| text.contains(m))
}

/// Resolve the guest, then create the reservation
async fn place_reservation<H: HttpClient>(
    api: &HotelApi<H>,
    mode: BookingMode,
    criteria: &SearchCriteria,
    offer: &RoomOffer,
    draft: &ReservationDraft,
) -> ClientResult<Reservation> {
    let guest_id = match mode {
        BookingMode::SelfService => api.my_guest_profile().await?.id,
        BookingMode::Staff => {
            let existing = match api.find_guest_by_email(&draft.contact.email).await {
                Ok(found) => found,
                Err(e) if e.is_unauthorized() => return Err(e),
                Err(e) => {
                    tracing::warn!(error = %e, "Guest lookup failed, creating a new record");
                    None
                }
            };
            match existing {
                Some(guest) => guest.id,
                None => api.create_guest(&draft.contact.to_guest_create()).await?.id,
            }
        }
    };

    let request = ReservationCreate {
        room_id: offer.room.id,
        guest_id: Some(guest_id),
        check_in_date: criteria.check_in_date,
        check_out_date: criteria.check_out_date,
        adults_count: draft.adults_count,
        children_count: draft.children_count,
        special_requests: draft.special_requests.trim().to_string(),
    };
    api.create_reservation(&request).await
}
