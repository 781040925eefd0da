//! Hotel Client - front-office core for the hotel backend
//!
//! Session handling, role-based access decisions, the reservation wizard,
//! digital check-in/out and the status boards, all talking to the backend
//! through [`HttpClient`].

pub mod api;
pub mod boards;
pub mod client;
pub mod config;
pub mod error;
pub mod guard;
pub mod incidents;
pub mod preferences;
pub mod reports;
pub mod session;
pub mod stay;
pub mod storage;
pub mod validation;
pub mod wizard;

pub use api::HotelApi;
pub use client::{HttpClient, NetworkHttpClient, OneshotHttpClient};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ValidationError};
pub use guard::{AppRoute, GuardDecision, RoleSet};
pub use session::{LoginFailure, Session, SessionStore};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use wizard::{BookingMode, Clock, ReservationWizard, WizardState};

// Re-export shared types for convenience
pub use shared::client::{LoginRequest, LoginResponse, UserInfo, UserUpdate};
pub use shared::models::Role;
