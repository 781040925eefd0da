//! Access guard and route table
//!
//! [`evaluate`] is the single decision point between a session and a
//! protected view. It is pure and synchronous.

use shared::models::Role;
use std::fmt;

use crate::session::Session;

/// Set of roles allowed into a view
///
/// The empty set means any authenticated role.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RoleSet(u8);

impl RoleSet {
    /// Any authenticated role
    pub const ANY: RoleSet = RoleSet(0);

    const fn bit(role: Role) -> u8 {
        1 << (role as u8)
    }

    pub const fn of(roles: &[Role]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < roles.len() {
            bits |= Self::bit(roles[i]);
            i += 1;
        }
        RoleSet(bits)
    }

    pub const fn with(self, role: Role) -> Self {
        RoleSet(self.0 | Self::bit(role))
    }

    pub const fn contains(self, role: Role) -> bool {
        self.0 & Self::bit(role) != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Membership with the "empty means any" rule applied
    pub const fn allows(self, role: Role) -> bool {
        self.is_empty() || self.contains(role)
    }

    pub fn iter(self) -> impl Iterator<Item = Role> {
        Role::ALL.into_iter().filter(move |r| self.contains(*r))
    }
}

impl From<Role> for RoleSet {
    fn from(role: Role) -> Self {
        RoleSet::ANY.with(role)
    }
}

impl From<&[Role]> for RoleSet {
    fn from(roles: &[Role]) -> Self {
        RoleSet::of(roles)
    }
}

impl<const N: usize> From<[Role; N]> for RoleSet {
    fn from(roles: [Role; N]) -> Self {
        RoleSet::of(&roles)
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        iter.into_iter().fold(RoleSet::ANY, RoleSet::with)
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("any");
        }
        let names: Vec<&str> = self.iter().map(|r| r.as_str()).collect();
        f.write_str(&names.join(", "))
    }
}

impl fmt::Debug for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Outcome of guarding a view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session restore has not finished
    Loading,
    RedirectToLogin,
    AccessDenied { current_role: Role, required: RoleSet },
    Granted,
}

pub fn evaluate(session: &Session, allowed: RoleSet) -> GuardDecision {
    if session.is_loading() {
        return GuardDecision::Loading;
    }
    let Some(user) = session.user() else {
        return GuardDecision::RedirectToLogin;
    };
    if !allowed.allows(user.role) {
        return GuardDecision::AccessDenied {
            current_role: user.role,
            required: allowed,
        };
    }
    GuardDecision::Granted
}

/// Top-level views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppRoute {
    Home,
    Login,
    Register,
    GuestPortal,
    StaffDashboard,
    ManagerDashboard,
}

impl AppRoute {
    pub const ALL: [AppRoute; 6] = [
        AppRoute::Home,
        AppRoute::Login,
        AppRoute::Register,
        AppRoute::GuestPortal,
        AppRoute::StaffDashboard,
        AppRoute::ManagerDashboard,
    ];

    pub const fn path(&self) -> &'static str {
        match self {
            AppRoute::Home => "/",
            AppRoute::Login => "/login",
            AppRoute::Register => "/register",
            AppRoute::GuestPortal => "/guest",
            AppRoute::StaffDashboard => "/staff",
            AppRoute::ManagerDashboard => "/manager",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        AppRoute::ALL.into_iter().find(|r| r.path() == path)
    }

    /// Roles allowed in; `None` for public views
    pub const fn allowed_roles(&self) -> Option<RoleSet> {
        match self {
            AppRoute::Home | AppRoute::Login | AppRoute::Register => None,
            AppRoute::GuestPortal => Some(RoleSet::of(&[Role::Guest])),
            AppRoute::StaffDashboard => Some(RoleSet::of(&[
                Role::Receptionist,
                Role::Cleaning,
                Role::Manager,
            ])),
            AppRoute::ManagerDashboard => Some(RoleSet::of(&[Role::Admin, Role::Manager])),
        }
    }

    /// Guard decision for opening this view
    pub fn resolve(&self, session: &Session) -> GuardDecision {
        match self.allowed_roles() {
            None => GuardDecision::Granted,
            Some(allowed) => evaluate(session, allowed),
        }
    }

    /// Where a role lands after signing in
    pub const fn home_for(role: Role) -> AppRoute {
        match role {
            Role::Guest => AppRoute::GuestPortal,
            Role::Receptionist | Role::Cleaning => AppRoute::StaffDashboard,
            Role::Manager | Role::Admin => AppRoute::ManagerDashboard,
        }
    }
}

impl fmt::Display for AppRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Tabs of the staff dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaffTab {
    Overview,
    Reservations,
    Rooms,
    Incidents,
}

impl StaffTab {
    pub const ALL: [StaffTab; 4] = [
        StaffTab::Overview,
        StaffTab::Reservations,
        StaffTab::Rooms,
        StaffTab::Incidents,
    ];

    pub const fn allowed_roles(&self) -> RoleSet {
        match self {
            StaffTab::Overview | StaffTab::Rooms => {
                RoleSet::of(&[Role::Receptionist, Role::Cleaning, Role::Manager])
            }
            StaffTab::Reservations => RoleSet::of(&[Role::Receptionist, Role::Manager]),
            StaffTab::Incidents => RoleSet::of(&[Role::Cleaning, Role::Manager]),
        }
    }

    /// Tabs shown to `role`, in display order
    pub fn visible_to(role: Role) -> Vec<StaffTab> {
        StaffTab::ALL
            .into_iter()
            .filter(|t| t.allowed_roles().contains(role))
            .collect()
    }
}
