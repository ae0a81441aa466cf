//! Route-transition gatekeeper.
//!
//! `evaluate` is a pure function of the target route and a session snapshot.
//! `Navigator` wires it to a live `SessionStore` and makes sure every denial
//! reaches the user through a `Notifier`.

use std::fmt;
use std::sync::Arc;

use super::{Route, LOGIN, MAIN, ROUTES};
use crate::auth::rbac::Role;
use crate::auth::session::{SessionState, SessionStore};
use crate::error::{AppError, AppResult};
use crate::storage::KeyValueStore;

/// Routes of the receiving workflow, the only role-gated screens a
/// storekeeper may open.
pub const RECEIVING_ROUTES: [&str; 3] = [
    "inventory_receive",
    "inventory_receive_list",
    "inventory_receive_detail",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    LoginRequired,
    NotAuthorized,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::LoginRequired => "请先登录!",
            Notice::NotAuthorized => "您没有权限访问该页面!",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    Redirect { to: &'static str, notice: Notice },
}

impl NavigationDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, NavigationDecision::Allow)
    }
}

pub fn is_receiving_route(name: &str) -> bool {
    RECEIVING_ROUTES.contains(&name)
}

pub fn evaluate(route: &Route, session: &SessionState) -> NavigationDecision {
    // The login screen must stay reachable or redirects would loop.
    if route.name == LOGIN {
        return NavigationDecision::Allow;
    }

    if route.requires_auth && !session.authenticated {
        return NavigationDecision::Redirect { to: LOGIN, notice: Notice::LoginRequired };
    }

    if route.roles.is_none() {
        return NavigationDecision::Allow;
    }

    let flags = &session.flags;
    let allowed = flags.boss
        || (flags.manager && route.accepts(Role::Manager))
        || (flags.storekeeper && route.accepts(Role::Storekeeper) && is_receiving_route(route.name));

    if allowed {
        NavigationDecision::Allow
    } else {
        NavigationDecision::Redirect { to: MAIN, notice: Notice::NotAuthorized }
    }
}

/// Surfaces guard notices to the user. Denials must never be silent.
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

impl<F: Fn(Notice)> Notifier for F {
    fn notify(&self, notice: Notice) {
        self(notice)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        tracing::warn!(notice = ?notice, "{}", notice.message());
    }
}

pub struct Navigator<S, N> {
    session: Arc<SessionStore<S>>,
    notifier: N,
}

impl<S: KeyValueStore, N: Notifier> Navigator<S, N> {
    pub fn new(session: Arc<SessionStore<S>>, notifier: N) -> Self {
        Self { session, notifier }
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    pub fn navigate(&self, name: &str) -> AppResult<NavigationDecision> {
        let route = super::find(name)
            .ok_or_else(|| AppError::NotFound(format!("Route {} not found", name)))?;
        Ok(self.check(route))
    }

    pub fn navigate_path(&self, path: &str) -> AppResult<NavigationDecision> {
        let route = super::find_by_path(path)
            .ok_or_else(|| AppError::NotFound(format!("No route for path {}", path)))?;
        Ok(self.check(route))
    }

    pub fn check(&self, route: &Route) -> NavigationDecision {
        let decision = evaluate(route, &self.session.snapshot());
        match decision {
            NavigationDecision::Allow => {
                tracing::debug!(route = route.name, "Navigation allowed");
            }
            NavigationDecision::Redirect { to, notice } => {
                tracing::info!(route = route.name, redirect = to, ?notice, "Navigation denied");
                self.notifier.notify(notice);
            }
        }
        decision
    }

    /// Routes the current session could open, without emitting notices.
    pub fn accessible_routes(&self) -> Vec<&'static Route> {
        let snapshot = self.session.snapshot();
        ROUTES
            .iter()
            .filter(|r| evaluate(r, &snapshot).is_allowed())
            .collect()
    }
}
