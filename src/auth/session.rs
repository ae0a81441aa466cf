//! Persisted login session and the role/permission queries built on it.
//!
//! The session is two storage keys written together on login and removed
//! together on logout. Every query re-reads storage, so a session written by
//! another process is picked up on the next call.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::TokenSource;
use crate::auth::rbac::{self, BossFlag, Permission, Role, RoleFlags};
use crate::error::{AppError, AppResult};
use crate::storage::KeyValueStore;

pub const USER_KEY: &str = "JWT_TOKEN_FROM_MYERP_USER_INFO";
pub const TOKEN_KEY: &str = "JWT_TOKEN_FROM_MYERP_TOKEN";

/// Placeholder shown instead of cost figures to anyone but the boss.
pub const MASKED_COST: &str = "***";
pub const CURRENCY_PREFIX: &str = "￥";

/// Staff identity as returned by the login endpoint.
///
/// Only the role flags are interpreted; every other profile field is kept
/// as-is in `profile` so it survives a store/load cycle untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaffUser {
    #[serde(default, skip_serializing_if = "BossFlag::is_absent")]
    pub is_boss: BossFlag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_manager: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_storekeeper: Option<bool>,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl StaffUser {
    pub fn role_flags(&self) -> RoleFlags {
        RoleFlags::derive(self.is_boss, self.is_manager, self.is_storekeeper)
    }

    /// True iff the named field is exactly boolean `true`.
    pub fn flag(&self, name: &str) -> bool {
        match name {
            "is_boss" => self.is_boss == BossFlag::Set(true),
            "is_manager" => self.is_manager == Some(true),
            "is_storekeeper" => self.is_storekeeper == Some(true),
            other => matches!(self.profile.get(other), Some(Value::Bool(true))),
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.profile.get(name)
    }
}

/// Value handed to `format_cost`: a raw amount or an already formatted string.
#[derive(Debug, Clone, PartialEq)]
pub enum Cost {
    Amount(f64),
    Text(String),
}

impl From<f64> for Cost {
    fn from(v: f64) -> Self {
        Cost::Amount(v)
    }
}

impl From<i64> for Cost {
    fn from(v: i64) -> Self {
        Cost::Amount(v as f64)
    }
}

impl From<&str> for Cost {
    fn from(v: &str) -> Self {
        Cost::Text(v.to_string())
    }
}

impl From<String> for Cost {
    fn from(v: String) -> Self {
        Cost::Text(v)
    }
}

/// Point-in-time view of the session, as consumed by the navigation guard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    pub authenticated: bool,
    pub flags: RoleFlags,
}

impl SessionState {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn logged_in(flags: RoleFlags) -> Self {
        Self { authenticated: true, flags }
    }
}

pub struct SessionStore<S> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist a freshly issued identity and token, replacing any prior session.
    pub fn set_session(&self, user: &StaffUser, token: &str) -> AppResult<()> {
        if token.trim().is_empty() {
            return Err(AppError::Validation("Session token cannot be empty".to_string()));
        }

        let user_json = serde_json::to_string(user)?;

        // Drop the old token first so a failed write can never pair the new
        // identity with the previous credential.
        self.store.remove_item(TOKEN_KEY)?;
        self.store.set_item(USER_KEY, &user_json)?;
        if let Err(e) = self.store.set_item(TOKEN_KEY, token) {
            if let Err(cleanup) = self.store.remove_item(USER_KEY) {
                tracing::warn!("Failed to roll back user record after token write error: {}", cleanup);
            }
            return Err(e);
        }

        tracing::info!(role = %user.role_flags().primary_role(), "Session stored");
        Ok(())
    }

    /// Drop both keys. Safe to call when already logged out.
    pub fn clear_session(&self) -> AppResult<()> {
        self.store.remove_item(USER_KEY)?;
        self.store.remove_item(TOKEN_KEY)?;
        tracing::info!("Session cleared");
        Ok(())
    }

    pub fn user(&self) -> Option<StaffUser> {
        let raw = self.store.get_item(USER_KEY)?;
        if raw.is_empty() {
            return None;
        }
        match serde_json::from_str::<StaffUser>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("Stored user record is malformed, treating session as logged out: {}", e);
                None
            }
        }
    }

    pub fn token(&self) -> Option<String> {
        self.store.get_item(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated_user().is_some()
    }

    /// The stored user, but only when the token is present too.
    fn authenticated_user(&self) -> Option<StaffUser> {
        self.token()?;
        self.user()
    }

    pub fn role_flags(&self) -> Option<RoleFlags> {
        self.authenticated_user().map(|u| u.role_flags())
    }

    pub fn role(&self) -> Option<Role> {
        self.role_flags().map(|f| f.primary_role())
    }

    pub fn is_boss(&self) -> bool {
        self.role_flags().is_some_and(|f| f.boss)
    }

    pub fn is_manager(&self) -> bool {
        self.role_flags().is_some_and(|f| f.manager)
    }

    pub fn is_storekeeper(&self) -> bool {
        self.role_flags().is_some_and(|f| f.storekeeper)
    }

    pub fn is_regular_staff(&self) -> bool {
        self.role_flags().is_some_and(|f| f.is_regular_staff())
    }

    pub fn has_role(&self, flag_name: &str) -> bool {
        self.authenticated_user().is_some_and(|u| u.flag(flag_name))
    }

    /// Look up a feature by name; unknown features are denied.
    pub fn has_permission(&self, feature: &str) -> bool {
        match feature.parse::<Permission>() {
            Ok(permission) => self.allows(permission),
            Err(_) => false,
        }
    }

    pub fn allows(&self, permission: Permission) -> bool {
        self.role_flags()
            .is_some_and(|flags| rbac::has_permission(&flags, permission))
    }

    pub fn can_view_cost(&self) -> bool {
        self.is_boss()
    }

    /// Render a cost for display. Masking is cosmetic: the backend must not
    /// send cost data to roles that may not see it.
    pub fn format_cost(&self, cost: impl Into<Cost>) -> String {
        if !self.can_view_cost() {
            return MASKED_COST.to_string();
        }
        match cost.into() {
            Cost::Amount(v) => format!("{}{:.2}", CURRENCY_PREFIX, v),
            Cost::Text(s) => format!("{}{}", CURRENCY_PREFIX, s),
        }
    }

    pub fn snapshot(&self) -> SessionState {
        match self.role_flags() {
            Some(flags) => SessionState::logged_in(flags),
            None => SessionState::anonymous(),
        }
    }
}

impl<S: KeyValueStore> TokenSource for SessionStore<S> {
    fn token(&self) -> Option<String> {
        SessionStore::token(self)
    }
}
