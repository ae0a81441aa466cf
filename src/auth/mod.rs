pub mod rbac;
pub mod session;

pub use rbac::{BossFlag, Permission, Role, RoleFlags};
pub use session::{SessionState, SessionStore, StaffUser};
