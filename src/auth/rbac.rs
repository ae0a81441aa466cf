use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Boss,
    Manager,
    Storekeeper,
    RegularStaff,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Boss => "boss",
            Role::Manager => "manager",
            Role::Storekeeper => "storekeeper",
            Role::RegularStaff => "regular_staff",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boss" => Ok(Role::Boss),
            "manager" => Ok(Role::Manager),
            "storekeeper" => Ok(Role::Storekeeper),
            "regular_staff" | "regular-staff" => Ok(Role::RegularStaff),
            _ => Err(AppError::Validation(format!(
                "Invalid role: {}. Must be one of: boss, manager, storekeeper, regular_staff",
                s
            ))),
        }
    }
}

/// Stored `is_boss` field. A missing key and an explicit `null` are
/// different: only a missing key lets boss be inferred.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BossFlag {
    #[default]
    Absent,
    Null,
    Set(bool),
}

impl BossFlag {
    pub fn is_absent(&self) -> bool {
        matches!(self, BossFlag::Absent)
    }
}

impl From<bool> for BossFlag {
    fn from(v: bool) -> Self {
        BossFlag::Set(v)
    }
}

// Absent is produced by `#[serde(default)]` when the key is missing, so a
// present value is always either null or a bool.
impl<'de> Deserialize<'de> for BossFlag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<bool>::deserialize(deserializer)? {
            Some(v) => BossFlag::Set(v),
            None => BossFlag::Null,
        })
    }
}

impl Serialize for BossFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BossFlag::Set(v) => serializer.serialize_bool(*v),
            BossFlag::Absent | BossFlag::Null => serializer.serialize_none(),
        }
    }
}

/// Role booleans derived from a staff identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleFlags {
    pub boss: bool,
    pub manager: bool,
    pub storekeeper: bool,
}

impl RoleFlags {
    /// Derive flags from the raw identity fields.
    ///
    /// An explicit `is_boss` (true or false) always wins and `null` means not
    /// boss. Only when the key is missing is boss inferred from holding both
    /// manager and storekeeper.
    pub fn derive(is_boss: BossFlag, is_manager: Option<bool>, is_storekeeper: Option<bool>) -> Self {
        let manager = is_manager == Some(true);
        let storekeeper = is_storekeeper == Some(true);
        let boss = match is_boss {
            BossFlag::Set(explicit) => explicit,
            BossFlag::Null => false,
            BossFlag::Absent => manager && storekeeper,
        };
        Self { boss, manager, storekeeper }
    }

    pub fn is_regular_staff(&self) -> bool {
        !self.boss && !self.manager && !self.storekeeper
    }

    pub fn primary_role(&self) -> Role {
        if self.boss {
            Role::Boss
        } else if self.manager {
            Role::Manager
        } else if self.storekeeper {
            Role::Storekeeper
        } else {
            Role::RegularStaff
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ClientManagement,
    SystemManagement,
    OrderManagement,
    StaffManagement,
    InventoryAll,
    InventoryReceive,
}

impl Permission {
    pub const ALL: [Permission; 6] = [
        Permission::ClientManagement,
        Permission::SystemManagement,
        Permission::OrderManagement,
        Permission::StaffManagement,
        Permission::InventoryAll,
        Permission::InventoryReceive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ClientManagement => "client_management",
            Permission::SystemManagement => "system_management",
            Permission::OrderManagement => "order_management",
            Permission::StaffManagement => "staff_management",
            Permission::InventoryAll => "inventory_all",
            Permission::InventoryReceive => "inventory_receive",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("Unknown feature: {}", s)))
    }
}

/// Static feature table for an authenticated user.
pub fn has_permission(flags: &RoleFlags, permission: Permission) -> bool {
    match permission {
        Permission::ClientManagement => true,
        Permission::SystemManagement | Permission::OrderManagement => flags.boss || flags.manager,
        Permission::StaffManagement | Permission::InventoryAll => flags.boss,
        Permission::InventoryReceive => flags.boss || flags.storekeeper,
    }
}
