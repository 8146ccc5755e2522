use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The four account roles. Numeric ids are persisted and must never be
/// renumbered; wire names are the lowercase strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum Role {
    Customer = 1,
    Trainer = 2,
    Admin = 3,
    Master = 4,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid role: {0}")]
pub struct InvalidRole(pub String);

impl Role {
    pub const ALL: [Role; 4] = [Role::Customer, Role::Trainer, Role::Admin, Role::Master];

    /// Default role for new accounts (OAuth signups, UI defaults).
    pub const DEFAULT: Role = Role::Customer;

    /// Roles selectable at registration; master accounts are seeded,
    /// never self-registered.
    pub const REGISTERABLE: [Role; 3] = [Role::Customer, Role::Trainer, Role::Admin];

    pub fn from_id(id: i16) -> Result<Self, InvalidRole> {
        match id {
            1 => Ok(Role::Customer),
            2 => Ok(Role::Trainer),
            3 => Ok(Role::Admin),
            4 => Ok(Role::Master),
            other => Err(InvalidRole(other.to_string())),
        }
    }

    pub fn from_name(name: &str) -> Result<Self, InvalidRole> {
        match name {
            "customer" => Ok(Role::Customer),
            "trainer" => Ok(Role::Trainer),
            "admin" => Ok(Role::Admin),
            "master" => Ok(Role::Master),
            other => Err(InvalidRole(other.to_string())),
        }
    }

    pub fn id(self) -> i16 {
        self as i16
    }

    pub fn name(self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Trainer => "trainer",
            Role::Admin => "admin",
            Role::Master => "master",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Role::Customer => "Customer",
            Role::Trainer => "Trainer",
            Role::Admin => "Admin",
            Role::Master => "Master",
        }
    }

    /// Hierarchy rank; a higher rank subsumes the privileges of lower
    /// ranks. Distinct from the persisted id even though the values
    /// currently coincide.
    pub fn rank(self) -> u8 {
        match self {
            Role::Customer => 1,
            Role::Trainer => 2,
            Role::Admin => 3,
            Role::Master => 4,
        }
    }

    pub fn is(self, target: Role) -> bool {
        self == target
    }

    /// Master is always authorized; everyone else needs at least the
    /// target's rank.
    pub fn can_access(self, target: Role) -> bool {
        if self == Role::Master {
            return true;
        }
        self.rank() >= target.rank()
    }

    pub fn is_customer(self) -> bool {
        self == Role::Customer
    }

    pub fn is_trainer(self) -> bool {
        self == Role::Trainer
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }

    pub fn is_master(self) -> bool {
        self == Role::Master
    }

    pub fn is_admin_or_master(self) -> bool {
        matches!(self, Role::Admin | Role::Master)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_name_round_trip_is_stable() {
        for role in Role::ALL {
            assert_eq!(Role::from_id(role.id()), Ok(role));
            assert_eq!(Role::from_name(role.name()), Ok(role));
            assert_eq!(Role::from_name(Role::from_id(role.id()).expect("valid").name()), Ok(role));
        }
    }

    #[test]
    fn unknown_inputs_are_rejected() {
        assert!(Role::from_id(0).is_err());
        assert!(Role::from_id(5).is_err());
        assert!(Role::from_name("superuser").is_err());
        assert!(Role::from_name("Customer").is_err());
    }

    #[test]
    fn master_accesses_every_role() {
        for role in Role::ALL {
            assert!(Role::Master.can_access(role));
        }
    }

    #[test]
    fn hierarchy_is_monotonic() {
        assert!(!Role::Customer.can_access(Role::Trainer));
        assert!(Role::Admin.can_access(Role::Customer));
        assert!(Role::Admin.can_access(Role::Trainer));
        assert!(Role::Trainer.can_access(Role::Trainer));
        assert!(!Role::Trainer.can_access(Role::Admin));
    }

    #[test]
    fn master_is_not_registerable() {
        assert!(!Role::REGISTERABLE.contains(&Role::Master));
        assert_eq!(Role::REGISTERABLE.len(), 3);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Role::Trainer).expect("serialize"), "\"trainer\"");
        let parsed: Role = serde_json::from_str("\"admin\"").expect("deserialize");
        assert_eq!(parsed, Role::Admin);
        assert!(serde_json::from_str::<Role>("\"boss\"").is_err());
    }
}
