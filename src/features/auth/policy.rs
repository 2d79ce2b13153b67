//! Role-to-capability policy.
//!
//! The whole authorization matrix lives in one table-driven function so it
//! can be audited and unit-tested in isolation:
//!
//! | Role     | add item | update item | delete item | manage types/locations |
//! |----------|----------|-------------|-------------|------------------------|
//! | user     | yes      | no          | no          | no                     |
//! | operator | yes      | yes         | no          | no                     |
//! | admin    | yes      | yes         | yes         | yes                    |

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User role, stored in the `user_role` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Operator,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Operator => "operator",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single permitted action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    AddItems,
    UpdateItems,
    DeleteItems,
    ManageCatalog,
}

/// The capability set granted to a role.
pub fn capabilities(role: Role) -> &'static [Capability] {
    match role {
        Role::User => &[Capability::AddItems],
        Role::Operator => &[Capability::AddItems, Capability::UpdateItems],
        Role::Admin => &[
            Capability::AddItems,
            Capability::UpdateItems,
            Capability::DeleteItems,
            Capability::ManageCatalog,
        ],
    }
}

pub fn allows(role: Role, capability: Capability) -> bool {
    capabilities(role).contains(&capability)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_can_add_items() {
        for role in [Role::User, Role::Operator, Role::Admin] {
            assert!(allows(role, Capability::AddItems), "{role} should add");
        }
    }

    #[test]
    fn only_operator_and_admin_can_update_items() {
        assert!(!allows(Role::User, Capability::UpdateItems));
        assert!(allows(Role::Operator, Capability::UpdateItems));
        assert!(allows(Role::Admin, Capability::UpdateItems));
    }

    #[test]
    fn only_admin_can_delete_items() {
        assert!(!allows(Role::User, Capability::DeleteItems));
        assert!(!allows(Role::Operator, Capability::DeleteItems));
        assert!(allows(Role::Admin, Capability::DeleteItems));
    }

    #[test]
    fn only_admin_can_manage_catalog() {
        assert!(!allows(Role::User, Capability::ManageCatalog));
        assert!(!allows(Role::Operator, Capability::ManageCatalog));
        assert!(allows(Role::Admin, Capability::ManageCatalog));
    }
}
