use db::models::user::Role;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Me,
    Account,
    ViewUsers,
    ViewAllProblems,
    Batch,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Scope::Me => "me",
            Scope::Account => "account",
            Scope::ViewUsers => "view_users",
            Scope::ViewAllProblems => "view_all_problems",
            Scope::Batch => "batch",
        };
        write!(f, "{s}")
    }
}

/// Scope matrix keyed by role (spec §4.C).
pub fn scopes_for_role(role: Role) -> HashSet<Scope> {
    match role {
        Role::Admin => HashSet::from([
            Scope::Me,
            Scope::Account,
            Scope::ViewUsers,
            Scope::ViewAllProblems,
            Scope::Batch,
        ]),
        Role::Manager => HashSet::from([
            Scope::Me,
            Scope::ViewUsers,
            Scope::ViewAllProblems,
            Scope::Batch,
        ]),
        Role::Student => HashSet::from([Scope::Me]),
    }
}

/// `requested ⊆ scope-matrix[role]`.
pub fn role_grants(role: Role, requested: &[Scope]) -> bool {
    let granted = scopes_for_role(role);
    requested.iter().all(|s| granted.contains(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_cannot_request_batch() {
        assert!(!role_grants(Role::Student, &[Scope::Batch]));
    }

    #[test]
    fn admin_grants_everything() {
        assert!(role_grants(
            Role::Admin,
            &[Scope::Me, Scope::Account, Scope::ViewUsers, Scope::ViewAllProblems, Scope::Batch]
        ));
    }

    #[test]
    fn manager_lacks_account_scope() {
        assert!(!role_grants(Role::Manager, &[Scope::Account]));
    }
}
