use super::{LedgerError, LedgerResult};
use primitive_types::H160;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Closed enumeration of the capabilities the ledger understands.
///
/// `Admin` is self-administering: only current admins may grant or revoke
/// any role, including `Admin` itself. The five operational roles gate the
/// mutating operations named after them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Minter,
    Pauser,
    Upgrader,
    Verifier,
    Burner,
}

impl Role {
    /// Every role, in declaration order
    pub const ALL: [Role; 6] = [
        Role::Admin,
        Role::Minter,
        Role::Pauser,
        Role::Upgrader,
        Role::Verifier,
        Role::Burner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Minter => "MINTER",
            Role::Pauser => "PAUSER",
            Role::Upgrader => "UPGRADER",
            Role::Verifier => "VERIFIER",
            Role::Burner => "BURNER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "MINTER" => Ok(Role::Minter),
            "PAUSER" => Ok(Role::Pauser),
            "UPGRADER" => Ok(Role::Upgrader),
            "VERIFIER" => Ok(Role::Verifier),
            "BURNER" => Ok(Role::Burner),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Role registry - maps each role to the set of accounts holding it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleRegistry {
    grants: HashMap<Role, HashSet<H160>>,
}

impl RoleRegistry {
    pub fn new() -> Self {
        Self {
            grants: HashMap::new(),
        }
    }

    pub fn has_role(&self, role: Role, account: H160) -> bool {
        self.grants
            .get(&role)
            .map(|holders| holders.contains(&account))
            .unwrap_or(false)
    }

    /// Grant a role. Granting an already-held role is a no-op.
    pub fn grant(&mut self, role: Role, account: H160) {
        self.grants.entry(role).or_default().insert(account);
    }

    /// Revoke a role. Revoking an unheld role is a no-op.
    pub fn revoke(&mut self, role: Role, account: H160) {
        if let Some(holders) = self.grants.get_mut(&role) {
            holders.remove(&account);
        }
    }

    /// Guard invoked at the top of every role-gated operation
    pub fn require_role(&self, role: Role, account: H160) -> LedgerResult<()> {
        if self.has_role(role, account) {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized { role, account })
        }
    }

    /// Accounts currently holding a role
    pub fn members(&self, role: Role) -> Vec<H160> {
        self.grants
            .get(&role)
            .map(|holders| holders.iter().copied().collect())
            .unwrap_or_default()
    }
}
