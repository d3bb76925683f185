use super::{Role, RoleRegistry, VerificationRegistry};
use primitive_types::{H160, U256};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Storage half of the ledger.
///
/// This is the schema that survives logic upgrades: balances, the
/// total-supply counter, role grants, verification flags, and token
/// metadata. It carries reads only; every mutation goes through a
/// [`TokenLogic`](super::TokenLogic) implementation so the behavior can be
/// swapped without a data migration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerState {
    /// Token metadata, fixed at initialization
    pub name: String,
    pub symbol: String,
    pub decimals: u8,

    /// Set once by `initialize`; a second call fails
    pub initialized: bool,

    /// Balance mapping: address => balance. Entries appear on first credit
    /// and are never removed, matching `total_supply` incrementally.
    pub balances: HashMap<H160, U256>,
    pub total_supply: U256,

    pub roles: RoleRegistry,
    pub verified: VerificationRegistry,

    /// Version string of the logic module last attached to this state
    pub logic_version: String,
}

impl LedgerState {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            symbol: String::new(),
            decimals: 0,
            initialized: false,
            balances: HashMap::new(),
            total_supply: U256::zero(),
            roles: RoleRegistry::new(),
            verified: VerificationRegistry::new(),
            logic_version: String::new(),
        }
    }

    pub fn balance_of(&self, account: H160) -> U256 {
        *self.balances.get(&account).unwrap_or(&U256::zero())
    }

    pub fn total_supply(&self) -> U256 {
        self.total_supply
    }

    pub fn is_verified(&self, account: H160) -> bool {
        self.verified.is_verified(account)
    }

    pub fn has_role(&self, role: Role, account: H160) -> bool {
        self.roles.has_role(role, account)
    }
}

impl Default for LedgerState {
    fn default() -> Self {
        Self::new()
    }
}
