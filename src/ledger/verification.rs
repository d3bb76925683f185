use primitive_types::H160;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Verification registry - the compliance gate for introducing new supply.
///
/// Every address defaults to unverified. Flags are only mutated through the
/// Verifier-gated ledger operations; both directions are idempotent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationRegistry {
    verified: HashSet<H160>,
}

impl VerificationRegistry {
    pub fn new() -> Self {
        Self {
            verified: HashSet::new(),
        }
    }

    pub fn is_verified(&self, account: H160) -> bool {
        self.verified.contains(&account)
    }

    pub fn set(&mut self, account: H160) {
        self.verified.insert(account);
    }

    pub fn clear(&mut self, account: H160) {
        self.verified.remove(&account);
    }

    /// All currently verified accounts
    pub fn accounts(&self) -> Vec<H160> {
        self.verified.iter().copied().collect()
    }
}
