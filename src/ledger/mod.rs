//! ZARP permissioned token ledger.
//!
//! This module provides the token state machine: a balance ledger with
//! role-gated mint/burn, an address verification registry that gates new
//! supply, and a swappable logic module so the ledger's behavior can be
//! upgraded without touching stored state.

pub mod logic;
pub mod roles;
pub mod state;
pub mod token;
pub mod verification;

pub use logic::{LogicV1, TokenLogic};
pub use roles::{Role, RoleRegistry};
pub use state::LedgerState;
pub use token::ZarpToken;
pub use verification::VerificationRegistry;

use primitive_types::{H160, U256};
use serde::{Deserialize, Serialize};

/// Ledger error types
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("account {account} does not hold the {role} role")]
    Unauthorized { role: Role, account: H160 },

    #[error("account {account} is not verified")]
    NotVerified { account: H160 },

    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: U256, available: U256 },

    #[error("ledger is already initialized")]
    AlreadyInitialized,
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Events returned by successful mutating operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// Token movement. Mint uses the zero address as `from`, burn uses the
    /// zero address as `to`.
    Transfer {
        from: H160,
        to: H160,
        amount: U256,
    },

    /// Verification flag changed (or re-asserted) for an account
    AddressVerificationChanged {
        account: H160,
        actor: H160,
        verified: bool,
    },

    /// Role granted to an account
    RoleGranted {
        role: Role,
        account: H160,
        actor: H160,
    },

    /// Role revoked from an account
    RoleRevoked {
        role: Role,
        account: H160,
        actor: H160,
    },
}
