use super::{LedgerError, LedgerEvent, LedgerResult, LedgerState, Role};
use crate::{TOKEN_DECIMALS, TOKEN_NAME, TOKEN_SYMBOL};
use primitive_types::{H160, U256};

/// Behavior half of the ledger.
///
/// Every mutating operation is a function over `&mut LedgerState`, so a new
/// logic module can be swapped in behind [`ZarpToken`](super::ZarpToken)
/// while the state keeps its layout. Checks always precede writes: a failed
/// operation leaves the state byte-for-byte unchanged.
pub trait TokenLogic {
    /// Version string recorded into the state when this logic is attached
    fn version(&self) -> &'static str;

    /// One-time setup: token metadata plus the Admin grant to the caller
    fn initialize(&self, state: &mut LedgerState, caller: H160) -> LedgerResult<()>;

    fn grant_role(
        &self,
        state: &mut LedgerState,
        caller: H160,
        role: Role,
        account: H160,
    ) -> LedgerResult<LedgerEvent>;

    fn revoke_role(
        &self,
        state: &mut LedgerState,
        caller: H160,
        role: Role,
        account: H160,
    ) -> LedgerResult<LedgerEvent>;

    fn verify(&self, state: &mut LedgerState, caller: H160, account: H160)
        -> LedgerResult<LedgerEvent>;

    fn remove_verification(
        &self,
        state: &mut LedgerState,
        caller: H160,
        account: H160,
    ) -> LedgerResult<LedgerEvent>;

    fn mint(
        &self,
        state: &mut LedgerState,
        caller: H160,
        to: H160,
        amount: U256,
    ) -> LedgerResult<LedgerEvent>;

    fn transfer(
        &self,
        state: &mut LedgerState,
        caller: H160,
        to: H160,
        amount: U256,
    ) -> LedgerResult<LedgerEvent>;

    fn burn(&self, state: &mut LedgerState, caller: H160, amount: U256)
        -> LedgerResult<LedgerEvent>;
}

/// Shipped ledger semantics
#[derive(Debug, Clone, Copy, Default)]
pub struct LogicV1;

impl TokenLogic for LogicV1 {
    fn version(&self) -> &'static str {
        "v1"
    }

    fn initialize(&self, state: &mut LedgerState, caller: H160) -> LedgerResult<()> {
        if state.initialized {
            return Err(LedgerError::AlreadyInitialized);
        }

        state.name = TOKEN_NAME.to_string();
        state.symbol = TOKEN_SYMBOL.to_string();
        state.decimals = TOKEN_DECIMALS;
        state.initialized = true;
        state.logic_version = self.version().to_string();
        state.roles.grant(Role::Admin, caller);

        Ok(())
    }

    fn grant_role(
        &self,
        state: &mut LedgerState,
        caller: H160,
        role: Role,
        account: H160,
    ) -> LedgerResult<LedgerEvent> {
        state.roles.require_role(Role::Admin, caller)?;

        state.roles.grant(role, account);

        Ok(LedgerEvent::RoleGranted {
            role,
            account,
            actor: caller,
        })
    }

    fn revoke_role(
        &self,
        state: &mut LedgerState,
        caller: H160,
        role: Role,
        account: H160,
    ) -> LedgerResult<LedgerEvent> {
        state.roles.require_role(Role::Admin, caller)?;

        state.roles.revoke(role, account);

        Ok(LedgerEvent::RoleRevoked {
            role,
            account,
            actor: caller,
        })
    }

    fn verify(
        &self,
        state: &mut LedgerState,
        caller: H160,
        account: H160,
    ) -> LedgerResult<LedgerEvent> {
        state.roles.require_role(Role::Verifier, caller)?;

        state.verified.set(account);

        Ok(LedgerEvent::AddressVerificationChanged {
            account,
            actor: caller,
            verified: true,
        })
    }

    fn remove_verification(
        &self,
        state: &mut LedgerState,
        caller: H160,
        account: H160,
    ) -> LedgerResult<LedgerEvent> {
        state.roles.require_role(Role::Verifier, caller)?;

        state.verified.clear(account);

        Ok(LedgerEvent::AddressVerificationChanged {
            account,
            actor: caller,
            verified: false,
        })
    }

    fn mint(
        &self,
        state: &mut LedgerState,
        caller: H160,
        to: H160,
        amount: U256,
    ) -> LedgerResult<LedgerEvent> {
        state.roles.require_role(Role::Minter, caller)?;

        if !state.is_verified(to) {
            return Err(LedgerError::NotVerified { account: to });
        }

        let to_balance = state.balance_of(to);
        state.balances.insert(to, to_balance + amount);
        state.total_supply += amount;

        Ok(LedgerEvent::Transfer {
            from: H160::zero(),
            to,
            amount,
        })
    }

    fn transfer(
        &self,
        state: &mut LedgerState,
        caller: H160,
        to: H160,
        amount: U256,
    ) -> LedgerResult<LedgerEvent> {
        // Transfers into a burn-collection address are the last hop before
        // supply leaves circulation, so the sender must be verified. Plain
        // transfers carry no role or verification requirement.
        if state.has_role(Role::Burner, to) && !state.is_verified(caller) {
            return Err(LedgerError::NotVerified { account: caller });
        }

        let from_balance = state.balance_of(caller);
        if from_balance < amount {
            return Err(LedgerError::InsufficientBalance {
                required: amount,
                available: from_balance,
            });
        }

        state.balances.insert(caller, from_balance - amount);
        let to_balance = state.balance_of(to);
        state.balances.insert(to, to_balance + amount);

        Ok(LedgerEvent::Transfer {
            from: caller,
            to,
            amount,
        })
    }

    fn burn(
        &self,
        state: &mut LedgerState,
        caller: H160,
        amount: U256,
    ) -> LedgerResult<LedgerEvent> {
        state.roles.require_role(Role::Burner, caller)?;

        let balance = state.balance_of(caller);
        if balance < amount {
            return Err(LedgerError::InsufficientBalance {
                required: amount,
                available: balance,
            });
        }

        state.balances.insert(caller, balance - amount);
        state.total_supply -= amount;

        Ok(LedgerEvent::Transfer {
            from: caller,
            to: H160::zero(),
            amount,
        })
    }
}
