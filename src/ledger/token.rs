use super::{LedgerEvent, LedgerResult, LedgerState, LogicV1, Role, TokenLogic};
use primitive_types::{H160, U256};

/// Proxy facade over the ledger.
///
/// Owns the storage half ([`LedgerState`]) and a boxed behavior half
/// ([`TokenLogic`]); every operation delegates to the attached logic.
/// [`upgrade_to`](ZarpToken::upgrade_to) replaces only the logic pointer,
/// never the state, so balances, roles, and verification flags survive an
/// upgrade unchanged.
pub struct ZarpToken {
    state: LedgerState,
    logic: Box<dyn TokenLogic>,
}

impl ZarpToken {
    /// Fresh, uninitialized ledger running the shipped logic
    pub fn new() -> Self {
        Self::with_logic(Box::new(LogicV1))
    }

    pub fn with_logic(logic: Box<dyn TokenLogic>) -> Self {
        Self {
            state: LedgerState::new(),
            logic,
        }
    }

    /// Attach logic to previously persisted state
    pub fn from_state(state: LedgerState, logic: Box<dyn TokenLogic>) -> Self {
        Self { state, logic }
    }

    /// One-time setup; grants Admin to the caller
    pub fn initialize(&mut self, caller: H160) -> LedgerResult<()> {
        self.logic.initialize(&mut self.state, caller)?;
        tracing::info!(
            name = %self.state.name,
            symbol = %self.state.symbol,
            admin = ?caller,
            "ledger initialized"
        );
        Ok(())
    }

    pub fn grant_role(&mut self, caller: H160, role: Role, account: H160) -> LedgerResult<LedgerEvent> {
        self.logic.grant_role(&mut self.state, caller, role, account)
    }

    pub fn revoke_role(&mut self, caller: H160, role: Role, account: H160) -> LedgerResult<LedgerEvent> {
        self.logic.revoke_role(&mut self.state, caller, role, account)
    }

    pub fn verify(&mut self, caller: H160, account: H160) -> LedgerResult<LedgerEvent> {
        self.logic.verify(&mut self.state, caller, account)
    }

    pub fn remove_verification(&mut self, caller: H160, account: H160) -> LedgerResult<LedgerEvent> {
        self.logic.remove_verification(&mut self.state, caller, account)
    }

    pub fn mint(&mut self, caller: H160, to: H160, amount: U256) -> LedgerResult<LedgerEvent> {
        let event = self.logic.mint(&mut self.state, caller, to, amount)?;
        tracing::info!(to = ?to, %amount, supply = %self.state.total_supply, "minted tokens");
        Ok(event)
    }

    pub fn transfer(&mut self, caller: H160, to: H160, amount: U256) -> LedgerResult<LedgerEvent> {
        self.logic.transfer(&mut self.state, caller, to, amount)
    }

    pub fn burn(&mut self, caller: H160, amount: U256) -> LedgerResult<LedgerEvent> {
        let event = self.logic.burn(&mut self.state, caller, amount)?;
        tracing::info!(from = ?caller, %amount, supply = %self.state.total_supply, "burned tokens");
        Ok(event)
    }

    /// Swap the logic module. The authorization check runs before the swap,
    /// so a rejected caller leaves the old logic active.
    pub fn upgrade_to(&mut self, caller: H160, new_logic: Box<dyn TokenLogic>) -> LedgerResult<()> {
        self.state.roles.require_role(Role::Upgrader, caller)?;

        tracing::info!(
            from = %self.state.logic_version,
            to = new_logic.version(),
            "upgrading ledger logic"
        );
        self.state.logic_version = new_logic.version().to_string();
        self.logic = new_logic;
        Ok(())
    }

    pub fn balance_of(&self, account: H160) -> U256 {
        self.state.balance_of(account)
    }

    pub fn total_supply(&self) -> U256 {
        self.state.total_supply()
    }

    pub fn is_verified(&self, account: H160) -> bool {
        self.state.is_verified(account)
    }

    pub fn has_role(&self, role: Role, account: H160) -> bool {
        self.state.has_role(role, account)
    }

    pub fn name(&self) -> &str {
        &self.state.name
    }

    pub fn symbol(&self) -> &str {
        &self.state.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.state.decimals
    }

    pub fn logic_version(&self) -> &str {
        &self.state.logic_version
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }
}

impl Default for ZarpToken {
    fn default() -> Self {
        Self::new()
    }
}
