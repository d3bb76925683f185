pub mod ledger;
pub mod storage;

use primitive_types::H160;

pub use ledger::{
    LedgerError, LedgerEvent, LedgerResult, LedgerState, LogicV1, Role, TokenLogic, ZarpToken,
};
pub use storage::LedgerStorage;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Token metadata, fixed at initialization
pub const TOKEN_NAME: &str = "ZARP Stablecoin";
pub const TOKEN_SYMBOL: &str = "ZARP";
pub const TOKEN_DECIMALS: u8 = 18;

/// Crate errors
#[derive(thiserror::Error, Debug)]
pub enum ZarpError {
    #[error("ledger error: {0}")]
    Ledger(#[from] ledger::LedgerError),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Crate result type
pub type Result<T> = std::result::Result<T, ZarpError>;

/// Parse a 20-byte account address from a hex string, with or without the
/// `0x` prefix
pub fn parse_address(hex_str: &str) -> Result<H160> {
    let hex_clean = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    if hex_clean.len() != 40 {
        return Err(ZarpError::InvalidAddress(hex_str.to_string()));
    }

    let bytes = hex::decode(hex_clean).map_err(|_| ZarpError::InvalidAddress(hex_str.to_string()))?;

    Ok(H160::from_slice(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address_accepts_prefixed_and_bare() {
        let bare = parse_address("00000000000000000000000000000000000000ff").unwrap();
        let prefixed = parse_address("0x00000000000000000000000000000000000000ff").unwrap();
        assert_eq!(bare, prefixed);
        assert_eq!(bare, H160::from_low_u64_be(0xff));
    }

    #[test]
    fn test_parse_address_rejects_bad_input() {
        assert!(parse_address("0x1234").is_err());
        assert!(parse_address("zz00000000000000000000000000000000000000").is_err());
    }
}
