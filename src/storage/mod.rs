use crate::ledger::{LedgerState, Role};
use crate::{Result, ZarpError};
use primitive_types::{H160, U256};
use rocksdb::{ColumnFamilyDescriptor, IteratorMode, Options, WriteBatch, DB};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Database column families. These names and the key encodings below are the
/// stable storage layout: a logic upgrade reads the same keys unchanged, so
/// additive logic changes never require a data migration.
pub const CF_BALANCES: &str = "balances";
pub const CF_ROLES: &str = "roles";
pub const CF_VERIFIED: &str = "verified";
pub const CF_METADATA: &str = "metadata";

const METADATA_KEY: &[u8] = b"ledger";

/// Stable one-byte tag for each role, used as the key prefix in `CF_ROLES`
fn role_tag(role: Role) -> u8 {
    match role {
        Role::Admin => 0,
        Role::Minter => 1,
        Role::Pauser => 2,
        Role::Upgrader => 3,
        Role::Verifier => 4,
        Role::Burner => 5,
    }
}

fn role_from_tag(tag: u8) -> Option<Role> {
    match tag {
        0 => Some(Role::Admin),
        1 => Some(Role::Minter),
        2 => Some(Role::Pauser),
        3 => Some(Role::Upgrader),
        4 => Some(Role::Verifier),
        5 => Some(Role::Burner),
        _ => None,
    }
}

/// Metadata record persisted in `CF_METADATA`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MetadataRecord {
    name: String,
    symbol: String,
    decimals: u8,
    initialized: bool,
    total_supply: [u8; 32],
    logic_version: String,
    updated_at: u64,
}

/// Ledger persistence layer
#[derive(Debug)]
pub struct LedgerStorage {
    db: DB,
}

impl LedgerStorage {
    /// Open or create ledger storage
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors = [CF_BALANCES, CF_ROLES, CF_VERIFIED, CF_METADATA]
            .iter()
            .map(|name| ColumnFamilyDescriptor::new(*name, Options::default()))
            .collect::<Vec<_>>();

        let db = DB::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| ZarpError::Storage(format!("Failed to open database: {e}")))?;

        Ok(Self { db })
    }

    /// Persist the full ledger state, replacing whatever was stored before
    pub fn save(&self, state: &LedgerState) -> Result<()> {
        let mut batch = WriteBatch::default();

        let cf_balances = self.cf(CF_BALANCES)?;
        for key in self.existing_keys(CF_BALANCES)? {
            batch.delete_cf(cf_balances, key);
        }
        for (account, balance) in &state.balances {
            let mut value = [0u8; 32];
            balance.to_big_endian(&mut value);
            batch.put_cf(cf_balances, account.as_bytes(), value);
        }

        let cf_roles = self.cf(CF_ROLES)?;
        for key in self.existing_keys(CF_ROLES)? {
            batch.delete_cf(cf_roles, key);
        }
        for role in Role::ALL {
            for account in state.roles.members(role) {
                let mut key = Vec::with_capacity(21);
                key.push(role_tag(role));
                key.extend_from_slice(account.as_bytes());
                batch.put_cf(cf_roles, key, [1u8]);
            }
        }

        let cf_verified = self.cf(CF_VERIFIED)?;
        for key in self.existing_keys(CF_VERIFIED)? {
            batch.delete_cf(cf_verified, key);
        }
        for account in state.verified.accounts() {
            batch.put_cf(cf_verified, account.as_bytes(), [1u8]);
        }

        let mut total_supply = [0u8; 32];
        state.total_supply.to_big_endian(&mut total_supply);
        let record = MetadataRecord {
            name: state.name.clone(),
            symbol: state.symbol.clone(),
            decimals: state.decimals,
            initialized: state.initialized,
            total_supply,
            logic_version: state.logic_version.clone(),
            updated_at: chrono::Utc::now().timestamp() as u64,
        };
        let encoded = bincode::serialize(&record)
            .map_err(|e| ZarpError::Storage(format!("Failed to encode metadata: {e}")))?;
        batch.put_cf(self.cf(CF_METADATA)?, METADATA_KEY, encoded);

        self.db
            .write(batch)
            .map_err(|e| ZarpError::Storage(format!("Failed to write state: {e}")))
    }

    /// Load the persisted ledger state. Returns `None` if the database has
    /// never been saved to.
    pub fn load(&self) -> Result<Option<LedgerState>> {
        let metadata_bytes = self
            .db
            .get_cf(self.cf(CF_METADATA)?, METADATA_KEY)
            .map_err(|e| ZarpError::Storage(format!("Failed to read metadata: {e}")))?;

        let record: MetadataRecord = match metadata_bytes {
            Some(bytes) => bincode::deserialize(&bytes)
                .map_err(|e| ZarpError::Storage(format!("Failed to decode metadata: {e}")))?,
            None => return Ok(None),
        };

        let mut state = LedgerState::new();
        state.name = record.name;
        state.symbol = record.symbol;
        state.decimals = record.decimals;
        state.initialized = record.initialized;
        state.total_supply = U256::from_big_endian(&record.total_supply);
        state.logic_version = record.logic_version;

        for entry in self.db.iterator_cf(self.cf(CF_BALANCES)?, IteratorMode::Start) {
            let (key, value) = entry
                .map_err(|e| ZarpError::Storage(format!("Failed to read balances: {e}")))?;
            if key.len() != 20 || value.len() != 32 {
                return Err(ZarpError::Storage("Corrupt balance entry".to_string()));
            }
            let account = H160::from_slice(&key);
            let balance = U256::from_big_endian(&value);
            state.balances.insert(account, balance);
        }

        for entry in self.db.iterator_cf(self.cf(CF_ROLES)?, IteratorMode::Start) {
            let (key, _) = entry
                .map_err(|e| ZarpError::Storage(format!("Failed to read roles: {e}")))?;
            if key.len() != 21 {
                return Err(ZarpError::Storage("Corrupt role entry".to_string()));
            }
            let role = role_from_tag(key[0])
                .ok_or_else(|| ZarpError::Storage(format!("Unknown role tag: {}", key[0])))?;
            state.roles.grant(role, H160::from_slice(&key[1..]));
        }

        for entry in self.db.iterator_cf(self.cf(CF_VERIFIED)?, IteratorMode::Start) {
            let (key, _) = entry
                .map_err(|e| ZarpError::Storage(format!("Failed to read verified set: {e}")))?;
            if key.len() != 20 {
                return Err(ZarpError::Storage("Corrupt verification entry".to_string()));
            }
            state.verified.set(H160::from_slice(&key));
        }

        Ok(Some(state))
    }

    fn cf(&self, name: &str) -> Result<&rocksdb::ColumnFamily> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| ZarpError::Storage(format!("Missing column family: {name}")))
    }

    fn existing_keys(&self, cf_name: &str) -> Result<Vec<Box<[u8]>>> {
        let mut keys = Vec::new();
        for entry in self.db.iterator_cf(self.cf(cf_name)?, IteratorMode::Start) {
            let (key, _) = entry
                .map_err(|e| ZarpError::Storage(format!("Failed to scan {cf_name}: {e}")))?;
            keys.push(key);
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{LogicV1, TokenLogic};
    use tempfile::TempDir;

    fn populated_state() -> LedgerState {
        let admin = H160::from_low_u64_be(1);
        let minter = H160::from_low_u64_be(2);
        let verifier = H160::from_low_u64_be(3);
        let holder = H160::from_low_u64_be(4);

        let mut state = LedgerState::new();
        LogicV1.initialize(&mut state, admin).unwrap();
        LogicV1.grant_role(&mut state, admin, Role::Minter, minter).unwrap();
        LogicV1.grant_role(&mut state, admin, Role::Verifier, verifier).unwrap();
        LogicV1.verify(&mut state, verifier, holder).unwrap();
        LogicV1.mint(&mut state, minter, holder, U256::from(12345)).unwrap();
        state
    }

    #[test]
    fn test_load_from_empty_database() {
        let dir = TempDir::new().unwrap();
        let storage = LedgerStorage::open(dir.path()).unwrap();
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let state = populated_state();

        let storage = LedgerStorage::open(dir.path()).unwrap();
        storage.save(&state).unwrap();
        let loaded = storage.load().unwrap().unwrap();

        assert_eq!(loaded.name, state.name);
        assert_eq!(loaded.symbol, state.symbol);
        assert_eq!(loaded.decimals, state.decimals);
        assert_eq!(loaded.initialized, state.initialized);
        assert_eq!(loaded.total_supply, state.total_supply);
        assert_eq!(loaded.balances, state.balances);
        assert_eq!(loaded.logic_version, state.logic_version);
        for role in Role::ALL {
            let mut expected = state.roles.members(role);
            let mut actual = loaded.roles.members(role);
            expected.sort();
            actual.sort();
            assert_eq!(actual, expected);
        }
        assert!(loaded.verified.is_verified(H160::from_low_u64_be(4)));
    }

    #[test]
    fn test_state_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let state = populated_state();

        {
            let storage = LedgerStorage::open(dir.path()).unwrap();
            storage.save(&state).unwrap();
        }

        let storage = LedgerStorage::open(dir.path()).unwrap();
        let loaded = storage.load().unwrap().unwrap();
        assert_eq!(loaded.total_supply, U256::from(12345));
        assert!(loaded.has_role(Role::Minter, H160::from_low_u64_be(2)));
    }

    #[test]
    fn test_save_replaces_stale_entries() {
        let dir = TempDir::new().unwrap();
        let mut state = populated_state();
        let storage = LedgerStorage::open(dir.path()).unwrap();
        storage.save(&state).unwrap();

        let admin = H160::from_low_u64_be(1);
        let verifier = H160::from_low_u64_be(3);
        let holder = H160::from_low_u64_be(4);
        LogicV1
            .remove_verification(&mut state, verifier, holder)
            .unwrap();
        LogicV1
            .revoke_role(&mut state, admin, Role::Minter, H160::from_low_u64_be(2))
            .unwrap();
        storage.save(&state).unwrap();

        let loaded = storage.load().unwrap().unwrap();
        assert!(!loaded.is_verified(holder));
        assert!(!loaded.has_role(Role::Minter, H160::from_low_u64_be(2)));
    }
}
