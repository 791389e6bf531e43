//! Currency balance and cosmetic unlock ledger
//!
//! Persisted write-through on every mutation. Purchase/equip failures are
//! silent no-ops - the UI reads snapshots and disables affordances itself.
//! A failed store write is logged and the in-memory state stays
//! authoritative for the session.

use std::collections::BTreeSet;

use crate::store::{KEY_CURRENCY, KEY_EQUIPPED, KEY_OWNED, KvStore};

/// The unlock every player owns and starts equipped with
pub const DEFAULT_UNLOCK: &str = "default";

/// A purchasable cosmetic unlock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlockDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price: u64,
}

/// Fixed unlock catalog, ordered as displayed in the shop
pub const CATALOG: &[UnlockDef] = &[
    UnlockDef {
        id: DEFAULT_UNLOCK,
        name: "Default Runner",
        description: "The classic look",
        price: 0,
    },
    UnlockDef {
        id: "neon",
        name: "Neon Runner",
        description: "A glowing neon finish",
        price: 10,
    },
    UnlockDef {
        id: "golden",
        name: "Golden Runner",
        description: "The legendary golden finish",
        price: 50,
    },
    UnlockDef {
        id: "rainbow",
        name: "Rainbow Runner",
        description: "Full-spectrum color cycle",
        price: 100,
    },
];

/// Look up a catalog entry by id
pub fn catalog_entry(id: &str) -> Option<&'static UnlockDef> {
    CATALOG.iter().find(|u| u.id == id)
}

/// Player-owned currency and unlocks, persisted across runs
#[derive(Debug, Clone)]
pub struct Economy {
    balance: u64,
    owned: BTreeSet<String>,
    equipped: String,
}

impl Economy {
    /// Restore the ledger from the store. Missing or corrupt values fall
    /// back to defaults; the default unlock is always owned.
    pub fn load(store: &dyn KvStore) -> Self {
        let balance = store
            .get(KEY_CURRENCY)
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        let mut owned: BTreeSet<String> = store
            .get(KEY_OWNED)
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();
        owned.insert(DEFAULT_UNLOCK.to_string());

        let equipped = store
            .get(KEY_EQUIPPED)
            .filter(|id| owned.contains(id))
            .unwrap_or_else(|| DEFAULT_UNLOCK.to_string());

        log::info!(
            "economy loaded: balance {}, {} unlock(s), equipped {:?}",
            balance,
            owned.len(),
            equipped
        );
        Self {
            balance,
            owned,
            equipped,
        }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn equipped(&self) -> &str {
        &self.equipped
    }

    pub fn owns(&self, id: &str) -> bool {
        self.owned.contains(id)
    }

    /// Owned unlock ids, sorted
    pub fn owned(&self) -> impl Iterator<Item = &str> {
        self.owned.iter().map(String::as_str)
    }

    /// Award a collected coin's value and persist the balance immediately
    pub fn collect_coin(&mut self, store: &mut dyn KvStore, value: u32) {
        self.balance += value as u64;
        self.persist_balance(store);
    }

    /// Buy an unlock. Silent no-op when the id is unknown, already owned,
    /// or the balance can't cover the price.
    pub fn purchase(&mut self, store: &mut dyn KvStore, id: &str) {
        let Some(unlock) = catalog_entry(id) else {
            return;
        };
        if self.owned.contains(id) || self.balance < unlock.price {
            return;
        }
        self.balance -= unlock.price;
        self.owned.insert(id.to_string());
        self.persist_balance(store);
        self.persist_owned(store);
        log::info!("purchased unlock {:?} for {}", id, unlock.price);
    }

    /// Equip an owned unlock. Silent no-op otherwise.
    pub fn equip(&mut self, store: &mut dyn KvStore, id: &str) {
        if !self.owned.contains(id) {
            return;
        }
        self.equipped = id.to_string();
        self.persist_equipped(store);
    }

    fn persist_balance(&self, store: &mut dyn KvStore) {
        if let Err(e) = store.set(KEY_CURRENCY, &self.balance.to_string()) {
            log::warn!("failed to persist balance: {e}");
        }
    }

    fn persist_owned(&self, store: &mut dyn KvStore) {
        let ids: Vec<&str> = self.owned.iter().map(String::as_str).collect();
        match serde_json::to_string(&ids) {
            Ok(json) => {
                if let Err(e) = store.set(KEY_OWNED, &json) {
                    log::warn!("failed to persist owned unlocks: {e}");
                }
            }
            Err(e) => log::warn!("failed to encode owned unlocks: {e}"),
        }
    }

    fn persist_equipped(&self, store: &mut dyn KvStore) {
        if let Err(e) = store.set(KEY_EQUIPPED, &self.equipped) {
            log::warn!("failed to persist equipped unlock: {e}");
        }
    }
}
