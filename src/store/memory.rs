//! In-memory secure store for testing and non-macOS development
//!
//! Reproduces the keychain semantics the façade depends on: uniqueness over
//! (service, account, access group), `errSecItemNotFound` when nothing
//! matches a copy/update/delete, `errSecDuplicateItem` on a colliding
//! insert, and response shaping per the query's limit and return flags.
//! No actual keychain interaction.

use std::sync::{Arc, Mutex};

use crate::query::{PasswordQuery, ResultLimit};
use crate::store::{
    SecureStore, StoreStatus, StoredItem, STATUS_DUPLICATE_ITEM, STATUS_ITEM_NOT_FOUND,
};

#[derive(Debug, Clone)]
struct Entry {
    service: String,
    account: Option<String>,
    access_group: Option<String>,
    secret: Vec<u8>,
}

#[derive(Default)]
struct Inner {
    entries: Vec<Entry>,
    calls: usize,
    mutations: usize,
    fail_next_copy: Option<StoreStatus>,
}

/// Thread-safe in-memory stand-in for the platform keychain.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entry directly, bypassing the façade. Accepts raw bytes so
    /// tests can plant payloads that are not valid text.
    pub fn seed(&self, service: &str, account: Option<&str>, access_group: Option<&str>, secret: &[u8]) {
        let mut inner = self.inner.lock().unwrap();
        inner.entries.push(Entry {
            service: service.to_string(),
            account: account.map(str::to_string),
            access_group: access_group.map(str::to_string),
            secret: secret.to_vec(),
        });
    }

    /// Total store operations observed, successful or not (for assertions).
    pub fn call_count(&self) -> usize {
        self.inner.lock().unwrap().calls
    }

    /// Successful writes (add/update/delete) applied so far.
    pub fn mutation_count(&self) -> usize {
        self.inner.lock().unwrap().mutations
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make the next copy-matching call fail with the given status.
    pub fn fail_next_copy(&self, status: StoreStatus) {
        self.inner.lock().unwrap().fail_next_copy = Some(status);
    }

    /// Clear all entries and counters.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.entries.clear();
        inner.calls = 0;
        inner.mutations = 0;
        inner.fail_next_copy = None;
    }
}

/// Whether an entry is addressed by the query.
///
/// The service always filters. An access group in the query narrows the
/// match to entries stored under it; a query without one matches any group.
/// A single-match query addresses one slot exactly, so its account (or its
/// absence, the service-wide slot) must match; an all-matches query spans
/// every account under the service.
fn matches(entry: &Entry, query: &PasswordQuery) -> bool {
    if entry.service != query.locator.service {
        return false;
    }
    if let Some(group) = &query.locator.access_group {
        if entry.access_group.as_ref() != Some(group) {
            return false;
        }
    }
    match query.limit {
        ResultLimit::One => entry.account == query.locator.account,
        ResultLimit::All => true,
    }
}

impl SecureStore for InMemoryStore {
    fn add(&self, query: &PasswordQuery, secret: &[u8]) -> Result<(), StoreStatus> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls += 1;
        let locator = &query.locator;
        let collision = inner.entries.iter().any(|entry| {
            entry.service == locator.service
                && entry.account == locator.account
                && entry.access_group == locator.access_group
        });
        if collision {
            return Err(StoreStatus(STATUS_DUPLICATE_ITEM));
        }
        inner.entries.push(Entry {
            service: locator.service.clone(),
            account: locator.account.clone(),
            access_group: locator.access_group.clone(),
            secret: secret.to_vec(),
        });
        inner.mutations += 1;
        Ok(())
    }

    fn update(&self, query: &PasswordQuery, secret: &[u8]) -> Result<(), StoreStatus> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls += 1;
        let entry = inner
            .entries
            .iter_mut()
            .find(|entry| matches(entry, query))
            .ok_or(StoreStatus(STATUS_ITEM_NOT_FOUND))?;
        entry.secret = secret.to_vec();
        inner.mutations += 1;
        Ok(())
    }

    fn copy_matching(&self, query: &PasswordQuery) -> Result<Vec<StoredItem>, StoreStatus> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls += 1;
        if let Some(status) = inner.fail_next_copy.take() {
            return Err(status);
        }
        let mut items: Vec<StoredItem> = inner
            .entries
            .iter()
            .filter(|entry| matches(entry, query))
            .map(|entry| StoredItem {
                account: if query.return_attributes {
                    entry.account.clone()
                } else {
                    None
                },
                secret: query.return_data.then(|| entry.secret.clone()),
            })
            .collect();
        if items.is_empty() {
            return Err(StoreStatus(STATUS_ITEM_NOT_FOUND));
        }
        if let ResultLimit::One = query.limit {
            items.truncate(1);
        }
        Ok(items)
    }

    fn delete(&self, query: &PasswordQuery) -> Result<(), StoreStatus> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls += 1;
        let before = inner.entries.len();
        inner.entries.retain(|entry| !matches(entry, query));
        if inner.entries.len() == before {
            return Err(StoreStatus(STATUS_ITEM_NOT_FOUND));
        }
        inner.mutations += 1;
        Ok(())
    }
}
