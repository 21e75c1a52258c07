//! The four façade operations over the secure store
//!
//! Stateless free functions: every call takes the store and the full locator
//! explicitly, builds a fresh query, makes one pass against the store, and
//! maps the outcome into `KeychainError`. No retries, no caching, no hidden
//! state. Save's read-then-decide-then-write is not atomic across concurrent
//! callers; the store's own uniqueness enforcement is the only protection,
//! and callers needing exclusivity must serialize above this crate.

use std::collections::HashMap;

use crate::error::KeychainError;
use crate::locator::CredentialLocator;
use crate::query::PasswordQuery;
use crate::store::{SecureStore, StoreStatus, STATUS_ITEM_NOT_FOUND};

/// Save a password for the locator, inserting or updating as needed.
///
/// An existing entry with the identical password is left untouched; an
/// existing entry with a different password has only its secret data
/// replaced; an absent entry is inserted with the full locator attributes.
/// A probe failure other than not-found is propagated as-is, never treated
/// as permission to insert.
pub fn save_password<S: SecureStore + ?Sized>(
    store: &S,
    password: &str,
    service: &str,
    account: Option<&str>,
    access_group: Option<&str>,
) -> Result<(), KeychainError> {
    let locator = CredentialLocator::new(service, account, access_group)?;
    let secret = encode_secret(password)?;

    match retrieve_with(store, locator.clone()) {
        Ok(existing) if existing == password => {
            tracing::debug!(service = %locator.service, "Password unchanged, skipping write");
            Ok(())
        }
        Ok(_) => {
            let query = PasswordQuery::for_match(locator);
            store.update(&query, &secret).map_err(|StoreStatus(code)| {
                tracing::debug!(service = %query.locator.service, code, "Keychain update failed");
                KeychainError::Unhandled(code)
            })
        }
        Err(KeychainError::CouldNotFindPassword) => {
            let query = PasswordQuery::for_match(locator);
            store.add(&query, &secret).map_err(|StoreStatus(code)| {
                tracing::debug!(service = %query.locator.service, code, "Keychain insert failed");
                KeychainError::SaveFailed
            })
        }
        Err(err) => Err(err),
    }
}

/// Retrieve the password stored for the locator.
pub fn retrieve_password<S: SecureStore + ?Sized>(
    store: &S,
    service: &str,
    account: Option<&str>,
    access_group: Option<&str>,
) -> Result<String, KeychainError> {
    let locator = CredentialLocator::new(service, account, access_group)?;
    retrieve_with(store, locator)
}

/// Retrieve every account→password pair stored under the service.
///
/// Entries lacking an account attribute, or whose payload is missing or not
/// valid UTF-8, are skipped. A service with no entries at all is a failure,
/// not an empty map: the store reports not-found and that status is
/// surfaced via `Unhandled`.
pub fn retrieve_all_passwords<S: SecureStore + ?Sized>(
    store: &S,
    service: &str,
    access_group: Option<&str>,
) -> Result<HashMap<String, String>, KeychainError> {
    let locator = CredentialLocator::new(service, None, access_group)?;
    let query = PasswordQuery::for_enumeration(locator);
    let items = store
        .copy_matching(&query)
        .map_err(|StoreStatus(code)| KeychainError::Unhandled(code))?;

    let mut passwords = HashMap::new();
    for item in items {
        let Some(account) = item.account else { continue };
        let Some(bytes) = item.secret else { continue };
        let Ok(secret) = String::from_utf8(bytes) else { continue };
        passwords.insert(account, secret);
    }
    Ok(passwords)
}

/// Remove the password stored for the locator.
///
/// Deleting an absent locator fails with `CouldNotFindPassword`; repeated
/// deletes are observably different from the first.
pub fn remove_password<S: SecureStore + ?Sized>(
    store: &S,
    service: &str,
    account: Option<&str>,
    access_group: Option<&str>,
) -> Result<(), KeychainError> {
    let locator = CredentialLocator::new(service, account, access_group)?;
    let query = PasswordQuery::for_match(locator);
    store.delete(&query).map_err(map_lookup_status)
}

/// Rust strings are always valid UTF-8, so encoding cannot fail for this
/// API; the step stays fallible because the platform contract names it and
/// the taxonomy is closed.
fn encode_secret(password: &str) -> Result<Vec<u8>, KeychainError> {
    Ok(password.as_bytes().to_vec())
}

fn retrieve_with<S: SecureStore + ?Sized>(
    store: &S,
    locator: CredentialLocator,
) -> Result<String, KeychainError> {
    let query = PasswordQuery::for_retrieval(locator);
    let items = store.copy_matching(&query).map_err(map_lookup_status)?;
    let item = items
        .into_iter()
        .next()
        .ok_or(KeychainError::CouldNotFindPassword)?;
    let bytes = item.secret.ok_or(KeychainError::ProblemDecodingData)?;
    String::from_utf8(bytes).map_err(|_| KeychainError::ProblemDecodingData)
}

fn map_lookup_status(StoreStatus(code): StoreStatus) -> KeychainError {
    if code == STATUS_ITEM_NOT_FOUND {
        KeychainError::CouldNotFindPassword
    } else {
        KeychainError::Unhandled(code)
    }
}
