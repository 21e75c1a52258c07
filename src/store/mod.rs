//! Secure-store boundary
//!
//! The platform keychain is reached through the `SecureStore` trait so the
//! façade logic can be exercised against test doubles.
//!
//! Production: macOS Keychain via Security.framework (`keychain` module)
//! Testing: keychain-faithful in-memory simulation (`memory` module)

use thiserror::Error;

use crate::query::PasswordQuery;

#[cfg(target_os = "macos")]
pub mod keychain;
pub mod memory;

/// Platform status code, `OSStatus` on Apple systems.
pub type OsStatus = i32;

/// `errSecItemNotFound`: no item matched the query.
pub const STATUS_ITEM_NOT_FOUND: OsStatus = -25300;

/// `errSecDuplicateItem`: an insert collided with an existing item.
pub const STATUS_DUPLICATE_ITEM: OsStatus = -25299;

/// A non-success status returned by the store, code preserved verbatim.
///
/// Success is the `Ok` arm of every store operation; this type only ever
/// carries a failure. The façade decides which codes are well-known and
/// which fold into `KeychainError::Unhandled`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("secure store returned status {0}")]
pub struct StoreStatus(pub OsStatus);

/// One decoded record from a copy-matching response.
///
/// Fields mirror the response-shape flags of the query that produced it: a
/// query that withheld the payload yields items with `secret: None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredItem {
    pub account: Option<String>,
    pub secret: Option<Vec<u8>>,
}

/// The four operation shapes of the platform secure-storage primitive.
///
/// All calls are synchronous and blocking; the store's own latency and
/// access-control behavior is inherited as-is. No operation is retried or
/// cancelled here.
#[cfg_attr(test, mockall::automock)]
pub trait SecureStore: Send + Sync {
    /// Insert a new entry carrying the query's locator attributes plus the
    /// secret payload.
    fn add(&self, query: &PasswordQuery, secret: &[u8]) -> Result<(), StoreStatus>;

    /// Replace only the secret payload of the entry matched by the query.
    fn update(&self, query: &PasswordQuery, secret: &[u8]) -> Result<(), StoreStatus>;

    /// Return the entries matching the query, shaped by its limit and
    /// return flags.
    fn copy_matching(&self, query: &PasswordQuery) -> Result<Vec<StoredItem>, StoreStatus>;

    /// Delete the entry matched by the query.
    fn delete(&self, query: &PasswordQuery) -> Result<(), StoreStatus>;
}
