//! keyfob - a thin façade over the platform credential store
//!
//! Saves, retrieves, enumerates, and deletes named secrets keyed by a
//! service identifier and an optional account. All persistence, encryption,
//! and access control belong to the platform's secure store; this crate only
//! shapes queries around its four primitives (add, update, copy-matching,
//! delete) and maps status codes into a closed error set.
//!
//! Operations are stateless free functions taking a [`SecureStore`]
//! implementation and every parameter explicitly. On macOS the real store is
//! `store::keychain::KeychainStore`; [`store::memory::InMemoryStore`] is a
//! keychain-faithful double for tests and other platforms.
//!
//! ```
//! use keyfob::store::memory::InMemoryStore;
//!
//! let store = InMemoryStore::new();
//! keyfob::save_password(&store, "hunter2", "com.example.app", Some("alice"), None)?;
//! let password = keyfob::retrieve_password(&store, "com.example.app", Some("alice"), None)?;
//! assert_eq!(password, "hunter2");
//! # Ok::<(), keyfob::KeychainError>(())
//! ```

pub mod error;
pub mod locator;
pub mod passwords;
pub mod query;
pub mod store;

pub use error::KeychainError;
pub use locator::CredentialLocator;
pub use passwords::{remove_password, retrieve_all_passwords, retrieve_password, save_password};
pub use query::{PasswordQuery, ResultLimit};
pub use store::{SecureStore, StoreStatus, StoredItem};
