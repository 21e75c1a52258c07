//! The closed error taxonomy for keychain façade operations

use thiserror::Error;

/// Every way a façade operation can fail.
///
/// All variants are terminal: nothing is retried internally, and nothing is
/// swallowed or downgraded. Callers decide retry policy, if any.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeychainError {
    /// The required service identifier was missing or empty.
    #[error("No service was specified for the keychain item")]
    ServiceNotSpecified,

    /// The secret could not be converted to storable bytes.
    #[error("Could not encode the password for storage")]
    EncodingError,

    /// No entry matched the locator on retrieval or delete.
    #[error("Could not find a password matching the query")]
    CouldNotFindPassword,

    /// A matching entry exists but its payload was missing or not valid text.
    #[error("Found a matching item but could not decode its data")]
    ProblemDecodingData,

    /// The insert path was rejected by the store for a reason other than
    /// not-found.
    #[error("Failed to save a new password to the keychain")]
    SaveFailed,

    /// Any other non-success store status, numeric code preserved verbatim
    /// for diagnostics.
    #[error("Keychain operation failed with status {0}")]
    Unhandled(i32),
}
