//! Locator value type identifying a credential slot

use crate::error::KeychainError;

/// The (service, account, access group) triple identifying a credential slot.
///
/// `service` is always present and non-empty; construction enforces this
/// before any store access can happen. An absent `account` addresses the
/// service-wide default credential rather than any named account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialLocator {
    pub service: String,
    pub account: Option<String>,
    pub access_group: Option<String>,
}

impl CredentialLocator {
    /// Build a locator, rejecting a missing or empty service up front.
    pub fn new(
        service: &str,
        account: Option<&str>,
        access_group: Option<&str>,
    ) -> Result<Self, KeychainError> {
        if service.is_empty() {
            return Err(KeychainError::ServiceNotSpecified);
        }
        Ok(Self {
            service: service.to_string(),
            account: account.map(str::to_string),
            access_group: access_group.map(str::to_string),
        })
    }
}
