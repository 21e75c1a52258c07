//! Typed query model handed to the secure store
//!
//! Every façade operation builds a fresh `PasswordQuery` from its locator;
//! queries are never cached or reused across calls. The untyped attribute
//! dictionary the platform wants is assembled from this type inside the
//! store adapter, nowhere else.

use crate::locator::CredentialLocator;

/// How many matches the store should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultLimit {
    One,
    All,
}

/// A generic-password query: locator plus response-shape flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordQuery {
    pub locator: CredentialLocator,
    pub limit: ResultLimit,
    pub return_attributes: bool,
    pub return_data: bool,
}

impl PasswordQuery {
    /// Shape for existence probes, updates, and deletes: one match,
    /// attributes only, no payload.
    pub fn for_match(locator: CredentialLocator) -> Self {
        Self {
            locator,
            limit: ResultLimit::One,
            return_attributes: true,
            return_data: false,
        }
    }

    /// Shape for single retrieval: one match with the secret payload.
    pub fn for_retrieval(locator: CredentialLocator) -> Self {
        Self {
            locator,
            limit: ResultLimit::One,
            return_attributes: true,
            return_data: true,
        }
    }

    /// Shape for enumeration: every match under the service, attributes and
    /// payload both requested so account→secret pairs can be assembled.
    pub fn for_enumeration(locator: CredentialLocator) -> Self {
        Self {
            locator,
            limit: ResultLimit::All,
            return_attributes: true,
            return_data: true,
        }
    }
}
