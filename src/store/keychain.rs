//! macOS Keychain adapter over Security.framework
//!
//! The four SecItem calls, nothing else. This is the only module that
//! assembles the platform's untyped attribute dictionary; everything above
//! it works with the typed `PasswordQuery`. Status codes pass through
//! verbatim so the façade can apply its own mapping.

use std::os::raw::c_void;
use std::ptr;

use core_foundation::array::CFArray;
use core_foundation::base::{CFType, TCFType};
use core_foundation::boolean::CFBoolean;
use core_foundation::data::CFData;
use core_foundation::dictionary::{CFDictionary, CFDictionaryRef};
use core_foundation::string::CFString;
use core_foundation_sys::array::CFArrayRef;
use core_foundation_sys::base::CFTypeRef;
use core_foundation_sys::data::CFDataRef;
use core_foundation_sys::string::CFStringRef;
use security_framework_sys::base::errSecSuccess;
use security_framework_sys::item::{
    kSecAttrAccessGroup, kSecAttrAccount, kSecAttrService, kSecClass, kSecClassGenericPassword,
    kSecMatchLimit, kSecMatchLimitAll, kSecMatchLimitOne, kSecReturnAttributes, kSecReturnData,
    kSecValueData,
};
use security_framework_sys::keychain_item::{
    SecItemAdd, SecItemCopyMatching, SecItemDelete, SecItemUpdate,
};

use crate::query::{PasswordQuery, ResultLimit};
use crate::store::{OsStatus, SecureStore, StoreStatus, StoredItem};

/// The real platform keychain.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeychainStore;

impl KeychainStore {
    pub fn new() -> Self {
        Self
    }
}

fn check(status: OsStatus) -> Result<(), StoreStatus> {
    if status == errSecSuccess {
        Ok(())
    } else {
        Err(StoreStatus(status))
    }
}

/// Translate a typed query into the attribute dictionary SecItem* expects.
/// `value` is attached as `kSecValueData` for the insert path.
fn cf_attributes(query: &PasswordQuery, value: Option<&[u8]>) -> CFDictionary<CFString, CFType> {
    unsafe {
        let key = |raw: CFStringRef| CFString::wrap_under_get_rule(raw);

        let mut pairs: Vec<(CFString, CFType)> = vec![
            (
                key(kSecClass),
                CFString::wrap_under_get_rule(kSecClassGenericPassword).as_CFType(),
            ),
            (
                key(kSecAttrService),
                CFString::new(&query.locator.service).as_CFType(),
            ),
            (
                key(kSecMatchLimit),
                CFString::wrap_under_get_rule(match query.limit {
                    ResultLimit::One => kSecMatchLimitOne,
                    ResultLimit::All => kSecMatchLimitAll,
                })
                .as_CFType(),
            ),
            (
                key(kSecReturnAttributes),
                cf_bool(query.return_attributes).as_CFType(),
            ),
            (key(kSecReturnData), cf_bool(query.return_data).as_CFType()),
        ];

        if let Some(account) = &query.locator.account {
            pairs.push((key(kSecAttrAccount), CFString::new(account).as_CFType()));
        }
        if let Some(group) = &query.locator.access_group {
            pairs.push((key(kSecAttrAccessGroup), CFString::new(group).as_CFType()));
        }
        if let Some(bytes) = value {
            pairs.push((key(kSecValueData), CFData::from_buffer(bytes).as_CFType()));
        }

        CFDictionary::from_CFType_pairs(&pairs)
    }
}

fn cf_bool(value: bool) -> CFBoolean {
    if value {
        CFBoolean::true_value()
    } else {
        CFBoolean::false_value()
    }
}

/// Pull the account attribute and secret payload out of one response record.
unsafe fn decode_item(dict_ref: CFDictionaryRef) -> StoredItem {
    let dict: CFDictionary = CFDictionary::wrap_under_get_rule(dict_ref);

    let account = dict
        .find(kSecAttrAccount as *const c_void)
        .map(|value| CFString::wrap_under_get_rule(*value as CFStringRef).to_string());
    let secret = dict
        .find(kSecValueData as *const c_void)
        .map(|value| CFData::wrap_under_get_rule(*value as CFDataRef).bytes().to_vec());

    StoredItem { account, secret }
}

impl SecureStore for KeychainStore {
    fn add(&self, query: &PasswordQuery, secret: &[u8]) -> Result<(), StoreStatus> {
        let attributes = cf_attributes(query, Some(secret));
        let status = unsafe { SecItemAdd(attributes.as_concrete_TypeRef(), ptr::null_mut()) };
        check(status)
    }

    fn update(&self, query: &PasswordQuery, secret: &[u8]) -> Result<(), StoreStatus> {
        let match_query = cf_attributes(query, None);
        let changes = unsafe {
            CFDictionary::from_CFType_pairs(&[(
                CFString::wrap_under_get_rule(kSecValueData),
                CFData::from_buffer(secret).as_CFType(),
            )])
        };
        let status = unsafe {
            SecItemUpdate(match_query.as_concrete_TypeRef(), changes.as_concrete_TypeRef())
        };
        check(status)
    }

    fn copy_matching(&self, query: &PasswordQuery) -> Result<Vec<StoredItem>, StoreStatus> {
        let match_query = cf_attributes(query, None);
        let mut result: CFTypeRef = ptr::null();
        let status = unsafe {
            SecItemCopyMatching(match_query.as_concrete_TypeRef(), &mut result)
        };
        check(status)?;
        if result.is_null() {
            return Ok(Vec::new());
        }

        // kSecMatchLimitOne yields a single dictionary, kSecMatchLimitAll an
        // array of them.
        let items = unsafe {
            match query.limit {
                ResultLimit::One => {
                    let dict = result as CFDictionaryRef;
                    let item = decode_item(dict);
                    // Balance the copy's +1 retain.
                    let _owner: CFType = CFType::wrap_under_create_rule(result);
                    vec![item]
                }
                ResultLimit::All => {
                    let array: CFArray<CFType> =
                        CFArray::wrap_under_create_rule(result as CFArrayRef);
                    array
                        .iter()
                        .map(|entry| decode_item(entry.as_CFTypeRef() as CFDictionaryRef))
                        .collect()
                }
            }
        };
        Ok(items)
    }

    fn delete(&self, query: &PasswordQuery) -> Result<(), StoreStatus> {
        let match_query = cf_attributes(query, None);
        let status = unsafe { SecItemDelete(match_query.as_concrete_TypeRef()) };
        check(status)
    }
}
