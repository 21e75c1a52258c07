//! End-to-end tests for the password façade against the in-memory store.
//!
//! Exercises the full flow: locator → query → store → error mapping, with
//! the store's call and mutation counters backing the side-effect claims.

use keyfob::store::memory::InMemoryStore;
use keyfob::store::{StoreStatus, STATUS_ITEM_NOT_FOUND};
use keyfob::{
    remove_password, retrieve_all_passwords, retrieve_password, save_password, KeychainError,
};

const SERVICE: &str = "com.keyfob.test";

#[test]
fn test_save_then_retrieve_returns_the_secret() {
    let store = InMemoryStore::new();

    save_password(&store, "1234", SERVICE, Some("cdw"), None).unwrap();
    let password = retrieve_password(&store, SERVICE, Some("cdw"), None).unwrap();

    assert_eq!(password, "1234");
}

#[test]
fn test_repeated_save_of_identical_secret_writes_nothing() {
    let store = InMemoryStore::new();

    save_password(&store, "1234", SERVICE, Some("cdw"), None).unwrap();
    let writes_after_first = store.mutation_count();
    assert_eq!(writes_after_first, 1);

    save_password(&store, "1234", SERVICE, Some("cdw"), None).unwrap();
    assert_eq!(store.mutation_count(), writes_after_first);

    let password = retrieve_password(&store, SERVICE, Some("cdw"), None).unwrap();
    assert_eq!(password, "1234");
}

#[test]
fn test_save_with_new_secret_updates_existing_entry() {
    let store = InMemoryStore::new();

    save_password(&store, "old", SERVICE, Some("cdw"), None).unwrap();
    save_password(&store, "new", SERVICE, Some("cdw"), None).unwrap();

    let password = retrieve_password(&store, SERVICE, Some("cdw"), None).unwrap();
    assert_eq!(password, "new");
    assert_eq!(store.len(), 1);
}

#[test]
fn test_retrieve_of_never_saved_locator_fails_not_found() {
    let store = InMemoryStore::new();

    let result = retrieve_password(&store, SERVICE, Some("nobody"), None);
    assert_eq!(result, Err(KeychainError::CouldNotFindPassword));
}

#[test]
fn test_remove_succeeds_once_then_fails_not_found() {
    let store = InMemoryStore::new();

    save_password(&store, "1234", SERVICE, Some("cdw"), None).unwrap();
    remove_password(&store, SERVICE, Some("cdw"), None).unwrap();

    let second = remove_password(&store, SERVICE, Some("cdw"), None);
    assert_eq!(second, Err(KeychainError::CouldNotFindPassword));

    let retrieval = retrieve_password(&store, SERVICE, Some("cdw"), None);
    assert_eq!(retrieval, Err(KeychainError::CouldNotFindPassword));
}

#[test]
fn test_enumeration_returns_every_account_under_the_service() {
    let store = InMemoryStore::new();

    save_password(&store, "s1", SERVICE, Some("a1"), None).unwrap();
    save_password(&store, "s2", SERVICE, Some("a2"), None).unwrap();
    save_password(&store, "elsewhere", "com.keyfob.other", Some("a3"), None).unwrap();

    let passwords = retrieve_all_passwords(&store, SERVICE, None).unwrap();
    assert_eq!(passwords.len(), 2);
    assert_eq!(passwords["a1"], "s1");
    assert_eq!(passwords["a2"], "s2");
}

#[test]
fn test_enumeration_of_emptied_service_fails_rather_than_returning_empty_map() {
    let store = InMemoryStore::new();

    save_password(&store, "s1", SERVICE, Some("a1"), None).unwrap();
    save_password(&store, "s2", SERVICE, Some("a2"), None).unwrap();
    remove_password(&store, SERVICE, Some("a1"), None).unwrap();
    remove_password(&store, SERVICE, Some("a2"), None).unwrap();

    let result = retrieve_all_passwords(&store, SERVICE, None);
    assert_eq!(result, Err(KeychainError::Unhandled(STATUS_ITEM_NOT_FOUND)));
}

#[test]
fn test_enumeration_skips_entries_without_decodable_secrets() {
    let store = InMemoryStore::new();

    save_password(&store, "good", SERVICE, Some("a1"), None).unwrap();
    store.seed(SERVICE, Some("garbled"), None, &[0xff, 0xfe, 0xfd]);
    store.seed(SERVICE, None, None, b"service-default");

    let passwords = retrieve_all_passwords(&store, SERVICE, None).unwrap();
    assert_eq!(passwords.len(), 1);
    assert_eq!(passwords["a1"], "good");
}

#[test]
fn test_empty_service_fails_without_touching_the_store() {
    let store = InMemoryStore::new();

    assert_eq!(
        save_password(&store, "pw", "", Some("cdw"), None),
        Err(KeychainError::ServiceNotSpecified)
    );
    assert_eq!(
        retrieve_password(&store, "", Some("cdw"), None),
        Err(KeychainError::ServiceNotSpecified)
    );
    assert_eq!(
        retrieve_all_passwords(&store, "", None),
        Err(KeychainError::ServiceNotSpecified)
    );
    assert_eq!(
        remove_password(&store, "", Some("cdw"), None),
        Err(KeychainError::ServiceNotSpecified)
    );

    assert_eq!(store.call_count(), 0);
}

#[test]
fn test_service_wide_default_is_distinct_from_named_accounts() {
    let store = InMemoryStore::new();

    save_password(&store, "named", SERVICE, Some("alice"), None).unwrap();
    save_password(&store, "default", SERVICE, None, None).unwrap();

    assert_eq!(retrieve_password(&store, SERVICE, None, None).unwrap(), "default");
    assert_eq!(
        retrieve_password(&store, SERVICE, Some("alice"), None).unwrap(),
        "named"
    );

    remove_password(&store, SERVICE, None, None).unwrap();
    assert_eq!(
        retrieve_password(&store, SERVICE, None, None),
        Err(KeychainError::CouldNotFindPassword)
    );
    assert_eq!(
        retrieve_password(&store, SERVICE, Some("alice"), None).unwrap(),
        "named"
    );
}

#[test]
fn test_access_group_scopes_every_operation() {
    let store = InMemoryStore::new();

    save_password(&store, "in-a", SERVICE, Some("alice"), Some("group.a")).unwrap();
    save_password(&store, "in-b", SERVICE, Some("alice"), Some("group.b")).unwrap();

    assert_eq!(
        retrieve_password(&store, SERVICE, Some("alice"), Some("group.a")).unwrap(),
        "in-a"
    );

    let group_b = retrieve_all_passwords(&store, SERVICE, Some("group.b")).unwrap();
    assert_eq!(group_b.len(), 1);
    assert_eq!(group_b["alice"], "in-b");

    remove_password(&store, SERVICE, Some("alice"), Some("group.a")).unwrap();
    assert_eq!(
        retrieve_password(&store, SERVICE, Some("alice"), Some("group.b")).unwrap(),
        "in-b"
    );
}

#[test]
fn test_ambiguous_probe_failure_during_save_leaves_store_untouched() {
    let store = InMemoryStore::new();

    // errSecAuthFailed stands in for any status that is neither success nor
    // not-found.
    store.fail_next_copy(StoreStatus(-25293));

    let result = save_password(&store, "pw", SERVICE, Some("cdw"), None);
    assert_eq!(result, Err(KeychainError::Unhandled(-25293)));
    assert_eq!(store.mutation_count(), 0);
    assert!(store.is_empty());
}

#[test]
fn test_concurrent_style_double_insert_surfaces_save_failed() {
    let store = InMemoryStore::new();

    // A second writer claims the slot between this caller's probe and its
    // insert. The store's uniqueness enforcement rejects the late add.
    store.fail_next_copy(StoreStatus(STATUS_ITEM_NOT_FOUND));
    store.seed(SERVICE, Some("cdw"), None, b"winner");

    let result = save_password(&store, "loser", SERVICE, Some("cdw"), None);
    assert_eq!(result, Err(KeychainError::SaveFailed));
    assert_eq!(retrieve_password(&store, SERVICE, Some("cdw"), None).unwrap(), "winner");
}
