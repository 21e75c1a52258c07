//! Walkthrough of the façade against the in-memory store.
//!
//! Run with `cargo run --example roundtrip`; set RUST_LOG=keyfob=debug to
//! watch the insert/update decisions.

use keyfob::store::memory::InMemoryStore;
use keyfob::{remove_password, retrieve_all_passwords, retrieve_password, save_password};

fn main() -> Result<(), keyfob::KeychainError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "keyfob=debug".into()),
        ))
        .init();

    let store = InMemoryStore::new();
    let service = "com.keyfob.demo";

    save_password(&store, "hunter2", service, Some("alice"), None)?;
    save_password(&store, "swordfish", service, Some("bob"), None)?;
    // Saving the same value again is a no-op.
    save_password(&store, "hunter2", service, Some("alice"), None)?;

    let alice = retrieve_password(&store, service, Some("alice"), None)?;
    println!("alice -> {alice}");

    let everyone = retrieve_all_passwords(&store, service, None)?;
    println!("{} accounts under {service}", everyone.len());

    remove_password(&store, service, Some("alice"), None)?;
    remove_password(&store, service, Some("bob"), None)?;

    match retrieve_all_passwords(&store, service, None) {
        Err(err) => println!("after removal: {err}"),
        Ok(_) => unreachable!("service should be absent"),
    }

    Ok(())
}
