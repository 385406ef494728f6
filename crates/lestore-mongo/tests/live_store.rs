//! Integration suite against a live MongoDB.
//!
//! Set `LESTORE_TEST_URI` (for example `mongodb://localhost/lestore-test`)
//! to run these; without it every test logs a skip and passes. Records are
//! keyed on per-run unique emails/domains, so repeated runs against the
//! same database never interfere.

use bson::{Bson, doc};
use lestore_core::repository::account::AccountStore;
use lestore_core::repository::certificate::CertificateStore;
use lestore_mongo::{MongoStore, StoreConfig};
use lestore_types::account::{AccountLookup, Registration};
use lestore_types::certificate::{CertificateBundle, CertificateLookup};

async fn live_store() -> Option<MongoStore> {
    let uri = std::env::var("LESTORE_TEST_URI").ok()?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    Some(
        MongoStore::create(StoreConfig::new(uri))
            .await
            .expect("store creation"),
    )
}

macro_rules! require_live {
    () => {
        match live_store().await {
            Some(store) => store,
            None => {
                eprintln!("skipping: LESTORE_TEST_URI not set");
                return;
            }
        }
    };
}

fn unique(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{prefix}-{}-{nanos}", std::process::id())
}

#[tokio::test]
async fn test_account_set_then_check_by_email() {
    let store = require_live!();
    let email = unique("check") + "@example.test";
    let pem = unique("-----BEGIN PUBLIC KEY-----");

    let mut reg = Registration::new(doc! { "publicKeyPem": pem.as_str() });
    reg.receipt = Some(Bson::Document(doc! { "ok": true }));
    let lookup = AccountLookup::by_email(&email);

    let written = store.accounts().set(&lookup, &reg).await.unwrap().unwrap();
    let expected_id = lestore_core::keyid::account_id(&reg.keypair).unwrap();
    assert_eq!(written.email.as_deref(), Some(email.as_str()));
    assert_eq!(written.id.as_deref(), Some(expected_id.as_str()));

    let found = store.accounts().check(&lookup).await.unwrap().unwrap();
    assert_eq!(found.email.as_deref(), Some(email.as_str()));
    assert_eq!(found.id.as_deref(), Some(expected_id.as_str()));
    assert_eq!(found.receipt, Some(Bson::Document(doc! { "ok": true })));
}

#[tokio::test]
async fn test_account_set_is_idempotent_on_id() {
    let store = require_live!();
    let email = unique("idem") + "@example.test";
    let reg = Registration::new(doc! { "publicKeyPem": unique("PEM") });
    let lookup = AccountLookup::by_email(&email);

    let first = store.accounts().set(&lookup, &reg).await.unwrap().unwrap();
    let second = store.accounts().set(&lookup, &reg).await.unwrap().unwrap();
    assert_eq!(first.id, second.id);

    // The derived id is itself a lookup key.
    let by_id = store
        .accounts()
        .check(&AccountLookup::by_account_id(first.id.clone().unwrap()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_id.email.as_deref(), Some(email.as_str()));
}

#[tokio::test]
async fn test_account_keypair_round_trip() {
    let store = require_live!();
    let email = unique("kp") + "@example.test";
    let lookup = AccountLookup::by_email(&email);
    let keypair = doc! { "publicKeyPem": unique("PUB"), "privateKeyPem": unique("PRIV") };

    let written = store
        .accounts()
        .set_keypair(&lookup, &keypair)
        .await
        .unwrap();
    assert_eq!(written, Some(keypair.clone()));

    let found = store.accounts().check_keypair(&lookup).await.unwrap();
    assert_eq!(found, Some(keypair));
}

#[tokio::test]
async fn test_account_missing_is_none_not_error() {
    let store = require_live!();
    let lookup = AccountLookup::by_email(unique("ghost") + "@example.test");
    assert!(store.accounts().check(&lookup).await.unwrap().is_none());
    assert!(store.accounts().check_keypair(&lookup).await.unwrap().is_none());
}

#[tokio::test]
async fn test_certificate_set_preserves_domain_order() {
    let store = require_live!();
    let primary = unique("www") + ".example.test";
    let secondary = unique("api") + ".example.test";
    let lookup = CertificateLookup::by_domains([primary.clone(), secondary.clone()]);
    let bundle = CertificateBundle {
        cert: Some("CERT PEM".into()),
        chain: Some("CHAIN PEM".into()),
        privkey: Some("PRIVKEY PEM".into()),
    };

    let written = store.certificates().set(&lookup, &bundle).await.unwrap().unwrap();
    assert_eq!(written.domains, vec![primary.clone(), secondary.clone()]);

    // Any single covered domain finds the record, domains still in order.
    let found = store
        .certificates()
        .check(&CertificateLookup::by_domains([secondary.clone()]))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.domains, vec![primary, secondary]);
    assert_eq!(found.cert.as_deref(), Some("CERT PEM"));
    assert_eq!(found.privkey.as_deref(), Some("PRIVKEY PEM"));
}

#[tokio::test]
async fn test_certificate_keypair_round_trip() {
    let store = require_live!();
    let domain = unique("kp") + ".example.test";
    let lookup = CertificateLookup::by_domains([domain]);
    let keypair = doc! { "privateKeyPem": unique("PRIV"), "publicKeyPem": unique("PUB") };

    store
        .certificates()
        .set_keypair(&lookup, &keypair)
        .await
        .unwrap()
        .unwrap();
    let found = store.certificates().check_keypair(&lookup).await.unwrap();
    assert_eq!(found, Some(keypair));
}

#[tokio::test]
async fn test_certificate_check_layers_lookup_under_stored() {
    let store = require_live!();
    let domain = unique("layer") + ".example.test";
    let account_id = unique("acct");

    // Stored record has no email; the lookup's context fills that gap, but
    // the stored accountId wins over the lookup's.
    let write_lookup = CertificateLookup {
        domains: vec![domain.clone()],
        account_id: Some(account_id.clone()),
        email: None,
    };
    store
        .certificates()
        .set(&write_lookup, &CertificateBundle::default())
        .await
        .unwrap();

    let read_lookup = CertificateLookup {
        domains: vec![domain],
        account_id: Some("other-account".into()),
        email: Some("gapfill@example.test".into()),
    };
    let found = store.certificates().check(&read_lookup).await.unwrap().unwrap();
    assert_eq!(found.account_id.as_deref(), Some(account_id.as_str()));
    assert_eq!(found.email.as_deref(), Some("gapfill@example.test"));
}

// The end-to-end registration scenario: set with a fixed PEM derives the
// documented digest, and the keypair is immediately readable back.
#[tokio::test]
async fn test_account_registration_scenario() {
    let store = require_live!();
    let email = unique("scenario") + "@example.test";

    let mut reg = Registration::new(doc! { "publicKeyPem": "PEM1" });
    reg.receipt = Some(Bson::Document(doc! { "ok": true }));
    let lookup = AccountLookup::by_email(&email);

    let written = store.accounts().set(&lookup, &reg).await.unwrap().unwrap();
    assert_eq!(
        written.id.as_deref(),
        Some("53bdfcb4f93f95ae7fa5e9f37b1f473149b02b25b2627fd654c2bea0df787c92")
    );
    assert_eq!(written.email.as_deref(), Some(email.as_str()));
    assert_eq!(written.receipt, Some(Bson::Document(doc! { "ok": true })));

    let keypair = store.accounts().check_keypair(&lookup).await.unwrap();
    assert_eq!(keypair, Some(doc! { "publicKeyPem": "PEM1" }));
}
