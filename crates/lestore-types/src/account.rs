//! ACME account records and the option types used to look them up.
//!
//! Documents keep the camelCase field names the original JavaScript store
//! wrote (`accountId`, `agreeTos`, `publicKeyPem`), so a deployment of this
//! crate reads a database populated by that store unchanged.

use bson::{Bson, Document, doc};
use serde::{Deserialize, Serialize};

/// A stored ACME account registration.
///
/// The schema is deliberately non-strict: fields this crate does not declare
/// round-trip through [`Account::extra`] (including Mongo's `_id`) without
/// validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Contact address, usable as a lookup key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Caller-assigned identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// Content-derived identifier: lowercase hex SHA-256 of the keypair's
    /// `publicKeyPem`. Stable primary lookup key once a keypair exists.
    /// Computed by `AccountStore::set` only; `set_keypair` never recomputes
    /// it, so callers replacing a keypair must re-run `set`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Opaque public/private key material; shape owned by the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keypair: Option<Document>,
    /// Terms-of-service acceptance: timestamp, boolean, or URL depending on
    /// the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agree_tos: Option<Bson>,
    /// Registration receipt returned by the certificate authority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<Bson>,
    /// Undeclared fields, persisted as-is.
    #[serde(flatten)]
    pub extra: Document,
}

/// Caller-supplied context for account lookups.
///
/// `email` and `account_id` drive the query (a disjunction over whichever
/// are present); the remaining fields are never queried, only layered under
/// the stored document when results are reshaped.
#[derive(Debug, Clone, Default)]
pub struct AccountLookup {
    pub email: Option<String>,
    pub account_id: Option<String>,
    pub id: Option<String>,
    pub keypair: Option<Document>,
    pub receipt: Option<Bson>,
    pub agree_tos: Option<Bson>,
}

impl AccountLookup {
    /// Lookup by contact address.
    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    /// Lookup by caller-assigned account id (matched against the stored
    /// content-derived `id`).
    pub fn by_account_id(account_id: impl Into<String>) -> Self {
        Self {
            account_id: Some(account_id.into()),
            ..Self::default()
        }
    }

    /// The fields this lookup contributes when results are reshaped: each is
    /// layered *under* the stored document, filling only gaps.
    pub fn context_fields(&self) -> Document {
        let mut fields = Document::new();
        if let Some(keypair) = &self.keypair {
            fields.insert("keypair", keypair.clone());
        }
        if let Some(receipt) = &self.receipt {
            fields.insert("receipt", receipt.clone());
        }
        if let Some(email) = &self.email {
            fields.insert("email", email.clone());
        }
        if let Some(id) = &self.id {
            fields.insert("id", id.clone());
        }
        fields
    }
}

/// Registration payload for `AccountStore::set`.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Key material; must carry a string `publicKeyPem` member, from which
    /// the account id is derived.
    pub keypair: Document,
    /// Receipt from the certificate authority, stored verbatim.
    pub receipt: Option<Bson>,
    /// Terms-of-service acceptance; a lookup-level `agree_tos` wins over
    /// this one when both are supplied.
    pub agree_tos: Option<Bson>,
}

impl Registration {
    pub fn new(keypair: Document) -> Self {
        Self {
            keypair,
            receipt: None,
            agree_tos: None,
        }
    }

    /// The fields this registration contributes when results are reshaped;
    /// lowest precedence layer (below both the stored document and the
    /// lookup context).
    pub fn context_fields(&self) -> Document {
        let mut fields = doc! { "keypair": self.keypair.clone() };
        if let Some(receipt) = &self.receipt {
            fields.insert("receipt", receipt.clone());
        }
        if let Some(agree_tos) = &self.agree_tos {
            fields.insert("agreeTos", agree_tos.clone());
        }
        fields
    }
}
