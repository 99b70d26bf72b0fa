use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user account stored in redb.
///
/// `password_hash` holds a salted PBKDF2 digest (see [`crate::auth`]); the
/// plaintext password never reaches the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// The "internet" name/password pair owned by exactly one user.
///
/// Unlike the user's own password, these fields are the payload the service
/// stores and returns, so they are kept verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub id: u64,
    pub name: String,
    pub password: String,
    pub user_id: u64,
    pub updated_at: DateTime<Utc>,
}

/// An uploaded image row. `filename` is always the fixed upload name; the id
/// orders uploads, and the highest id is the latest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: u64,
    pub filename: String,
    pub created_at: DateTime<Utc>,
}

/// A user joined with its credential, if one exists.
#[derive(Debug, Clone)]
pub struct UserWithCredential {
    pub user: UserRecord,
    pub credential: Option<CredentialRecord>,
}
