use chrono::Utc;
use redb::ReadableTable;

use super::db::{Database, DatabaseError};
use super::models::{CredentialRecord, UserRecord, UserWithCredential};
use super::tables::*;

impl Database {
    // ========================================================================
    // User / credential operations
    // ========================================================================

    /// Create a user and its internet credential as one atomic pair.
    ///
    /// Returns `Ok(None)` when the name is already taken. Uniqueness is
    /// enforced by the name index inside the write transaction: the insert
    /// reports the previous entry, and a taken name abandons the whole
    /// transaction, so a partial pair is never observable.
    pub fn create_user_with_credential(
        &self,
        name: &str,
        password_hash: &str,
        credential_name: &str,
        credential_password: &str,
    ) -> Result<Option<(UserRecord, CredentialRecord)>, DatabaseError> {
        let write_txn = self.begin_write()?;
        let created = {
            let mut users = write_txn.open_table(USERS)?;
            let mut names = write_txn.open_table(USER_NAMES)?;
            let mut credentials = write_txn.open_table(CREDENTIALS)?;
            let mut owners = write_txn.open_table(USER_CREDENTIALS)?;

            let user_id = users.last()?.map(|(k, _)| k.value() + 1).unwrap_or(1);
            let name_taken = names.insert(name, user_id)?.is_some();

            if name_taken {
                None
            } else {
                let now = Utc::now();
                let user = UserRecord {
                    id: user_id,
                    name: name.to_string(),
                    password_hash: password_hash.to_string(),
                    created_at: now,
                };
                let user_data = rmp_serde::to_vec_named(&user)?;
                users.insert(user_id, user_data.as_slice())?;

                let credential_id = credentials.last()?.map(|(k, _)| k.value() + 1).unwrap_or(1);
                let credential = CredentialRecord {
                    id: credential_id,
                    name: credential_name.to_string(),
                    password: credential_password.to_string(),
                    user_id,
                    updated_at: now,
                };
                let credential_data = rmp_serde::to_vec_named(&credential)?;
                credentials.insert(credential_id, credential_data.as_slice())?;
                owners.insert(user_id, credential_id)?;

                Some((user, credential))
            }
        };

        match created {
            Some(pair) => {
                write_txn.commit()?;
                Ok(Some(pair))
            }
            // Dropping the transaction rolls back the conflicting name insert.
            None => Ok(None),
        }
    }

    /// Look up a user by name (resolves name -> id -> user)
    pub fn get_user_by_name(&self, name: &str) -> Result<Option<UserRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let names = read_txn.open_table(USER_NAMES)?;

        let user_id = match names.get(name)? {
            Some(id) => id.value(),
            None => return Ok(None),
        };

        let users = read_txn.open_table(USERS)?;
        match users.get(user_id)? {
            Some(data) => {
                let user: UserRecord = rmp_serde::from_slice(data.value())?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    /// Get the credential owned by a user, if any
    pub fn get_credential_for_user(
        &self,
        user_id: u64,
    ) -> Result<Option<CredentialRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let owners = read_txn.open_table(USER_CREDENTIALS)?;

        let credential_id = match owners.get(user_id)? {
            Some(id) => id.value(),
            None => return Ok(None),
        };

        let credentials = read_txn.open_table(CREDENTIALS)?;
        match credentials.get(credential_id)? {
            Some(data) => {
                let credential: CredentialRecord = rmp_serde::from_slice(data.value())?;
                Ok(Some(credential))
            }
            None => Ok(None),
        }
    }

    /// Overwrite a user's credential fields in place.
    ///
    /// Returns the updated record, or `None` when the user owns no credential.
    pub fn update_credential(
        &self,
        user_id: u64,
        new_name: &str,
        new_password: &str,
    ) -> Result<Option<CredentialRecord>, DatabaseError> {
        let write_txn = self.begin_write()?;

        let credential_id = {
            let owners = write_txn.open_table(USER_CREDENTIALS)?;
            let result = owners.get(user_id)?.map(|id| id.value());
            result
        };

        let updated = match credential_id {
            Some(credential_id) => {
                let mut credentials = write_txn.open_table(CREDENTIALS)?;
                let existing = match credentials.get(credential_id)? {
                    Some(data) => {
                        let credential: CredentialRecord = rmp_serde::from_slice(data.value())?;
                        Some(credential)
                    }
                    None => None,
                };

                match existing {
                    Some(mut credential) => {
                        credential.name = new_name.to_string();
                        credential.password = new_password.to_string();
                        credential.updated_at = Utc::now();

                        let data = rmp_serde::to_vec_named(&credential)?;
                        credentials.insert(credential_id, data.as_slice())?;
                        Some(credential)
                    }
                    None => None,
                }
            }
            None => None,
        };

        write_txn.commit()?;
        Ok(updated)
    }

    /// Delete a user by name, cascading to its credential and both indexes
    pub fn delete_user(&self, name: &str) -> Result<bool, DatabaseError> {
        let write_txn = self.begin_write()?;

        let deleted = {
            let mut names = write_txn.open_table(USER_NAMES)?;
            let user_id = names.remove(name)?.map(|id| id.value());

            match user_id {
                Some(user_id) => {
                    let mut users = write_txn.open_table(USERS)?;
                    users.remove(user_id)?;

                    let mut owners = write_txn.open_table(USER_CREDENTIALS)?;
                    let credential_id = owners.remove(user_id)?.map(|id| id.value());

                    if let Some(credential_id) = credential_id {
                        let mut credentials = write_txn.open_table(CREDENTIALS)?;
                        credentials.remove(credential_id)?;
                    }
                    true
                }
                None => false,
            }
        };

        write_txn.commit()?;
        Ok(deleted)
    }

    /// List every user in id order, each joined with its credential if present
    pub fn list_users(&self) -> Result<Vec<UserWithCredential>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let users_table = read_txn.open_table(USERS)?;
        let owners = read_txn.open_table(USER_CREDENTIALS)?;
        let credentials = read_txn.open_table(CREDENTIALS)?;

        let mut users = Vec::new();
        for result in users_table.iter()? {
            let (_, value) = result?;
            let user: UserRecord = rmp_serde::from_slice(value.value())?;

            let credential = match owners.get(user.id)? {
                Some(credential_id) => match credentials.get(credential_id.value())? {
                    Some(data) => {
                        let credential: CredentialRecord = rmp_serde::from_slice(data.value())?;
                        Some(credential)
                    }
                    None => None,
                },
                None => None,
            };

            users.push(UserWithCredential { user, credential });
        }

        Ok(users)
    }
}
