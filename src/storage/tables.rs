use redb::TableDefinition;

/// User accounts: id -> UserRecord (msgpack)
pub const USERS: TableDefinition<u64, &[u8]> = TableDefinition::new("users");

/// Unique-name index: name -> user id (the external lookup key)
pub const USER_NAMES: TableDefinition<&str, u64> = TableDefinition::new("user_names");

/// Internet credentials: id -> CredentialRecord (msgpack)
pub const CREDENTIALS: TableDefinition<u64, &[u8]> = TableDefinition::new("credentials");

/// Ownership index: user id -> credential id (one credential per user)
pub const USER_CREDENTIALS: TableDefinition<u64, u64> = TableDefinition::new("user_credentials");

/// Uploaded images: id -> ImageRecord (msgpack); key order is upload order
pub const IMAGES: TableDefinition<u64, &[u8]> = TableDefinition::new("images");
