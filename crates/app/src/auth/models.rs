//! Auth Models

/// Admin credential record.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    /// Argon2 PHC hash string.
    pub password_hash: String,
}

/// Identity attached to requests carrying a valid session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    pub username: String,
}
