use super::{Claims, Role};

/// Authenticated account context extracted from a verified token
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Account ID (from the sub claim)
    pub account_id: i64,

    /// Account email if available
    pub email: Option<String>,

    /// Account role
    pub role: Role,
}

impl AuthContext {
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            account_id: claims.sub,
            email: claims.email.clone(),
            role: claims.role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_owner(&self) -> bool {
        self.role == Role::Owner
    }
}
