use db::models::user::Role;
use serde::{Deserialize, Serialize};

use super::scopes::Scope;

/// JWT payload shared by access and refresh tokens. `login` anchors the
/// LoginHistory row the token belongs to; refresh validation rejects any
/// token whose `(sub, login, scopes, role)` doesn't match the stored row.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub sub: String,
    pub login: i64,
    pub exp: i64,
    pub scopes: Vec<Scope>,
    pub role: Role,
}

impl Claims {
    pub fn is_expired(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}
