use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::roles::Role;

/// JWT payload behind the session cookie and bearer tokens. The role
/// claim is what the route guard authorizes on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,      // user ID
    pub role: Role,     // role name, lowercase
    pub name: String,
    pub email: String,
    pub iat: usize,     // issued at (unix timestamp)
    pub exp: usize,     // expires at (unix timestamp)
    pub iss: String,    // issuer
    pub aud: String,    // audience
}
