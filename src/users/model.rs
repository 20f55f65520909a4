use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Backend-assigned user identifier.
pub type UserId = i64;

/// A persisted user record as exchanged with `/api/users`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub active: bool,
}

/// A user without an id, used for create requests and update bodies.
///
/// Unknown fields (such as an `id` sent along with an update) are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

impl User {
    /// Attaches an id to the given fields.
    #[must_use]
    pub fn with_id(id: UserId, fields: NewUser) -> Self {
        Self {
            id,
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            active: fields.active,
        }
    }
}

impl From<User> for NewUser {
    fn from(user: User) -> Self {
        Self {
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            active: user.active,
        }
    }
}
