//! The user record shared by the client, the console and the backend.

pub mod model;
pub mod validation;

pub use self::model::{NewUser, User, UserId};
pub use self::validation::{validate, Field, FieldErrors};
