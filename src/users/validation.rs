//! Field rules for user records.
//!
//! Two flavours exist: the authoritative check run on submit (and by the
//! backend on every request body) and the incremental check run while a
//! field is being typed, which does not flag a field that is still empty.

use regex::Regex;

use super::model::NewUser;

pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";
pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 50;

pub const EMAIL_EXISTS: &str = "Email already exists";
const EMAIL_REQUIRED: &str = "Email is required";
const EMAIL_INVALID: &str = "Please enter a valid email address";

/// Form fields that can carry a validation message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    FirstName,
    LastName,
    Email,
}

impl Field {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Email => "Email",
        }
    }
}

/// Per-field messages; `None` means the field is valid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl FieldErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.email.is_none()
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::FirstName => self.first_name.as_deref(),
            Field::LastName => self.last_name.as_deref(),
            Field::Email => self.email.as_deref(),
        }
    }

    pub fn set(&mut self, field: Field, message: Option<String>) {
        match field {
            Field::FirstName => self.first_name = message,
            Field::LastName => self.last_name = message,
            Field::Email => self.email = message,
        }
    }

    /// First message in form order, used for single-line error bodies.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        [Field::FirstName, Field::LastName, Field::Email]
            .into_iter()
            .find_map(|field| self.get(field))
    }
}

#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(EMAIL_PATTERN).is_ok_and(|re| re.is_match(email))
}

#[must_use]
pub fn valid_name(name: &str) -> bool {
    (NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&name.chars().count())
}

/// Authoritative check for a first or last name.
#[must_use]
pub fn check_name(field: Field, value: &str) -> Option<String> {
    let label = field.label();
    let length = value.chars().count();
    if length == 0 {
        Some(format!("{label} is required"))
    } else if length < NAME_MIN_CHARS {
        Some(format!("{label} must be at least {NAME_MIN_CHARS} characters"))
    } else if length > NAME_MAX_CHARS {
        Some(format!("{label} cannot exceed {NAME_MAX_CHARS} characters"))
    } else {
        None
    }
}

/// Authoritative check for an email address.
#[must_use]
pub fn check_email(value: &str) -> Option<String> {
    if value.is_empty() {
        Some(EMAIL_REQUIRED.to_string())
    } else if valid_email(value) {
        None
    } else {
        Some(EMAIL_INVALID.to_string())
    }
}

/// Keystroke check for a name: an empty field is not flagged yet.
#[must_use]
pub fn check_name_incremental(field: Field, value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        check_name(field, value)
    }
}

/// Keystroke check for an email: an empty field is not flagged yet.
#[must_use]
pub fn check_email_incremental(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        check_email(value)
    }
}

/// Runs every authoritative rule over a record.
#[must_use]
pub fn validate(user: &NewUser) -> FieldErrors {
    FieldErrors {
        first_name: check_name(Field::FirstName, &user.first_name),
        last_name: check_name(Field::LastName, &user.last_name),
        email: check_email(&user.email),
    }
}
