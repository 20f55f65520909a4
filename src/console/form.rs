//! Form panel bound to the controller's draft.

use super::controller::{Controller, Mode};
use crate::{
    client::UsersApi,
    users::{validation::NAME_MAX_CHARS, Field},
};

pub const PROCESSING: &str = "Processing...";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldView {
    pub field: Field,
    pub label: &'static str,
    pub value: String,
    pub error: Option<String>,
    pub required: bool,
    pub max_length: Option<usize>,
    pub disabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormView {
    pub title: String,
    pub fields: Vec<FieldView>,
    pub active: bool,
    pub disabled: bool,
    pub action: &'static str,
    pub danger: bool,
    pub banner: Option<String>,
}

impl FormView {
    /// Builds the form for the current mode; `None` while the list is shown.
    ///
    /// `busy` swaps the action label for the processing text.
    pub fn new<A: UsersApi>(controller: &Controller<A>, busy: bool) -> Option<Self> {
        let mode = controller.mode();
        let (title, action) = match mode {
            Mode::View => return None,
            Mode::New => ("New User".to_string(), "Create"),
            Mode::Edit(user) => (format!("Edit User #{}", user.id), "Save"),
            Mode::Delete(user) => (format!("Delete User #{}", user.id), "Delete"),
        };
        let disabled = matches!(mode, Mode::Delete(_));
        let draft = controller.draft();
        let errors = controller.field_errors();

        let fields = [
            (Field::FirstName, "First Name", Some(NAME_MAX_CHARS)),
            (Field::LastName, "Last Name", Some(NAME_MAX_CHARS)),
            (Field::Email, "Email", None),
        ]
        .into_iter()
        .map(|(field, label, max_length)| FieldView {
            field,
            label,
            value: draft.value(field).to_string(),
            error: errors.get(field).map(str::to_string),
            required: true,
            max_length,
            disabled,
        })
        .collect();

        Some(Self {
            title,
            fields,
            active: draft.active,
            disabled,
            action: if busy { PROCESSING } else { action },
            danger: disabled,
            banner: controller.banner().map(str::to_string),
        })
    }
}
