//! View-state controller for the users screen.
//!
//! Owns the in-memory list, the row selection, the current [`Mode`] and the
//! form draft. State changes only in response to user actions or completed
//! API calls; every failure is terminal for that attempt.

use crate::{
    client::{ClientError, UsersApi},
    users::{
        validate,
        validation::{check_email_incremental, check_name_incremental, EMAIL_EXISTS},
        Field, FieldErrors, NewUser, User, UserId,
    },
};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const LOAD_FAILED: &str = "Failed to load users";

/// Which panel is shown and what a submit does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    View,
    New,
    Edit(User),
    Delete(User),
}

impl Mode {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::New => "new",
            Self::Edit(_) => "edit",
            Self::Delete(_) => "delete",
        }
    }

    /// The user the form was opened for, if any.
    #[must_use]
    pub const fn target(&self) -> Option<&User> {
        match self {
            Self::Edit(user) | Self::Delete(user) => Some(user),
            Self::View | Self::New => None,
        }
    }
}

/// Unsaved form contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Draft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub active: bool,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            active: true,
        }
    }
}

impl Draft {
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            active: user.active,
        }
    }

    #[must_use]
    pub fn to_new_user(&self) -> NewUser {
        NewUser {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            active: self.active,
        }
    }

    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
        }
    }
}

/// Result of a submit or confirmed delete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
    /// The request succeeded and the controller is back in `View`.
    Completed,
    /// Client-side validation failed; nothing was sent.
    Blocked,
    /// The backend rejected the request; see the banner or field errors.
    Failed,
    /// Nothing to submit in the current state.
    Ignored,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControllerError {
    #[error("Select a user first")]
    NoSelection,
    #[error("Finish or leave the form first")]
    NotInView,
}

pub struct Controller<A> {
    api: A,
    users: Vec<User>,
    selection: Option<UserId>,
    mode: Mode,
    draft: Draft,
    field_errors: FieldErrors,
    banner: Option<String>,
    confirm_delete: bool,
}

impl<A: UsersApi> Controller<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            users: Vec::new(),
            selection: None,
            mode: Mode::View,
            draft: Draft::default(),
            field_errors: FieldErrors::default(),
            banner: None,
            confirm_delete: false,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn selection(&self) -> Option<UserId> {
        self.selection
    }

    pub fn selected_user(&self) -> Option<&User> {
        let id = self.selection?;
        self.users.iter().find(|user| user.id == id)
    }

    pub fn is_confirming_delete(&self) -> bool {
        self.confirm_delete
    }

    /// Fetches the full list. Returns `false` and sets the banner on failure,
    /// keeping whatever list was loaded before.
    pub async fn load(&mut self) -> bool {
        self.banner = None;
        match self.api.list().await {
            Ok(users) => {
                debug!("loaded {} users", users.len());
                self.users = users;
                if self.selected_user().is_none() {
                    self.selection = None;
                }
                true
            }
            Err(err) => {
                warn!("Failed to load users: {err}");
                self.banner = Some(LOAD_FAILED.to_string());
                false
            }
        }
    }

    /// Selects a row; ids not in the list clear the selection.
    ///
    /// # Errors
    /// Returns [`ControllerError::NotInView`] while a form is open.
    pub fn select(&mut self, id: Option<UserId>) -> Result<(), ControllerError> {
        self.ensure_view()?;
        self.selection = id.filter(|id| self.users.iter().any(|user| user.id == *id));
        self.confirm_delete = false;
        Ok(())
    }

    pub fn enter_new(&mut self) {
        self.open_form(Mode::New, Draft::default());
    }

    /// # Errors
    /// Returns [`ControllerError::NotInView`] while a form is open and
    /// [`ControllerError::NoSelection`] when no row is selected.
    pub fn enter_edit(&mut self) -> Result<(), ControllerError> {
        self.ensure_view()?;
        let user = self.selected_user().cloned().ok_or(ControllerError::NoSelection)?;
        let draft = Draft::from_user(&user);
        self.open_form(Mode::Edit(user), draft);
        Ok(())
    }

    /// # Errors
    /// Returns [`ControllerError::NotInView`] while a form is open and
    /// [`ControllerError::NoSelection`] when no row is selected.
    pub fn enter_delete(&mut self) -> Result<(), ControllerError> {
        self.ensure_view()?;
        let user = self.selected_user().cloned().ok_or(ControllerError::NoSelection)?;
        let draft = Draft::from_user(&user);
        self.open_form(Mode::Delete(user), draft);
        Ok(())
    }

    /// Leaves the form without touching the backend.
    pub fn back(&mut self) {
        self.return_to_view();
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        if !self.is_editable() {
            return;
        }
        let value = value.into();
        let message = match field {
            Field::FirstName | Field::LastName => check_name_incremental(field, &value),
            Field::Email => check_email_incremental(&value),
        };
        match field {
            Field::FirstName => self.draft.first_name = value,
            Field::LastName => self.draft.last_name = value,
            Field::Email => self.draft.email = value,
        }
        self.field_errors.set(field, message);
    }

    pub fn set_first_name(&mut self, value: impl Into<String>) {
        self.set_field(Field::FirstName, value);
    }

    pub fn set_last_name(&mut self, value: impl Into<String>) {
        self.set_field(Field::LastName, value);
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.set_field(Field::Email, value);
    }

    pub fn set_active(&mut self, active: bool) {
        if self.is_editable() {
            self.draft.active = active;
        }
    }

    /// Performs the action bound to the current mode.
    pub async fn submit(&mut self) -> Submission {
        match self.mode.clone() {
            Mode::View => Submission::Ignored,
            Mode::New => self.submit_new().await,
            Mode::Edit(user) => self.submit_edit(user.id).await,
            Mode::Delete(user) => self.remove(user.id).await,
        }
    }

    /// Opens the delete confirmation dialog for the selected row.
    ///
    /// # Errors
    /// Returns [`ControllerError::NotInView`] while a form is open and
    /// [`ControllerError::NoSelection`] when no row is selected.
    pub fn request_delete(&mut self) -> Result<(), ControllerError> {
        self.ensure_view()?;
        if self.selected_user().is_none() {
            return Err(ControllerError::NoSelection);
        }
        self.confirm_delete = true;
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_delete = false;
    }

    /// Deletes the selected row once the dialog has been confirmed.
    pub async fn confirm_delete(&mut self) -> Submission {
        if !self.confirm_delete || self.mode != Mode::View {
            return Submission::Ignored;
        }
        self.confirm_delete = false;
        match self.selection {
            Some(id) => self.remove(id).await,
            None => Submission::Ignored,
        }
    }

    fn ensure_view(&self) -> Result<(), ControllerError> {
        if self.mode == Mode::View {
            Ok(())
        } else {
            Err(ControllerError::NotInView)
        }
    }

    fn is_editable(&self) -> bool {
        matches!(self.mode, Mode::New | Mode::Edit(_))
    }

    fn open_form(&mut self, mode: Mode, draft: Draft) {
        debug!("entering {} mode", mode.name());
        self.mode = mode;
        self.draft = draft;
        self.field_errors = FieldErrors::default();
        self.banner = None;
        self.confirm_delete = false;
    }

    fn return_to_view(&mut self) {
        self.mode = Mode::View;
        self.selection = None;
        self.draft = Draft::default();
        self.field_errors = FieldErrors::default();
        self.banner = None;
        self.confirm_delete = false;
    }

    /// Authoritative check over the whole draft, including untouched fields.
    fn validate_draft(&mut self) -> bool {
        self.field_errors = validate(&self.draft.to_new_user());
        self.field_errors.is_empty()
    }

    async fn submit_new(&mut self) -> Submission {
        if !self.validate_draft() {
            return Submission::Blocked;
        }
        self.banner = None;

        match self.api.create(&self.draft.to_new_user()).await {
            Ok(created) => {
                info!(id = created.id, "user created");
                self.return_to_view();
                self.load().await;
                Submission::Completed
            }
            Err(ClientError::DuplicateEmail) => {
                self.field_errors.email = Some(EMAIL_EXISTS.to_string());
                Submission::Failed
            }
            Err(err) => {
                self.banner = Some(err.to_string());
                Submission::Failed
            }
        }
    }

    async fn submit_edit(&mut self, id: UserId) -> Submission {
        if !self.validate_draft() {
            return Submission::Blocked;
        }
        self.banner = None;

        let user = User::with_id(id, self.draft.to_new_user());
        match self.api.update(&user).await {
            Ok(_) => {
                info!(id, "user updated");
                self.return_to_view();
                self.load().await;
                Submission::Completed
            }
            Err(err) => {
                self.banner = Some(err.to_string());
                Submission::Failed
            }
        }
    }

    /// Deletes `id` and patches the local list instead of reloading it.
    async fn remove(&mut self, id: UserId) -> Submission {
        self.banner = None;

        match self.api.delete(id).await {
            Ok(()) => {
                info!(id, "user deleted");
                self.users.retain(|user| user.id != id);
                self.return_to_view();
                Submission::Completed
            }
            Err(err) => {
                self.banner = Some(err.to_string());
                Submission::Failed
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// In-memory [`UsersApi`] that records calls and can be told to fail.
    #[derive(Default)]
    pub(crate) struct FakeApi {
        pub users: Mutex<Vec<User>>,
        pub calls: Mutex<Vec<String>>,
        pub fail_list: bool,
        pub fail_update: bool,
        pub fail_delete: bool,
    }

    impl FakeApi {
        pub(crate) fn with_users(users: Vec<User>) -> Self {
            Self {
                users: Mutex::new(users),
                ..Self::default()
            }
        }

        fn record(&self, call: String) {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(call);
            }
        }

        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
        }
    }

    fn request_failed(message: &str) -> ClientError {
        ClientError::Request {
            status: 500,
            message: message.to_string(),
        }
    }

    impl UsersApi for FakeApi {
        async fn list(&self) -> Result<Vec<User>, ClientError> {
            self.record("list".to_string());
            if self.fail_list {
                return Err(request_failed("Failed to fetch users"));
            }
            Ok(self.users.lock().map(|users| users.clone()).unwrap_or_default())
        }

        async fn get(&self, id: UserId) -> Result<User, ClientError> {
            self.record(format!("get {id}"));
            self.users
                .lock()
                .ok()
                .and_then(|users| users.iter().find(|user| user.id == id).cloned())
                .ok_or(ClientError::NotFound)
        }

        async fn create(&self, user: &NewUser) -> Result<User, ClientError> {
            self.record(format!("create {}", user.email));
            let mut users = self
                .users
                .lock()
                .map_err(|_| request_failed("Failed to create user"))?;
            if users.iter().any(|existing| existing.email == user.email) {
                return Err(ClientError::DuplicateEmail);
            }
            let id = users.iter().map(|existing| existing.id).max().unwrap_or(0) + 1;
            let created = User::with_id(id, user.clone());
            users.push(created.clone());
            Ok(created)
        }

        async fn update(&self, user: &User) -> Result<User, ClientError> {
            self.record(format!("update {}", user.id));
            if self.fail_update {
                return Err(request_failed("Failed to update user"));
            }
            let mut users = self
                .users
                .lock()
                .map_err(|_| request_failed("Failed to update user"))?;
            let slot = users
                .iter_mut()
                .find(|existing| existing.id == user.id)
                .ok_or_else(|| request_failed("Failed to update user"))?;
            *slot = user.clone();
            Ok(user.clone())
        }

        async fn delete(&self, id: UserId) -> Result<(), ClientError> {
            self.record(format!("delete {id}"));
            if self.fail_delete {
                return Err(request_failed("Failed to delete user"));
            }
            if let Ok(mut users) = self.users.lock() {
                users.retain(|user| user.id != id);
            }
            Ok(())
        }
    }

    pub(crate) fn user(id: UserId, first: &str, email: &str) -> User {
        User {
            id,
            first_name: first.to_string(),
            last_name: "Tester".to_string(),
            email: email.to_string(),
            active: true,
        }
    }

    pub(crate) fn seeded() -> Vec<User> {
        vec![
            user(1, "Ada", "ada@example.com"),
            user(2, "Grace", "grace@example.com"),
            user(3, "Linus", "linus@example.com"),
        ]
    }

    async fn loaded(api: FakeApi) -> Controller<FakeApi> {
        let mut controller = Controller::new(api);
        assert!(controller.load().await);
        controller
    }

    fn fill(controller: &mut Controller<FakeApi>, first: &str, last: &str, email: &str) {
        controller.set_first_name(first);
        controller.set_last_name(last);
        controller.set_email(email);
    }

    #[tokio::test]
    async fn new_mode_starts_with_blank_active_draft() {
        let mut controller = loaded(FakeApi::with_users(seeded())).await;
        assert_eq!(controller.select(Some(2)), Ok(()));
        assert_eq!(controller.enter_edit(), Ok(()));
        controller.back();

        controller.enter_new();
        assert_eq!(controller.mode(), &Mode::New);
        assert_eq!(controller.draft(), &Draft::default());
        assert!(controller.draft().first_name.is_empty());
        assert!(controller.draft().last_name.is_empty());
        assert!(controller.draft().email.is_empty());
        assert!(controller.draft().active);

        controller.set_first_name("Someone");
        controller.enter_new();
        assert_eq!(controller.draft(), &Draft::default());
    }

    #[tokio::test]
    async fn duplicate_email_becomes_field_error_and_stays_in_new() {
        let existing = vec![user(1, "Dup", "dup@example.com")];
        let mut controller = loaded(FakeApi::with_users(existing)).await;

        controller.enter_new();
        fill(&mut controller, "Jane", "Doe", "dup@example.com");

        assert_eq!(controller.submit().await, Submission::Failed);
        assert_eq!(controller.mode(), &Mode::New);
        assert_eq!(
            controller.field_errors().email.as_deref(),
            Some("Email already exists")
        );
        assert_eq!(controller.banner(), None);
        assert_eq!(controller.draft().email, "dup@example.com");
    }

    #[tokio::test]
    async fn create_reloads_list_and_returns_to_view() {
        let mut controller = loaded(FakeApi::with_users(seeded())).await;

        controller.enter_new();
        fill(&mut controller, "Jane", "Doe", "jane@example.com");
        controller.set_active(false);

        assert_eq!(controller.submit().await, Submission::Completed);
        assert_eq!(controller.mode(), &Mode::View);
        assert_eq!(controller.selection(), None);
        assert_eq!(controller.users().len(), 4);
        assert!(controller
            .users()
            .iter()
            .any(|user| user.email == "jane@example.com" && !user.active));
        assert_eq!(
            controller.api().calls(),
            vec!["list", "create jane@example.com", "list"]
        );
    }

    #[tokio::test]
    async fn invalid_draft_blocks_submission() {
        let mut controller = loaded(FakeApi::with_users(seeded())).await;

        controller.enter_new();
        fill(&mut controller, "J", "", "not-an-email");

        assert_eq!(controller.submit().await, Submission::Blocked);
        assert_eq!(controller.mode(), &Mode::New);
        let errors = controller.field_errors();
        assert_eq!(
            errors.first_name.as_deref(),
            Some("First name must be at least 2 characters")
        );
        assert_eq!(errors.last_name.as_deref(), Some("Last name is required"));
        assert_eq!(
            errors.email.as_deref(),
            Some("Please enter a valid email address")
        );
        assert_eq!(controller.api().calls(), vec!["list"]);
    }

    #[tokio::test]
    async fn unchanged_invalid_legacy_record_is_rejected_on_edit() {
        let legacy = vec![user(5, "J", "legacy@example.com")];
        let mut controller = loaded(FakeApi::with_users(legacy)).await;

        assert_eq!(controller.select(Some(5)), Ok(()));
        assert_eq!(controller.enter_edit(), Ok(()));
        assert_eq!(controller.field_errors(), &FieldErrors::default());

        assert_eq!(controller.submit().await, Submission::Blocked);
        assert!(matches!(controller.mode(), Mode::Edit(user) if user.id == 5));
        assert_eq!(
            controller.field_errors().first_name.as_deref(),
            Some("First name must be at least 2 characters")
        );
        assert!(!controller
            .api()
            .calls()
            .iter()
            .any(|call| call.starts_with("update")));
    }

    #[tokio::test]
    async fn edit_updates_with_original_id() {
        let mut controller = loaded(FakeApi::with_users(seeded())).await;

        assert_eq!(controller.select(Some(2)), Ok(()));
        assert_eq!(controller.enter_edit(), Ok(()));
        assert_eq!(controller.draft().first_name, "Grace");
        controller.set_first_name("Gracie");

        assert_eq!(controller.submit().await, Submission::Completed);
        assert_eq!(controller.mode(), &Mode::View);
        assert_eq!(
            controller
                .users()
                .iter()
                .find(|user| user.id == 2)
                .map(|user| user.first_name.as_str()),
            Some("Gracie")
        );
    }

    #[tokio::test]
    async fn failed_update_sets_banner_and_stays_in_edit() {
        let api = FakeApi {
            fail_update: true,
            ..FakeApi::with_users(seeded())
        };
        let mut controller = loaded(api).await;

        assert_eq!(controller.select(Some(1)), Ok(()));
        assert_eq!(controller.enter_edit(), Ok(()));
        assert_eq!(controller.submit().await, Submission::Failed);
        assert_eq!(controller.banner(), Some("Failed to update user"));
        assert!(matches!(controller.mode(), Mode::Edit(_)));
    }

    #[tokio::test]
    async fn delete_mode_removes_exactly_that_user() {
        let mut controller = loaded(FakeApi::with_users(seeded())).await;

        assert_eq!(controller.select(Some(2)), Ok(()));
        assert_eq!(controller.enter_delete(), Ok(()));
        // The form is read-only in delete mode.
        controller.set_first_name("X");
        assert_eq!(controller.draft().first_name, "Grace");

        assert_eq!(controller.submit().await, Submission::Completed);
        assert_eq!(controller.mode(), &Mode::View);
        let ids: Vec<UserId> = controller.users().iter().map(|user| user.id).collect();
        assert_eq!(ids, vec![1, 3]);
        // The list is patched locally, not reloaded.
        assert_eq!(controller.api().calls(), vec!["list", "delete 2"]);
    }

    #[tokio::test]
    async fn delete_mode_skips_field_validation() {
        let legacy = vec![user(8, "J", "legacy@example.com")];
        let mut controller = loaded(FakeApi::with_users(legacy)).await;

        assert_eq!(controller.select(Some(8)), Ok(()));
        assert_eq!(controller.enter_delete(), Ok(()));
        assert_eq!(controller.submit().await, Submission::Completed);
        assert!(controller.users().is_empty());
    }

    #[tokio::test]
    async fn confirmed_grid_delete_patches_list() {
        let mut controller = loaded(FakeApi::with_users(seeded())).await;

        assert_eq!(
            controller.request_delete(),
            Err(ControllerError::NoSelection)
        );
        assert_eq!(controller.select(Some(3)), Ok(()));
        assert_eq!(controller.request_delete(), Ok(()));
        assert!(controller.is_confirming_delete());

        controller.cancel_delete();
        assert_eq!(controller.confirm_delete().await, Submission::Ignored);
        assert_eq!(controller.users().len(), 3);

        assert_eq!(controller.request_delete(), Ok(()));
        assert_eq!(controller.confirm_delete().await, Submission::Completed);
        let ids: Vec<UserId> = controller.users().iter().map(|user| user.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(controller.selection(), None);
        assert_eq!(controller.mode(), &Mode::View);
    }

    #[tokio::test]
    async fn failed_delete_keeps_list() {
        let api = FakeApi {
            fail_delete: true,
            ..FakeApi::with_users(seeded())
        };
        let mut controller = loaded(api).await;

        assert_eq!(controller.select(Some(1)), Ok(()));
        assert_eq!(controller.request_delete(), Ok(()));
        assert_eq!(controller.confirm_delete().await, Submission::Failed);
        assert_eq!(controller.users().len(), 3);
        assert_eq!(controller.banner(), Some("Failed to delete user"));
    }

    #[tokio::test]
    async fn load_failure_sets_banner() {
        let api = FakeApi {
            fail_list: true,
            ..FakeApi::default()
        };
        let mut controller = Controller::new(api);
        assert!(!controller.load().await);
        assert_eq!(controller.banner(), Some(LOAD_FAILED));
        assert!(controller.users().is_empty());
    }

    #[tokio::test]
    async fn back_has_no_side_effects() {
        let mut controller = loaded(FakeApi::with_users(seeded())).await;

        controller.enter_new();
        fill(&mut controller, "Jane", "Doe", "jane@example.com");
        controller.back();

        assert_eq!(controller.mode(), &Mode::View);
        assert_eq!(controller.draft(), &Draft::default());
        assert_eq!(controller.users().len(), 3);
        assert_eq!(controller.api().calls(), vec!["list"]);
    }

    #[tokio::test]
    async fn edit_and_delete_require_selection() {
        let mut controller = loaded(FakeApi::with_users(seeded())).await;

        assert_eq!(controller.enter_edit(), Err(ControllerError::NoSelection));
        assert_eq!(controller.enter_delete(), Err(ControllerError::NoSelection));

        assert_eq!(controller.select(Some(42)), Ok(()));
        assert_eq!(controller.selection(), None);
        assert_eq!(controller.mode(), &Mode::View);
    }

    #[tokio::test]
    async fn keystrokes_validate_incrementally() {
        let mut controller = loaded(FakeApi::with_users(seeded())).await;
        controller.enter_new();

        controller.set_first_name("J");
        assert_eq!(
            controller.field_errors().first_name.as_deref(),
            Some("First name must be at least 2 characters")
        );
        controller.set_first_name("Jo");
        assert_eq!(controller.field_errors().first_name, None);
        controller.set_first_name("");
        assert_eq!(controller.field_errors().first_name, None);

        controller.set_last_name("x".repeat(51));
        assert_eq!(
            controller.field_errors().last_name.as_deref(),
            Some("Last name cannot exceed 50 characters")
        );

        controller.set_email("jo@");
        assert_eq!(
            controller.field_errors().email.as_deref(),
            Some("Please enter a valid email address")
        );
        controller.set_email("jo@example.com");
        assert_eq!(controller.field_errors().email, None);
    }

    #[tokio::test]
    async fn list_actions_are_rejected_while_a_form_is_open() {
        let mut controller = loaded(FakeApi::with_users(seeded())).await;

        assert_eq!(controller.select(Some(2)), Ok(()));
        assert_eq!(controller.request_delete(), Ok(()));
        assert_eq!(controller.enter_edit(), Ok(()));
        assert!(!controller.is_confirming_delete());
        controller.set_first_name("Gracie");
        let edit = controller.mode().clone();
        let draft = controller.draft().clone();

        assert_eq!(controller.select(Some(3)), Err(ControllerError::NotInView));
        assert_eq!(controller.request_delete(), Err(ControllerError::NotInView));
        assert_eq!(controller.enter_edit(), Err(ControllerError::NotInView));
        assert_eq!(controller.enter_delete(), Err(ControllerError::NotInView));
        assert_eq!(controller.confirm_delete().await, Submission::Ignored);

        assert_eq!(controller.mode(), &edit);
        assert_eq!(controller.draft(), &draft);
        assert_eq!(controller.selection(), Some(2));
        assert_eq!(controller.users().len(), 3);
        assert_eq!(controller.api().calls(), vec!["list"]);
    }

    #[tokio::test]
    async fn new_and_delete_forms_reject_list_actions() {
        let mut controller = loaded(FakeApi::with_users(seeded())).await;

        controller.enter_new();
        controller.set_first_name("Jane");
        assert_eq!(controller.select(Some(1)), Err(ControllerError::NotInView));
        assert_eq!(controller.enter_delete(), Err(ControllerError::NotInView));
        assert_eq!(controller.enter_edit(), Err(ControllerError::NotInView));
        assert_eq!(controller.request_delete(), Err(ControllerError::NotInView));
        assert_eq!(controller.mode(), &Mode::New);
        assert_eq!(controller.draft().first_name, "Jane");
        assert_eq!(controller.selection(), None);

        controller.back();
        assert_eq!(controller.select(Some(1)), Ok(()));
        assert_eq!(controller.enter_delete(), Ok(()));
        assert_eq!(controller.select(Some(3)), Err(ControllerError::NotInView));
        assert_eq!(controller.enter_edit(), Err(ControllerError::NotInView));
        assert_eq!(controller.request_delete(), Err(ControllerError::NotInView));
        assert_eq!(controller.confirm_delete().await, Submission::Ignored);
        assert!(matches!(controller.mode(), Mode::Delete(user) if user.id == 1));
        assert_eq!(controller.draft().first_name, "Ada");
        assert_eq!(controller.users().len(), 3);
        assert_eq!(controller.api().calls(), vec!["list"]);
    }

    #[tokio::test]
    async fn submit_in_view_is_ignored() {
        let mut controller = loaded(FakeApi::with_users(seeded())).await;
        assert_eq!(controller.submit().await, Submission::Ignored);
        assert_eq!(controller.api().calls(), vec!["list"]);
    }
}
