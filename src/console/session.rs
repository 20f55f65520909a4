//! Line-oriented interactive console driving the controller.

use super::{
    controller::{Controller, Mode, Submission},
    form::FormView,
    grid::{GridView, Pager, PAGE_SIZES},
    render,
};
use crate::{
    client::UsersApi,
    users::{Field, UserId},
};
use anyhow::Result;
use std::io::Write;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tracing::debug;

const NOT_EDITABLE: &str = "The form is not editable";

pub const HELP: &str = "\
list | reload            reload users from the server
select <id> | unselect   choose a row
next | prev              change page
page-size <5|10|25>      rows per page
new | edit | delete      open the form (delete is a read-only confirmation)
remove                   delete the selected row after confirmation
confirm | cancel         answer the delete confirmation
set <field> <value>      first-name, last-name, email
active <on|off>          toggle the active flag
submit | back            send or leave the form
help | quit";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reload,
    Select(UserId),
    Unselect,
    Next,
    Prev,
    PageSize(usize),
    New,
    Edit,
    Delete,
    Remove,
    Confirm,
    Cancel,
    Set(Field, String),
    Active(bool),
    Submit,
    Back,
    Help,
    Quit,
}

/// Parses one console line.
///
/// # Errors
/// Returns a message describing why the line was not understood.
pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    let command = match word.to_lowercase().as_str() {
        "list" | "reload" => Command::Reload,
        "select" => Command::Select(
            rest.parse()
                .map_err(|_| format!("Invalid user id: {rest}"))?,
        ),
        "unselect" => Command::Unselect,
        "next" => Command::Next,
        "prev" => Command::Prev,
        "page-size" => Command::PageSize(
            rest.parse()
                .map_err(|_| format!("Invalid page size: {rest}"))?,
        ),
        "new" => Command::New,
        "edit" => Command::Edit,
        "delete" => Command::Delete,
        "remove" => Command::Remove,
        "confirm" | "yes" => Command::Confirm,
        "cancel" | "no" => Command::Cancel,
        "set" => {
            let (name, value) = rest
                .split_once(char::is_whitespace)
                .map_or((rest, ""), |(name, value)| (name, value.trim()));
            Command::Set(parse_field(name)?, value.to_string())
        }
        "active" => Command::Active(parse_switch(rest)?),
        "submit" | "save" => Command::Submit,
        "back" => Command::Back,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "" => return Err("Type `help` for commands".to_string()),
        other => return Err(format!("Unknown command: {other}")),
    };

    Ok(command)
}

fn parse_field(name: &str) -> Result<Field, String> {
    match name.to_lowercase().replace('_', "-").as_str() {
        "first-name" | "firstname" | "first" => Ok(Field::FirstName),
        "last-name" | "lastname" | "last" => Ok(Field::LastName),
        "email" => Ok(Field::Email),
        other => Err(format!("Unknown field: {other}")),
    }
}

fn parse_switch(value: &str) -> Result<bool, String> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => Err(format!("Expected on or off, got: {other}")),
    }
}

/// Controller plus the list paging state.
pub struct Session<A> {
    controller: Controller<A>,
    pager: Pager,
}

impl<A: UsersApi> Session<A> {
    pub fn new(api: A) -> Self {
        Self {
            controller: Controller::new(api),
            pager: Pager::default(),
        }
    }

    pub fn controller(&self) -> &Controller<A> {
        &self.controller
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Whether the command talks to the backend, so a processing
    /// indicator should be shown first.
    #[must_use]
    pub fn is_remote(&self, command: &Command) -> bool {
        match command {
            Command::Reload => true,
            Command::Submit => !matches!(self.controller.mode(), Mode::View),
            Command::Confirm => self.controller.is_confirming_delete(),
            _ => false,
        }
    }

    fn is_editable(&self) -> bool {
        matches!(self.controller.mode(), Mode::New | Mode::Edit(_))
    }

    /// Applies a command and returns an optional note for the user.
    pub async fn apply(&mut self, command: Command) -> Option<String> {
        debug!(?command, mode = self.controller.mode().name(), "console command");
        let note = self.dispatch(command).await;
        self.pager.clamp(self.controller.users().len());
        note
    }

    async fn dispatch(&mut self, command: Command) -> Option<String> {
        let total = self.controller.users().len();

        match command {
            Command::Reload => {
                self.controller.load().await;
                None
            }
            Command::Select(id) => match self.controller.select(Some(id)) {
                Ok(()) => self
                    .controller
                    .selection()
                    .is_none()
                    .then(|| format!("No user with id {id}")),
                Err(err) => Some(err.to_string()),
            },
            Command::Unselect => self.controller.select(None).err().map(|err| err.to_string()),
            Command::Next => {
                self.pager.next(total);
                None
            }
            Command::Prev => {
                self.pager.prev(total);
                None
            }
            Command::PageSize(size) => (!self.pager.set_page_size(size))
                .then(|| format!("Page size must be one of {PAGE_SIZES:?}")),
            Command::New => {
                self.controller.enter_new();
                None
            }
            Command::Edit => self.controller.enter_edit().err().map(|err| err.to_string()),
            Command::Delete => self
                .controller
                .enter_delete()
                .err()
                .map(|err| err.to_string()),
            Command::Remove => self
                .controller
                .request_delete()
                .err()
                .map(|err| err.to_string()),
            Command::Confirm => match self.controller.confirm_delete().await {
                Submission::Ignored => Some("Nothing to confirm".to_string()),
                _ => None,
            },
            Command::Cancel => {
                self.controller.cancel_delete();
                None
            }
            Command::Set(field, value) => {
                if self.is_editable() {
                    self.controller.set_field(field, value);
                    None
                } else {
                    Some(NOT_EDITABLE.to_string())
                }
            }
            Command::Active(active) => {
                if self.is_editable() {
                    self.controller.set_active(active);
                    None
                } else {
                    Some(NOT_EDITABLE.to_string())
                }
            }
            Command::Submit => match self.controller.submit().await {
                Submission::Blocked => Some("Fix the highlighted fields".to_string()),
                Submission::Ignored => Some("Open a form first".to_string()),
                Submission::Completed | Submission::Failed => None,
            },
            Command::Back => {
                self.controller.back();
                None
            }
            Command::Help => Some(HELP.to_string()),
            Command::Quit => None,
        }
    }

    /// Renders the panel for the current mode.
    #[must_use]
    pub fn screen(&self) -> String {
        FormView::new(&self.controller, false).map_or_else(
            || render::grid(&GridView::new(&self.controller, &self.pager)),
            |form| render::form(&form),
        )
    }

    /// Renders the panel while a request is outstanding: an open form shows
    /// the processing label on its action button.
    #[must_use]
    pub fn busy_screen(&self) -> String {
        FormView::new(&self.controller, true)
            .map_or_else(render::processing, |form| render::form(&form))
    }
}

/// Runs the console on stdin/stdout until `quit` or end of input.
///
/// # Errors
/// Returns an error if stdin or stdout fail.
pub async fn run<A: UsersApi>(api: A) -> Result<()> {
    let mut session = Session::new(api);
    let mut stdout = std::io::stdout();

    writeln!(stdout, "{}", render::processing())?;
    session.controller.load().await;
    writeln!(stdout, "{}", session.screen())?;

    let mut lines = BufReader::new(stdin()).lines();
    loop {
        write!(stdout, "{}> ", session.controller.mode().name())?;
        stdout.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => command,
            Err(message) => {
                writeln!(stdout, "{message}")?;
                continue;
            }
        };

        if session.is_remote(&command) {
            writeln!(stdout, "{}", session.busy_screen())?;
        }
        let note = session.apply(command).await;
        writeln!(stdout, "{}", session.screen())?;
        if let Some(note) = note {
            writeln!(stdout, "{note}")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::controller::tests::{seeded, FakeApi};

    #[test]
    fn parses_commands() {
        assert_eq!(parse("list"), Ok(Command::Reload));
        assert_eq!(parse("  select 12 "), Ok(Command::Select(12)));
        assert_eq!(parse("page-size 10"), Ok(Command::PageSize(10)));
        assert_eq!(
            parse("set first-name Mary Ann"),
            Ok(Command::Set(Field::FirstName, "Mary Ann".to_string()))
        );
        assert_eq!(
            parse("set email"),
            Ok(Command::Set(Field::Email, String::new()))
        );
        assert_eq!(parse("active off"), Ok(Command::Active(false)));
        assert_eq!(parse("QUIT"), Ok(Command::Quit));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse("select abc").is_err());
        assert!(parse("set nickname Bob").is_err());
        assert!(parse("active maybe").is_err());
        assert!(parse("frobnicate").is_err());
        assert!(parse("").is_err());
    }

    #[tokio::test]
    async fn create_flow_through_commands() {
        let mut session = Session::new(FakeApi::with_users(seeded()));
        assert_eq!(session.apply(Command::Reload).await, None);

        assert_eq!(session.apply(Command::New).await, None);
        for line in [
            "set first-name Jane",
            "set last-name Doe",
            "set email jane@example.com",
        ] {
            let command = parse(line);
            assert!(command.is_ok());
            if let Ok(command) = command {
                assert_eq!(session.apply(command).await, None);
            }
        }
        assert!(session.is_remote(&Command::Submit));
        assert_eq!(session.apply(Command::Submit).await, None);

        assert_eq!(session.controller().mode(), &Mode::View);
        assert_eq!(session.controller().users().len(), 4);
        assert!(session.screen().contains("jane@example.com"));
    }

    #[tokio::test]
    async fn blocked_submit_reports_fields() {
        let mut session = Session::new(FakeApi::with_users(seeded()));
        session.apply(Command::New).await;
        assert_eq!(
            session.apply(Command::Submit).await,
            Some("Fix the highlighted fields".to_string())
        );
        assert!(session.screen().contains("First name is required"));
    }

    #[tokio::test]
    async fn remove_requires_confirmation() {
        let mut session = Session::new(FakeApi::with_users(seeded()));
        session.apply(Command::Reload).await;

        assert_eq!(
            session.apply(Command::Remove).await,
            Some("Select a user first".to_string())
        );
        session.apply(Command::Select(1)).await;
        session.apply(Command::Remove).await;
        assert!(session.screen().contains("Are you sure you want to delete this user?"));
        assert!(session.is_remote(&Command::Confirm));

        session.apply(Command::Confirm).await;
        assert_eq!(session.controller().users().len(), 2);
        assert!(!session.screen().contains("ada@example.com"));
    }

    #[tokio::test]
    async fn delete_form_is_not_editable() {
        let mut session = Session::new(FakeApi::with_users(seeded()));
        session.apply(Command::Reload).await;
        session.apply(Command::Select(2)).await;
        session.apply(Command::Delete).await;

        assert_eq!(
            session
                .apply(Command::Set(Field::FirstName, "Other".to_string()))
                .await,
            Some("The form is not editable".to_string())
        );
        assert_eq!(
            session.apply(Command::Active(false)).await,
            Some("The form is not editable".to_string())
        );
        assert!(session.screen().contains("(read-only)"));
        assert!(session.screen().contains("Active: on"));
    }

    #[tokio::test]
    async fn active_toggle_needs_an_open_form() {
        let mut session = Session::new(FakeApi::with_users(seeded()));
        session.apply(Command::Reload).await;

        assert_eq!(
            session.apply(Command::Active(false)).await,
            Some("The form is not editable".to_string())
        );

        session.apply(Command::New).await;
        assert_eq!(session.apply(Command::Active(false)).await, None);
        assert!(!session.controller().draft().active);
    }

    #[tokio::test]
    async fn open_edit_form_ignores_list_commands() {
        let mut session = Session::new(FakeApi::with_users(seeded()));
        session.apply(Command::Reload).await;
        session.apply(Command::Select(2)).await;
        session.apply(Command::Edit).await;
        session
            .apply(Command::Set(Field::FirstName, "Gracie".to_string()))
            .await;

        let not_in_view = Some("Finish or leave the form first".to_string());
        assert_eq!(session.apply(Command::Select(3)).await, not_in_view);
        assert_eq!(session.apply(Command::Remove).await, not_in_view);
        assert_eq!(
            session.apply(Command::Confirm).await,
            Some("Nothing to confirm".to_string())
        );
        assert_eq!(session.apply(Command::Unselect).await, not_in_view);

        assert!(matches!(session.controller().mode(), Mode::Edit(user) if user.id == 2));
        assert_eq!(session.controller().draft().first_name, "Gracie");
        assert_eq!(session.controller().users().len(), 3);
        assert!(!session
            .controller()
            .api()
            .calls()
            .iter()
            .any(|call| call.starts_with("delete")));
    }

    #[tokio::test]
    async fn new_form_cannot_jump_to_delete() {
        let mut session = Session::new(FakeApi::with_users(seeded()));
        session.apply(Command::Reload).await;
        session.apply(Command::New).await;

        let not_in_view = Some("Finish or leave the form first".to_string());
        assert_eq!(session.apply(Command::Select(1)).await, not_in_view);
        assert_eq!(session.apply(Command::Delete).await, not_in_view);
        assert_eq!(session.apply(Command::Edit).await, not_in_view);
        assert_eq!(session.controller().mode(), &Mode::New);
        assert_eq!(session.controller().selection(), None);
    }

    #[tokio::test]
    async fn busy_screen_marks_the_pending_action() {
        let mut session = Session::new(FakeApi::with_users(seeded()));
        assert_eq!(session.busy_screen(), render::processing());

        session.apply(Command::Reload).await;
        session.apply(Command::New).await;
        assert!(session.is_remote(&Command::Submit));

        let busy = session.busy_screen();
        assert!(busy.contains("== New User =="));
        assert!(busy.contains("[Processing...] [Back]"));
        assert!(session.screen().contains("[Create] [Back]"));
    }

    #[tokio::test]
    async fn removing_rows_keeps_the_page_in_range() {
        let users = (1..=6)
            .map(|id| {
                crate::console::controller::tests::user(id, "Name", &format!("u{id}@example.com"))
            })
            .collect();
        let mut session = Session::new(FakeApi::with_users(users));
        session.apply(Command::Reload).await;
        session.apply(Command::Next).await;
        assert_eq!(session.pager().page(), 1);

        session.apply(Command::Select(6)).await;
        session.apply(Command::Remove).await;
        session.apply(Command::Confirm).await;
        assert_eq!(session.controller().users().len(), 5);
        assert_eq!(session.pager().page(), 0);
        assert!(session.screen().contains("page 1/1"));

        session.apply(Command::Prev).await;
        assert_eq!(session.pager().page(), 0);
    }

    #[tokio::test]
    async fn paging_commands_move_between_pages() {
        let users = (1..=7)
            .map(|id| {
                crate::console::controller::tests::user(id, "Name", &format!("u{id}@example.com"))
            })
            .collect();
        let mut session = Session::new(FakeApi::with_users(users));
        session.apply(Command::Reload).await;

        assert!(session.screen().contains("page 1/2"));
        session.apply(Command::Next).await;
        assert_eq!(session.pager().page(), 1);
        assert!(session.screen().contains("u7@example.com"));

        assert!(session.apply(Command::PageSize(7)).await.is_some());
        assert_eq!(session.apply(Command::PageSize(10)).await, None);
        assert!(session.screen().contains("page 1/1"));
    }
}
