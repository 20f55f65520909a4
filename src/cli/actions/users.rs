//! One-shot user commands, each driven through the console controller so
//! they share its validation and error reporting.

use crate::{
    client::{UsersApi, UsersClient},
    console::{
        controller::LOAD_FAILED,
        grid::{CONFIRM_MESSAGE, CONFIRM_TITLE, COLUMNS},
        render, session, Controller, FormView, GridView, Pager, Submission,
    },
    users::{Field, NewUser, UserId},
};
use anyhow::{anyhow, bail, Context, Result};
use std::io::{BufRead, Write};
use tracing::debug;

/// Field values for `update`; `None` keeps the current value.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Changes {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    List { page: usize, page_size: usize },
    Get { id: UserId },
    Create(NewUser),
    Update { id: UserId, changes: Changes },
    Delete { id: UserId, yes: bool },
    Console,
}

#[derive(Debug)]
pub struct Args {
    pub api_url: String,
    pub operation: Operation,
}

/// Execute a user action against the API at `args.api_url`.
/// # Errors
/// Returns an error if the request fails or the input is rejected.
pub async fn execute(args: Args) -> Result<()> {
    let client = UsersClient::new(&args.api_url)
        .with_context(|| format!("Invalid API URL: {}", args.api_url))?;
    debug!("using API at {}", client.base_url());

    if args.operation == Operation::Console {
        return session::run(client).await;
    }

    let mut controller = Controller::new(client);
    let mut stdout = std::io::stdout();
    let mut stdin = std::io::stdin().lock();
    perform(&mut controller, args.operation, &mut stdout, &mut stdin).await
}

/// Runs a single operation, writing results to `out`. `input` answers the
/// delete confirmation prompt.
///
/// # Errors
/// Returns an error describing the first failure.
pub async fn perform<A: UsersApi>(
    controller: &mut Controller<A>,
    operation: Operation,
    out: &mut impl Write,
    input: &mut impl BufRead,
) -> Result<()> {
    match operation {
        Operation::List { page, page_size } => {
            load(controller).await?;
            let mut pager = Pager::default();
            if !pager.set_page_size(page_size) {
                bail!("Invalid page size: {page_size}");
            }
            pager.go_to(page.saturating_sub(1), controller.users().len());
            write!(out, "{}", render::grid(&GridView::new(controller, &pager)))?;
        }
        Operation::Get { id } => {
            let user = controller.api().get(id).await?;
            let values = [
                user.id.to_string(),
                user.first_name,
                user.last_name,
                user.email,
                if user.active { "yes" } else { "no" }.to_string(),
            ];
            let width = COLUMNS.iter().map(|label| label.len()).max().unwrap_or(0);
            for (label, value) in COLUMNS.iter().zip(values) {
                writeln!(out, "{label:<width$}  {value}")?;
            }
        }
        Operation::Create(user) => {
            controller.enter_new();
            controller.set_first_name(user.first_name);
            controller.set_last_name(user.last_name);
            controller.set_email(user.email.clone());
            controller.set_active(user.active);
            submit(controller, out).await?;

            match controller.users().iter().find(|u| u.email == user.email) {
                Some(created) => writeln!(out, "Created user {}", created.id)?,
                None => writeln!(out, "Created user")?,
            }
        }
        Operation::Update { id, changes } => {
            select(controller, id).await?;
            controller.enter_edit()?;
            if let Some(value) = changes.first_name {
                controller.set_field(Field::FirstName, value);
            }
            if let Some(value) = changes.last_name {
                controller.set_field(Field::LastName, value);
            }
            if let Some(value) = changes.email {
                controller.set_field(Field::Email, value);
            }
            if let Some(active) = changes.active {
                controller.set_active(active);
            }
            submit(controller, out).await?;
            writeln!(out, "Updated user {id}")?;
        }
        Operation::Delete { id, yes } => {
            select(controller, id).await?;
            if !yes && !confirm(out, input)? {
                writeln!(out, "Cancelled")?;
                return Ok(());
            }
            controller.request_delete()?;
            match controller.confirm_delete().await {
                Submission::Completed => writeln!(out, "Deleted user {id}")?,
                _ => bail!(failure(controller)),
            }
        }
        Operation::Console => bail!("The console needs an interactive terminal"),
    }

    Ok(())
}

async fn load<A: UsersApi>(controller: &mut Controller<A>) -> Result<()> {
    if controller.load().await {
        Ok(())
    } else {
        Err(anyhow!(LOAD_FAILED))
    }
}

async fn select<A: UsersApi>(controller: &mut Controller<A>, id: UserId) -> Result<()> {
    load(controller).await?;
    controller.select(Some(id))?;
    if controller.selection().is_none() {
        bail!("User not found");
    }
    Ok(())
}

async fn submit<A: UsersApi>(controller: &mut Controller<A>, out: &mut impl Write) -> Result<()> {
    match controller.submit().await {
        Submission::Completed => Ok(()),
        _ => {
            if let Some(form) = FormView::new(controller, false) {
                write!(out, "{}", render::form(&form))?;
            }
            Err(anyhow!(failure(controller)))
        }
    }
}

fn failure<A: UsersApi>(controller: &Controller<A>) -> String {
    controller
        .field_errors()
        .first()
        .or_else(|| controller.banner())
        .unwrap_or("Request failed")
        .to_string()
}

fn confirm(out: &mut impl Write, input: &mut impl BufRead) -> Result<bool> {
    write!(out, "{CONFIRM_TITLE}: {CONFIRM_MESSAGE} [y/N] ")?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
