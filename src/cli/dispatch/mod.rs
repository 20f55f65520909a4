//! Maps parsed arguments to the [`Action`] the binary executes.

use crate::{
    cli::{
        actions::{
            server,
            users::{self, Changes, Operation},
            Action,
        },
        commands::{server as server_args, users as user_args, ARG_API_URL},
    },
    client::DEFAULT_API_URL,
    users::NewUser,
};
use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;

fn string(matches: &ArgMatches, id: &str) -> Option<String> {
    matches.get_one::<String>(id).cloned()
}

fn required(matches: &ArgMatches, id: &str) -> Result<String> {
    string(matches, id).with_context(|| format!("missing required argument: --{id}"))
}

fn user_id(matches: &ArgMatches) -> Result<i64> {
    matches
        .get_one::<i64>(user_args::ARG_ID)
        .copied()
        .context("missing required argument: <id>")
}

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let api_url = string(matches, ARG_API_URL).unwrap_or_else(|| DEFAULT_API_URL.to_string());

    let operation = match matches.subcommand() {
        Some(("server", sub_m)) => {
            return Ok(Action::Server(server::Args {
                port: sub_m
                    .get_one::<u16>(server_args::ARG_PORT)
                    .copied()
                    .unwrap_or(8080),
                dsn: string(sub_m, server_args::ARG_DSN).map(SecretString::from),
                frontend_origin: required(sub_m, server_args::ARG_FRONTEND_ORIGIN)?,
            }));
        }
        Some(("list", sub_m)) => Operation::List {
            page: sub_m
                .get_one::<usize>(user_args::ARG_PAGE)
                .copied()
                .unwrap_or(1),
            page_size: sub_m
                .get_one::<usize>(user_args::ARG_PAGE_SIZE)
                .copied()
                .unwrap_or(5),
        },
        Some(("get", sub_m)) => Operation::Get {
            id: user_id(sub_m)?,
        },
        Some(("create", sub_m)) => Operation::Create(NewUser {
            first_name: required(sub_m, user_args::ARG_FIRST_NAME)?,
            last_name: required(sub_m, user_args::ARG_LAST_NAME)?,
            email: required(sub_m, user_args::ARG_EMAIL)?,
            active: !sub_m.get_flag(user_args::ARG_INACTIVE),
        }),
        Some(("update", sub_m)) => Operation::Update {
            id: user_id(sub_m)?,
            changes: Changes {
                first_name: string(sub_m, user_args::ARG_FIRST_NAME),
                last_name: string(sub_m, user_args::ARG_LAST_NAME),
                email: string(sub_m, user_args::ARG_EMAIL),
                active: sub_m.get_one::<bool>(user_args::ARG_ACTIVE).copied(),
            },
        },
        Some(("delete", sub_m)) => Operation::Delete {
            id: user_id(sub_m)?,
            yes: sub_m.get_flag(user_args::ARG_YES),
        },
        Some(("console", _)) => Operation::Console,
        Some((name, _)) => return Err(anyhow!("unknown command: {name}")),
        None => return Err(anyhow!("missing command")),
    };

    Ok(Action::Users(users::Args { api_url, operation }))
}
