use crate::console::grid::PAGE_SIZES;
use clap::{builder::ValueParser, Arg, ArgAction, Command};

pub const ARG_ID: &str = "id";
pub const ARG_PAGE: &str = "page";
pub const ARG_PAGE_SIZE: &str = "page-size";
pub const ARG_FIRST_NAME: &str = "first-name";
pub const ARG_LAST_NAME: &str = "last-name";
pub const ARG_EMAIL: &str = "email";
pub const ARG_INACTIVE: &str = "inactive";
pub const ARG_ACTIVE: &str = "active";
pub const ARG_YES: &str = "yes";

#[must_use]
pub fn validator_page_size() -> ValueParser {
    ValueParser::from(move |size: &str| -> std::result::Result<usize, String> {
        size.parse::<usize>()
            .ok()
            .filter(|size| PAGE_SIZES.contains(size))
            .ok_or_else(|| format!("page size must be one of {PAGE_SIZES:?}"))
    })
}

fn id_arg() -> Arg {
    Arg::new(ARG_ID)
        .help("User id")
        .required(true)
        .value_parser(clap::value_parser!(i64))
}

fn name_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).help(help)
}

#[must_use]
pub fn subcommands() -> Vec<Command> {
    vec![
        Command::new("list")
            .about("Show one page of users")
            .arg(
                Arg::new(ARG_PAGE)
                    .long("page")
                    .help("Page number, starting at 1")
                    .default_value("1")
                    .value_parser(clap::value_parser!(usize)),
            )
            .arg(
                Arg::new(ARG_PAGE_SIZE)
                    .long("page-size")
                    .help("Rows per page: 5, 10 or 25")
                    .default_value("5")
                    .value_parser(validator_page_size()),
            ),
        Command::new("get").about("Show one user").arg(id_arg()),
        Command::new("create")
            .about("Create a user")
            .arg(name_arg(ARG_FIRST_NAME, "First name").required(true))
            .arg(name_arg(ARG_LAST_NAME, "Last name").required(true))
            .arg(name_arg(ARG_EMAIL, "Email address").required(true))
            .arg(
                Arg::new(ARG_INACTIVE)
                    .long("inactive")
                    .help("Create the user as inactive")
                    .action(ArgAction::SetTrue),
            ),
        Command::new("update")
            .about("Change fields of an existing user")
            .arg(id_arg())
            .arg(name_arg(ARG_FIRST_NAME, "First name"))
            .arg(name_arg(ARG_LAST_NAME, "Last name"))
            .arg(name_arg(ARG_EMAIL, "Email address"))
            .arg(
                Arg::new(ARG_ACTIVE)
                    .long("active")
                    .help("Set the active flag")
                    .value_parser(clap::value_parser!(bool)),
            ),
        Command::new("delete")
            .about("Delete a user after confirmation")
            .arg(id_arg())
            .arg(
                Arg::new(ARG_YES)
                    .short('y')
                    .long("yes")
                    .help("Skip the confirmation prompt")
                    .action(ArgAction::SetTrue),
            ),
        Command::new("console").about("Interactive user management screen"),
    ]
}
