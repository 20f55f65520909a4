use clap::{Arg, Command};

pub const ARG_PORT: &str = "port";
pub const ARG_DSN: &str = "dsn";
pub const ARG_FRONTEND_ORIGIN: &str = "frontend-origin";

#[must_use]
pub fn subcommand() -> Command {
    Command::new("server")
        .about("Serve the users REST API")
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("USERMGMT_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_DSN)
                .short('d')
                .long("dsn")
                .help("Database connection string")
                .long_help(
                    "PostgreSQL connection string. Without it users are kept in memory and lost on exit.",
                )
                .env("USERMGMT_DSN")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_FRONTEND_ORIGIN)
                .long("frontend-origin")
                .help("Origin allowed by CORS")
                .default_value("http://localhost:3000")
                .env("USERMGMT_FRONTEND_ORIGIN"),
        )
}
