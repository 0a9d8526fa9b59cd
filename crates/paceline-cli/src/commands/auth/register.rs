//! Register command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use paceline_core::model::RegisterRequest;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Display name
    #[arg(long)]
    pub username: Option<String>,

    /// Mobile phone number (11 digits)
    #[arg(long, required_unless_present = "email")]
    pub phone: Option<String>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Password, at least 6 characters
    #[arg(long, env = "PACELINE_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// male, female or other
    #[arg(long)]
    pub gender: Option<String>,

    /// Birthday as YYYY-MM-DD
    #[arg(long)]
    pub birthday: Option<String>,

    /// Create the account without logging in
    #[arg(long)]
    pub no_login: bool,
}

pub async fn run(ctx: &AppContext, args: RegisterArgs) -> Result<()> {
    let no_login = args.no_login;
    let request = RegisterRequest {
        username: args.username,
        phone: args.phone,
        email: args.email,
        password: args.password,
        gender: args.gender,
        birthday: args.birthday,
        avatar: None,
    };

    eprintln!("{}", "Creating account...".dimmed());

    let auth = ctx.client.auth();
    let user = if no_login {
        auth.register(&request)
            .await
            .context("Failed to create account")?
    } else {
        let (user, _token) = auth
            .register_and_login(&request)
            .await
            .context("Failed to create account")?;
        user
    };

    output::success("Account created");
    println!();
    super::print_user(&user);
    if !no_login {
        output::field("Session", "logged in");
    }

    Ok(())
}
