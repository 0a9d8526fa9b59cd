//! Account subcommands.

mod bind;
mod login;
mod logout;
mod register;
mod send_code;
mod update;
mod whoami;

use anyhow::Result;
use clap::{Args, Subcommand};

use paceline_core::model::User;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Create an account and log in
    Register(register::RegisterArgs),

    /// Log in and store the token
    Login(login::LoginArgs),

    /// Forget the stored token
    Logout(logout::LogoutArgs),

    /// Show the logged-in user
    Whoami(whoami::WhoamiArgs),

    /// Change profile fields
    Update(update::UpdateArgs),

    /// Attach a phone number, email address or WeChat account
    Bind(bind::BindArgs),

    /// Send a one-time verification code
    SendCode(send_code::SendCodeArgs),
}

pub async fn handle(ctx: &AppContext, cmd: AuthCommand) -> Result<()> {
    match cmd.command {
        AuthSubcommand::Register(args) => register::run(ctx, args).await,
        AuthSubcommand::Login(args) => login::run(ctx, args).await,
        AuthSubcommand::Logout(args) => logout::run(ctx, args),
        AuthSubcommand::Whoami(args) => whoami::run(ctx, args).await,
        AuthSubcommand::Update(args) => update::run(ctx, args).await,
        AuthSubcommand::Bind(args) => bind::run(ctx, args).await,
        AuthSubcommand::SendCode(args) => send_code::run(ctx, args).await,
    }
}

/// Print the profile fields that are set.
fn print_user(user: &User) {
    output::opt_field("ID", user.id.as_deref());
    output::opt_field("Username", user.username.as_deref());
    output::opt_field("Phone", user.phone.as_deref());
    output::opt_field("Email", user.email.as_deref());
    output::opt_field("WeChat", user.wechat_openid.as_deref());
    output::opt_field("Gender", user.gender.as_deref());
    output::opt_field("Birthday", user.birthday.as_deref());
    output::opt_field(
        "Created",
        user.created_at.as_ref().map(output::timestamp),
    );
    if !user.is_active {
        output::field("Status", "inactive");
    }
}
