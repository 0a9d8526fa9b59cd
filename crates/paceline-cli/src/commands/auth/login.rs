//! Login command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;

use paceline_core::Credentials;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Phone number to log in with
    #[arg(long, conflicts_with_all = ["email", "wechat_openid"])]
    pub phone: Option<String>,

    /// Email address to log in with
    #[arg(long, conflicts_with = "wechat_openid")]
    pub email: Option<String>,

    /// WeChat OpenID (no password needed)
    #[arg(long)]
    pub wechat_openid: Option<String>,

    /// Account password
    #[arg(long, env = "PACELINE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl LoginArgs {
    fn credentials(&self) -> Result<Credentials> {
        let password = || {
            self.password
                .clone()
                .context("--password is required for phone and email login")
        };

        match (&self.phone, &self.email, &self.wechat_openid) {
            (Some(phone), _, _) => Ok(Credentials::phone(phone, password()?)),
            (_, Some(email), _) => Ok(Credentials::email(email, password()?)),
            (_, _, Some(openid)) => Ok(Credentials::wechat(openid)),
            _ => bail!("One of --phone, --email or --wechat-openid is required"),
        }
    }
}

pub async fn run(ctx: &AppContext, args: LoginArgs) -> Result<()> {
    let credentials = args.credentials()?;

    eprintln!("{}", "Logging in...".dimmed());

    let token = ctx
        .client
        .auth()
        .login(&credentials)
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    output::field("Login", credentials.identifier().value());
    output::field("API", ctx.client.api().as_str());
    output::field("Expires in", &format!("{}s", token.expires_in));

    Ok(())
}
