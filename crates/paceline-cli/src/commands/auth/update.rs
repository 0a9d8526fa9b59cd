//! Profile update command implementation.

use anyhow::{Context, Result};
use clap::Args;

use paceline_core::model::UserUpdate;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[arg(long)]
    pub username: Option<String>,

    /// male, female or other
    #[arg(long)]
    pub gender: Option<String>,

    /// Birthday as YYYY-MM-DD
    #[arg(long)]
    pub birthday: Option<String>,

    /// Avatar image URL
    #[arg(long)]
    pub avatar: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub email: Option<String>,
}

pub async fn run(ctx: &AppContext, args: UpdateArgs) -> Result<()> {
    ctx.require_login()?;

    let update = UserUpdate {
        username: args.username,
        gender: args.gender,
        birthday: args.birthday,
        avatar: args.avatar,
        phone: args.phone,
        email: args.email,
    };

    let user = ctx
        .client
        .auth()
        .update_me(&update)
        .await
        .context("Failed to update profile")?;

    output::success("Profile updated");
    println!();
    super::print_user(&user);

    Ok(())
}
