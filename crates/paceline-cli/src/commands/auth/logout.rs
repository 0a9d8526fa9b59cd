//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub fn run(ctx: &AppContext, _args: LogoutArgs) -> Result<()> {
    if !ctx.session().is_logged_in() {
        output::hint("Not logged in.");
        return Ok(());
    }

    ctx.client
        .auth()
        .logout()
        .context("Failed to remove stored token")?;

    output::success("Logged out");
    Ok(())
}
