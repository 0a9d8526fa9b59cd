//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Print the profile as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(ctx: &AppContext, args: WhoamiArgs) -> Result<()> {
    ctx.require_login()?;

    let user = ctx
        .client
        .auth()
        .me()
        .await
        .context("Failed to fetch profile")?;

    if args.json {
        return output::json_pretty(&user);
    }

    super::print_user(&user);
    output::field("API", ctx.client.api().as_str());

    Ok(())
}
