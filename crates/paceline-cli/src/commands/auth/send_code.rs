//! Verification code command implementation.

use anyhow::{Context, Result};
use clap::Args;

use paceline_core::model::VerificationChannel;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct SendCodeArgs {
    /// Send the code by SMS
    #[arg(long)]
    pub phone: Option<String>,

    /// Send the code by email
    #[arg(long)]
    pub email: Option<String>,
}

pub async fn run(ctx: &AppContext, args: SendCodeArgs) -> Result<()> {
    let channel = match (args.phone, args.email) {
        (Some(phone), _) => VerificationChannel::Phone(phone),
        (None, Some(email)) => VerificationChannel::Email(email),
        (None, None) => anyhow::bail!("One of --phone or --email is required"),
    };

    let response = ctx
        .client
        .auth()
        .send_verification_code(&channel)
        .await
        .context("Failed to send verification code")?;

    output::success(&response.message);
    // Development servers echo the code back.
    output::opt_field("Code", response.code.as_deref());

    Ok(())
}
