//! Bind command implementation.

use anyhow::{Context, Result};
use clap::Args;

use paceline_core::model::BindRequest;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct BindArgs {
    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub wechat_openid: Option<String>,

    /// Code from 'paceline auth send-code'
    #[arg(long)]
    pub code: Option<String>,
}

pub async fn run(ctx: &AppContext, args: BindArgs) -> Result<()> {
    ctx.require_login()?;

    let request = BindRequest {
        phone: args.phone,
        email: args.email,
        wechat_openid: args.wechat_openid,
        verification_code: args.code,
    };

    let user = ctx
        .client
        .auth()
        .bind(&request)
        .await
        .context("Failed to bind account")?;

    output::success("Account bound");
    println!();
    super::print_user(&user);

    Ok(())
}
