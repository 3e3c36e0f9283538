//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, api_url: Option<&str>) -> Result<()> {
    let api = session::connect(api_url)?;
    let auth = session::auth_store(&api);

    // Local only; the server is never told.
    auth.logout().await.context("Failed to clear session")?;
    session::clear_profile()?;

    output::success("Logged out");

    Ok(())
}
