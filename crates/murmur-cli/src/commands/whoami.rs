//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(_args: WhoamiArgs, api_url: Option<&str>) -> Result<()> {
    let api = session::connect(api_url)?;
    let auth = session::auth_store(&api);

    let user = auth
        .current_user()
        .await
        .context("No active session. Run 'murmur login' first.")?;

    session::save_profile(&api, &auth).context("Failed to save profile")?;

    output::field("Alias", &user.alias);
    output::field("Email", &user.email);
    output::field("User ID", &user.id);
    output::field("Joined", &output::relative_time(&user.created_at));

    Ok(())
}
