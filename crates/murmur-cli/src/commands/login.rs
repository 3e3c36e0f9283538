//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use murmur::LoginCredentials;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Email address to log in with
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

pub async fn run(args: LoginArgs, api_url: Option<&str>) -> Result<()> {
    let api = session::connect(api_url)?;
    let auth = session::auth_store(&api);

    let credentials = LoginCredentials::new(&args.email, &args.password);

    eprintln!("{}", "Logging in...".dimmed());

    let user = auth.login(&credentials).await.context("Failed to login")?;

    session::save_profile(&api, &auth).context("Failed to save profile")?;

    output::success("Logged in successfully");
    println!();
    output::field("Alias", &user.alias);
    output::field("User ID", &user.id);

    Ok(())
}
