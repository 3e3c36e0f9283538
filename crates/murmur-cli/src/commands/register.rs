//! Register command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use murmur::RegisterCredentials;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Email address to register with
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,

    /// Public alias (a random one is generated when omitted)
    #[arg(long)]
    pub alias: Option<String>,
}

pub async fn run(args: RegisterArgs, api_url: Option<&str>) -> Result<()> {
    let api = session::connect(api_url)?;
    let auth = session::auth_store(&api);

    let mut credentials = RegisterCredentials::new(&args.email, &args.password);
    if let Some(alias) = args.alias {
        credentials = credentials.with_alias(alias);
    }

    eprintln!("{}", "Registering...".dimmed());

    let user = auth
        .register(credentials)
        .await
        .context("Failed to register")?;

    session::save_profile(&api, &auth).context("Failed to save profile")?;

    output::success("Registered and logged in");
    println!();
    output::field("Alias", &user.alias);
    output::field("Email", &user.email);
    output::field("User ID", &user.id);

    Ok(())
}
