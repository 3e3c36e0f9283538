//! Delete post command implementation.

use anyhow::{Context, Result};
use clap::Args;

use murmur::PostsStore;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct DeletePostArgs {
    /// Post id
    pub id: String,
}

pub async fn run(args: DeletePostArgs, api_url: Option<&str>) -> Result<()> {
    let api = session::connect(api_url)?;
    let user = session::resolve_user(&api).await?;

    let posts = PostsStore::new(api);
    posts
        .delete_post(&args.id, &user.id)
        .await
        .context("Failed to delete post")?;

    output::success("Deleted post");

    Ok(())
}
