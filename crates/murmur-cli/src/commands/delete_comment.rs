//! Delete comment command implementation.

use anyhow::{Context, Result};
use clap::Args;

use murmur::CommentsStore;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct DeleteCommentArgs {
    /// Comment id
    pub id: String,
}

pub async fn run(args: DeleteCommentArgs, api_url: Option<&str>) -> Result<()> {
    let api = session::connect(api_url)?;
    let user = session::resolve_user(&api).await?;

    let comments = CommentsStore::new(api);
    comments
        .delete_comment(&args.id, &user.id)
        .await
        .context("Failed to delete comment")?;

    output::success("Deleted comment");

    Ok(())
}
