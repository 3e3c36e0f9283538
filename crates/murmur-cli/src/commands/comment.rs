//! Comment command implementation.

use anyhow::{Context, Result};
use clap::Args;

use murmur::{CommentsStore, NewComment};

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct CommentArgs {
    /// Post id
    pub post_id: String,

    /// Comment text
    pub text: String,
}

pub async fn run(args: CommentArgs, api_url: Option<&str>) -> Result<()> {
    let api = session::connect(api_url)?;
    let user = session::resolve_user(&api).await?;

    let comments = CommentsStore::new(api);
    let created = comments
        .create_comment(&NewComment::new(&args.post_id, &user.id, &args.text))
        .await
        .context("Failed to comment")?;

    output::success("Comment added");
    output::field("Comment ID", &created.id);

    Ok(())
}
