//! Show command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use murmur::{CommentsStore, PostsStore};

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Post id
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ShowArgs, api_url: Option<&str>) -> Result<()> {
    let api = session::connect(api_url)?;
    let posts = PostsStore::new(api.clone());
    let comments = CommentsStore::new(api);

    let post = posts.post(&args.id).await.context("Failed to fetch post")?;

    comments
        .refresh_thread(&args.id)
        .await
        .context("Failed to fetch comments")?;
    while comments.has_more() {
        comments
            .load_more(&args.id)
            .await
            .context("Failed to fetch comments")?;
    }
    let thread = comments.comments();

    if args.json {
        output::json_pretty(&serde_json::json!({
            "post": post,
            "comments": thread,
        }))?;
        return Ok(());
    }

    output::post_summary(&post);

    if thread.is_empty() {
        eprintln!("{}", "No comments yet.".dimmed());
        return Ok(());
    }

    println!();
    for comment in &thread {
        output::comment_line(comment);
    }

    Ok(())
}
