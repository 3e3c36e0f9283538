//! Comments listing command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use murmur::CommentsStore;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct CommentsArgs {
    /// Post id
    pub post_id: String,

    /// Number of pages to fetch
    #[arg(long, default_value_t = 1)]
    pub pages: u32,

    /// Output comments as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: CommentsArgs, api_url: Option<&str>) -> Result<()> {
    let api = session::connect(api_url)?;
    let comments = CommentsStore::new(api);

    comments
        .refresh_thread(&args.post_id)
        .await
        .context("Failed to fetch comments")?;
    for _ in 1..args.pages {
        if !comments.has_more() {
            break;
        }
        comments
            .load_more(&args.post_id)
            .await
            .context("Failed to fetch comments")?;
    }

    let thread = comments.comments();
    if thread.is_empty() {
        eprintln!("{}", "No comments yet.".dimmed());
        return Ok(());
    }

    if args.json {
        for comment in &thread {
            output::json(comment)?;
        }
        return Ok(());
    }

    for comment in &thread {
        output::comment_line(comment);
        println!();
    }

    if comments.has_more() {
        eprintln!("{}", "More comments available; pass --pages to fetch more.".dimmed());
    }

    Ok(())
}
