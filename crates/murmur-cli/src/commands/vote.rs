//! Vote command implementation.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use murmur::{PostsStore, VoteDirection};

use crate::output;
use crate::session;

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Direction {
    Up,
    Down,
}

impl From<Direction> for VoteDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => VoteDirection::Up,
            Direction::Down => VoteDirection::Down,
        }
    }
}

#[derive(Args, Debug)]
pub struct VoteArgs {
    /// Post id
    pub post_id: String,

    /// Vote direction
    #[arg(value_enum)]
    pub direction: Direction,
}

pub async fn run(args: VoteArgs, api_url: Option<&str>) -> Result<()> {
    let api = session::connect(api_url)?;
    let user = session::resolve_user(&api).await?;

    let posts = PostsStore::new(api);
    posts
        .vote(&args.post_id, &user.id, args.direction.into())
        .await
        .context("Failed to vote")?;

    output::success("Vote recorded");

    Ok(())
}
