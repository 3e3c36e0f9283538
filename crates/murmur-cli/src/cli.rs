//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{
    comment, comments, delete_comment, delete_post, feed, login, logout, post, register, show,
    vote, whoami,
};

/// Command line client for the murmur anonymous social feed.
#[derive(Parser, Debug)]
#[command(name = "murmur")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// API base URL (overrides MURMUR_API_URL and the stored profile)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account and log in
    Register(register::RegisterArgs),

    /// Log in with email and password
    Login(login::LoginArgs),

    /// Discard the local session
    Logout(logout::LogoutArgs),

    /// Display the logged-in user
    Whoami(whoami::WhoamiArgs),

    /// Browse the post feed
    Feed(feed::FeedArgs),

    /// Publish a post
    Post(post::PostArgs),

    /// Show a post and its comments
    Show(show::ShowArgs),

    /// Vote on a post
    Vote(vote::VoteArgs),

    /// Comment on a post
    Comment(comment::CommentArgs),

    /// List comments on a post
    Comments(comments::CommentsArgs),

    /// Delete one of your posts
    DeletePost(delete_post::DeletePostArgs),

    /// Delete one of your comments
    DeleteComment(delete_comment::DeleteCommentArgs),
}
