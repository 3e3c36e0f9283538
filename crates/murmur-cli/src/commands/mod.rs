//! Command implementations.

pub mod comment;
pub mod comments;
pub mod delete_comment;
pub mod delete_post;
pub mod feed;
pub mod login;
pub mod logout;
pub mod post;
pub mod register;
pub mod show;
pub mod vote;
pub mod whoami;

use anyhow::Result;

use crate::cli::Commands;

pub async fn handle(command: Commands, api_url: Option<&str>) -> Result<()> {
    match command {
        Commands::Register(args) => register::run(args, api_url).await,
        Commands::Login(args) => login::run(args, api_url).await,
        Commands::Logout(args) => logout::run(args, api_url).await,
        Commands::Whoami(args) => whoami::run(args, api_url).await,
        Commands::Feed(args) => feed::run(args, api_url).await,
        Commands::Post(args) => post::run(args, api_url).await,
        Commands::Show(args) => show::run(args, api_url).await,
        Commands::Vote(args) => vote::run(args, api_url).await,
        Commands::Comment(args) => comment::run(args, api_url).await,
        Commands::Comments(args) => comments::run(args, api_url).await,
        Commands::DeletePost(args) => delete_post::run(args, api_url).await,
        Commands::DeleteComment(args) => delete_comment::run(args, api_url).await,
    }
}
