//! Post command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use murmur::{ImageUpload, NewPost, PostsStore};

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct PostArgs {
    /// Post text
    pub text: String,

    /// Attach an image file (repeatable)
    #[arg(long = "image")]
    pub images: Vec<PathBuf>,

    /// Tag the post (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Latitude to attach
    #[arg(long, requires = "longitude")]
    pub latitude: Option<f64>,

    /// Longitude to attach
    #[arg(long, requires = "latitude")]
    pub longitude: Option<f64>,
}

pub async fn run(args: PostArgs, api_url: Option<&str>) -> Result<()> {
    let api = session::connect(api_url)?;
    let user = session::resolve_user(&api).await?;

    let mut images = Vec::with_capacity(args.images.len());
    for path in &args.images {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read image {}", path.display()))?;
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .context("Image path has no usable file name")?;
        images.push(ImageUpload::new(filename, bytes));
    }

    let mut post = NewPost::new(&user.id, &args.text);
    if !args.tags.is_empty() {
        post.tags = Some(args.tags);
    }
    post.latitude = args.latitude;
    post.longitude = args.longitude;

    eprintln!("{}", "Posting...".dimmed());

    let posts = PostsStore::new(api);
    let created = posts
        .create_post(&post, images)
        .await
        .context("Failed to create post")?;

    output::success("Posted");
    output::field("Post ID", &created.id);

    Ok(())
}
