//! Feed command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use murmur::{PostFilters, PostsStore};

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct FeedArgs {
    /// Full-text search over post bodies
    #[arg(long)]
    pub search: Option<String>,

    /// Only posts carrying this tag (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Center latitude for a location filter
    #[arg(long, requires = "longitude")]
    pub latitude: Option<f64>,

    /// Center longitude for a location filter
    #[arg(long, requires = "radius")]
    pub longitude: Option<f64>,

    /// Radius in kilometers around the center
    #[arg(long, requires = "latitude")]
    pub radius: Option<f64>,

    /// Number of pages to fetch
    #[arg(long, default_value_t = 1)]
    pub pages: u32,

    /// Output posts as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: FeedArgs, api_url: Option<&str>) -> Result<()> {
    let api = session::connect(api_url)?;
    let posts = PostsStore::new(api);

    let filters = PostFilters {
        search: args.search,
        tags: if args.tags.is_empty() {
            None
        } else {
            Some(args.tags)
        },
        latitude: args.latitude,
        longitude: args.longitude,
        radius: args.radius,
    };
    if !filters.is_empty() {
        posts.set_filters(filters);
    }

    posts.refresh_feed().await.context("Failed to fetch feed")?;
    for _ in 1..args.pages {
        if !posts.has_more() {
            break;
        }
        posts.load_more().await.context("Failed to fetch feed")?;
    }

    let feed = posts.posts();
    if feed.is_empty() {
        eprintln!("{}", "No posts found.".dimmed());
        return Ok(());
    }

    if args.json {
        for post in &feed {
            output::json(post)?;
        }
        return Ok(());
    }

    for post in &feed {
        output::post_summary(post);
        println!();
    }

    if posts.has_more() {
        eprintln!("{}", "More posts available; pass --pages to fetch more.".dimmed());
    }

    Ok(())
}
