//! Output formatting helpers.

use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::Colorize;
use murmur::{Comment, Post};
use serde::Serialize;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print one post as a feed entry.
pub fn post_summary(post: &Post) {
    println!(
        "{} {} {}",
        post.user_alias.bold(),
        "·".dimmed(),
        relative_time(&post.created_at).dimmed()
    );
    println!("{}", post.text);
    if !post.tags.is_empty() {
        let tags = post
            .tags
            .iter()
            .map(|tag| format!("#{tag}"))
            .collect::<Vec<_>>()
            .join(" ");
        println!("{}", tags.cyan());
    }
    let counts = format!(
        "↑{} ↓{} · {} comments",
        post.upvotes, post.downvotes, post.comment_count
    );
    println!("{}  {}", counts.dimmed(), post.id.dimmed());
}

/// Print one comment line of a thread.
pub fn comment_line(comment: &Comment) {
    println!(
        "  {} {} {}",
        comment.user_alias.bold(),
        "·".dimmed(),
        relative_time(&comment.created_at).dimmed()
    );
    println!("  {}", comment.text);
}

/// Format a timestamp as a coarse relative time such as `3 hours ago`.
pub fn relative_time(timestamp: &DateTime<Utc>) -> String {
    let seconds = (Utc::now() - *timestamp).num_seconds().max(0);
    if seconds < 60 {
        return format!("{seconds} seconds ago");
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return plural(minutes, "minute");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return plural(hours, "hour");
    }
    let days = hours / 24;
    if days < 30 {
        return plural(days, "day");
    }
    let months = days / 30;
    if months < 12 {
        return plural(months, "month");
    }
    plural(months / 12, "year")
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn relative_time_buckets() {
        let now = Utc::now();
        assert!(relative_time(&(now - Duration::seconds(5))).ends_with("seconds ago"));
        assert_eq!(relative_time(&(now - Duration::minutes(1))), "1 minute ago");
        assert_eq!(relative_time(&(now - Duration::minutes(5))), "5 minutes ago");
        assert_eq!(relative_time(&(now - Duration::hours(3))), "3 hours ago");
        assert_eq!(relative_time(&(now - Duration::days(2))), "2 days ago");
        assert_eq!(relative_time(&(now - Duration::days(65))), "2 months ago");
        assert_eq!(relative_time(&(now - Duration::days(800))), "2 years ago");
    }

    #[test]
    fn relative_time_clamps_future_timestamps() {
        let future = Utc::now() + Duration::minutes(10);
        assert_eq!(relative_time(&future), "0 seconds ago");
    }
}
