//! Reddit post conversion and the collector-side ocean filter.

use chrono::{DateTime, Utc};

use super::reddit::Post;
use crate::relevance::is_ocean_related;
use crate::types::RawPost;

/// Convert a listing child into a [`RawPost`] if it is usable and ocean-related.
///
/// Posts without a title or permalink are dropped. The ocean filter runs on
/// `title + " " + selftext`; a missing self text falls back to the title for
/// the stored body.
pub(super) fn to_raw_post(post: &Post, community: &str) -> Option<RawPost> {
    let data = &post.data;
    let title = data
        .title
        .as_deref()
        .map(str::trim)
        .filter(|title| !title.is_empty())?;
    let permalink = data.permalink.as_deref()?;

    let selftext = data.selftext.as_deref().unwrap_or("");
    if !is_ocean_related(&format!("{title} {selftext}")) {
        return None;
    }

    let body = if selftext.is_empty() {
        title.to_string()
    } else {
        selftext.to_string()
    };
    let permalink = format!("https://reddit.com{permalink}");

    Some(RawPost {
        title: title.to_string(),
        body,
        author: data.author.clone().unwrap_or_default(),
        community: data
            .subreddit
            .clone()
            .unwrap_or_else(|| community.to_string()),
        score: data.score,
        comment_count: data.num_comments,
        created_at: data
            .created_utc
            .and_then(timestamp_from_secs)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        external_url: data.url.clone().unwrap_or_else(|| permalink.clone()),
        permalink,
    })
}

fn timestamp_from_secs(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let whole = secs.trunc() as i64;
    DateTime::from_timestamp(whole, 0)
}
