//! Derived dashboard sections computed from one filtered post set.
//!
//! Every function here is pure: the same posts, reports, and `now` always
//! produce the same output.

use std::sync::LazyLock;

use chrono::{DateTime, Duration, Utc};
use oceanguard_core::LocalReport;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use regex::Regex;

use crate::keywords::{
    derive_emerging_threats, extract_top_keywords, DEFAULT_KEYWORD_LIMIT, OCEAN_VOCABULARY,
};
use crate::scorer::score_batch;
use crate::types::{
    HighImpactPost, Influencer, MentionVolumePoint, PlatformMentions, RawPost,
    SocialMediaAnalytics,
};

pub const VOLUME_WEEKS: i64 = 4;

// Chart scaling constants, not unit conversions.
const POST_MENTION_SCALE: u64 = 100;
const REPORT_MENTION_SCALE: u64 = 50;
const REDDIT_PLATFORM_SCALE: u64 = 50;
const LOCAL_PLATFORM_SCALE: u64 = 10;

const HIGH_IMPACT_LIMIT: usize = 4;
const INFLUENCER_LIMIT: usize = 4;
const EXCLUDED_AUTHORS: &[&str] = &["[deleted]", "AutoModerator"];

static IMAGE_EXTENSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(jpg|jpeg|png|gif|webp)$").expect("valid regex"));
const IMAGE_HOSTS: &[&str] = &["i.redd.it", "i.imgur.com"];

/// Fallback influencers shown when fewer than four real authors qualify.
const DEFAULT_INFLUENCERS: &[(&str, &str, &str, &str)] = &[
    (
        "Ocean Conservancy",
        "@OceanConservancy",
        "https://picsum.photos/seed/inf1/40/40",
        "2.1M",
    ),
    (
        "National Geographic",
        "@NatGeo",
        "https://picsum.photos/seed/inf2/40/40",
        "280M",
    ),
    (
        "Greenpeace",
        "@Greenpeace",
        "https://picsum.photos/seed/inf3/40/40",
        "3.5M",
    ),
    (
        "Dr. Ayana Johnson",
        "@ayanaeliza",
        "https://picsum.photos/seed/inf4/40/40",
        "150K",
    ),
];

fn in_window(at: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    at >= start && at < end
}

/// Four consecutive 7-day windows ending at `now`, oldest first.
///
/// Week `N` covers `[now - (4-N+1)*7d, now - (4-N)*7d)`. Empty weeks
/// yield `mentions: 0`.
#[must_use]
pub fn mention_volume(
    posts: &[RawPost],
    reports: &[LocalReport],
    now: DateTime<Utc>,
) -> Vec<MentionVolumePoint> {
    (0..VOLUME_WEEKS)
        .rev()
        .map(|weeks_back| {
            let end = now - Duration::days(weeks_back * 7);
            let start = end - Duration::days(7);

            let week_posts = posts
                .iter()
                .filter(|post| in_window(post.created_at, start, end))
                .count() as u64;
            let week_reports = reports
                .iter()
                .filter(|report| in_window(report.created_at, start, end))
                .count() as u64;

            MentionVolumePoint {
                period: format!("Week {}", VOLUME_WEEKS - weeks_back),
                mentions: week_posts * POST_MENTION_SCALE + week_reports * REPORT_MENTION_SCALE,
            }
        })
        .collect()
}

/// Per-platform mention counts.
///
/// Only Reddit and the local platform are measured. Twitter and Facebook are
/// illustrative estimates at 30% and 20% of the Reddit figure.
#[must_use]
pub fn platform_breakdown(post_count: usize, report_count: usize) -> Vec<PlatformMentions> {
    let reddit = post_count as u64 * REDDIT_PLATFORM_SCALE;
    let local = report_count as u64 * LOCAL_PLATFORM_SCALE;

    vec![
        PlatformMentions {
            name: "Reddit".to_string(),
            value: reddit,
        },
        PlatformMentions {
            name: "OceanGuard".to_string(),
            value: local,
        },
        PlatformMentions {
            name: "Twitter".to_string(),
            value: reddit * 3 / 10,
        },
        PlatformMentions {
            name: "Facebook".to_string(),
            value: reddit * 2 / 10,
        },
    ]
}

/// Direct image link when the post points at one, otherwise a placeholder
/// seeded by the first five characters of the title.
#[must_use]
pub fn image_url_for(post: &RawPost) -> String {
    let url = post.external_url.as_str();
    if !url.is_empty()
        && (IMAGE_EXTENSION_RE.is_match(url) || IMAGE_HOSTS.iter().any(|host| url.contains(host)))
    {
        return url.to_string();
    }

    let seed: String = post.title.chars().take(5).collect();
    format!(
        "https://picsum.photos/seed/{}/400/300",
        utf8_percent_encode(&seed, NON_ALPHANUMERIC)
    )
}

/// `value / divisor` to one decimal place, exact halves rounded away from zero.
///
/// Only quotients of the form `k.25` / `k.75` are exact halves in binary;
/// every other quotient is formatted from its nearest `f64`.
pub(crate) fn one_decimal(value: i64, divisor: i64) -> String {
    let quarters = value.saturating_mul(4);
    if quarters % divisor == 0 && (quarters / divisor) % 2 != 0 {
        let tenths = (value.unsigned_abs() * 20 + divisor.unsigned_abs())
            / (2 * divisor.unsigned_abs());
        let sign = if value < 0 { "-" } else { "" };
        return format!("{sign}{}.{}", tenths / 10, tenths % 10);
    }
    #[allow(clippy::cast_precision_loss)]
    let quotient = value as f64 / divisor as f64;
    format!("{quotient:.1}")
}

fn thousands(value: i64) -> String {
    format!("{}K", one_decimal(value, 1000))
}

/// The four highest-scoring posts, formatted for the dashboard cards.
#[must_use]
pub fn high_impact_posts(posts: &[RawPost]) -> Vec<HighImpactPost> {
    let mut ranked: Vec<&RawPost> = posts.iter().collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));

    ranked
        .into_iter()
        .take(HIGH_IMPACT_LIMIT)
        .map(|post| HighImpactPost {
            platform: "Reddit".to_string(),
            text: format!("\"{}\" - r/{}", post.title, post.community),
            engagement: format!(
                "{} upvotes, {} comments",
                thousands(post.score),
                post.comment_count
            ),
            url: post.permalink.clone(),
            image_url: image_url_for(post),
        })
        .collect()
}

/// Authors ranked by cumulative post score, padded with defaults up to four.
///
/// Deleted and automated accounts never rank. Ties keep first-seen order.
#[must_use]
pub fn top_influencers(posts: &[RawPost]) -> Vec<Influencer> {
    let mut totals: Vec<(&str, i64)> = Vec::new();
    for post in posts {
        let author = post.author.as_str();
        if author.is_empty() || EXCLUDED_AUTHORS.contains(&author) {
            continue;
        }
        match totals.iter_mut().find(|(name, _)| *name == author) {
            Some((_, total)) => *total += post.score,
            None => totals.push((author, post.score)),
        }
    }
    totals.sort_by(|a, b| b.1.cmp(&a.1));

    let mut influencers: Vec<Influencer> = totals
        .into_iter()
        .take(INFLUENCER_LIMIT)
        .map(|(author, score)| Influencer {
            name: author.to_string(),
            handle: format!("u/{author}"),
            avatar: format!("https://www.reddit.com/user/{author}/avatar"),
            followers: format!("{}K karma", one_decimal(score, 100)),
        })
        .collect();

    let missing = INFLUENCER_LIMIT.saturating_sub(influencers.len());
    influencers.extend(DEFAULT_INFLUENCERS.iter().take(missing).map(
        |&(name, handle, avatar, followers)| Influencer {
            name: name.to_string(),
            handle: handle.to_string(),
            avatar: avatar.to_string(),
            followers: followers.to_string(),
        },
    ));
    influencers
}

/// Build every dashboard section from the same post set.
#[must_use]
pub fn compose_analytics(
    posts: &[RawPost],
    reports: &[LocalReport],
    now: DateTime<Utc>,
) -> SocialMediaAnalytics {
    let keyword_counts = extract_top_keywords(posts, OCEAN_VOCABULARY, DEFAULT_KEYWORD_LIMIT);

    SocialMediaAnalytics {
        mention_volume_data: mention_volume(posts, reports, now),
        mentions_by_platform: platform_breakdown(posts.len(), reports.len()),
        top_keywords: keyword_counts.iter().map(|k| k.term.clone()).collect(),
        emerging_threats: derive_emerging_threats(&keyword_counts),
        keyword_counts,
        high_impact_posts: high_impact_posts(posts),
        top_influencers: top_influencers(posts),
        sentiment_data: score_batch(posts).to_buckets(),
        post_count: posts.len(),
        generated_at: now,
    }
}

#[cfg(test)]
#[path = "analytics_test.rs"]
mod tests;
