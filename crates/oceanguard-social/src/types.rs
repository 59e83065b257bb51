use chrono::{DateTime, Utc};
use oceanguard_core::AppConfig;
use serde::Serialize;

use crate::keywords::{EmergingThreat, KeywordFrequency};
use crate::scorer::SentimentBucket;

/// One post fetched from a social platform.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPost {
    pub title: String,
    /// Self text, or the title again when the post has none.
    pub body: String,
    pub author: String,
    /// Subreddit (or equivalent) the post was collected from.
    pub community: String,
    /// Engagement proxy (upvotes).
    pub score: i64,
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
    pub permalink: String,
    /// Link target of the post; equals the permalink for text posts.
    pub external_url: String,
}

impl RawPost {
    /// Text the classifier, scorer, and extractor operate on.
    #[must_use]
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.body)
    }
}

/// A [`RawPost`] annotated with both relevance tiers.
#[derive(Debug, Clone)]
pub struct ClassifiedPost {
    pub post: RawPost,
    pub is_ocean_related: bool,
    pub is_hazard_related: bool,
}

/// Configuration for the Reddit collector.
#[derive(Debug, Clone)]
pub struct SocialConfig {
    pub base_url: String,
    pub user_agent: String,
    pub communities: Vec<String>,
    /// Only the first `max_communities` entries of `communities` are fetched.
    pub max_communities: usize,
    pub post_limit: u32,
    pub request_timeout_secs: u64,
    pub inter_request_delay_ms: u64,
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            base_url: crate::sources::REDDIT_BASE_URL.to_string(),
            user_agent: "OceanGuard:v1.0.0 (by /u/oceanguard)".to_string(),
            communities: [
                "environment",
                "ocean",
                "marinebiology",
                "climatechange",
                "pollution",
                "collapse",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            max_communities: 2,
            post_limit: 25,
            request_timeout_secs: 5,
            inter_request_delay_ms: 2_000,
        }
    }
}

impl SocialConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            user_agent: config.reddit_user_agent.clone(),
            communities: config.reddit_communities.clone(),
            max_communities: config.reddit_max_communities,
            post_limit: config.reddit_post_limit,
            request_timeout_secs: config.reddit_timeout_secs,
            inter_request_delay_ms: config.reddit_inter_request_delay_ms,
            ..Self::default()
        }
    }
}

/// Scaled mention count for one 7-day window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MentionVolumePoint {
    #[serde(rename = "name")]
    pub period: String,
    pub mentions: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformMentions {
    pub name: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighImpactPost {
    pub platform: String,
    pub text: String,
    pub engagement: String,
    pub url: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Influencer {
    pub name: String,
    pub handle: String,
    pub avatar: String,
    pub followers: String,
}

/// Dashboard payload produced by one aggregation run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMediaAnalytics {
    pub mention_volume_data: Vec<MentionVolumePoint>,
    pub mentions_by_platform: Vec<PlatformMentions>,
    pub top_keywords: Vec<String>,
    pub keyword_counts: Vec<KeywordFrequency>,
    pub high_impact_posts: Vec<HighImpactPost>,
    pub emerging_threats: Vec<EmergingThreat>,
    pub top_influencers: Vec<Influencer>,
    pub sentiment_data: Vec<SentimentBucket>,
    /// Number of posts every section above was derived from.
    pub post_count: usize,
    pub generated_at: DateTime<Utc>,
}
