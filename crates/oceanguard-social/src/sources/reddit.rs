//! Reddit hot-listing collector (public JSON endpoints, no OAuth).

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Client;
use serde::Deserialize;

use crate::error::SocialError;
use crate::types::{RawPost, SocialConfig};

use super::reddit_helpers::to_raw_post;

pub const REDDIT_BASE_URL: &str = "https://www.reddit.com";

/// Posts kept after sorting the combined listing by score.
pub const MAX_COLLECTED_POSTS: usize = 20;

/// `[A-Za-z0-9_-]` pass through unescaped; anything else is percent-encoded.
const COMMUNITY_PATH: &AsciiSet = &NON_ALPHANUMERIC.remove(b'_').remove(b'-');

/// Reddit listing wrapper.
#[derive(Debug, Deserialize)]
struct Listing {
    #[serde(default)]
    data: ListingData,
}

#[derive(Debug, Default, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Post>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Post {
    pub(super) data: PostData,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct PostData {
    pub(super) title: Option<String>,
    pub(super) selftext: Option<String>,
    pub(super) author: Option<String>,
    pub(super) subreddit: Option<String>,
    #[serde(default)]
    pub(super) score: i64,
    #[serde(default)]
    pub(super) num_comments: i64,
    pub(super) created_utc: Option<f64>,
    pub(super) permalink: Option<String>,
    pub(super) url: Option<String>,
}

/// Serial, rate-limited Reddit collector.
pub struct RedditClient {
    client: Client,
    base_url: String,
    max_communities: usize,
    inter_request_delay: Duration,
}

impl RedditClient {
    /// Build a collector with the configured timeout and identifying `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`SocialError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: &SocialConfig) -> Result<Self, SocialError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_communities: config.max_communities,
            inter_request_delay: Duration::from_millis(config.inter_request_delay_ms),
        })
    }

    /// Fetch hot posts from the first `max_communities` of `communities`,
    /// keeping only ocean-related ones.
    ///
    /// Communities are fetched one at a time with a fixed pause between
    /// requests. A failing community is logged and skipped, so the result is
    /// whatever the others returned: possibly empty, never an error. The
    /// combined list is sorted by score (descending) and cut to
    /// [`MAX_COLLECTED_POSTS`].
    pub async fn fetch_posts(
        &self,
        communities: &[String],
        limit_per_community: u32,
    ) -> Vec<RawPost> {
        let mut posts = Vec::new();

        for (index, community) in communities.iter().take(self.max_communities).enumerate() {
            if index > 0 && !self.inter_request_delay.is_zero() {
                tokio::time::sleep(self.inter_request_delay).await;
            }

            match self.fetch_community(community, limit_per_community).await {
                Ok(community_posts) => {
                    tracing::debug!(
                        community = community.as_str(),
                        count = community_posts.len(),
                        "collected Reddit posts"
                    );
                    posts.extend(community_posts);
                }
                Err(e) => {
                    tracing::warn!(
                        source = "reddit",
                        community = community.as_str(),
                        error = %e,
                        "Reddit community fetch failed"
                    );
                }
            }
        }

        posts.sort_by(|a, b| b.score.cmp(&a.score));
        posts.truncate(MAX_COLLECTED_POSTS);
        posts
    }

    async fn fetch_community(
        &self,
        community: &str,
        limit: u32,
    ) -> Result<Vec<RawPost>, SocialError> {
        let encoded = utf8_percent_encode(community, COMMUNITY_PATH);
        let url = format!("{}/r/{encoded}/hot.json", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("limit", limit)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SocialError::UnexpectedStatus {
                status: response.status().as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let listing: Listing =
            serde_json::from_str(&body).map_err(|e| SocialError::Deserialize {
                context: format!("r/{community} hot listing"),
                source: e,
            })?;

        Ok(listing
            .data
            .children
            .iter()
            .filter_map(|post| to_raw_post(post, community))
            .collect())
    }
}
