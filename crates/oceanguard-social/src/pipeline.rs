//! Social analytics pipeline orchestration.

use chrono::Utc;
use oceanguard_core::ReportStore;

use crate::analytics::compose_analytics;
use crate::error::SocialError;
use crate::relevance::classify;
use crate::sources::RedditClient;
use crate::types::{RawPost, SocialConfig, SocialMediaAnalytics};

/// Local hazard reports read per aggregation.
pub const RECENT_REPORT_LIMIT: i64 = 50;

/// Keep only posts whose title and body pass the hazard gate.
#[must_use]
pub fn filter_hazard_posts(posts: Vec<RawPost>) -> Vec<RawPost> {
    posts
        .into_iter()
        .map(classify)
        .filter(|classified| classified.is_hazard_related)
        .map(|classified| classified.post)
        .collect()
}

/// Composes Reddit posts and local reports into dashboard analytics.
///
/// Holds no state between calls other than its HTTP client and store handle.
pub struct SocialAnalyticsService<S> {
    reddit: RedditClient,
    communities: Vec<String>,
    post_limit: u32,
    store: S,
}

impl<S: ReportStore> SocialAnalyticsService<S> {
    /// # Errors
    ///
    /// Returns [`SocialError::Http`] if the Reddit HTTP client cannot be built.
    pub fn new(config: &SocialConfig, store: S) -> Result<Self, SocialError> {
        Ok(Self {
            reddit: RedditClient::new(config)?,
            communities: config.communities.clone(),
            post_limit: config.post_limit,
            store,
        })
    }

    /// Run the full social analytics pipeline.
    ///
    /// 1. Collect ocean-related Reddit posts (serial, rate-limited).
    /// 2. When `hazards_only`, keep only hazard-related posts.
    /// 3. Read the most recent local hazard reports.
    /// 4. Derive every dashboard section from that single post set.
    ///
    /// Reddit failures only shrink the post set.
    ///
    /// # Errors
    ///
    /// Returns [`SocialError::ReportStore`] if the local report store cannot
    /// be read.
    pub async fn get_social_media_analytics(
        &self,
        hazards_only: bool,
    ) -> Result<SocialMediaAnalytics, SocialError> {
        let collected = self
            .reddit
            .fetch_posts(&self.communities, self.post_limit)
            .await;
        let collected_count = collected.len();

        let posts = if hazards_only {
            filter_hazard_posts(collected)
        } else {
            collected
        };

        let reports = self
            .store
            .recent_hazard_reports(RECENT_REPORT_LIMIT)
            .await?;

        let analytics = compose_analytics(&posts, &reports, Utc::now());

        tracing::info!(
            hazards_only,
            collected = collected_count,
            analysed = posts.len(),
            reports = reports.len(),
            "social analytics composed"
        );

        Ok(analytics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str) -> RawPost {
        RawPost {
            title: title.to_string(),
            body: title.to_string(),
            author: "someone".to_string(),
            community: "ocean".to_string(),
            score: 1,
            comment_count: 0,
            created_at: Utc::now(),
            permalink: "https://reddit.com/r/ocean/x".to_string(),
            external_url: "https://reddit.com/r/ocean/x".to_string(),
        }
    }

    #[test]
    fn hazard_filter_drops_appreciation_and_unrelated_posts() {
        let posts = vec![
            post("Oil spill off the coast"),
            post("Beautiful reef but so much plastic"),
            post("Whale watching tour schedule"),
            post("Tsunami warning for the islands"),
        ];
        let kept: Vec<String> = filter_hazard_posts(posts)
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(
            kept,
            vec!["Oil spill off the coast", "Tsunami warning for the islands"]
        );
    }
}
