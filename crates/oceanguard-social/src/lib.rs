//! Social-media analytics pipeline for oceanguard.
//!
//! Collects ocean-related Reddit posts, optionally narrows them to hazard
//! posts, and derives mention volume, platform breakdown, trending keywords,
//! high-impact posts, influencers, and sentiment from that one post set.

pub mod analytics;
pub mod error;
pub mod keywords;
pub mod pipeline;
pub mod relevance;
pub mod scorer;
pub mod types;

mod sources;

pub use error::SocialError;
pub use keywords::{derive_emerging_threats, extract_top_keywords, KeywordFrequency};
pub use pipeline::{filter_hazard_posts, SocialAnalyticsService};
pub use relevance::{is_hazard_related, is_ocean_related};
pub use scorer::{comparative_score, score_batch, SentimentBucketCounts};
pub use sources::{RedditClient, MAX_COLLECTED_POSTS, REDDIT_BASE_URL};
pub use types::{RawPost, SocialConfig, SocialMediaAnalytics};
