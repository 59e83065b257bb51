//! Social post sources.

mod reddit;
mod reddit_helpers;

pub use reddit::{RedditClient, MAX_COLLECTED_POSTS, REDDIT_BASE_URL};
