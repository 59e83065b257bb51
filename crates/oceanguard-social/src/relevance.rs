//! Keyword relevance gates for social posts.
//!
//! Both predicates are plain case-insensitive substring tests: no
//! tokenization, no stemming. "seashell" matches "sea", and that is accepted.

use crate::types::{ClassifiedPost, RawPost};

/// Explicit hazard phrases that make a post ocean-related on their own.
const OCEAN_HAZARD_TERMS: &[&str] = &[
    "oil spill",
    "pollution",
    "debris",
    "plastic waste",
    "coral bleaching",
    "ocean acidification",
    "overfishing",
    "tsunami",
    "hurricane",
    "cyclone",
    "storm surge",
    "red tide",
    "algal bloom",
    "dead zone",
    "microplastics",
    "ghost nets",
    "marine litter",
    "toxic",
    "contamination",
    "ocean warming",
    "sea level rise",
    "coastal erosion",
    "maritime disaster",
    "shipwreck",
    "chemical spill",
];

const OCEAN_TERMS: &[&str] = &[
    "ocean", "marine", "sea", "coastal", "beach", "reef", "maritime", "naval", "shipping",
];

const HAZARD_INDICATORS: &[&str] = &[
    "oil spill",
    "pollution",
    "debris",
    "plastic",
    "waste",
    "bleaching",
    "acidification",
    "overfishing",
    "illegal fishing",
    "tsunami",
    "hurricane",
    "cyclone",
    "storm",
    "flood",
    "red tide",
    "algal bloom",
    "dead zone",
    "microplastic",
    "ghost net",
    "litter",
    "toxic",
    "contamination",
    "spill",
    "warming",
    "sea level",
    "erosion",
    "threat",
    "danger",
    "disaster",
    "crisis",
    "damage",
    "destruction",
    "dying",
    "endangered",
    "extinction",
    "dead",
    "kill",
    "harm",
    "emergency",
    "warning",
    "alert",
    "risk",
    "vulnerable",
];

/// Appreciation/aesthetic language. Any match vetoes a hazard classification.
const APPRECIATION_TERMS: &[&str] = &[
    "beautiful",
    "amazing",
    "stunning",
    "gorgeous",
    "adorable",
    "cute",
    "playing",
    "dance",
    "majestic",
    "peaceful",
    "relaxing",
    "therapy",
    "meditation",
    "serene",
];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Returns `true` when `text` mentions an ocean hazard or any ocean/coastal term.
#[must_use]
pub fn is_ocean_related(text: &str) -> bool {
    let lower = text.to_lowercase();
    contains_any(&lower, OCEAN_HAZARD_TERMS) || contains_any(&lower, OCEAN_TERMS)
}

/// Returns `true` when `text` carries hazard language and no appreciation language.
///
/// The appreciation veto wins even when hazard terms are present:
/// "beautiful dead coral reef" is not a hazard post.
#[must_use]
pub fn is_hazard_related(text: &str) -> bool {
    let lower = text.to_lowercase();
    let has_hazard = contains_any(&lower, HAZARD_INDICATORS);
    let is_appreciation = contains_any(&lower, APPRECIATION_TERMS);
    has_hazard && !is_appreciation
}

/// Annotate a post with both relevance tiers, evaluated over title and body.
#[must_use]
pub fn classify(post: RawPost) -> ClassifiedPost {
    let text = post.text();
    ClassifiedPost {
        is_ocean_related: is_ocean_related(&text),
        is_hazard_related: is_hazard_related(&text),
        post,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tsunami_warning_is_ocean_related() {
        assert!(is_ocean_related(
            "Just saw a tsunami warning issued for the coast"
        ));
    }

    #[test]
    fn unrelated_text_is_not_ocean_related() {
        assert!(!is_ocean_related("I love my new car"));
    }

    #[test]
    fn ocean_match_is_case_insensitive() {
        assert!(is_ocean_related("BEACH day"));
        assert!(is_ocean_related("Massive Red Tide near Tampa"));
    }

    #[test]
    fn substring_false_positive_is_accepted() {
        // "research" contains "sea"; pure containment matches it.
        assert!(is_ocean_related("new research grant announced"));
    }

    #[test]
    fn empty_text_matches_nothing() {
        assert!(!is_ocean_related(""));
        assert!(!is_hazard_related(""));
    }

    #[test]
    fn hazard_language_is_hazard_related() {
        assert!(is_hazard_related("Oil spill spreading along the shoreline"));
        assert!(is_hazard_related("Coral bleaching event confirmed"));
    }

    #[test]
    fn appreciation_vetoes_hazard_match() {
        assert!(!is_hazard_related("beautiful dead coral reef pollution"));
        assert!(!is_hazard_related("Cute seal playing near the plastic"));
    }

    #[test]
    fn appreciation_alone_is_not_hazard() {
        assert!(!is_hazard_related("Peaceful sunset over the bay"));
    }

    #[test]
    fn classify_sets_both_flags() {
        let post = RawPost {
            title: "Debris washing up".to_string(),
            body: "Lots of plastic on the beach".to_string(),
            author: "a".to_string(),
            community: "ocean".to_string(),
            score: 1,
            comment_count: 0,
            created_at: chrono::Utc::now(),
            permalink: "https://reddit.com/r/ocean/1".to_string(),
            external_url: "https://reddit.com/r/ocean/1".to_string(),
        };
        let classified = classify(post);
        assert!(classified.is_ocean_related);
        assert!(classified.is_hazard_related);
    }
}
