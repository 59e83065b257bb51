//! Fixed-vocabulary keyword counting and emerging-threat labelling.

use serde::Serialize;

use crate::types::RawPost;

/// Ocean/hazard phrases counted across the post corpus, in tie-break order.
pub const OCEAN_VOCABULARY: &[&str] = &[
    "oil spill",
    "marine debris",
    "plastic waste",
    "pollution",
    "coral bleaching",
    "ocean acidification",
    "overfishing",
    "beach cleanup",
    "red tide",
    "ghost nets",
    "microplastics",
    "ocean conservation",
    "marine life",
    "sea level rise",
];

pub const DEFAULT_KEYWORD_LIMIT: usize = 9;

/// Growth labels assigned by rank to the top three keywords.
///
/// These are presentation placeholders, not measured trend deltas.
const SYNTHETIC_GROWTH_BY_RANK: [u32; 3] = [250, 180, 95];

const EMERGING_THREAT_DESCRIPTION: &str = "Trending on social media platforms";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordFrequency {
    /// Hashtag display form, e.g. `#oilspill`.
    pub term: String,
    /// Number of posts mentioning the term.
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmergingThreat {
    pub term: String,
    pub growth: String,
    pub description: String,
}

/// Display form of a vocabulary term: `#` prefix, spaces removed.
#[must_use]
pub fn hashtag(term: &str) -> String {
    format!("#{}", term.replace(' ', ""))
}

/// Count the posts mentioning each vocabulary term and return the top `limit`.
///
/// Terms nobody mentioned are omitted. Ties keep vocabulary order.
#[must_use]
pub fn extract_top_keywords(
    posts: &[RawPost],
    vocabulary: &[&str],
    limit: usize,
) -> Vec<KeywordFrequency> {
    let mut counts = vec![0_usize; vocabulary.len()];
    for post in posts {
        let text = post.text().to_lowercase();
        for (index, term) in vocabulary.iter().enumerate() {
            if text.contains(term) {
                counts[index] += 1;
            }
        }
    }

    let mut ranked: Vec<KeywordFrequency> = vocabulary
        .iter()
        .zip(counts)
        .filter(|&(_, count)| count > 0)
        .map(|(term, count)| KeywordFrequency {
            term: hashtag(term),
            count,
        })
        .collect();

    // `sort_by` is stable, so equal counts stay in vocabulary order.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);
    ranked
}

/// Label the top three keywords with the fixed synthetic growth table.
#[must_use]
pub fn derive_emerging_threats(top_keywords: &[KeywordFrequency]) -> Vec<EmergingThreat> {
    top_keywords
        .iter()
        .zip(SYNTHETIC_GROWTH_BY_RANK)
        .map(|(keyword, growth)| EmergingThreat {
            term: keyword.term.clone(),
            growth: format!("+{growth}%"),
            description: EMERGING_THREAT_DESCRIPTION.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

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
    fn hashtag_strips_spaces() {
        assert_eq!(hashtag("sea level rise"), "#sealevelrise");
    }

    #[test]
    fn most_frequent_term_ranks_first() {
        let mut posts: Vec<RawPost> = (0..5).map(|_| post("Another oil spill")).collect();
        posts.push(post("Red tide again"));
        posts.push(post("red tide closes beaches"));

        let top = extract_top_keywords(&posts, OCEAN_VOCABULARY, DEFAULT_KEYWORD_LIMIT);
        assert_eq!(top[0].term, "#oilspill");
        assert_eq!(top[0].count, 5);
        assert_eq!(top[1].term, "#redtide");
        assert_eq!(top[1].count, 2);
    }

    #[test]
    fn result_never_exceeds_limit_and_is_descending() {
        let posts = vec![post(
            "oil spill marine debris plastic waste pollution coral bleaching red tide",
        )];
        let top = extract_top_keywords(&posts, OCEAN_VOCABULARY, 3);
        assert_eq!(top.len(), 3);
        assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn ties_keep_vocabulary_order() {
        let posts = vec![post("red tide and oil spill")];
        let top = extract_top_keywords(&posts, OCEAN_VOCABULARY, DEFAULT_KEYWORD_LIMIT);
        let terms: Vec<&str> = top.iter().map(|k| k.term.as_str()).collect();
        assert_eq!(terms, vec!["#oilspill", "#redtide"]);
    }

    #[test]
    fn unmentioned_terms_are_omitted() {
        assert!(extract_top_keywords(&[post("nothing here")], OCEAN_VOCABULARY, 9).is_empty());
    }

    #[test]
    fn emerging_threats_use_fixed_growth_table() {
        let top = vec![
            KeywordFrequency {
                term: "#oilspill".into(),
                count: 4,
            },
            KeywordFrequency {
                term: "#redtide".into(),
                count: 3,
            },
            KeywordFrequency {
                term: "#ghostnets".into(),
                count: 2,
            },
            KeywordFrequency {
                term: "#pollution".into(),
                count: 1,
            },
        ];
        let threats = derive_emerging_threats(&top);
        assert_eq!(threats.len(), 3);
        assert_eq!(threats[0].growth, "+250%");
        assert_eq!(threats[1].growth, "+180%");
        assert_eq!(threats[2].growth, "+95%");
        assert_eq!(threats[2].term, "#ghostnets");
    }

    #[test]
    fn emerging_threats_shrink_with_fewer_keywords() {
        let top = vec![KeywordFrequency {
            term: "#oilspill".into(),
            count: 1,
        }];
        assert_eq!(derive_emerging_threats(&top).len(), 1);
    }
}
