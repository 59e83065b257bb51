//! AFINN-style comparative sentiment scoring and bucketing.

use serde::Serialize;

use crate::types::RawPost;

/// Word valences in `[-5, 5]`, AFINN-style.
///
/// Keys are lowercase single tokens. The comparative score of a text is the
/// sum of matched valences divided by its token count.
pub(crate) const LEXICON: &[(&str, i8)] = &[
    // Positive
    ("amazing", 4),
    ("awesome", 4),
    ("beautiful", 3),
    ("best", 3),
    ("better", 2),
    ("clean", 2),
    ("cleaner", 2),
    ("cleanup", 2),
    ("excellent", 3),
    ("glad", 3),
    ("good", 3),
    ("great", 3),
    ("happy", 3),
    ("healthy", 2),
    ("hope", 2),
    ("hopeful", 2),
    ("improve", 2),
    ("improved", 2),
    ("incredible", 3),
    ("inspiring", 3),
    ("love", 3),
    ("loved", 3),
    ("nice", 3),
    ("progress", 2),
    ("protect", 1),
    ("protected", 1),
    ("recover", 2),
    ("recovery", 2),
    ("rescue", 2),
    ("rescued", 2),
    ("restore", 2),
    ("restored", 2),
    ("safe", 1),
    ("save", 2),
    ("saved", 2),
    ("success", 2),
    ("successful", 3),
    ("support", 2),
    ("thank", 2),
    ("thanks", 2),
    ("win", 4),
    ("wonderful", 4),
    ("yes", 1),
    // Negative
    ("alarming", -2),
    ("angry", -3),
    ("awful", -3),
    ("bad", -3),
    ("catastrophe", -3),
    ("catastrophic", -4),
    ("collapse", -2),
    ("contaminated", -2),
    ("crisis", -3),
    ("damage", -3),
    ("damaged", -3),
    ("danger", -2),
    ("dangerous", -2),
    ("dead", -3),
    ("death", -2),
    ("destroy", -3),
    ("destroyed", -3),
    ("destruction", -3),
    ("devastating", -2),
    ("disaster", -2),
    ("dying", -3),
    ("emergency", -2),
    ("fail", -2),
    ("failed", -2),
    ("fear", -2),
    ("hate", -3),
    ("horrible", -3),
    ("hurt", -2),
    ("illegal", -3),
    ("kill", -3),
    ("killed", -3),
    ("killing", -3),
    ("loss", -3),
    ("lost", -3),
    ("pollute", -2),
    ("polluted", -2),
    ("pollution", -2),
    ("poison", -2),
    ("poisoned", -2),
    ("problem", -2),
    ("sad", -2),
    ("spill", -2),
    ("threat", -2),
    ("threatened", -2),
    ("toxic", -2),
    ("tragedy", -2),
    ("tragic", -2),
    ("terrible", -3),
    ("ugly", -3),
    ("warning", -3),
    ("worried", -3),
    ("worse", -3),
    ("worst", -3),
];

/// A token in this set flips the valence of the token right after it.
const NEGATORS: &[&str] = &[
    "not", "no", "never", "don't", "dont", "isn't", "isnt", "wasn't", "wasnt", "aren't",
    "arent", "won't", "wont", "can't", "cant",
];

/// Comparative scores strictly beyond this magnitude leave the neutral bucket.
pub const POLARITY_THRESHOLD: f32 = 0.5;

fn valence(token: &str) -> Option<i8> {
    LEXICON
        .iter()
        .find(|&&(word, _)| word == token)
        .map(|&(_, weight)| weight)
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(|ch| {
            if ch.is_alphanumeric() || ch == '\'' || ch == '-' {
                ch
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .map(ToOwned::to_owned)
        .collect()
}

/// Sum of token valences divided by the token count. `0.0` for empty text.
#[must_use]
pub fn comparative_score(text: &str) -> f32 {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return 0.0;
    }

    let mut sum = 0_i32;
    for (index, token) in tokens.iter().enumerate() {
        let Some(weight) = valence(token) else {
            continue;
        };
        let negated = index > 0 && NEGATORS.contains(&tokens[index - 1].as_str());
        sum += if negated {
            -i32::from(weight)
        } else {
            i32::from(weight)
        };
    }

    #[allow(clippy::cast_precision_loss)]
    let comparative = sum as f32 / tokens.len() as f32;
    comparative
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
}

impl SentimentLabel {
    #[must_use]
    pub fn from_comparative(comparative: f32) -> Self {
        if comparative < -POLARITY_THRESHOLD {
            Self::Negative
        } else if comparative > POLARITY_THRESHOLD {
            Self::Positive
        } else {
            Self::Neutral
        }
    }
}

/// Bucket counts over a post set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentBucketCounts {
    pub negative: usize,
    pub neutral: usize,
    pub positive: usize,
}

/// One slice of the sentiment chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentimentBucket {
    pub name: String,
    /// Rounded percentage of the post set.
    pub value: u32,
    pub count: usize,
    pub fill: String,
}

impl SentimentBucketCounts {
    #[must_use]
    pub fn total(&self) -> usize {
        self.negative + self.neutral + self.positive
    }

    /// Rounded `[negative, neutral, positive]` percentages.
    ///
    /// An empty set reports 100% neutral so the split always sums to 100.
    /// Non-empty sets may drift by one point from rounding.
    #[must_use]
    pub fn percentages(&self) -> [u32; 3] {
        let total = self.total();
        if total == 0 {
            return [0, 100, 0];
        }
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let pct = |count: usize| (count as f64 / total as f64 * 100.0).round() as u32;
        [pct(self.negative), pct(self.neutral), pct(self.positive)]
    }

    /// Chart slices in the fixed Negative, Neutral, Positive order.
    #[must_use]
    pub fn to_buckets(&self) -> Vec<SentimentBucket> {
        let [negative, neutral, positive] = self.percentages();
        vec![
            SentimentBucket {
                name: "Negative".to_string(),
                value: negative,
                count: self.negative,
                fill: "#ef4444".to_string(),
            },
            SentimentBucket {
                name: "Neutral".to_string(),
                value: neutral,
                count: self.neutral,
                fill: "#64748b".to_string(),
            },
            SentimentBucket {
                name: "Positive".to_string(),
                value: positive,
                count: self.positive,
                fill: "#22c55e".to_string(),
            },
        ]
    }
}

/// Score every post over `title + " " + body` and count the buckets.
#[must_use]
pub fn score_batch(posts: &[RawPost]) -> SentimentBucketCounts {
    let mut counts = SentimentBucketCounts::default();
    for post in posts {
        match SentimentLabel::from_comparative(comparative_score(&post.text())) {
            SentimentLabel::Negative => counts.negative += 1,
            SentimentLabel::Neutral => counts.neutral += 1,
            SentimentLabel::Positive => counts.positive += 1,
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn post(title: &str, body: &str) -> RawPost {
        RawPost {
            title: title.to_string(),
            body: body.to_string(),
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
    fn empty_string_returns_zero() {
        assert_eq!(comparative_score(""), 0.0);
        assert_eq!(comparative_score("   "), 0.0);
    }

    #[test]
    fn unknown_text_returns_zero() {
        assert_eq!(comparative_score("the quick brown fox"), 0.0);
    }

    #[test]
    fn comparative_is_normalized_by_token_count() {
        // terrible (-3) + disaster (-2) over 5 tokens
        let score = comparative_score("This is a terrible disaster");
        assert!((score - -1.0).abs() < f32::EPSILON, "got {score}");
    }

    #[test]
    fn punctuation_is_stripped_before_lookup() {
        assert!(comparative_score("great!") > 0.0);
    }

    #[test]
    fn negator_flips_following_word() {
        let score = comparative_score("not good");
        assert!((score - -1.5).abs() < f32::EPSILON, "got {score}");
    }

    #[test]
    fn labels_use_strict_threshold() {
        assert_eq!(SentimentLabel::from_comparative(-0.51), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_comparative(-0.5), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_comparative(0.5), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_comparative(0.51), SentimentLabel::Positive);
    }

    #[test]
    fn batch_counts_sum_to_post_count() {
        let posts = vec![
            post("Terrible", "disaster"),
            post("Great", "love it"),
            post("Tide chart", "for next week at the harbor"),
            post("Oil spill", "toxic and horrible"),
        ];
        let counts = score_batch(&posts);
        assert_eq!(counts.total(), posts.len());
        assert_eq!(counts.negative, 2);
        assert_eq!(counts.neutral, 1);
        assert_eq!(counts.positive, 1);
        assert_eq!(counts.percentages(), [50, 25, 25]);
    }

    #[test]
    fn percentages_sum_to_hundred_within_rounding() {
        let counts = SentimentBucketCounts {
            negative: 1,
            neutral: 1,
            positive: 1,
        };
        let sum: u32 = counts.percentages().iter().sum();
        assert!((99..=101).contains(&sum), "got {sum}");
    }

    #[test]
    fn empty_batch_is_fully_neutral() {
        let counts = score_batch(&[]);
        assert_eq!(counts.total(), 0);
        assert_eq!(counts.percentages(), [0, 100, 0]);
    }

    #[test]
    fn buckets_are_in_fixed_order() {
        let names: Vec<String> = SentimentBucketCounts::default()
            .to_buckets()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, vec!["Negative", "Neutral", "Positive"]);
    }
}
