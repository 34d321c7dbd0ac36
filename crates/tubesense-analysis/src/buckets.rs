//! Score-to-bucket tables for the sentiment and toxicity summaries.
//!
//! Each table is an ordered list of `(predicate, bucket)` pairs evaluated
//! first-match-wins. The tables are exhaustive over their input domain, so
//! every score lands in exactly one bucket.

/// Coarse polarity of a 1-5 star sentiment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentBucket {
    Positive,
    Neutral,
    Negative,
}

fn above_neutral(score: u8) -> bool {
    score > 3
}

fn is_neutral(score: u8) -> bool {
    score == 3
}

fn below_neutral(score: u8) -> bool {
    score < 3
}

const SENTIMENT_TABLE: &[(fn(u8) -> bool, SentimentBucket)] = &[
    (above_neutral, SentimentBucket::Positive),
    (is_neutral, SentimentBucket::Neutral),
    (below_neutral, SentimentBucket::Negative),
];

impl SentimentBucket {
    /// Buckets a star score: `> 3` positive, `== 3` neutral, `< 3` negative.
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        SENTIMENT_TABLE
            .iter()
            .find(|(matches, _)| matches(score))
            .map_or(Self::Negative, |&(_, bucket)| bucket)
    }
}

/// Probability at or above which a comment counts as toxic.
pub const TOXIC_THRESHOLD: f64 = 0.5;

/// Severity band of a toxicity probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToxicityBucket {
    High,
    Moderate,
    Low,
    Safe,
}

/// Lower bounds (inclusive), highest first. Anything below the last bound is safe.
const TOXICITY_TABLE: &[(f64, ToxicityBucket)] = &[
    (0.9, ToxicityBucket::High),
    (0.7, ToxicityBucket::Moderate),
    (TOXIC_THRESHOLD, ToxicityBucket::Low),
];

impl ToxicityBucket {
    /// Buckets a toxicity probability: `>= 0.9` high, `>= 0.7` moderate,
    /// `>= 0.5` low, otherwise safe.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        TOXICITY_TABLE
            .iter()
            .find(|&&(lower_bound, _)| score >= lower_bound)
            .map_or(Self::Safe, |&(_, bucket)| bucket)
    }

    /// `true` for every bucket at or above [`TOXIC_THRESHOLD`].
    #[must_use]
    pub fn is_toxic(self) -> bool {
        !matches!(self, Self::Safe)
    }
}

/// `count` as a share of `total`, in percent. Callers guarantee `total > 0`.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn percentage(count: usize, total: usize) -> f64 {
    count as f64 / total as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_boundaries() {
        assert_eq!(SentimentBucket::from_score(2), SentimentBucket::Negative);
        assert_eq!(SentimentBucket::from_score(3), SentimentBucket::Neutral);
        assert_eq!(SentimentBucket::from_score(4), SentimentBucket::Positive);
    }

    #[test]
    fn sentiment_full_star_range() {
        let buckets: Vec<SentimentBucket> = (1..=5).map(SentimentBucket::from_score).collect();
        assert_eq!(
            buckets,
            vec![
                SentimentBucket::Negative,
                SentimentBucket::Negative,
                SentimentBucket::Neutral,
                SentimentBucket::Positive,
                SentimentBucket::Positive,
            ]
        );
    }

    #[test]
    fn sentiment_table_matches_exactly_one_predicate_per_score() {
        for score in 0..=u8::MAX {
            let hits = SENTIMENT_TABLE.iter().filter(|(p, _)| p(score)).count();
            assert_eq!(hits, 1, "score {score} matched {hits} predicates");
        }
    }

    #[test]
    fn toxicity_boundaries_follow_inclusive_lower_bounds() {
        assert_eq!(ToxicityBucket::from_score(0.9), ToxicityBucket::High);
        assert_eq!(ToxicityBucket::from_score(0.7), ToxicityBucket::Moderate);
        assert_eq!(ToxicityBucket::from_score(0.5), ToxicityBucket::Low);
        assert_eq!(ToxicityBucket::from_score(0.4999), ToxicityBucket::Safe);
    }

    #[test]
    fn toxicity_just_below_each_bound() {
        assert_eq!(ToxicityBucket::from_score(0.8999), ToxicityBucket::Moderate);
        assert_eq!(ToxicityBucket::from_score(0.6999), ToxicityBucket::Low);
    }

    #[test]
    fn toxicity_extremes() {
        assert_eq!(ToxicityBucket::from_score(0.0), ToxicityBucket::Safe);
        assert_eq!(ToxicityBucket::from_score(1.0), ToxicityBucket::High);
    }

    #[test]
    fn toxicity_sweep_is_monotonic_over_unit_interval() {
        let rank = |b: ToxicityBucket| match b {
            ToxicityBucket::Safe => 0,
            ToxicityBucket::Low => 1,
            ToxicityBucket::Moderate => 2,
            ToxicityBucket::High => 3,
        };
        let mut previous = 0;
        for step in 0..=1000 {
            let score = f64::from(step) / 1000.0;
            let current = rank(ToxicityBucket::from_score(score));
            assert!(current >= previous, "bucket dropped at score {score}");
            previous = current;
        }
    }

    #[test]
    fn toxic_flag_uses_half_probability_cutoff() {
        assert!(ToxicityBucket::from_score(TOXIC_THRESHOLD).is_toxic());
        assert!(ToxicityBucket::from_score(0.95).is_toxic());
        assert!(!ToxicityBucket::from_score(0.49).is_toxic());
    }
}
