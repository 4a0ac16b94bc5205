//! Feed ranking math.
//!
//! The hot score orders the default feed: vote magnitude on a log scale,
//! signed, minus a linear age penalty. It is recomputed on read; the
//! `score_hot` column on stored rows is a query-time sort key refreshed by an
//! external job that calls the same function.

use chrono::{DateTime, Utc};

/// Hours of age that cost one full point of score.
const DECAY_HOURS: f64 = 12.0;

/// Compute the hot score for a post.
///
/// `magnitude * sign - age_hours / 12`, where magnitude is
/// `log10(max(|votes|, 1))`. A zero-vote post scores exactly the (negative)
/// age penalty, so fresh unvoted posts start at 0 and decay from there.
/// Scores are unbounded and only meaningful relative to one another within a
/// single evaluation.
pub fn hot_score(votes: i64, created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let age_hours = (now - created_at).num_milliseconds() as f64 / 3_600_000.0;
    let magnitude = (votes.unsigned_abs().max(1) as f64).log10();
    let sign = match votes.cmp(&0) {
        std::cmp::Ordering::Greater => 1.0,
        std::cmp::Ordering::Less => -1.0,
        std::cmp::Ordering::Equal => 0.0,
    };
    magnitude * sign - age_hours / DECAY_HOURS
}
