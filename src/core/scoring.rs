use crate::models::PersonalityProfile;

/// Points awarded when two profiles share the same four-letter type.
const TYPE_MATCH_POINTS: f64 = 30.0;

/// Weight of the overall-score proximity term; caps it at 20 points.
const OVERALL_WEIGHT: f64 = 0.2;

/// Weight of each shared-axis proximity term; caps the four axes at 30.
const AXIS_WEIGHT: f64 = 0.075;

/// Budget for the whole trait-development term.
const TRAIT_POINTS: f64 = 20.0;

/// Compatibility score between two profiles, in [0, 100].
///
/// Additive, with an independent cap per dimension so no single factor can
/// dominate and the scale stays stable for thresholding:
/// type identity (30), overall-score proximity (20), per-axis proximity on
/// axes whose dominant side agrees (30 across the four axes), and
/// trait-development proximity over the traits both profiles carry (20).
///
/// Symmetric in its arguments; a profile scored against itself yields 100.
/// The result is rounded to two decimal places.
pub fn compatibility_score(a: &PersonalityProfile, b: &PersonalityProfile) -> f64 {
    let mut score = 0.0;

    if a.type_code == b.type_code {
        score += TYPE_MATCH_POINTS;
    }

    let overall_diff = (a.overall_score - b.overall_score).abs();
    score += (100.0 - overall_diff) * OVERALL_WEIGHT;

    // Axes only count when both profiles lean the same way; a shared label
    // with close percentages is worth more than a shared label far apart.
    for (ours, theirs) in a.breakdown.axes().iter().zip(b.breakdown.axes()) {
        if ours.preference == theirs.preference {
            let diff = (ours.percentage - theirs.percentage).abs();
            score += (100.0 - diff) * AXIS_WEIGHT;
        }
    }

    score += trait_term(a, b);

    round2(score)
}

/// Trait-development proximity over the traits present on both profiles.
///
/// Each shared trait carries an equal share of the 20-point budget. An empty
/// intersection contributes nothing; the share is never computed for zero
/// traits.
fn trait_term(a: &PersonalityProfile, b: &PersonalityProfile) -> f64 {
    let shared: Vec<(f64, f64)> = a
        .trait_scores
        .iter()
        .filter_map(|(name, ours)| b.trait_scores.get(name).map(|theirs| (*ours, *theirs)))
        .collect();

    if shared.is_empty() {
        return 0.0;
    }

    let per_trait = TRAIT_POINTS / shared.len() as f64;
    shared
        .iter()
        .map(|(ours, theirs)| (100.0 - (ours - theirs).abs()) * per_trait / 100.0)
        .sum()
}

#[inline]
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
