//! Heuristic monthly search/prompt volume estimation.

use std::ops::Range;
use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;

static BEST_OF_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^best .* of \d{4}").expect("valid best-of-year regex"));

static TOP_N: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^top \d+ ").expect("valid top-n regex"));

static INTERROGATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(what|how|why|which|where|when) ").expect("valid interrogative regex")
});

/// Query shape that decides which volume range applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeRule {
    BestOfYear,
    BestWithoutBrand,
    TopN,
    Versus,
    Question,
    Alternatives,
    ReviewIntent,
    BrandQuery,
    Other,
}

impl VolumeRule {
    /// Half-open range the estimate is drawn from.
    #[must_use]
    pub fn range(self) -> Range<u64> {
        match self {
            VolumeRule::BestOfYear => 80_000..480_000,
            VolumeRule::BestWithoutBrand => 50_000..350_000,
            VolumeRule::TopN => 40_000..240_000,
            VolumeRule::Versus => 30_000..180_000,
            VolumeRule::Question => 15_000..115_000,
            VolumeRule::Alternatives => 10_000..90_000,
            VolumeRule::ReviewIntent => 5_000..55_000,
            VolumeRule::BrandQuery => 8_000..68_000,
            VolumeRule::Other => 10_000..110_000,
        }
    }
}

type Matcher = fn(q: &str, b: &str) -> bool;

/// Ordered cascade; the first match wins. Inputs are lower-cased and trimmed.
const RULES: &[(VolumeRule, Matcher)] = &[
    (VolumeRule::BestOfYear, is_best_of_year),
    (VolumeRule::BestWithoutBrand, is_best_without_brand),
    (VolumeRule::TopN, is_top_n),
    (VolumeRule::Versus, is_versus),
    (VolumeRule::Question, is_question),
    (VolumeRule::Alternatives, is_alternatives),
    (VolumeRule::ReviewIntent, is_review_intent),
    (VolumeRule::BrandQuery, is_brand_query),
];

fn is_best_of_year(q: &str, _b: &str) -> bool {
    BEST_OF_YEAR.is_match(q)
}

fn is_best_without_brand(q: &str, b: &str) -> bool {
    q.starts_with("best ") && !q.contains(b)
}

fn is_top_n(q: &str, _b: &str) -> bool {
    TOP_N.is_match(q)
}

fn is_versus(q: &str, _b: &str) -> bool {
    q.contains(" vs ") || q.contains(" versus ")
}

fn is_question(q: &str, _b: &str) -> bool {
    INTERROGATIVE.is_match(q)
}

fn is_alternatives(q: &str, _b: &str) -> bool {
    q.contains("alternative") || q.contains("similar to")
}

fn is_review_intent(q: &str, _b: &str) -> bool {
    q.contains("review") || q.contains("worth it") || q.contains("worth buying")
}

fn is_brand_query(q: &str, b: &str) -> bool {
    q.contains(b)
}

/// Which rule of the cascade a query falls under for `brand`.
#[must_use]
pub fn volume_rule(query: &str, brand: &str) -> VolumeRule {
    let q = query.trim().to_lowercase();
    let b = brand.trim().to_lowercase();
    RULES
        .iter()
        .find(|(_, matches)| matches(&q, &b))
        .map_or(VolumeRule::Other, |&(rule, _)| rule)
}

/// Estimate monthly volume for a query or prompt mentioning `brand`.
///
/// Used only when no authoritative volume is available for the term.
pub fn estimate_volume<R: Rng>(query: &str, brand: &str, rng: &mut R) -> u64 {
    rng.random_range(volume_rule(query, brand).range())
}
