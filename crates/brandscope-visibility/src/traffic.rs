//! Heuristic per-article traffic estimation from publisher authority.

use rand::Rng;

/// Baseline monthly site audience for well-known publishers.
///
/// Keys are bare lower-case hostnames (no `www.`).
pub(crate) const AUTHORITY_TABLE: &[(&str, u64)] = &[
    ("nytimes.com", 85_000_000),
    ("forbes.com", 60_000_000),
    ("businessinsider.com", 40_000_000),
    ("buzzfeed.com", 30_000_000),
    ("cnet.com", 25_000_000),
    ("theverge.com", 20_000_000),
    ("wired.com", 15_000_000),
    ("tomsguide.com", 12_000_000),
    ("pcmag.com", 10_000_000),
    ("reviewed.com", 8_000_000),
    ("goodhousekeeping.com", 18_000_000),
    ("realsimple.com", 7_000_000),
    ("apartmenttherapy.com", 9_000_000),
    ("sleepfoundation.org", 5_000_000),
    ("sleepopolis.com", 3_000_000),
    ("healthline.com", 35_000_000),
    ("verywellfit.com", 12_000_000),
    ("outsideonline.com", 6_000_000),
    ("gearpatrol.com", 2_500_000),
    ("runnersworld.com", 4_000_000),
    ("wirecutter.com", 22_000_000),
    ("epicurious.com", 8_000_000),
    ("bonappetit.com", 10_000_000),
    ("seriouseats.com", 5_000_000),
    ("foodandwine.com", 6_000_000),
    ("vogue.com", 20_000_000),
    ("elle.com", 12_000_000),
    ("instyle.com", 8_000_000),
    ("gq.com", 9_000_000),
    ("wsj.com", 30_000_000),
    ("bloomberg.com", 35_000_000),
    ("reuters.com", 28_000_000),
    ("bbc.com", 90_000_000),
    ("cnn.com", 70_000_000),
];

/// Share of site-wide traffic a single article captures, inclusive bounds.
const ARTICLE_SHARE: (f64, f64) = (0.001, 0.019);

const GOV_RANGE: std::ops::Range<u64> = 100_000..1_100_000;
const ORG_RANGE: std::ops::Range<u64> = 50_000..550_000;
const UNKNOWN_RANGE: std::ops::Range<u64> = 10_000..310_000;

/// Normalize a provider display hostname: trim, lower-case, strip a leading `www.`.
#[must_use]
pub fn normalize_domain(display_domain: &str) -> String {
    let lower = display_domain.trim().to_lowercase();
    match lower.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => lower,
    }
}

/// Baseline audience for a normalized domain, if it is a known publisher.
#[must_use]
pub fn authority_baseline(domain: &str) -> Option<u64> {
    AUTHORITY_TABLE
        .iter()
        .find(|(known, _)| *known == domain)
        .map(|&(_, baseline)| baseline)
}

/// Estimate monthly traffic for one article on `domain`.
///
/// Known publishers yield `floor(baseline × U)` with `U ∈ [0.001, 0.019]`.
/// Unknown `.gov` domains draw from `[100 000, 1 100 000)`, unknown `.org`
/// domains from `[50 000, 550 000)`, everything else from `[10 000, 310 000)`.
/// The figure is an order-of-magnitude guess, not a measurement.
pub fn estimate_traffic<R: Rng>(domain: &str, rng: &mut R) -> u64 {
    if let Some(baseline) = authority_baseline(domain) {
        let share = rng.random_range(ARTICLE_SHARE.0..=ARTICLE_SHARE.1);
        return scale_floor(baseline, share);
    }

    if domain.ends_with(".gov") {
        rng.random_range(GOV_RANGE)
    } else if domain.ends_with(".org") {
        rng.random_range(ORG_RANGE)
    } else {
        rng.random_range(UNKNOWN_RANGE)
    }
}

/// `floor(base × factor)`, saturating at zero for negative products.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub(crate) fn scale_floor(base: u64, factor: f64) -> u64 {
    (base as f64 * factor).floor().max(0.0) as u64
}
