//! Rule-based content-type classifier for discovered articles.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::ContentType;

static NUMBER_THEN_SUPERLATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+\s+(best|top|great|amazing|must.have)").expect("valid listicle regex")
});

static SUPERLATIVE_THEN_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(best|top)\s+\d+").expect("valid listicle regex"));

static BEST_OF_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"best .* of \d{4}").expect("valid best-of-year regex"));

type Rule = (ContentType, fn(&str) -> bool);

/// Classification cascade, highest precedence first.
///
/// The first rule whose predicate matches decides the label; later rules are
/// never consulted. Predicates receive the lower-cased `title snippet url`
/// text. Anything that matches no rule is [`ContentType::Editorial`].
pub(crate) const RULES: &[Rule] = &[
    (ContentType::Sponsored, is_sponsored),
    (ContentType::Advertorial, is_advertorial),
    (ContentType::Listicle, is_listicle),
    (ContentType::ProductRoundup, is_product_roundup),
    (ContentType::Comparison, is_comparison),
    (ContentType::BuyingGuide, is_buying_guide),
    (ContentType::Review, is_review),
    (ContentType::News, is_news),
];

/// Assign exactly one content-type label to a search result.
#[must_use]
pub fn classify_content(title: &str, snippet: &str, url: &str) -> ContentType {
    let text = format!("{title} {snippet} {url}").to_lowercase();
    RULES
        .iter()
        .find(|(_, matches)| matches(&text))
        .map_or(ContentType::Editorial, |&(label, _)| label)
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| text.contains(needle))
}

fn is_sponsored(text: &str) -> bool {
    contains_any(
        text,
        &["sponsor", "paid post", "paid content", "partner content"],
    )
}

fn is_advertorial(text: &str) -> bool {
    contains_any(text, &["advertorial", "advertisement", "promoted"])
}

fn is_listicle(text: &str) -> bool {
    NUMBER_THEN_SUPERLATIVE.is_match(text)
        || SUPERLATIVE_THEN_NUMBER.is_match(text)
        || contains_any(text, &["ranked", "our picks"])
        || (BEST_OF_YEAR.is_match(text) && text.contains("list"))
}

fn is_product_roundup(text: &str) -> bool {
    contains_any(
        text,
        &[
            "roundup",
            "we tested",
            "we tried",
            "product round",
            "top picks",
        ],
    ) || (text.contains("editor") && text.contains("pick"))
}

fn is_comparison(text: &str) -> bool {
    contains_any(
        text,
        &[
            "vs",
            "versus",
            "compared",
            "comparison",
            "head-to-head",
            "head to head",
        ],
    )
}

fn is_buying_guide(text: &str) -> bool {
    contains_any(
        text,
        &["buying guide", "how to choose", "what to look for"],
    ) || (text.contains("buyer") && text.contains("guide"))
}

fn is_review(text: &str) -> bool {
    contains_any(
        text,
        &[
            "review",
            "we tested",
            "hands on",
            "hands-on",
            "after using",
            "months of",
        ],
    )
}

fn is_news(text: &str) -> bool {
    contains_any(
        text,
        &[
            "announces",
            "launches",
            "new product",
            "breaking",
            "report:",
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(title: &str) -> ContentType {
        classify_content(title, "", "https://example.com/a")
    }

    #[test]
    fn rules_cover_every_label_but_the_default() {
        let labels: Vec<ContentType> = RULES.iter().map(|&(label, _)| label).collect();
        assert_eq!(
            labels,
            [
                ContentType::Sponsored,
                ContentType::Advertorial,
                ContentType::Listicle,
                ContentType::ProductRoundup,
                ContentType::Comparison,
                ContentType::BuyingGuide,
                ContentType::Review,
                ContentType::News,
            ]
        );
    }

    #[test]
    fn sponsored_disclosures() {
        assert_eq!(classify("Sponsored: New Shoe Launch"), ContentType::Sponsored);
        assert_eq!(classify("A paid post about socks"), ContentType::Sponsored);
        assert_eq!(classify("Partner content from Acme"), ContentType::Sponsored);
    }

    #[test]
    fn advertorial_markers() {
        assert_eq!(classify("Advertorial: meet Acme"), ContentType::Advertorial);
        assert_eq!(classify("Promoted story"), ContentType::Advertorial);
    }

    #[test]
    fn listicle_numeric_superlatives() {
        assert_eq!(classify("10 best running shoes"), ContentType::Listicle);
        assert_eq!(classify("Top 5 blenders"), ContentType::Listicle);
        assert_eq!(classify("12 must-have gadgets"), ContentType::Listicle);
        assert_eq!(classify("Headphones ranked"), ContentType::Listicle);
    }

    #[test]
    fn listicle_best_of_year_needs_list() {
        assert_eq!(
            classify("The best mattress of 2024: the full list"),
            ContentType::Listicle
        );
        assert_eq!(classify("The best mattress of 2024"), ContentType::Editorial);
    }

    #[test]
    fn product_roundup_markers() {
        assert_eq!(classify("Spring gadget roundup"), ContentType::ProductRoundup);
        assert_eq!(classify("We tried every cold brew"), ContentType::ProductRoundup);
        assert_eq!(classify("Editor's pick: pillows"), ContentType::ProductRoundup);
    }

    #[test]
    fn comparison_markers() {
        assert_eq!(classify("Nike vs Adidas"), ContentType::Comparison);
        assert_eq!(classify("Casper versus Purple"), ContentType::Comparison);
        assert_eq!(classify("A head to head test"), ContentType::Comparison);
    }

    #[test]
    fn buying_guide_markers() {
        assert_eq!(classify("How to choose a kettle"), ContentType::BuyingGuide);
        assert_eq!(classify("The buyer's guide to tents"), ContentType::BuyingGuide);
    }

    #[test]
    fn review_markers() {
        assert_eq!(classify("Acme kettle review"), ContentType::Review);
        assert_eq!(classify("Hands-on with the Acme 2"), ContentType::Review);
        assert_eq!(classify("After using it for a year"), ContentType::Review);
    }

    #[test]
    fn news_markers() {
        assert_eq!(classify("Acme announces a kettle"), ContentType::News);
        assert_eq!(classify("Report: Acme is growing"), ContentType::News);
    }

    #[test]
    fn editorial_is_the_default() {
        assert_eq!(classify("Why kettles matter"), ContentType::Editorial);
        assert_eq!(classify_content("", "", ""), ContentType::Editorial);
    }

    #[test]
    fn sponsored_beats_review() {
        assert_eq!(
            classify("Sponsored review of the Acme kettle"),
            ContentType::Sponsored
        );
    }

    #[test]
    fn roundup_beats_review_for_we_tested() {
        assert_eq!(classify("We tested 3 kettles"), ContentType::ProductRoundup);
    }

    #[test]
    fn listicle_title_beats_our_picks_snippet() {
        let label = classify_content("10 Best Running Shoes of 2024", "our picks", "x.com/a");
        assert_eq!(label, ContentType::Listicle);
    }

    #[test]
    fn url_participates_in_classification() {
        let label = classify_content("Acme kettle", "", "https://example.com/reviews/acme");
        assert_eq!(label, ContentType::Review);
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(classify("BREAKING: ACME LAUNCHES"), ContentType::News);
    }
}
