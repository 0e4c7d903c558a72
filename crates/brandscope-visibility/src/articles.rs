//! Article discovery: search, dedup, classify, estimate, rank.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate};
use rand::Rng;

use crate::classifier::classify_content;
use crate::error::ProviderError;
use crate::mention::locate_in_snippet;
use crate::providers::{host_of, SearchProvider};
use crate::traffic::{estimate_traffic, normalize_domain};
use crate::types::{ArticleRecord, ContentType, SearchItem};

/// Display value for articles without a usable publish date.
pub const UNKNOWN_PUBLISH_DATE: &str = "Recent";

/// An article before ranking; it carries no id until the final sort.
struct ArticleDraft {
    title: String,
    domain: String,
    url: String,
    snippet: String,
    publish_date: String,
    monthly_traffic: u64,
    content_type: ContentType,
    brand_mentioned: bool,
    mention_position: Option<u32>,
}

/// Run `queries` in order against `search` and build the ranked article list.
///
/// URLs are deduplicated across all queries (first occurrence wins). The
/// result is sorted by estimated traffic, descending and stable, and ids are
/// assigned `1..=N` in that order.
///
/// # Errors
///
/// Any failed search call aborts the whole run; no partial list is returned.
pub async fn aggregate_articles<R: Rng>(
    search: &dyn SearchProvider,
    queries: &[String],
    brand: &str,
    rng: &mut R,
) -> Result<Vec<ArticleRecord>, ProviderError> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut drafts: Vec<ArticleDraft> = Vec::new();

    for query in queries {
        let page = search.search(query).await?;
        let fetched = page.results.len();

        for item in page.results {
            if !seen.insert(item.url.clone()) {
                continue;
            }
            drafts.push(draft_article(item, brand, rng));
        }

        tracing::debug!(
            provider = search.name(),
            query = %query,
            fetched,
            unique = drafts.len(),
            "article query complete"
        );
    }

    Ok(rank_articles(drafts))
}

fn draft_article<R: Rng>(item: SearchItem, brand: &str, rng: &mut R) -> ArticleDraft {
    let host = if item.display_domain.trim().is_empty() {
        host_of(&item.url)
    } else {
        item.display_domain
    };
    let domain = normalize_domain(&host);
    let content_type = classify_content(&item.title, &item.snippet, &item.url);
    let mention = locate_in_snippet(brand, &item.title, &item.snippet);
    let monthly_traffic = estimate_traffic(&domain, rng);

    ArticleDraft {
        publish_date: format_publish_date(item.publish_date.as_deref()),
        title: item.title,
        domain,
        url: item.url,
        snippet: item.snippet,
        monthly_traffic,
        content_type,
        brand_mentioned: mention.mentioned,
        mention_position: mention.position,
    }
}

fn rank_articles(mut drafts: Vec<ArticleDraft>) -> Vec<ArticleRecord> {
    drafts.sort_by(|a, b| b.monthly_traffic.cmp(&a.monthly_traffic));

    drafts
        .into_iter()
        .enumerate()
        .map(|(idx, draft)| ArticleRecord {
            id: idx + 1,
            title: draft.title,
            publisher: draft.domain.clone(),
            domain: draft.domain,
            url: draft.url,
            content_type: draft.content_type,
            monthly_traffic: draft.monthly_traffic,
            brand_mentioned: draft.brand_mentioned,
            mention_position: draft.mention_position,
            snippet: draft.snippet,
            publish_date: draft.publish_date,
            sponsored: draft.content_type.is_paid(),
        })
        .collect()
}

/// Render a provider publish date as `Mon D, YYYY`.
///
/// Accepts RFC 3339 timestamps, values starting with `YYYY-MM-DD`, and
/// already-formatted `Mon D, YYYY`. Anything else is [`UNKNOWN_PUBLISH_DATE`].
#[must_use]
pub fn format_publish_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return UNKNOWN_PUBLISH_DATE.to_string();
    };

    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| {
            raw.get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        })
        .or_else(|| NaiveDate::parse_from_str(raw, "%b %d, %Y").ok());

    date.map_or_else(
        || UNKNOWN_PUBLISH_DATE.to_string(),
        |d| d.format("%b %-d, %Y").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_rfc3339_timestamp() {
        assert_eq!(
            format_publish_date(Some("2024-03-05T10:15:00+00:00")),
            "Mar 5, 2024"
        );
    }

    #[test]
    fn formats_plain_iso_date() {
        assert_eq!(format_publish_date(Some("2023-11-28")), "Nov 28, 2023");
    }

    #[test]
    fn keeps_already_formatted_date() {
        assert_eq!(format_publish_date(Some("Jan 9, 2025")), "Jan 9, 2025");
    }

    #[test]
    fn unknown_or_relative_dates_are_recent() {
        assert_eq!(format_publish_date(None), "Recent");
        assert_eq!(format_publish_date(Some("")), "Recent");
        assert_eq!(format_publish_date(Some("3 days ago")), "Recent");
    }

    #[test]
    fn ranking_is_stable_for_equal_traffic() {
        let draft = |url: &str, traffic: u64| ArticleDraft {
            title: url.to_string(),
            domain: "example.com".to_string(),
            url: url.to_string(),
            snippet: String::new(),
            publish_date: UNKNOWN_PUBLISH_DATE.to_string(),
            monthly_traffic: traffic,
            content_type: ContentType::Editorial,
            brand_mentioned: false,
            mention_position: None,
        };
        let ranked = rank_articles(vec![
            draft("a", 10),
            draft("b", 30),
            draft("c", 10),
            draft("d", 30),
        ]);
        let order: Vec<(usize, &str)> = ranked.iter().map(|a| (a.id, a.url.as_str())).collect();
        assert_eq!(order, [(1, "b"), (2, "d"), (3, "a"), (4, "c")]);
    }

    #[test]
    fn sponsored_flag_follows_content_type() {
        let mut drafts = Vec::new();
        for content_type in [
            ContentType::Advertorial,
            ContentType::Review,
        ] {
            drafts.push(ArticleDraft {
                title: String::new(),
                domain: "x.com".to_string(),
                url: format!("https://x.com/{content_type}"),
                snippet: String::new(),
                publish_date: UNKNOWN_PUBLISH_DATE.to_string(),
                monthly_traffic: 1,
                content_type,
                brand_mentioned: false,
                mention_position: None,
            });
        }
        let ranked = rank_articles(drafts);
        assert!(ranked[0].sponsored);
        assert!(!ranked[1].sponsored);
    }
}
