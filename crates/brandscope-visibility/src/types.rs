use std::fmt;

use serde::Serialize;

/// Closed taxonomy of editorial content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ContentType {
    Sponsored,
    Advertorial,
    Listicle,
    #[serde(rename = "Product Roundup")]
    ProductRoundup,
    Comparison,
    #[serde(rename = "Buying Guide")]
    BuyingGuide,
    Review,
    News,
    Editorial,
}

impl ContentType {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ContentType::Sponsored => "Sponsored",
            ContentType::Advertorial => "Advertorial",
            ContentType::Listicle => "Listicle",
            ContentType::ProductRoundup => "Product Roundup",
            ContentType::Comparison => "Comparison",
            ContentType::BuyingGuide => "Buying Guide",
            ContentType::Review => "Review",
            ContentType::News => "News",
            ContentType::Editorial => "Editorial",
        }
    }

    /// Paid placements: sponsored posts and advertorials.
    #[must_use]
    pub fn is_paid(self) -> bool {
        matches!(self, ContentType::Sponsored | ContentType::Advertorial)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether and where a brand is referenced in a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Mention {
    pub mentioned: bool,
    /// 1 = most prominent. Always `None` when `mentioned` is false.
    pub position: Option<u32>,
}

impl Mention {
    #[must_use]
    pub const fn absent() -> Self {
        Self {
            mentioned: false,
            position: None,
        }
    }

    #[must_use]
    pub const fn at(position: u32) -> Self {
        Self {
            mentioned: true,
            position: Some(position),
        }
    }
}

/// One organic result returned by a search provider.
#[derive(Debug, Clone, Default)]
pub struct SearchItem {
    pub title: String,
    pub url: String,
    /// Hostname as displayed by the provider, e.g. `www.forbes.com`.
    pub display_domain: String,
    pub snippet: String,
    pub publish_date: Option<String>,
}

/// Everything one search call returns, in provider order.
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    pub results: Vec<SearchItem>,
    pub related_questions: Vec<String>,
    pub related_searches: Vec<String>,
}

/// One discovered piece of third-party content.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleRecord {
    /// Dense 1-based rank by estimated traffic.
    pub id: usize,
    pub title: String,
    pub publisher: String,
    pub domain: String,
    pub url: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub monthly_traffic: u64,
    pub brand_mentioned: bool,
    pub mention_position: Option<u32>,
    pub snippet: String,
    /// `Mon D, YYYY` or `Recent` when the provider gave no usable date.
    pub publish_date: String,
    pub sponsored: bool,
}

/// One month of a synthetic volume trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    /// Month label, e.g. `Mar 2026`.
    pub period: String,
    pub volume: u64,
}

/// One candidate question a user might put to a generative-AI assistant.
#[derive(Debug, Clone, Serialize)]
pub struct PromptRecord {
    /// Dense 1-based rank by monthly volume.
    pub id: usize,
    pub prompt: String,
    pub monthly_volume: u64,
    pub brand_mentioned: bool,
    pub mention_position: Option<u32>,
    /// Engines whose answer mentioned the brand, in engine order.
    pub engines: Vec<String>,
    /// Six months, oldest first, ending with the current month.
    pub trend: Vec<TrendPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticlesReport {
    pub brand: String,
    pub total: usize,
    pub articles: Vec<ArticleRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PromptsReport {
    pub brand: String,
    pub total: usize,
    pub prompts: Vec<PromptRecord>,
    /// Engine calls that failed and were recorded as "no mention".
    pub failed_probes: usize,
}

/// Which external capabilities are wired up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilityStatus {
    pub search: bool,
    pub answer_engine: bool,
    pub volume_lookup: bool,
    pub search_provider: Option<String>,
    pub answer_engines: Vec<String>,
}
