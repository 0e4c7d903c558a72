//! Brand visibility analysis for Brandscope.
//!
//! Finds where a brand shows up in third-party editorial content (via a search
//! provider) and in generative-AI assistant answers (via answer engines), then
//! classifies, attributes and ranks each mention with heuristic traffic and
//! volume estimates. Everything is computed per request; nothing is stored.

pub mod articles;
pub mod classifier;
pub mod error;
pub mod mention;
pub mod planner;
pub mod prompts;
pub mod providers;
pub mod service;
pub mod traffic;
pub mod trend;
pub mod types;
pub mod volume;

pub use articles::aggregate_articles;
pub use classifier::classify_content;
pub use error::{ProviderError, VisibilityError};
pub use mention::{locate_in_answer, locate_in_snippet};
pub use planner::plan_queries;
pub use prompts::{run_prompts, HarvestOutcome, ProbeOutcome, PromptSettings};
pub use providers::{AnswerEngine, SearchProvider, VolumeLookup};
pub use service::{ServiceSettings, VisibilityService};
pub use types::{
    ArticleRecord, ArticlesReport, CapabilityStatus, ContentType, Mention, PromptRecord,
    PromptsReport, SearchItem, SearchPage, TrendPoint,
};
