//! AI prompt discovery and probing.
//!
//! The run has three stages:
//!
//! 1. Harvest candidate prompts from two concurrent exploratory searches,
//!    topping up with brand-templated fallbacks and capping the list.
//! 2. Look up authoritative volumes for every candidate in one batch.
//! 3. Ask every answer engine about every candidate, one call at a time.
//!
//! Stage 1 and 3 failures are per-unit: each is recorded as an outcome value,
//! logged, and the run continues. Stage 2 failure falls back to heuristics.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use rand::Rng;

use crate::mention::locate_in_answer;
use crate::providers::{AnswerEngine, SearchProvider, VolumeLookup};
use crate::trend::synthesize_trend;
use crate::types::{Mention, PromptRecord, SearchPage, TrendPoint};
use crate::volume::estimate_volume;

/// Related searches taken from each exploratory call.
const RELATED_SEARCHES_PER_CALL: usize = 5;

/// Prompts used when harvesting yields too few candidates, in order.
const FALLBACK_TEMPLATES: &[&str] = &[
    "Best {brand} alternatives",
    "Is {brand} worth buying?",
    "{brand} vs competitors",
    "What is the best {brand} product?",
    "{brand} review",
    "Top 10 brands like {brand}",
    "How does {brand} compare to similar brands?",
    "Best products similar to {brand}",
    "Where to buy {brand}",
    "Is {brand} legit?",
    "Why is {brand} so popular?",
    "Which {brand} product should I buy?",
];

/// Tunables for a prompt run.
#[derive(Debug, Clone)]
pub struct PromptSettings {
    /// Maximum number of candidate prompts probed.
    pub prompt_limit: usize,
    /// Pause between consecutive engine calls.
    pub inter_request_delay: Duration,
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            prompt_limit: 10,
            inter_request_delay: Duration::from_millis(250),
        }
    }
}

/// Result of one exploratory harvest search.
#[derive(Debug)]
pub enum HarvestOutcome {
    Collected { query: String, page: SearchPage },
    Failed { query: String, reason: String },
}

/// Result of asking one engine about one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Answered(Mention),
    Failed { reason: String },
}

/// One engine's outcome for a prompt, tagged with the engine name.
#[derive(Debug, Clone)]
pub struct EngineProbe {
    pub engine: String,
    pub outcome: ProbeOutcome,
}

/// A probed prompt before ranking.
struct PromptDraft {
    prompt: String,
    monthly_volume: u64,
    mention: Mention,
    engines: Vec<String>,
    trend: Vec<TrendPoint>,
}

/// Ranked prompts plus the number of engine calls that failed.
#[derive(Debug)]
pub struct PromptRun {
    pub prompts: Vec<PromptRecord>,
    pub failed_probes: usize,
}

/// Queries issued concurrently during harvesting.
#[must_use]
pub fn harvest_queries(brand: &str) -> [String; 2] {
    [brand.to_string(), format!("best {brand} alternatives")]
}

/// Brand-templated fallback prompts, in priority order.
#[must_use]
pub fn fallback_prompts(brand: &str) -> Vec<String> {
    FALLBACK_TEMPLATES
        .iter()
        .map(|template| template.replace("{brand}", brand))
        .collect()
}

/// Run both exploratory searches concurrently and record each outcome.
pub async fn harvest(search: &dyn SearchProvider, brand: &str) -> Vec<HarvestOutcome> {
    let [direct, alternatives] = harvest_queries(brand);
    let (direct_result, alternatives_result) =
        tokio::join!(search.search(&direct), search.search(&alternatives));

    [(direct, direct_result), (alternatives, alternatives_result)]
        .into_iter()
        .map(|(query, result)| match result {
            Ok(page) => HarvestOutcome::Collected { query, page },
            Err(e) => {
                tracing::warn!(
                    provider = search.name(),
                    query = %query,
                    error = %e,
                    "prompt harvest search failed"
                );
                HarvestOutcome::Failed {
                    query,
                    reason: e.to_string(),
                }
            }
        })
        .collect()
}

/// Build the ordered, deduplicated candidate list from harvest outcomes.
///
/// Each successful call contributes its related questions, then its first
/// five related searches. Fallbacks fill the list up to `limit`, which also
/// caps the result. Dedup is case-insensitive on trimmed text.
#[must_use]
pub fn build_candidates(brand: &str, outcomes: &[HarvestOutcome], limit: usize) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut candidates: Vec<String> = Vec::new();
    let mut push = |text: &str, candidates: &mut Vec<String>| {
        let text = text.trim();
        if !text.is_empty() && seen.insert(text.to_lowercase()) {
            candidates.push(text.to_string());
        }
    };

    for outcome in outcomes {
        if let HarvestOutcome::Collected { page, .. } = outcome {
            for question in &page.related_questions {
                push(question, &mut candidates);
            }
            for related in page.related_searches.iter().take(RELATED_SEARCHES_PER_CALL) {
                push(related, &mut candidates);
            }
        }
    }

    for fallback in fallback_prompts(brand) {
        if candidates.len() >= limit {
            break;
        }
        push(&fallback, &mut candidates);
    }

    candidates.truncate(limit);
    candidates
}

/// One batched volume lookup; any failure yields an empty map.
pub async fn lookup_volumes(
    lookup: Option<&dyn VolumeLookup>,
    prompts: &[String],
) -> HashMap<String, u64> {
    let Some(lookup) = lookup else {
        return HashMap::new();
    };

    match lookup.volumes(prompts).await {
        Ok(volumes) => {
            tracing::debug!(
                provider = lookup.name(),
                requested = prompts.len(),
                found = volumes.len(),
                "volume lookup complete"
            );
            volumes
        }
        Err(e) => {
            tracing::warn!(
                provider = lookup.name(),
                error = %e,
                "volume lookup failed, using heuristic estimates"
            );
            HashMap::new()
        }
    }
}

/// Authoritative volume for `prompt`, matching exactly first, then ignoring case.
fn resolve_volume(volumes: &HashMap<String, u64>, prompt: &str) -> Option<u64> {
    volumes.get(prompt).copied().or_else(|| {
        let lower = prompt.to_lowercase();
        volumes
            .iter()
            .find(|(term, _)| term.to_lowercase() == lower)
            .map(|(_, &volume)| volume)
    })
}

/// Ask every engine about every prompt, strictly one call at a time.
///
/// Returns the per-engine outcomes for each prompt, in prompt order.
pub async fn probe_all(
    engines: &[Arc<dyn AnswerEngine>],
    prompts: &[String],
    brand: &str,
    delay: Duration,
) -> Vec<Vec<EngineProbe>> {
    let mut results = Vec::with_capacity(prompts.len());
    let mut first_call = true;

    for prompt in prompts {
        let mut probes = Vec::with_capacity(engines.len());
        for engine in engines {
            if !first_call && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            first_call = false;

            let outcome = match engine.complete(prompt).await {
                Ok(answer) => ProbeOutcome::Answered(locate_in_answer(brand, &answer)),
                Err(e) => {
                    tracing::warn!(
                        engine = engine.name(),
                        prompt = %prompt,
                        error = %e,
                        "engine probe failed, recording no mention"
                    );
                    ProbeOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
            };
            probes.push(EngineProbe {
                engine: engine.name().to_string(),
                outcome,
            });
        }
        results.push(probes);
    }

    results
}

/// Combine one prompt's engine outcomes into `(mention, mentioning engines)`.
///
/// The position is the first non-null one in engine order.
#[must_use]
pub fn merge_probes(probes: &[EngineProbe]) -> (Mention, Vec<String>) {
    let mut engines = Vec::new();
    let mut position = None;

    for probe in probes {
        if let ProbeOutcome::Answered(mention) = &probe.outcome {
            if mention.mentioned {
                engines.push(probe.engine.clone());
                position = position.or(mention.position);
            }
        }
    }

    let mention = if engines.is_empty() {
        Mention::absent()
    } else {
        Mention {
            mentioned: true,
            position,
        }
    };
    (mention, engines)
}

/// Full prompt run for an already validated brand.
///
/// The trend window ends with the month of `anchor`.
pub async fn run_prompts<R: Rng>(
    search: &dyn SearchProvider,
    engines: &[Arc<dyn AnswerEngine>],
    volumes: Option<&dyn VolumeLookup>,
    brand: &str,
    settings: &PromptSettings,
    anchor: NaiveDate,
    rng: &mut R,
) -> PromptRun {
    let outcomes = harvest(search, brand).await;
    let candidates = build_candidates(brand, &outcomes, settings.prompt_limit);
    tracing::info!(
        brand,
        harvest_failures = outcomes
            .iter()
            .filter(|o| matches!(o, HarvestOutcome::Failed { .. }))
            .count(),
        candidates = candidates.len(),
        "prompt candidates ready"
    );

    let known_volumes = lookup_volumes(volumes, &candidates).await;
    let probes = probe_all(engines, &candidates, brand, settings.inter_request_delay).await;

    let failed_probes = probes
        .iter()
        .flatten()
        .filter(|probe| matches!(probe.outcome, ProbeOutcome::Failed { .. }))
        .count();

    let mut drafts: Vec<PromptDraft> = candidates
        .into_iter()
        .zip(probes)
        .map(|(prompt, prompt_probes)| {
            let (mention, engines) = merge_probes(&prompt_probes);
            let monthly_volume = resolve_volume(&known_volumes, &prompt)
                .unwrap_or_else(|| estimate_volume(&prompt, brand, rng));
            PromptDraft {
                trend: synthesize_trend(monthly_volume, anchor, rng),
                prompt,
                monthly_volume,
                mention,
                engines,
            }
        })
        .collect();
    drafts.sort_by(|a, b| b.monthly_volume.cmp(&a.monthly_volume));

    let prompts = drafts
        .into_iter()
        .enumerate()
        .map(|(idx, draft)| PromptRecord {
            id: idx + 1,
            prompt: draft.prompt,
            monthly_volume: draft.monthly_volume,
            brand_mentioned: draft.mention.mentioned,
            mention_position: draft.mention.position,
            engines: draft.engines,
            trend: draft.trend,
        })
        .collect();

    PromptRun {
        prompts,
        failed_probes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collected(questions: &[&str], searches: &[&str]) -> HarvestOutcome {
        HarvestOutcome::Collected {
            query: "q".to_string(),
            page: SearchPage {
                results: Vec::new(),
                related_questions: questions.iter().map(ToString::to_string).collect(),
                related_searches: searches.iter().map(ToString::to_string).collect(),
            },
        }
    }

    fn failed() -> HarvestOutcome {
        HarvestOutcome::Failed {
            query: "q".to_string(),
            reason: "boom".to_string(),
        }
    }

    #[test]
    fn fallbacks_are_brand_templated() {
        let prompts = fallback_prompts("Acme");
        assert!(prompts.len() >= 10);
        assert_eq!(prompts[0], "Best Acme alternatives");
        assert_eq!(prompts[1], "Is Acme worth buying?");
        assert!(prompts.iter().all(|p| p.contains("Acme")));
    }

    #[test]
    fn questions_come_before_searches_and_searches_are_capped() {
        let outcomes = [collected(
            &["Is Acme good?"],
            &["s1", "s2", "s3", "s4", "s5", "s6", "s7"],
        )];
        let candidates = build_candidates("Acme", &outcomes, 10);
        assert_eq!(candidates[0], "Is Acme good?");
        assert_eq!(&candidates[1..6], ["s1", "s2", "s3", "s4", "s5"]);
        assert!(!candidates.contains(&"s6".to_string()));
        assert_eq!(candidates.len(), 10);
    }

    #[test]
    fn both_harvests_failing_yields_fallbacks_only() {
        let candidates = build_candidates("Acme", &[failed(), failed()], 10);
        assert_eq!(candidates, fallback_prompts("Acme")[..10].to_vec());
    }

    #[test]
    fn one_failed_harvest_keeps_the_other() {
        let candidates =
            build_candidates("Acme", &[failed(), collected(&["Does Acme ship?"], &[])], 10);
        assert_eq!(candidates[0], "Does Acme ship?");
        assert_eq!(candidates.len(), 10);
    }

    #[test]
    fn candidates_dedup_case_insensitively() {
        let outcomes = [
            collected(&["Best Acme alternatives"], &[]),
            collected(&["best acme alternatives", " Best Acme alternatives "], &[]),
        ];
        let candidates = build_candidates("Acme", &outcomes, 10);
        let lowered: HashSet<String> = candidates.iter().map(|c| c.to_lowercase()).collect();
        assert_eq!(lowered.len(), candidates.len());
        assert_eq!(candidates[0], "Best Acme alternatives");
    }

    #[test]
    fn limit_truncates_harvested_candidates() {
        let many: Vec<String> = (0..20).map(|i| format!("question {i}")).collect();
        let refs: Vec<&str> = many.iter().map(String::as_str).collect();
        let candidates = build_candidates("Acme", &[collected(&refs, &[])], 10);
        assert_eq!(candidates.len(), 10);
        assert_eq!(candidates[9], "question 9");
    }

    #[test]
    fn merge_takes_first_non_null_position_in_engine_order() {
        let probes = [
            EngineProbe {
                engine: "ChatGPT".to_string(),
                outcome: ProbeOutcome::Answered(Mention::absent()),
            },
            EngineProbe {
                engine: "Perplexity".to_string(),
                outcome: ProbeOutcome::Answered(Mention::at(3)),
            },
            EngineProbe {
                engine: "Other".to_string(),
                outcome: ProbeOutcome::Answered(Mention::at(1)),
            },
        ];
        let (mention, engines) = merge_probes(&probes);
        assert_eq!(mention, Mention::at(3));
        assert_eq!(engines, ["Perplexity", "Other"]);
    }

    #[test]
    fn merge_of_failures_is_no_mention() {
        let probes = [EngineProbe {
            engine: "ChatGPT".to_string(),
            outcome: ProbeOutcome::Failed {
                reason: "quota".to_string(),
            },
        }];
        let (mention, engines) = merge_probes(&probes);
        assert_eq!(mention, Mention::absent());
        assert!(engines.is_empty());
    }

    #[test]
    fn resolve_volume_falls_back_to_case_insensitive_match() {
        let volumes = HashMap::from([("acme review".to_string(), 900_u64)]);
        assert_eq!(resolve_volume(&volumes, "acme review"), Some(900));
        assert_eq!(resolve_volume(&volumes, "Acme Review"), Some(900));
        assert_eq!(resolve_volume(&volumes, "acme legit"), None);
    }
}
