//! Brand mention detection for search snippets and assistant answers.
//!
//! Both locators answer the same question: is the brand referenced, and how
//! prominently? An explicit rank ("#2 Acme", "1. Acme") wins when one can be
//! read from the text; otherwise the rank is bucketed from where the first
//! occurrence sits. The explicit-rank patterns are best-effort and can misfire
//! on brand names that are also common words or numbers.

use regex::Regex;

use crate::types::Mention;

/// Locate a brand in a search result's title and snippet.
///
/// Only the snippet is searched for an explicit rank. Without one, the
/// character offset of the first occurrence in `"{title} {snippet}"` is
/// bucketed: `< 100` → 1, `< 250` → 2, `< 500` → 3, else 4.
#[must_use]
pub fn locate_in_snippet(brand: &str, title: &str, snippet: &str) -> Mention {
    let brand_lower = brand.to_lowercase();
    if brand_lower.is_empty() {
        return Mention::absent();
    }

    let text = format!("{title} {snippet}").to_lowercase();
    let Some(byte_idx) = text.find(&brand_lower) else {
        return Mention::absent();
    };

    if let Some(rank) = snippet_rank(&brand_lower, snippet) {
        return Mention::at(rank);
    }

    let offset = text[..byte_idx].chars().count();
    let position = match offset {
        0..=99 => 1,
        100..=249 => 2,
        250..=499 => 3,
        _ => 4,
    };
    Mention::at(position)
}

/// Locate a brand in a free-form assistant answer.
///
/// An explicit rank is read from a numbered list item (`1.`, `1)` or `1 `)
/// whose line contains the brand. Without one, the relative offset of the
/// first occurrence is bucketed: `< 0.15` → 1, `< 0.35` → 2, `< 0.6` → 3,
/// else 4.
#[must_use]
pub fn locate_in_answer(brand: &str, answer: &str) -> Mention {
    let brand_lower = brand.to_lowercase();
    if brand_lower.is_empty() {
        return Mention::absent();
    }

    let text = answer.to_lowercase();
    let Some(byte_idx) = text.find(&brand_lower) else {
        return Mention::absent();
    };

    if let Some(rank) = list_rank(&brand_lower, answer) {
        return Mention::at(rank);
    }

    let offset = text[..byte_idx].chars().count();
    let total = text.chars().count().max(1);
    #[allow(clippy::cast_precision_loss)]
    let relative = offset as f64 / total as f64;
    let position = if relative < 0.15 {
        1
    } else if relative < 0.35 {
        2
    } else if relative < 0.6 {
        3
    } else {
        4
    };
    Mention::at(position)
}

/// `#N brand` or `brand is/at/ranked/comes in at #N` inside a snippet.
fn snippet_rank(brand_lower: &str, snippet: &str) -> Option<u32> {
    let brand = regex::escape(brand_lower);
    let pattern = format!(
        r"(?i)#?(\d+)[^\w]*{brand}|{brand}[^\w]*(?:is|at|ranked|comes in at)?[^\w]*#?(\d+)"
    );
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(snippet)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|&rank| rank > 0)
}

/// First numbered list item mentioning the brand, e.g. `2. **Acme** - ...`.
fn list_rank(brand_lower: &str, answer: &str) -> Option<u32> {
    let brand = regex::escape(brand_lower);
    let pattern = format!(r"(?im)^[\s>*#-]*(\d{{1,3}})(?:[.)]|\s)[^\n]*?{brand}");
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(answer)?;
    caps.get(1)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|&rank| rank > 0)
}
