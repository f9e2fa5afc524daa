//! Source adapter contract and the shared candidate pipeline.

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use std::time::Duration;
use tracing::debug;

use crate::domain::{validate_shape, SearchResult, ValidationMode};

use super::classifier::classify;
use super::extractor::extract;
use super::scorer::{score, ScoreContext};

/// Fixed inter-request delay every adapter applies to stay within informal
/// fair-use limits of the platforms it scrapes.
pub(crate) const REQUEST_DELAY: Duration = Duration::from_secs(1);

lazy_static! {
    static ref REPO_SLUG: Regex =
        Regex::new(r"(?:github|gitlab)\.com/([A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+)").unwrap();
}

/// Extract an `owner/name` slug from a code-hosting URL.
pub(crate) fn repository_slug(url: &str) -> Option<String> {
    REPO_SLUG
        .captures(url)
        .map(|caps| caps[1].trim_end_matches(".git").to_string())
}

/// One external platform queried for MCP candidates.
///
/// `discover` must never propagate a fault: a single candidate's failure is
/// skip-and-continue, and an unreachable platform yields an empty list. The
/// aggregator treats only task-level breakage (panic, deadline) as adapter
/// failure.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Stable adapter identity, used for `source_platform`, the enabled-set
    /// filter, and the cache signature.
    fn id(&self) -> &'static str;

    /// Turn a free-text query into normalized results, best-effort.
    async fn discover(&self, query: &str, limit: usize) -> Vec<SearchResult>;
}

/// Context an adapter knows about a candidate before fetching it.
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateContext<'a> {
    /// Search-result title or link text, possibly empty.
    pub title: &'a str,
    /// Search-result snippet/description, possibly empty.
    pub description: &'a str,
    /// URL the raw content was (or will be) fetched from.
    pub url: &'a str,
    /// `owner/name` repository slug, when the platform exposes one.
    pub repository: Option<&'a str>,
}

/// Run fetched content through classify -> extract -> validate -> score.
///
/// Returns `None` when the classifier rejects the document. Classifier
/// acceptance always produces a result: strict-validation failure is recorded
/// as `validated = false` with no schema attached, never used to drop the
/// candidate (one policy, every call-site).
pub fn build_result(
    content: &str,
    ctx: &CandidateContext<'_>,
    platform: &'static str,
    stars: Option<u64>,
) -> Option<SearchResult> {
    let doc = match classify(content) {
        Ok(doc) => doc,
        Err(rejection) => {
            debug!("Rejected candidate {}: {:?}", ctx.url, rejection);
            return None;
        }
    };

    let meta = extract(&doc, ctx);
    let validated = validate_shape(&doc.value, ValidationMode::Strict).is_ok();
    let confidence_score = score(
        &doc.value,
        &ScoreContext {
            url: ctx.url,
            title: ctx.title,
            description: ctx.description,
            stars,
        },
    );

    Some(SearchResult {
        name: meta.name,
        description: meta.description,
        source_url: ctx.url.to_string(),
        tags: meta.tags,
        domain: meta.domain,
        validated,
        schema: validated.then(|| doc.value.clone()),
        file_type: doc.format,
        repository: ctx.repository.map(str::to_string),
        stars,
        source_platform: platform.to_string(),
        confidence_score,
    })
}
