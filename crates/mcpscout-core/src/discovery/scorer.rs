//! Heuristic confidence scoring.
//!
//! A deterministic additive model, not a learned one. The exact increments
//! are load-bearing: downstream output-compatibility tests reproduce them,
//! so changing a weight is a breaking change even when it would "rank
//! better".

use serde_json::Value;

/// Hosts whose presence in a source URL earns the code-hosting bonus.
const CODE_HOSTS: &[&str] = &["github.com", "gitlab.com"];

/// Marker substring in filenames/URLs that strongly suggests an MCP file.
const MCP_FILE_MARKER: &str = ".mcp.";

/// Non-document signals available at scoring time.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreContext<'a> {
    pub url: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    /// Repository stars, when the platform exposes a count. Platforms that
    /// don't leave this `None`, so scores are not comparable across
    /// platforms; known limitation.
    pub stars: Option<u64>,
}

/// Compute the confidence score for a document, clamped to `[0, 1]`.
///
/// Must never fail: malformed or empty values simply earn no increments and
/// come out at the 0.5 base.
pub fn score(doc: &Value, ctx: &ScoreContext<'_>) -> f64 {
    let mut score: f64 = 0.5;

    // Schema completeness
    if doc
        .get("description")
        .and_then(Value::as_str)
        .is_some_and(|d| !d.is_empty())
    {
        score += 0.1;
    }
    if doc.get("version").is_some() {
        score += 0.1;
    }

    let tools = doc
        .get("tools")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    if tools.len() > 1 {
        score += 0.1;
    }

    // Tool quality
    for tool in tools {
        if tool
            .get("parameters")
            .and_then(Value::as_object)
            .is_some_and(|p| !p.is_empty())
        {
            score += 0.05;
        }
        if tool
            .get("description")
            .and_then(Value::as_str)
            .is_some_and(|d| d.len() > 20)
        {
            score += 0.05;
        }
    }

    // Repository metrics (when the platform exposes them)
    if let Some(stars) = ctx.stars {
        if stars > 10 {
            score += 0.1;
        }
        if stars > 100 {
            score += 0.1;
        }
    }

    // URL quality
    if CODE_HOSTS.iter().any(|host| ctx.url.contains(host)) {
        score += 0.1;
    }
    if ctx.url.contains(MCP_FILE_MARKER) {
        score += 0.1;
    }

    // Title/description quality
    let text = format!("{} {}", ctx.title, ctx.description).to_lowercase();
    if text.contains("mcp") || text.contains("model context protocol") {
        score += 0.1;
    }

    score.clamp(0.0, 1.0)
}
