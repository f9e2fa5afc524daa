//! Metadata extraction from classified documents.
//!
//! Domain classification is deterministic and order-sensitive: the keyword
//! table is scanned top to bottom and the first domain with any substring
//! match wins. Reordering the table changes results; don't.

use crate::domain::ParsedDocument;

use super::source::CandidateContext;

/// Ordered domain vocabulary. First match wins.
const DOMAIN_KEYWORDS: &[(&str, &[&str])] = &[
    ("weather", &["weather", "climate", "forecast", "temperature", "meteorology"]),
    ("finance", &["finance", "trading", "stock", "crypto", "payment", "banking"]),
    ("travel", &["travel", "booking", "hotel", "flight", "airbnb", "tourism"]),
    ("productivity", &["calendar", "task", "note", "email", "schedule", "todo"]),
    ("development", &["code", "git", "github", "deploy", "api", "programming"]),
    ("social", &["social", "twitter", "facebook", "instagram", "post", "media"]),
    ("ecommerce", &["shop", "store", "product", "cart", "order", "commerce"]),
    ("data", &["data", "analytics", "database", "query", "search", "analysis"]),
    ("ai", &["ai", "ml", "llm", "gpt", "model", "intelligence"]),
    ("communication", &["chat", "message", "slack", "discord", "teams"]),
];

const DEFAULT_DOMAIN: &str = "general";

/// Tag vocabulary applied to name/description/context text.
const TAG_PATTERNS: &[(&str, &[&str])] = &[
    ("api", &["api", "rest", "endpoint", "service"]),
    ("ai", &["ai", "ml", "llm", "gpt", "model"]),
    ("web", &["web", "http", "url", "browser", "scraping"]),
    ("database", &["db", "database", "sql", "mongo", "redis"]),
    ("cloud", &["aws", "azure", "gcp", "cloud", "serverless"]),
    ("automation", &["auto", "script", "workflow", "cron"]),
    ("integration", &["integrate", "connect", "sync", "webhook"]),
    ("realtime", &["realtime", "live", "stream", "websocket"]),
    ("security", &["auth", "security", "encrypt", "token"]),
    ("monitoring", &["monitor", "log", "metric", "alert"]),
];

/// Filename suffixes stripped when deriving a name. Longest first so the
/// compound MCP suffixes win over the bare extensions.
const MCP_FILE_SUFFIXES: &[&str] = &[
    ".mcp.json",
    ".mcp.yaml",
    ".mcp.yml",
    ".json",
    ".yaml",
    ".yml",
];

/// Metadata derived from a document plus its search context.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedMetadata {
    pub name: String,
    pub description: String,
    pub domain: String,
    pub tags: Vec<String>,
}

/// Derive name, description, domain, and tags for a classified document.
pub fn extract(doc: &ParsedDocument, ctx: &CandidateContext<'_>) -> ExtractedMetadata {
    let name = extract_name(doc, ctx);
    let description = extract_description(doc, ctx);
    let domain = classify_domain(doc, &name, &description);
    let tags = extract_tags(doc, ctx, &name, &description, &domain);

    ExtractedMetadata {
        name,
        description,
        domain,
        tags,
    }
}

fn extract_name(doc: &ParsedDocument, ctx: &CandidateContext<'_>) -> String {
    if let Some(name) = doc.name() {
        if !name.is_empty() {
            return name.to_string();
        }
    }

    let title = strip_mcp_suffixes(ctx.title.trim());
    if !title.is_empty() {
        return title.to_string();
    }

    let filename = ctx.url.rsplit('/').next().unwrap_or("");
    let filename = strip_mcp_suffixes(filename);
    if !filename.is_empty() {
        return filename.to_string();
    }

    "unknown-mcp".to_string()
}

fn extract_description(doc: &ParsedDocument, ctx: &CandidateContext<'_>) -> String {
    if let Some(description) = doc.description() {
        if !description.is_empty() {
            return description.to_string();
        }
    }

    if !ctx.description.trim().is_empty() {
        return ctx.description.trim().to_string();
    }

    match ctx.repository {
        Some(repository) => format!("MCP from {}", repository),
        None => format!("MCP found at {}", ctx.url),
    }
}

fn classify_domain(doc: &ParsedDocument, name: &str, description: &str) -> String {
    if let Some(domain) = doc.explicit_domain() {
        if !domain.is_empty() {
            return domain.to_string();
        }
    }

    let text = format!("{} {}", name, description).to_lowercase();
    for (domain, keywords) in DOMAIN_KEYWORDS {
        if keywords.iter().any(|keyword| text.contains(keyword)) {
            return (*domain).to_string();
        }
    }

    DEFAULT_DOMAIN.to_string()
}

fn extract_tags(
    doc: &ParsedDocument,
    ctx: &CandidateContext<'_>,
    name: &str,
    description: &str,
    domain: &str,
) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    let mut push = |tag: String| {
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    };

    for tag in doc.explicit_tags() {
        push(tag);
    }

    if domain != DEFAULT_DOMAIN {
        push(domain.to_string());
    }

    let text = format!("{} {} {} {}", ctx.title, ctx.description, name, description).to_lowercase();
    for (tag, patterns) in TAG_PATTERNS {
        if patterns.iter().any(|pattern| text.contains(pattern)) {
            push((*tag).to_string());
        }
    }

    for tool in doc.tools() {
        let tool_name = tool
            .get("name")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("")
            .to_lowercase();

        if tool_name.contains("search") {
            push("search".to_string());
        }
        if ["fetch", "get", "retrieve"].iter().any(|w| tool_name.contains(w)) {
            push("retrieval".to_string());
        }
        if ["create", "add", "post"].iter().any(|w| tool_name.contains(w)) {
            push("creation".to_string());
        }
        if ["update", "edit", "modify"].iter().any(|w| tool_name.contains(w)) {
            push("modification".to_string());
        }

        // The leading token of a tool name is usually its verb; keep it.
        if let Some(prefix) = tool_name.split('_').next() {
            push(prefix.to_string());
        }
    }

    tags
}

fn strip_mcp_suffixes(filename: &str) -> &str {
    for suffix in MCP_FILE_SUFFIXES {
        if let Some(stripped) = filename.strip_suffix(suffix) {
            return stripped;
        }
    }
    filename
}
