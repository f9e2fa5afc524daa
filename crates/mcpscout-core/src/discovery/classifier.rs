//! Document classification: is this text an MCP at all?
//!
//! Parsing is an explicit two-stage attempt: JSON first, YAML only when the
//! JSON parse fails. JSON is (in practice) a YAML subset, so trying YAML
//! first would route well-formed JSON through the looser YAML grammar for no
//! benefit. The structural check here is deliberately loose; the strict
//! shape contract lives in `domain::validate_shape`.

use serde_json::Value;

use crate::domain::{FileType, ParsedDocument};

/// Outcome of the two-stage structured parse.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedText {
    Json(Value),
    Yaml(Value),
    Unparseable,
}

/// Why a candidate was turned away.
///
/// Rejection is a normal negative outcome ("not an MCP"), not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Unparseable,
    NotAMapping,
    MissingName,
    MissingTools,
    EmptyTools,
    MalformedTool,
}

/// Attempt to parse text as JSON, then as YAML.
pub fn try_parse(text: &str) -> ParsedText {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return ParsedText::Json(value);
    }

    match serde_yaml::from_str::<serde_json::Value>(text) {
        Ok(value) => ParsedText::Yaml(value),
        Err(_) => ParsedText::Unparseable,
    }
}

/// Loose structural check deciding whether a document is worth extracting
/// metadata from.
///
/// Accepts any mapping carrying a `name` and a non-empty `tools` sequence
/// whose elements each carry `name` and `description`. Pattern and length
/// constraints are NOT applied here; that is the strict pass.
pub fn classify(text: &str) -> Result<ParsedDocument, Rejection> {
    let (format, value) = match try_parse(text) {
        ParsedText::Json(value) => (FileType::Json, value),
        ParsedText::Yaml(value) => (FileType::Yaml, value),
        ParsedText::Unparseable => return Err(Rejection::Unparseable),
    };

    let obj = value.as_object().ok_or(Rejection::NotAMapping)?;

    if !obj.contains_key("name") {
        return Err(Rejection::MissingName);
    }

    let tools = obj
        .get("tools")
        .and_then(Value::as_array)
        .ok_or(Rejection::MissingTools)?;
    if tools.is_empty() {
        return Err(Rejection::EmptyTools);
    }

    for tool in tools {
        let tool = tool.as_object().ok_or(Rejection::MalformedTool)?;
        if !tool.contains_key("name") || !tool.contains_key("description") {
            return Err(Rejection::MalformedTool);
        }
    }

    Ok(ParsedDocument { format, value })
}
