//! Parsed documents and the MCP shape contract.
//!
//! Two validation passes exist on purpose and must stay distinct:
//! the *loose* structural check lives in `discovery::classifier` and decides
//! whether a document is worth extracting metadata from at all; the *strict*
//! shape contract in this module decides whether a result may carry
//! `validated = true`.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

lazy_static! {
    /// Allowed characters for MCP and tool names.
    static ref NAME_PATTERN: Regex = Regex::new(r"^[A-Za-z0-9._-]+$").unwrap();
    /// Semantic version, three numeric components.
    static ref VERSION_PATTERN: Regex = Regex::new(r"^\d+\.\d+\.\d+$").unwrap();
}

/// Minimum tool description length enforced by strict validation.
const STRICT_MIN_TOOL_DESCRIPTION: usize = 10;

/// Syntax a document was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Json,
    Yaml,
    #[default]
    Unknown,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Json => "json",
            FileType::Yaml => "yaml",
            FileType::Unknown => "unknown",
        }
    }
}

/// A structurally parsed candidate document.
///
/// YAML input is normalized into `serde_json::Value` during parsing, so the
/// rest of the pipeline works against a single value shape regardless of the
/// source syntax.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub format: FileType,
    pub value: Value,
}

impl ParsedDocument {
    pub fn name(&self) -> Option<&str> {
        self.value.get("name").and_then(Value::as_str)
    }

    pub fn description(&self) -> Option<&str> {
        self.value.get("description").and_then(Value::as_str)
    }

    pub fn version(&self) -> Option<&str> {
        self.value.get("version").and_then(Value::as_str)
    }

    pub fn tools(&self) -> &[Value] {
        self.value
            .get("tools")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Explicit `domain` field, when the author provided one.
    pub fn explicit_domain(&self) -> Option<&str> {
        self.value.get("domain").and_then(Value::as_str)
    }

    /// Explicit `tags` field, string entries only.
    pub fn explicit_tags(&self) -> Vec<String> {
        self.value
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// How demanding the shape contract is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Full contract: `version` is required, tool descriptions have a
    /// minimum length.
    Strict,
    /// `version` is optional (still pattern-checked when present) and tool
    /// descriptions may be short. Used for hand-authored library ingest.
    Relaxed,
}

/// Validate a document value against the MCP shape contract.
///
/// Returns the first violation as a human-readable reason. A failure here is
/// a normal negative outcome, not a fault: the caller records it as
/// `validated = false`.
pub fn validate_shape(value: &Value, mode: ValidationMode) -> Result<(), String> {
    let obj = value
        .as_object()
        .ok_or_else(|| "document must be an object".to_string())?;

    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| "missing required 'name' field".to_string())?;
    if !NAME_PATTERN.is_match(name) {
        return Err(format!("name '{}' contains invalid characters", name));
    }

    match obj.get("version") {
        Some(version) => {
            let version = version
                .as_str()
                .ok_or_else(|| "'version' must be a string".to_string())?;
            if !VERSION_PATTERN.is_match(version) {
                return Err(format!("version '{}' is not MAJOR.MINOR.PATCH", version));
            }
        }
        None if mode == ValidationMode::Strict => {
            return Err("missing required 'version' field".to_string());
        }
        None => {}
    }

    if let Some(description) = obj.get("description") {
        if !description.is_string() {
            return Err("'description' must be a string".to_string());
        }
    }

    let tools = obj
        .get("tools")
        .and_then(Value::as_array)
        .ok_or_else(|| "missing required 'tools' array".to_string())?;
    if tools.is_empty() {
        return Err("'tools' must contain at least one tool".to_string());
    }

    for (index, tool) in tools.iter().enumerate() {
        validate_tool(tool, index, mode)?;
    }

    Ok(())
}

fn validate_tool(tool: &Value, index: usize, mode: ValidationMode) -> Result<(), String> {
    let obj = tool
        .as_object()
        .ok_or_else(|| format!("tool #{} must be an object", index))?;

    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| format!("tool #{} is missing 'name'", index))?;
    if !NAME_PATTERN.is_match(name) {
        return Err(format!("tool '{}' has an invalid name", name));
    }

    let description = obj
        .get("description")
        .and_then(Value::as_str)
        .ok_or_else(|| format!("tool '{}' is missing 'description'", name))?;
    if mode == ValidationMode::Strict && description.len() < STRICT_MIN_TOOL_DESCRIPTION {
        return Err(format!(
            "tool '{}' description is shorter than {} characters",
            name, STRICT_MIN_TOOL_DESCRIPTION
        ));
    }

    let parameters = obj
        .get("parameters")
        .ok_or_else(|| format!("tool '{}' is missing 'parameters'", name))?;
    let parameters = parameters
        .as_object()
        .ok_or_else(|| format!("tool '{}' parameters must be an object", name))?;

    // Parameter names must be meaningful keys; an empty key is author error.
    for key in parameters.keys() {
        if key.is_empty() {
            return Err(format!("tool '{}' has an empty parameter name", name));
        }
    }

    Ok(())
}
