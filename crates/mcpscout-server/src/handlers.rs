//! HTTP handlers for the McpScout API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use mcpscout_core::{
    classify, extract, score, validate_shape, CandidateContext, DiscoveryError, FileType,
    McpFilter, McpSortKey, ScoreContext, SearchOptions, SearchResult, StoredMcp, ValidationMode,
};

use crate::state::AppState;

const MAX_LIMIT: usize = 100;
const DEFAULT_SEARCH_LIMIT: usize = 20;

/// API error carrying a status code and a JSON error body.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    fn unprocessable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        warn!("Internal error: {:#}", e);
        Self::internal("internal error")
    }
}

impl From<DiscoveryError> for ApiError {
    fn from(e: DiscoveryError) -> Self {
        warn!("Discovery failed: {}", e);
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: e.to_string(),
        }
    }
}

// ============================================
// Info / health
// ============================================

#[derive(Serialize)]
pub struct InfoResponse {
    pub message: String,
    pub version: String,
    pub features: Vec<String>,
}

/// Service info endpoint
pub async fn root() -> Json<InfoResponse> {
    Json(InfoResponse {
        message: "McpScout API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        features: vec![
            "multi-source MCP discovery".to_string(),
            "schema validation and confidence scoring".to_string(),
            "TTL-cached ranked search".to_string(),
            "local MCP library".to_string(),
        ],
    })
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub database: String,
    pub supported_platforms: Vec<String>,
    pub version: String,
}

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.mcps.list(&McpFilter::with_limit(1)).await {
        Ok(_) => "connected".to_string(),
        Err(_) => "disconnected".to_string(),
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        database,
        supported_platforms: state
            .aggregator
            .adapter_ids()
            .into_iter()
            .map(str::to_string)
            .collect(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================
// Library CRUD
// ============================================

/// Library list item; omits the raw schema text to keep listings small.
#[derive(Serialize)]
pub struct McpListItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub domain: String,
    pub validated: bool,
    pub popularity: i64,
    pub source_url: Option<String>,
    pub source_platform: String,
    pub confidence_score: f64,
    pub file_type: FileType,
    pub repository: Option<String>,
    pub stars: i64,
    pub created_at: String,
}

impl From<StoredMcp> for McpListItem {
    fn from(mcp: StoredMcp) -> Self {
        Self {
            id: mcp.id,
            name: mcp.name,
            description: mcp.description,
            tags: mcp.tags,
            domain: mcp.domain,
            validated: mcp.validated,
            popularity: mcp.popularity,
            source_url: mcp.source_url,
            source_platform: mcp.source_platform,
            confidence_score: mcp.confidence_score,
            file_type: mcp.file_type,
            repository: mcp.repository,
            stars: mcp.stars,
            created_at: mcp.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub domain: Option<String>,
    pub tags: Option<String>,
    pub validated: Option<bool>,
    pub sort_by: Option<McpSortKey>,
    pub limit: Option<usize>,
}

/// List library MCPs with filtering
pub async fn list_mcps(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<McpListItem>>, ApiError> {
    let limit = params.limit.unwrap_or(50);
    if limit == 0 || limit > MAX_LIMIT {
        return Err(ApiError::bad_request(format!(
            "limit must be between 1 and {}",
            MAX_LIMIT
        )));
    }

    let filter = McpFilter {
        domain: params.domain,
        tag: params.tags,
        validated: params.validated,
        sort_by: params.sort_by.unwrap_or_default(),
        limit,
    };

    let mcps = state.mcps.list(&filter).await?;
    Ok(Json(mcps.into_iter().map(McpListItem::from).collect()))
}

/// Get one library MCP by ID, including its schema text
pub async fn get_mcp(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StoredMcp>, ApiError> {
    match state.mcps.get(&id).await? {
        Some(mcp) => Ok(Json(mcp)),
        None => Err(ApiError::not_found(format!("MCP '{}' not found", id))),
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateMcpRequest {
    /// Raw schema document, JSON or YAML.
    pub schema_content: String,
    /// Optional overrides for the extracted metadata.
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub source_url: Option<String>,
}

/// Ingest a document into the library.
///
/// The document must at least pass classification; `validated` reflects the
/// relaxed shape contract (hand-authored documents rarely carry a version).
pub async fn create_mcp(
    State(state): State<AppState>,
    Json(request): Json<CreateMcpRequest>,
) -> Result<(StatusCode, Json<StoredMcp>), ApiError> {
    let doc = classify(&request.schema_content)
        .map_err(|rejection| ApiError::unprocessable(format!("not an MCP document: {:?}", rejection)))?;

    let source_url = request.source_url.clone().unwrap_or_default();
    let ctx = CandidateContext {
        title: request.name.as_deref().unwrap_or(""),
        description: request.description.as_deref().unwrap_or(""),
        url: &source_url,
        repository: None,
    };

    let meta = extract(&doc, &ctx);
    let validated = validate_shape(&doc.value, ValidationMode::Relaxed).is_ok();
    let confidence_score = score(
        &doc.value,
        &ScoreContext {
            url: &source_url,
            title: ctx.title,
            description: ctx.description,
            stars: None,
        },
    );

    let mcp = StoredMcp {
        id: Uuid::new_v4().to_string(),
        name: request.name.unwrap_or(meta.name),
        description: request.description.unwrap_or(meta.description),
        schema_content: request.schema_content,
        tags: request.tags.unwrap_or(meta.tags),
        domain: meta.domain,
        validated,
        popularity: 0,
        source_url: request.source_url,
        source_platform: "local".to_string(),
        confidence_score,
        file_type: doc.format,
        repository: None,
        stars: 0,
        created_at: Utc::now(),
    };

    state.mcps.save(&mcp).await?;
    info!("Ingested MCP '{}' into the library", mcp.name);

    Ok((StatusCode::CREATED, Json(mcp)))
}

/// Delete a library MCP
pub async fn delete_mcp(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.mcps.delete(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("MCP '{}' not found", id)))
    }
}

// ============================================
// Discovery search
// ============================================

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
    pub limit: Option<usize>,
    /// Comma-separated adapter IDs; absent means all.
    pub sources: Option<String>,
    pub min_confidence: Option<f64>,
}

/// Web discovery search
pub async fn search_mcps(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchResult>>, ApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    let min_confidence = params.min_confidence.unwrap_or(0.0);
    let sources = params
        .sources
        .map(|s| {
            s.split(',')
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .collect()
        })
        .unwrap_or_default();

    run_search(&state, &params.query, limit, sources, min_confidence, true).await
}

#[derive(Debug, Deserialize)]
pub struct EnhancedSearchRequest {
    pub query: String,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub sources: Option<Vec<String>>,
    #[serde(default)]
    pub min_confidence: Option<f64>,
    /// Disable the query-relevance re-ranking pass; ordering then follows
    /// confidence alone.
    #[serde(default)]
    pub relevance_ranking: Option<bool>,
}

/// Discovery search with detailed options
pub async fn enhanced_search(
    State(state): State<AppState>,
    Json(request): Json<EnhancedSearchRequest>,
) -> Result<Json<Vec<SearchResult>>, ApiError> {
    run_search(
        &state,
        &request.query,
        request.limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
        request.sources.unwrap_or_default(),
        request.min_confidence.unwrap_or(0.0),
        request.relevance_ranking.unwrap_or(true),
    )
    .await
}

async fn run_search(
    state: &AppState,
    query: &str,
    limit: usize,
    sources: Vec<String>,
    min_confidence: f64,
    relevance_ranking: bool,
) -> Result<Json<Vec<SearchResult>>, ApiError> {
    if query.trim().is_empty() {
        return Err(ApiError::bad_request("query must not be empty"));
    }
    if limit == 0 || limit > MAX_LIMIT {
        return Err(ApiError::bad_request(format!(
            "limit must be between 1 and {}",
            MAX_LIMIT
        )));
    }
    if !(0.0..=1.0).contains(&min_confidence) {
        return Err(ApiError::bad_request(
            "min_confidence must be between 0.0 and 1.0",
        ));
    }

    let opts = SearchOptions {
        sources,
        min_confidence,
        relevance_ranking,
    };

    let results = state.aggregator.search(query, limit, &opts).await?;
    Ok(Json(results))
}
