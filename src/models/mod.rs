use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

pub use chat::{ChatMessage, CompletionResult, Role};

mod chat;

/// Request structure for book recommendations
///
/// Every field is optional on the wire so that absent preferences are reported
/// with a single, fixed validation message instead of a body parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct RecommendationRequest {
    /// Preferred genres
    #[schema(example = json!(["fantasy", "mystery"]))]
    pub genres: Option<Vec<String>>,
    /// Preferred book length: `short`, `medium` or `long`
    #[schema(example = "medium")]
    pub length: Option<String>,
    /// Topics of interest
    #[schema(example = json!(["dragons", "found family"]))]
    pub topics: Option<Vec<String>>,
}

/// Preferred book length, resolved to a page-range phrase for the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookLength {
    Short,
    Medium,
    Long,
}

impl BookLength {
    pub const ALL: [BookLength; 3] = [BookLength::Short, BookLength::Medium, BookLength::Long];

    pub fn as_str(self) -> &'static str {
        match self {
            BookLength::Short => "short",
            BookLength::Medium => "medium",
            BookLength::Long => "long",
        }
    }

    /// Human-readable page range used in the rendered prompt.
    pub fn page_range(self) -> &'static str {
        match self {
            BookLength::Short => "under 250 pages",
            BookLength::Medium => "250-400 pages",
            BookLength::Long => "over 400 pages",
        }
    }
}

impl fmt::Display for BookLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookLength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookLength::ALL
            .into_iter()
            .find(|length| length.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Invalid length '{}': expected one of short, medium, long",
                    s
                )
            })
    }
}

/// Response structure for book recommendations
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecommendationResponse {
    /// Plain-text list of three recommendations produced by the model
    pub recommendations: String,
    /// Identifier of the model that produced the completion
    #[schema(example = "openai/gpt-4o-mini")]
    pub model: String,
    /// Token accounting reported by the provider, passed through unchanged
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub usage: Option<serde_json::Value>,
}

impl From<CompletionResult> for RecommendationResponse {
    fn from(result: CompletionResult) -> Self {
        Self {
            recommendations: result.text,
            model: result.model,
            usage: result.usage,
        }
    }
}

/// Health check response structure
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Status of the service
    #[schema(example = "ok")]
    pub status: String,
    /// Current timestamp in RFC3339 format
    #[schema(example = "2024-01-15T10:30:00Z")]
    pub timestamp: String,
}

/// Error response structure
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "Missing required parameters: genres, length, topics")]
    pub error: String,
    /// Underlying cause, present for upstream failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Description of a capability exposed by this server
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ToolDescriptor {
    #[schema(example = "get_book_recommendation")]
    pub name: String,
    pub description: String,
    /// JSON schema of the tool's parameters
    #[schema(value_type = Object)]
    pub parameters: serde_json::Value,
}

/// Server identity and the tools it exposes
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServerInfo {
    #[schema(example = "Book Recommendation MCP Server")]
    pub name: String,
    #[schema(example = "1.0.0")]
    pub version: String,
    pub tools: Vec<ToolDescriptor>,
}
