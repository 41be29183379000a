use crate::models::{ServerInfo, ToolDescriptor};
use once_cell::sync::Lazy;
use serde_json::json;

pub const SERVER_NAME: &str = "Book Recommendation MCP Server";

/// The single capability this server exposes.
pub static BOOK_RECOMMENDATION_TOOL: Lazy<ToolDescriptor> = Lazy::new(|| ToolDescriptor {
    name: "get_book_recommendation".to_string(),
    description: "Get personalized book recommendations based on user preferences".to_string(),
    parameters: json!({
        "type": "object",
        "properties": {
            "genres": {
                "type": "array",
                "items": { "type": "string" },
                "description": "List of preferred genres"
            },
            "length": {
                "type": "string",
                "enum": ["short", "medium", "long"],
                "description": "Preferred book length"
            },
            "topics": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Topics of interest"
            }
        },
        "required": ["genres", "length", "topics"]
    }),
});

impl ServerInfo {
    /// Identity reported by `/api/mcp-info`, built once at startup.
    pub fn current() -> Self {
        Self {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            tools: vec![BOOK_RECOMMENDATION_TOOL.clone()],
        }
    }
}
