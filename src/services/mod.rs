pub mod openrouter;
pub mod prompt;
pub mod recommendation;
pub mod tools;

// Re-export public types
pub use openrouter::{CompletionGateway, OpenRouterClient};
pub use recommendation::RecommendationService;
