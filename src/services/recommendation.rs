use crate::{
    error::Result,
    models::{CompletionResult, RecommendationRequest},
    services::{openrouter::CompletionGateway, prompt},
};
use std::sync::Arc;
use tracing::{debug, error};

/// Validates preferences, renders the prompt and asks the gateway for a completion.
#[derive(Clone)]
pub struct RecommendationService {
    gateway: Arc<dyn CompletionGateway>,
}

impl RecommendationService {
    pub fn new(gateway: Arc<dyn CompletionGateway>) -> Self {
        Self { gateway }
    }

    pub async fn recommend(&self, request: &RecommendationRequest) -> Result<CompletionResult> {
        let messages = prompt::build(request)?;
        debug!("Rendered recommendation prompt: {} chars", messages[1].content.len());

        self.gateway.complete(&messages).await.map_err(|e| {
            error!("Error fetching recommendations: {}", e);
            e
        })
    }
}
