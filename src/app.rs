use crate::{
    config::Config,
    error::Result,
    handlers,
    models::{
        ErrorResponse, HealthResponse, RecommendationRequest, RecommendationResponse, ServerInfo,
        ToolDescriptor,
    },
    routes,
    services::{OpenRouterClient, RecommendationService},
};
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use log::info;
use std::{net::TcpListener, sync::Arc};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Book Recommendation MCP Server"),
    paths(
        handlers::recommendations::recommend,
        handlers::mcp_info::mcp_info,
        handlers::health::health_check,
    ),
    components(schemas(
        RecommendationRequest,
        RecommendationResponse,
        ErrorResponse,
        HealthResponse,
        ServerInfo,
        ToolDescriptor,
    )),
    tags(
        (name = "Recommendations", description = "LLM-backed book recommendations"),
        (name = "System", description = "Health and server metadata"),
    )
)]
pub struct ApiDoc;

/// Permissive CORS, matching the browser frontend's expectations
pub fn cors_policy() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
}

pub struct Application {
    port: u16,
    host: String,
    config: Config,
}

impl Application {
    /// Create a new application instance
    pub fn new(config: &Config) -> Self {
        Self {
            port: config.port,
            host: config.host.clone(),
            config: config.clone(),
        }
    }

    /// Build and run the server
    pub async fn run(&self) -> Result<()> {
        let bind_address = format!("0.0.0.0:{}", self.port);
        let listener = TcpListener::bind(&bind_address)
            .with_context(|| format!("Failed to bind {}", bind_address))?;
        info!("Starting server at http://{}:{}", self.host, self.port);
        info!("API: http://{}:{}/api/recommend", self.host, self.port);

        self.run_with_listener(listener).await
    }

    /// Run the server with a specific TCP listener
    /// This is useful for testing where we want to use a random port
    pub async fn run_with_listener(&self, listener: TcpListener) -> Result<()> {
        let gateway = OpenRouterClient::new(&self.config)?;
        let recommendation_service = web::Data::new(RecommendationService::new(Arc::new(gateway)));
        let server_info = web::Data::new(ServerInfo::current());

        HttpServer::new(move || {
            App::new()
                .wrap(cors_policy())
                .wrap(Logger::default())
                .app_data(recommendation_service.clone())
                .app_data(server_info.clone())
                .configure(routes::configure)
        })
        .listen(listener)?
        .run()
        .await?;

        Ok(())
    }
}
