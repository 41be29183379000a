use actix_web::{web, HttpResponse, Scope};
use utoipa::OpenApi;

use crate::app::ApiDoc;
use crate::handlers::{health_check, mcp_info_handler, recommendations_config};

/// Register every route served by the application
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(openapi_route())
        .service(api_routes());
}

/// Configure all routes under `/api`
pub fn api_routes() -> Scope {
    web::scope("/api")
        .service(mcp_info_handler)
        .configure(recommendations_config)
}

/// Configure OpenAPI documentation JSON endpoint
pub fn openapi_route() -> actix_web::Resource {
    web::resource("/api-docs/openapi.json").route(web::get().to(|| async {
        HttpResponse::Ok().json(ApiDoc::openapi())
    }))
}
