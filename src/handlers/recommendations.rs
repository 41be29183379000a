use crate::{
    error::ApiError,
    models::{ErrorResponse, RecommendationRequest, RecommendationResponse},
    services::RecommendationService,
};
use actix_web::{
    web::{self, Json},
    HttpResponse,
};

pub fn recommendations_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/recommend")
            .app_data(json_config())
            .route(web::post().to(recommend)),
    );
}

/// Report unreadable bodies through the same JSON error envelope as other failures.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::Validation(format!("Invalid request body: {}", err)).into()
    })
}

/// Get book recommendations
///
/// Builds a prompt from the preferred genres, length and topics and returns three
/// plain-text recommendations produced by the configured model.
#[utoipa::path(
    post,
    path = "/api/recommend",
    tag = "Recommendations",
    request_body = RecommendationRequest,
    responses(
        (status = 200, description = "Recommendations generated", body = RecommendationResponse),
        (status = 400, description = "Missing or invalid preferences", body = ErrorResponse),
        (status = 500, description = "The completion provider failed", body = ErrorResponse),
    )
)]
pub async fn recommend(
    request: Json<RecommendationRequest>,
    recommendation_service: web::Data<RecommendationService>,
) -> Result<HttpResponse, ApiError> {
    let result = recommendation_service.recommend(&request).await?;

    Ok(HttpResponse::Ok().json(RecommendationResponse::from(result)))
}
