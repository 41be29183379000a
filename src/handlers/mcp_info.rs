use crate::models::ServerInfo;
use actix_web::{get, web, HttpResponse};

/// Describe this server and the tool it exposes
#[utoipa::path(
    get,
    path = "/api/mcp-info",
    tag = "System",
    responses(
        (status = 200, description = "Server identity and tool descriptors", body = ServerInfo)
    )
)]
#[get("/mcp-info")]
pub async fn mcp_info(info: web::Data<ServerInfo>) -> HttpResponse {
    HttpResponse::Ok().json(info.get_ref())
}
