//! HTTP route modules

pub mod plushy;

use crate::config::ServerConfig;
use actix_web::http::Method;
use actix_web::middleware::DefaultHeaders;
use actix_web::web;

pub const ALLOW_ORIGIN: &str = "access-control-allow-origin";
pub const ALLOW_HEADERS: &str = "access-control-allow-headers";
pub const ALLOW_METHODS: &str = "access-control-allow-methods";

/// Mount the relay endpoint
///
/// Every response from the endpoint carries the CORS origin and headers;
/// the preflight handler adds the allowed methods itself.
pub fn configure_routes(cfg: &mut web::ServiceConfig, server: &ServerConfig) {
    let cors = &server.cors;

    cfg.service(
        web::resource(server.endpoint_path.as_str())
            .wrap(
                DefaultHeaders::new()
                    .add((ALLOW_ORIGIN, cors.allowed_origin.clone()))
                    .add((ALLOW_HEADERS, cors.allowed_headers.clone())),
            )
            .route(web::post().to(plushy::edit_image))
            .route(web::method(Method::OPTIONS).to(plushy::preflight)),
    );
}
