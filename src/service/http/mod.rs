use axum::{
    body::{Body, BoxBody},
    handler::Handler,
    http::{header::CONTENT_LENGTH, Request, Response},
    routing::get,
    Extension, Router,
};
use std::{sync::Arc, time::Duration};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::Span;

use crate::services::PersonService;

pub mod pages;
pub mod person;

pub fn http_router(person_service: Arc<PersonService>) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/health", get(pages::health))
        .route("/info", get(pages::info))
        .route("/api/info", get(pages::info))
        .route("/api/persons", get(person::list).post(person::create))
        .route(
            "/api/persons/:id",
            get(person::get_by_id)
                .put(person::update)
                .delete(person::delete),
        )
        .fallback(pages::unknown_endpoint.into_service())
        .layer(Extension(person_service))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "http",
                        http.method = %request.method(),
                        http.url = %request.uri(),
                    )
                })
                .on_response(|response: &Response<BoxBody>, latency: Duration, _span: &Span| {
                    let content_length = response
                        .headers()
                        .get(CONTENT_LENGTH)
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or("-");

                    tracing::info!(
                        "{} {} - {} ms",
                        response.status().as_u16(),
                        content_length,
                        latency.as_millis()
                    );
                }),
        )
}
