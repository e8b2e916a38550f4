use axum::{response::Html, Extension};
use chrono::{DateTime, Local};
use std::sync::Arc;

use crate::errors::{PhonebookError, PhonebookResult};
use crate::services::PersonService;

const INDEX_HTML: &str = "<!DOCTYPE html>\n<html>\n  <head><title>Phonebook</title></head>\n  <body><h1>Phonebook</h1></body>\n</html>\n";

#[tracing::instrument(name = "http::index")]
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[tracing::instrument(name = "http::health")]
pub async fn health() -> Html<&'static str> {
    Html("ok")
}

#[tracing::instrument(name = "http::info", skip_all)]
pub async fn info(
    Extension(person_service): Extension<Arc<PersonService>>,
) -> PhonebookResult<Html<String>> {
    let count = person_service.count().await?;

    Ok(Html(render_info(count, Local::now())))
}

pub async fn unknown_endpoint() -> PhonebookError {
    PhonebookError::UnknownEndpoint
}

fn render_info(count: usize, now: DateTime<Local>) -> String {
    format!(
        "<div>Phonebook has info for {count} people</div>\n<span>{}</span>",
        now.format("%a %b %d %Y %H:%M:%S GMT%z")
    )
}
