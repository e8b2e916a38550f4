use axum::{
    extract::{rejection::JsonRejection, Path},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;

use crate::errors::PhonebookResult;
use crate::models::{NewPerson, Person};
use crate::services::PersonService;

#[tracing::instrument(name = "http::person::list", skip_all)]
pub async fn list(
    Extension(person_service): Extension<Arc<PersonService>>,
) -> PhonebookResult<Json<Vec<Person>>> {
    Ok(Json(person_service.list().await?))
}

#[tracing::instrument(name = "http::person::get_by_id", skip(person_service))]
pub async fn get_by_id(
    Path(id): Path<String>,
    Extension(person_service): Extension<Arc<PersonService>>,
) -> PhonebookResult<Json<Person>> {
    Ok(Json(person_service.get_by_id(&id).await?))
}

#[tracing::instrument(name = "http::person::create", skip_all)]
pub async fn create(
    Extension(person_service): Extension<Arc<PersonService>>,
    payload: Result<Json<NewPerson>, JsonRejection>,
) -> PhonebookResult<Json<Person>> {
    let Json(new_person) = payload?;

    match serde_json::to_string(&new_person) {
        Ok(person) => tracing::info!(person = %person, "create person requested"),
        Err(err) => tracing::warn!("could not log posted person: {err}"),
    }

    Ok(Json(person_service.create(new_person).await?))
}

#[tracing::instrument(name = "http::person::update", skip(person_service, payload))]
pub async fn update(
    Path(id): Path<String>,
    Extension(person_service): Extension<Arc<PersonService>>,
    payload: Result<Json<NewPerson>, JsonRejection>,
) -> PhonebookResult<Json<Person>> {
    let Json(new_person) = payload?;

    Ok(Json(person_service.update(&id, new_person).await?))
}

#[tracing::instrument(name = "http::person::delete", skip(person_service))]
pub async fn delete(
    Path(id): Path<String>,
    Extension(person_service): Extension<Arc<PersonService>>,
) -> PhonebookResult<StatusCode> {
    person_service.delete(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
