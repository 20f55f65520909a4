use super::{ApiError, ErrorBody, INVALID_ID};
use crate::{
    api::store::Store,
    users::{validate, NewUser, User, UserId},
};
use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{debug, info, instrument};

fn parse_id(id: &str) -> Result<UserId, ApiError> {
    id.trim()
        .parse::<UserId>()
        .map_err(|_| ApiError::BadRequest(INVALID_ID.to_string()))
}

fn checked(payload: Result<Json<NewUser>, JsonRejection>) -> Result<NewUser, ApiError> {
    let Json(user) = payload.map_err(|rejection| {
        debug!("Rejected user payload: {}", rejection.body_text());
        ApiError::BadRequest(rejection.body_text())
    })?;

    let errors = validate(&user);
    match errors.first() {
        Some(message) => Err(ApiError::BadRequest(message.to_string())),
        None => Ok(user),
    }
}

#[utoipa::path(
    get,
    path= "/api/users",
    responses (
        (status = 200, description = "All users ordered by id", body = [User]),
        (status = 500, description = "Storage failure", body = ErrorBody)
    ),
    tag= "users"
)]
#[instrument(skip(store))]
pub async fn list_users(store: Extension<Store>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(store.list().await?))
}

#[utoipa::path(
    get,
    path= "/api/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses (
        (status = 200, description = "User found", body = User),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tag= "users"
)]
#[instrument(skip(store))]
pub async fn get_user(
    Path(id): Path<String>,
    store: Extension<Store>,
) -> Result<Json<User>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(store.get(id).await?))
}

#[utoipa::path(
    post,
    path= "/api/users",
    request_body = NewUser,
    responses (
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 409, description = "Email already exists", body = ErrorBody)
    ),
    tag= "users"
)]
#[instrument(skip(store, payload))]
pub async fn create_user(
    store: Extension<Store>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let user = checked(payload)?;
    let created = store.create(user).await?;

    info!(id = created.id, "user created");

    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path= "/api/users/{id}",
    params(("id" = i64, Path, description = "User id; any id in the body is ignored")),
    request_body = NewUser,
    responses (
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Validation failed or invalid id", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 409, description = "Email already exists", body = ErrorBody)
    ),
    tag= "users"
)]
#[instrument(skip(store, payload))]
pub async fn update_user(
    Path(id): Path<String>,
    store: Extension<Store>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let id = parse_id(&id)?;
    let user = checked(payload)?;
    let updated = store.update(id, user).await?;

    info!(id, "user updated");

    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path= "/api/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses (
        (status = 204, description = "User deleted"),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tag= "users"
)]
#[instrument(skip(store))]
pub async fn delete_user(
    Path(id): Path<String>,
    store: Extension<Store>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    store.delete(id).await?;

    info!(id, "user deleted");

    Ok(StatusCode::NO_CONTENT)
}
